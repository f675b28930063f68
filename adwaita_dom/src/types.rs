// Copyright 2025 the Adwaita-web Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the document: node identifiers and node kinds.

/// Identifier for a node in the document (generational).
///
/// Identifiers of destroyed nodes are stale: every accessor treats them as
/// missing, so holding a `NodeId` behaves like a weak reference.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// What a node is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A regular element with a tag, attributes and children.
    Element,
    /// The root of an element's shadow tree.
    ShadowRoot,
}

bitflags::bitflags! {
    /// Per-element behavior derived from the tag.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ElementFlags: u8 {
        /// Element takes focus without an explicit `tabindex`.
        const NATIVELY_FOCUSABLE = 0b0000_0001;
        /// Element is a `<slot>` projecting its host's children.
        const SLOT = 0b0000_0010;
    }
}

impl ElementFlags {
    /// Flags implied by a (lowercase) tag name.
    pub fn for_tag(tag: &str) -> Self {
        match tag {
            "button" | "input" | "select" | "textarea" | "summary" => Self::NATIVELY_FOCUSABLE,
            "slot" => Self::SLOT,
            _ => Self::empty(),
        }
    }
}
