// Copyright 2025 the Adwaita-web Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Popover configuration and its attribute spelling.

use alloc::string::String;

use adwaita_dom::{Document, NodeId, parse_bool_attribute};
use adwaita_placement::Placement;

/// How a popover finds its anchor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TargetRef {
    /// A compound selector resolved against the document on `show()`.
    Selector(String),
    /// A direct element reference (weak: a stale id resolves to nothing).
    Node(NodeId),
}

impl TargetRef {
    /// Resolve to a connected element.
    pub fn resolve(&self, doc: &Document) -> Option<NodeId> {
        let node = match self {
            Self::Selector(selector) => doc.query_selector(doc.root(), selector)?,
            Self::Node(node) => *node,
        };
        doc.is_connected(node).then_some(node)
    }
}

/// Popover configuration.
///
/// Every flag defaults to `true` and the placement to [`Placement::BOTTOM`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PopoverConfig {
    /// Anchor element.
    pub target: Option<TargetRef>,
    /// Preferred placement relative to the anchor.
    pub placement: Placement,
    /// Close on a pointer press outside both surface and anchor.
    pub light_dismiss: bool,
    /// Keep Tab navigation inside the surface while open.
    pub trap_focus: bool,
    /// Render an arrow pointing at the anchor.
    pub show_arrow: bool,
}

impl Default for PopoverConfig {
    fn default() -> Self {
        Self {
            target: None,
            placement: Placement::BOTTOM,
            light_dismiss: true,
            trap_focus: true,
            show_arrow: true,
        }
    }
}

/// Attributes a popover reacts to.
pub const OBSERVED_ATTRIBUTES: [&str; 6] = [
    "target",
    "placement",
    "arrow",
    "light-dismiss",
    "trap-focus",
    "open",
];

impl PopoverConfig {
    /// Apply one configuration attribute. Returns `false` for attributes that
    /// are not part of the configuration (including `open`).
    pub fn apply_attribute(&mut self, name: &str, value: Option<&str>) -> bool {
        match name {
            "target" => self.target = value.map(|v| TargetRef::Selector(String::from(v))),
            "placement" => {
                self.placement = match value.map(str::parse::<Placement>) {
                    None => Placement::BOTTOM,
                    Some(Ok(placement)) => placement,
                    Some(Err(_)) => {
                        tracing::warn!(value, "unknown placement; using bottom");
                        Placement::BOTTOM
                    }
                }
            }
            "arrow" => self.show_arrow = parse_bool_attribute(value, true),
            "light-dismiss" => self.light_dismiss = parse_bool_attribute(value, true),
            "trap-focus" => self.trap_focus = parse_bool_attribute(value, true),
            _ => return false,
        }
        true
    }
}
