// Copyright 2025 the Adwaita-web Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mutation and resize observation.
//!
//! Observations are registered on the [`Document`](crate::Document) for a
//! single target node (no subtree observation). Matching changes queue a
//! [`MutationRecord`] addressed to the observing component; the
//! [`Runtime`](crate::Runtime) delivers queued records at the next microtask
//! checkpoint through [`Component::on_mutations`](crate::Component::on_mutations).

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Size;

use crate::component::ComponentId;
use crate::types::NodeId;

/// Identifier of a registered observation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// What to observe on a target.
#[derive(Clone, Debug, Default)]
pub struct ObserveOptions {
    /// Report attribute changes.
    pub attributes: bool,
    /// Restrict attribute reports to these names. Empty means all attributes.
    pub attribute_filter: Vec<String>,
    /// Report children being added or removed.
    pub child_list: bool,
    /// Report layout size changes.
    pub size: bool,
}

impl ObserveOptions {
    /// Observe the named attributes only.
    pub fn attributes(names: &[&str]) -> Self {
        Self {
            attributes: true,
            attribute_filter: names.iter().map(|n| String::from(*n)).collect(),
            ..Self::default()
        }
    }

    /// Observe child additions and removals.
    pub fn child_list() -> Self {
        Self {
            child_list: true,
            ..Self::default()
        }
    }

    /// Observe layout size changes.
    pub fn size() -> Self {
        Self {
            size: true,
            ..Self::default()
        }
    }

    fn wants_attribute(&self, name: &str) -> bool {
        self.attributes
            && (self.attribute_filter.is_empty() || self.attribute_filter.iter().any(|n| n == name))
    }
}

/// What changed.
#[derive(Clone, Debug, PartialEq)]
pub enum MutationKind {
    /// An attribute was set, changed or removed.
    Attribute {
        /// Attribute name.
        name: String,
        /// Value before the change.
        old_value: Option<String>,
    },
    /// Children were added or removed.
    ChildList,
    /// The layout size changed.
    Resize {
        /// Size before the change.
        old: Size,
        /// Size after the change.
        new: Size,
    },
}

/// A single observed change.
#[derive(Clone, Debug, PartialEq)]
pub struct MutationRecord {
    /// Observation that produced this record.
    pub observer: ObserverId,
    /// Observed node.
    pub target: NodeId,
    /// What changed.
    pub kind: MutationKind,
}

#[derive(Clone, Debug)]
struct Observation {
    id: ObserverId,
    owner: ComponentId,
    target: NodeId,
    options: ObserveOptions,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct ObserverRegistry {
    observations: Vec<Observation>,
    pending: Vec<(ComponentId, MutationRecord)>,
    next: u64,
}

impl ObserverRegistry {
    pub(crate) fn observe(
        &mut self,
        owner: ComponentId,
        target: NodeId,
        options: ObserveOptions,
    ) -> ObserverId {
        self.next += 1;
        let id = ObserverId(self.next);
        self.observations.push(Observation {
            id,
            owner,
            target,
            options,
        });
        id
    }

    pub(crate) fn disconnect(&mut self, id: ObserverId) -> bool {
        let before = self.observations.len();
        self.observations.retain(|o| o.id != id);
        self.pending.retain(|(_, r)| r.observer != id);
        self.observations.len() != before
    }

    pub(crate) fn disconnect_owner(&mut self, owner: ComponentId) {
        self.observations.retain(|o| o.owner != owner);
        self.pending.retain(|(o, _)| *o != owner);
    }

    pub(crate) fn len(&self) -> usize {
        self.observations.len()
    }

    pub(crate) fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub(crate) fn take(&mut self) -> Vec<(ComponentId, MutationRecord)> {
        core::mem::take(&mut self.pending)
    }

    pub(crate) fn forget_node(&mut self, target: NodeId) {
        self.observations.retain(|o| o.target != target);
    }

    pub(crate) fn attribute_changed(&mut self, target: NodeId, name: &str, old_value: Option<&str>) {
        self.queue(
            target,
            |o| o.wants_attribute(name),
            || MutationKind::Attribute {
                name: String::from(name),
                old_value: old_value.map(String::from),
            },
        );
    }

    pub(crate) fn children_changed(&mut self, target: NodeId) {
        self.queue(target, |o| o.child_list, || MutationKind::ChildList);
    }

    pub(crate) fn resized(&mut self, target: NodeId, old: Size, new: Size) {
        self.queue(target, |o| o.size, || MutationKind::Resize { old, new });
    }

    fn queue(
        &mut self,
        target: NodeId,
        wants: impl Fn(&ObserveOptions) -> bool,
        kind: impl Fn() -> MutationKind,
    ) {
        for o in &self.observations {
            if o.target == target && wants(&o.options) {
                self.pending.push((
                    o.owner,
                    MutationRecord {
                        observer: o.id,
                        target,
                        kind: kind(),
                    },
                ));
            }
        }
    }
}
