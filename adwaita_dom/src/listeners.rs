// Copyright 2025 the Adwaita-web Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener registry and capture/target/bubble routing.

use alloc::vec::Vec;

use crate::component::ComponentId;
use crate::event::{Event, EventKind};
use crate::types::NodeId;

/// Where a listener is attached.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ListenerTarget {
    /// The window, outermost in every path.
    Window,
    /// The document, just inside the window.
    Document,
    /// A specific element or shadow root.
    Element(NodeId),
}

/// Identifier of a registered listener.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Clone, Debug)]
struct Listener {
    id: ListenerId,
    owner: ComponentId,
    target: ListenerTarget,
    kind: EventKind,
    capture: bool,
}

/// One delivery step produced by [`Listeners::route`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Delivery {
    pub(crate) listener: ListenerId,
    pub(crate) owner: ComponentId,
    pub(crate) target: ListenerTarget,
}

/// Registered event listeners, in registration order.
#[derive(Clone, Debug, Default)]
pub struct Listeners {
    list: Vec<Listener>,
    next: u64,
}

impl Listeners {
    /// Register a listener for `owner`.
    pub fn add(
        &mut self,
        owner: ComponentId,
        target: ListenerTarget,
        kind: EventKind,
        capture: bool,
    ) -> ListenerId {
        self.next += 1;
        let id = ListenerId(self.next);
        self.list.push(Listener {
            id,
            owner,
            target,
            kind,
            capture,
        });
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.list.len();
        self.list.retain(|l| l.id != id);
        self.list.len() != before
    }

    /// Remove every listener owned by `owner`.
    pub fn remove_owner(&mut self, owner: ComponentId) {
        self.list.retain(|l| l.owner != owner);
    }

    /// Whether the listener is registered.
    pub fn contains(&self, id: ListenerId) -> bool {
        self.list.iter().any(|l| l.id == id)
    }

    /// Total number of listeners.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Whether no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Number of listeners registered by `owner`.
    pub fn count_for(&self, owner: ComponentId) -> usize {
        self.list.iter().filter(|l| l.owner == owner).count()
    }

    fn at(
        &self,
        out: &mut Vec<Delivery>,
        target: ListenerTarget,
        kind: EventKind,
        capture: Option<bool>,
    ) {
        out.extend(
            self.list
                .iter()
                .filter(|l| {
                    l.target == target && l.kind == kind && capture.is_none_or(|c| l.capture == c)
                })
                .map(|l| Delivery {
                    listener: l.id,
                    owner: l.owner,
                    target,
                }),
        );
    }

    /// Listeners matching `event`, in delivery order.
    ///
    /// Capture listeners run outermost first (window, document, then the path
    /// from the root down), every listener on the target runs in registration
    /// order, then non-capture listeners run innermost first if the event
    /// bubbles. Events without a target run window then document listeners.
    pub(crate) fn route(&self, event: &Event) -> Vec<Delivery> {
        let mut out = Vec::new();
        let kind = event.kind;
        if event.path.is_empty() {
            self.at(&mut out, ListenerTarget::Window, kind, Some(true));
            self.at(&mut out, ListenerTarget::Document, kind, Some(true));
            self.at(&mut out, ListenerTarget::Window, kind, Some(false));
            self.at(&mut out, ListenerTarget::Document, kind, Some(false));
            return out;
        }
        self.at(&mut out, ListenerTarget::Window, kind, Some(true));
        self.at(&mut out, ListenerTarget::Document, kind, Some(true));
        for &node in event.path.iter().skip(1).rev() {
            self.at(&mut out, ListenerTarget::Element(node), kind, Some(true));
        }
        self.at(&mut out, ListenerTarget::Element(event.path[0]), kind, None);
        if kind.bubbles() {
            for &node in event.path.iter().skip(1) {
                self.at(&mut out, ListenerTarget::Element(node), kind, Some(false));
            }
            self.at(&mut out, ListenerTarget::Document, kind, Some(false));
            self.at(&mut out, ListenerTarget::Window, kind, Some(false));
        }
        out
    }
}
