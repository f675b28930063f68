// Copyright 2025 the Adwaita-web Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input events delivered through the composed tree.

use kurbo::Point;

use crate::listeners::ListenerTarget;
use crate::tree::ComposedPath;
use crate::types::NodeId;

/// Event types the runtime dispatches.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A pointer button went down.
    PointerDown,
    /// A pointer button went up.
    PointerUp,
    /// A press and release recognized as a click.
    Click,
    /// A key was pressed.
    KeyDown,
    /// The viewport changed size. Delivered to window listeners.
    Resize,
    /// The document or an element scrolled.
    Scroll,
}

impl EventKind {
    /// Whether events of this kind bubble after the target phase.
    pub const fn bubbles(self) -> bool {
        !matches!(self, Self::Resize | Self::Scroll)
    }
}

/// Logical key of a key event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Escape.
    Escape,
    /// Tab (Shift+Tab is a `Tab` with [`Modifiers::SHIFT`]).
    Tab,
    /// Enter.
    Enter,
    /// Space bar.
    Space,
    /// A printable character.
    Character(char),
    /// Anything else.
    Other,
}

bitflags::bitflags! {
    /// Keyboard modifiers held during an event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 0b0001;
        /// Control.
        const CTRL = 0b0010;
        /// Alt / Option.
        const ALT = 0b0100;
        /// Meta / Command.
        const META = 0b1000;
    }
}

/// A dispatched event.
///
/// `path` holds the composed path from the target up to the document root and
/// is filled in by the runtime. `current_target` names the listener target
/// being invoked.
#[derive(Clone, Debug)]
pub struct Event {
    /// What happened.
    pub kind: EventKind,
    /// Innermost target, or `None` for window- and document-level events.
    pub target: Option<NodeId>,
    /// Composed path, target first.
    pub path: ComposedPath,
    /// Listener target currently being invoked.
    pub current_target: ListenerTarget,
    /// Pointer position in viewport coordinates.
    pub position: Point,
    /// Pointer button (0 = primary).
    pub button: u8,
    /// Key for keyboard events.
    pub key: Option<Key>,
    /// Held modifiers.
    pub modifiers: Modifiers,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl Event {
    /// A bare event of `kind` at `target`.
    pub fn new(kind: EventKind, target: Option<NodeId>) -> Self {
        Self {
            kind,
            target,
            path: ComposedPath::new(),
            current_target: ListenerTarget::Window,
            position: Point::ZERO,
            button: 0,
            key: None,
            modifiers: Modifiers::empty(),
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// A pointer event.
    pub fn pointer(kind: EventKind, target: NodeId, position: Point, button: u8) -> Self {
        Self {
            position,
            button,
            ..Self::new(kind, Some(target))
        }
    }

    /// A key-down event.
    pub fn key_down(target: Option<NodeId>, key: Key, modifiers: Modifiers) -> Self {
        Self {
            key: Some(key),
            modifiers,
            ..Self::new(EventKind::KeyDown, target)
        }
    }

    /// Suppress the host's default action.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether a listener called [`Event::prevent_default`].
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Skip the remaining listener targets.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Whether a listener called [`Event::stop_propagation`].
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// Whether `node` lies on the composed path.
    pub fn path_contains(&self, node: NodeId) -> bool {
        self.path.contains(&node)
    }

    /// Whether this is a Tab press, and if so whether Shift was held.
    pub fn tab_direction(&self) -> Option<bool> {
        (self.key == Some(Key::Tab)).then(|| self.modifiers.contains(Modifiers::SHIFT))
    }
}
