// Copyright 2025 the Adwaita-web Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Press tracking for click synthesis.
//!
//! A click is only synthesized when the press and the release land on the same
//! element. A press that
//! starts inside a dialog and is released over its backdrop therefore produces
//! no click on either, so it cannot dismiss anything.
//!
//! ```
//! use adwaita_dom::press::{PressResult, PressState};
//!
//! let mut state: PressState<u32> = PressState::new();
//! state.on_down(None, 0, 42);
//! assert_eq!(state.on_up(None, 0, &42), PressResult::Click(42));
//!
//! state.on_down(None, 0, 42);
//! assert_eq!(state.on_up(None, 0, &7), PressResult::Suppressed(Some(42)));
//! ```

use alloc::collections::BTreeMap;

/// Pointer identifier; `None` arguments mean pointer `1`.
pub type PointerId = u64;

const PRIMARY_POINTER: PointerId = 1;

#[derive(Clone, Debug)]
struct Press<K> {
    target: K,
    button: u8,
}

/// Outcome of a pointer release.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PressResult<K> {
    /// Synthesize a click on this (original) target.
    Click(K),
    /// No click; carries the pressed target if there was a press.
    Suppressed(Option<K>),
}

/// Active presses per pointer.
#[derive(Clone, Debug)]
pub struct PressState<K> {
    presses: BTreeMap<PointerId, Press<K>>,
}

impl<K> Default for PressState<K> {
    fn default() -> Self {
        Self {
            presses: BTreeMap::new(),
        }
    }
}

impl<K: PartialEq + Clone> PressState<K> {
    /// Same-target clicks only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press.
    pub fn on_down(&mut self, pointer: Option<PointerId>, button: u8, target: K) {
        self.presses
            .insert(pointer.unwrap_or(PRIMARY_POINTER), Press { target, button });
    }

    /// Record a release and decide whether it clicks.
    pub fn on_up(&mut self, pointer: Option<PointerId>, button: u8, current_target: &K) -> PressResult<K> {
        let Some(press) = self.presses.remove(&pointer.unwrap_or(PRIMARY_POINTER)) else {
            return PressResult::Suppressed(None);
        };
        if press.button != button {
            return PressResult::Suppressed(Some(press.target));
        }
        if press.target == *current_target {
            return PressResult::Click(press.target);
        }
        PressResult::Suppressed(Some(press.target))
    }

    /// Drop a pointer's press. Returns `true` if one was active.
    pub fn cancel(&mut self, pointer: Option<PointerId>) -> bool {
        self.presses
            .remove(&pointer.unwrap_or(PRIMARY_POINTER))
            .is_some()
    }

    /// Whether a pointer is currently pressed.
    pub fn is_pressed(&self, pointer: Option<PointerId>) -> bool {
        self.presses
            .contains_key(&pointer.unwrap_or(PRIMARY_POINTER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_elsewhere_suppresses() {
        let mut state: PressState<u32> = PressState::new();
        state.on_down(None, 0, 1);
        assert_eq!(state.on_up(None, 0, &2), PressResult::Suppressed(Some(1)));
        assert!(!state.is_pressed(None));
    }

    #[test]
    fn button_mismatch_and_missing_press() {
        let mut state: PressState<u32> = PressState::new();
        assert_eq!(state.on_up(None, 0, &1), PressResult::Suppressed(None));
        state.on_down(Some(3), 0, 1);
        assert_eq!(state.on_up(Some(3), 2, &1), PressResult::Suppressed(Some(1)));
        state.on_down(None, 0, 1);
        assert!(state.cancel(None));
        assert!(!state.cancel(None));
    }
}
