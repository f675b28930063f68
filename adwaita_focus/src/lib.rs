// Copyright 2025 the Adwaita-web Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adwaita Focus: tab order and focus-trap cycling.
//!
//! Floating surfaces and modal dialogs keep keyboard focus inside themselves
//! while they are open. This crate models that as:
//! - **Candidates** ([`FocusEntry`]) listed in document order, each with a
//!   `tabindex`-style [`FocusEntry::tab_index`] and an enabled flag.
//! - A **tab order** ([`tab_order`]) following the usual rules: positive
//!   indices first in ascending order, then zero in document order; negative
//!   indices and disabled entries are not tabbable.
//! - A **trap** ([`FocusTrap`]) that decides what a Tab or Shift+Tab press does
//!   given the currently focused node.
//!
//! ## Minimal example
//!
//! ```rust
//! use adwaita_focus::{FocusEntry, FocusTrap, Navigation, TrapStep};
//!
//! let entries = [FocusEntry::new(1_u32), FocusEntry::new(2_u32)];
//! let trap = FocusTrap::default();
//!
//! // Tab on the last candidate wraps to the first…
//! assert_eq!(trap.step(Some(2), Navigation::Next, &entries), TrapStep::Move(1));
//! // …Shift+Tab on the first wraps to the last…
//! assert_eq!(trap.step(Some(1), Navigation::Prev, &entries), TrapStep::Move(2));
//! // …and everything in between is left to the host.
//! assert_eq!(trap.step(Some(1), Navigation::Next, &entries), TrapStep::Native);
//! ```
//!
//! The types are generic over the node identifier `K`, so hosts can use any
//! small copyable handle.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::cmp::Ordering;

/// Direction of a focus-trap step.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Navigation {
    /// Forward in tab order (Tab).
    Next,
    /// Backward in tab order (Shift+Tab).
    Prev,
}

impl Navigation {
    /// Map a Tab press to a direction from its Shift modifier.
    pub const fn from_shift(shift: bool) -> Self {
        if shift { Self::Prev } else { Self::Next }
    }
}

/// A focus candidate inside a trapped scope.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FocusEntry<K> {
    /// Identifier for this node.
    pub id: K,
    /// `tabindex`-style ordering key.
    ///
    /// Positive values come first in ascending order, zero follows in document
    /// order, negative values are focusable only programmatically.
    pub tab_index: i32,
    /// Whether the node can currently take focus.
    pub enabled: bool,
}

impl<K> FocusEntry<K> {
    /// An enabled entry in natural document order (`tab_index == 0`).
    pub const fn new(id: K) -> Self {
        Self {
            id,
            tab_index: 0,
            enabled: true,
        }
    }

    /// Whether this entry participates in sequential navigation.
    pub const fn is_tabbable(&self) -> bool {
        self.enabled && self.tab_index >= 0
    }
}

/// What the host should do with a Tab key press.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TrapStep<K> {
    /// Prevent the default action and focus this node.
    Move(K),
    /// Let the host's native sequential navigation handle it.
    Native,
    /// Prevent the default action and leave focus where it is.
    Suppress,
}

/// Focus trap that wraps from the last tabbable candidate to the first and back.
#[derive(Copy, Clone, Debug, Default)]
pub struct FocusTrap;

impl FocusTrap {
    /// Decide what a Tab press does.
    ///
    /// `entries` are the scope's candidates in document order and `active` is
    /// the currently focused node, if any. With no tabbable candidate the press
    /// is suppressed entirely. Focus that sits outside the scope is pulled back
    /// to its first (or, backwards, last) candidate.
    pub fn step<K>(&self, active: Option<K>, direction: Navigation, entries: &[FocusEntry<K>]) -> TrapStep<K>
    where
        K: Copy + Eq,
    {
        let order = tab_order(entries);
        let (Some(&first), Some(&last)) = (order.first(), order.last()) else {
            return TrapStep::Suppress;
        };

        let position = active.and_then(|a| order.iter().position(|&k| k == a));
        let Some(position) = position else {
            return match direction {
                Navigation::Next => TrapStep::Move(first),
                Navigation::Prev => TrapStep::Move(last),
            };
        };

        let at_edge = match direction {
            Navigation::Next => position + 1 == order.len(),
            Navigation::Prev => position == 0,
        };
        if !at_edge {
            return TrapStep::Native;
        }
        match direction {
            Navigation::Next => TrapStep::Move(first),
            Navigation::Prev => TrapStep::Move(last),
        }
    }
}

/// Tabbable candidates in sequential navigation order.
pub fn tab_order<K: Copy>(entries: &[FocusEntry<K>]) -> Vec<K> {
    let mut indices: Vec<usize> = entries
        .iter()
        .enumerate()
        .filter_map(|(i, e)| e.is_tabbable().then_some(i))
        .collect();
    // Stable: entries with equal keys keep document order.
    indices.sort_by(|&a, &b| compare_tab_index(entries[a].tab_index, entries[b].tab_index));
    indices.into_iter().map(|i| entries[i].id).collect()
}

/// First candidate in tab order, used for initial focus.
pub fn first_tabbable<K: Copy>(entries: &[FocusEntry<K>]) -> Option<K> {
    tab_order(entries).first().copied()
}

fn compare_tab_index(a: i32, b: i32) -> Ordering {
    match (a > 0, b > 0) {
        (true, true) => a.cmp(&b),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => Ordering::Equal,
    }
}
