// Copyright 2025 the Adwaita-web Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deferred work: microtasks, timers and animation frames.
//!
//! The scheduler only queues; the [`Runtime`](crate::Runtime) decides when to
//! run things. Microtasks drain after every runtime operation, timers run when
//! the host calls [`Runtime::run_pending`](crate::Runtime::run_pending) or
//! advances the clock, and frame callbacks run on
//! [`Runtime::advance_frame`](crate::Runtime::advance_frame). Work deferred with
//! a zero-delay timer therefore never runs inside the operation that queued it.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::component::ComponentId;

/// Identifier of a queued task.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

/// Component-defined discriminator telling a component which of its tasks is due.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TaskTag(pub u32);

/// A due task, handed to [`Component::run_task`](crate::Component::run_task).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Task {
    /// Task identifier.
    pub id: TaskId,
    /// Component that scheduled it.
    pub owner: ComponentId,
    /// What it is for.
    pub tag: TaskTag,
}

/// Task queues and a millisecond clock.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    now: u64,
    next: u64,
    microtasks: VecDeque<Task>,
    /// `(due, task)` in scheduling order.
    timers: Vec<(u64, Task)>,
    frames: Vec<Task>,
}

impl Scheduler {
    fn task(&mut self, owner: ComponentId, tag: TaskTag) -> Task {
        self.next += 1;
        Task {
            id: TaskId(self.next),
            owner,
            tag,
        }
    }

    /// Current time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Queue a microtask, run before the current runtime operation returns.
    pub fn queue_microtask(&mut self, owner: ComponentId, tag: TaskTag) -> TaskId {
        let task = self.task(owner, tag);
        self.microtasks.push_back(task);
        task.id
    }

    /// Schedule a timer `delay_ms` from now.
    pub fn set_timeout(&mut self, owner: ComponentId, tag: TaskTag, delay_ms: u64) -> TaskId {
        let task = self.task(owner, tag);
        self.timers.push((self.now.saturating_add(delay_ms), task));
        task.id
    }

    /// Schedule a callback for the next animation frame.
    pub fn request_frame(&mut self, owner: ComponentId, tag: TaskTag) -> TaskId {
        let task = self.task(owner, tag);
        self.frames.push(task);
        task.id
    }

    /// Cancel a queued task. Returns `false` if it already ran or never existed.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.pending();
        self.microtasks.retain(|t| t.id != id);
        self.timers.retain(|(_, t)| t.id != id);
        self.frames.retain(|t| t.id != id);
        self.pending() != before
    }

    /// Cancel everything `owner` queued.
    pub fn cancel_owner(&mut self, owner: ComponentId) {
        self.microtasks.retain(|t| t.owner != owner);
        self.timers.retain(|(_, t)| t.owner != owner);
        self.frames.retain(|t| t.owner != owner);
    }

    /// Whether the task is still queued.
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.microtasks.iter().any(|t| t.id == id)
            || self.timers.iter().any(|(_, t)| t.id == id)
            || self.frames.iter().any(|t| t.id == id)
    }

    /// Number of queued tasks of every kind.
    pub fn pending(&self) -> usize {
        self.microtasks.len() + self.timers.len() + self.frames.len()
    }

    /// Due time of the earliest timer.
    pub fn next_timer_due(&self) -> Option<u64> {
        self.timers.iter().map(|(due, _)| *due).min()
    }

    pub(crate) fn pop_microtask(&mut self) -> Option<Task> {
        self.microtasks.pop_front()
    }

    /// Earliest timer due by now; ties run in scheduling order.
    pub(crate) fn pop_due_timer(&mut self) -> Option<Task> {
        let (index, _) = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, (due, _))| *due <= self.now)
            .min_by_key(|(_, (due, task))| (*due, task.id))?;
        Some(self.timers.remove(index).1)
    }

    pub(crate) fn take_frames(&mut self) -> Vec<Task> {
        core::mem::take(&mut self.frames)
    }

    pub(crate) fn set_now(&mut self, now: u64) {
        self.now = self.now.max(now);
    }
}
