// Copyright 2025 the Adwaita-web Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The component contract between widgets and the [`Runtime`](crate::Runtime).

use core::any::Any;

use crate::event::Event;
use crate::host::Host;
use crate::observer::MutationRecord;
use crate::scheduler::Task;
use crate::types::NodeId;

/// Identifier of a component registered with a [`Runtime`](crate::Runtime).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(u64);

impl ComponentId {
    /// Wrap a raw identifier. Identifiers handed out by the runtime are never reused.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw identifier.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A widget driven by the runtime.
///
/// Every method except [`Component::element`] has an empty default so widgets
/// only implement the hooks they care about. Hooks receive the shared
/// [`Host`] and must not assume any other component is reachable from it.
pub trait Component: Any {
    /// The host element this component renders into.
    fn element(&self) -> NodeId;

    /// Called once after the component is added.
    fn mount(&mut self, _host: &mut Host) {}

    /// Called once before the component is dropped. Listeners and tasks owned
    /// by the component are released by the runtime afterwards.
    fn unmount(&mut self, _host: &mut Host) {}

    /// An attribute on [`Component::element`] was set (`Some`) or removed (`None`)
    /// through [`Runtime::set_attribute`](crate::Runtime::set_attribute).
    fn on_config_change(&mut self, _host: &mut Host, _name: &str, _value: Option<&str>) {}

    /// A listener registered by this component matched `event`.
    fn handle_event(&mut self, _host: &mut Host, _event: &mut Event) {}

    /// A task scheduled by this component is due.
    fn run_task(&mut self, _host: &mut Host, _task: Task) {}

    /// Observation records for this component, in the order they were queued.
    fn on_mutations(&mut self, _host: &mut Host, _records: &[MutationRecord]) {}
}

/// Interpret a boolean configuration attribute.
///
/// A missing attribute yields `default`; any present value other than
/// `"false"` (including the empty string) is `true`.
pub fn parse_bool_attribute(value: Option<&str>, default: bool) -> bool {
    match value {
        None => default,
        Some(v) => v != "false",
    }
}
