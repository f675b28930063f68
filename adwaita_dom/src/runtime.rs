// Copyright 2025 the Adwaita-web Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The runtime: owns the [`Host`] and its components, routes input and runs
//! deferred work.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::vec;
use alloc::vec::Vec;
use core::any::Any;

use adwaita_focus::{Navigation, tab_order};
use kurbo::{Point, Size};

use crate::component::{Component, ComponentId};
use crate::event::{Event, EventKind, Key, Modifiers};
use crate::host::{Capabilities, Host};
use crate::observer::MutationRecord;
use crate::press::{PressResult, PressState};
use crate::scheduler::Task;
use crate::tree::Document;
use crate::types::NodeId;

/// Upper bound on delivery rounds in one checkpoint.
const MAX_CHECKPOINT_ROUNDS: usize = 1024;

/// Drives components against a [`Host`].
///
/// Every public operation ends with a microtask checkpoint: queued mutation
/// records are delivered and microtasks run until both queues are empty.
/// Timers only run from [`Runtime::run_pending`] and [`Runtime::advance`].
pub struct Runtime {
    host: Host,
    components: BTreeMap<ComponentId, Box<dyn Component>>,
    next_id: u64,
    press: PressState<NodeId>,
}

impl core::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Runtime")
            .field("host", &self.host)
            .field("components", &self.components.len())
            .field("press", &self.press)
            .finish()
    }
}

impl Runtime {
    /// A runtime over an empty document with every capability.
    pub fn new(viewport: Size) -> Self {
        Self::with_host(Host::new(viewport))
    }

    /// A runtime over an empty document with the given capabilities.
    pub fn with_capabilities(viewport: Size, capabilities: Capabilities) -> Self {
        Self::with_host(Host::with_capabilities(viewport, capabilities))
    }

    /// A runtime over an existing host.
    pub fn with_host(host: Host) -> Self {
        Self {
            host,
            components: BTreeMap::new(),
            next_id: 0,
            press: PressState::new(),
        }
    }

    /// Shared environment.
    pub fn host(&self) -> &Host {
        &self.host
    }

    /// Shared environment, mutably. Changes made here are observed at the next
    /// runtime operation.
    pub fn host_mut(&mut self) -> &mut Host {
        &mut self.host
    }

    /// The document.
    pub fn doc(&self) -> &Document {
        &self.host.doc
    }

    /// The document, mutably.
    pub fn doc_mut(&mut self) -> &mut Document {
        &mut self.host.doc
    }

    // --- components ---

    /// Build, register and mount a component.
    pub fn add<C: Component>(
        &mut self,
        build: impl FnOnce(ComponentId, &mut Host) -> C,
    ) -> ComponentId {
        self.next_id += 1;
        let id = ComponentId::new(self.next_id);
        let mut component = build(id, &mut self.host);
        component.mount(&mut self.host);
        self.components.insert(id, Box::new(component));
        tracing::trace!(component = id.get(), "mounted");
        self.flush();
        id
    }

    /// Unmount and drop a component, releasing its listeners, tasks and observers.
    pub fn remove(&mut self, id: ComponentId) -> bool {
        let Some(mut component) = self.components.remove(&id) else {
            return false;
        };
        component.unmount(&mut self.host);
        self.host.listeners.remove_owner(id);
        self.host.scheduler.cancel_owner(id);
        self.host.doc.disconnect_owner(id);
        tracing::trace!(component = id.get(), "unmounted");
        self.flush();
        true
    }

    /// Whether the component is registered.
    pub fn contains(&self, id: ComponentId) -> bool {
        self.components.contains_key(&id)
    }

    /// Borrow a component as its concrete type.
    pub fn get<C: Component>(&self, id: ComponentId) -> Option<&C> {
        let component: &dyn Component = &**self.components.get(&id)?;
        let component: &dyn Any = component;
        component.downcast_ref::<C>()
    }

    /// Run `f` against a component and the host, then checkpoint.
    pub fn with<C: Component, R>(
        &mut self,
        id: ComponentId,
        f: impl FnOnce(&mut C, &mut Host) -> R,
    ) -> Option<R> {
        let component: &mut dyn Component = &mut **self.components.get_mut(&id)?;
        let component: &mut dyn Any = component;
        let component = component.downcast_mut::<C>()?;
        let result = f(component, &mut self.host);
        self.flush();
        Some(result)
    }

    /// Set (`Some`) or remove (`None`) an attribute and notify every component
    /// rendered into `element`.
    pub fn set_attribute(&mut self, element: NodeId, name: &str, value: Option<&str>) {
        match value {
            Some(v) => self.host.doc.set_attribute(element, name, v),
            None => self.host.doc.remove_attribute(element, name),
        };
        let owners: Vec<ComponentId> = self
            .components
            .iter()
            .filter(|(_, c)| c.element() == element)
            .map(|(id, _)| *id)
            .collect();
        for id in owners {
            if let Some(c) = self.components.get_mut(&id) {
                c.on_config_change(&mut self.host, name, value);
            }
        }
        self.flush();
    }

    // --- input ---

    /// Route an event through its composed path and return it for inspection.
    pub fn dispatch(&mut self, mut event: Event) -> Event {
        if let Some(target) = event.target {
            event.path = self.host.doc.composed_path(target);
        }
        for delivery in self.host.listeners.route(&event) {
            if event.is_propagation_stopped() {
                break;
            }
            // Earlier listeners may have removed this one.
            if !self.host.listeners.contains(delivery.listener) {
                continue;
            }
            event.current_target = delivery.target;
            if let Some(c) = self.components.get_mut(&delivery.owner) {
                c.handle_event(&mut self.host, &mut event);
            }
        }
        self.flush();
        event
    }

    /// Primary button pressed over `target`.
    pub fn pointer_down(&mut self, target: NodeId, position: Point) -> Event {
        self.press.on_down(None, 0, target);
        self.dispatch(Event::pointer(EventKind::PointerDown, target, position, 0))
    }

    /// Primary button released over `target`; synthesizes a click when the press
    /// started on the same element.
    pub fn pointer_up(&mut self, target: NodeId, position: Point) -> Event {
        let event = self.dispatch(Event::pointer(EventKind::PointerUp, target, position, 0));
        if let PressResult::Click(clicked) = self.press.on_up(None, 0, &target)
            && self.host.doc.is_alive(clicked)
        {
            self.dispatch(Event::pointer(EventKind::Click, clicked, position, 0));
        }
        event
    }

    /// Press and release over the center of `target`.
    pub fn click(&mut self, target: NodeId) {
        let position = self
            .host
            .doc
            .layout_rect(target)
            .map(|r| r.center())
            .unwrap_or(Point::ZERO);
        self.pointer_down(target, position);
        self.pointer_up(target, position);
    }

    /// Key pressed on the focused element (or `<body>`).
    ///
    /// An unprevented Tab moves focus through the document's tab order.
    pub fn key_down(&mut self, key: Key, modifiers: Modifiers) -> Event {
        let target = self
            .host
            .doc
            .active_element()
            .unwrap_or(self.host.doc.body());
        let event = self.dispatch(Event::key_down(Some(target), key, modifiers));
        if key == Key::Tab && !event.is_default_prevented() {
            self.navigate(Navigation::from_shift(modifiers.contains(Modifiers::SHIFT)));
        }
        event
    }

    fn navigate(&mut self, direction: Navigation) {
        let doc = &mut self.host.doc;
        let order = tab_order(&doc.focus_entries(doc.root()));
        if order.is_empty() {
            return;
        }
        let len = order.len();
        let position = doc
            .active_element()
            .and_then(|a| order.iter().position(|&k| k == a));
        let next = match (position, direction) {
            (None, Navigation::Next) => order[0],
            (None, Navigation::Prev) => order[len - 1],
            (Some(i), Navigation::Next) => order[(i + 1) % len],
            (Some(i), Navigation::Prev) => order[(i + len - 1) % len],
        };
        doc.focus(next);
    }

    /// Change the viewport size and notify window resize listeners.
    pub fn resize(&mut self, viewport: Size) {
        self.host.doc.set_viewport(viewport);
        self.dispatch(Event::new(EventKind::Resize, None));
    }

    /// Scroll the document (`None`) or an element.
    pub fn scroll(&mut self, target: Option<NodeId>) {
        self.dispatch(Event::new(EventKind::Scroll, target));
    }

    // --- deferred work ---

    fn run_task(&mut self, task: Task) {
        if let Some(c) = self.components.get_mut(&task.owner) {
            c.run_task(&mut self.host, task);
        }
    }

    fn deliver(&mut self, records: Vec<(ComponentId, MutationRecord)>) {
        let mut batches: Vec<(ComponentId, Vec<MutationRecord>)> = Vec::new();
        for (owner, record) in records {
            match batches.iter_mut().find(|(o, _)| *o == owner) {
                Some((_, batch)) => batch.push(record),
                None => batches.push((owner, vec![record])),
            }
        }
        for (owner, batch) in batches {
            if let Some(c) = self.components.get_mut(&owner) {
                c.on_mutations(&mut self.host, &batch);
            }
        }
    }

    /// Deliver mutation records and drain microtasks.
    fn flush(&mut self) {
        for _ in 0..MAX_CHECKPOINT_ROUNDS {
            let records = self.host.doc.take_mutations();
            if !records.is_empty() {
                self.deliver(records);
                continue;
            }
            match self.host.scheduler.pop_microtask() {
                Some(task) => self.run_task(task),
                None => return,
            }
        }
        tracing::warn!("microtask checkpoint did not settle");
    }

    /// Run every timer that is due at the current time, including timers
    /// those timers schedule with a zero delay.
    pub fn run_pending(&mut self) {
        self.flush();
        while let Some(task) = self.host.scheduler.pop_due_timer() {
            self.run_task(task);
            self.flush();
        }
    }

    /// Advance the clock by `ms`, running timers as they come due.
    pub fn advance(&mut self, ms: u64) {
        let until = self.host.scheduler.now().saturating_add(ms);
        loop {
            self.run_pending();
            match self.host.scheduler.next_timer_due() {
                Some(due) if due <= until => self.host.scheduler.set_now(due),
                _ => break,
            }
        }
        self.host.scheduler.set_now(until);
        self.run_pending();
    }

    /// Run the callbacks requested for the next animation frame.
    pub fn advance_frame(&mut self) {
        for task in self.host.scheduler.take_frames() {
            self.run_task(task);
            self.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listeners::ListenerTarget;
    use crate::observer::ObserveOptions;
    use crate::scheduler::TaskTag;
    use alloc::string::String;

    #[derive(Debug, Default)]
    struct Recorder {
        element: Option<NodeId>,
        log: Vec<String>,
    }

    impl Recorder {
        fn push(&mut self, entry: &str) {
            self.log.push(String::from(entry));
        }
    }

    impl Component for Recorder {
        fn element(&self) -> NodeId {
            self.element.unwrap_or(NodeId::new(0, 0))
        }

        fn on_config_change(&mut self, _host: &mut Host, name: &str, value: Option<&str>) {
            self.push(name);
            if value.is_none() {
                self.push("removed");
            }
        }

        fn handle_event(&mut self, _host: &mut Host, event: &mut Event) {
            match event.kind {
                EventKind::Click => self.push("click"),
                EventKind::PointerDown => self.push("down"),
                EventKind::KeyDown => {
                    self.push("key");
                    event.prevent_default();
                }
                _ => self.push("other"),
            }
        }

        fn run_task(&mut self, _host: &mut Host, task: Task) {
            self.push(match task.tag {
                TaskTag(1) => "micro",
                TaskTag(3) => "frame",
                _ => "timer",
            });
        }

        fn on_mutations(&mut self, _host: &mut Host, records: &[MutationRecord]) {
            for _ in records {
                self.push("mutation");
            }
        }
    }

    fn setup() -> (Runtime, ComponentId, NodeId) {
        let mut rt = Runtime::new(Size::new(800.0, 600.0));
        let el = rt.doc_mut().create_element("button");
        let body = rt.doc().body();
        rt.doc_mut().append_child(body, el);
        let id = rt.add(|_, _| Recorder {
            element: Some(el),
            ..Recorder::default()
        });
        (rt, id, el)
    }

    fn log(rt: &Runtime, id: ComponentId) -> Vec<String> {
        rt.get::<Recorder>(id).map(|p| p.log.clone()).unwrap_or_default()
    }

    #[test]
    fn clicks_require_same_target() {
        let (mut rt, id, el) = setup();
        rt.host_mut()
            .listeners
            .add(id, ListenerTarget::Document, EventKind::Click, false);
        let body = rt.doc().body();

        rt.pointer_down(el, Point::ZERO);
        rt.pointer_up(body, Point::ZERO);
        assert!(log(&rt, id).is_empty());

        rt.click(el);
        assert_eq!(log(&rt, id), ["click"]);
    }

    #[test]
    fn timers_wait_for_run_pending_and_microtasks_do_not() {
        let (mut rt, id, _) = setup();
        rt.with::<Recorder, _>(id, |_, host| {
            host.scheduler.set_timeout(id, TaskTag(2), 0);
            host.scheduler.queue_microtask(id, TaskTag(1));
        });
        assert_eq!(log(&rt, id), ["micro"]);
        rt.run_pending();
        assert_eq!(log(&rt, id), ["micro", "timer"]);
    }

    #[test]
    fn advance_runs_due_timers_only() {
        let (mut rt, id, _) = setup();
        rt.with::<Recorder, _>(id, |_, host| {
            host.scheduler.set_timeout(id, TaskTag(2), 100);
        });
        rt.advance(99);
        assert!(log(&rt, id).is_empty());
        rt.advance(1);
        assert_eq!(log(&rt, id), ["timer"]);
        assert_eq!(rt.host().scheduler.now(), 100);
    }

    #[test]
    fn frames_wait_for_advance_frame() {
        let (mut rt, id, _) = setup();
        rt.with::<Recorder, _>(id, |_, host| {
            host.scheduler.request_frame(id, TaskTag(3));
        });
        rt.run_pending();
        assert!(log(&rt, id).is_empty());
        rt.advance_frame();
        assert_eq!(log(&rt, id), ["frame"]);
        rt.advance_frame();
        assert_eq!(log(&rt, id), ["frame"]);
    }

    #[test]
    fn config_changes_and_mutations_reach_the_owner() {
        let (mut rt, id, el) = setup();
        rt.with::<Recorder, _>(id, |_, host| {
            host.doc.observe(id, el, ObserveOptions::attributes(&["class"]));
        });
        rt.set_attribute(el, "placement", Some("top"));
        rt.set_attribute(el, "placement", None);
        rt.doc_mut().add_class(el, "flat");
        rt.run_pending();
        assert_eq!(log(&rt, id), ["placement", "placement", "removed", "mutation"]);
    }

    #[test]
    fn prevented_tab_keeps_focus() {
        let (mut rt, id, el) = setup();
        let other = rt.doc_mut().create_element("button");
        let body = rt.doc().body();
        rt.doc_mut().append_child(body, other);
        rt.doc_mut().focus(el);

        rt.key_down(Key::Tab, Modifiers::empty());
        assert_eq!(rt.doc().active_element(), Some(other));

        rt.host_mut()
            .listeners
            .add(id, ListenerTarget::Document, EventKind::KeyDown, true);
        rt.key_down(Key::Tab, Modifiers::empty());
        assert_eq!(rt.doc().active_element(), Some(other));
        assert_eq!(log(&rt, id), ["key"]);
    }

    #[test]
    fn remove_releases_everything() {
        let (mut rt, id, el) = setup();
        rt.with::<Recorder, _>(id, |_, host| {
            host.listeners.add(id, ListenerTarget::Window, EventKind::Resize, false);
            host.scheduler.set_timeout(id, TaskTag(2), 0);
            host.doc.observe(id, el, ObserveOptions::size());
        });
        assert!(rt.remove(id));
        assert!(!rt.remove(id));
        assert!(rt.host().listeners.is_empty());
        assert_eq!(rt.host().scheduler.pending(), 0);
        assert_eq!(rt.doc().observer_count(), 0);
    }
}
