// Copyright 2025 the Adwaita-web Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The popover controller.

use alloc::format;
use alloc::string::{String, ToString};

use adwaita_dom::{
    Component, ComponentId, Event, EventKind, Host, Key, ListenerId, ListenerTarget,
    MutationRecord, NodeId, ObserveOptions, ObserverId, Signal, Task, TaskId, TaskTag,
    parse_bool_attribute,
};
use adwaita_focus::{FocusTrap, Navigation, TrapStep, first_tabbable};
use adwaita_placement::{Placement, Position, Side, arrow_offset, compute_position};
use smallvec::SmallVec;

use crate::config::{OBSERVED_ATTRIBUTES, PopoverConfig, TargetRef};

/// Arms the pointer-down light-dismiss listener one task after `show()`.
const ARM_DISMISS: TaskTag = TaskTag(1);
/// Observer-driven reposition, coalesced into the next animation frame.
const REPOSITION: TaskTag = TaskTag(2);

const SIDE_CLASSES: [&str; 4] = [
    "placement-top",
    "placement-bottom",
    "placement-left",
    "placement-right",
];

/// Lifecycle state. `Opening` and `Closing` never outlive a single call.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PopoverState {
    /// Hidden, no listeners held.
    #[default]
    Closed,
    /// Inside `show()`.
    Opening,
    /// Attached, positioned and listening.
    Open,
    /// Inside `hide()`.
    Closing,
}

/// Result of [`Popover::show`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShowOutcome {
    /// The popover opened.
    Opened,
    /// Already open (or mid-transition); nothing changed.
    Ignored,
    /// The target could not be resolved; the popover stays closed and a
    /// warning was logged. Retrying later is fine.
    TargetUnresolved,
}

/// A floating surface anchored to a target element.
///
/// The surface is the component's [`element`](Component::element). While open it
/// lives under `<body>`, carries the `open` attribute and class, and is positioned
/// with inline `top`/`left` styles computed by [`compute_position`] from the
/// host-supplied layout rectangles.
#[derive(Debug)]
pub struct Popover {
    id: ComponentId,
    element: NodeId,
    config: PopoverConfig,
    state: PopoverState,
    target: Option<NodeId>,
    arrow: Option<NodeId>,
    position: Option<Position>,
    listeners: SmallVec<[ListenerId; 4]>,
    arm_task: Option<TaskId>,
    frame_task: Option<TaskId>,
    observers: SmallVec<[ObserverId; 3]>,
    on_open: Signal<()>,
    on_close: Signal<()>,
}

impl Popover {
    /// A closed popover rendering into `element` with the default configuration.
    pub fn new(id: ComponentId, element: NodeId) -> Self {
        Self::with_config(id, element, PopoverConfig::default())
    }

    /// A closed popover with an explicit configuration. Attributes present on
    /// `element` at mount time take precedence.
    pub fn with_config(id: ComponentId, element: NodeId, config: PopoverConfig) -> Self {
        Self {
            id,
            element,
            config,
            state: PopoverState::Closed,
            target: None,
            arrow: None,
            position: None,
            listeners: SmallVec::new(),
            arm_task: None,
            frame_task: None,
            observers: SmallVec::new(),
            on_open: Signal::new(),
            on_close: Signal::new(),
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &PopoverConfig {
        &self.config
    }

    /// Lifecycle state.
    pub fn state(&self) -> PopoverState {
        self.state
    }

    /// Whether the popover is open.
    pub fn is_open(&self) -> bool {
        self.state == PopoverState::Open
    }

    /// Target resolved by the last `show()`.
    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    /// Last applied position.
    pub fn position(&self) -> Option<Position> {
        self.position
    }

    /// The arrow element, when enabled.
    pub fn arrow(&self) -> Option<NodeId> {
        self.arrow
    }

    /// Emitted after the popover opened.
    pub fn on_open(&self) -> &Signal<()> {
        &self.on_open
    }

    /// Emitted after the popover closed.
    pub fn on_close(&self) -> &Signal<()> {
        &self.on_close
    }

    /// Replace the target. An open popover re-opens against the new target.
    pub fn set_target(&mut self, host: &mut Host, target: Option<TargetRef>) {
        self.config.target = target;
        self.target = None;
        self.reopen(host);
    }

    /// Replace the preferred placement and reflow.
    pub fn set_placement(&mut self, host: &mut Host, placement: Placement) {
        self.config.placement = placement;
        self.update_position(host);
    }

    /// Enable or disable the arrow.
    pub fn set_show_arrow(&mut self, host: &mut Host, show: bool) {
        self.config.show_arrow = show;
        self.sync_arrow(host);
        self.update_position(host);
    }

    /// Enable or disable light dismiss.
    pub fn set_light_dismiss(&mut self, light_dismiss: bool) {
        self.config.light_dismiss = light_dismiss;
    }

    /// Enable or disable the focus trap.
    pub fn set_trap_focus(&mut self, trap_focus: bool) {
        self.config.trap_focus = trap_focus;
    }

    fn resolve_target(&mut self, host: &Host) -> Option<NodeId> {
        if let Some(cached) = self.target
            && host.doc.is_connected(cached)
        {
            return Some(cached);
        }
        self.target = self.config.target.as_ref()?.resolve(&host.doc);
        self.target
    }

    /// Open the popover.
    ///
    /// No-op when already open. The surface is moved under `<body>` before it is
    /// positioned; the pointer-down light-dismiss listener is only armed by a
    /// zero-delay timer, so the press that opened the popover cannot close it.
    pub fn show(&mut self, host: &mut Host) -> ShowOutcome {
        if self.state != PopoverState::Closed {
            return ShowOutcome::Ignored;
        }
        let Some(target) = self.resolve_target(host) else {
            tracing::warn!(
                target_ref = ?self.config.target,
                "popover target not found; staying closed"
            );
            return ShowOutcome::TargetUnresolved;
        };
        self.state = PopoverState::Opening;

        let doc = &mut host.doc;
        let body = doc.body();
        if doc.parent_of(self.element) != Some(body) {
            doc.append_child(body, self.element);
        }
        doc.toggle_attribute(self.element, "open", true);
        doc.add_class(self.element, "open");
        doc.set_style(self.element, "display", "block");
        self.sync_arrow(host);

        self.state = PopoverState::Open;
        self.update_position(host);
        self.attach_listeners(host, target);

        if self.config.trap_focus
            && let Some(first) = first_tabbable(&host.doc.focus_entries(self.element))
        {
            host.doc.focus(first);
        }
        tracing::debug!(component = self.id.get(), "popover opened");
        self.on_open.emit(&());
        ShowOutcome::Opened
    }

    /// Close the popover. Returns `false` if it was not open.
    ///
    /// Focus returns to the target when it is still connected and focusable.
    pub fn hide(&mut self, host: &mut Host) -> bool {
        if self.state != PopoverState::Open {
            return false;
        }
        self.state = PopoverState::Closing;
        self.detach_listeners(host);

        let doc = &mut host.doc;
        doc.toggle_attribute(self.element, "open", false);
        doc.remove_class(self.element, "open");
        doc.set_style(self.element, "display", "none");
        if let Some(target) = self.target
            && doc.is_focusable(target)
        {
            doc.focus(target);
        }

        self.state = PopoverState::Closed;
        tracing::debug!(component = self.id.get(), "popover closed");
        self.on_close.emit(&());
        true
    }

    /// Open when closed, close when open.
    pub fn toggle(&mut self, host: &mut Host) {
        if self.is_open() {
            self.hide(host);
        } else {
            self.show(host);
        }
    }

    /// `show()` on behalf of the `open` attribute, which must not outlive a
    /// failed open.
    fn show_from_attribute(&mut self, host: &mut Host) {
        self.show(host);
        if !self.is_open() {
            host.doc.toggle_attribute(self.element, "open", false);
        }
    }

    fn reopen(&mut self, host: &mut Host) {
        if self.is_open() {
            self.hide(host);
            self.show(host);
        }
    }

    /// Recompute and apply the position. Returns `None` while closed or when the
    /// target went away.
    pub fn update_position(&mut self, host: &mut Host) -> Option<Position> {
        if self.state != PopoverState::Open {
            return None;
        }
        let doc = &mut host.doc;
        let target = self.target.filter(|t| doc.is_connected(*t))?;
        let target_rect = doc.layout_rect(target)?;
        let surface = doc.layout_rect(self.element)?.size();
        let position = compute_position(target_rect, surface, self.config.placement, doc.viewport());

        doc.set_style(self.element, "position", "fixed");
        doc.set_style(self.element, "top", &format!("{}px", position.origin.y));
        doc.set_style(self.element, "left", &format!("{}px", position.origin.x));
        doc.set_layout_rect(self.element, position.rect(surface));
        doc.set_attribute(self.element, "data-placement", &position.placement.to_string());
        for class in SIDE_CLASSES {
            doc.remove_class(self.element, class);
        }
        let side_class = format!("placement-{}", position.placement.side.as_str());
        doc.add_class(self.element, &side_class);

        if let Some(arrow) = self.arrow {
            let arrow_at = arrow_offset(position.placement, target_rect, position.origin, surface);
            let (axis, other) = match arrow_at.edge {
                Side::Top | Side::Bottom => ("left", "top"),
                Side::Left | Side::Right => ("top", "left"),
            };
            doc.remove_style(arrow, other);
            doc.set_style(arrow, axis, &format!("{}px", arrow_at.offset));
            doc.set_attribute(arrow, "data-edge", arrow_at.edge.as_str());
        }

        tracing::trace!(
            x = position.origin.x,
            y = position.origin.y,
            flipped = position.flipped,
            "popover positioned"
        );
        self.position = Some(position);
        Some(position)
    }

    fn sync_arrow(&mut self, host: &mut Host) {
        let doc = &mut host.doc;
        match (self.config.show_arrow, self.arrow) {
            (true, None) => {
                let arrow = doc.create_element("div");
                doc.add_class(arrow, "popover-arrow");
                doc.set_attribute(arrow, "aria-hidden", "true");
                doc.append_child(self.element, arrow);
                self.arrow = Some(arrow);
            }
            (false, Some(arrow)) => {
                doc.destroy(arrow);
                self.arrow = None;
            }
            _ => {}
        }
        doc.toggle_class(self.element, "has-arrow", self.arrow.is_some());
    }

    fn attach_listeners(&mut self, host: &mut Host, target: NodeId) {
        let listeners = &mut host.listeners;
        self.listeners.extend([
            listeners.add(self.id, ListenerTarget::Document, EventKind::KeyDown, false),
            listeners.add(self.id, ListenerTarget::Window, EventKind::Resize, false),
            listeners.add(self.id, ListenerTarget::Document, EventKind::Scroll, true),
        ]);
        self.arm_task = Some(host.scheduler.set_timeout(self.id, ARM_DISMISS, 0));

        let doc = &mut host.doc;
        if host.capabilities.mutation_observer {
            self.observers.push(doc.observe(
                self.id,
                target,
                ObserveOptions::attributes(&["class", "style"]),
            ));
        }
        if host.capabilities.resize_observer {
            self.observers.push(doc.observe(self.id, target, ObserveOptions::size()));
            self.observers.push(doc.observe(self.id, self.element, ObserveOptions::size()));
        }
    }

    fn detach_listeners(&mut self, host: &mut Host) {
        for listener in self.listeners.drain(..) {
            host.listeners.remove(listener);
        }
        for task in [self.arm_task.take(), self.frame_task.take()]
            .into_iter()
            .flatten()
        {
            host.scheduler.cancel(task);
        }
        for observer in self.observers.drain(..) {
            host.doc.disconnect(observer);
        }
    }

    fn handle_tab(&mut self, host: &mut Host, event: &mut Event, shift: bool) {
        let entries = host.doc.focus_entries(self.element);
        let active = host.doc.active_element();
        match FocusTrap::default().step(active, Navigation::from_shift(shift), &entries) {
            TrapStep::Move(next) => {
                event.prevent_default();
                host.doc.focus(next);
            }
            TrapStep::Suppress => event.prevent_default(),
            TrapStep::Native => {}
        }
    }

    fn is_outside(&self, event: &Event) -> bool {
        !event.path_contains(self.element) && !self.target.is_some_and(|t| event.path_contains(t))
    }
}

impl Component for Popover {
    fn element(&self) -> NodeId {
        self.element
    }

    fn mount(&mut self, host: &mut Host) {
        let doc = &mut host.doc;
        let root = doc.root();
        let constructible = host.capabilities.constructible_stylesheets;
        host.styles.adopt(doc, root, "popover", constructible);

        doc.add_class(self.element, "popover");
        doc.set_attribute(self.element, "role", "dialog");
        doc.set_style(self.element, "display", "none");
        let mut open = false;
        for name in OBSERVED_ATTRIBUTES {
            let Some(value) = doc.attribute(self.element, name).map(String::from) else {
                continue;
            };
            if name == "open" {
                open = parse_bool_attribute(Some(&value), false);
            } else {
                self.config.apply_attribute(name, Some(&value));
            }
        }
        if open {
            self.show_from_attribute(host);
        }
    }

    fn unmount(&mut self, host: &mut Host) {
        self.hide(host);
    }

    fn on_config_change(&mut self, host: &mut Host, name: &str, value: Option<&str>) {
        match name {
            "open" => {
                if parse_bool_attribute(value, false) {
                    self.show_from_attribute(host);
                } else {
                    self.hide(host);
                }
            }
            "target" => {
                self.config.apply_attribute(name, value);
                self.target = None;
                self.reopen(host);
            }
            "arrow" => {
                self.config.apply_attribute(name, value);
                if self.is_open() {
                    self.sync_arrow(host);
                }
                self.update_position(host);
            }
            _ => {
                if self.config.apply_attribute(name, value) {
                    self.update_position(host);
                }
            }
        }
    }

    fn handle_event(&mut self, host: &mut Host, event: &mut Event) {
        if !self.is_open() {
            return;
        }
        match event.kind {
            EventKind::PointerDown => {
                if self.config.light_dismiss && self.is_outside(event) {
                    self.hide(host);
                }
            }
            EventKind::KeyDown => match event.key {
                Some(Key::Escape) => {
                    event.prevent_default();
                    self.hide(host);
                }
                Some(Key::Tab) if self.config.trap_focus => {
                    let shift = event.tab_direction().unwrap_or(false);
                    self.handle_tab(host, event, shift);
                }
                _ => {}
            },
            EventKind::Resize | EventKind::Scroll => {
                self.update_position(host);
            }
            EventKind::PointerUp | EventKind::Click => {}
        }
    }

    fn run_task(&mut self, host: &mut Host, task: Task) {
        if task.tag == ARM_DISMISS && self.arm_task == Some(task.id) {
            self.arm_task = None;
            let listener =
                host.listeners
                    .add(self.id, ListenerTarget::Document, EventKind::PointerDown, false);
            self.listeners.push(listener);
        } else if task.tag == REPOSITION && self.frame_task == Some(task.id) {
            self.frame_task = None;
            self.update_position(host);
        }
    }

    fn on_mutations(&mut self, host: &mut Host, _records: &[MutationRecord]) {
        if self.is_open() && self.frame_task.is_none() {
            self.frame_task = Some(host.scheduler.request_frame(self.id, REPOSITION));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adwaita_dom::{Capabilities, Modifiers, Runtime};
    use alloc::rc::Rc;
    use core::cell::Cell;
    use kurbo::{Point, Rect, Size};

    struct Fixture {
        rt: Runtime,
        popover: ComponentId,
        surface: NodeId,
        anchor: NodeId,
        wrapper: NodeId,
        first: NodeId,
        second: NodeId,
        outside: NodeId,
        opens: Rc<Cell<u32>>,
        closes: Rc<Cell<u32>>,
    }

    fn fixture_with(capabilities: Capabilities, anchor_rect: Rect) -> Fixture {
        let mut rt = Runtime::with_capabilities(Size::new(800.0, 600.0), capabilities);
        let doc = rt.doc_mut();
        let body = doc.body();

        let anchor = doc.create_element("button");
        doc.set_attribute(anchor, "id", "anchor");
        doc.append_child(body, anchor);
        doc.set_layout_rect(anchor, anchor_rect);

        let outside = doc.create_element("div");
        doc.append_child(body, outside);

        // The surface starts nested inside another container.
        let wrapper = doc.create_element("section");
        doc.append_child(body, wrapper);
        let surface = doc.create_element("div");
        doc.append_child(wrapper, surface);
        doc.set_layout_rect(surface, Rect::new(0.0, 0.0, 200.0, 200.0));
        let first = doc.create_element("button");
        let second = doc.create_element("button");
        doc.append_child(surface, first);
        doc.append_child(surface, second);

        let config = PopoverConfig {
            target: Some(TargetRef::Selector(String::from("#anchor"))),
            ..PopoverConfig::default()
        };
        let popover = rt.add(|id, _| Popover::with_config(id, surface, config));

        let opens = Rc::new(Cell::new(0));
        let closes = Rc::new(Cell::new(0));
        {
            let (opens, closes) = (Rc::clone(&opens), Rc::clone(&closes));
            rt.with::<Popover, _>(popover, move |p, _| {
                p.on_open().connect(move |()| opens.set(opens.get() + 1));
                p.on_close().connect(move |()| closes.set(closes.get() + 1));
            });
        }
        Fixture {
            rt,
            popover,
            surface,
            anchor,
            wrapper,
            first,
            second,
            outside,
            opens,
            closes,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(Capabilities::default(), Rect::new(100.0, 100.0, 200.0, 120.0))
    }

    impl Fixture {
        fn show(&mut self) -> ShowOutcome {
            self.rt
                .with::<Popover, _>(self.popover, |p, host| p.show(host))
                .unwrap_or(ShowOutcome::Ignored)
        }

        fn hide(&mut self) -> bool {
            self.rt
                .with::<Popover, _>(self.popover, |p, host| p.hide(host))
                .unwrap_or(false)
        }

        fn popover(&self) -> &Popover {
            self.rt.get::<Popover>(self.popover).unwrap()
        }
    }

    #[test]
    fn show_and_hide_are_idempotent() {
        let mut f = fixture();
        assert_eq!(f.show(), ShowOutcome::Opened);
        let listeners = f.rt.host().listeners.count_for(f.popover);
        assert_eq!(f.show(), ShowOutcome::Ignored);
        assert_eq!(f.rt.host().listeners.count_for(f.popover), listeners);
        assert_eq!(f.opens.get(), 1);

        assert!(f.hide());
        assert!(!f.hide());
        assert_eq!(f.closes.get(), 1);
        assert_eq!(f.rt.host().listeners.count_for(f.popover), 0);
        assert_eq!(f.rt.doc().observer_count(), 0);
    }

    #[test]
    fn show_reparents_reflects_and_positions() {
        let mut f = fixture();
        f.show();
        let doc = f.rt.doc();
        assert_eq!(doc.parent_of(f.surface), Some(doc.body()));
        assert!(doc.has_attribute(f.surface, "open"));
        assert!(doc.has_class(f.surface, "open"));
        assert_eq!(doc.style(f.surface, "display"), Some("block"));
        assert_eq!(doc.style(f.surface, "top"), Some("128px"));
        assert_eq!(doc.style(f.surface, "left"), Some("50px"));
        assert_eq!(doc.attribute(f.surface, "data-placement"), Some("bottom"));
        assert!(doc.has_class(f.surface, "placement-bottom"));

        let arrow = f.popover().arrow().unwrap();
        assert_eq!(doc.attribute(arrow, "data-edge"), Some("top"));
        assert_eq!(doc.style(arrow, "left"), Some("100px"));

        f.hide();
        let doc = f.rt.doc();
        assert!(!doc.has_attribute(f.surface, "open"));
        assert_eq!(doc.style(f.surface, "display"), Some("none"));
    }

    #[test]
    fn flips_to_top_near_the_bottom_edge() {
        let mut f = fixture_with(
            Capabilities::default(),
            Rect::new(100.0, 580.0, 200.0, 600.0),
        );
        f.show();
        let position = f.popover().position().unwrap();
        assert_eq!(position.placement, Placement::TOP);
        assert!(position.origin.y <= 580.0 - 200.0 - 8.0);
        assert_eq!(f.rt.doc().attribute(f.surface, "data-placement"), Some("top"));
        assert!(f.rt.doc().has_class(f.surface, "placement-top"));
        assert!(!f.rt.doc().has_class(f.surface, "placement-bottom"));
    }

    #[test]
    fn light_dismiss_waits_one_task() {
        let mut f = fixture();
        f.show();
        // Same task as show(): the opening press must not dismiss.
        f.rt.pointer_down(f.outside, Point::ZERO);
        assert!(f.popover().is_open());

        f.rt.run_pending();
        f.rt.pointer_down(f.first, Point::ZERO);
        f.rt.pointer_down(f.anchor, Point::ZERO);
        assert!(f.popover().is_open());

        f.rt.pointer_down(f.outside, Point::ZERO);
        assert!(!f.popover().is_open());
        assert_eq!(f.closes.get(), 1);
    }

    #[test]
    fn light_dismiss_can_be_disabled_but_escape_still_closes() {
        let mut f = fixture();
        f.rt.set_attribute(f.surface, "light-dismiss", Some("false"));
        f.show();
        f.rt.run_pending();
        f.rt.pointer_down(f.outside, Point::ZERO);
        assert!(f.popover().is_open());

        let event = f.rt.key_down(Key::Escape, Modifiers::empty());
        assert!(event.is_default_prevented());
        assert!(!f.popover().is_open());
    }

    #[test]
    fn hide_restores_focus_to_target() {
        let mut f = fixture();
        f.rt.doc_mut().focus(f.anchor);
        f.show();
        assert_eq!(f.rt.doc().active_element(), Some(f.first));
        f.hide();
        assert_eq!(f.rt.doc().active_element(), Some(f.anchor));
    }

    #[test]
    fn tab_wraps_inside_the_surface() {
        let mut f = fixture();
        f.show();
        f.rt.doc_mut().focus(f.second);
        f.rt.key_down(Key::Tab, Modifiers::empty());
        assert_eq!(f.rt.doc().active_element(), Some(f.first));

        f.rt.key_down(Key::Tab, Modifiers::SHIFT);
        assert_eq!(f.rt.doc().active_element(), Some(f.second));

        // In the middle of the order the host navigates natively.
        f.rt.key_down(Key::Tab, Modifiers::SHIFT);
        assert_eq!(f.rt.doc().active_element(), Some(f.first));
    }

    #[test]
    fn tab_is_suppressed_without_focusable_content() {
        let mut f = fixture();
        f.rt.doc_mut().destroy(f.first);
        f.rt.doc_mut().destroy(f.second);
        f.rt.doc_mut().focus(f.anchor);
        f.show();
        let event = f.rt.key_down(Key::Tab, Modifiers::empty());
        assert!(event.is_default_prevented());
        assert_eq!(f.rt.doc().active_element(), Some(f.anchor));
    }

    #[test]
    fn missing_target_aborts_and_can_retry() {
        let mut f = fixture();
        f.rt.with::<Popover, _>(f.popover, |p, host| {
            p.set_target(host, Some(TargetRef::Selector(String::from("#later"))));
        });
        assert_eq!(f.show(), ShowOutcome::TargetUnresolved);
        assert_eq!(f.popover().state(), PopoverState::Closed);
        assert_eq!(f.rt.host().listeners.count_for(f.popover), 0);
        assert_eq!(f.opens.get(), 0);

        let later = f.rt.doc_mut().create_element("button");
        f.rt.doc_mut().set_attribute(later, "id", "later");
        let body = f.rt.doc().body();
        f.rt.doc_mut().append_child(body, later);
        f.rt.doc_mut().set_layout_rect(later, Rect::new(10.0, 10.0, 50.0, 30.0));
        assert_eq!(f.show(), ShowOutcome::Opened);
        assert_eq!(f.popover().target(), Some(later));
    }

    #[test]
    fn open_attribute_is_dropped_when_the_target_is_missing() {
        let mut f = fixture();
        f.rt.set_attribute(f.surface, "target", Some("#nope"));
        f.rt.set_attribute(f.surface, "open", Some(""));
        assert!(!f.popover().is_open());
        assert!(!f.rt.doc().has_attribute(f.surface, "open"));
        assert_eq!(f.opens.get(), 0);
    }

    #[test]
    fn open_attribute_at_mount_is_dropped_when_the_target_is_missing() {
        let mut rt = Runtime::new(Size::new(800.0, 600.0));
        let doc = rt.doc_mut();
        let surface = doc.create_element("div");
        doc.set_attribute(surface, "target", "#nope");
        doc.set_attribute(surface, "open", "");
        let body = doc.body();
        doc.append_child(body, surface);
        let popover = rt.add(|id, _| Popover::new(id, surface));
        assert!(!rt.get::<Popover>(popover).unwrap().is_open());
        assert!(!rt.doc().has_attribute(surface, "open"));
    }

    #[test]
    fn target_mutation_repositions() {
        let mut f = fixture();
        f.show();
        f.rt.doc_mut()
            .set_layout_rect(f.anchor, Rect::new(300.0, 100.0, 400.0, 120.0));
        f.rt.doc_mut().add_class(f.anchor, "moved");
        f.rt.doc_mut().set_style(f.anchor, "margin-left", "200px");
        f.rt.run_pending();
        // Both records wait for a single frame.
        assert_eq!(f.popover().position().unwrap().origin, Point::new(50.0, 128.0));
        assert_eq!(f.rt.host().scheduler.pending(), 1);

        f.rt.advance_frame();
        assert_eq!(f.popover().position().unwrap().origin, Point::new(250.0, 128.0));
        assert_eq!(f.rt.host().scheduler.pending(), 0);
    }

    #[test]
    fn hide_cancels_a_pending_reposition() {
        let mut f = fixture();
        f.show();
        f.rt.run_pending();
        f.rt.doc_mut().add_class(f.anchor, "moved");
        f.rt.run_pending();
        assert_eq!(f.rt.host().scheduler.pending(), 1);
        f.hide();
        assert_eq!(f.rt.host().scheduler.pending(), 0);
        f.rt.advance_frame();
        assert_eq!(f.popover().position().unwrap().origin, Point::new(50.0, 128.0));
    }

    #[test]
    fn window_resize_reflows() {
        let mut f = fixture_with(Capabilities::none(), Rect::new(100.0, 100.0, 200.0, 120.0));
        f.show();
        f.rt.doc_mut()
            .set_layout_rect(f.anchor, Rect::new(300.0, 100.0, 400.0, 120.0));
        assert_eq!(f.popover().position().unwrap().origin, Point::new(50.0, 128.0));

        f.rt.resize(Size::new(1024.0, 768.0));
        assert_eq!(f.popover().position().unwrap().origin, Point::new(250.0, 128.0));
        assert_eq!(f.rt.doc().style(f.surface, "left"), Some("250px"));
    }

    #[test]
    fn scrolling_an_ancestor_reflows() {
        let mut f = fixture_with(Capabilities::none(), Rect::new(100.0, 100.0, 200.0, 120.0));
        f.show();
        f.rt.doc_mut()
            .set_layout_rect(f.anchor, Rect::new(100.0, 300.0, 200.0, 320.0));
        f.rt.scroll(Some(f.wrapper));
        assert_eq!(f.popover().position().unwrap().origin, Point::new(50.0, 328.0));
        assert_eq!(f.rt.doc().style(f.surface, "top"), Some("328px"));
    }

    #[test]
    fn missing_observers_degrade_to_manual_updates() {
        let mut f = fixture_with(Capabilities::none(), Rect::new(100.0, 100.0, 200.0, 120.0));
        f.show();
        f.rt.doc_mut()
            .set_layout_rect(f.anchor, Rect::new(300.0, 100.0, 400.0, 120.0));
        f.rt.doc_mut().add_class(f.anchor, "moved");
        f.rt.run_pending();
        assert_eq!(f.popover().position().unwrap().origin, Point::new(50.0, 128.0));

        // Scroll and resize still reflow.
        f.rt.scroll(None);
        assert_eq!(f.popover().position().unwrap().origin, Point::new(250.0, 128.0));
        assert!(f.hide());
    }

    #[test]
    fn attributes_drive_the_popover() {
        let mut f = fixture();
        f.rt.set_attribute(f.surface, "placement", Some("right-start"));
        f.rt.set_attribute(f.surface, "open", Some(""));
        assert!(f.popover().is_open());
        assert_eq!(f.popover().position().unwrap().placement, Placement::RIGHT_START);

        f.rt.set_attribute(f.surface, "arrow", Some("false"));
        assert_eq!(f.popover().arrow(), None);
        assert!(!f.rt.doc().has_class(f.surface, "has-arrow"));

        f.rt.set_attribute(f.surface, "open", None);
        assert!(!f.popover().is_open());
        assert_eq!(f.opens.get(), 1);
        assert_eq!(f.closes.get(), 1);
    }

    #[test]
    fn removing_an_open_popover_releases_listeners() {
        let mut f = fixture();
        f.show();
        f.rt.run_pending();
        assert!(f.rt.remove(f.popover));
        assert!(f.rt.host().listeners.is_empty());
        assert_eq!(f.closes.get(), 1);
    }
}
