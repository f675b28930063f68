// Copyright 2025 the Adwaita-web Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The dialog lifecycle controller.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::Cell;

use adwaita_dom::{
    Component, ComponentId, Document, Event, EventKind, Host, Key, ListenerId, ListenerTarget,
    MutationRecord, NodeId, ObserveOptions, ObserverId, Signal, Task, TaskId, TaskTag,
    parse_bool_attribute,
};
use adwaita_focus::{FocusTrap, Navigation, TrapStep};
use smallvec::SmallVec;

use crate::manager::{DialogEntry, SharedDialogManager};
use crate::native::NativeModal;
use crate::widgets::{ButtonSpec, create_button, has_accessible_name};

/// Close completion of the native modal.
const CLOSE_COMPLETE: TaskTag = TaskTag(1);
/// Post-render check of footer button names.
const VALIDATE_BUTTONS: TaskTag = TaskTag(2);

/// Attributes read from the host element.
pub const OBSERVED_ATTRIBUTES: [&str; 3] = ["title", "close-on-backdrop-click", "open"];

/// Dialog configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DialogConfig {
    /// Heading shown in the title region.
    pub title: String,
    /// Whether a click on the backdrop closes the dialog.
    pub close_on_backdrop_click: bool,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            close_on_backdrop_click: true,
        }
    }
}

/// Raised on Escape before the dialog closes.
///
/// Calling [`prevent_default`](Self::prevent_default) from an
/// [`on_cancel`](Dialog::on_cancel) handler keeps the dialog open.
#[derive(Debug, Default)]
pub struct CancelEvent {
    prevented: Cell<bool>,
}

impl CancelEvent {
    /// Keep the dialog open.
    pub fn prevent_default(&self) {
        self.prevented.set(true);
    }

    /// Whether a handler asked to keep the dialog open.
    pub fn is_default_prevented(&self) -> bool {
        self.prevented.get()
    }
}

/// Internal tree, built on first open.
#[derive(Debug)]
struct Parts {
    native: NativeModal,
    title: NodeId,
    footer: NodeId,
    buttons_slot: NodeId,
    observer: Option<ObserverId>,
}

/// A modal dialog rendered into the shadow tree of its host element.
///
/// Content is supplied by the host's children: those with `slot="content"` and
/// those without a slot land in the content region, `slot="buttons"` in the
/// footer. Without custom buttons the footer shows a default "Close" button.
///
/// [`Dialog::close`] only starts closing: the dialog stays open until the
/// native modal reports completion one task later, so `close` notifications
/// fire exactly once however the close was triggered.
#[derive(Debug)]
pub struct Dialog {
    id: ComponentId,
    element: NodeId,
    manager: SharedDialogManager,
    config: DialogConfig,
    is_open: bool,
    is_processing: bool,
    stale: bool,
    reopen_pending: bool,
    backdrop_policy_fixed: bool,
    previously_focused: Option<NodeId>,
    parts: Option<Parts>,
    default_button: Option<NodeId>,
    listeners: SmallVec<[ListenerId; 2]>,
    close_task: Option<TaskId>,
    on_open: Signal<()>,
    on_close: Signal<()>,
    on_cancel: Signal<CancelEvent>,
}

impl Dialog {
    /// A closed dialog rendering into `element`.
    pub fn new(id: ComponentId, element: NodeId, manager: SharedDialogManager) -> Self {
        Self::with_config(id, element, manager, DialogConfig::default())
    }

    /// A closed dialog with an explicit configuration. Attributes present on
    /// `element` at mount time take precedence.
    pub fn with_config(
        id: ComponentId,
        element: NodeId,
        manager: SharedDialogManager,
        config: DialogConfig,
    ) -> Self {
        Self {
            id,
            element,
            manager,
            config,
            is_open: false,
            is_processing: false,
            stale: false,
            reopen_pending: false,
            backdrop_policy_fixed: false,
            previously_focused: None,
            parts: None,
            default_button: None,
            listeners: SmallVec::new(),
            close_task: None,
            on_open: Signal::new(),
            on_close: Signal::new(),
            on_cancel: Signal::new(),
        }
    }

    /// Ignore the `close-on-backdrop-click` attribute, at mount and later.
    pub(crate) fn with_fixed_backdrop_policy(mut self) -> Self {
        self.backdrop_policy_fixed = true;
        self
    }

    /// Component identifier.
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// Current configuration.
    pub fn config(&self) -> &DialogConfig {
        &self.config
    }

    /// Whether the dialog is open. Stays `true` while a close is completing.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Whether an open or close is in flight.
    pub fn is_processing(&self) -> bool {
        self.is_processing
    }

    /// Whether this dialog is the topmost one of its manager.
    pub fn is_topmost(&self) -> bool {
        self.manager.borrow().is_topmost(self.id)
    }

    /// The native `<dialog>` element, once built.
    pub fn native_element(&self) -> Option<NodeId> {
        self.parts.as_ref().map(|p| p.native.node())
    }

    /// The title element, once built.
    pub fn title_element(&self) -> Option<NodeId> {
        self.parts.as_ref().map(|p| p.title)
    }

    /// The default dismiss button, present while no custom buttons are assigned.
    pub fn default_button(&self) -> Option<NodeId> {
        self.default_button
    }

    /// Emitted after the dialog opened.
    pub fn on_open(&self) -> &Signal<()> {
        &self.on_open
    }

    /// Emitted once the dialog finished closing.
    pub fn on_close(&self) -> &Signal<()> {
        &self.on_close
    }

    /// Emitted on Escape; handlers may prevent the close.
    pub fn on_cancel(&self) -> &Signal<CancelEvent> {
        &self.on_cancel
    }

    /// Change the title. An open dialog closes, rebuilds and reopens.
    pub fn set_title(&mut self, host: &mut Host, title: &str) {
        if self.config.title == title {
            return;
        }
        self.config.title = title.to_string();
        self.reconfigure(host);
    }

    /// Enable or disable closing by backdrop click.
    pub fn set_close_on_backdrop_click(&mut self, enabled: bool) {
        self.config.close_on_backdrop_click = enabled;
        self.manager
            .borrow_mut()
            .set_close_on_backdrop_click(self.id, enabled);
    }

    /// Open the dialog. Returns `false` if it is already open or mid-transition.
    pub fn open(&mut self, host: &mut Host) -> bool {
        if self.is_open || self.is_processing {
            return false;
        }
        self.is_processing = true;
        self.previously_focused = host.doc.active_element();
        if self.stale {
            self.teardown(host);
        }
        let Some(native) = self.build(host) else {
            self.is_processing = false;
            return false;
        };
        self.sync_default_button(host);
        if let Some(parts) = self.parts.as_mut() {
            parts.native.show_modal(&mut host.doc);
        }

        self.is_open = true;
        host.doc.toggle_attribute(self.element, "open", true);
        self.listeners.extend([
            host.listeners
                .add(self.id, ListenerTarget::Document, EventKind::KeyDown, false),
            host.listeners
                .add(self.id, ListenerTarget::Document, EventKind::Click, false),
        ]);
        self.manager.borrow_mut().register(
            &mut host.doc,
            DialogEntry {
                id: self.id,
                focus_root: native,
                close_on_backdrop_click: self.config.close_on_backdrop_click,
            },
        );
        self.is_processing = false;
        host.scheduler.queue_microtask(self.id, VALIDATE_BUTTONS);

        tracing::debug!(component = self.id.get(), "dialog opened");
        self.on_open.emit(&());
        true
    }

    /// Start closing. Returns `false` if the dialog is closed or already closing.
    ///
    /// The native modal hides at once; state, the `open` attribute, focus and
    /// the `close` notification follow on its completion.
    pub fn close(&mut self, host: &mut Host) -> bool {
        if !self.is_open || self.is_processing {
            return false;
        }
        self.is_processing = true;
        let task = self.parts.as_mut().and_then(|parts| {
            parts
                .native
                .close(&mut host.doc, &mut host.scheduler, self.id, CLOSE_COMPLETE)
        });
        match task {
            Some(task) => self.close_task = Some(task),
            None => self.finish_close(host),
        }
        true
    }

    /// Close synchronously, skipping the completion task.
    fn force_close(&mut self, host: &mut Host) {
        if !self.is_open {
            return;
        }
        if let Some(task) = self.close_task.take() {
            host.scheduler.cancel(task);
        }
        if let Some(parts) = self.parts.as_mut() {
            parts.native.force_close(&mut host.doc);
        }
        self.reopen_pending = false;
        self.finish_close(host);
    }

    fn finish_close(&mut self, host: &mut Host) {
        self.close_task = None;
        self.is_open = false;
        self.is_processing = false;
        for listener in self.listeners.drain(..) {
            host.listeners.remove(listener);
        }
        host.doc.toggle_attribute(self.element, "open", false);
        self.manager.borrow_mut().unregister(&mut host.doc, self.id);

        if let Some(previous) = self.previously_focused.take()
            && host.doc.is_focusable(previous)
        {
            host.doc.focus(previous);
        }
        tracing::debug!(component = self.id.get(), "dialog closed");
        self.on_close.emit(&());

        if core::mem::take(&mut self.reopen_pending) {
            self.open(host);
        }
    }

    fn reconfigure(&mut self, host: &mut Host) {
        self.stale = true;
        if self.is_open && !self.is_processing {
            tracing::debug!(component = self.id.get(), "reopening after reconfiguration");
            self.reopen_pending = true;
            self.close(host);
        }
    }

    /// Build the internal tree if needed and return the native element.
    fn build(&mut self, host: &mut Host) -> Option<NodeId> {
        if let Some(parts) = &self.parts {
            return Some(parts.native.node());
        }
        let doc = &mut host.doc;
        let Some(shadow) = doc.attach_shadow(self.element) else {
            tracing::warn!(component = self.id.get(), "dialog host cannot hold a shadow tree");
            return None;
        };
        let constructible = host.capabilities.constructible_stylesheets;
        host.styles.adopt(doc, shadow, "dialog", constructible);

        let native = doc.create_element("dialog");
        doc.add_class(native, "adw-dialog");
        doc.set_attribute(native, "aria-modal", "true");

        let header = doc.create_element("div");
        doc.add_class(header, "adw-dialog-header");
        let title = doc.create_element("h2");
        doc.add_class(title, "adw-dialog-title");
        let title_id = host.ids.next("dialog-title");
        doc.set_attribute(title, "id", &title_id);
        doc.set_text(title, &self.config.title);
        doc.set_attribute(native, "aria-labelledby", &title_id);
        doc.append_child(header, title);

        let content = doc.create_element("div");
        doc.add_class(content, "adw-dialog-content");
        let content_slot = doc.create_element("slot");
        doc.set_attribute(content_slot, "name", "content");
        let default_slot = doc.create_element("slot");
        doc.append_child(content, content_slot);
        doc.append_child(content, default_slot);

        let footer = doc.create_element("div");
        doc.add_class(footer, "adw-dialog-footer");
        let buttons_slot = doc.create_element("slot");
        doc.set_attribute(buttons_slot, "name", "buttons");
        doc.append_child(footer, buttons_slot);

        for part in [header, content, footer] {
            doc.append_child(native, part);
        }
        doc.append_child(shadow, native);

        let observer = host
            .capabilities
            .mutation_observer
            .then(|| doc.observe(self.id, self.element, ObserveOptions::child_list()));
        self.parts = Some(Parts {
            native: NativeModal::new(doc, native),
            title,
            footer,
            buttons_slot,
            observer,
        });
        self.stale = false;
        Some(native)
    }

    fn teardown(&mut self, host: &mut Host) {
        if let Some(parts) = self.parts.take() {
            if let Some(observer) = parts.observer {
                host.doc.disconnect(observer);
            }
            host.doc.destroy(parts.native.node());
        }
        self.default_button = None;
    }

    /// Show the default button iff no custom buttons are assigned.
    fn sync_default_button(&mut self, host: &mut Host) {
        let Some(parts) = &self.parts else {
            return;
        };
        let doc = &mut host.doc;
        let custom = !doc.assigned_nodes(parts.buttons_slot).is_empty();
        match (custom, self.default_button) {
            (false, None) => {
                let button = create_button(doc, &ButtonSpec::labeled("Close"));
                doc.add_class(button, "adw-dialog-default-button");
                doc.append_child(parts.footer, button);
                self.default_button = Some(button);
            }
            (true, Some(button)) => {
                doc.destroy(button);
                self.default_button = None;
            }
            _ => {}
        }
    }

    /// Footer buttons without an accessible name.
    pub fn unlabeled_buttons(&self, doc: &Document) -> Vec<NodeId> {
        let Some(parts) = &self.parts else {
            return Vec::new();
        };
        let mut buttons: Vec<NodeId> = self.default_button.into_iter().collect();
        for node in doc.assigned_nodes(parts.buttons_slot) {
            if doc.tag(node) == Some("button") {
                buttons.push(node);
            }
            buttons.extend(doc.query_selector_all(node, "button"));
        }
        buttons.retain(|&b| !has_accessible_name(doc, b));
        buttons
    }

    fn handle_key(&mut self, host: &mut Host, event: &mut Event) {
        if event.is_default_prevented() || !self.is_topmost() {
            return;
        }
        match event.key {
            Some(Key::Escape) => {
                event.prevent_default();
                let cancel = CancelEvent::default();
                self.on_cancel.emit(&cancel);
                if !cancel.is_default_prevented() {
                    self.close(host);
                }
            }
            Some(Key::Tab) => {
                let Some(native) = self.native_element() else {
                    return;
                };
                let entries = host.doc.focus_entries(native);
                let active = host.doc.active_element();
                let shift = event.tab_direction().unwrap_or(false);
                match FocusTrap::default().step(active, Navigation::from_shift(shift), &entries) {
                    TrapStep::Move(next) => {
                        event.prevent_default();
                        host.doc.focus(next);
                    }
                    TrapStep::Suppress => event.prevent_default(),
                    TrapStep::Native => {}
                }
            }
            _ => {}
        }
    }

    fn handle_click(&mut self, host: &mut Host, event: &Event) {
        let on_native = event.target.is_some() && event.target == self.native_element();
        let close = (on_native && self.config.close_on_backdrop_click)
            || self.manager.borrow().backdrop_click_target(event.target) == Some(self.id)
            || self.default_button.is_some_and(|b| event.path_contains(b));
        if close {
            self.close(host);
        }
    }
}

impl Component for Dialog {
    fn element(&self) -> NodeId {
        self.element
    }

    fn mount(&mut self, host: &mut Host) {
        let mut open = false;
        for name in OBSERVED_ATTRIBUTES {
            let Some(value) = host.doc.attribute(self.element, name).map(String::from) else {
                continue;
            };
            match name {
                "title" => self.config.title = value,
                "close-on-backdrop-click" if !self.backdrop_policy_fixed => {
                    self.config.close_on_backdrop_click = parse_bool_attribute(Some(&value), true);
                }
                "open" => open = parse_bool_attribute(Some(&value), false),
                _ => {}
            }
        }
        if open {
            self.open(host);
        }
    }

    fn unmount(&mut self, host: &mut Host) {
        self.force_close(host);
    }

    fn on_config_change(&mut self, host: &mut Host, name: &str, value: Option<&str>) {
        match name {
            "title" => self.set_title(host, value.unwrap_or_default()),
            "close-on-backdrop-click" if !self.backdrop_policy_fixed => {
                self.set_close_on_backdrop_click(parse_bool_attribute(value, true));
            }
            "open" => {
                if parse_bool_attribute(value, false) {
                    self.open(host);
                } else {
                    self.close(host);
                }
            }
            _ => {}
        }
    }

    fn handle_event(&mut self, host: &mut Host, event: &mut Event) {
        if !self.is_open || self.is_processing {
            return;
        }
        match event.kind {
            EventKind::KeyDown => self.handle_key(host, event),
            EventKind::Click => self.handle_click(host, event),
            _ => {}
        }
    }

    fn run_task(&mut self, host: &mut Host, task: Task) {
        if task.tag == CLOSE_COMPLETE && self.close_task == Some(task.id) {
            self.finish_close(host);
        } else if task.tag == VALIDATE_BUTTONS {
            for button in self.unlabeled_buttons(&host.doc) {
                tracing::warn!(
                    component = self.id.get(),
                    button = ?button,
                    "dialog button has no accessible name"
                );
            }
        }
    }

    fn on_mutations(&mut self, host: &mut Host, _records: &[MutationRecord]) {
        self.sync_default_button(host);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::DialogManager;
    use adwaita_dom::{Modifiers, Runtime};
    use alloc::rc::Rc;
    use kurbo::Size;

    struct Fixture {
        rt: Runtime,
        manager: SharedDialogManager,
        opener: NodeId,
    }

    struct Mounted {
        id: ComponentId,
        element: NodeId,
        opens: Rc<Cell<u32>>,
        closes: Rc<Cell<u32>>,
    }

    fn fixture() -> Fixture {
        let mut rt = Runtime::new(Size::new(800.0, 600.0));
        let doc = rt.doc_mut();
        let opener = doc.create_element("button");
        let body = doc.body();
        doc.append_child(body, opener);
        doc.focus(opener);
        Fixture {
            rt,
            manager: DialogManager::shared(),
            opener,
        }
    }

    impl Fixture {
        fn dialog(&mut self, title: &str) -> Mounted {
            let doc = self.rt.doc_mut();
            let element = doc.create_element("adw-dialog");
            doc.set_attribute(element, "title", title);
            let body = doc.body();
            doc.append_child(body, element);
            let manager = Rc::clone(&self.manager);
            let id = self.rt.add(|id, _| Dialog::new(id, element, manager));

            let opens = Rc::new(Cell::new(0));
            let closes = Rc::new(Cell::new(0));
            let (o, c) = (Rc::clone(&opens), Rc::clone(&closes));
            self.rt.with::<Dialog, _>(id, move |d, _| {
                d.on_open().connect(move |()| o.set(o.get() + 1));
                d.on_close().connect(move |()| c.set(c.get() + 1));
            });
            Mounted {
                id,
                element,
                opens,
                closes,
            }
        }

        fn slotted(&mut self, host: &Mounted, tag: &str, slot: &str) -> NodeId {
            let doc = self.rt.doc_mut();
            let node = doc.create_element(tag);
            doc.set_attribute(node, "slot", slot);
            doc.set_text(node, "Item");
            doc.append_child(host.element, node);
            node
        }

        fn open(&mut self, d: &Mounted) -> bool {
            self.rt
                .with::<Dialog, _>(d.id, |d, host| d.open(host))
                .unwrap_or(false)
        }

        fn close(&mut self, d: &Mounted) -> bool {
            self.rt
                .with::<Dialog, _>(d.id, |d, host| d.close(host))
                .unwrap_or(false)
        }

        fn get(&self, d: &Mounted) -> &Dialog {
            self.rt.get::<Dialog>(d.id).unwrap()
        }

        fn backdrop_visible(&self) -> bool {
            self.manager.borrow().is_backdrop_visible(self.rt.doc())
        }
    }

    #[test]
    fn open_then_close_is_symmetric() {
        let mut f = fixture();
        let d = f.dialog("Hello");
        assert!(f.open(&d));
        assert!(f.get(&d).is_open());
        assert!(f.rt.doc().has_attribute(d.element, "open"));
        assert!(f.backdrop_visible());
        assert_eq!(f.rt.doc().active_element(), f.get(&d).default_button());

        assert!(f.close(&d));
        assert!(!f.close(&d));
        // Completion arrives one task later.
        assert!(f.get(&d).is_open());
        assert_eq!(d.closes.get(), 0);

        f.rt.run_pending();
        assert!(!f.get(&d).is_open());
        assert!(!f.rt.doc().has_attribute(d.element, "open"));
        assert!(!f.backdrop_visible());
        assert_eq!(f.rt.doc().active_element(), Some(f.opener));
        assert_eq!((d.opens.get(), d.closes.get()), (1, 1));
        assert_eq!(f.rt.host().listeners.count_for(d.id), 0);
    }

    #[test]
    fn open_is_idempotent_and_blocked_while_closing() {
        let mut f = fixture();
        let d = f.dialog("Hello");
        assert!(f.open(&d));
        let listeners = f.rt.host().listeners.count_for(d.id);
        assert!(!f.open(&d));
        assert_eq!(f.rt.host().listeners.count_for(d.id), listeners);

        f.close(&d);
        assert!(!f.open(&d));
        f.rt.run_pending();
        assert!(f.open(&d));
        assert_eq!(d.opens.get(), 2);
    }

    #[test]
    fn builds_labelled_structure() {
        let mut f = fixture();
        let d = f.dialog("Settings");
        f.open(&d);
        let dialog = f.get(&d);
        let doc = f.rt.doc();
        let native = dialog.native_element().unwrap();
        let title = dialog.title_element().unwrap();
        assert_eq!(doc.tag(native), Some("dialog"));
        assert_eq!(doc.attribute(native, "aria-modal"), Some("true"));
        assert_eq!(doc.text(title), Some("Settings"));
        assert_eq!(doc.attribute(native, "aria-labelledby"), doc.attribute(title, "id"));
        assert!(doc.has_attribute(native, "open"));
    }

    #[test]
    fn escape_raises_a_preventable_cancel() {
        let mut f = fixture();
        let d = f.dialog("Hello");
        f.open(&d);
        let handler = f
            .rt
            .with::<Dialog, _>(d.id, |d, _| d.on_cancel().connect(CancelEvent::prevent_default))
            .unwrap();
        let event = f.rt.key_down(Key::Escape, Modifiers::empty());
        assert!(event.is_default_prevented());
        f.rt.run_pending();
        assert!(f.get(&d).is_open());

        f.rt.with::<Dialog, _>(d.id, |d, _| d.on_cancel().disconnect(handler));
        f.rt.key_down(Key::Escape, Modifiers::empty());
        f.rt.run_pending();
        assert!(!f.get(&d).is_open());
        assert_eq!(d.closes.get(), 1);
    }

    #[test]
    fn click_on_the_native_backdrop_closes_unless_disabled() {
        let mut f = fixture();
        let d = f.dialog("Hello");
        f.rt.set_attribute(d.element, "close-on-backdrop-click", Some("false"));
        f.open(&d);
        let native = f.get(&d).native_element().unwrap();
        f.rt.click(native);
        f.rt.run_pending();
        assert!(f.get(&d).is_open());

        f.rt.set_attribute(d.element, "close-on-backdrop-click", None);
        f.rt.click(native);
        f.rt.run_pending();
        assert!(!f.get(&d).is_open());
    }

    #[test]
    fn shared_backdrop_closes_only_the_topmost_dialog() {
        let mut f = fixture();
        let a = f.dialog("A");
        let b = f.dialog("B");
        f.open(&a);
        f.open(&b);
        let backdrop = f.manager.borrow().backdrop().unwrap();

        f.rt.click(backdrop);
        f.rt.run_pending();
        assert!(f.get(&a).is_open());
        assert!(!f.get(&b).is_open());
        assert!(f.backdrop_visible());
        assert_eq!(f.rt.doc().active_element(), f.get(&a).default_button());

        f.rt.click(backdrop);
        f.rt.run_pending();
        assert!(!f.get(&a).is_open());
        assert!(!f.backdrop_visible());
    }

    #[test]
    fn escape_closes_nested_dialogs_one_at_a_time() {
        let mut f = fixture();
        let a = f.dialog("A");
        let b = f.dialog("B");
        f.open(&a);
        f.open(&b);
        f.rt.key_down(Key::Escape, Modifiers::empty());
        f.rt.run_pending();
        assert!(f.get(&a).is_open());
        assert!(!f.get(&b).is_open());

        f.rt.key_down(Key::Escape, Modifiers::empty());
        f.rt.run_pending();
        assert!(!f.get(&a).is_open());
        assert_eq!(f.rt.doc().active_element(), Some(f.opener));
    }

    #[test]
    fn default_button_follows_custom_buttons() {
        let mut f = fixture();
        let d = f.dialog("Hello");
        f.open(&d);
        let default = f.get(&d).default_button().unwrap();

        let custom = f.slotted(&d, "button", "buttons");
        f.rt.run_pending();
        assert_eq!(f.get(&d).default_button(), None);
        assert!(!f.rt.doc().is_alive(default));

        f.rt.doc_mut().destroy(custom);
        f.rt.run_pending();
        let restored = f.get(&d).default_button().unwrap();
        f.rt.click(restored);
        f.rt.run_pending();
        assert!(!f.get(&d).is_open());
    }

    #[test]
    fn title_change_while_open_reopens() {
        let mut f = fixture();
        let d = f.dialog("First");
        f.open(&d);
        let old_title = f.get(&d).title_element().unwrap();

        f.rt.set_attribute(d.element, "title", Some("Second"));
        f.rt.run_pending();
        let dialog = f.get(&d);
        assert!(dialog.is_open());
        assert_eq!((d.opens.get(), d.closes.get()), (2, 1));
        let title = dialog.title_element().unwrap();
        assert_ne!(title, old_title);
        assert_eq!(f.rt.doc().text(title), Some("Second"));
        assert!(!f.rt.doc().is_alive(old_title));
    }

    #[test]
    fn title_change_while_closed_rebuilds_on_open() {
        let mut f = fixture();
        let d = f.dialog("First");
        f.open(&d);
        f.close(&d);
        f.rt.run_pending();
        f.rt.set_attribute(d.element, "title", Some("Second"));
        assert_eq!(d.opens.get(), 1);
        f.open(&d);
        let title = f.get(&d).title_element().unwrap();
        assert_eq!(f.rt.doc().text(title), Some("Second"));
    }

    #[test]
    fn tab_wraps_through_slotted_content() {
        let mut f = fixture();
        let d = f.dialog("Hello");
        let first = f.slotted(&d, "button", "content");
        let second = f.slotted(&d, "button", "content");
        f.open(&d);
        assert_eq!(f.rt.doc().active_element(), Some(first));
        let close = f.get(&d).default_button().unwrap();

        f.rt.key_down(Key::Tab, Modifiers::empty());
        assert_eq!(f.rt.doc().active_element(), Some(second));
        f.rt.key_down(Key::Tab, Modifiers::empty());
        assert_eq!(f.rt.doc().active_element(), Some(close));
        f.rt.key_down(Key::Tab, Modifiers::empty());
        assert_eq!(f.rt.doc().active_element(), Some(first));
        f.rt.key_down(Key::Tab, Modifiers::SHIFT);
        assert_eq!(f.rt.doc().active_element(), Some(close));
    }

    #[test]
    fn open_attribute_drives_the_dialog() {
        let mut f = fixture();
        let d = f.dialog("Hello");
        f.rt.set_attribute(d.element, "open", Some(""));
        assert!(f.get(&d).is_open());
        f.rt.set_attribute(d.element, "open", None);
        f.rt.run_pending();
        assert!(!f.get(&d).is_open());
        assert_eq!((d.opens.get(), d.closes.get()), (1, 1));
    }

    #[test]
    fn removing_an_open_dialog_unregisters_it() {
        let mut f = fixture();
        let d = f.dialog("Hello");
        f.open(&d);
        assert!(f.rt.remove(d.id));
        assert!(f.manager.borrow().is_empty());
        assert!(!f.backdrop_visible());
        assert_eq!(d.closes.get(), 1);
    }

    #[test]
    fn reports_buttons_without_names() {
        let mut f = fixture();
        let d = f.dialog("Hello");
        let doc = f.rt.doc_mut();
        let bare = doc.create_element("button");
        doc.set_attribute(bare, "slot", "buttons");
        doc.append_child(d.element, bare);
        f.slotted(&d, "button", "buttons");
        f.open(&d);
        assert_eq!(f.get(&d).unlabeled_buttons(f.rt.doc()), [bare]);
    }
}
