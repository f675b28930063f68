// Copyright 2025 the Adwaita-web Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Alert dialogs: a heading, a message and a row of responses.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use adwaita_dom::{
    Component, ComponentId, Event, EventKind, Host, Key, MutationRecord, NodeId, Signal, Task,
};

use crate::dialog::{Dialog, DialogConfig};
use crate::manager::SharedDialogManager;
use crate::widgets::{ButtonAppearance, ButtonSpec, create_button};

/// Visual style of a response button.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ResponseAppearance {
    /// Regular button.
    #[default]
    Default,
    /// The recommended response.
    Suggested,
    /// A response with irreversible consequences.
    Destructive,
}

impl From<ResponseAppearance> for ButtonAppearance {
    fn from(appearance: ResponseAppearance) -> Self {
        match appearance {
            ResponseAppearance::Default => Self::Default,
            ResponseAppearance::Suggested => Self::Suggested,
            ResponseAppearance::Destructive => Self::Destructive,
        }
    }
}

/// One possible answer to an alert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    /// Identifier reported through [`AlertDialog::on_response`].
    pub id: String,
    /// Button label.
    pub label: String,
    /// Button style.
    pub appearance: ResponseAppearance,
}

impl Response {
    /// A default-styled response.
    pub fn new(id: &str, label: &str) -> Self {
        Self {
            id: String::from(id),
            label: String::from(label),
            appearance: ResponseAppearance::Default,
        }
    }

    /// The same response with another appearance.
    pub fn with_appearance(mut self, appearance: ResponseAppearance) -> Self {
        self.appearance = appearance;
        self
    }
}

/// Alert configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlertConfig {
    /// Dialog title.
    pub heading: String,
    /// Message shown under the heading.
    pub body: String,
    /// Responses, in display order.
    pub responses: Vec<Response>,
    /// Response activated by Enter.
    pub default_response: Option<String>,
    /// Response reported when the alert is dismissed without choosing.
    pub close_response: String,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            heading: String::new(),
            body: String::new(),
            responses: Vec::new(),
            default_response: None,
            close_response: String::from("close"),
        }
    }
}

#[derive(Debug, Default)]
struct Pending {
    response: Option<String>,
    close_response: String,
}

/// A message with a set of responses, built on [`Dialog`].
///
/// Responses are rendered as `slot="buttons"` children of the host element.
/// Choosing one closes the alert; once it has closed, `response` fires with the
/// chosen id (or the close response for Escape and programmatic closes),
/// followed by `close`. Backdrop clicks never dismiss an alert.
#[derive(Debug)]
pub struct AlertDialog {
    inner: Dialog,
    config: AlertConfig,
    body: Option<NodeId>,
    buttons: Vec<(String, NodeId)>,
    pending: Rc<RefCell<Pending>>,
    on_response: Signal<String>,
    on_close: Signal<()>,
}

impl AlertDialog {
    /// A closed alert rendering into `element`.
    pub fn new(
        id: ComponentId,
        element: NodeId,
        manager: SharedDialogManager,
        config: AlertConfig,
    ) -> Self {
        let inner = Dialog::with_config(
            id,
            element,
            manager,
            DialogConfig {
                title: config.heading.clone(),
                close_on_backdrop_click: false,
            },
        )
        .with_fixed_backdrop_policy();
        let pending = Rc::new(RefCell::new(Pending {
            response: None,
            close_response: config.close_response.clone(),
        }));
        let on_response = Signal::new();
        let on_close = Signal::new();
        {
            let (pending, on_response, on_close) =
                (Rc::clone(&pending), on_response.clone(), on_close.clone());
            inner.on_close().connect(move |()| {
                let response = {
                    let mut pending = pending.borrow_mut();
                    let fallback = pending.close_response.clone();
                    pending.response.take().unwrap_or(fallback)
                };
                on_response.emit(&response);
                on_close.emit(&());
            });
        }
        Self {
            inner,
            config,
            body: None,
            buttons: Vec::new(),
            pending,
            on_response,
            on_close,
        }
    }

    /// The wrapped dialog.
    pub fn dialog(&self) -> &Dialog {
        &self.inner
    }

    /// Current configuration.
    pub fn config(&self) -> &AlertConfig {
        &self.config
    }

    /// Whether the alert is open.
    pub fn is_open(&self) -> bool {
        self.inner.is_open()
    }

    /// Emitted with the chosen response id, right before `close`.
    pub fn on_response(&self) -> &Signal<String> {
        &self.on_response
    }

    /// Emitted once the alert finished closing.
    pub fn on_close(&self) -> &Signal<()> {
        &self.on_close
    }

    /// Emitted when the inner dialog opened.
    pub fn on_open(&self) -> &Signal<()> {
        self.inner.on_open()
    }

    /// Button of a response.
    pub fn response_button(&self, id: &str) -> Option<NodeId> {
        self.buttons
            .iter()
            .find(|(response, _)| response == id)
            .map(|(_, node)| *node)
    }

    /// Open the alert.
    pub fn open(&mut self, host: &mut Host) -> bool {
        self.pending.borrow_mut().response = None;
        self.inner.open(host)
    }

    /// Dismiss the alert, reporting the close response.
    pub fn close(&mut self, host: &mut Host) -> bool {
        self.inner.close(host)
    }

    /// Close the alert reporting `id`.
    pub fn respond(&mut self, host: &mut Host, id: &str) -> bool {
        if !self.inner.is_open() || self.inner.is_processing() {
            return false;
        }
        self.pending.borrow_mut().response = Some(String::from(id));
        self.inner.close(host)
    }

    /// Change the heading.
    pub fn set_heading(&mut self, host: &mut Host, heading: &str) {
        self.config.heading = String::from(heading);
        self.inner.set_title(host, heading);
    }

    /// Change the message.
    pub fn set_body(&mut self, host: &mut Host, body: &str) {
        self.config.body = String::from(body);
        if let Some(node) = self.body {
            host.doc.set_text(node, body);
        }
    }

    /// Append a response button.
    pub fn add_response(&mut self, host: &mut Host, response: Response) {
        self.render_response(host, &response);
        self.config.responses.push(response);
    }

    /// Change the response activated by Enter.
    pub fn set_default_response(&mut self, host: &mut Host, id: Option<&str>) {
        self.config.default_response = id.map(String::from);
        for (response, button) in &self.buttons {
            let is_default = Some(response.as_str()) == id;
            host.doc.toggle_class(*button, "default", is_default);
        }
    }

    /// Change the response reported on dismissal.
    pub fn set_close_response(&mut self, id: &str) {
        self.config.close_response = String::from(id);
        self.pending.borrow_mut().close_response = String::from(id);
    }

    fn render_response(&mut self, host: &mut Host, response: &Response) {
        let doc = &mut host.doc;
        let button = create_button(
            doc,
            &ButtonSpec {
                label: &response.label,
                appearance: response.appearance.into(),
                ..ButtonSpec::default()
            },
        );
        doc.set_attribute(button, "slot", "buttons");
        doc.set_attribute(button, "data-response-id", &response.id);
        let is_default = self.config.default_response.as_deref() == Some(response.id.as_str());
        doc.toggle_class(button, "default", is_default);
        doc.append_child(self.inner.element(), button);
        self.buttons.push((response.id.clone(), button));
    }

    fn clicked_response(&self, event: &Event) -> Option<String> {
        self.buttons
            .iter()
            .find(|(_, button)| event.path_contains(*button))
            .map(|(id, _)| id.clone())
    }
}

impl Component for AlertDialog {
    fn element(&self) -> NodeId {
        self.inner.element()
    }

    fn mount(&mut self, host: &mut Host) {
        let doc = &mut host.doc;
        doc.add_class(self.inner.element(), "adw-alert-dialog");
        let body = doc.create_element("p");
        doc.add_class(body, "adw-alert-body");
        doc.set_attribute(body, "slot", "content");
        doc.set_text(body, &self.config.body);
        doc.append_child(self.inner.element(), body);
        self.body = Some(body);

        let responses = core::mem::take(&mut self.config.responses);
        for response in &responses {
            self.render_response(host, response);
        }
        self.config.responses = responses;
        self.inner.mount(host);
        self.config.heading.clone_from(&self.inner.config().title);
    }

    fn unmount(&mut self, host: &mut Host) {
        self.inner.unmount(host);
    }

    fn on_config_change(&mut self, host: &mut Host, name: &str, value: Option<&str>) {
        match name {
            "title" => self.set_heading(host, value.unwrap_or_default()),
            _ => self.inner.on_config_change(host, name, value),
        }
    }

    fn handle_event(&mut self, host: &mut Host, event: &mut Event) {
        let was_closing = self.inner.is_processing();
        self.inner.handle_event(host, event);
        if was_closing || !self.inner.is_open() || self.inner.is_processing() {
            return;
        }
        match event.kind {
            EventKind::Click => {
                if let Some(id) = self.clicked_response(event) {
                    self.respond(host, &id);
                }
            }
            EventKind::KeyDown if event.key == Some(Key::Enter) && self.inner.is_topmost() => {
                if let Some(id) = self.config.default_response.clone() {
                    event.prevent_default();
                    self.respond(host, &id);
                }
            }
            _ => {}
        }
    }

    fn run_task(&mut self, host: &mut Host, task: Task) {
        self.inner.run_task(host, task);
    }

    fn on_mutations(&mut self, host: &mut Host, records: &[MutationRecord]) {
        self.inner.on_mutations(host, records);
    }
}
