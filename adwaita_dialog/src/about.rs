// Copyright 2025 the Adwaita-web Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! About dialogs: application name, credits and legal information.

use alloc::string::String;

use adwaita_dom::{Component, ComponentId, Document, Event, Host, MutationRecord, NodeId, Signal, Task};

use crate::dialog::{Dialog, DialogConfig};
use crate::manager::SharedDialogManager;
use crate::widgets::create_icon;

/// What an [`AboutDialog`] shows. Empty fields are left out.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AboutInfo {
    /// Application name, also used as the dialog title.
    pub application_name: String,
    /// Symbolic icon name of the application.
    pub application_icon: String,
    /// Version string.
    pub version: String,
    /// Person or organization behind the application.
    pub developer_name: String,
    /// Short description.
    pub comments: String,
    /// Homepage URL.
    pub website: String,
    /// Copyright line.
    pub copyright: String,
    /// License name or text.
    pub license: String,
}

/// Application information in a [`Dialog`].
#[derive(Debug)]
pub struct AboutDialog {
    inner: Dialog,
    info: AboutInfo,
    content: Option<NodeId>,
    on_close: Signal<()>,
}

impl AboutDialog {
    /// A closed about dialog rendering into `element`.
    pub fn new(id: ComponentId, element: NodeId, manager: SharedDialogManager, info: AboutInfo) -> Self {
        let inner = Dialog::with_config(
            id,
            element,
            manager,
            DialogConfig {
                title: info.application_name.clone(),
                ..DialogConfig::default()
            },
        );
        let on_close = Signal::new();
        let forward = on_close.clone();
        inner.on_close().connect(move |()| forward.emit(&()));
        Self {
            inner,
            info,
            content: None,
            on_close,
        }
    }

    /// The wrapped dialog.
    pub fn dialog(&self) -> &Dialog {
        &self.inner
    }

    /// Displayed information.
    pub fn info(&self) -> &AboutInfo {
        &self.info
    }

    /// Slotted container holding the rendered sections.
    pub fn content(&self) -> Option<NodeId> {
        self.content
    }

    /// Whether the dialog is open.
    pub fn is_open(&self) -> bool {
        self.inner.is_open()
    }

    /// Emitted once the dialog finished closing.
    pub fn on_close(&self) -> &Signal<()> {
        &self.on_close
    }

    /// Emitted when the inner dialog opened.
    pub fn on_open(&self) -> &Signal<()> {
        self.inner.on_open()
    }

    /// Open the dialog.
    pub fn open(&mut self, host: &mut Host) -> bool {
        self.inner.open(host)
    }

    /// Close the dialog.
    pub fn close(&mut self, host: &mut Host) -> bool {
        self.inner.close(host)
    }

    /// Replace the displayed information.
    pub fn set_info(&mut self, host: &mut Host, info: AboutInfo) {
        let title = info.application_name.clone();
        self.info = info;
        self.render(&mut host.doc);
        self.inner.set_title(host, &title);
    }

    fn render(&mut self, doc: &mut Document) {
        if let Some(old) = self.content.take() {
            doc.destroy(old);
        }
        let info = &self.info;
        let content = doc.create_element("div");
        doc.add_class(content, "adw-about");
        doc.set_attribute(content, "slot", "content");

        let header = doc.create_element("div");
        doc.add_class(header, "adw-about-header");
        if !info.application_icon.is_empty() {
            let icon = create_icon(doc, &info.application_icon);
            doc.add_class(icon, "adw-about-icon");
            doc.append_child(header, icon);
        }
        for (class, text) in [
            ("adw-about-name", &info.application_name),
            ("adw-about-developer", &info.developer_name),
            ("adw-about-version", &info.version),
        ] {
            text_child(doc, header, "div", class, text);
        }
        doc.append_child(content, header);

        text_child(doc, content, "p", "adw-about-comments", &info.comments);
        if !info.website.is_empty() {
            let link = doc.create_element("a");
            doc.add_class(link, "adw-about-website");
            doc.set_attribute(link, "href", &info.website);
            doc.set_attribute(link, "target", "_blank");
            doc.set_attribute(link, "rel", "noopener");
            doc.set_text(link, &info.website);
            doc.append_child(content, link);
        }

        if !info.copyright.is_empty() || !info.license.is_empty() {
            let legal = doc.create_element("div");
            doc.add_class(legal, "adw-about-legal");
            text_child(doc, legal, "p", "adw-about-copyright", &info.copyright);
            text_child(doc, legal, "p", "adw-about-license", &info.license);
            doc.append_child(content, legal);
        }

        doc.append_child(self.inner.element(), content);
        self.content = Some(content);
    }
}

/// Append a text element unless `text` is empty.
fn text_child(doc: &mut Document, parent: NodeId, tag: &str, class: &str, text: &str) {
    if text.is_empty() {
        return;
    }
    let node = doc.create_element(tag);
    doc.add_class(node, class);
    doc.set_text(node, text);
    doc.append_child(parent, node);
}

impl Component for AboutDialog {
    fn element(&self) -> NodeId {
        self.inner.element()
    }

    fn mount(&mut self, host: &mut Host) {
        host.doc.add_class(self.inner.element(), "adw-about-dialog");
        self.render(&mut host.doc);
        self.inner.mount(host);
    }

    fn unmount(&mut self, host: &mut Host) {
        self.inner.unmount(host);
    }

    fn on_config_change(&mut self, host: &mut Host, name: &str, value: Option<&str>) {
        self.inner.on_config_change(host, name, value);
    }

    fn handle_event(&mut self, host: &mut Host, event: &mut Event) {
        self.inner.handle_event(host, event);
    }

    fn run_task(&mut self, host: &mut Host, task: Task) {
        self.inner.run_task(host, task);
    }

    fn on_mutations(&mut self, host: &mut Host, records: &[MutationRecord]) {
        self.inner.on_mutations(host, records);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::DialogManager;
    use adwaita_dom::Runtime;
    use alloc::rc::Rc;
    use core::cell::Cell;
    use kurbo::Size;

    fn info() -> AboutInfo {
        AboutInfo {
            application_name: String::from("Text Editor"),
            application_icon: String::from("org.gnome.TextEditor"),
            version: String::from("47.1"),
            developer_name: String::from("The GNOME Project"),
            website: String::from("https://apps.gnome.org/TextEditor"),
            license: String::from("GPL-3.0-or-later"),
            ..AboutInfo::default()
        }
    }

    fn setup() -> (Runtime, ComponentId) {
        let mut rt = Runtime::new(Size::new(800.0, 600.0));
        let doc = rt.doc_mut();
        let element = doc.create_element("adw-about-dialog");
        let body = doc.body();
        doc.append_child(body, element);
        let manager = DialogManager::shared();
        let id = rt.add(|id, _| AboutDialog::new(id, element, manager, info()));
        (rt, id)
    }

    #[test]
    fn renders_only_present_sections() {
        let (rt, id) = setup();
        let about = rt.get::<AboutDialog>(id).unwrap();
        let doc = rt.doc();
        let content = about.content().unwrap();
        assert_eq!(doc.attribute(content, "slot"), Some("content"));
        let version = doc.query_selector(content, ".adw-about-version").unwrap();
        assert_eq!(doc.text(version), Some("47.1"));
        let link = doc.query_selector(content, "a.adw-about-website").unwrap();
        assert_eq!(doc.attribute(link, "href"), Some("https://apps.gnome.org/TextEditor"));
        assert!(doc.query_selector(content, ".adw-about-comments").is_none());
        assert!(doc.query_selector(content, ".adw-about-copyright").is_none());
        assert!(doc.query_selector(content, ".adw-about-license").is_some());
        assert_eq!(about.dialog().config().title, "Text Editor");
    }

    #[test]
    fn set_info_rerenders_and_notifications_are_forwarded() {
        let (mut rt, id) = setup();
        let (opens, closes) = (Rc::new(Cell::new(0)), Rc::new(Cell::new(0)));
        let (open_counter, close_counter) = (Rc::clone(&opens), Rc::clone(&closes));
        rt.with::<AboutDialog, _>(id, move |a, host| {
            a.on_open()
                .connect(move |()| open_counter.set(open_counter.get() + 1));
            a.on_close()
                .connect(move |()| close_counter.set(close_counter.get() + 1));
            a.open(host);
        });
        assert_eq!(opens.get(), 1);
        let old = rt.get::<AboutDialog>(id).unwrap().content().unwrap();

        rt.with::<AboutDialog, _>(id, |a, host| {
            a.set_info(
                host,
                AboutInfo {
                    comments: String::from("Edit text files"),
                    ..info()
                },
            );
        });
        let about = rt.get::<AboutDialog>(id).unwrap();
        assert!(!rt.doc().is_alive(old));
        let content = about.content().unwrap();
        assert!(rt.doc().query_selector(content, ".adw-about-comments").is_some());

        rt.with::<AboutDialog, _>(id, |a, host| a.close(host));
        rt.run_pending();
        assert_eq!(closes.get(), 1);
        assert!(!rt.get::<AboutDialog>(id).unwrap().is_open());
    }
}
