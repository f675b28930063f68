// Copyright 2025 the Adwaita-web Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Preferences dialogs: pages of grouped rows with a page switcher.

use alloc::string::String;
use alloc::vec::Vec;

use adwaita_dom::{
    Component, ComponentId, Document, Event, EventKind, Host, MutationRecord, NodeId, Signal, Task,
};

use crate::dialog::{Dialog, DialogConfig};
use crate::manager::SharedDialogManager;
use crate::widgets::{ButtonAppearance, ButtonSpec, create_button};

/// A titled set of rows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PreferencesGroup {
    /// Group heading.
    pub title: String,
    /// Text under the heading.
    pub description: String,
    /// Row labels, in order.
    pub rows: Vec<String>,
}

/// One page of preferences.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PreferencesPage {
    /// Identifier used by [`PreferencesDialog::set_visible_page`].
    pub name: String,
    /// Label in the page switcher.
    pub title: String,
    /// Symbolic icon in the page switcher.
    pub icon_name: Option<String>,
    /// Groups, in order.
    pub groups: Vec<PreferencesGroup>,
}

#[derive(Debug)]
struct RenderedPage {
    name: String,
    page: NodeId,
    switch: Option<NodeId>,
}

/// Settings organized in pages, built on [`Dialog`].
///
/// With more than one page a switcher is rendered above the pages; only the
/// visible page is shown.
#[derive(Debug)]
pub struct PreferencesDialog {
    inner: Dialog,
    pages: Vec<PreferencesPage>,
    rendered: Vec<RenderedPage>,
    content: Option<NodeId>,
    visible: Option<String>,
    on_close: Signal<()>,
}

impl PreferencesDialog {
    /// A closed preferences dialog rendering into `element`.
    pub fn new(
        id: ComponentId,
        element: NodeId,
        manager: SharedDialogManager,
        pages: Vec<PreferencesPage>,
    ) -> Self {
        let inner = Dialog::with_config(
            id,
            element,
            manager,
            DialogConfig {
                title: String::from("Preferences"),
                ..DialogConfig::default()
            },
        );
        let on_close = Signal::new();
        let forward = on_close.clone();
        inner.on_close().connect(move |()| forward.emit(&()));
        let visible = pages.first().map(|p| p.name.clone());
        Self {
            inner,
            pages,
            rendered: Vec::new(),
            content: None,
            visible,
            on_close,
        }
    }

    /// The wrapped dialog.
    pub fn dialog(&self) -> &Dialog {
        &self.inner
    }

    /// Pages, in order.
    pub fn pages(&self) -> &[PreferencesPage] {
        &self.pages
    }

    /// Name of the visible page.
    pub fn visible_page(&self) -> Option<&str> {
        self.visible.as_deref()
    }

    /// Rendered element of a page.
    pub fn page_element(&self, name: &str) -> Option<NodeId> {
        self.rendered.iter().find(|r| r.name == name).map(|r| r.page)
    }

    /// Switcher button of a page, when a switcher is shown.
    pub fn switcher_button(&self, name: &str) -> Option<NodeId> {
        self.rendered
            .iter()
            .find(|r| r.name == name)
            .and_then(|r| r.switch)
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

    /// Append a page and re-render.
    pub fn add_page(&mut self, host: &mut Host, page: PreferencesPage) {
        if self.visible.is_none() {
            self.visible = Some(page.name.clone());
        }
        self.pages.push(page);
        self.render(&mut host.doc);
    }

    /// Show the named page. Unknown names are logged and ignored.
    pub fn set_visible_page(&mut self, host: &mut Host, name: &str) -> bool {
        if !self.pages.iter().any(|p| p.name == name) {
            tracing::warn!(page = name, "no such preferences page");
            return false;
        }
        self.visible = Some(String::from(name));
        self.sync_visibility(&mut host.doc);
        true
    }

    fn sync_visibility(&self, doc: &mut Document) {
        for rendered in &self.rendered {
            let visible = self.visible.as_deref() == Some(rendered.name.as_str());
            doc.toggle_attribute(rendered.page, "hidden", !visible);
            if let Some(switch) = rendered.switch {
                doc.toggle_class(switch, "active", visible);
                doc.set_attribute(switch, "aria-pressed", if visible { "true" } else { "false" });
            }
        }
    }

    fn render(&mut self, doc: &mut Document) {
        if let Some(old) = self.content.take() {
            doc.destroy(old);
        }
        self.rendered.clear();
        let content = doc.create_element("div");
        doc.add_class(content, "adw-preferences");
        doc.set_attribute(content, "slot", "content");

        let switcher = (self.pages.len() > 1).then(|| {
            let switcher = doc.create_element("div");
            doc.add_class(switcher, "adw-preferences-switcher");
            doc.set_attribute(switcher, "role", "tablist");
            doc.append_child(content, switcher);
            switcher
        });

        for page in &self.pages {
            let switch = switcher.map(|switcher| {
                let button = create_button(
                    doc,
                    &ButtonSpec {
                        label: &page.title,
                        appearance: ButtonAppearance::Flat,
                        icon: page.icon_name.as_deref(),
                        ..ButtonSpec::default()
                    },
                );
                doc.add_class(button, "adw-preferences-switcher-button");
                doc.set_attribute(button, "data-page-name", &page.name);
                doc.append_child(switcher, button);
                button
            });
            let element = render_page(doc, page);
            doc.append_child(content, element);
            self.rendered.push(RenderedPage {
                name: page.name.clone(),
                page: element,
                switch,
            });
        }

        doc.append_child(self.inner.element(), content);
        self.content = Some(content);
        self.sync_visibility(doc);
    }

    fn clicked_page(&self, event: &Event) -> Option<String> {
        self.rendered
            .iter()
            .find(|r| r.switch.is_some_and(|s| event.path_contains(s)))
            .map(|r| r.name.clone())
    }
}

fn render_page(doc: &mut Document, page: &PreferencesPage) -> NodeId {
    let element = doc.create_element("section");
    doc.add_class(element, "adw-preferences-page");
    doc.set_attribute(element, "data-page-name", &page.name);
    for group in &page.groups {
        let node = doc.create_element("div");
        doc.add_class(node, "adw-preferences-group");
        if !group.title.is_empty() {
            let title = doc.create_element("h3");
            doc.add_class(title, "adw-preferences-group-title");
            doc.set_text(title, &group.title);
            doc.append_child(node, title);
        }
        if !group.description.is_empty() {
            let description = doc.create_element("p");
            doc.add_class(description, "adw-preferences-group-description");
            doc.set_text(description, &group.description);
            doc.append_child(node, description);
        }
        let rows = doc.create_element("div");
        doc.add_class(rows, "adw-preferences-rows");
        doc.set_attribute(rows, "role", "list");
        for label in &group.rows {
            let row = doc.create_element("div");
            doc.add_class(row, "adw-action-row");
            doc.set_attribute(row, "role", "listitem");
            doc.set_text(row, label);
            doc.append_child(rows, row);
        }
        doc.append_child(node, rows);
        doc.append_child(element, node);
    }
    element
}

impl Component for PreferencesDialog {
    fn element(&self) -> NodeId {
        self.inner.element()
    }

    fn mount(&mut self, host: &mut Host) {
        host.doc
            .add_class(self.inner.element(), "adw-preferences-dialog");
        self.render(&mut host.doc);
        self.inner.mount(host);
    }

    fn unmount(&mut self, host: &mut Host) {
        self.inner.unmount(host);
    }

    fn on_config_change(&mut self, host: &mut Host, name: &str, value: Option<&str>) {
        match (name, value) {
            ("visible-page", Some(page)) => {
                self.set_visible_page(host, page);
            }
            _ => self.inner.on_config_change(host, name, value),
        }
    }

    fn handle_event(&mut self, host: &mut Host, event: &mut Event) {
        self.inner.handle_event(host, event);
        if event.kind == EventKind::Click
            && self.inner.is_open()
            && !self.inner.is_processing()
            && let Some(name) = self.clicked_page(event)
        {
            self.set_visible_page(host, &name);
        }
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
    use alloc::vec;
    use core::cell::RefCell;
    use kurbo::Size;

    fn page(name: &str, title: &str) -> PreferencesPage {
        PreferencesPage {
            name: String::from(name),
            title: String::from(title),
            icon_name: None,
            groups: vec![PreferencesGroup {
                title: String::from("General"),
                description: String::new(),
                rows: vec![String::from("Dark mode"), String::from("Animations")],
            }],
        }
    }

    fn setup(pages: Vec<PreferencesPage>) -> (Runtime, ComponentId) {
        let mut rt = Runtime::new(Size::new(800.0, 600.0));
        let doc = rt.doc_mut();
        let element = doc.create_element("adw-preferences-dialog");
        let body = doc.body();
        doc.append_child(body, element);
        let manager = DialogManager::shared();
        let id = rt.add(|id, _| PreferencesDialog::new(id, element, manager, pages));
        (rt, id)
    }

    #[test]
    fn single_page_has_no_switcher() {
        let (rt, id) = setup(vec![page("general", "General")]);
        let prefs = rt.get::<PreferencesDialog>(id).unwrap();
        assert_eq!(prefs.switcher_button("general"), None);
        let page = prefs.page_element("general").unwrap();
        assert!(!rt.doc().has_attribute(page, "hidden"));
        assert_eq!(rt.doc().query_selector_all(page, ".adw-action-row").len(), 2);
        assert!(rt.doc().query_selector(page, ".adw-preferences-group-description").is_none());
    }

    #[test]
    fn switcher_changes_the_visible_page() {
        let (mut rt, id) = setup(vec![page("general", "General"), page("privacy", "Privacy")]);
        rt.with::<PreferencesDialog, _>(id, |p, host| p.open(host));
        let prefs = rt.get::<PreferencesDialog>(id).unwrap();
        assert_eq!(prefs.visible_page(), Some("general"));
        let privacy = prefs.page_element("privacy").unwrap();
        let switch = prefs.switcher_button("privacy").unwrap();
        assert!(rt.doc().has_attribute(privacy, "hidden"));

        rt.click(switch);
        let prefs = rt.get::<PreferencesDialog>(id).unwrap();
        assert_eq!(prefs.visible_page(), Some("privacy"));
        assert!(!rt.doc().has_attribute(privacy, "hidden"));
        assert_eq!(rt.doc().attribute(switch, "aria-pressed"), Some("true"));
        assert!(prefs.is_open());
    }

    #[test]
    fn unknown_pages_are_ignored() {
        let (mut rt, id) = setup(vec![page("general", "General"), page("privacy", "Privacy")]);
        let changed = rt
            .with::<PreferencesDialog, _>(id, |p, host| p.set_visible_page(host, "missing"))
            .unwrap();
        assert!(!changed);
        let prefs = rt.get::<PreferencesDialog>(id).unwrap();
        assert_eq!(prefs.visible_page(), Some("general"));
    }

    #[test]
    fn adding_a_page_adds_a_switcher() {
        let (mut rt, id) = setup(vec![page("general", "General")]);
        rt.with::<PreferencesDialog, _>(id, |p, host| p.add_page(host, page("search", "Search")));
        let element = rt.get::<PreferencesDialog>(id).unwrap().element();
        rt.set_attribute(element, "visible-page", Some("search"));
        let prefs = rt.get::<PreferencesDialog>(id).unwrap();
        assert!(prefs.switcher_button("general").is_some());
        assert_eq!(prefs.visible_page(), Some("search"));
    }

    #[test]
    fn open_and_close_are_notified() {
        let (mut rt, id) = setup(vec![page("general", "General")]);
        let log = Rc::new(RefCell::new(Vec::new()));
        let (on_open, on_close) = (Rc::clone(&log), Rc::clone(&log));
        rt.with::<PreferencesDialog, _>(id, move |p, host| {
            p.on_open().connect(move |()| on_open.borrow_mut().push("open"));
            p.on_close().connect(move |()| on_close.borrow_mut().push("close"));
            p.open(host);
            p.close(host);
        });
        assert_eq!(*log.borrow(), ["open"]);
        rt.run_pending();
        assert_eq!(*log.borrow(), ["open", "close"]);
    }
}
