// Copyright 2025 the Adwaita-web Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The dialog stack and its shared backdrop.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use adwaita_dom::{ComponentId, Document, NodeId};
use adwaita_focus::first_tabbable;

/// A manager shared by every dialog of one document.
pub type SharedDialogManager = Rc<RefCell<DialogManager>>;

/// One open dialog.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DialogEntry {
    /// The dialog component.
    pub id: ComponentId,
    /// Element receiving initial focus (the modal surface).
    pub focus_root: NodeId,
    /// Whether a click on the shared backdrop may close this dialog.
    pub close_on_backdrop_click: bool,
}

/// Tracks open dialogs, owns the shared backdrop and assigns initial focus.
///
/// The backdrop is created on first registration, appended to `<body>`, and is
/// visible exactly while the stack is non-empty. The last registered dialog
/// is the topmost one.
#[derive(Clone, Debug, Default)]
pub struct DialogManager {
    stack: Vec<DialogEntry>,
    backdrop: Option<NodeId>,
}

impl DialogManager {
    /// An empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty manager ready to be shared between dialogs.
    pub fn shared() -> SharedDialogManager {
        Rc::new(RefCell::new(Self::new()))
    }

    fn ensure_backdrop(&mut self, doc: &mut Document) -> NodeId {
        if let Some(backdrop) = self.backdrop.filter(|b| doc.is_alive(*b)) {
            return backdrop;
        }
        let backdrop = doc.create_element("div");
        doc.add_class(backdrop, "adw-dialog-backdrop");
        doc.set_attribute(backdrop, "aria-hidden", "true");
        doc.toggle_attribute(backdrop, "hidden", true);
        let body = doc.body();
        doc.append_child(body, backdrop);
        self.backdrop = Some(backdrop);
        backdrop
    }

    fn sync_backdrop(&self, doc: &mut Document) {
        if let Some(backdrop) = self.backdrop {
            let visible = !self.stack.is_empty();
            doc.toggle_attribute(backdrop, "hidden", !visible);
            doc.toggle_class(backdrop, "visible", visible);
        }
    }

    /// Push a dialog (once), show the backdrop and move focus into the dialog.
    ///
    /// Focus goes to the first tabbable descendant of `focus_root`, looking
    /// through shadow roots and slots. Without one, `focus_root` itself gets
    /// `tabindex="-1"` and is focused.
    pub fn register(&mut self, doc: &mut Document, entry: DialogEntry) {
        self.ensure_backdrop(doc);
        if !self.contains(entry.id) {
            self.stack.push(entry);
        }
        self.sync_backdrop(doc);

        match first_tabbable(&doc.focus_entries(entry.focus_root)) {
            Some(first) => {
                doc.focus(first);
            }
            None => {
                doc.set_attribute(entry.focus_root, "tabindex", "-1");
                doc.focus(entry.focus_root);
            }
        }
        tracing::debug!(dialog = entry.id.get(), depth = self.stack.len(), "dialog registered");
    }

    /// Remove a dialog and hide the backdrop once the stack is empty.
    ///
    /// Focus is left alone; restoring it is the dialog's job.
    pub fn unregister(&mut self, doc: &mut Document, id: ComponentId) -> bool {
        let before = self.stack.len();
        self.stack.retain(|e| e.id != id);
        let removed = self.stack.len() != before;
        self.sync_backdrop(doc);
        if removed {
            tracing::debug!(dialog = id.get(), depth = self.stack.len(), "dialog unregistered");
        }
        removed
    }

    /// Update a registered dialog's backdrop policy.
    pub fn set_close_on_backdrop_click(&mut self, id: ComponentId, enabled: bool) {
        if let Some(entry) = self.stack.iter_mut().find(|e| e.id == id) {
            entry.close_on_backdrop_click = enabled;
        }
    }

    /// Dialog a click on `target` should close: the topmost one, if `target` is
    /// the shared backdrop and that dialog allows backdrop dismissal.
    pub fn backdrop_click_target(&self, target: Option<NodeId>) -> Option<ComponentId> {
        if target.is_none() || target != self.backdrop {
            return None;
        }
        self.topmost()
            .filter(|e| e.close_on_backdrop_click)
            .map(|e| e.id)
    }

    /// The most recently registered dialog.
    pub fn topmost(&self) -> Option<&DialogEntry> {
        self.stack.last()
    }

    /// Whether `id` is the topmost dialog.
    pub fn is_topmost(&self, id: ComponentId) -> bool {
        self.topmost().is_some_and(|e| e.id == id)
    }

    /// Whether `id` is registered.
    pub fn contains(&self, id: ComponentId) -> bool {
        self.stack.iter().any(|e| e.id == id)
    }

    /// Number of registered dialogs.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Whether no dialog is registered.
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// The shared backdrop, once created.
    pub fn backdrop(&self) -> Option<NodeId> {
        self.backdrop
    }

    /// Whether the backdrop is currently shown.
    pub fn is_backdrop_visible(&self, doc: &Document) -> bool {
        self.backdrop
            .is_some_and(|b| doc.is_alive(b) && !doc.has_attribute(b, "hidden"))
    }
}
