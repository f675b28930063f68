// Copyright 2025 the Adwaita-web Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host's modal primitive (a `<dialog>` element shown modally).

use adwaita_dom::{ComponentId, Document, NodeId, Scheduler, TaskId, TaskTag};

/// A `<dialog>` element driven modally.
///
/// Showing it makes it rendered and marks it `open`. Closing it hides it at
/// once but reports completion one task later through a timer addressed to the
/// owning component, like the platform's `close` event.
#[derive(Clone, Debug)]
pub struct NativeModal {
    node: NodeId,
    open: bool,
}

impl NativeModal {
    /// Wrap a `<dialog>` element. It starts hidden.
    pub fn new(doc: &mut Document, node: NodeId) -> Self {
        doc.set_style(node, "display", "none");
        Self { node, open: false }
    }

    /// The `<dialog>` element.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Whether the modal is visually open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Present the modal. No-op if it is already open.
    pub fn show_modal(&mut self, doc: &mut Document) {
        if self.open {
            return;
        }
        self.open = true;
        doc.toggle_attribute(self.node, "open", true);
        doc.remove_style(self.node, "display");
    }

    /// Hide the modal and queue its close completion as `tag` for `owner`.
    ///
    /// Returns `None` if it was not open.
    pub fn close(
        &mut self,
        doc: &mut Document,
        scheduler: &mut Scheduler,
        owner: ComponentId,
        tag: TaskTag,
    ) -> Option<TaskId> {
        if !self.open {
            return None;
        }
        self.open = false;
        doc.toggle_attribute(self.node, "open", false);
        doc.set_style(self.node, "display", "none");
        Some(scheduler.set_timeout(owner, tag, 0))
    }

    /// Hide the modal without queuing a completion.
    pub fn force_close(&mut self, doc: &mut Document) {
        self.open = false;
        doc.toggle_attribute(self.node, "open", false);
        doc.set_style(self.node, "display", "none");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;

    #[test]
    fn close_completes_one_task_later() {
        let mut doc = Document::new(Size::new(100.0, 100.0));
        let mut scheduler = Scheduler::default();
        let node = doc.create_element("dialog");
        doc.append_child(doc.body(), node);
        let mut modal = NativeModal::new(&mut doc, node);
        assert!(!doc.is_rendered(node));

        modal.show_modal(&mut doc);
        assert!(modal.is_open());
        assert!(doc.is_rendered(node));
        assert!(doc.has_attribute(node, "open"));

        let owner = ComponentId::new(1);
        assert!(modal.close(&mut doc, &mut scheduler, owner, TaskTag(9)).is_some());
        assert!(!modal.is_open());
        assert!(!doc.is_rendered(node));
        assert_eq!(scheduler.pending(), 1);
        assert!(modal.close(&mut doc, &mut scheduler, owner, TaskTag(9)).is_none());
    }
}
