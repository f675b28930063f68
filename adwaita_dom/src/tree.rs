// Copyright 2025 the Adwaita-web Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core document implementation: structure, attributes, shadow trees, focus.

use alloc::string::String;
use alloc::vec::Vec;
use alloc::{format, vec};

use adwaita_focus::FocusEntry;
use hashbrown::HashMap;
use kurbo::{Rect, Size};
use smallvec::SmallVec;

use crate::component::ComponentId;
use crate::observer::{MutationRecord, ObserveOptions, ObserverId, ObserverRegistry};
use crate::selector::{self, Selector};
use crate::types::{ElementFlags, NodeId, NodeKind};

/// Composed path of an event target, from the target up to the document root.
pub type ComposedPath = SmallVec<[NodeId; 16]>;

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    kind: NodeKind,
    tag: String,
    flags: ElementFlags,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attributes: HashMap<String, String>,
    styles: Vec<(String, String)>,
    text: String,
    shadow_root: Option<NodeId>,
    host: Option<NodeId>,
    layout: Rect,
}

impl Node {
    fn new(generation: u32, kind: NodeKind, tag: String) -> Self {
        let flags = ElementFlags::for_tag(&tag);
        Self {
            generation,
            kind,
            tag,
            flags,
            parent: None,
            children: Vec::new(),
            attributes: HashMap::new(),
            styles: Vec::new(),
            text: String::new(),
            shadow_root: None,
            host: None,
            layout: Rect::ZERO,
        }
    }
}

/// An in-memory render tree.
///
/// The document owns every element the components create or attach to. It is
/// the explicit attachment point components render into: there is no global
/// registry, and layout is supplied by the host through
/// [`Document::set_layout_rect`] (viewport coordinates).
///
/// ## Example
///
/// ```rust
/// use kurbo::Size;
/// use adwaita_dom::Document;
///
/// let mut doc = Document::new(Size::new(800.0, 600.0));
/// let button = doc.create_element("button");
/// doc.set_attribute(button, "id", "go");
/// doc.append_child(doc.body(), button);
///
/// assert_eq!(doc.query_selector(doc.root(), "#go"), Some(button));
/// assert!(doc.focus(button));
/// assert_eq!(doc.active_element(), Some(button));
/// ```
pub struct Document {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
    active: Option<NodeId>,
    viewport: Size,
    observers: ObserverRegistry,
}

impl core::fmt::Debug for Document {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Document")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("active", &self.active)
            .field("viewport", &self.viewport)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl Document {
    /// Create a document with `<html>`, `<head>` and `<body>` and the given viewport.
    pub fn new(viewport: Size) -> Self {
        let placeholder = NodeId::new(0, 0);
        let mut doc = Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            root: placeholder,
            head: placeholder,
            body: placeholder,
            active: None,
            viewport,
            observers: ObserverRegistry::default(),
        };
        doc.root = doc.alloc(NodeKind::Element, "html");
        doc.head = doc.alloc(NodeKind::Element, "head");
        doc.body = doc.alloc(NodeKind::Element, "body");
        doc.link(doc.head, doc.root);
        doc.link(doc.body, doc.root);
        doc
    }

    /// The `<html>` element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The `<head>` element.
    pub fn head(&self) -> NodeId {
        self.head
    }

    /// The `<body>` element.
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Current viewport size.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Update the viewport size. Hosts normally do this through
    /// [`Runtime::resize`](crate::Runtime::resize) so resize listeners run.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    // --- structure ---

    fn alloc(&mut self, kind: NodeKind, tag: &str) -> NodeId {
        let tag = tag.to_ascii_lowercase();
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, kind, tag));
            (idx, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, kind, tag)));
            self.generations.push(generation);
            (self.nodes.len() - 1, generation)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices."
        )]
        let idx = idx as u32;
        NodeId::new(idx, generation)
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        (n.generation == id.1).then_some(n)
    }

    fn link(&mut self, child: NodeId, parent: NodeId) {
        if let Some(p) = self.node_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.node_mut(child) {
            c.parent = Some(parent);
        }
    }

    fn unlink(&mut self, child: NodeId) -> Option<NodeId> {
        let parent = self.node_mut(child)?.parent.take()?;
        if let Some(p) = self.node_mut(parent) {
            p.children.retain(|c| *c != child);
        }
        Some(parent)
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(NodeKind::Element, tag)
    }

    /// Whether `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Kind of a live node.
    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.node(id).map(|n| n.kind)
    }

    /// Lowercase tag of a live element.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(|n| n.tag.as_str())
    }

    /// Append `child` to `parent`, moving it from its current parent if needed.
    ///
    /// Returns `false` (and changes nothing) for stale identifiers, shadow
    /// roots, or when the move would create a cycle.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if parent == child
            || !self.is_alive(parent)
            || self.kind(child) != Some(NodeKind::Element)
            || self.contains(child, parent)
        {
            return false;
        }
        if let Some(old) = self.unlink(child) {
            self.observers.children_changed(old);
        }
        self.link(child, parent);
        self.observers.children_changed(parent);
        true
    }

    /// Detach `child` from its parent, keeping it alive for reinsertion.
    pub fn detach(&mut self, child: NodeId) -> bool {
        match self.unlink(child) {
            Some(parent) => {
                self.observers.children_changed(parent);
                true
            }
            None => false,
        }
    }

    /// Destroy a node and its subtree (including shadow trees).
    ///
    /// Every identifier in the subtree becomes stale.
    pub fn destroy(&mut self, id: NodeId) {
        if !self.is_alive(id) || id == self.root {
            return;
        }
        self.detach(id);
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.node(current) else {
                continue;
            };
            stack.extend(node.children.iter().copied());
            stack.extend(node.shadow_root);
            self.observers.forget_node(current);
            if self.active == Some(current) {
                self.active = None;
            }
            self.nodes[current.idx()] = None;
            self.free_list.push(current.idx());
        }
    }

    /// Light-tree parent of a live node.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.parent
    }

    /// Light-tree children of a live node.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Parent in the composed tree: the light parent, or the host of a shadow root.
    pub fn composed_parent(&self, id: NodeId) -> Option<NodeId> {
        let n = self.node(id)?;
        match n.kind {
            NodeKind::ShadowRoot => n.host,
            NodeKind::Element => n.parent,
        }
    }

    /// Whether `node` is `ancestor` or one of its composed descendants.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(c) = current {
            if c == ancestor {
                return true;
            }
            current = self.composed_parent(c);
        }
        false
    }

    /// Whether a node is attached (through shadow hosts) to the document root.
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.is_alive(id) && self.contains(self.root, id)
    }

    /// Path from `target` up to the document root, crossing shadow boundaries.
    pub fn composed_path(&self, target: NodeId) -> ComposedPath {
        let mut path = ComposedPath::new();
        let mut current = self.is_alive(target).then_some(target);
        while let Some(c) = current {
            path.push(c);
            current = self.composed_parent(c);
        }
        path
    }

    // --- attributes, classes, styles, text ---

    /// Attribute value of a live element.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id)?.attributes.get(name).map(String::as_str)
    }

    /// Whether a live element carries the attribute.
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.attribute(id, name).is_some()
    }

    /// Set an attribute. Returns `true` if the value changed.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> bool {
        let Some(n) = self.node_mut(id) else {
            return false;
        };
        let old = n.attributes.insert(String::from(name), String::from(value));
        if old.as_deref() == Some(value) {
            return false;
        }
        self.observers.attribute_changed(id, name, old.as_deref());
        true
    }

    /// Remove an attribute. Returns `true` if it was present.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> bool {
        let Some(old) = self.node_mut(id).and_then(|n| n.attributes.remove(name)) else {
            return false;
        };
        self.observers.attribute_changed(id, name, Some(&old));
        true
    }

    /// Set or remove a boolean (presence) attribute.
    pub fn toggle_attribute(&mut self, id: NodeId, name: &str, on: bool) -> bool {
        if on {
            self.set_attribute(id, name, "")
        } else {
            self.remove_attribute(id, name)
        }
    }

    /// Classes of a live element, in attribute order.
    pub fn classes(&self, id: NodeId) -> impl Iterator<Item = &str> + '_ {
        self.attribute(id, "class")
            .unwrap_or("")
            .split_ascii_whitespace()
    }

    /// Whether a live element has the class.
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.classes(id).any(|c| c == class)
    }

    /// Add or remove a class.
    pub fn toggle_class(&mut self, id: NodeId, class: &str, on: bool) {
        if self.has_class(id, class) == on || !self.is_alive(id) {
            return;
        }
        let mut classes: Vec<&str> = self.classes(id).filter(|c| *c != class).collect();
        if on {
            classes.push(class);
        }
        let value = classes.join(" ");
        self.set_attribute(id, "class", &value);
    }

    /// Add a class.
    pub fn add_class(&mut self, id: NodeId, class: &str) {
        self.toggle_class(id, class, true);
    }

    /// Remove a class.
    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        self.toggle_class(id, class, false);
    }

    /// Inline style property of a live element.
    pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
        self.node(id)?
            .styles
            .iter()
            .find(|(k, _)| k == property)
            .map(|(_, v)| v.as_str())
    }

    /// Set an inline style property; reflected into the `style` attribute.
    pub fn set_style(&mut self, id: NodeId, property: &str, value: &str) {
        let Some(n) = self.node_mut(id) else {
            return;
        };
        match n.styles.iter_mut().find(|(k, _)| k == property) {
            Some((_, v)) if v.as_str() == value => return,
            Some((_, v)) => *v = String::from(value),
            None => n.styles.push((String::from(property), String::from(value))),
        }
        self.sync_style_attribute(id);
    }

    /// Remove an inline style property.
    pub fn remove_style(&mut self, id: NodeId, property: &str) {
        let Some(n) = self.node_mut(id) else {
            return;
        };
        let before = n.styles.len();
        n.styles.retain(|(k, _)| k != property);
        if n.styles.len() != before {
            self.sync_style_attribute(id);
        }
    }

    fn sync_style_attribute(&mut self, id: NodeId) {
        let Some(n) = self.node(id) else {
            return;
        };
        if n.styles.is_empty() {
            self.remove_attribute(id, "style");
            return;
        }
        let value = n
            .styles
            .iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join("; ");
        self.set_attribute(id, "style", &value);
    }

    /// Own text of a live element.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(|n| n.text.as_str())
    }

    /// Replace the own text of a live element.
    pub fn set_text(&mut self, id: NodeId, text: &str) {
        if let Some(n) = self.node_mut(id) {
            n.text = String::from(text);
        }
    }

    // --- shadow trees and slots ---

    /// Attach (or return the existing) shadow root of `host`.
    pub fn attach_shadow(&mut self, host: NodeId) -> Option<NodeId> {
        let node = self.node(host)?;
        if node.kind != NodeKind::Element {
            return None;
        }
        if let Some(existing) = node.shadow_root {
            return Some(existing);
        }
        let root = self.alloc(NodeKind::ShadowRoot, "#shadow-root");
        if let Some(r) = self.node_mut(root) {
            r.host = Some(host);
        }
        if let Some(h) = self.node_mut(host) {
            h.shadow_root = Some(root);
        }
        Some(root)
    }

    /// Shadow root of a live host.
    pub fn shadow_root_of(&self, host: NodeId) -> Option<NodeId> {
        self.node(host)?.shadow_root
    }

    /// Host of a live shadow root.
    pub fn host_of(&self, shadow_root: NodeId) -> Option<NodeId> {
        self.node(shadow_root)?.host
    }

    /// Host elements assigned to a `<slot>`, matched by the `slot` attribute.
    ///
    /// An unnamed slot receives the host's children without a `slot` attribute.
    pub fn assigned_nodes(&self, slot: NodeId) -> Vec<NodeId> {
        let Some(node) = self.node(slot) else {
            return Vec::new();
        };
        if !node.flags.contains(ElementFlags::SLOT) {
            return Vec::new();
        }
        let mut current = node.parent;
        let host = loop {
            let Some(c) = current else {
                return Vec::new();
            };
            if self.kind(c) == Some(NodeKind::ShadowRoot) {
                match self.host_of(c) {
                    Some(host) => break host,
                    None => return Vec::new(),
                }
            }
            current = self.parent_of(c);
        };
        let name = self.attribute(slot, "name").filter(|n| !n.is_empty());
        self.children_of(host)
            .iter()
            .copied()
            .filter(|&child| self.attribute(child, "slot").filter(|n| !n.is_empty()) == name)
            .collect()
    }

    /// Children in the composed (rendered) tree.
    ///
    /// Shadow hosts expose their shadow root's children, slots expose their
    /// assigned nodes (or their own fallback children when nothing is assigned).
    pub fn composed_children(&self, id: NodeId) -> Vec<NodeId> {
        let Some(node) = self.node(id) else {
            return Vec::new();
        };
        if let Some(shadow) = node.shadow_root {
            return self.children_of(shadow).to_vec();
        }
        if node.flags.contains(ElementFlags::SLOT) {
            let assigned = self.assigned_nodes(id);
            if !assigned.is_empty() {
                return assigned;
            }
        }
        node.children.clone()
    }

    /// Composed descendants of `root` in pre-order, excluding `root`.
    pub fn composed_descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.composed_children(root).into_iter().rev().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.composed_children(id).into_iter().rev());
        }
        out
    }

    // --- queries ---

    fn matches(&self, id: NodeId, sel: &Selector<'_>) -> bool {
        let Some(node) = self.node(id) else {
            return false;
        };
        if node.kind != NodeKind::Element {
            return false;
        }
        if sel.tag.is_some_and(|t| !t.eq_ignore_ascii_case(&node.tag)) {
            return false;
        }
        if sel.id.is_some_and(|i| self.attribute(id, "id") != Some(i)) {
            return false;
        }
        if !sel.classes.iter().all(|c| self.has_class(id, c)) {
            return false;
        }
        sel.attributes.iter().all(|(name, value)| match value {
            Some(v) => self.attribute(id, name) == Some(*v),
            None => self.has_attribute(id, name),
        })
    }

    /// Light-tree descendants of `scope` matching a compound selector.
    ///
    /// Unsupported selectors match nothing.
    pub fn query_selector_all(&self, scope: NodeId, selector: &str) -> Vec<NodeId> {
        let Some(sel) = selector::parse(selector) else {
            tracing::debug!(selector, "unsupported selector");
            return Vec::new();
        };
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children_of(scope).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if self.matches(id, &sel) {
                out.push(id);
            }
            stack.extend(self.children_of(id).iter().rev().copied());
        }
        out
    }

    /// First light-tree descendant of `scope` matching a compound selector.
    pub fn query_selector(&self, scope: NodeId, selector: &str) -> Option<NodeId> {
        self.query_selector_all(scope, selector).first().copied()
    }

    // --- layout ---

    /// Host-supplied border box in viewport coordinates.
    pub fn layout_rect(&self, id: NodeId) -> Option<Rect> {
        self.node(id).map(|n| n.layout)
    }

    /// Record the host's layout result for an element.
    ///
    /// Size changes are reported to size observers.
    pub fn set_layout_rect(&mut self, id: NodeId, rect: Rect) {
        let Some(n) = self.node_mut(id) else {
            return;
        };
        let old = n.layout.size();
        n.layout = rect;
        if old != rect.size() {
            self.observers.resized(id, old, rect.size());
        }
    }

    /// Whether an element is connected and not hidden (`hidden`, `display: none`)
    /// by itself or a composed ancestor.
    pub fn is_rendered(&self, id: NodeId) -> bool {
        if !self.is_connected(id) {
            return false;
        }
        let mut current = Some(id);
        while let Some(c) = current {
            if self.has_attribute(c, "hidden") || self.style(c, "display") == Some("none") {
                return false;
            }
            current = self.composed_parent(c);
        }
        true
    }

    // --- focus ---

    /// Explicit or implied `tabindex` of a live element.
    pub fn tab_index(&self, id: NodeId) -> Option<i32> {
        let node = self.node(id)?;
        if let Some(explicit) = self.attribute(id, "tabindex")
            && let Ok(v) = explicit.trim().parse::<i32>()
        {
            return Some(v);
        }
        let native = node.flags.contains(ElementFlags::NATIVELY_FOCUSABLE)
            || (node.tag == "a" && self.has_attribute(id, "href"));
        native.then_some(0)
    }

    /// Whether an element can take focus right now.
    pub fn is_focusable(&self, id: NodeId) -> bool {
        if self.kind(id) != Some(NodeKind::Element)
            || self.tab_index(id).is_none()
            || self.has_attribute(id, "disabled")
            || !self.is_rendered(id)
        {
            return false;
        }
        let mut current = Some(id);
        while let Some(c) = current {
            if self.has_attribute(c, "inert") {
                return false;
            }
            current = self.composed_parent(c);
        }
        true
    }

    /// Focus an element. Returns `false` if it cannot take focus.
    pub fn focus(&mut self, id: NodeId) -> bool {
        if !self.is_focusable(id) {
            return false;
        }
        self.active = Some(id);
        true
    }

    /// Drop focus back to the document.
    pub fn blur(&mut self) {
        self.active = None;
    }

    /// Currently focused element, if it is still connected.
    pub fn active_element(&self) -> Option<NodeId> {
        self.active.filter(|&a| self.is_connected(a))
    }

    /// Focusable composed descendants of `root` in document order.
    pub fn focusable_descendants(&self, root: NodeId) -> Vec<NodeId> {
        self.composed_descendants(root)
            .into_iter()
            .filter(|&id| self.is_focusable(id))
            .collect()
    }

    /// Focus candidates under `root`, ready for a focus trap.
    pub fn focus_entries(&self, root: NodeId) -> Vec<FocusEntry<NodeId>> {
        self.focusable_descendants(root)
            .into_iter()
            .map(|id| FocusEntry {
                id,
                tab_index: self.tab_index(id).unwrap_or(-1),
                enabled: true,
            })
            .collect()
    }

    // --- observers ---

    /// Register an observation on `target` for `owner`.
    pub fn observe(
        &mut self,
        owner: ComponentId,
        target: NodeId,
        options: ObserveOptions,
    ) -> ObserverId {
        self.observers.observe(owner, target, options)
    }

    /// Remove an observation and drop its undelivered records.
    pub fn disconnect(&mut self, observer: ObserverId) -> bool {
        self.observers.disconnect(observer)
    }

    /// Remove every observation registered by `owner`.
    pub fn disconnect_owner(&mut self, owner: ComponentId) {
        self.observers.disconnect_owner(owner);
    }

    /// Number of live observations.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Whether records are waiting for delivery.
    pub fn has_pending_mutations(&self) -> bool {
        self.observers.has_pending()
    }

    /// Take all queued records with their owners, in queue order.
    pub fn take_mutations(&mut self) -> Vec<(ComponentId, MutationRecord)> {
        self.observers.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::MutationKind;

    fn doc() -> Document {
        Document::new(Size::new(800.0, 600.0))
    }

    #[test]
    fn stale_ids_after_destroy() {
        let mut doc = doc();
        let a = doc.create_element("div");
        let b = doc.create_element("span");
        doc.append_child(doc.body(), a);
        doc.append_child(a, b);
        doc.destroy(a);
        assert!(!doc.is_alive(a));
        assert!(!doc.is_alive(b));
        assert!(doc.children_of(doc.body()).is_empty());

        // Slot reuse bumps the generation so old handles stay stale.
        let c = doc.create_element("div");
        assert!(doc.is_alive(c));
        assert!(!doc.is_alive(a) && !doc.is_alive(b));
        assert_eq!(doc.attribute(a, "id"), None);
    }

    #[test]
    fn append_moves_and_rejects_cycles() {
        let mut doc = doc();
        let outer = doc.create_element("div");
        let inner = doc.create_element("div");
        doc.append_child(doc.body(), outer);
        doc.append_child(outer, inner);
        assert!(!doc.append_child(inner, outer), "cycle must be rejected");

        assert!(doc.append_child(doc.body(), inner));
        assert_eq!(doc.parent_of(inner), Some(doc.body()));
        assert!(doc.children_of(outer).is_empty());
    }

    #[test]
    fn classes_and_styles_reflect_into_attributes() {
        let mut doc = doc();
        let el = doc.create_element("div");
        doc.add_class(el, "popover");
        doc.add_class(el, "open");
        doc.add_class(el, "open");
        assert_eq!(doc.attribute(el, "class"), Some("popover open"));
        doc.remove_class(el, "popover");
        assert_eq!(doc.attribute(el, "class"), Some("open"));

        doc.set_style(el, "top", "10px");
        doc.set_style(el, "left", "4px");
        doc.set_style(el, "top", "12px");
        assert_eq!(doc.attribute(el, "style"), Some("top: 12px; left: 4px"));
        doc.remove_style(el, "top");
        doc.remove_style(el, "left");
        assert!(!doc.has_attribute(el, "style"));
    }

    #[test]
    fn slots_project_host_children() {
        let mut doc = doc();
        let host = doc.create_element("adw-dialog");
        doc.append_child(doc.body(), host);
        let shadow = doc.attach_shadow(host).unwrap();
        let named = doc.create_element("slot");
        doc.set_attribute(named, "name", "buttons");
        let default = doc.create_element("slot");
        doc.append_child(shadow, named);
        doc.append_child(shadow, default);

        let ok = doc.create_element("button");
        doc.set_attribute(ok, "slot", "buttons");
        let para = doc.create_element("p");
        doc.append_child(host, ok);
        doc.append_child(host, para);

        assert_eq!(doc.assigned_nodes(named), vec![ok]);
        assert_eq!(doc.assigned_nodes(default), vec![para]);
        assert_eq!(doc.composed_descendants(host), vec![named, ok, default, para]);
        assert!(doc.is_connected(named));
        assert_eq!(doc.composed_path(named).as_slice(), &[named, shadow, host, doc.body(), doc.root()]);
    }

    #[test]
    fn focusability_rules() {
        let mut doc = doc();
        let div = doc.create_element("div");
        let button = doc.create_element("button");
        let disabled = doc.create_element("button");
        let link = doc.create_element("a");
        let hidden = doc.create_element("input");
        doc.set_attribute(disabled, "disabled", "");
        doc.set_attribute(link, "href", "#");
        doc.set_attribute(hidden, "hidden", "");
        for el in [div, button, disabled, link, hidden] {
            doc.append_child(doc.body(), el);
        }

        assert!(!doc.is_focusable(div));
        assert!(doc.is_focusable(button));
        assert!(!doc.is_focusable(disabled));
        assert!(doc.is_focusable(link));
        assert!(!doc.is_focusable(hidden));

        doc.set_attribute(div, "tabindex", "-1");
        assert!(doc.is_focusable(div));
        assert_eq!(doc.focusable_descendants(doc.body()), vec![div, button, link]);
        let entries = doc.focus_entries(doc.body());
        assert_eq!(entries[0].tab_index, -1);

        let detached = doc.create_element("button");
        assert!(!doc.focus(detached));
        assert!(doc.focus(button));
        doc.destroy(button);
        assert_eq!(doc.active_element(), None);
    }

    #[test]
    fn observers_receive_filtered_records() {
        let mut doc = doc();
        let el = doc.create_element("div");
        doc.append_child(doc.body(), el);
        let owner = ComponentId::new(3);
        let attrs = doc.observe(owner, el, ObserveOptions::attributes(&["class"]));
        let size = doc.observe(owner, el, ObserveOptions::size());

        doc.set_attribute(el, "title", "ignored");
        doc.add_class(el, "moved");
        doc.set_layout_rect(el, Rect::new(0.0, 0.0, 10.0, 10.0));
        // Same size, new origin: no resize record.
        doc.set_layout_rect(el, Rect::new(5.0, 5.0, 15.0, 15.0));

        let records = doc.take_mutations();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].0, owner);
        assert_eq!(records[0].1.observer, attrs);
        assert!(matches!(
            &records[0].1.kind,
            MutationKind::Attribute { name, old_value: None } if name == "class"
        ));
        assert_eq!(records[1].1.observer, size);

        assert!(doc.disconnect(attrs));
        doc.remove_class(el, "moved");
        assert!(!doc.has_pending_mutations());
    }

    #[test]
    fn query_selector_stays_in_light_tree() {
        let mut doc = doc();
        let host = doc.create_element("div");
        doc.append_child(doc.body(), host);
        let shadow = doc.attach_shadow(host).unwrap();
        let inner = doc.create_element("button");
        doc.set_attribute(inner, "id", "inner");
        doc.append_child(shadow, inner);

        assert_eq!(doc.query_selector(doc.root(), "#inner"), None);
        assert_eq!(doc.query_selector(shadow, "#inner"), Some(inner));
        assert_eq!(doc.query_selector(doc.root(), "div > p"), None);
    }
}
