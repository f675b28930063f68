// Copyright 2025 the Adwaita-web Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Button and icon factories used by dialogs.

use adwaita_dom::{Document, NodeId};

/// Visual style of a button.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ButtonAppearance {
    /// Regular button.
    #[default]
    Default,
    /// Borderless button.
    Flat,
    /// Accent-colored call to action.
    Suggested,
    /// Red, for irreversible actions.
    Destructive,
}

impl ButtonAppearance {
    /// Style class for this appearance, if any.
    pub const fn class(self) -> Option<&'static str> {
        match self {
            Self::Default => None,
            Self::Flat => Some("flat"),
            Self::Suggested => Some("suggested-action"),
            Self::Destructive => Some("destructive-action"),
        }
    }
}

/// What to build with [`create_button`].
#[derive(Copy, Clone, Debug, Default)]
pub struct ButtonSpec<'a> {
    /// Visible label. May be empty for icon-only buttons.
    pub label: &'a str,
    /// Visual style.
    pub appearance: ButtonAppearance,
    /// Accessible name, required when `label` is empty.
    pub accessible_label: Option<&'a str>,
    /// Symbolic icon shown before the label.
    pub icon: Option<&'a str>,
}

impl<'a> ButtonSpec<'a> {
    /// A default-styled button with a visible label.
    pub fn labeled(label: &'a str) -> Self {
        Self {
            label,
            ..Self::default()
        }
    }
}

/// Create a detached `button.adw-button`.
///
/// Clicks are observed by the owning component matching the button in the
/// event path.
pub fn create_button(doc: &mut Document, spec: &ButtonSpec<'_>) -> NodeId {
    let button = doc.create_element("button");
    doc.set_attribute(button, "type", "button");
    doc.add_class(button, "adw-button");
    if let Some(class) = spec.appearance.class() {
        doc.add_class(button, class);
    }
    if let Some(icon) = spec.icon {
        let icon = create_icon(doc, icon);
        doc.append_child(button, icon);
    }
    if !spec.label.is_empty() {
        let label = doc.create_element("span");
        doc.add_class(label, "adw-button-label");
        doc.set_text(label, spec.label);
        doc.append_child(button, label);
    }
    if let Some(name) = spec.accessible_label {
        doc.set_attribute(button, "aria-label", name);
    }
    button
}

/// Create a detached `span.adw-icon` for a symbolic icon name.
pub fn create_icon(doc: &mut Document, name: &str) -> NodeId {
    let icon = doc.create_element("span");
    doc.add_class(icon, "adw-icon");
    doc.set_attribute(icon, "data-icon-name", name);
    doc.set_attribute(icon, "aria-hidden", "true");
    icon
}

/// Whether an element has an accessible name: a non-empty `aria-label`, or
/// text somewhere in its light subtree.
pub fn has_accessible_name(doc: &Document, node: NodeId) -> bool {
    if doc
        .attribute(node, "aria-label")
        .is_some_and(|l| !l.trim().is_empty())
    {
        return true;
    }
    if doc.text(node).is_some_and(|t| !t.trim().is_empty()) {
        return true;
    }
    doc.children_of(node)
        .iter()
        .any(|&child| doc.attribute(child, "aria-hidden") != Some("true") && has_accessible_name(doc, child))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;

    #[test]
    fn buttons_carry_classes_label_and_icon() {
        let mut doc = Document::new(Size::new(100.0, 100.0));
        let button = create_button(
            &mut doc,
            &ButtonSpec {
                label: "Delete",
                appearance: ButtonAppearance::Destructive,
                icon: Some("user-trash-symbolic"),
                ..ButtonSpec::default()
            },
        );
        assert_eq!(doc.tag(button), Some("button"));
        assert!(doc.has_class(button, "adw-button"));
        assert!(doc.has_class(button, "destructive-action"));
        let icon = doc.children_of(button)[0];
        assert_eq!(doc.attribute(icon, "data-icon-name"), Some("user-trash-symbolic"));
        assert!(has_accessible_name(&doc, button));
    }

    #[test]
    fn icon_only_buttons_need_a_label() {
        let mut doc = Document::new(Size::new(100.0, 100.0));
        let bare = create_button(
            &mut doc,
            &ButtonSpec {
                icon: Some("window-close-symbolic"),
                ..ButtonSpec::default()
            },
        );
        assert!(!has_accessible_name(&doc, bare));

        let named = create_button(
            &mut doc,
            &ButtonSpec {
                icon: Some("window-close-symbolic"),
                accessible_label: Some("Close"),
                ..ButtonSpec::default()
            },
        );
        assert!(has_accessible_name(&doc, named));
    }
}
