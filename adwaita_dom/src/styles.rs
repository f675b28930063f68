// Copyright 2025 the Adwaita-web Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stylesheet loading for components.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::tree::Document;
use crate::types::{NodeId, NodeKind};

/// A named stylesheet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleSheet {
    /// Name used by components, e.g. `"dialog"`.
    pub name: String,
    /// CSS text.
    pub css: String,
}

/// Identifier of a registered stylesheet.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SheetId(u32);

/// How a stylesheet reached a scope.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Adoption {
    /// Adopted as a constructible stylesheet.
    Adopted(SheetId),
    /// Loaded through a freshly created `<link rel="stylesheet">`.
    Linked(NodeId),
    /// The scope already has it.
    AlreadyPresent,
    /// No CSS is registered under that name; the component renders unstyled.
    Missing,
}

/// Registered stylesheets and the scopes that adopted them.
#[derive(Clone, Debug)]
pub struct StyleSheets {
    sheets: Vec<StyleSheet>,
    adopted: Vec<(NodeId, SheetId)>,
    /// Prefix for fallback `<link>` URLs: `{base_url}/{name}.css`.
    pub base_url: String,
}

impl Default for StyleSheets {
    fn default() -> Self {
        Self {
            sheets: Vec::new(),
            adopted: Vec::new(),
            base_url: String::from("/css"),
        }
    }
}

impl StyleSheets {
    /// Register (or replace) a stylesheet.
    pub fn register(&mut self, name: &str, css: &str) -> SheetId {
        if let Some(i) = self.sheets.iter().position(|s| s.name == name) {
            self.sheets[i].css = String::from(css);
            return Self::id(i);
        }
        self.sheets.push(StyleSheet {
            name: String::from(name),
            css: String::from(css),
        });
        Self::id(self.sheets.len() - 1)
    }

    fn id(index: usize) -> SheetId {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Stylesheet counts are tiny."
        )]
        let index = index as u32;
        SheetId(index)
    }

    /// Look up a stylesheet by name.
    pub fn get(&self, name: &str) -> Option<&StyleSheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Sheets adopted into `scope`.
    pub fn adopted_in(&self, scope: NodeId) -> impl Iterator<Item = &StyleSheet> + '_ {
        self.adopted
            .iter()
            .filter(move |(s, _)| *s == scope)
            .filter_map(|(_, id)| self.sheets.get(id.0 as usize))
    }

    /// Make the named stylesheet available in `scope` (a shadow root or the document root).
    ///
    /// With constructible stylesheets the sheet is adopted directly. Otherwise a
    /// `<link>` is appended to the shadow root, or to `<head>` for document scope.
    pub fn adopt(
        &mut self,
        doc: &mut Document,
        scope: NodeId,
        name: &str,
        constructible: bool,
    ) -> Adoption {
        let Some(index) = self.sheets.iter().position(|s| s.name == name && !s.css.is_empty())
        else {
            tracing::warn!(name, "stylesheet not found; component renders unstyled");
            return Adoption::Missing;
        };
        let id = Self::id(index);
        if constructible {
            if self.adopted.contains(&(scope, id)) {
                return Adoption::AlreadyPresent;
            }
            self.adopted.push((scope, id));
            return Adoption::Adopted(id);
        }

        let container = if doc.kind(scope) == Some(NodeKind::ShadowRoot) {
            scope
        } else {
            doc.head()
        };
        let href = format!("{}/{name}.css", self.base_url);
        let existing = doc
            .children_of(container)
            .iter()
            .any(|&c| doc.tag(c) == Some("link") && doc.attribute(c, "href") == Some(href.as_str()));
        if existing {
            return Adoption::AlreadyPresent;
        }
        let link = doc.create_element("link");
        doc.set_attribute(link, "rel", "stylesheet");
        doc.set_attribute(link, "href", &href);
        doc.append_child(container, link);
        tracing::debug!(name, href = href.as_str(), "linked stylesheet");
        Adoption::Linked(link)
    }
}
