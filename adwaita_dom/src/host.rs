// Copyright 2025 the Adwaita-web Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared environment handed to every component hook.

use alloc::format;
use alloc::string::String;

use kurbo::Size;

use crate::listeners::Listeners;
use crate::scheduler::Scheduler;
use crate::styles::StyleSheets;
use crate::tree::Document;

/// Optional platform features. Components degrade when one is missing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Capabilities {
    /// Attribute and child-list observation is available.
    pub mutation_observer: bool,
    /// Size observation is available.
    pub resize_observer: bool,
    /// Stylesheets can be adopted without `<link>` elements.
    pub constructible_stylesheets: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            mutation_observer: true,
            resize_observer: true,
            constructible_stylesheets: true,
        }
    }
}

impl Capabilities {
    /// No optional features.
    pub const fn none() -> Self {
        Self {
            mutation_observer: false,
            resize_observer: false,
            constructible_stylesheets: false,
        }
    }
}

/// Monotonic element-id source: `adw-<prefix>-<n>`.
#[derive(Clone, Debug, Default)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    /// Next unique id with the given prefix.
    pub fn next(&mut self, prefix: &str) -> String {
        self.next += 1;
        format!("adw-{prefix}-{}", self.next)
    }
}

/// Everything a component may touch: the document, timers, listeners and stylesheets.
#[derive(Debug)]
pub struct Host {
    /// The render tree.
    pub doc: Document,
    /// Deferred work.
    pub scheduler: Scheduler,
    /// Event listeners.
    pub listeners: Listeners,
    /// Stylesheet registry.
    pub styles: StyleSheets,
    /// Element id source.
    pub ids: IdGenerator,
    /// Optional platform features.
    pub capabilities: Capabilities,
}

impl Host {
    /// A host over an empty document with every capability.
    pub fn new(viewport: Size) -> Self {
        Self::with_capabilities(viewport, Capabilities::default())
    }

    /// A host over an empty document with the given capabilities.
    pub fn with_capabilities(viewport: Size, capabilities: Capabilities) -> Self {
        Self {
            doc: Document::new(viewport),
            scheduler: Scheduler::default(),
            listeners: Listeners::default(),
            styles: StyleSheets::default(),
            ids: IdGenerator::default(),
            capabilities,
        }
    }
}
