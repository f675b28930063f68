// Copyright 2025 the Adwaita-web Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adwaita Popover: a floating surface anchored to a target element.
//!
//! A [`Popover`] is a [`Component`](adwaita_dom::Component) that owns one
//! surface's lifecycle:
//! - [`Popover::show`] resolves the target (by selector or direct reference),
//!   moves the surface under `<body>`, reflects the `open` attribute, positions
//!   it with [`adwaita_placement::compute_position`] and installs its global
//!   listeners.
//! - [`Popover::hide`] releases every listener and observer, hides the surface
//!   and returns focus to the target.
//! - While open, a press outside both surface and target closes it (light
//!   dismiss, armed one task after opening), Escape always closes it, Tab cycles
//!   inside the surface, and resize, scroll and target mutations reflow it.
//!
//! ## Minimal example
//!
//! ```rust
//! use adwaita_dom::Runtime;
//! use adwaita_popover::{Popover, PopoverConfig, ShowOutcome, TargetRef};
//! use kurbo::{Rect, Size};
//!
//! let mut rt = Runtime::new(Size::new(800.0, 600.0));
//! let doc = rt.doc_mut();
//! let anchor = doc.create_element("button");
//! doc.append_child(doc.body(), anchor);
//! doc.set_layout_rect(anchor, Rect::new(100.0, 100.0, 200.0, 120.0));
//! let surface = doc.create_element("div");
//! doc.set_layout_rect(surface, Rect::new(0.0, 0.0, 200.0, 80.0));
//!
//! let config = PopoverConfig {
//!     target: Some(TargetRef::Node(anchor)),
//!     ..PopoverConfig::default()
//! };
//! let id = rt.add(|id, _| Popover::with_config(id, surface, config));
//!
//! let outcome = rt.with::<Popover, _>(id, |p, host| p.show(host));
//! assert_eq!(outcome, Some(ShowOutcome::Opened));
//! assert_eq!(rt.doc().style(surface, "top"), Some("128px"));
//! ```
//!
//! Configuration can also be driven by attributes on the surface element
//! (`target`, `placement`, `arrow`, `light-dismiss`, `trap-focus`, `open`)
//! through [`Runtime::set_attribute`](adwaita_dom::Runtime::set_attribute).
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod popover;

pub use config::{OBSERVED_ATTRIBUTES, PopoverConfig, TargetRef};
pub use popover::{Popover, PopoverState, ShowOutcome};
