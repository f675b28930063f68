// Copyright 2025 the Adwaita-web Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adwaita DOM: the explicit host environment Adwaita components render into.
//!
//! Components never reach for ambient globals. Everything they touch lives in a
//! [`Host`]:
//! - a [`Document`] of elements, shadow roots and slots, with attributes, inline
//!   styles, host-supplied layout rectangles and focus;
//! - a [`Scheduler`] of microtasks, timers and animation frames;
//! - a [`Listeners`] registry routing [`Event`]s through the composed path;
//! - [`StyleSheets`] adopted per scope, an [`IdGenerator`] and the platform
//!   [`Capabilities`].
//!
//! A [`Runtime`] owns the host and a set of [`Component`]s, feeds input into the
//! tree and runs deferred work at well-defined points, so behavior that depends
//! on task boundaries (for example "ignore the click that opened me") is
//! deterministic and testable.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use adwaita_dom::{Component, Host, NodeId, Runtime};
//!
//! struct Badge {
//!     element: NodeId,
//! }
//!
//! impl Component for Badge {
//!     fn element(&self) -> NodeId {
//!         self.element
//!     }
//!
//!     fn mount(&mut self, host: &mut Host) {
//!         host.doc.add_class(self.element, "badge");
//!     }
//! }
//!
//! let mut rt = Runtime::new(Size::new(640.0, 480.0));
//! let element = rt.doc_mut().create_element("span");
//! let body = rt.doc().body();
//! rt.doc_mut().append_child(body, element);
//! rt.add(|_, _| Badge { element });
//!
//! assert!(rt.doc().has_class(element, "badge"));
//! ```
//!
//! Node identifiers are generational: a [`NodeId`] of a destroyed element is
//! simply stale, so components can hold them without keeping nodes alive.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod component;
mod event;
mod host;
mod listeners;
mod observer;
pub mod press;
mod runtime;
mod scheduler;
mod selector;
mod signal;
mod styles;
mod tree;
mod types;

pub use component::{Component, ComponentId, parse_bool_attribute};
pub use event::{Event, EventKind, Key, Modifiers};
pub use host::{Capabilities, Host, IdGenerator};
pub use listeners::{ListenerId, ListenerTarget, Listeners};
pub use observer::{MutationKind, MutationRecord, ObserveOptions, ObserverId};
pub use runtime::Runtime;
pub use scheduler::{Scheduler, Task, TaskId, TaskTag};
pub use signal::{HandlerId, Signal};
pub use styles::{Adoption, SheetId, StyleSheet, StyleSheets};
pub use tree::{ComposedPath, Document};
pub use types::{ElementFlags, NodeId, NodeKind};
