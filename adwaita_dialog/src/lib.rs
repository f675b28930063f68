// Copyright 2025 the Adwaita-web Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adwaita Dialog: modal dialogs sharing one backdrop.
//!
//! - [`Dialog`] renders a title, a content region and a footer into the shadow
//!   tree of its host element and presents them through a native modal. Content
//!   comes from the host's children (`slot="content"`, unslotted, and
//!   `slot="buttons"`); a default "Close" button fills an empty footer.
//! - [`DialogManager`] keeps the stack of open dialogs, shows the shared
//!   backdrop while the stack is non-empty, moves focus into newly opened
//!   dialogs and routes backdrop clicks to the topmost one. Dialogs receive it
//!   as a [`SharedDialogManager`].
//! - [`AlertDialog`], [`AboutDialog`] and [`PreferencesDialog`] wrap a
//!   [`Dialog`] and translate their own configuration into its content.
//!
//! Closing is asynchronous: [`Dialog::close`] hides the modal at once and the
//! dialog reports `close` when the native close completes, one task later.
//!
//! ## Minimal example
//!
//! ```rust
//! use adwaita_dialog::{Dialog, DialogManager};
//! use adwaita_dom::Runtime;
//! use kurbo::Size;
//!
//! let mut rt = Runtime::new(Size::new(800.0, 600.0));
//! let doc = rt.doc_mut();
//! let element = doc.create_element("adw-dialog");
//! doc.set_attribute(element, "title", "Hello");
//! doc.append_child(doc.body(), element);
//!
//! let manager = DialogManager::shared();
//! let id = rt.add(|id, _| Dialog::new(id, element, manager.clone()));
//!
//! rt.with::<Dialog, _>(id, |d, host| d.open(host));
//! assert!(manager.borrow().is_backdrop_visible(rt.doc()));
//!
//! rt.with::<Dialog, _>(id, |d, host| d.close(host));
//! rt.run_pending();
//! assert!(!rt.get::<Dialog>(id).unwrap().is_open());
//! assert!(!manager.borrow().is_backdrop_visible(rt.doc()));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod about;
mod alert;
mod dialog;
mod manager;
mod native;
mod preferences;
pub mod widgets;

pub use about::{AboutDialog, AboutInfo};
pub use alert::{AlertConfig, AlertDialog, Response, ResponseAppearance};
pub use dialog::{CancelEvent, Dialog, DialogConfig, OBSERVED_ATTRIBUTES};
pub use manager::{DialogEntry, DialogManager, SharedDialogManager};
pub use native::NativeModal;
pub use preferences::{PreferencesDialog, PreferencesGroup, PreferencesPage};
