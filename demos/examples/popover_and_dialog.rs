// Copyright 2025 the Adwaita-web Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A popover menu that opens a confirmation alert.
//!
//! This example drives both controllers against the in-memory document:
//! - a menu button anchors a popover that is positioned, light-dismissed and
//!   focus-trapped,
//! - a menu entry opens an alert whose response is reported once it closed.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p adwaita_demos --example popover_and_dialog`

use std::cell::RefCell;
use std::rc::Rc;

use adwaita_dialog::{AlertConfig, AlertDialog, DialogManager, Response, ResponseAppearance};
use adwaita_dom::{Key, Modifiers, Runtime};
use adwaita_popover::{Popover, PopoverConfig, TargetRef};
use kurbo::{Point, Rect, Size};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut rt = Runtime::new(Size::new(800.0, 600.0));
    rt.host_mut()
        .styles
        .register("popover", ".popover { position: fixed; }");

    // Markup: a header bar with a menu button, a menu surface and an alert host.
    let doc = rt.doc_mut();
    let body = doc.body();
    let menu_button = doc.create_element("button");
    doc.set_attribute(menu_button, "id", "menu-button");
    doc.set_text(menu_button, "Menu");
    doc.append_child(body, menu_button);
    doc.set_layout_rect(menu_button, Rect::new(740.0, 8.0, 780.0, 40.0));

    let menu = doc.create_element("div");
    doc.set_layout_rect(menu, Rect::new(0.0, 0.0, 180.0, 96.0));
    let delete = doc.create_element("button");
    doc.set_text(delete, "Delete All Files…");
    doc.append_child(menu, delete);
    let about = doc.create_element("button");
    doc.set_text(about, "About");
    doc.append_child(menu, about);

    let alert_host = doc.create_element("adw-alert-dialog");
    doc.append_child(body, alert_host);

    let popover = rt.add(|id, _| {
        Popover::with_config(
            id,
            menu,
            PopoverConfig {
                target: Some(TargetRef::Selector(String::from("#menu-button"))),
                ..PopoverConfig::default()
            },
        )
    });

    let manager = DialogManager::shared();
    let alert = rt.add(|id, _| {
        AlertDialog::new(
            id,
            alert_host,
            Rc::clone(&manager),
            AlertConfig {
                heading: String::from("Delete All Files?"),
                body: String::from("Deleted files cannot be restored."),
                responses: vec![
                    Response::new("cancel", "Cancel"),
                    Response::new("delete", "Delete")
                        .with_appearance(ResponseAppearance::Destructive),
                ],
                default_response: Some(String::from("cancel")),
                ..AlertConfig::default()
            },
        )
    });
    let responses = Rc::new(RefCell::new(Vec::new()));
    {
        let responses = Rc::clone(&responses);
        rt.with::<AlertDialog, _>(alert, move |a, _| {
            a.on_response()
                .connect(move |r| responses.borrow_mut().push(r.clone()));
        });
    }

    // Open the menu from the button press.
    rt.click(menu_button);
    rt.with::<Popover, _>(popover, |p, host| p.show(host));
    let position = rt.get::<Popover>(popover).and_then(Popover::position);
    println!("menu placed at {position:?}");
    println!(
        "menu style: top={:?} left={:?}",
        rt.doc().style(menu, "top"),
        rt.doc().style(menu, "left")
    );

    // Tab wraps inside the open menu.
    rt.key_down(Key::Tab, Modifiers::empty());
    rt.key_down(Key::Tab, Modifiers::empty());
    println!("focus after two tabs: {:?}", rt.doc().active_element());

    // A press outside dismisses the menu, then the alert opens.
    rt.run_pending();
    rt.pointer_down(alert_host, Point::ZERO);
    rt.with::<AlertDialog, _>(alert, |a, host| a.open(host));
    println!(
        "menu open: {}, alert open: {}, backdrop visible: {}",
        rt.get::<Popover>(popover).is_some_and(Popover::is_open),
        rt.get::<AlertDialog>(alert).is_some_and(AlertDialog::is_open),
        manager.borrow().is_backdrop_visible(rt.doc())
    );

    // Confirm with the destructive response.
    if let Some(button) = rt
        .get::<AlertDialog>(alert)
        .and_then(|a| a.response_button("delete"))
    {
        rt.click(button);
    }
    rt.run_pending();
    println!("alert responses: {:?}", responses.borrow());
    println!(
        "backdrop visible after close: {}",
        manager.borrow().is_backdrop_visible(rt.doc())
    );
}
