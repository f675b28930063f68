// Copyright 2025 the Adwaita-web Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Where a 200×120 surface lands for every placement around a few anchors.
//!
//! Anchors near the viewport edges show the single flip and the clamp.
//!
//! Run:
//! - `cargo run -p adwaita_demos --example placement_table`

use adwaita_placement::{Placement, arrow_offset, compute_position};
use kurbo::{Rect, Size};

fn main() {
    let viewport = Size::new(800.0, 600.0);
    let surface = Size::new(200.0, 120.0);
    let anchors = [
        ("center", Rect::new(350.0, 280.0, 450.0, 300.0)),
        ("bottom edge", Rect::new(100.0, 580.0, 200.0, 600.0)),
        ("top-left corner", Rect::new(0.0, 0.0, 40.0, 20.0)),
    ];

    for (name, target) in anchors {
        println!("anchor: {name} {target:?}");
        for placement in Placement::ALL {
            let position = compute_position(target, surface, placement, viewport);
            let arrow = arrow_offset(position.placement, target, position.origin, surface);
            println!(
                "  {:<12} -> {:<12} at ({:>5.1}, {:>5.1}){} arrow {} {:.1}",
                placement.to_string(),
                position.placement.to_string(),
                position.origin.x,
                position.origin.y,
                if position.flipped { " flipped" } else { "" },
                arrow.edge.as_str(),
                arrow.offset,
            );
        }
    }
}
