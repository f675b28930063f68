// Copyright 2025 the Adwaita-web Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adwaita Placement: anchored positioning for floating surfaces.
//!
//! This crate answers one question: given the rectangle of an anchor (the
//! *target*), the size of a floating surface (for example a popover panel), a
//! preferred [`Placement`] and the viewport size, where should the surface go?
//!
//! The algorithm is deliberately small and deterministic:
//!
//! 1. The preferred placement is applied. The primary axis sits [`GAP`] away
//!    from the target edge; the cross axis is centered, start-aligned or
//!    end-aligned according to the placement's [`Align`].
//! 2. If the surface would overflow the viewport on the primary axis, it moves
//!    to the mirrored side ([`Placement::flipped`]). This happens once, even
//!    when the mirrored side overflows too. Alignment suffixes are never
//!    flipped and the perpendicular axis is never tried.
//! 3. Both axes are clamped to `[GAP, viewport - surface - GAP]`. When the
//!    surface cannot fit at all, it is pinned to the `GAP` edge.
//!
//! [`arrow_offset`] then places the surface's arrow so it keeps pointing at the
//! target's center.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use adwaita_placement::{compute_position, Placement, Side};
//!
//! // An anchor near the bottom of an 800x600 viewport.
//! let target = Rect::new(100.0, 580.0, 200.0, 600.0);
//! let surface = Size::new(160.0, 200.0);
//!
//! let pos = compute_position(target, surface, Placement::BOTTOM, Size::new(800.0, 600.0));
//!
//! // Not enough room below, so the surface flips above the anchor.
//! assert_eq!(pos.placement.side, Side::Top);
//! assert!(pos.flipped);
//! assert_eq!(pos.origin.y, 580.0 - 200.0 - 8.0);
//! ```
//!
//! Geometry is expressed in [`kurbo`] types in viewport coordinates.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std`.

#![no_std]

use core::fmt;
use core::str::FromStr;

use kurbo::{Point, Rect, Size};

/// Distance between the target edge and the surface on the primary axis, and
/// the minimum margin kept between the surface and the viewport edges.
pub const GAP: f64 = 8.0;

/// Half of the arrow's width along the cross axis.
pub const ARROW_HALF_WIDTH: f64 = 6.0;

/// Minimum distance between the arrow and the surface's corners.
pub const ARROW_MIN_INSET: f64 = 10.0;

/// Side of the target the surface is placed on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Above the target.
    Top,
    /// Below the target.
    Bottom,
    /// Left of the target.
    Left,
    /// Right of the target.
    Right,
}

impl Side {
    /// The mirrored side.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Whether the primary axis of this side is vertical (`Top`/`Bottom`).
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// Attribute spelling of this side.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Cross-axis alignment relative to the target.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Align {
    /// Centered on the target.
    #[default]
    Center,
    /// Aligned with the target's start edge (left or top).
    Start,
    /// Aligned with the target's end edge (right or bottom).
    End,
}

/// One of the twelve anchored placements: a [`Side`] combined with an [`Align`].
///
/// The textual form matches the attribute spelling: `bottom`, `top-start`,
/// `right-end`, and so on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Placement {
    /// Side of the target the surface sits on.
    pub side: Side,
    /// Cross-axis alignment.
    pub align: Align,
}

impl Placement {
    /// `top`
    pub const TOP: Self = Self::new(Side::Top, Align::Center);
    /// `top-start`
    pub const TOP_START: Self = Self::new(Side::Top, Align::Start);
    /// `top-end`
    pub const TOP_END: Self = Self::new(Side::Top, Align::End);
    /// `bottom`
    pub const BOTTOM: Self = Self::new(Side::Bottom, Align::Center);
    /// `bottom-start`
    pub const BOTTOM_START: Self = Self::new(Side::Bottom, Align::Start);
    /// `bottom-end`
    pub const BOTTOM_END: Self = Self::new(Side::Bottom, Align::End);
    /// `left`
    pub const LEFT: Self = Self::new(Side::Left, Align::Center);
    /// `left-start`
    pub const LEFT_START: Self = Self::new(Side::Left, Align::Start);
    /// `left-end`
    pub const LEFT_END: Self = Self::new(Side::Left, Align::End);
    /// `right`
    pub const RIGHT: Self = Self::new(Side::Right, Align::Center);
    /// `right-start`
    pub const RIGHT_START: Self = Self::new(Side::Right, Align::Start);
    /// `right-end`
    pub const RIGHT_END: Self = Self::new(Side::Right, Align::End);

    /// Every placement, in attribute order.
    pub const ALL: [Self; 12] = [
        Self::TOP,
        Self::TOP_START,
        Self::TOP_END,
        Self::BOTTOM,
        Self::BOTTOM_START,
        Self::BOTTOM_END,
        Self::LEFT,
        Self::LEFT_START,
        Self::LEFT_END,
        Self::RIGHT,
        Self::RIGHT_START,
        Self::RIGHT_END,
    ];

    /// Create a placement from its parts.
    pub const fn new(side: Side, align: Align) -> Self {
        Self { side, align }
    }

    /// The placement on the mirrored side, keeping the alignment suffix.
    pub const fn flipped(self) -> Self {
        Self::new(self.side.opposite(), self.align)
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::BOTTOM
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.side.as_str())?;
        match self.align {
            Align::Center => Ok(()),
            Align::Start => f.write_str("-start"),
            Align::End => f.write_str("-end"),
        }
    }
}

/// Error returned when parsing an unknown placement string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsePlacementError;

impl fmt::Display for ParsePlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown placement, expected `<top|bottom|left|right>[-start|-end]`")
    }
}

impl core::error::Error for ParsePlacementError {}

impl FromStr for Placement {
    type Err = ParsePlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (side, align) = match s.split_once('-') {
            Some((side, "start")) => (side, Align::Start),
            Some((side, "end")) => (side, Align::End),
            Some(_) => return Err(ParsePlacementError),
            None => (s, Align::Center),
        };
        let side = match side {
            "top" => Side::Top,
            "bottom" => Side::Bottom,
            "left" => Side::Left,
            "right" => Side::Right,
            _ => return Err(ParsePlacementError),
        };
        Ok(Self::new(side, align))
    }
}

/// Result of [`compute_position`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Position {
    /// Top-left corner of the surface in viewport coordinates.
    pub origin: Point,
    /// Placement that was actually used (the preferred one or its mirror).
    pub placement: Placement,
    /// Whether the preferred placement was flipped.
    pub flipped: bool,
}

impl Position {
    /// The surface rectangle at this position.
    pub fn rect(&self, surface: Size) -> Rect {
        Rect::from_origin_size(self.origin, surface)
    }
}

/// Where the arrow sits on the surface.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ArrowPosition {
    /// Edge of the surface that faces the target.
    pub edge: Side,
    /// Distance of the arrow's center from the surface's left (for `Top`/`Bottom`
    /// edges) or top (for `Left`/`Right` edges).
    pub offset: f64,
}

/// Origin of `surface` for `placement`, without collision handling or clamping.
pub fn place(target: Rect, surface: Size, placement: Placement) -> Point {
    let cross = |start: f64, end: f64, len: f64| match placement.align {
        Align::Center => start + ((end - start) - len) / 2.0,
        Align::Start => start,
        Align::End => end - len,
    };
    match placement.side {
        Side::Top => Point::new(
            cross(target.x0, target.x1, surface.width),
            target.y0 - surface.height - GAP,
        ),
        Side::Bottom => Point::new(cross(target.x0, target.x1, surface.width), target.y1 + GAP),
        Side::Left => Point::new(
            target.x0 - surface.width - GAP,
            cross(target.y0, target.y1, surface.height),
        ),
        Side::Right => Point::new(target.x1 + GAP, cross(target.y0, target.y1, surface.height)),
    }
}

/// Whether a surface at `origin` overflows the viewport on `side`'s primary axis.
fn overflows(origin: Point, surface: Size, side: Side, viewport: Size) -> bool {
    match side {
        Side::Top => origin.y < GAP,
        Side::Bottom => origin.y + surface.height > viewport.height - GAP,
        Side::Left => origin.x < GAP,
        Side::Right => origin.x + surface.width > viewport.width - GAP,
    }
}

fn clamp_axis(value: f64, len: f64, extent: f64) -> f64 {
    // `max` wins over `min` so an oversized surface is pinned to the GAP edge.
    value.min(extent - len - GAP).max(GAP)
}

/// Compute the final position of a floating surface.
///
/// Pure and deterministic: identical inputs always produce identical output.
/// There is no failure case; when nothing fits the surface ends up clamped
/// against the viewport edges.
pub fn compute_position(
    target: Rect,
    surface: Size,
    placement: Placement,
    viewport: Size,
) -> Position {
    let origin = place(target, surface, placement);
    let flipped = overflows(origin, surface, placement.side, viewport);
    let (resolved, origin) = if flipped {
        let mirror = placement.flipped();
        (mirror, place(target, surface, mirror))
    } else {
        (placement, origin)
    };

    let origin = Point::new(
        clamp_axis(origin.x, surface.width, viewport.width),
        clamp_axis(origin.y, surface.height, viewport.height),
    );

    Position {
        origin,
        placement: resolved,
        flipped,
    }
}

/// Compute the arrow position for a surface placed at `origin`.
///
/// The arrow follows the target's center along the cross axis, clamped so it
/// stays [`ARROW_MIN_INSET`] plus [`ARROW_HALF_WIDTH`] away from the surface's
/// corners. Surfaces too small for that inset get a centered arrow.
pub fn arrow_offset(placement: Placement, target: Rect, origin: Point, surface: Size) -> ArrowPosition {
    let center = target.center();
    let (anchor, start, len) = if placement.side.is_vertical() {
        (center.x, origin.x, surface.width)
    } else {
        (center.y, origin.y, surface.height)
    };
    let inset = ARROW_MIN_INSET + ARROW_HALF_WIDTH;
    let offset = if len < 2.0 * inset {
        len / 2.0
    } else {
        (anchor - start).clamp(inset, len - inset)
    };
    ArrowPosition {
        edge: placement.side.opposite(),
        offset,
    }
}
