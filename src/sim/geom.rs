//! Axis-aligned rectangle overlap tests
//!
//! Strict-overlap semantics: rectangles sharing only an edge do not
//! collide. The tests are open-interval on purpose — an entity standing
//! exactly on a segment top does not register a horizontal hit against it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::SimError;

/// An axis-aligned box, positioned at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_corner_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

fn check_finite(name: &str, fields: &[(&str, f32)]) -> Result<(), SimError> {
    for (field, value) in fields {
        if !value.is_finite() {
            return Err(SimError::InvalidArgument(format!(
                "{name}.{field} must be a finite number, got {value}"
            )));
        }
    }
    Ok(())
}

fn check_rect(name: &str, rect: &Rect) -> Result<(), SimError> {
    check_finite(
        name,
        &[
            ("x", rect.x),
            ("y", rect.y),
            ("width", rect.width),
            ("height", rect.height),
        ],
    )
}

/// Full-rect strict overlap.
pub fn overlaps(a: &Rect, b: &Rect) -> Result<bool, SimError> {
    check_rect("a", a)?;
    check_rect("b", b)?;
    Ok(a.right() > b.x && a.x < b.right() && a.bottom() > b.y && a.y < b.bottom())
}

/// Horizontal-span-only strict overlap; y/height are not consulted and
/// therefore not validated.
pub fn overlaps_x(a: &Rect, b: &Rect) -> Result<bool, SimError> {
    check_finite("a", &[("x", a.x), ("width", a.width)])?;
    check_finite("b", &[("x", b.x), ("width", b.width)])?;
    Ok(a.right() > b.x && a.x < b.right())
}

/// Vertical-span-only strict overlap.
pub fn overlaps_y(a: &Rect, b: &Rect) -> Result<bool, SimError> {
    check_finite("a", &[("y", a.y), ("height", a.height)])?;
    check_finite("b", &[("y", b.y), ("height", b.height)])?;
    Ok(a.bottom() > b.y && a.y < b.bottom())
}
