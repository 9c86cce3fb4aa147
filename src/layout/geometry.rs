//! Pure anchor/pivot geometry.
//!
//! Every element position is stored in parent-relative units and resolved against a concrete
//! parent size here. Resolution never clamps: negative offsets, pivots outside `[0, 1]` and
//! oversize elements produce rectangles partially or fully outside the parent.

use crate::config::model::{RectTransform, StarsConfig};
use crate::foundation::core::{Point, Rect};

/// Axis-aligned rectangle in parent pixel units (top-left origin).
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ResolvedRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl ResolvedRect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// `true` when the rectangle has no drawable area. NaN sizes count as empty.
    pub fn is_empty(&self) -> bool {
        !(self.w > 0.0 && self.h > 0.0)
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// Inclusive containment test used for pointer hit testing.
    pub fn contains(&self, p: Point) -> bool {
        !self.is_empty()
            && p.x >= self.x
            && p.x <= self.right()
            && p.y >= self.y
            && p.y <= self.bottom()
    }

    /// Corners in the order top-left, top-right, bottom-left, bottom-right.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x, self.y),
            Point::new(self.right(), self.y),
            Point::new(self.x, self.bottom()),
            Point::new(self.right(), self.bottom()),
        ]
    }

    pub fn to_kurbo(&self) -> Rect {
        Rect::new(self.x, self.y, self.right(), self.bottom())
    }
}

/// Resolve a [`RectTransform`] against a `parent_w` x `parent_h` parent.
///
/// ```text
/// (ax, ay) = anchor unit
/// size     = (w * W, h * H)
/// top-left = (ax*W + x*W - pivot.x*size.w, ay*H + y*H - pivot.y*size.h)
/// ```
pub fn resolve_rect(t: &RectTransform, parent_w: f64, parent_h: f64) -> ResolvedRect {
    let (ax, ay) = t.anchor.unit();
    place(
        ax * parent_w + t.x * parent_w,
        ay * parent_h + t.y * parent_h,
        t.w * parent_w,
        t.h * parent_h,
        t.pivot.x,
        t.pivot.y,
    )
}

/// Width of a star row in parent-width units.
pub fn stars_row_width(stars: &StarsConfig, level: u32) -> f64 {
    if level == 0 {
        return 0.0;
    }
    let n = f64::from(level);
    n * stars.size + (n - 1.0) * stars.gap
}

/// Resolve the bounding box of a `level`-star row.
///
/// Star size and gap are expressed in parent-width units on both axes so stars stay square.
pub fn resolve_stars_rect(
    stars: &StarsConfig,
    level: u32,
    parent_w: f64,
    parent_h: f64,
) -> ResolvedRect {
    let (ax, ay) = stars.anchor.unit();
    place(
        ax * parent_w + stars.x * parent_w,
        ay * parent_h + stars.y * parent_h,
        stars_row_width(stars, level) * parent_w,
        stars.size * parent_w,
        stars.pivot.x,
        stars.pivot.y,
    )
}

/// Per-star boxes of a resolved row, left to right.
pub fn star_slots(
    stars: &StarsConfig,
    level: u32,
    parent_w: f64,
    parent_h: f64,
) -> Vec<ResolvedRect> {
    let row = resolve_stars_rect(stars, level, parent_w, parent_h);
    let size = stars.size * parent_w;
    let step = (stars.size + stars.gap) * parent_w;
    (0..level)
        .map(|i| ResolvedRect::new(row.x + f64::from(i) * step, row.y, size, size))
        .collect()
}

fn place(anchor_x: f64, anchor_y: f64, w: f64, h: f64, pivot_x: f64, pivot_y: f64) -> ResolvedRect {
    ResolvedRect::new(anchor_x - pivot_x * w, anchor_y - pivot_y * h, w, h)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/geometry.rs"]
mod tests;
