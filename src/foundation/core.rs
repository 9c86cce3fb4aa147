use crate::foundation::error::{CardError, CardResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Logical canvas size. Layout math runs in these units; the device pixel size is derived from
/// a pixel ratio at surface creation time.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Device pixel size for `pixel_ratio`. Fails when the result is empty or does not fit the
    /// rasterizer's `u16` surface limits.
    pub fn device_size(self, pixel_ratio: f64) -> CardResult<(u16, u16)> {
        if !pixel_ratio.is_finite() || pixel_ratio <= 0.0 {
            return Err(CardError::surface(format!(
                "pixel ratio must be finite and > 0 (got {pixel_ratio})"
            )));
        }
        let w = (self.width * pixel_ratio).round();
        let h = (self.height * pixel_ratio).round();
        if !(w >= 1.0 && h >= 1.0) {
            return Err(CardError::surface("surface size must be at least 1x1"));
        }
        if w > f64::from(u16::MAX) || h > f64::from(u16::MAX) {
            return Err(CardError::surface(format!(
                "surface size {w}x{h} exceeds u16"
            )));
        }
        Ok((w as u16, h as u16))
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8Premul {
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        use crate::foundation::math::mul_div255_u8;

        Self {
            r: mul_div255_u8(u16::from(r), u16::from(a)),
            g: mul_div255_u8(u16::from(g), u16::from(a)),
            b: mul_div255_u8(u16::from(b), u16::from(a)),
            a,
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
