//! Drawing surface over the `vello_cpu` rasterizer and the rendered canvas it produces.
//!
//! All drawing calls take logical coordinates; the pixel-ratio scale is part of the base
//! transform and applied exactly once.

use std::io::Cursor;

use anyhow::Context;
use kurbo::Shape;

use crate::assets::decode::ImagePaint;
use crate::card::model::Card;
use crate::foundation::core::{Affine, BezPath, Canvas, Point};
use crate::foundation::error::{CardError, CardResult};
use crate::foundation::math::{Fnv1a64, unpremul_u8};
use crate::layout::geometry::ResolvedRect;
use crate::render::text::ShapedText;

/// Straight-alpha RGBA8 color.
pub type Rgba = [u8; 4];

pub struct Surface {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
    logical: Canvas,
    pixel_ratio: f64,
    base: Affine,
    layers: usize,
}

impl Surface {
    /// Allocate a surface for `logical` at `pixel_ratio`. This is the only fatal step of a
    /// render: an unusable device size fails with [`CardError::Surface`].
    pub fn new(logical: Canvas, pixel_ratio: f64, background: Rgba) -> CardResult<Self> {
        let (width, height) = logical.device_size(pixel_ratio)?;
        let mut surface = Self {
            ctx: vello_cpu::RenderContext::new(width, height),
            width,
            height,
            logical,
            pixel_ratio,
            base: Affine::scale(pixel_ratio),
            layers: 0,
        };
        if background[3] > 0 {
            let full = ResolvedRect::new(0.0, 0.0, logical.width, logical.height);
            surface.fill_rect(&full, background);
        }
        Ok(surface)
    }

    pub fn logical(&self) -> Canvas {
        self.logical
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    pub fn device_size(&self) -> (u32, u32) {
        (u32::from(self.width), u32::from(self.height))
    }

    /// Device pixels spanned by `logical` units, at least one.
    pub fn device_len(&self, logical: f64) -> u32 {
        let v = (logical * self.pixel_ratio).round();
        if v.is_finite() && v >= 1.0 {
            v.min(f64::from(u16::MAX)) as u32
        } else {
            1
        }
    }

    fn begin(&mut self, local: Affine, color: Rgba) {
        self.ctx.set_transform(affine_to_cpu(self.base * local));
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color[0], color[1], color[2], color[3],
        ));
    }

    pub fn fill_rect(&mut self, r: &ResolvedRect, color: Rgba) {
        if r.is_empty() {
            return;
        }
        self.begin(Affine::IDENTITY, color);
        self.ctx.fill_rect(&rect_to_cpu(r));
    }

    pub fn fill_path(&mut self, path: &BezPath, color: Rgba) {
        self.begin(Affine::IDENTITY, color);
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    pub fn stroke_path(&mut self, path: &BezPath, width: f64, color: Rgba) {
        self.begin(Affine::IDENTITY, color);
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        self.ctx.stroke_path(&bezpath_to_cpu(path));
    }

    pub fn fill_rounded_rect(&mut self, r: &ResolvedRect, radius: f64, color: Rgba) {
        if r.is_empty() {
            return;
        }
        self.fill_path(&rounded_rect_path(r, radius), color);
    }

    pub fn stroke_rounded_rect(&mut self, r: &ResolvedRect, radius: f64, width: f64, color: Rgba) {
        if r.is_empty() {
            return;
        }
        self.stroke_path(&rounded_rect_path(r, radius), width, color);
    }

    /// Restrict drawing to `path` until the matching [`Surface::pop_clip`].
    pub fn push_clip(&mut self, path: &BezPath) {
        self.ctx.set_transform(affine_to_cpu(self.base));
        self.ctx.push_clip_layer(&bezpath_to_cpu(path));
        self.layers += 1;
    }

    pub fn push_clip_rect(&mut self, r: &ResolvedRect) {
        self.push_clip(&r.to_kurbo().to_path(0.1));
    }

    pub fn pop_clip(&mut self) {
        if self.layers > 0 {
            self.ctx.pop_layer();
            self.layers -= 1;
        }
    }

    /// Draw `image` stretched into `dst`.
    pub fn draw_image(&mut self, image: &ImagePaint, dst: &ResolvedRect) {
        if dst.is_empty() || image.width == 0 || image.height == 0 {
            return;
        }
        let local = Affine::translate((dst.x, dst.y))
            * Affine::scale_non_uniform(
                dst.w / f64::from(image.width),
                dst.h / f64::from(image.height),
            );
        self.ctx.set_transform(affine_to_cpu(self.base * local));
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(image.paint.clone());
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(image.width),
            f64::from(image.height),
        ));
    }

    /// Fill `path`, given in the image's pixel space, with `image`, mapped into `dst`.
    pub fn fill_path_with_image(&mut self, path: &BezPath, image: &ImagePaint, dst: &ResolvedRect) {
        if dst.is_empty() || image.width == 0 || image.height == 0 {
            return;
        }
        let local = Affine::translate((dst.x, dst.y))
            * Affine::scale_non_uniform(
                dst.w / f64::from(image.width),
                dst.h / f64::from(image.height),
            );
        self.ctx.set_transform(affine_to_cpu(self.base * local));
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(image.paint.clone());
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    /// Draw shaped text with its layout box's top-left corner at `origin`.
    pub fn draw_text(&mut self, text: &ShapedText, origin: Point) {
        self.draw_text_scaled(text, origin, 1.0);
    }

    /// Draw `text` with its top-left at `origin`, compressed horizontally by `scale_x`.
    pub fn draw_text_scaled(&mut self, text: &ShapedText, origin: Point, scale_x: f64) {
        let placed =
            Affine::translate(origin.to_vec2()) * Affine::scale_non_uniform(scale_x, 1.0);
        self.ctx.set_transform(affine_to_cpu(self.base * placed));
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        for line in text.layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&text.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
    }

    /// Resolve all drawing into a [`CardCanvas`].
    pub fn finish(mut self) -> CardCanvas {
        while self.layers > 0 {
            self.pop_clip();
        }
        self.ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut pixmap);
        CardCanvas {
            width: u32::from(self.width),
            height: u32::from(self.height),
            pixel_ratio: self.pixel_ratio,
            data: pixmap.data_as_u8_slice().to_vec(),
        }
    }
}

/// Rendered card pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct CardCanvas {
    width: u32,
    height: u32,
    pixel_ratio: f64,
    /// Premultiplied RGBA8, row-major.
    data: Vec<u8>,
}

impl CardCanvas {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    /// Size in logical units.
    pub fn logical_size(&self) -> (f64, f64) {
        (
            f64::from(self.width) / self.pixel_ratio,
            f64::from(self.height) / self.pixel_ratio,
        )
    }

    pub fn premul_data(&self) -> &[u8] {
        &self.data
    }

    /// Premultiplied pixel at device coordinates.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Stable 64-bit digest of size and pixels.
    pub fn digest(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        h.write_u32(self.width);
        h.write_u32(self.height);
        h.write_bytes(&self.data);
        h.finish()
    }

    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = px[3];
            for c in &mut px[..3] {
                *c = unpremul_u8(*c, a);
            }
        }
        out
    }

    /// Encode as PNG (straight alpha).
    pub fn to_png(&self) -> CardResult<Vec<u8>> {
        let img = image::RgbaImage::from_raw(self.width, self.height, self.to_straight_rgba8())
            .ok_or_else(|| CardError::asset("canvas buffer does not match its size"))?;
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .context("encode canvas as png")?;
        Ok(buf)
    }

    pub fn save_png(&self, path: &std::path::Path) -> CardResult<()> {
        let bytes = self.to_png()?;
        std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))?;
        Ok(())
    }
}

/// Download name for a rendered card: every non-alphanumeric char becomes `_`.
pub fn download_file_name(card: &Card) -> String {
    let stem: String = card
        .name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{stem}_anime.png")
}

/// Five-point star centred in `r`, first point straight up.
pub(crate) fn star_path(r: &ResolvedRect, inner_ratio: f64) -> BezPath {
    let c = r.center();
    let outer = r.w.min(r.h) * 0.5;
    let inner = outer * inner_ratio;
    let mut path = BezPath::new();
    for i in 0..10 {
        let radius = if i % 2 == 0 { outer } else { inner };
        let angle = -std::f64::consts::FRAC_PI_2 + f64::from(i) * std::f64::consts::PI / 5.0;
        let p = Point::new(c.x + radius * angle.cos(), c.y + radius * angle.sin());
        if i == 0 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
    }
    path.close_path();
    path
}

pub(crate) fn rounded_rect_path(r: &ResolvedRect, radius: f64) -> BezPath {
    kurbo::RoundedRect::new(r.x, r.y, r.right(), r.bottom(), radius).to_path(0.1)
}

fn rect_to_cpu(r: &ResolvedRect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x, r.y, r.right(), r.bottom())
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
