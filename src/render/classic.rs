use crate::assets::catalog::proxied_request;
use crate::assets::fetch::AssetFetcher;
use crate::card::model::Card;
use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::CardResult;
use crate::layout::geometry::ResolvedRect;
use crate::render::card::{CardRenderer, draw_procedural_stars, radial_star_gradient};
use crate::render::surface::{CardCanvas, Rgba, Surface, rounded_rect_path};
use crate::render::text::{FontSpec, TextBrushRgba8, TextEngine, wrap_text};

pub const CLASSIC_WIDTH: f64 = 420.0;
pub const CLASSIC_HEIGHT: f64 = 610.0;
pub const CLASSIC_CANVAS: Canvas = Canvas::new(CLASSIC_WIDTH, CLASSIC_HEIGHT);

const MARGIN: f64 = 16.0;
const TEXT_INSET: f64 = 26.0;
const ARTWORK_HEIGHT: f64 = 280.0;
const DESC_HEIGHT: f64 = 90.0;
const DESC_LINE_HEIGHT: f64 = 14.0;
const STAR_SIZE: f64 = 18.0;
const BLACK: Rgba = [0, 0, 0, 255];

/// Body colours of the classic card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClassicStyle {
    pub background: Rgba,
    pub border: Rgba,
    pub is_monster: bool,
}

const SPELL_STYLE: ClassicStyle = ClassicStyle {
    background: [0x1d, 0x9e, 0x5a, 255],
    border: [0x15, 0x7a, 0x45, 255],
    is_monster: false,
};

/// Colours for `card`'s type line. Unknown types use the spell colours.
pub fn classic_style(card: &Card) -> ClassicStyle {
    let t = card.card_type.to_lowercase();
    if t.contains("monster") {
        let has_effect = [
            "effect", "fusion", "synchro", "xyz", "link", "ritual", "pendulum",
        ]
        .iter()
        .any(|kw| t.contains(kw));
        return if has_effect {
            ClassicStyle {
                background: [0xff, 0x8c, 0x00, 255],
                border: [0xcc, 0x70, 0x00, 255],
                is_monster: true,
            }
        } else {
            ClassicStyle {
                background: [0xff, 0xd7, 0x00, 255],
                border: [0xcc, 0xac, 0x00, 255],
                is_monster: true,
            }
        };
    }
    if t.contains("spell") || t.contains("magic") {
        return SPELL_STYLE;
    }
    if t.contains("trap") {
        return ClassicStyle {
            background: [0xbc, 0x5a, 0x84, 255],
            border: [0x9a, 0x4a, 0x6c, 255],
            is_monster: false,
        };
    }
    SPELL_STYLE
}

/// `ATK/x    DEF/y`, leaving out undefined stats.
pub fn stats_line(card: &Card) -> String {
    let mut parts = Vec::new();
    if let Some(atk) = card.atk {
        parts.push(format!("ATK/{atk}"));
    }
    if let Some(def) = card.def {
        parts.push(format!("DEF/{def}"));
    }
    parts.join("    ")
}

impl<F: AssetFetcher> CardRenderer<F> {
    /// Render the simpler non-layered card variant.
    ///
    /// Text that cannot be drawn (no font) and artwork that cannot be loaded leave their boxes
    /// empty; only surface creation fails the call.
    #[tracing::instrument(skip(self, card), fields(card_id = card.id, card = %card.name))]
    pub async fn render_classic_card(&mut self, card: &Card) -> CardResult<CardCanvas> {
        let style = classic_style(card);
        let (fetcher, cache, text, settings) = self.parts();
        let mut surface = Surface::new(
            CLASSIC_CANVAS,
            settings.pixel_ratio,
            settings.background_rgba,
        )?;
        let full_w = CLASSIC_WIDTH - 2.0 * MARGIN;

        surface.fill_rounded_rect(
            &ResolvedRect::new(0.0, 0.0, CLASSIC_WIDTH, CLASSIC_HEIGHT),
            16.0,
            style.background,
        );
        surface.stroke_rounded_rect(
            &ResolvedRect::new(2.0, 2.0, CLASSIC_WIDTH - 4.0, CLASSIC_HEIGHT - 4.0),
            14.0,
            4.0,
            style.border,
        );

        surface.fill_rounded_rect(
            &ResolvedRect::new(MARGIN, MARGIN, full_w, 44.0),
            8.0,
            [255, 255, 255, 102],
        );
        let mut texts = TextPainter {
            engine: text,
            surface: &mut surface,
        };
        let white = [255, 255, 255, 255];
        let name_width = CLASSIC_WIDTH - 2.0 * TEXT_INSET;
        texts.fitted(&card.name, FontSpec::SANS_BOLD, 22.0, BLACK, TEXT_INSET, 46.0, name_width);

        let mut artwork_y = 70.0;
        let level = card.level.unwrap_or(0);
        if style.is_monster && level > 0 {
            let n = f64::from(level);
            let row_w = n * STAR_SIZE + (n - 1.0) * 2.0;
            let x0 = (CLASSIC_WIDTH - row_w) / 2.0;
            let slots: Vec<ResolvedRect> = (0..level)
                .map(|i| {
                    let x = x0 + f64::from(i) * (STAR_SIZE + 2.0);
                    ResolvedRect::new(x, 68.0, STAR_SIZE, STAR_SIZE)
                })
                .collect();
            match radial_star_gradient(32) {
                Ok(gradient) => draw_procedural_stars(texts.surface, &slots, &gradient),
                Err(e) => tracing::warn!(error = %e, "star gradient unavailable"),
            }
            artwork_y = 92.0;
        }

        let frame = ResolvedRect::new(MARGIN, artwork_y, full_w, ARTWORK_HEIGHT);
        texts.surface.fill_rounded_rect(&frame, 12.0, [0, 0, 0, 77]);
        let inner = ResolvedRect::new(
            frame.x + 4.0,
            frame.y + 4.0,
            frame.w - 8.0,
            frame.h - 8.0,
        );
        match card.cropped_image_url() {
            Some(url) => {
                let req = proxied_request(url);
                let loaded = match cache.load(fetcher, &req).await {
                    Ok(entry) => entry.paint(
                        texts.surface.device_len(inner.w),
                        texts.surface.device_len(inner.h),
                    ),
                    Err(e) => Err(e),
                };
                match loaded {
                    Ok(paint) => {
                        texts.surface.push_clip(&rounded_rect_path(&inner, 10.0));
                        texts.surface.draw_image(&paint, &inner);
                        texts.surface.pop_clip();
                    }
                    Err(e) => tracing::warn!(url = %req.url, error = %e, "artwork failed"),
                }
            }
            None => tracing::warn!("card has no cropped artwork"),
        }

        let type_y = artwork_y + ARTWORK_HEIGHT + 12.0;
        texts.surface.fill_rounded_rect(
            &ResolvedRect::new(MARGIN, type_y, full_w, 28.0),
            6.0,
            [0, 0, 0, 77],
        );
        let type_baseline = type_y + 19.0;
        let type_line = card.card_type.to_uppercase();
        texts.left(&type_line, FontSpec::SANS_BOLD, 12.0, white, TEXT_INSET, type_baseline);
        if let Some(attr) = &card.attribute {
            let attr = attr.to_uppercase();
            let right = CLASSIC_WIDTH - TEXT_INSET;
            texts.right(&attr, FontSpec::SANS_BOLD, 12.0, white, right, type_baseline);
        }

        let desc_y = type_y + 38.0;
        texts.surface.fill_rounded_rect(
            &ResolvedRect::new(MARGIN, desc_y, full_w, DESC_HEIGHT),
            8.0,
            [255, 255, 255, 230],
        );
        texts.wrapped(&card.desc, desc_y + 18.0, DESC_HEIGHT - 20.0);

        if style.is_monster {
            let stats_y = desc_y + DESC_HEIGHT + 10.0;
            texts.surface.fill_rounded_rect(
                &ResolvedRect::new(MARGIN, stats_y, full_w, 32.0),
                6.0,
                [0, 0, 0, 102],
            );
            let right = CLASSIC_WIDTH - TEXT_INSET;
            texts.right(&stats_line(card), FontSpec::SANS_BOLD, 14.0, white, right, stats_y + 22.0);
        }

        texts.right(
            &card.id.to_string(),
            FontSpec::SANS_BOLD,
            11.0,
            [0, 0, 0, 128],
            CLASSIC_WIDTH - MARGIN,
            CLASSIC_HEIGHT - 12.0,
        );

        Ok(surface.finish())
    }
}

/// Horizontal scale that fits a `width` wide run into `max_width`; never enlarges.
pub(crate) fn fit_scale(width: f64, max_width: f64) -> f64 {
    if width > max_width && width > 0.0 && max_width > 0.0 {
        max_width / width
    } else {
        1.0
    }
}

/// Baseline-positioned text drawing. Failures are logged and skipped.
struct TextPainter<'a> {
    engine: &'a mut TextEngine,
    surface: &'a mut Surface,
}

impl TextPainter<'_> {
    #[allow(clippy::too_many_arguments)]
    fn draw(
        &mut self,
        text: &str,
        spec: FontSpec,
        size: f64,
        color: Rgba,
        x: f64,
        baseline: f64,
        right: bool,
        max_width: Option<f64>,
    ) {
        if text.is_empty() {
            return;
        }
        match self.engine.shape(text, spec, size as f32, TextBrushRgba8::rgba(color)) {
            Ok(shaped) => {
                let scale_x = max_width.map_or(1.0, |m| fit_scale(shaped.width, m));
                let width = shaped.width * scale_x;
                // Approximate the ascent from the em size; layouts have no leading here.
                let top = baseline - size * 0.8;
                let left = if right { x - width } else { x };
                self.surface
                    .draw_text_scaled(&shaped, Point::new(left, top), scale_x);
            }
            Err(e) => tracing::warn!(error = %e, "text skipped"),
        }
    }

    fn left(&mut self, text: &str, spec: FontSpec, size: f64, color: Rgba, x: f64, baseline: f64) {
        self.draw(text, spec, size, color, x, baseline, false, None);
    }

    /// Left-aligned text squeezed horizontally to at most `max_width`.
    #[allow(clippy::too_many_arguments)]
    fn fitted(
        &mut self,
        text: &str,
        spec: FontSpec,
        size: f64,
        color: Rgba,
        x: f64,
        baseline: f64,
        max_width: f64,
    ) {
        self.draw(text, spec, size, color, x, baseline, false, Some(max_width));
    }

    fn right(&mut self, text: &str, spec: FontSpec, size: f64, color: Rgba, x: f64, baseline: f64) {
        self.draw(text, spec, size, color, x, baseline, true, None);
    }

    fn wrapped(&mut self, text: &str, first_baseline: f64, max_height: f64) {
        let spec = FontSpec::SANS;
        let size = 12.0;
        let engine = &mut *self.engine;
        let lines = wrap_text(
            |s| engine.measure(s, spec, size as f32).unwrap_or(0.0),
            text,
            first_baseline,
            CLASSIC_WIDTH - 2.0 * TEXT_INSET,
            DESC_LINE_HEIGHT,
            max_height,
        );
        for line in lines {
            self.left(&line.text, spec, size, BLACK, TEXT_INSET, line.y);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/classic.rs"]
mod tests;
