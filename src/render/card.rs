//! Layered card compositor.
//!
//! A render builds the layer list for a card, stable-sorts it by z-index and draws the layers
//! strictly one after another. Each layer awaits its own asset fetch before the next layer
//! starts. Asset failures are contained in their layer; only surface creation is fatal.

use std::path::PathBuf;

use crate::assets::cache::ImageCache;
use crate::assets::catalog::{
    AssetRequest, LEVEL_STAR_ICON, attribute_icon, frame_asset, proxied_request,
};
use crate::assets::decode::{ImagePaint, PreparedImage};
use crate::assets::fetch::AssetFetcher;
use crate::card::model::Card;
use crate::config::model::AnimeCardConfig;
use crate::foundation::core::{Canvas, Point, Rgba8Premul};
use crate::foundation::error::{CardError, CardResult};
use crate::layout::geometry::{ResolvedRect, resolve_rect, resolve_stars_rect, star_slots};
use crate::render::surface::{CardCanvas, Rgba, Surface, star_path};
use crate::render::text::{FontSpec, TextBrushRgba8, TextEngine};

/// Logical card width.
pub const CARD_WIDTH: f64 = 420.0;
/// Logical card height (63:88 with [`CARD_WIDTH`]).
pub const CARD_HEIGHT: f64 = 586.0;
/// Logical canvas of the layered renderer.
pub const CARD_CANVAS: Canvas = Canvas::new(CARD_WIDTH, CARD_HEIGHT);

/// Opaque fill drawn in place of artwork that failed to load.
pub const ARTWORK_PLACEHOLDER: Rgba = [40, 40, 48, 255];
/// Text drawn for an undefined ATK or DEF.
pub const UNKNOWN_STAT: &str = "?";

const STAT_COLOR: Rgba = [255, 255, 255, 255];
const STAR_STROKE: Rgba = [150, 90, 0, 255];
const STAR_STROKE_WIDTH: f64 = 1.0;
const STAR_GRADIENT_PX: u32 = 64;

/// Renderer options.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderSettings {
    /// Device pixels per logical unit.
    pub pixel_ratio: f64,
    /// Directory searched for fonts before system fonts.
    pub font_dir: Option<PathBuf>,
    /// Straight RGBA8 fill applied before the first layer; transparent by default.
    pub background_rgba: [u8; 4],
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            pixel_ratio: 2.0,
            font_dir: None,
            background_rgba: [0, 0, 0, 0],
        }
    }
}

/// Card layer, in construction order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Artwork,
    Frame,
    Stars,
    Attribute,
    Atk,
    Def,
}

/// How a layer ended.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "lowercase")]
pub enum LayerOutcome {
    /// Drawn from its primary asset.
    Drawn,
    /// Primary asset failed; a substitute was drawn.
    Fallback(String),
    /// Resolved to an empty rectangle; nothing drawn.
    Skipped,
    /// Asset failed and nothing was drawn.
    Failed(String),
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayerReport {
    pub kind: LayerKind,
    pub z_index: i32,
    pub rect: ResolvedRect,
    pub outcome: LayerOutcome,
}

/// Per-layer manifest of one render, in draw order.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderReport {
    pub layers: Vec<LayerReport>,
}

impl RenderReport {
    pub fn layer(&self, kind: LayerKind) -> Option<&LayerReport> {
        self.layers.iter().find(|l| l.kind == kind)
    }

    pub fn order(&self) -> Vec<LayerKind> {
        self.layers.iter().map(|l| l.kind).collect()
    }

    pub fn failures(&self) -> usize {
        self.layers
            .iter()
            .filter(|l| matches!(l.outcome, LayerOutcome::Failed(_) | LayerOutcome::Fallback(_)))
            .count()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PlannedLayer {
    pub(crate) kind: LayerKind,
    pub(crate) z_index: i32,
}

/// Layer list for `card`, stable-sorted by z-index.
pub(crate) fn plan_layers(card: &Card, config: &AnimeCardConfig) -> Vec<PlannedLayer> {
    let mut layers = vec![
        PlannedLayer {
            kind: LayerKind::Artwork,
            z_index: config.artwork.z_index,
        },
        PlannedLayer {
            kind: LayerKind::Frame,
            z_index: config.layout.z_index,
        },
    ];
    if card.star_level() > 0 {
        layers.push(PlannedLayer {
            kind: LayerKind::Stars,
            z_index: config.stars.z_index,
        });
    }
    if attribute_icon(card).is_some() {
        layers.push(PlannedLayer {
            kind: LayerKind::Attribute,
            z_index: config.attribute.z_index,
        });
    }
    if card.is_monster() {
        layers.push(PlannedLayer {
            kind: LayerKind::Atk,
            z_index: config.atk.z_index,
        });
        layers.push(PlannedLayer {
            kind: LayerKind::Def,
            z_index: config.def.z_index,
        });
    }
    // `sort_by_key` is stable: equal z keeps construction order.
    layers.sort_by_key(|l| l.z_index);
    layers
}

/// Resolved rectangle of a layer on the logical canvas.
pub fn layer_rect(kind: LayerKind, card: &Card, config: &AnimeCardConfig) -> ResolvedRect {
    let (w, h) = (CARD_CANVAS.width, CARD_CANVAS.height);
    match kind {
        LayerKind::Artwork => resolve_rect(&config.artwork, w, h),
        LayerKind::Frame => resolve_rect(&config.layout, w, h),
        LayerKind::Stars => resolve_stars_rect(&config.stars, card.star_level(), w, h),
        LayerKind::Attribute => resolve_rect(&config.attribute, w, h),
        LayerKind::Atk => resolve_rect(&config.atk, w, h),
        LayerKind::Def => resolve_rect(&config.def, w, h),
    }
}

/// Aspect-fill placement of an `img_w` x `img_h` image over `target`, centred.
///
/// A relatively wider image is fitted to the target height and cropped left and right;
/// otherwise it is fitted to the width and cropped top and bottom.
pub fn cover_placement(img_w: f64, img_h: f64, target: &ResolvedRect) -> ResolvedRect {
    if !(img_w > 0.0 && img_h > 0.0) || target.is_empty() {
        return *target;
    }
    let img_aspect = img_w / img_h;
    let target_aspect = target.w / target.h;
    if img_aspect > target_aspect {
        let w = target.h * img_aspect;
        ResolvedRect::new(target.x - (w - target.w) / 2.0, target.y, w, target.h)
    } else {
        let h = target.w / img_aspect;
        ResolvedRect::new(target.x, target.y - (h - target.h) / 2.0, target.w, h)
    }
}

/// Card compositor bound to an asset source.
///
/// The image cache and resolved fonts persist across renders, so repeated renders of the same
/// card fetch nothing.
pub struct CardRenderer<F> {
    fetcher: F,
    settings: RenderSettings,
    cache: ImageCache,
    text: TextEngine,
    star_gradient: Option<ImagePaint>,
}

impl<F: AssetFetcher> CardRenderer<F> {
    pub fn new(fetcher: F, settings: RenderSettings) -> Self {
        let text = TextEngine::new(settings.font_dir.clone());
        Self {
            fetcher,
            settings,
            cache: ImageCache::from_env(),
            text,
            star_gradient: None,
        }
    }

    pub fn with_cache(mut self, cache: ImageCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn cache(&self) -> &ImageCache {
        &self.cache
    }

    pub fn text_engine(&mut self) -> &mut TextEngine {
        &mut self.text
    }

    pub(crate) fn parts(&mut self) -> (&F, &mut ImageCache, &mut TextEngine, &RenderSettings) {
        (&self.fetcher, &mut self.cache, &mut self.text, &self.settings)
    }

    /// Render `card` with `config`.
    pub async fn render_card(
        &mut self,
        card: &Card,
        config: &AnimeCardConfig,
    ) -> CardResult<CardCanvas> {
        Ok(self.render_card_with_report(card, config).await?.0)
    }

    /// Render `card` with `config` and report each layer's outcome.
    #[tracing::instrument(skip(self, card, config), fields(card_id = card.id, card = %card.name))]
    pub async fn render_card_with_report(
        &mut self,
        card: &Card,
        config: &AnimeCardConfig,
    ) -> CardResult<(CardCanvas, RenderReport)> {
        let mut surface = Surface::new(
            CARD_CANVAS,
            self.settings.pixel_ratio,
            self.settings.background_rgba,
        )?;

        let mut report = RenderReport::default();

        for layer in plan_layers(card, config) {
            let rect = layer_rect(layer.kind, card, config);
            let outcome = if rect.is_empty() {
                LayerOutcome::Skipped
            } else {
                match layer.kind {
                    LayerKind::Artwork => self.draw_artwork(&mut surface, card, &rect).await,
                    LayerKind::Frame => {
                        let req = AssetRequest::local(frame_asset(card));
                        self.draw_stretched(&mut surface, &req, &rect).await
                    }
                    LayerKind::Stars => self.draw_stars(&mut surface, card, config).await,
                    LayerKind::Attribute => match attribute_icon(card) {
                        Some(path) => {
                            let req = AssetRequest::local(path);
                            self.draw_stretched(&mut surface, &req, &rect).await
                        }
                        None => LayerOutcome::Skipped,
                    },
                    LayerKind::Atk => {
                        self.draw_stat(&mut surface, card.atk, config.font_size, &rect)
                    }
                    LayerKind::Def => {
                        self.draw_stat(&mut surface, card.def, config.font_size, &rect)
                    }
                }
            };
            match &outcome {
                LayerOutcome::Failed(reason) => {
                    tracing::warn!(layer = ?layer.kind, %reason, "layer failed");
                }
                LayerOutcome::Fallback(reason) => {
                    tracing::warn!(layer = ?layer.kind, %reason, "layer drawn with fallback");
                }
                LayerOutcome::Drawn | LayerOutcome::Skipped => {
                    tracing::trace!(layer = ?layer.kind, ?outcome, "layer done");
                }
            }
            report.layers.push(LayerReport {
                kind: layer.kind,
                z_index: layer.z_index,
                rect,
                outcome,
            });
        }

        Ok((surface.finish(), report))
    }

    async fn draw_artwork(
        &mut self,
        surface: &mut Surface,
        card: &Card,
        rect: &ResolvedRect,
    ) -> LayerOutcome {
        surface.push_clip_rect(rect);
        let result = match card.cropped_image_url() {
            Some(url) => {
                let req = proxied_request(url);
                self.draw_cover(surface, &req, rect).await
            }
            None => Err(CardError::asset("card has no cropped artwork")),
        };
        let outcome = match result {
            Ok(()) => LayerOutcome::Drawn,
            Err(e) => {
                surface.fill_rect(rect, ARTWORK_PLACEHOLDER);
                LayerOutcome::Fallback(e.to_string())
            }
        };
        surface.pop_clip();
        outcome
    }

    async fn draw_cover(
        &mut self,
        surface: &mut Surface,
        req: &AssetRequest,
        rect: &ResolvedRect,
    ) -> CardResult<()> {
        let (iw, ih) = self.cache.load(&self.fetcher, req).await?.intrinsic_size();
        let placed = cover_placement(iw, ih, rect);
        let paint = self.load_paint(req, surface, &placed).await?;
        surface.draw_image(&paint, &placed);
        Ok(())
    }

    async fn draw_stretched(
        &mut self,
        surface: &mut Surface,
        req: &AssetRequest,
        rect: &ResolvedRect,
    ) -> LayerOutcome {
        match self.load_paint(req, surface, rect).await {
            Ok(paint) => {
                surface.draw_image(&paint, rect);
                LayerOutcome::Drawn
            }
            Err(e) => LayerOutcome::Failed(format!("{}: {e}", req.url)),
        }
    }

    /// Paint for `req` sized for `target` on `surface`.
    async fn load_paint(
        &mut self,
        req: &AssetRequest,
        surface: &Surface,
        target: &ResolvedRect,
    ) -> CardResult<ImagePaint> {
        let entry = self.cache.load(&self.fetcher, req).await?;
        entry.paint(surface.device_len(target.w), surface.device_len(target.h))
    }

    async fn draw_stars(
        &mut self,
        surface: &mut Surface,
        card: &Card,
        config: &AnimeCardConfig,
    ) -> LayerOutcome {
        let slots = star_slots(
            &config.stars,
            card.star_level(),
            CARD_CANVAS.width,
            CARD_CANVAS.height,
        );
        let Some(first) = slots.first().copied() else {
            return LayerOutcome::Skipped;
        };

        // One load decides icon or fallback for every star of this render.
        let req = AssetRequest::local(LEVEL_STAR_ICON);
        match self.load_paint(&req, surface, &first).await {
            Ok(paint) => {
                for slot in &slots {
                    surface.draw_image(&paint, slot);
                }
                LayerOutcome::Drawn
            }
            Err(e) => self.fallback_stars(surface, &slots, format!("{}: {e}", req.url)),
        }
    }

    fn fallback_stars(
        &mut self,
        surface: &mut Surface,
        slots: &[ResolvedRect],
        reason: String,
    ) -> LayerOutcome {
        match self.star_gradient_paint() {
            Ok(gradient) => {
                draw_procedural_stars(surface, slots, &gradient);
                LayerOutcome::Fallback(reason)
            }
            Err(e) => LayerOutcome::Failed(format!("{reason}; star fallback: {e}")),
        }
    }

    fn star_gradient_paint(&mut self) -> CardResult<ImagePaint> {
        if let Some(p) = &self.star_gradient {
            return Ok(p.clone());
        }
        let p = radial_star_gradient(STAR_GRADIENT_PX)?;
        self.star_gradient = Some(p.clone());
        Ok(p)
    }

    fn draw_stat(
        &mut self,
        surface: &mut Surface,
        value: Option<i32>,
        font_size: f64,
        rect: &ResolvedRect,
    ) -> LayerOutcome {
        let text = value.map_or_else(|| UNKNOWN_STAT.to_string(), |v| v.to_string());
        match draw_centered_text(
            &mut self.text,
            surface,
            &text,
            FontSpec::SERIF_BOLD,
            font_size * CARD_CANVAS.height,
            STAT_COLOR,
            rect,
        ) {
            Ok(()) => LayerOutcome::Drawn,
            Err(e) => LayerOutcome::Failed(e.to_string()),
        }
    }
}

/// Shape `text` and draw it centred in `rect`.
pub(crate) fn draw_centered_text(
    text_engine: &mut TextEngine,
    surface: &mut Surface,
    text: &str,
    spec: FontSpec,
    size: f64,
    color: Rgba,
    rect: &ResolvedRect,
) -> CardResult<()> {
    let shaped = text_engine.shape(text, spec, size as f32, TextBrushRgba8::rgba(color))?;
    let c = rect.center();
    surface.draw_text(
        &shaped,
        Point::new(c.x - shaped.width / 2.0, c.y - shaped.height / 2.0),
    );
    Ok(())
}

pub(crate) fn draw_procedural_stars(
    surface: &mut Surface,
    slots: &[ResolvedRect],
    gradient: &ImagePaint,
) {
    let n = f64::from(gradient.width);
    let unit = star_path(&ResolvedRect::new(0.0, 0.0, n, n), 0.45);
    for slot in slots {
        surface.fill_path_with_image(&unit, gradient, slot);
        surface.stroke_path(&star_path(slot, 0.45), STAR_STROKE_WIDTH, STAR_STROKE);
    }
}

/// Square radial gradient from a pale centre to deep gold at the rim.
pub(crate) fn radial_star_gradient(size: u32) -> CardResult<ImagePaint> {
    const INNER: [u8; 3] = [255, 250, 205];
    const OUTER: [u8; 3] = [230, 160, 0];

    let n = size.max(1);
    let c = f64::from(n) / 2.0;
    let mut bytes = Vec::with_capacity((n as usize) * (n as usize) * 4);
    for y in 0..n {
        for x in 0..n {
            let dx = f64::from(x) + 0.5 - c;
            let dy = f64::from(y) + 0.5 - c;
            let t = ((dx * dx + dy * dy).sqrt() / c).clamp(0.0, 1.0);
            let mix =
                |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
            let px = Rgba8Premul::from_straight_rgba(
                mix(INNER[0], OUTER[0]),
                mix(INNER[1], OUTER[1]),
                mix(INNER[2], OUTER[2]),
                255,
            );
            bytes.extend_from_slice(&px.to_array());
        }
    }
    ImagePaint::from_prepared(&PreparedImage {
        width: n,
        height: n,
        rgba8_premul: std::sync::Arc::new(bytes),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/card.rs"]
mod tests;
