//! animecard composes trading-card images from layered assets and renders them to PNG.
//!
//! Every element of a card (artwork, frame, level stars, attribute icon, ATK/DEF) is placed by an
//! anchor/pivot rectangle expressed in fractions of the card. The API is layered:
//!
//! - Describe placements with an [`AnimeCardConfig`], usually from a per-category preset
//! - Render a [`Card`] through a [`CardRenderer`] into a [`CardCanvas`]
//! - Edit placements interactively with an [`EditorSession`] or a live [`PreviewSession`]
#![forbid(unsafe_code)]

mod foundation;

/// Asset catalog, fetching, decoding and caching.
pub mod assets;
/// Card records from the card database.
pub mod card;
/// Layout configuration, presets and the observable store.
pub mod config;
/// Deck lists and `.ydk` import/export.
pub mod deck;
/// Interactive layout editing.
pub mod editor;
/// Anchor/pivot geometry.
pub mod layout;
/// Card compositing onto a CPU surface.
pub mod render;

pub use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rect, Rgba8Premul, Vec2};
pub use crate::foundation::error::{CardError, CardResult};

pub use crate::assets::cache::ImageCache;
pub use crate::assets::catalog::{AssetRequest, FetchMode, proxied_request};
pub use crate::assets::fetch::{AssetFetcher, FsFetcher, MemoryFetcher};
pub use crate::card::model::{Card, CardCategory, parse_cards_json};
pub use crate::config::model::{
    AnchorPreset, AnimeCardConfig, ConfigUpdate, ElementConfig, ElementId, Pivot, RectTransform,
    StarsConfig,
};
pub use crate::config::presets::{preset_for_card, preset_for_category};
pub use crate::config::store::ConfigStore;
pub use crate::deck::list::{Deck, DeckSection, is_extra_deck_type};
pub use crate::deck::ydk::{parse_ydk, to_ydk};
pub use crate::editor::preview::PreviewSession;
pub use crate::editor::session::{
    AnchorModifiers, DragKind, EditContext, EditorAction, EditorSession, EditorState, Field,
};
pub use crate::layout::geometry::{ResolvedRect, resolve_rect, resolve_stars_rect};
pub use crate::render::card::{
    CARD_HEIGHT, CARD_WIDTH, CardRenderer, LayerKind, LayerOutcome, LayerReport, RenderReport,
    RenderSettings,
};
pub use crate::render::surface::{CardCanvas, download_file_name};
pub use crate::render::text::{WrappedLine, wrap_text};
