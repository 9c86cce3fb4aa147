//! Fixed asset lookup tables and the cross-origin proxy rewrite.
//!
//! Nothing here performs I/O: every function maps card data to a static path or request.

use crate::card::model::{Card, CardCategory};

/// External card-image host whose URLs are served through the same-origin proxy.
pub const EXTERNAL_IMAGE_HOST: &str = "https://images.ygoprodeck.com";
/// Same-origin path prefix that replaces [`EXTERNAL_IMAGE_HOST`].
pub const IMAGE_PROXY_PREFIX: &str = "/api/images";

/// Shared icon drawn once per level star.
pub const LEVEL_STAR_ICON: &str = "assets/anime/level-star.png";

const FRAME_DIR: &str = "assets/anime/frames";
const ATTRIBUTE_DIR: &str = "assets/anime/attributes";

/// Request mode for an image fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FetchMode {
    /// Same-origin request; pixels are readable.
    SameOrigin,
    /// Cross-origin request without credentials.
    CorsAnonymous,
}

/// Location plus request mode of one image fetch.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct AssetRequest {
    pub url: String,
    pub mode: FetchMode,
}

impl AssetRequest {
    /// Request for a static application asset (relative to the asset root).
    pub fn local(path: impl Into<String>) -> Self {
        Self {
            url: path.into(),
            mode: FetchMode::SameOrigin,
        }
    }

    pub fn is_proxied(&self) -> bool {
        self.url.starts_with(IMAGE_PROXY_PREFIX)
    }
}

/// Rewrite known external image URLs onto the same-origin proxy.
///
/// `https://images.ygoprodeck.com/images/x.jpg` becomes `/api/images/images/x.jpg` with
/// [`FetchMode::SameOrigin`]; any other URL is kept and fetched with
/// [`FetchMode::CorsAnonymous`].
pub fn proxied_request(url: &str) -> AssetRequest {
    match url.strip_prefix(EXTERNAL_IMAGE_HOST) {
        Some(rest) => AssetRequest {
            url: format!("{IMAGE_PROXY_PREFIX}{rest}"),
            mode: FetchMode::SameOrigin,
        },
        None => AssetRequest {
            url: url.to_string(),
            mode: FetchMode::CorsAnonymous,
        },
    }
}

/// Cards with dedicated frame art, matched by name substring.
const NAMED_FRAMES: [(&str, &str); 3] = [
    ("Slifer the Sky Dragon", "slifer"),
    ("Obelisk the Tormentor", "obelisk"),
    ("The Winged Dragon of Ra", "ra"),
];

/// Type keywords in precedence order, highest first.
const TYPE_FRAMES: [(&str, &str); 7] = [
    ("token", "token"),
    ("fusion", "fusion"),
    ("synchro", "synchro"),
    ("xyz", "xyz"),
    ("ritual", "ritual"),
    ("trap", "trap"),
    ("spell", "spell"),
];

/// Frame art for `card`.
pub fn frame_asset(card: &Card) -> String {
    let stem = frame_stem(&card.name, &card.card_type);
    format!("{FRAME_DIR}/{stem}.png")
}

fn frame_stem(name: &str, type_line: &str) -> &'static str {
    if let Some((_, stem)) = NAMED_FRAMES.iter().find(|(n, _)| name.contains(n)) {
        return stem;
    }
    let t = type_line.to_lowercase();
    if let Some((_, stem)) = TYPE_FRAMES.iter().find(|(kw, _)| t.contains(kw)) {
        return stem;
    }
    if t.contains("effect") || t.contains("link") {
        return "effect";
    }
    if t.contains("monster") {
        return "normal";
    }
    "spell"
}

const ATTRIBUTES: [&str; 7] = ["DARK", "LIGHT", "EARTH", "WATER", "FIRE", "WIND", "DIVINE"];

/// Attribute icon for `card`, or `None` when the table has no entry.
pub fn attribute_icon(card: &Card) -> Option<String> {
    match card.category() {
        CardCategory::Spell => Some(format!("{ATTRIBUTE_DIR}/spell.png")),
        CardCategory::Trap => Some(format!("{ATTRIBUTE_DIR}/trap.png")),
        CardCategory::Monster => {
            let attr = card.attribute.as_deref()?.trim().to_ascii_uppercase();
            ATTRIBUTES
                .iter()
                .find(|a| **a == attr)
                .map(|a| format!("{ATTRIBUTE_DIR}/{}.png", a.to_ascii_lowercase()))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/catalog.rs"]
mod tests;
