use crate::card::model::{Card, CardCategory};
use crate::config::model::{AnchorPreset, AnimeCardConfig, Pivot, RectTransform, StarsConfig};

fn top_left(x: f64, y: f64, w: f64, h: f64, z_index: i32) -> RectTransform {
    RectTransform {
        anchor: AnchorPreset::TopLeft,
        pivot: Pivot::new(0.0, 0.0),
        x,
        y,
        w,
        h,
        z_index,
    }
}

fn monster() -> AnimeCardConfig {
    AnimeCardConfig {
        artwork: top_left(0.055, 0.025, 0.89, 0.655, 0),
        layout: top_left(0.0, 0.0, 1.0, 1.0, 1),
        // Row is centred horizontally: anchored at the top centre with a centred pivot.
        stars: StarsConfig {
            anchor: AnchorPreset::TopCenter,
            pivot: Pivot::new(0.5, 0.0),
            x: 0.0,
            y: 0.715,
            size: 0.038,
            gap: 0.005,
            z_index: 2,
        },
        attribute: top_left(0.85, 0.705, 0.10, 0.065, 3),
        atk: top_left(0.065, 0.795, 0.38, 0.12, 4),
        def: top_left(0.555, 0.795, 0.38, 0.12, 4),
        font_size: 0.065,
    }
}

/// Spell and trap cards share geometry: no star row and no stat boxes.
fn spell_or_trap() -> AnimeCardConfig {
    let base = monster();
    AnimeCardConfig {
        stars: StarsConfig {
            size: 0.0,
            gap: 0.0,
            ..base.stars
        },
        atk: RectTransform {
            w: 0.0,
            h: 0.0,
            ..base.atk
        },
        def: RectTransform {
            w: 0.0,
            h: 0.0,
            ..base.def
        },
        ..base
    }
}

/// Built-in configuration for a card category.
pub fn preset_for_category(category: CardCategory) -> AnimeCardConfig {
    match category {
        CardCategory::Monster => monster(),
        CardCategory::Spell | CardCategory::Trap => spell_or_trap(),
    }
}

/// Built-in configuration for `card`, derived from its type line only.
pub fn preset_for_card(card: &Card) -> AnimeCardConfig {
    preset_for_category(card.category())
}

#[cfg(test)]
#[path = "../../tests/unit/config/presets.rs"]
mod tests;
