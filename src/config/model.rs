use crate::foundation::error::{CardError, CardResult};

/// Named anchor point inside the parent rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnchorPreset {
    #[default]
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    Center,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
    StretchHorizontal,
    StretchVertical,
    StretchAll,
}

impl AnchorPreset {
    /// The 3x3 grid offered by the anchor picker, row-major from the top-left.
    pub const GRID: [AnchorPreset; 9] = [
        Self::TopLeft,
        Self::TopCenter,
        Self::TopRight,
        Self::MiddleLeft,
        Self::Center,
        Self::MiddleRight,
        Self::BottomLeft,
        Self::BottomCenter,
        Self::BottomRight,
    ];

    /// Unit anchor `(ax, ay)` in `{0, 0.5, 1}`.
    ///
    /// The stretch presets do not stretch; they anchor at the parent center.
    pub fn unit(self) -> (f64, f64) {
        match self {
            Self::TopLeft => (0.0, 0.0),
            Self::TopCenter => (0.5, 0.0),
            Self::TopRight => (1.0, 0.0),
            Self::MiddleLeft => (0.0, 0.5),
            Self::Center => (0.5, 0.5),
            Self::MiddleRight => (1.0, 0.5),
            Self::BottomLeft => (0.0, 1.0),
            Self::BottomCenter => (0.5, 1.0),
            Self::BottomRight => (1.0, 1.0),
            Self::StretchHorizontal | Self::StretchVertical | Self::StretchAll => (0.5, 0.5),
        }
    }

    pub fn is_stretch(self) -> bool {
        matches!(
            self,
            Self::StretchHorizontal | Self::StretchVertical | Self::StretchAll
        )
    }
}

/// Point inside the element that sits on the anchor, in element-relative units.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Pivot {
    pub x: f64,
    pub y: f64,
}

impl Pivot {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Placement of a rectangular element, parent-relative.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RectTransform {
    pub anchor: AnchorPreset,
    pub pivot: Pivot,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub z_index: i32,
}

/// Placement of the level-star row. `size` and `gap` are in parent-width units.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarsConfig {
    pub anchor: AnchorPreset,
    pub pivot: Pivot,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub gap: f64,
    pub z_index: i32,
}

/// Complete card layout. Every element is always present.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeCardConfig {
    pub layout: RectTransform,
    pub artwork: RectTransform,
    pub stars: StarsConfig,
    pub attribute: RectTransform,
    pub atk: RectTransform,
    pub def: RectTransform,
    /// ATK/DEF font size as a fraction of the logical canvas height.
    pub font_size: f64,
}

/// Named element of [`AnimeCardConfig`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementId {
    Layout,
    Artwork,
    Stars,
    Attribute,
    Atk,
    Def,
}

impl ElementId {
    pub const ALL: [ElementId; 6] = [
        Self::Layout,
        Self::Artwork,
        Self::Stars,
        Self::Attribute,
        Self::Atk,
        Self::Def,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Layout => "layout",
            Self::Artwork => "artwork",
            Self::Stars => "stars",
            Self::Attribute => "attribute",
            Self::Atk => "atk",
            Self::Def => "def",
        }
    }
}

/// Value of a single element, by shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ElementConfig {
    Rect(RectTransform),
    Stars(StarsConfig),
}

/// Wholesale replacement of one top-level entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigUpdate {
    Layout(RectTransform),
    Artwork(RectTransform),
    Stars(StarsConfig),
    Attribute(RectTransform),
    Atk(RectTransform),
    Def(RectTransform),
    FontSize(f64),
}

impl ConfigUpdate {
    /// Build the update that writes `value` into `id`. Fails on a shape mismatch
    /// (for example a rect value for the stars row).
    pub fn for_element(id: ElementId, value: ElementConfig) -> CardResult<Self> {
        match (id, value) {
            (ElementId::Stars, ElementConfig::Stars(s)) => Ok(Self::Stars(s)),
            (ElementId::Layout, ElementConfig::Rect(r)) => Ok(Self::Layout(r)),
            (ElementId::Artwork, ElementConfig::Rect(r)) => Ok(Self::Artwork(r)),
            (ElementId::Attribute, ElementConfig::Rect(r)) => Ok(Self::Attribute(r)),
            (ElementId::Atk, ElementConfig::Rect(r)) => Ok(Self::Atk(r)),
            (ElementId::Def, ElementConfig::Rect(r)) => Ok(Self::Def(r)),
            (id, _) => Err(CardError::validation(format!(
                "element '{}' does not accept this value shape",
                id.name()
            ))),
        }
    }
}

impl AnimeCardConfig {
    pub fn element(&self, id: ElementId) -> ElementConfig {
        match id {
            ElementId::Layout => ElementConfig::Rect(self.layout),
            ElementId::Artwork => ElementConfig::Rect(self.artwork),
            ElementId::Stars => ElementConfig::Stars(self.stars),
            ElementId::Attribute => ElementConfig::Rect(self.attribute),
            ElementId::Atk => ElementConfig::Rect(self.atk),
            ElementId::Def => ElementConfig::Rect(self.def),
        }
    }

    /// Rect accessor; `None` for the stars row.
    pub fn rect(&self, id: ElementId) -> Option<&RectTransform> {
        match id {
            ElementId::Layout => Some(&self.layout),
            ElementId::Artwork => Some(&self.artwork),
            ElementId::Attribute => Some(&self.attribute),
            ElementId::Atk => Some(&self.atk),
            ElementId::Def => Some(&self.def),
            ElementId::Stars => None,
        }
    }

    pub fn with_element(&self, id: ElementId, value: ElementConfig) -> CardResult<Self> {
        Ok(self.applied(ConfigUpdate::for_element(id, value)?))
    }

    /// Copy of `self` with `update` applied.
    pub fn applied(&self, update: ConfigUpdate) -> Self {
        let mut out = *self;
        match update {
            ConfigUpdate::Layout(r) => out.layout = r,
            ConfigUpdate::Artwork(r) => out.artwork = r,
            ConfigUpdate::Stars(s) => out.stars = s,
            ConfigUpdate::Attribute(r) => out.attribute = r,
            ConfigUpdate::Atk(r) => out.atk = r,
            ConfigUpdate::Def(r) => out.def = r,
            ConfigUpdate::FontSize(v) => out.font_size = v,
        }
        out
    }

    pub fn from_json_str(s: &str) -> CardResult<Self> {
        serde_json::from_str(s).map_err(|e| CardError::serde(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> CardResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CardError::serde(e.to_string()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
