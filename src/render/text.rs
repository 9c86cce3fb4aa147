use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use usvg::fontdb;

use crate::foundation::error::{CardError, CardResult};

/// Generic face family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontFamily {
    Serif,
    SansSerif,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FontSpec {
    pub family: FontFamily,
    pub bold: bool,
}

impl FontSpec {
    pub const SERIF_BOLD: Self = Self {
        family: FontFamily::Serif,
        bold: true,
    };
    pub const SANS: Self = Self {
        family: FontFamily::SansSerif,
        bold: false,
    };
    pub const SANS_BOLD: Self = Self {
        family: FontFamily::SansSerif,
        bold: true,
    };
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub struct TextBrushRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl TextBrushRgba8 {
    pub const fn rgba(rgba: [u8; 4]) -> Self {
        Self {
            r: rgba[0],
            g: rgba[1],
            b: rgba[2],
            a: rgba[3],
        }
    }
}

/// Shaped single-paragraph text ready to draw.
pub struct ShapedText {
    pub(crate) layout: parley::Layout<TextBrushRgba8>,
    pub(crate) font: vello_cpu::peniko::FontData,
    pub width: f64,
    pub height: f64,
}

/// Face selected for a [`FontSpec`].
#[derive(Clone)]
pub struct LoadedFont {
    pub family_name: String,
    pub bytes: Arc<Vec<u8>>,
    pub index: u32,
    font: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for LoadedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedFont")
            .field("family_name", &self.family_name)
            .field("len", &self.bytes.len())
            .field("index", &self.index)
            .finish()
    }
}

/// Font resolution plus Parley shaping.
///
/// Faces come from the optional font directory first, then from system fonts. Lookups are
/// cached per [`FontSpec`], including misses.
pub struct TextEngine {
    font_dir: Option<PathBuf>,
    dir_db: Option<fontdb::Database>,
    system_db: Option<fontdb::Database>,
    fonts: HashMap<FontSpec, Option<LoadedFont>>,
    registered: HashMap<FontSpec, String>,
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
}

impl Default for TextEngine {
    fn default() -> Self {
        Self::new(None)
    }
}

impl TextEngine {
    pub fn new(font_dir: Option<PathBuf>) -> Self {
        Self {
            font_dir,
            dir_db: None,
            system_db: None,
            fonts: HashMap::new(),
            registered: HashMap::new(),
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Face for `spec`, or an asset error when no face is available.
    pub fn font(&mut self, spec: FontSpec) -> CardResult<LoadedFont> {
        if let Some(cached) = self.fonts.get(&spec) {
            return cached
                .clone()
                .ok_or_else(|| CardError::asset(format!("no font available for {spec:?}")));
        }
        let found = self.locate(spec);
        self.fonts.insert(spec, found.clone());
        found.ok_or_else(|| CardError::asset(format!("no font available for {spec:?}")))
    }

    /// Faces resolved so far.
    pub fn loaded_fonts(&self) -> Vec<(FontSpec, LoadedFont)> {
        let mut out: Vec<(FontSpec, LoadedFont)> = self
            .fonts
            .iter()
            .filter_map(|(k, v)| v.clone().map(|f| (*k, f)))
            .collect();
        out.sort_by_key(|(k, _)| (k.family as u8, k.bold));
        out
    }

    fn locate(&mut self, spec: FontSpec) -> Option<LoadedFont> {
        if let Some(dir) = self.font_dir.clone() {
            let db = self.dir_db.get_or_insert_with(|| {
                let mut db = fontdb::Database::new();
                db.load_fonts_dir(&dir);
                db
            });
            if let Some(f) = pick_face(db, spec) {
                return Some(f);
            }
        }
        let db = self.system_db.get_or_insert_with(|| {
            let mut db = fontdb::Database::new();
            db.load_system_fonts();
            db
        });
        let found = pick_face(db, spec);
        if found.is_none() {
            tracing::warn!(?spec, "no matching font face");
        }
        found
    }

    /// Lay out `text` on one line (no wrapping).
    pub fn shape(
        &mut self,
        text: &str,
        spec: FontSpec,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> CardResult<ShapedText> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(CardError::validation("text size must be finite and > 0"));
        }
        let loaded = self.font(spec)?;

        let family_name = self.register(spec, &loaded)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));
        if spec.bold {
            builder.push_default(parley::style::StyleProperty::FontWeight(
                parley::style::FontWeight::BOLD,
            ));
        }

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        layout.align(
            None,
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );

        let width = f64::from(layout.width());
        let height = f64::from(layout.height());
        Ok(ShapedText {
            layout,
            font: loaded.font,
            width,
            height,
        })
    }

    /// Parley family name for `spec`, registering the face bytes on first use.
    fn register(&mut self, spec: FontSpec, loaded: &LoadedFont) -> CardResult<String> {
        if let Some(name) = self.registered.get(&spec) {
            return Ok(name.clone());
        }
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(loaded.bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| CardError::asset("font bytes registered no family"))?;
        let name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CardError::asset("registered font family has no name"))?
            .to_string();
        self.registered.insert(spec, name.clone());
        Ok(name)
    }

    /// Advance width of `text` in pixels.
    pub fn measure(&mut self, text: &str, spec: FontSpec, size_px: f32) -> CardResult<f64> {
        if text.is_empty() {
            return Ok(0.0);
        }
        Ok(self
            .shape(text, spec, size_px, TextBrushRgba8::default())?
            .width)
    }
}

fn pick_face(db: &fontdb::Database, spec: FontSpec) -> Option<LoadedFont> {
    let family = match spec.family {
        FontFamily::Serif => fontdb::Family::Serif,
        FontFamily::SansSerif => fontdb::Family::SansSerif,
    };
    let weight = if spec.bold {
        fontdb::Weight::BOLD
    } else {
        fontdb::Weight::NORMAL
    };
    let query = fontdb::Query {
        families: &[family],
        weight,
        stretch: fontdb::Stretch::Normal,
        style: fontdb::Style::Normal,
    };
    // A private font directory rarely carries the generic family aliases, so fall back to the
    // closest weight among everything it holds.
    let id = db.query(&query).or_else(|| {
        db.faces()
            .min_by_key(|f| (f.weight.0 as i32 - weight.0 as i32).abs())
            .map(|f| f.id)
    })?;

    let family_name = db
        .face(id)
        .and_then(|f| f.families.first().map(|(name, _)| name.clone()))
        .unwrap_or_default();
    let (bytes, index) = db.with_face_data(id, |data, index| (data.to_vec(), index))?;
    let bytes = Arc::new(bytes);
    let blob = vello_cpu::peniko::Blob::from(bytes.to_vec());
    let font = vello_cpu::peniko::FontData::new(blob, index);
    Some(LoadedFont {
        family_name,
        bytes,
        index,
        font,
    })
}

/// One output line of [`wrap_text`] with its baseline y.
#[derive(Clone, Debug, PartialEq)]
pub struct WrappedLine {
    pub text: String,
    pub y: f64,
}

/// Greedy word wrap bounded by a box height.
///
/// Words split on single spaces and are measured with a trailing space. A line breaks when the
/// candidate exceeds `max_width` and the current line is non-empty. Breaking while the current
/// line sits below `y + max_height - line_height` emits it with `...` appended and stops. The
/// trailing line is kept only while it is at most one line below that limit.
pub fn wrap_text(
    mut measure: impl FnMut(&str) -> f64,
    text: &str,
    y: f64,
    max_width: f64,
    line_height: f64,
    max_height: f64,
) -> Vec<WrappedLine> {
    let mut out = Vec::new();
    let mut line = String::new();
    let mut current_y = y;
    let max_y = y + max_height - line_height;

    for word in text.split(' ') {
        let candidate = format!("{line}{word} ");
        if measure(&candidate) > max_width && !line.is_empty() {
            if current_y > max_y {
                out.push(WrappedLine {
                    text: format!("{}...", line.trim()),
                    y: current_y,
                });
                return out;
            }
            out.push(WrappedLine {
                text: line.trim().to_string(),
                y: current_y,
            });
            line = format!("{word} ");
            current_y += line_height;
        } else {
            line = candidate;
        }
    }
    if current_y <= max_y + line_height {
        out.push(WrappedLine {
            text: line.trim().to_string(),
            y: current_y,
        });
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
