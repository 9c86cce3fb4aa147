//! Pointer-driven layout editing.
//!
//! The session is a small state machine (`Idle -> Selected -> Dragging -> Selected -> Idle`).
//! Pointer positions are view pixels; edits are normalized by the current view size into the
//! configuration's parent-relative units and committed to a [`ConfigStore`].

use crate::assets::catalog::attribute_icon;
use crate::card::model::Card;
use crate::config::model::{
    AnchorPreset, AnimeCardConfig, ConfigUpdate, ElementConfig, ElementId, Pivot,
};
use crate::config::store::ConfigStore;
use crate::foundation::core::Point;
use crate::foundation::error::{CardError, CardResult};
use crate::layout::geometry::{ResolvedRect, resolve_rect, resolve_stars_rect};

/// Smallest size a resize may produce, in parent-relative units.
pub const MIN_ELEMENT_SIZE: f64 = 0.01;
/// Corner handle grab radius in view pixels.
pub const HANDLE_RADIUS_PX: f64 = 8.0;
/// Click hit-test priority, first hit wins.
pub const HIT_TEST_ORDER: [ElementId; 5] = [
    ElementId::Atk,
    ElementId::Def,
    ElementId::Attribute,
    ElementId::Stars,
    ElementId::Artwork,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DragKind {
    Move,
    ResizeTopLeft,
    ResizeTopRight,
    ResizeBottomLeft,
    ResizeBottomRight,
}

impl DragKind {
    /// Handles in [`ResolvedRect::corners`] order.
    const CORNERS: [DragKind; 4] = [
        Self::ResizeTopLeft,
        Self::ResizeTopRight,
        Self::ResizeBottomLeft,
        Self::ResizeBottomRight,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EditorState {
    Idle,
    Selected {
        element: ElementId,
    },
    Dragging {
        element: ElementId,
        kind: DragKind,
        start: Point,
        /// Element value when the drag started.
        origin: ElementConfig,
    },
}

impl EditorState {
    pub fn selected(&self) -> Option<ElementId> {
        match *self {
            Self::Idle => None,
            Self::Selected { element } | Self::Dragging { element, .. } => Some(element),
        }
    }
}

/// What the host should do after an editor call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorAction {
    RenderNeeded,
    SelectionChanged(Option<ElementId>),
}

/// Numerically editable field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Field {
    X,
    Y,
    W,
    H,
    Size,
    Gap,
    PivotX,
    PivotY,
    ZIndex,
    /// Config-wide ATK/DEF font size; the element argument is ignored.
    FontSize,
}

/// Modifier state for the anchor picker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnchorModifiers {
    /// Also move the pivot to the preset's unit point (Shift).
    pub set_pivot: bool,
    /// Also zero the `x`/`y` offsets (Alt).
    pub reset_position: bool,
}

/// Card facts that decide which elements are visible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EditContext {
    pub star_level: u32,
    pub monster: bool,
    pub has_attribute: bool,
}

impl EditContext {
    pub fn for_card(card: &Card) -> Self {
        Self {
            star_level: card.star_level(),
            monster: card.is_monster(),
            has_attribute: attribute_icon(card).is_some(),
        }
    }

    fn shows(&self, element: ElementId) -> bool {
        match element {
            ElementId::Layout | ElementId::Artwork => true,
            ElementId::Stars => self.star_level > 0,
            ElementId::Attribute => self.has_attribute,
            ElementId::Atk | ElementId::Def => self.monster,
        }
    }
}

#[derive(Clone, Debug)]
pub struct EditorSession {
    state: EditorState,
    view_w: f64,
    view_h: f64,
    picker: Option<ElementId>,
}

impl EditorSession {
    /// Session for a view of `view_w` x `view_h` pixels.
    pub fn new(view_w: f64, view_h: f64) -> Self {
        Self {
            state: EditorState::Idle,
            view_w,
            view_h,
            picker: None,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn selected(&self) -> Option<ElementId> {
        self.state.selected()
    }

    pub fn view_size(&self) -> (f64, f64) {
        (self.view_w, self.view_h)
    }

    pub fn set_view_size(&mut self, view_w: f64, view_h: f64) {
        self.view_w = view_w;
        self.view_h = view_h;
    }

    /// Element rectangle in view pixels, `None` when the element is not shown.
    pub fn element_rect(
        &self,
        element: ElementId,
        config: &AnimeCardConfig,
        ctx: &EditContext,
    ) -> Option<ResolvedRect> {
        if !ctx.shows(element) {
            return None;
        }
        let r = self.resolve(config.element(element), ctx);
        (!r.is_empty()).then_some(r)
    }

    /// Pre-drag rectangle of the dragged element in view pixels; the stars row box is
    /// synthesized from its row geometry.
    pub fn drag_start_rect(&self, ctx: &EditContext) -> Option<ResolvedRect> {
        let EditorState::Dragging { origin, .. } = self.state else {
            return None;
        };
        Some(self.resolve(origin, ctx))
    }

    fn resolve(&self, value: ElementConfig, ctx: &EditContext) -> ResolvedRect {
        match value {
            ElementConfig::Rect(t) => resolve_rect(&t, self.view_w, self.view_h),
            ElementConfig::Stars(s) => {
                resolve_stars_rect(&s, ctx.star_level, self.view_w, self.view_h)
            }
        }
    }

    /// Selection highlight for the current element.
    pub fn overlay(&self, config: &AnimeCardConfig, ctx: &EditContext) -> Option<ResolvedRect> {
        self.element_rect(self.selected()?, config, ctx)
    }

    /// Select the first element under `point`, or deselect when nothing is hit.
    pub fn click(
        &mut self,
        point: Point,
        config: &AnimeCardConfig,
        ctx: &EditContext,
    ) -> Vec<EditorAction> {
        if matches!(self.state, EditorState::Dragging { .. }) {
            return Vec::new();
        }
        let hit = HIT_TEST_ORDER.into_iter().find(|&el| {
            self.element_rect(el, config, ctx)
                .is_some_and(|r| r.contains(point))
        });
        match hit {
            Some(element) => self.select(element),
            None => self.deselect(),
        }
    }

    pub fn select(&mut self, element: ElementId) -> Vec<EditorAction> {
        let before = self.selected();
        self.state = EditorState::Selected { element };
        if self.picker.is_some_and(|p| p != element) {
            self.picker = None;
        }
        if before == Some(element) {
            Vec::new()
        } else {
            vec![EditorAction::SelectionChanged(Some(element))]
        }
    }

    /// Drag handle of the selected element under `point`.
    pub fn handle_at(
        &self,
        point: Point,
        config: &AnimeCardConfig,
        ctx: &EditContext,
    ) -> Option<DragKind> {
        let EditorState::Selected { element } = self.state else {
            return None;
        };
        let r = self.element_rect(element, config, ctx)?;
        let corner = r
            .corners()
            .into_iter()
            .zip(DragKind::CORNERS)
            .find(|(c, _)| c.distance(point) <= HANDLE_RADIUS_PX)
            .map(|(_, kind)| kind);
        corner.or_else(|| r.contains(point).then_some(DragKind::Move))
    }

    /// Start a drag of the selected element. Ignored unless a shown element is selected.
    pub fn pointer_down(
        &mut self,
        kind: DragKind,
        point: Point,
        config: &AnimeCardConfig,
        ctx: &EditContext,
    ) -> Vec<EditorAction> {
        let EditorState::Selected { element } = self.state else {
            return Vec::new();
        };
        if !ctx.shows(element) {
            return Vec::new();
        }
        self.state = EditorState::Dragging {
            element,
            kind,
            start: point,
            origin: config.element(element),
        };
        Vec::new()
    }

    /// Apply the drag for the pointer at `point` and commit it.
    pub fn pointer_move(
        &mut self,
        point: Point,
        store: &mut ConfigStore,
    ) -> CardResult<Vec<EditorAction>> {
        let EditorState::Dragging {
            element,
            kind,
            start,
            origin,
        } = self.state
        else {
            return Ok(Vec::new());
        };
        if !(self.view_w > 0.0 && self.view_h > 0.0) {
            return Ok(Vec::new());
        }
        let dx = (point.x - start.x) / self.view_w;
        let dy = (point.y - start.y) / self.view_h;
        let next = apply_drag(origin, kind, dx, dy);
        store.update(ConfigUpdate::for_element(element, next)?);
        Ok(vec![EditorAction::RenderNeeded])
    }

    /// End a drag; the element stays selected.
    pub fn pointer_up(&mut self) -> Vec<EditorAction> {
        if let EditorState::Dragging { element, .. } = self.state {
            self.state = EditorState::Selected { element };
        }
        Vec::new()
    }

    pub fn deselect(&mut self) -> Vec<EditorAction> {
        let was = self.selected();
        self.state = EditorState::Idle;
        self.picker = None;
        if was.is_some() {
            vec![EditorAction::SelectionChanged(None)]
        } else {
            Vec::new()
        }
    }

    /// Numeric entry of one field.
    pub fn set_field(
        &mut self,
        element: ElementId,
        field: Field,
        value: f64,
        store: &mut ConfigStore,
    ) -> CardResult<Vec<EditorAction>> {
        if !value.is_finite() {
            return Err(CardError::validation(format!(
                "{field:?} must be a finite number"
            )));
        }
        let update = match field {
            Field::FontSize => ConfigUpdate::FontSize(value),
            _ => {
                let next = with_field(store.config().element(element), element, field, value)?;
                ConfigUpdate::for_element(element, next)?
            }
        };
        store.update(update);
        Ok(vec![EditorAction::RenderNeeded])
    }

    pub fn open_anchor_picker(&mut self, element: ElementId) {
        self.picker = Some(element);
    }

    pub fn close_anchor_picker(&mut self) {
        self.picker = None;
    }

    /// Element whose anchor picker is open.
    pub fn anchor_picker(&self) -> Option<ElementId> {
        self.picker
    }

    /// Commit an anchor preset in one step and close the picker.
    pub fn apply_anchor_preset(
        &mut self,
        element: ElementId,
        preset: AnchorPreset,
        modifiers: AnchorModifiers,
        store: &mut ConfigStore,
    ) -> CardResult<Vec<EditorAction>> {
        let (ux, uy) = preset.unit();
        let next = match store.config().element(element) {
            ElementConfig::Rect(mut t) => {
                t.anchor = preset;
                if modifiers.set_pivot {
                    t.pivot = Pivot::new(ux, uy);
                }
                if modifiers.reset_position {
                    t.x = 0.0;
                    t.y = 0.0;
                }
                ElementConfig::Rect(t)
            }
            ElementConfig::Stars(mut s) => {
                s.anchor = preset;
                if modifiers.set_pivot {
                    s.pivot = Pivot::new(ux, uy);
                }
                if modifiers.reset_position {
                    s.x = 0.0;
                    s.y = 0.0;
                }
                ElementConfig::Stars(s)
            }
        };
        store.update(ConfigUpdate::for_element(element, next)?);
        self.picker = None;
        let mut actions = Vec::new();
        if !matches!(self.state, EditorState::Dragging { .. }) {
            actions.extend(self.select(element));
        }
        actions.push(EditorAction::RenderNeeded);
        Ok(actions)
    }
}

/// Element value after dragging `origin` by `(dx, dy)` relative units.
///
/// `origin` is the value at drag start, so the result depends only on the latest delta.
pub fn apply_drag(
    origin: ElementConfig,
    kind: DragKind,
    dx: f64,
    dy: f64,
) -> ElementConfig {
    let floor = |v: f64| v.max(MIN_ELEMENT_SIZE);
    match origin {
        ElementConfig::Rect(o) => {
            let mut t = o;
            match kind {
                DragKind::Move => {
                    t.x = o.x + dx;
                    t.y = o.y + dy;
                }
                DragKind::ResizeBottomRight => {
                    t.w = floor(o.w + dx);
                    t.h = floor(o.h + dy);
                }
                DragKind::ResizeBottomLeft => {
                    t.w = floor(o.w - dx);
                    t.x = o.x + dx;
                    t.h = floor(o.h + dy);
                }
                DragKind::ResizeTopRight => {
                    t.w = floor(o.w + dx);
                    t.y = o.y + dy;
                    t.h = floor(o.h - dy);
                }
                DragKind::ResizeTopLeft => {
                    t.x = o.x + dx;
                    t.y = o.y + dy;
                    t.w = floor(o.w - dx);
                    t.h = floor(o.h - dy);
                }
            }
            ElementConfig::Rect(t)
        }
        ElementConfig::Stars(o) => {
            let mut s = o;
            match kind {
                DragKind::Move => s.y = o.y + dy,
                _ => s.size = floor(o.size + dy),
            }
            ElementConfig::Stars(s)
        }
    }
}

fn with_field(
    current: ElementConfig,
    element: ElementId,
    field: Field,
    value: f64,
) -> CardResult<ElementConfig> {
    let unsupported = || {
        CardError::validation(format!(
            "element '{}' has no field {field:?}",
            element.name()
        ))
    };
    Ok(match current {
        ElementConfig::Rect(mut t) => {
            match field {
                Field::X => t.x = value,
                Field::Y => t.y = value,
                Field::W => t.w = value,
                Field::H => t.h = value,
                Field::PivotX => t.pivot.x = value,
                Field::PivotY => t.pivot.y = value,
                Field::ZIndex => t.z_index = value.round() as i32,
                Field::Size | Field::Gap | Field::FontSize => return Err(unsupported()),
            }
            ElementConfig::Rect(t)
        }
        ElementConfig::Stars(mut s) => {
            match field {
                Field::X => s.x = value,
                Field::Y => s.y = value,
                Field::Size => s.size = value,
                Field::Gap => s.gap = value,
                Field::PivotX => s.pivot.x = value,
                Field::PivotY => s.pivot.y = value,
                Field::ZIndex => s.z_index = value.round() as i32,
                Field::W | Field::H | Field::FontSize => return Err(unsupported()),
            }
            ElementConfig::Stars(s)
        }
    })
}

#[cfg(test)]
#[path = "../../tests/unit/editor/session.rs"]
mod tests;
