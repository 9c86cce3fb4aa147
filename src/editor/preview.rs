use crate::assets::fetch::AssetFetcher;
use crate::card::model::Card;
use crate::config::model::{AnchorPreset, AnimeCardConfig, ElementId};
use crate::config::store::ConfigStore;
use crate::editor::session::{AnchorModifiers, EditContext, EditorAction, EditorSession, Field};
use crate::foundation::core::Point;
use crate::foundation::error::{CardError, CardResult};
use crate::layout::geometry::ResolvedRect;
use crate::render::card::{CARD_HEIGHT, CARD_WIDTH, CardRenderer, RenderReport};
use crate::render::surface::{CardCanvas, download_file_name};

/// Editing session with a live preview of one card.
///
/// Every edit that asks for a render re-renders the card before returning. Renders carry a
/// generation number and a result older than the last committed one is discarded.
pub struct PreviewSession<F> {
    store: ConfigStore,
    editor: EditorSession,
    renderer: CardRenderer<F>,
    card: Option<Card>,
    canvas: Option<CardCanvas>,
    report: Option<RenderReport>,
    generation: u64,
    committed: u64,
}

impl<F: AssetFetcher> PreviewSession<F> {
    /// Session whose view matches the logical card size.
    pub fn new(renderer: CardRenderer<F>) -> Self {
        Self {
            store: ConfigStore::new(),
            editor: EditorSession::new(CARD_WIDTH, CARD_HEIGHT),
            renderer,
            card: None,
            canvas: None,
            report: None,
            generation: 0,
            committed: 0,
        }
    }

    pub fn config(&self) -> &AnimeCardConfig {
        self.store.config()
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn editor(&self) -> &EditorSession {
        &self.editor
    }

    pub fn renderer(&self) -> &CardRenderer<F> {
        &self.renderer
    }

    pub fn card(&self) -> Option<&Card> {
        self.card.as_ref()
    }

    /// Last committed render.
    pub fn canvas(&self) -> Option<&CardCanvas> {
        self.canvas.as_ref()
    }

    pub fn report(&self) -> Option<&RenderReport> {
        self.report.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.committed
    }

    /// Displayed size of the preview in pixels; pointer deltas are normalized by it.
    pub fn set_view_size(&mut self, view_w: f64, view_h: f64) {
        self.editor.set_view_size(view_w, view_h);
    }

    fn edit_context(&self) -> EditContext {
        self.card
            .as_ref()
            .map(EditContext::for_card)
            .unwrap_or_default()
    }

    /// Switch to `card`: apply its category preset, clear the selection and render.
    pub async fn select_card(&mut self, card: Card) -> CardResult<()> {
        self.store.set_for_card(&card);
        self.editor.deselect();
        self.card = Some(card);
        self.render().await
    }

    /// Render the current card with the current configuration.
    pub async fn render(&mut self) -> CardResult<()> {
        let Some(card) = self.card.as_ref() else {
            return Ok(());
        };
        self.generation += 1;
        let generation = self.generation;
        let config = *self.store.config();
        let (canvas, report) = self.renderer.render_card_with_report(card, &config).await?;
        if generation < self.committed {
            tracing::debug!(generation, committed = self.committed, "dropping stale render");
            return Ok(());
        }
        self.committed = generation;
        self.canvas = Some(canvas);
        self.report = Some(report);
        Ok(())
    }

    async fn follow(&mut self, actions: Vec<EditorAction>) -> CardResult<Vec<EditorAction>> {
        if actions.contains(&EditorAction::RenderNeeded) {
            self.render().await?;
        }
        Ok(actions)
    }

    /// Select by hit test without starting a drag.
    pub fn click(&mut self, point: Point) -> Vec<EditorAction> {
        let ctx = self.edit_context();
        self.editor.click(point, self.store.config(), &ctx)
    }

    /// Start a drag when `point` is on a handle of the selection; otherwise click-select.
    pub fn pointer_down(&mut self, point: Point) -> Vec<EditorAction> {
        let ctx = self.edit_context();
        match self.editor.handle_at(point, self.store.config(), &ctx) {
            Some(kind) => self
                .editor
                .pointer_down(kind, point, self.store.config(), &ctx),
            None => self.editor.click(point, self.store.config(), &ctx),
        }
    }

    pub async fn pointer_move(&mut self, point: Point) -> CardResult<Vec<EditorAction>> {
        let actions = self.editor.pointer_move(point, &mut self.store)?;
        self.follow(actions).await
    }

    pub fn pointer_up(&mut self) -> Vec<EditorAction> {
        self.editor.pointer_up()
    }

    pub fn deselect(&mut self) -> Vec<EditorAction> {
        self.editor.deselect()
    }

    pub async fn set_field(
        &mut self,
        element: ElementId,
        field: Field,
        value: f64,
    ) -> CardResult<Vec<EditorAction>> {
        let actions = self
            .editor
            .set_field(element, field, value, &mut self.store)?;
        self.follow(actions).await
    }

    pub fn open_anchor_picker(&mut self, element: ElementId) {
        self.editor.open_anchor_picker(element);
    }

    pub async fn apply_anchor_preset(
        &mut self,
        element: ElementId,
        preset: AnchorPreset,
        modifiers: AnchorModifiers,
    ) -> CardResult<Vec<EditorAction>> {
        let actions = self
            .editor
            .apply_anchor_preset(element, preset, modifiers, &mut self.store)?;
        self.follow(actions).await
    }

    /// Restore the current card's preset and re-render.
    pub async fn reset(&mut self) -> CardResult<()> {
        self.store.reset();
        self.render().await
    }

    /// Load an edited configuration and re-render.
    pub async fn replace_config(&mut self, config: AnimeCardConfig) -> CardResult<()> {
        self.store.replace(config);
        self.render().await
    }

    /// Selection highlight in view pixels.
    pub fn overlay(&self) -> Option<ResolvedRect> {
        self.editor.overlay(self.store.config(), &self.edit_context())
    }

    /// PNG bytes of the last render with their download file name.
    pub fn export_png(&self) -> CardResult<(String, Vec<u8>)> {
        let (Some(card), Some(canvas)) = (self.card.as_ref(), self.canvas.as_ref()) else {
            return Err(CardError::validation("nothing has been rendered yet"));
        };
        Ok((download_file_name(card), canvas.to_png()?))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/preview.rs"]
mod tests;
