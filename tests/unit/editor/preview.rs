use super::*;
use crate::assets::fetch::MemoryFetcher;
use crate::card::model::CardCategory;
use crate::render::card::{LayerKind, LayerOutcome, RenderSettings};

fn session() -> PreviewSession<MemoryFetcher> {
    let settings = RenderSettings {
        pixel_ratio: 1.0,
        ..RenderSettings::default()
    };
    PreviewSession::new(CardRenderer::new(MemoryFetcher::new(), settings))
}

fn monster() -> Card {
    Card {
        id: 46986414,
        name: "Dark Magician".to_string(),
        card_type: "Normal Monster".to_string(),
        level: Some(7),
        attribute: Some("DARK".to_string()),
        atk: Some(2500),
        def: Some(2100),
        ..Card::default()
    }
}

#[test]
fn nothing_rendered_before_a_card_is_selected() {
    let mut s = session();
    pollster::block_on(s.render()).unwrap();
    assert!(s.canvas().is_none());
    assert_eq!(s.generation(), 0);
    assert!(s.export_png().is_err());
}

#[test]
fn select_card_applies_preset_and_renders() {
    let mut s = session();
    let spell = Card {
        id: 5,
        name: "Pot".to_string(),
        card_type: "Spell Card".to_string(),
        ..Card::default()
    };
    pollster::block_on(s.select_card(spell)).unwrap();
    assert_eq!(s.store().category(), CardCategory::Spell);
    assert_eq!(s.config().stars.size, 0.0);
    let canvas = s.canvas().unwrap();
    assert_eq!((canvas.width(), canvas.height()), (420, 586));
    assert_eq!(s.generation(), 1);

    let report = s.report().unwrap();
    assert!(matches!(
        report.layer(LayerKind::Artwork).unwrap().outcome,
        LayerOutcome::Fallback(_)
    ));
}

#[test]
fn drag_re_renders_and_moves_the_element() {
    let mut s = session();
    pollster::block_on(s.select_card(monster())).unwrap();
    let before = s.config().attribute.x;

    assert!(s.overlay().is_none());
    let attr = s
        .editor()
        .element_rect(ElementId::Attribute, s.config(), &EditContext::for_card(&monster()))
        .unwrap();
    assert_eq!(
        s.pointer_down(attr.center()),
        vec![EditorAction::SelectionChanged(Some(ElementId::Attribute))]
    );
    // Second press on the selection starts a move.
    assert!(s.pointer_down(attr.center()).is_empty());
    let target = Point::new(attr.center().x - 42.0, attr.center().y);
    let actions = pollster::block_on(s.pointer_move(target)).unwrap();
    assert_eq!(actions, vec![EditorAction::RenderNeeded]);
    assert!((s.config().attribute.x - (before - 0.1)).abs() < 1e-9);
    assert_eq!(s.generation(), 2);
    assert!(s.pointer_up().is_empty());
    assert_eq!(s.editor().selected(), Some(ElementId::Attribute));
}

#[test]
fn numeric_entry_and_reset() {
    let mut s = session();
    pollster::block_on(s.select_card(monster())).unwrap();
    let preset = *s.config();
    pollster::block_on(s.set_field(ElementId::Atk, Field::X, 0.2)).unwrap();
    assert_eq!(s.config().atk.x, 0.2);
    assert!(pollster::block_on(s.set_field(ElementId::Atk, Field::Gap, 0.2)).is_err());

    pollster::block_on(s.reset()).unwrap();
    assert_eq!(*s.config(), preset);
    assert_eq!(s.generation(), 3);
}

#[test]
fn anchor_preset_renders_and_selects() {
    let mut s = session();
    pollster::block_on(s.select_card(monster())).unwrap();
    s.open_anchor_picker(ElementId::Def);
    let actions = pollster::block_on(s.apply_anchor_preset(
        ElementId::Def,
        AnchorPreset::BottomRight,
        AnchorModifiers::default(),
    ))
    .unwrap();
    assert!(actions.contains(&EditorAction::RenderNeeded));
    assert_eq!(s.config().def.anchor, AnchorPreset::BottomRight);
    assert_eq!(s.editor().anchor_picker(), None);
    assert_eq!(s.editor().selected(), Some(ElementId::Def));
}

#[test]
fn export_uses_card_name() {
    let mut s = session();
    pollster::block_on(s.select_card(monster())).unwrap();
    let (name, bytes) = s.export_png().unwrap();
    assert_eq!(name, download_file_name(&monster()));
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}
