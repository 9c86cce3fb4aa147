use super::*;
use crate::card::model::CardCategory;
use crate::config::model::ConfigUpdate;
use crate::config::presets::preset_for_category;

fn monster(level: Option<u32>, attribute: Option<&str>) -> Card {
    Card {
        id: 1,
        name: "Beast".to_string(),
        card_type: "Effect Monster".to_string(),
        level,
        attribute: attribute.map(str::to_string),
        atk: Some(1800),
        ..Card::default()
    }
}

fn kinds(layers: &[PlannedLayer]) -> Vec<LayerKind> {
    layers.iter().map(|l| l.kind).collect()
}

#[test]
fn monster_layers_sorted_by_z() {
    let cfg = preset_for_category(CardCategory::Monster);
    let layers = plan_layers(&monster(Some(4), Some("FIRE")), &cfg);
    assert_eq!(
        kinds(&layers),
        vec![
            LayerKind::Artwork,
            LayerKind::Frame,
            LayerKind::Stars,
            LayerKind::Attribute,
            LayerKind::Atk,
            LayerKind::Def
        ]
    );
}

#[test]
fn optional_layers_are_omitted() {
    let cfg = preset_for_category(CardCategory::Monster);
    let layers = plan_layers(&monster(None, Some("SOUND")), &cfg);
    assert_eq!(
        kinds(&layers),
        vec![LayerKind::Artwork, LayerKind::Frame, LayerKind::Atk, LayerKind::Def]
    );

    let spell = Card {
        card_type: "Spell Card".to_string(),
        level: Some(3),
        ..Card::default()
    };
    let layers = plan_layers(&spell, &preset_for_category(CardCategory::Spell));
    assert_eq!(
        kinds(&layers),
        vec![LayerKind::Artwork, LayerKind::Frame, LayerKind::Attribute]
    );
}

#[test]
fn equal_z_keeps_construction_order() {
    let base = preset_for_category(CardCategory::Monster);
    let mut cfg = base;
    for update in [
        ConfigUpdate::Artwork(crate::config::model::RectTransform { z_index: 5, ..base.artwork }),
        ConfigUpdate::Layout(crate::config::model::RectTransform { z_index: 5, ..base.layout }),
        ConfigUpdate::Def(crate::config::model::RectTransform { z_index: -1, ..base.def }),
    ] {
        cfg = cfg.applied(update);
    }
    let layers = plan_layers(&monster(Some(1), Some("DARK")), &cfg);
    assert_eq!(
        kinds(&layers),
        vec![
            LayerKind::Def,
            LayerKind::Stars,
            LayerKind::Attribute,
            LayerKind::Atk,
            LayerKind::Artwork,
            LayerKind::Frame
        ]
    );
}

#[test]
fn cover_wide_image_fits_height_and_crops_width() {
    let target = ResolvedRect::new(10.0, 20.0, 100.0, 100.0);
    let placed = cover_placement(200.0, 100.0, &target);
    assert_eq!(placed, ResolvedRect::new(-40.0, 20.0, 200.0, 100.0));
}

#[test]
fn cover_tall_image_fits_width_and_crops_height() {
    let target = ResolvedRect::new(0.0, 0.0, 100.0, 50.0);
    let placed = cover_placement(100.0, 100.0, &target);
    assert_eq!(placed, ResolvedRect::new(0.0, -25.0, 100.0, 100.0));
    let c = placed.center();
    assert_eq!((c.x, c.y), (50.0, 25.0));
}

#[test]
fn cover_degenerate_inputs_return_target() {
    let target = ResolvedRect::new(1.0, 2.0, 3.0, 4.0);
    assert_eq!(cover_placement(0.0, 10.0, &target), target);
}

#[test]
fn frame_rect_spans_canvas_in_presets() {
    let card = monster(Some(4), None);
    for cat in [CardCategory::Monster, CardCategory::Spell] {
        let r = layer_rect(LayerKind::Frame, &card, &preset_for_category(cat));
        assert_eq!(r, ResolvedRect::new(0.0, 0.0, CARD_WIDTH, CARD_HEIGHT));
    }
    assert!((CARD_WIDTH / CARD_HEIGHT - 63.0 / 88.0).abs() < 0.001);
}

#[test]
fn star_gradient_has_requested_size() {
    let paint = radial_star_gradient(16).unwrap();
    assert_eq!((paint.width, paint.height), (16, 16));
}

#[test]
fn report_queries() {
    let report = RenderReport {
        layers: vec![
            LayerReport {
                kind: LayerKind::Artwork,
                z_index: 0,
                rect: ResolvedRect::default(),
                outcome: LayerOutcome::Fallback("x".to_string()),
            },
            LayerReport {
                kind: LayerKind::Frame,
                z_index: 1,
                rect: ResolvedRect::default(),
                outcome: LayerOutcome::Drawn,
            },
        ],
    };
    assert_eq!(report.order(), vec![LayerKind::Artwork, LayerKind::Frame]);
    assert_eq!(report.failures(), 1);
    assert!(report.layer(LayerKind::Stars).is_none());
    let json = serde_json::to_string(&report.layers[0].outcome).unwrap();
    assert_eq!(json, r#"{"outcome":"fallback","detail":"x"}"#);
}
