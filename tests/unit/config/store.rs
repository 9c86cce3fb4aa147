use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::config::model::RectTransform;

fn card(type_line: &str) -> Card {
    Card {
        name: "Test".to_string(),
        card_type: type_line.to_string(),
        ..Card::default()
    }
}

#[test]
fn reset_before_any_card_yields_monster() {
    let mut store = ConfigStore::new();
    store.update(ConfigUpdate::FontSize(0.2));
    store.reset();
    assert_eq!(*store.config(), preset_for_category(CardCategory::Monster));
}

#[test]
fn reset_after_set_for_card_is_idempotent() {
    let mut store = ConfigStore::new();
    let trap = card("Counter Trap");
    store.set_for_card(&trap);
    let after_set = *store.config();
    store.reset();
    assert_eq!(*store.config(), after_set);
    assert_eq!(*store.config(), preset_for_category(CardCategory::Trap));
    assert_eq!(store.category(), CardCategory::Trap);
}

#[test]
fn reset_uses_tracked_category_not_config_shape() {
    let mut store = ConfigStore::new();
    store.set_for_card(&card("Continuous Spell Card"));
    store.replace(preset_for_category(CardCategory::Monster));
    store.reset();
    assert_eq!(*store.config(), preset_for_category(CardCategory::Spell));
}

#[test]
fn update_is_wholesale_and_observed() {
    let mut store = ConfigStore::new();
    let seen = Rc::new(RefCell::new(Vec::<f64>::new()));
    let sink = Rc::clone(&seen);
    store.observe(move |cfg| sink.borrow_mut().push(cfg.artwork.x));

    let moved = RectTransform {
        x: 0.3,
        ..store.config().artwork
    };
    store.update(ConfigUpdate::Artwork(moved));
    store.reset();

    assert_eq!(*seen.borrow(), vec![0.3, 0.055]);
    assert_eq!(store.revision(), 2);
}

#[test]
fn update_element_rejects_wrong_shape() {
    let mut store = ConfigStore::new();
    let atk = store.config().atk;
    assert!(store.update_element(ElementId::Stars, ElementConfig::Rect(atk)).is_err());
    assert_eq!(store.revision(), 0);
    store
        .update_element(ElementId::Attribute, ElementConfig::Rect(atk))
        .unwrap();
    assert_eq!(store.config().attribute, atk);
}
