use super::*;

fn card(type_line: &str) -> Card {
    Card {
        name: "Test".to_string(),
        card_type: type_line.to_string(),
        ..Card::default()
    }
}

#[test]
fn category_selects_preset() {
    assert_eq!(
        preset_for_card(&card("Spell Card")),
        preset_for_category(CardCategory::Spell)
    );
    assert_eq!(
        preset_for_card(&card("Normal Trap")),
        preset_for_category(CardCategory::Trap)
    );
    assert_eq!(
        preset_for_card(&card("Effect Monster")),
        preset_for_category(CardCategory::Monster)
    );
    assert_eq!(
        preset_for_card(&card("@@garbage@@")),
        preset_for_category(CardCategory::Monster)
    );
}

#[test]
fn spell_and_trap_share_geometry_without_stats() {
    let spell = preset_for_category(CardCategory::Spell);
    let trap = preset_for_category(CardCategory::Trap);
    assert_eq!(spell, trap);
    assert_eq!((spell.atk.w, spell.atk.h), (0.0, 0.0));
    assert_eq!((spell.def.w, spell.def.h), (0.0, 0.0));
    assert_eq!(spell.stars.size, 0.0);
    assert_eq!(spell.artwork, preset_for_category(CardCategory::Monster).artwork);
}

#[test]
fn monster_preset_values() {
    let m = preset_for_category(CardCategory::Monster);
    assert_eq!((m.layout.w, m.layout.h), (1.0, 1.0));
    assert_eq!(
        (m.artwork.x, m.artwork.y, m.artwork.w, m.artwork.h),
        (0.055, 0.025, 0.89, 0.655)
    );
    assert_eq!((m.stars.y, m.stars.size, m.stars.gap), (0.715, 0.038, 0.005));
    assert_eq!(m.font_size, 0.065);
    assert!(m.artwork.z_index < m.layout.z_index);
}
