use super::*;

fn card(name: &str, type_line: &str) -> Card {
    Card {
        name: name.to_string(),
        card_type: type_line.to_string(),
        ..Card::default()
    }
}

#[test]
fn known_host_is_proxied_same_origin() {
    let r = proxied_request("https://images.ygoprodeck.com/images/cards_cropped/1.jpg");
    assert_eq!(r.url, "/api/images/images/cards_cropped/1.jpg");
    assert_eq!(r.mode, FetchMode::SameOrigin);
    assert!(r.is_proxied());
}

#[test]
fn other_hosts_stay_cors_anonymous() {
    let r = proxied_request("https://example.com/a.png");
    assert_eq!(r.url, "https://example.com/a.png");
    assert_eq!(r.mode, FetchMode::CorsAnonymous);
    assert!(!r.is_proxied());
    assert_eq!(AssetRequest::local(LEVEL_STAR_ICON).mode, FetchMode::SameOrigin);
}

#[test]
fn frame_precedence() {
    let cases = [
        ("Slifer the Sky Dragon", "Effect Monster", "slifer"),
        ("The Winged Dragon of Ra - Sphere Mode", "Effect Monster", "ra"),
        ("Sheep Token", "Token", "token"),
        ("X", "Fusion Monster", "fusion"),
        ("X", "Synchro Tuner Effect Monster", "synchro"),
        ("X", "XYZ Monster", "xyz"),
        ("X", "Ritual Effect Monster", "ritual"),
        ("X", "Trap Card", "trap"),
        ("X", "Spell Card", "spell"),
        ("X", "Link Monster", "effect"),
        ("X", "Effect Monster", "effect"),
        ("X", "Normal Monster", "normal"),
        ("X", "Skill Card", "spell"),
    ];
    for (name, ty, stem) in cases {
        assert_eq!(
            frame_asset(&card(name, ty)),
            format!("assets/anime/frames/{stem}.png"),
            "{name} / {ty}"
        );
    }
}

#[test]
fn attribute_table() {
    let mut m = card("X", "Effect Monster");
    m.attribute = Some("dark".to_string());
    assert_eq!(
        attribute_icon(&m).as_deref(),
        Some("assets/anime/attributes/dark.png")
    );
    m.attribute = Some("LAUGH".to_string());
    assert_eq!(attribute_icon(&m), None);
    m.attribute = None;
    assert_eq!(attribute_icon(&m), None);

    assert_eq!(
        attribute_icon(&card("X", "Spell Card")).as_deref(),
        Some("assets/anime/attributes/spell.png")
    );
    assert_eq!(
        attribute_icon(&card("X", "Normal Trap")).as_deref(),
        Some("assets/anime/attributes/trap.png")
    );
}
