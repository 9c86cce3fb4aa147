use super::*;

#[test]
fn add_inserts_or_appends() {
    let mut d = Deck::new();
    d.add(DeckSection::Main, 1, None);
    d.add(DeckSection::Main, 2, None);
    d.add(DeckSection::Main, 3, Some(0));
    d.add(DeckSection::Main, 4, Some(99));
    assert_eq!(d.main, vec![3, 1, 2, 4]);
    assert_eq!(d.len(), 4);
}

#[test]
fn remove_and_reorder() {
    let mut d = Deck {
        main: vec![10, 20, 30, 40],
        ..Deck::default()
    };
    assert_eq!(d.remove(DeckSection::Main, 1).unwrap(), 20);
    d.reorder(DeckSection::Main, 0, 2).unwrap();
    assert_eq!(d.main, vec![30, 40, 10]);
    d.reorder(DeckSection::Main, 2, 0).unwrap();
    assert_eq!(d.main, vec![10, 30, 40]);
    assert!(d.remove(DeckSection::Extra, 0).is_err());
    assert!(d.reorder(DeckSection::Main, 3, 0).is_err());
}

#[test]
fn transfer_between_sections() {
    let mut d = Deck {
        main: vec![1, 2],
        extra: vec![9],
        side: vec![],
    };
    d.transfer(DeckSection::Main, DeckSection::Extra, 0, 0).unwrap();
    assert_eq!(d.main, vec![2]);
    assert_eq!(d.extra, vec![1, 9]);
    d.transfer(DeckSection::Extra, DeckSection::Side, 1, 5).unwrap();
    assert_eq!(d.side, vec![9]);
    assert!(d.transfer(DeckSection::Side, DeckSection::Main, 1, 0).is_err());
    assert_eq!(d.len(), 3);
}

#[test]
fn extra_deck_types() {
    assert!(is_extra_deck_type("Fusion Monster"));
    assert!(is_extra_deck_type("Synchro Tuner Monster"));
    assert!(is_extra_deck_type("XYZ Monster"));
    assert!(is_extra_deck_type("Link Monster"));
    assert!(!is_extra_deck_type("Effect Monster"));
    assert!(!is_extra_deck_type("Spell Card"));
    assert_eq!(default_section("Link Monster"), DeckSection::Extra);
    assert_eq!(default_section("Trap Card"), DeckSection::Main);
}
