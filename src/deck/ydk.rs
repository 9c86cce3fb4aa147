//! Plain-text `.ydk` deck lists.
//!
//! ```text
//! #created by animecard
//! #main
//! 46986414
//! #extra
//! !side
//! ```

use crate::deck::list::{Deck, DeckSection};
use crate::foundation::error::{CardError, CardResult};

pub const YDK_HEADER: &str = "#created by animecard";

pub fn parse_ydk(input: &str) -> CardResult<Deck> {
    let mut deck = Deck::new();
    let mut section: Option<DeckSection> = None;
    for (n, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        match line {
            "#main" => section = Some(DeckSection::Main),
            "#extra" => section = Some(DeckSection::Extra),
            "!side" => section = Some(DeckSection::Side),
            _ if line.starts_with('#') => {}
            _ => {
                let id: u64 = line.parse().map_err(|_| {
                    CardError::validation(format!("line {}: `{line}` is not a card id", n + 1))
                })?;
                let Some(section) = section else {
                    return Err(CardError::validation(format!(
                        "line {}: card id before any section header",
                        n + 1
                    )));
                };
                deck.add(section, id, None);
            }
        }
    }
    Ok(deck)
}

pub fn to_ydk(deck: &Deck) -> String {
    let mut out = String::from(YDK_HEADER);
    out.push('\n');
    for (section, header) in DeckSection::ALL.into_iter().zip(["#main", "#extra", "!side"]) {
        out.push_str(header);
        out.push('\n');
        for id in deck.section(section) {
            out.push_str(&id.to_string());
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/deck/ydk.rs"]
mod tests;
