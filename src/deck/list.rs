use crate::foundation::error::{CardError, CardResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeckSection {
    Main,
    Extra,
    Side,
}

impl DeckSection {
    pub const ALL: [DeckSection; 3] = [Self::Main, Self::Extra, Self::Side];
}

/// Deck list as card ids, in display order per section.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Deck {
    #[serde(default)]
    pub main: Vec<u64>,
    #[serde(default)]
    pub extra: Vec<u64>,
    #[serde(default)]
    pub side: Vec<u64>,
}

impl Deck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(&self, section: DeckSection) -> &[u64] {
        match section {
            DeckSection::Main => &self.main,
            DeckSection::Extra => &self.extra,
            DeckSection::Side => &self.side,
        }
    }

    fn section_mut(&mut self, section: DeckSection) -> &mut Vec<u64> {
        match section {
            DeckSection::Main => &mut self.main,
            DeckSection::Extra => &mut self.extra,
            DeckSection::Side => &mut self.side,
        }
    }

    pub fn len(&self) -> usize {
        self.main.len() + self.extra.len() + self.side.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert `id` at `index`, or append when `index` is `None`. Indices past the end append.
    pub fn add(&mut self, section: DeckSection, id: u64, index: Option<usize>) {
        let cards = self.section_mut(section);
        let at = index.map_or(cards.len(), |i| i.min(cards.len()));
        cards.insert(at, id);
    }

    pub fn remove(&mut self, section: DeckSection, index: usize) -> CardResult<u64> {
        let cards = self.section_mut(section);
        check_index(section, index, cards.len())?;
        Ok(cards.remove(index))
    }

    /// Move the card at `from` so it ends up at `to` in the same section.
    pub fn reorder(&mut self, section: DeckSection, from: usize, to: usize) -> CardResult<()> {
        let cards = self.section_mut(section);
        check_index(section, from, cards.len())?;
        let id = cards.remove(from);
        let to = to.min(cards.len());
        cards.insert(to, id);
        Ok(())
    }

    /// Move a card between sections.
    pub fn transfer(
        &mut self,
        from: DeckSection,
        to: DeckSection,
        from_idx: usize,
        to_idx: usize,
    ) -> CardResult<()> {
        if from == to {
            return self.reorder(from, from_idx, to_idx);
        }
        let id = self.remove(from, from_idx)?;
        self.add(to, id, Some(to_idx));
        Ok(())
    }
}

fn check_index(section: DeckSection, index: usize, len: usize) -> CardResult<()> {
    if index < len {
        Ok(())
    } else {
        Err(CardError::validation(format!(
            "{section:?} deck has {len} cards, index {index} is out of range"
        )))
    }
}

/// Whether a card with this type line belongs in the extra deck.
pub fn is_extra_deck_type(type_line: &str) -> bool {
    let t = type_line.to_ascii_lowercase();
    ["fusion", "synchro", "xyz", "link"]
        .iter()
        .any(|k| t.contains(k))
}

/// Section a card with this type line is added to by default.
pub fn default_section(type_line: &str) -> DeckSection {
    if is_extra_deck_type(type_line) {
        DeckSection::Extra
    } else {
        DeckSection::Main
    }
}

#[cfg(test)]
#[path = "../../tests/unit/deck/list.rs"]
mod tests;
