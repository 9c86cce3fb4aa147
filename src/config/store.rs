use std::fmt;

use crate::card::model::{Card, CardCategory};
use crate::config::model::{AnimeCardConfig, ConfigUpdate, ElementConfig, ElementId};
use crate::config::presets::preset_for_category;
use crate::foundation::error::CardResult;

type Observer = Box<dyn FnMut(&AnimeCardConfig)>;

/// Owned holder of the active [`AnimeCardConfig`].
///
/// Observers registered with [`ConfigStore::observe`] run after every change, in registration
/// order. `revision` counts changes and starts at zero.
pub struct ConfigStore {
    config: AnimeCardConfig,
    category: CardCategory,
    revision: u64,
    observers: Vec<Observer>,
}

impl fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigStore")
            .field("config", &self.config)
            .field("category", &self.category)
            .field("revision", &self.revision)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore {
    /// Store holding the monster preset.
    pub fn new() -> Self {
        Self {
            config: preset_for_category(CardCategory::Monster),
            category: CardCategory::Monster,
            revision: 0,
            observers: Vec::new(),
        }
    }

    pub fn config(&self) -> &AnimeCardConfig {
        &self.config
    }

    pub fn category(&self) -> CardCategory {
        self.category
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn observe(&mut self, observer: impl FnMut(&AnimeCardConfig) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Track `card`'s category and switch to its preset.
    pub fn set_for_card(&mut self, card: &Card) {
        self.category = card.category();
        self.commit(preset_for_category(self.category));
    }

    /// Replace one top-level element. Sub-fields are not merged.
    pub fn update(&mut self, update: ConfigUpdate) {
        let next = self.config.applied(update);
        self.commit(next);
    }

    pub fn update_element(&mut self, id: ElementId, value: ElementConfig) -> CardResult<()> {
        let update = ConfigUpdate::for_element(id, value)?;
        self.update(update);
        Ok(())
    }

    /// Replace the whole configuration, keeping the tracked category.
    pub fn replace(&mut self, config: AnimeCardConfig) {
        self.commit(config);
    }

    /// Restore the preset of the tracked category (monster until a card is set).
    pub fn reset(&mut self) {
        self.commit(preset_for_category(self.category));
    }

    fn commit(&mut self, next: AnimeCardConfig) {
        self.config = next;
        self.revision += 1;
        for observer in &mut self.observers {
            observer(&self.config);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/store.rs"]
mod tests;
