use crate::foundation::error::{CardError, CardResult};

/// One printing of the card art.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CardImage {
    pub id: u64,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub image_url_small: String,
    #[serde(default)]
    pub image_url_cropped: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BanlistInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ban_tcg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ban_ocg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ban_goat: Option<String>,
}

/// Card record in the card database JSON shape.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Card {
    pub id: u64,
    pub name: String,
    /// Type line, e.g. `"Effect Monster"` or `"Quick-Play Spell Card"`.
    #[serde(rename = "type")]
    pub card_type: String,
    #[serde(default)]
    pub race: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub card_images: Vec<CardImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atk: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub def: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkval: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub linkmarkers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archetype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banlist_info: Option<BanlistInfo>,
}

/// Layout category of a card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardCategory {
    #[default]
    Monster,
    Spell,
    Trap,
}

impl CardCategory {
    /// Classify a type line. Unknown strings are monsters.
    pub fn from_type_line(type_line: &str) -> Self {
        let t = type_line.to_lowercase();
        if t.contains("spell") || t.contains("magic") {
            Self::Spell
        } else if t.contains("trap") {
            Self::Trap
        } else {
            Self::Monster
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monster => "monster",
            Self::Spell => "spell",
            Self::Trap => "trap",
        }
    }
}

impl std::str::FromStr for CardCategory {
    type Err = CardError;

    fn from_str(s: &str) -> CardResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monster" => Ok(Self::Monster),
            "spell" => Ok(Self::Spell),
            "trap" => Ok(Self::Trap),
            other => Err(CardError::validation(format!(
                "unknown card category '{other}'"
            ))),
        }
    }
}

impl Card {
    pub fn category(&self) -> CardCategory {
        CardCategory::from_type_line(&self.card_type)
    }

    pub fn is_monster(&self) -> bool {
        self.category() == CardCategory::Monster
    }

    /// Number of level stars to draw; `0` for non-monsters and cards without a level.
    pub fn star_level(&self) -> u32 {
        if !self.is_monster() {
            return 0;
        }
        self.level.unwrap_or(0)
    }

    /// Cropped artwork URL of the first printing, if any.
    pub fn cropped_image_url(&self) -> Option<&str> {
        self.card_images
            .first()
            .map(|img| img.image_url_cropped.as_str())
            .filter(|url| !url.is_empty())
    }

    /// Full card image URL of the first printing, if any.
    pub fn image_url(&self) -> Option<&str> {
        self.card_images
            .first()
            .map(|img| img.image_url.as_str())
            .filter(|url| !url.is_empty())
    }
}

/// Parse either a single card object or a database response `{ "data": [card, ...] }`.
pub fn parse_cards_json(s: &str) -> CardResult<Vec<Card>> {
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Payload {
        List { data: Vec<Card> },
        Many(Vec<Card>),
        One(Box<Card>),
    }

    let payload: Payload =
        serde_json::from_str(s).map_err(|e| CardError::serde(e.to_string()))?;
    Ok(match payload {
        Payload::List { data } => data,
        Payload::Many(cards) => cards,
        Payload::One(card) => vec![*card],
    })
}

#[cfg(test)]
#[path = "../../tests/unit/card/model.rs"]
mod tests;
