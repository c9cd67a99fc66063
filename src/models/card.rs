use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Card — A single printing of a card
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    // -- Core fields --
    pub api_id: String,
    pub obj: String,
    pub lang: String,
    pub oracle_id: Option<String>,
    pub prints_search_uri: String,
    pub rulings_uri: String,
    pub scryfall_uri: String,
    pub uri: String,
    pub arena_id: Option<i64>,
    pub mtgo_id: Option<i64>,
    pub mtgo_foil_id: Option<i64>,
    pub multiverse_ids: Option<Vec<i64>>,
    pub tcgplayer_id: Option<i64>,
    pub tcgplayer_etched_id: Option<i64>,
    pub cardmarket_id: Option<i64>,

    // -- Gameplay fields --
    pub name: String,
    pub layout: String,
    pub cmc: Option<f64>,
    #[serde(default)]
    pub color_identity: Vec<String>,
    pub color_indicator: Option<Vec<String>>,
    pub colors: Option<Vec<String>>,
    pub edhrec_rank: Option<i64>,
    pub penny_rank: Option<i64>,
    pub hand_modifier: Option<String>,
    pub life_modifier: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub legalities: HashMap<String, String>,
    pub loyalty: Option<String>,
    pub defense: Option<String>,
    pub mana_cost: Option<String>,
    pub oracle_text: Option<String>,
    #[serde(default)]
    pub oversized: bool,
    pub power: Option<String>,
    pub toughness: Option<String>,
    pub produced_mana: Option<Vec<String>>,
    #[serde(default)]
    pub reserved: bool,
    pub type_line: Option<String>,
    pub game_changer: Option<bool>,

    // -- Print fields --
    pub artist: Option<String>,
    pub artist_ids: Option<Vec<String>>,
    pub attraction_lights: Option<Vec<i64>>,
    #[serde(default)]
    pub booster: bool,
    pub border_color: String,
    pub card_back_id: Option<String>,
    pub collector_number: String,
    pub content_warning: Option<bool>,
    #[serde(default)]
    pub digital: bool,
    #[serde(default)]
    pub finishes: Vec<String>,
    pub flavor_name: Option<String>,
    pub flavor_text: Option<String>,
    pub frame_effects: Option<Vec<String>>,
    pub frame: String,
    #[serde(default)]
    pub full_art: bool,
    #[serde(default)]
    pub games: Vec<String>,
    #[serde(default)]
    pub highres_image: bool,
    pub illustration_id: Option<String>,
    pub image_status: Option<String>,
    pub image_uris: Option<HashMap<String, String>>,
    #[serde(default)]
    pub prices: HashMap<String, Option<String>>,
    pub printed_name: Option<String>,
    pub printed_text: Option<String>,
    pub printed_type_line: Option<String>,
    #[serde(default)]
    pub promo: bool,
    pub promo_types: Option<Vec<String>>,
    pub purchase_uris: Option<HashMap<String, String>>,
    pub rarity: String,
    #[serde(default)]
    pub related_uris: HashMap<String, String>,
    pub released_at: String,
    #[serde(default)]
    pub reprint: bool,
    pub scryfall_set_uri: Option<String>,
    pub set_name: String,
    pub set_search_uri: Option<String>,
    pub set_type: Option<String>,
    pub set_uri: Option<String>,
    pub set: String,
    pub set_id: String,
    #[serde(default)]
    pub story_spotlight: bool,
    #[serde(default)]
    pub textless: bool,
    #[serde(default)]
    pub variation: bool,
    pub variation_of: Option<String>,
    pub security_stamp: Option<String>,
    pub watermark: Option<String>,
    pub preview: Option<Value>,

    // -- Undocumented --
    pub foil: Option<bool>,
    pub nonfoil: Option<bool>,

    // -- Nested records, resolved through the tag table --
    #[serde(default, skip_deserializing)]
    pub all_parts: Option<Vec<RelatedCard>>,
    #[serde(default, skip_deserializing)]
    pub card_faces: Option<Vec<CardFace>>,
}

impl Card {
    /// True when the card has more than one face.
    pub fn is_multifaced(&self) -> bool {
        self.card_faces.as_ref().is_some_and(|f| f.len() > 1)
    }

    /// Image URI for `version` (e.g. `"normal"`), falling back to the first
    /// face for multi-faced cards that carry images per face.
    pub fn image_uri(&self, version: &str) -> Option<&str> {
        if let Some(uris) = &self.image_uris {
            return uris.get(version).map(String::as_str);
        }
        self.card_faces
            .as_ref()?
            .iter()
            .find_map(|face| face.image_uris.as_ref()?.get(version).map(String::as_str))
    }
}

// ---------------------------------------------------------------------------
// CardFace — One face of a multi-faced card
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardFace {
    pub name: String,
    #[serde(default)]
    pub mana_cost: String,
    pub obj: Option<String>,
    pub artist: Option<String>,
    pub artist_id: Option<String>,
    pub cmc: Option<f64>,
    pub color_indicator: Option<Vec<String>>,
    pub colors: Option<Vec<String>>,
    pub defense: Option<String>,
    pub flavor_name: Option<String>,
    pub flavor_text: Option<String>,
    pub illustration_id: Option<String>,
    pub image_uris: Option<HashMap<String, String>>,
    pub layout: Option<String>,
    pub loyalty: Option<String>,
    pub oracle_id: Option<String>,
    pub oracle_text: Option<String>,
    pub power: Option<String>,
    pub printed_name: Option<String>,
    pub printed_text: Option<String>,
    pub printed_type_line: Option<String>,
    pub toughness: Option<String>,
    pub type_line: Option<String>,
    pub watermark: Option<String>,
}

// ---------------------------------------------------------------------------
// RelatedCard — Entry of a card's `all_parts`
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedCard {
    pub api_id: String,
    pub obj: Option<String>,
    pub component: String,
    pub name: String,
    pub type_line: String,
    pub uri: String,
}
