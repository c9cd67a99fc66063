use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Set — A group of related cards released together
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Set {
    pub api_id: String,
    pub obj: Option<String>,
    pub code: String,
    pub name: String,
    pub set_type: String,
    pub card_count: i64,
    #[serde(default)]
    pub digital: bool,
    #[serde(default)]
    pub foil_only: bool,
    #[serde(default)]
    pub nonfoil_only: bool,
    pub scryfall_uri: String,
    pub uri: String,
    pub icon_svg_uri: String,
    pub search_uri: String,

    pub mtgo_code: Option<String>,
    pub arena_code: Option<String>,
    pub tcgplayer_id: Option<i64>,
    pub released_at: Option<String>,
    pub block_code: Option<String>,
    pub block: Option<String>,
    pub parent_set_code: Option<String>,
    pub printed_size: Option<i64>,
}
