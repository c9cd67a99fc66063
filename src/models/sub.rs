use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CardSymbol
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardSymbol {
    pub obj: Option<String>,
    pub symbol: String,
    pub english: String,
    #[serde(default)]
    pub transposable: bool,
    #[serde(default)]
    pub represents_mana: bool,
    #[serde(default)]
    pub appears_in_mana_costs: bool,
    #[serde(default)]
    pub funny: bool,
    #[serde(default)]
    pub colors: Vec<String>,
    pub loose_variant: Option<String>,
    pub mana_value: Option<f64>,
    pub cmc: Option<f64>,
    #[serde(default)]
    pub hybrid: bool,
    #[serde(default)]
    pub phyrexian: bool,
    pub gatherer_alternates: Option<Vec<String>>,
    pub svg_uri: Option<String>,
}

// ---------------------------------------------------------------------------
// ManaCost — Result of `symbology/parse-mana`
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManaCost {
    pub obj: Option<String>,
    pub cost: String,
    pub cmc: f64,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub colorless: bool,
    #[serde(default)]
    pub monocolored: bool,
    #[serde(default)]
    pub multicolored: bool,
}

// ---------------------------------------------------------------------------
// Ruling
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ruling {
    pub obj: Option<String>,
    pub source: String,
    pub published_at: String,
    pub comment: String,
    pub oracle_id: Option<String>,
}

// ---------------------------------------------------------------------------
// BulkData — Descriptor of a downloadable bulk file
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkData {
    pub api_id: String,
    pub obj: Option<String>,
    pub uri: String,
    #[serde(rename = "type")]
    pub type_field: String,
    pub name: String,
    pub description: String,
    pub download_uri: String,
    pub updated_at: String,
    pub size: Option<i64>,
    pub compressed_size: Option<i64>,
    pub content_type: String,
    pub content_encoding: String,
}

// ---------------------------------------------------------------------------
// Catalog — A flat list of strings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub obj: Option<String>,
    pub uri: Option<String>,
    pub total_values: i64,
    #[serde(default)]
    pub data: Vec<String>,
}
