use std::path::PathBuf;
use std::time::Duration;

pub const API_BASE: &str = "https://api.scryfall.com/";

/// Delay applied before every outbound request.
pub const DEFAULT_RATE_LIMIT: Duration = Duration::from_millis(500);

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Age after which a cached response is refetched.
pub const DEFAULT_CACHE_MAX_AGE: Duration = Duration::from_secs(24 * 60 * 60);

/// Endpoints whose responses differ on every call and are never cached.
pub const UNCACHED_PATHS: &[&str] = &["cards/random"];

pub const USER_AGENT: &str = concat!("scryfall-sdk/", env!("CARGO_PKG_VERSION"));

pub const ACCEPT: &str = "application/json;q=0.9,*/*;q=0.8";

/// Most identifiers a single `cards/collection` request accepts.
pub const MAX_COLLECTION_IDENTIFIERS: usize = 75;

/// Platforms whose ids can be used to look up a card.
pub const PLATFORMS: &[&str] = &["multiverse", "mtgo", "arena", "tcgplayer", "cardmarket"];

/// Platforms whose ids can be used to look up rulings.
pub const RULINGS_PLATFORMS: &[&str] = &["multiverse", "mtgo", "arena"];

/// Keys accepted inside a card collection identifier.
pub const CARD_IDENTIFIERS: &[&str] = &[
    "id",
    "mtgo_id",
    "multiverse_id",
    "oracle_id",
    "illustration_id",
    "name",
    "set",
    "collector_number",
];

pub const CATALOGS: &[&str] = &[
    "card-names",
    "artist-names",
    "word-bank",
    "supertypes",
    "card-types",
    "artifact-types",
    "battle-types",
    "creature-types",
    "enchantment-types",
    "land-types",
    "planeswalker-types",
    "spell-types",
    "powers",
    "toughnesses",
    "loyalties",
    "watermarks",
    "keyword-abilities",
    "keyword-actions",
    "ability-words",
    "flavor-words",
];

pub const BULK_DATA_TYPES: &[&str] = &[
    "oracle_cards",
    "unique_artwork",
    "default_cards",
    "all_cards",
    "rulings",
];

pub const IMAGE_VERSIONS: &[&str] = &[
    "small",
    "normal",
    "large",
    "png",
    "art_crop",
    "border_crop",
];

pub const SEARCH_UNIQUE: &[&str] = &["cards", "art", "prints"];

pub const SEARCH_ORDER: &[&str] = &[
    "name", "set", "released", "rarity", "color", "usd", "tix", "eur", "cmc", "power",
    "toughness", "edhrec", "penny", "artist", "review",
];

pub const SEARCH_DIR: &[&str] = &["auto", "asc", "desc"];

pub fn default_cache_dir() -> PathBuf {
    if let Some(cache) = dirs::cache_dir() {
        cache.join("scryfall-sdk")
    } else {
        PathBuf::from(".scryfall-sdk-cache")
    }
}

/// Immutable per-client configuration, fixed at build time.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root; always ends with `/`.
    pub base_url: String,
    pub rate_limit: Duration,
    pub platforms: Vec<String>,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: API_BASE.to_string(),
            rate_limit: DEFAULT_RATE_LIMIT,
            platforms: PLATFORMS.iter().map(|p| p.to_string()).collect(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Resolve an endpoint path against the base URL.
    ///
    /// Absolute URLs pass through untouched.
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path.trim_start_matches('/'))
        }
    }

    /// False for URLs under one of [`UNCACHED_PATHS`].
    pub fn is_cacheable(&self, url: &str) -> bool {
        let path = url.strip_prefix(self.base_url.as_str()).unwrap_or(url);
        let path = path.split('?').next().unwrap_or(path);
        !UNCACHED_PATHS.iter().any(|p| path.starts_with(p))
    }

    pub fn is_platform(&self, platform: &str) -> bool {
        self.platforms.iter().any(|p| p == platform)
    }
}
