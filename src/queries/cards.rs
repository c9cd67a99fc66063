//! Card lookups (`/cards/...`).

use serde_json::{json, Value};

use crate::config;
use crate::connection::Connection;
use crate::error::{Result, ScryfallError};
use crate::models::{ApiList, Card, Catalog};
use crate::params::QueryParams;

use super::{ensure_not_blank, ensure_one_of, segment};

// ---------------------------------------------------------------------------
// Parameter structs
// ---------------------------------------------------------------------------

/// Parameters for [`CardQuery::search`].
#[derive(Debug, Clone, Default)]
pub struct SearchCardsParams {
    /// Full-text search query, e.g. `"c:white cmc:1"`.
    pub query: String,
    /// `cards`, `art` or `prints`.
    pub unique: Option<String>,
    pub order: Option<String>,
    /// `auto`, `asc` or `desc`.
    pub dir: Option<String>,
    pub include_extras: bool,
    pub include_multilingual: bool,
    pub include_variations: bool,
    /// First page to fetch; later pages are followed automatically.
    pub page: Option<u32>,
}

impl SearchCardsParams {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_string(),
            ..Default::default()
        }
    }

    fn validate(&self) -> Result<()> {
        ensure_not_blank("search query", &self.query)?;
        if let Some(unique) = &self.unique {
            ensure_one_of("unique mode", unique, config::SEARCH_UNIQUE)?;
        }
        if let Some(order) = &self.order {
            ensure_one_of("sort order", order, config::SEARCH_ORDER)?;
        }
        if let Some(dir) = &self.dir {
            ensure_one_of("sort direction", dir, config::SEARCH_DIR)?;
        }
        Ok(())
    }

    fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .set("q", &self.query)
            .set_opt("unique", self.unique.as_deref())
            .set_opt("order", self.order.as_deref())
            .set_opt("dir", self.dir.as_deref())
            .set("include_extras", self.include_extras)
            .set("include_multilingual", self.include_multilingual)
            .set("include_variations", self.include_variations)
            .set_opt("page", self.page);
        params
    }
}

/// Parameters for [`CardQuery::named`]. Exactly one of `exact` / `fuzzy`
/// must be set.
#[derive(Debug, Clone, Default)]
pub struct NamedCardParams {
    pub exact: Option<String>,
    pub fuzzy: Option<String>,
    /// Restrict the lookup to one set code.
    pub set: Option<String>,
}

impl NamedCardParams {
    pub fn exact(name: &str) -> Self {
        Self {
            exact: Some(name.to_string()),
            ..Default::default()
        }
    }

    pub fn fuzzy(name: &str) -> Self {
        Self {
            fuzzy: Some(name.to_string()),
            ..Default::default()
        }
    }

    fn validate(&self) -> Result<()> {
        match (&self.exact, &self.fuzzy) {
            (Some(name), None) | (None, Some(name)) => ensure_not_blank("card name", name),
            (Some(_), Some(_)) => Err(ScryfallError::Validation(
                "only one of exact or fuzzy may be given".to_string(),
            )),
            (None, None) => Err(ScryfallError::Validation(
                "one of exact or fuzzy must be given".to_string(),
            )),
        }
    }

    fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .set_opt("exact", self.exact.as_deref())
            .set_opt("fuzzy", self.fuzzy.as_deref())
            .set_opt("set", self.set.as_deref());
        params
    }
}

/// Image selection for the `*_image` methods.
#[derive(Debug, Clone, Default)]
pub struct ImageParams {
    /// `Some("back")` for the back face of a double-faced card.
    pub face: Option<String>,
    /// One of `small`, `normal`, `large`, `png`, `art_crop`, `border_crop`.
    pub version: Option<String>,
}

impl ImageParams {
    pub fn version(version: &str) -> Self {
        Self {
            version: Some(version.to_string()),
            ..Default::default()
        }
    }

    fn validate(&self) -> Result<()> {
        if let Some(face) = &self.face {
            ensure_one_of("image face", face, &["back"])?;
        }
        if let Some(version) = &self.version {
            ensure_one_of("image version", version, config::IMAGE_VERSIONS)?;
        }
        Ok(())
    }

    fn apply(&self, params: &mut QueryParams) {
        params
            .set("format", "image")
            .set_opt("face", self.face.as_deref())
            .set_opt("version", self.version.as_deref());
    }
}

// ---------------------------------------------------------------------------
// CardQuery
// ---------------------------------------------------------------------------

/// Query interface for cards.
pub struct CardQuery<'a> {
    conn: &'a Connection,
}

impl<'a> CardQuery<'a> {
    /// Create a new `CardQuery` bound to the given connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Full-text search, following every result page.
    pub fn search(&self, params: &SearchCardsParams) -> Result<ApiList> {
        params.validate()?;
        self.conn.fetch_list("cards/search", &params.to_params())
    }

    /// Look up a card by exact or fuzzy name.
    pub fn named(&self, params: &NamedCardParams) -> Result<Card> {
        params.validate()?;
        let mut query = params.to_params();
        query.set("format", "json");
        self.card("cards/named", &query)
    }

    /// Image of a card looked up by name.
    pub fn named_image(&self, params: &NamedCardParams, image: &ImageParams) -> Result<Vec<u8>> {
        params.validate()?;
        image.validate()?;
        let mut query = params.to_params();
        image.apply(&mut query);
        self.conn.fetch_image("cards/named", &query)
    }

    /// Up to 20 card names starting with `query`.
    ///
    /// `query` must be at least three characters long.
    pub fn autocomplete(&self, query: &str, include_extras: bool) -> Result<Catalog> {
        if query.trim().chars().count() < 3 {
            return Err(ScryfallError::Validation(
                "autocomplete query must be at least 3 characters".to_string(),
            ));
        }
        let mut params = QueryParams::new();
        params
            .set("q", query)
            .set("include_extras", include_extras);
        self.conn.fetch_as("cards/autocomplete", &params, None)
    }

    /// A random card, optionally restricted by a search query.
    pub fn random(&self, query: Option<&str>) -> Result<Card> {
        let mut params = QueryParams::new();
        params.set_opt("q", query).set("format", "json");
        self.card("cards/random", &params)
    }

    /// Image of a random card.
    pub fn random_image(&self, query: Option<&str>, image: &ImageParams) -> Result<Vec<u8>> {
        image.validate()?;
        let mut params = QueryParams::new();
        params.set_opt("q", query);
        image.apply(&mut params);
        self.conn.fetch_image("cards/random", &params)
    }

    /// Fetch up to 75 cards by identifier in one request.
    ///
    /// Each identifier is a JSON object using one of the accepted key
    /// combinations (`id`, `mtgo_id`, `multiverse_id`, `oracle_id`,
    /// `illustration_id`, `name`, `name` + `set`, `set` + `collector_number`).
    /// Identifiers the API cannot match are reported in `not_found`.
    pub fn collection(&self, identifiers: &[Value]) -> Result<ApiList> {
        validate_identifiers(identifiers)?;
        let body = json!({ "identifiers": identifiers });
        self.conn.post_as("cards/collection", &body, Some("data"))
    }

    /// Look up a card by set code and collector number, optionally in a
    /// specific language.
    pub fn by_set_number(&self, set_code: &str, number: &str, lang: Option<&str>) -> Result<Card> {
        let path = set_number_path(set_code, number, lang)?;
        let mut params = QueryParams::new();
        params.set("format", "json");
        self.card(&path, &params)
    }

    /// Image of a card looked up by set code and collector number.
    pub fn by_set_number_image(
        &self,
        set_code: &str,
        number: &str,
        lang: Option<&str>,
        image: &ImageParams,
    ) -> Result<Vec<u8>> {
        let path = set_number_path(set_code, number, lang)?;
        image.validate()?;
        let mut params = QueryParams::new();
        image.apply(&mut params);
        self.conn.fetch_image(&path, &params)
    }

    /// Look up a card by a platform-specific id (`multiverse`, `mtgo`,
    /// `arena`, `tcgplayer`, `cardmarket`).
    pub fn by_platform_id(&self, platform: &str, platform_id: &str) -> Result<Card> {
        let path = self.platform_path(platform, platform_id)?;
        let mut params = QueryParams::new();
        params.set("format", "json");
        self.card(&path, &params)
    }

    /// Image of a card looked up by a platform-specific id.
    pub fn by_platform_id_image(
        &self,
        platform: &str,
        platform_id: &str,
        image: &ImageParams,
    ) -> Result<Vec<u8>> {
        let path = self.platform_path(platform, platform_id)?;
        image.validate()?;
        let mut params = QueryParams::new();
        image.apply(&mut params);
        self.conn.fetch_image(&path, &params)
    }

    /// Look up a card by its Scryfall id.
    pub fn by_id(&self, api_id: &str) -> Result<Card> {
        ensure_not_blank("card id", api_id)?;
        self.card(&format!("cards/{}", segment(api_id)), &QueryParams::new())
    }

    /// Image of a card looked up by its Scryfall id.
    pub fn by_id_image(&self, api_id: &str, image: &ImageParams) -> Result<Vec<u8>> {
        ensure_not_blank("card id", api_id)?;
        image.validate()?;
        let mut params = QueryParams::new();
        image.apply(&mut params);
        self.conn
            .fetch_image(&format!("cards/{}", segment(api_id)), &params)
    }

    fn card(&self, path: &str, params: &QueryParams) -> Result<Card> {
        self.conn.fetch_as(path, params, None)
    }

    fn platform_path(&self, platform: &str, platform_id: &str) -> Result<String> {
        let config = self.conn.config();
        if !config.is_platform(platform) {
            return Err(ScryfallError::Validation(format!(
                "{} is not a valid platform (expected one of: {})",
                platform,
                config.platforms.join(", ")
            )));
        }
        ensure_not_blank("platform id", platform_id)?;
        Ok(format!("cards/{}/{}", platform, segment(platform_id)))
    }
}

fn set_number_path(set_code: &str, number: &str, lang: Option<&str>) -> Result<String> {
    ensure_not_blank("set code", set_code)?;
    ensure_not_blank("collector number", number)?;
    let mut path = format!("cards/{}/{}", segment(set_code), segment(number));
    if let Some(lang) = lang {
        ensure_not_blank("language", lang)?;
        path.push('/');
        path.push_str(&segment(lang));
    }
    Ok(path)
}

/// Check every collection identifier before anything is sent.
pub fn validate_identifiers(identifiers: &[Value]) -> Result<()> {
    if identifiers.is_empty() {
        return Err(ScryfallError::Validation(
            "at least one card identifier is required".to_string(),
        ));
    }
    if identifiers.len() > config::MAX_COLLECTION_IDENTIFIERS {
        return Err(ScryfallError::Validation(format!(
            "at most {} card identifiers may be requested at once, got {}",
            config::MAX_COLLECTION_IDENTIFIERS,
            identifiers.len()
        )));
    }

    for identifier in identifiers {
        let map = identifier.as_object().ok_or_else(|| {
            ScryfallError::Validation(format!("{} is not a card identifier object", identifier))
        })?;
        if map.is_empty() {
            return Err(ScryfallError::Validation(
                "card identifier must not be empty".to_string(),
            ));
        }
        for key in map.keys() {
            if !config::CARD_IDENTIFIERS.contains(&key.as_str()) {
                return Err(ScryfallError::Validation(format!(
                    "{} is not a valid card identifier to search",
                    key
                )));
            }
        }
        if map.contains_key("set")
            && !(map.contains_key("name") || map.contains_key("collector_number"))
        {
            return Err(ScryfallError::Validation(format!(
                "{} must pair 'set' with 'name' or 'collector_number'",
                identifier
            )));
        }
        if map.contains_key("collector_number") && !map.contains_key("set") {
            return Err(ScryfallError::Validation(format!(
                "{} must include 'set' alongside 'collector_number'",
                identifier
            )));
        }
    }
    Ok(())
}
