//! Card rulings (`/cards/.../rulings`).

use crate::config;
use crate::connection::Connection;
use crate::error::Result;
use crate::models::{ApiList, Ruling};
use crate::params::QueryParams;

use super::{ensure_not_blank, ensure_one_of, segment};

/// Query interface for Oracle rulings.
pub struct RulingQuery<'a> {
    conn: &'a Connection,
}

impl<'a> RulingQuery<'a> {
    /// Create a new `RulingQuery` bound to the given connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Rulings for a card identified by a platform id (`multiverse`, `mtgo`
    /// or `arena`).
    pub fn by_platform_id(&self, platform: &str, platform_id: &str) -> Result<ApiList> {
        ensure_one_of("rulings platform", platform, config::RULINGS_PLATFORMS)?;
        ensure_not_blank("platform id", platform_id)?;
        self.list(&format!("cards/{}/{}/rulings", platform, segment(platform_id)))
    }

    /// Rulings for a card identified by set code and collector number.
    pub fn by_set_number(&self, set_code: &str, number: &str) -> Result<ApiList> {
        ensure_not_blank("set code", set_code)?;
        ensure_not_blank("collector number", number)?;
        self.list(&format!(
            "cards/{}/{}/rulings",
            segment(set_code),
            segment(number)
        ))
    }

    /// Rulings for a card identified by its Scryfall id.
    pub fn by_id(&self, api_id: &str) -> Result<ApiList> {
        ensure_not_blank("card id", api_id)?;
        self.list(&format!("cards/{}/rulings", segment(api_id)))
    }

    /// Rulings for a card by its Scryfall id, keeping only ruling records.
    pub fn rulings_for(&self, api_id: &str) -> Result<Vec<Ruling>> {
        Ok(self.by_id(api_id)?.into_typed())
    }

    fn list(&self, path: &str) -> Result<ApiList> {
        self.conn.fetch_list(path, &QueryParams::new())
    }
}
