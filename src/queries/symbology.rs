//! Card symbols and mana cost parsing (`/symbology`).

use crate::connection::Connection;
use crate::error::Result;
use crate::models::{ApiList, ManaCost};
use crate::params::QueryParams;

use super::ensure_not_blank;

/// Query interface for card symbology.
pub struct SymbologyQuery<'a> {
    conn: &'a Connection,
}

impl<'a> SymbologyQuery<'a> {
    /// Create a new `SymbologyQuery` bound to the given connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Every card symbol.
    pub fn all(&self) -> Result<ApiList> {
        self.conn.fetch_list("symbology", &QueryParams::new())
    }

    /// Parse a mana cost string such as `"{2}{G}{G}"` or `"2GG"`.
    pub fn parse_mana(&self, cost: &str) -> Result<ManaCost> {
        ensure_not_blank("mana cost", cost)?;
        let mut params = QueryParams::new();
        params.set("cost", cost);
        self.conn.fetch_as("symbology/parse-mana", &params, None)
    }
}
