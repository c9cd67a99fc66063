//! Set lookups (`/sets`).

use crate::connection::Connection;
use crate::error::Result;
use crate::models::{ApiList, Set};
use crate::params::QueryParams;

use super::{ensure_not_blank, segment};

/// Query interface for MTG sets.
pub struct SetQuery<'a> {
    conn: &'a Connection,
}

impl<'a> SetQuery<'a> {
    /// Create a new `SetQuery` bound to the given connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// List every set, following all pages.
    pub fn all(&self) -> Result<ApiList> {
        self.conn.fetch_list("sets", &QueryParams::new())
    }

    /// Get a set by its three-to-five letter code.
    pub fn by_code(&self, code: &str) -> Result<Set> {
        ensure_not_blank("set code", code)?;
        self.get(&format!("sets/{}", segment(code)))
    }

    /// Get a set by its TCGplayer group id.
    pub fn by_tcgplayer_id(&self, tcgplayer_id: u64) -> Result<Set> {
        self.get(&format!("sets/tcgplayer/{}", tcgplayer_id))
    }

    /// Get a set by its Scryfall id.
    pub fn by_id(&self, api_id: &str) -> Result<Set> {
        ensure_not_blank("set id", api_id)?;
        self.get(&format!("sets/{}", segment(api_id)))
    }

    fn get(&self, path: &str) -> Result<Set> {
        self.conn.fetch_as(path, &QueryParams::new(), None)
    }
}
