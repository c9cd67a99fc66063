//! Catalogs of card names, types and other flat string lists (`/catalog`).

use crate::config;
use crate::connection::Connection;
use crate::error::Result;
use crate::models::Catalog;
use crate::params::QueryParams;

use super::ensure_one_of;

/// Query interface for catalogs.
pub struct CatalogQuery<'a> {
    conn: &'a Connection,
}

impl<'a> CatalogQuery<'a> {
    /// Create a new `CatalogQuery` bound to the given connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Fetch one catalog by name, e.g. `"creature-types"`.
    pub fn get(&self, name: &str) -> Result<Catalog> {
        ensure_one_of("catalog", name, config::CATALOGS)?;
        self.conn
            .fetch_as(&format!("catalog/{}", name), &QueryParams::new(), None)
    }
}
