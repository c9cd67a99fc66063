//! Bulk data descriptors (`/bulk-data`).

use crate::config;
use crate::connection::Connection;
use crate::error::Result;
use crate::models::{ApiList, BulkData};
use crate::params::QueryParams;

use super::{ensure_not_blank, ensure_one_of, segment};

/// Query interface for bulk data files.
pub struct BulkDataQuery<'a> {
    conn: &'a Connection,
}

impl<'a> BulkDataQuery<'a> {
    /// Create a new `BulkDataQuery` bound to the given connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Every bulk data descriptor.
    pub fn all(&self) -> Result<ApiList> {
        self.conn.fetch_list("bulk-data", &QueryParams::new())
    }

    /// Descriptor by Scryfall id.
    pub fn by_id(&self, api_id: &str) -> Result<BulkData> {
        ensure_not_blank("bulk data id", api_id)?;
        self.get(&format!("bulk-data/{}", segment(api_id)))
    }

    /// Descriptor by type, e.g. `"oracle_cards"`.
    pub fn by_type(&self, kind: &str) -> Result<BulkData> {
        ensure_one_of("bulk data type", kind, config::BULK_DATA_TYPES)?;
        self.get(&format!("bulk-data/{}", kind))
    }

    fn get(&self, path: &str) -> Result<BulkData> {
        self.conn.fetch_as(path, &QueryParams::new(), None)
    }
}
