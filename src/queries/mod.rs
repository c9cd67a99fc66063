//! Query modules for the Scryfall SDK.
//!
//! Each module provides a query struct that borrows from a
//! [`Connection`](crate::connection::Connection), validates its arguments
//! before any network call, and returns typed records.

pub mod bulk_data;
pub mod cards;
pub mod catalogs;
pub mod rulings;
pub mod sets;
pub mod symbology;

pub use bulk_data::BulkDataQuery;
pub use cards::{CardQuery, ImageParams, NamedCardParams, SearchCardsParams};
pub use catalogs::CatalogQuery;
pub use rulings::RulingQuery;
pub use sets::SetQuery;
pub use symbology::SymbologyQuery;

use crate::error::{Result, ScryfallError};

/// Fail unless `value` is one of `allowed`.
pub(crate) fn ensure_one_of(what: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(ScryfallError::Validation(format!(
            "{} is not a valid {} (expected one of: {})",
            value,
            what,
            allowed.join(", ")
        )))
    }
}

/// Fail when `value` is empty or only whitespace.
pub(crate) fn ensure_not_blank(what: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(ScryfallError::Validation(format!("{} must not be empty", what)))
    } else {
        Ok(())
    }
}

/// Percent-encode one path segment.
pub(crate) fn segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}
