use serde::Deserialize;
use serde_json::Value;

use super::record::{resolve_list, Record};

// ---------------------------------------------------------------------------
// ApiList — A (possibly accumulated) list of heterogeneous records
// ---------------------------------------------------------------------------

/// A list envelope whose `data` elements have been resolved into records.
///
/// Elements that fail to decode are dropped, so `data.len()` may be smaller
/// than the number of elements the API returned.
#[derive(Debug, Clone)]
pub struct ApiList {
    pub obj: Option<String>,
    pub data: Vec<Record>,
    pub has_more: bool,
    pub next_page: Option<String>,
    pub total_cards: Option<i64>,
    pub warnings: Option<Vec<String>>,
    pub not_found: Option<Vec<Value>>,
}

#[derive(Deserialize)]
pub(crate) struct ListEnvelope {
    obj: Option<String>,
    data: Vec<Value>,
    #[serde(default)]
    has_more: bool,
    next_page: Option<String>,
    total_cards: Option<i64>,
    warnings: Option<Vec<String>>,
    not_found: Option<Vec<Value>>,
}

impl ListEnvelope {
    pub(crate) fn into_list(self) -> ApiList {
        ApiList {
            obj: self.obj,
            data: resolve_list(self.data),
            has_more: self.has_more,
            next_page: self.next_page,
            total_cards: self.total_cards,
            warnings: self.warnings,
            not_found: self.not_found,
        }
    }
}

impl ApiList {
    /// Build a list whose elements are whole pages, as produced by following
    /// pagination without a named collection field.
    pub fn from_pages(pages: Vec<Value>) -> Self {
        Self {
            obj: Some("list".to_string()),
            data: resolve_list(pages),
            has_more: false,
            next_page: None,
            total_cards: None,
            warnings: None,
            not_found: None,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Keep only the elements of variant `T`, in order.
    pub fn into_typed<T>(self) -> Vec<T>
    where
        T: TryFrom<Record>,
    {
        self.data
            .into_iter()
            .filter_map(|r| T::try_from(r).ok())
            .collect()
    }
}
