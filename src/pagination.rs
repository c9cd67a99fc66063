//! Follow `next_page` links and merge the pages into one logical list.

use std::collections::HashSet;

use serde_json::Value;
use tracing::debug;

use crate::error::{Result, ScryfallError};

/// Read the pagination markers of a page.
///
/// Returns the `next_page` link only when `has_more` is `true` and the link
/// is a string; any other shape ends the chain.
pub fn next_link(page: &Value) -> Option<&str> {
    let has_more = page.get("has_more").and_then(Value::as_bool).unwrap_or(false);
    if !has_more {
        return None;
    }
    page.get("next_page").and_then(Value::as_str)
}

/// Resolve every page reachable from `first_page` into one value.
///
/// `fetch_next` receives a path relative to `base_url` and returns the
/// sanitized page it points to. Each iteration reads the pagination markers of
/// the page fetched last.
///
/// With `result_key = Some(k)` the returned value is `first_page` with its `k`
/// array extended by every later page's `k` array, and its `has_more` /
/// `next_page` reflecting the final page. With `result_key = None` the
/// returned value is an array holding every page object in order. A page
/// without pagination markers is returned unchanged either way.
pub fn resolve_pages<F>(
    first_page: Value,
    result_key: Option<&str>,
    base_url: &str,
    mut fetch_next: F,
) -> Result<Value>
where
    F: FnMut(&str) -> Result<Value>,
{
    let Some(first_link) = next_link(&first_page).map(str::to_string) else {
        return Ok(first_page);
    };

    let mut seen: HashSet<String> = HashSet::new();
    let mut link = Some(first_link);
    let mut accumulator = first_page;
    let mut pages: Vec<Value> = Vec::new();

    if let Some(key) = result_key {
        collection(&accumulator, key)?;
    }

    while let Some(current) = link.take() {
        if !seen.insert(current.clone()) {
            return Err(ScryfallError::Pagination(format!(
                "next_page link repeated: {}",
                current
            )));
        }

        let path = current.strip_prefix(base_url).unwrap_or(current.as_str());
        debug!(page = seen.len() + 1, path, "Following next_page");
        let page = fetch_next(path)?;
        link = next_link(&page).map(str::to_string);

        match result_key {
            Some(key) => {
                let items = collection(&page, key)?.clone();
                append(&mut accumulator, key, items)?;
                copy_markers(&mut accumulator, &page);
            }
            None => pages.push(page),
        }
    }

    match result_key {
        Some(_) => Ok(accumulator),
        None => {
            pages.insert(0, accumulator);
            Ok(Value::Array(pages))
        }
    }
}

fn collection<'a>(page: &'a Value, key: &str) -> Result<&'a Vec<Value>> {
    page.get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| ScryfallError::FieldMismatch {
            tag: page_tag(page),
            message: format!("page has no '{}' array", key),
        })
}

fn append(accumulator: &mut Value, key: &str, items: Vec<Value>) -> Result<()> {
    let tag = page_tag(accumulator);
    match accumulator.get_mut(key).and_then(Value::as_array_mut) {
        Some(existing) => {
            existing.extend(items);
            Ok(())
        }
        None => Err(ScryfallError::FieldMismatch {
            tag,
            message: format!("page has no '{}' array", key),
        }),
    }
}

fn copy_markers(accumulator: &mut Value, page: &Value) {
    let Some(target) = accumulator.as_object_mut() else {
        return;
    };
    target.insert(
        "has_more".to_string(),
        page.get("has_more").cloned().unwrap_or(Value::Bool(false)),
    );
    match page.get("next_page") {
        Some(next) => {
            target.insert("next_page".to_string(), next.clone());
        }
        None => {
            target.remove("next_page");
        }
    }
}

fn page_tag(page: &Value) -> String {
    page.get("obj")
        .and_then(Value::as_str)
        .unwrap_or("list")
        .to_string()
}
