//! Shared test fixtures for the Scryfall SDK integration tests.
//!
//! Provides a [`FakeTransport`] that serves canned responses by URL and
//! records every request it sees, plus JSON builders for the API objects the
//! tests exchange.

#![allow(dead_code)]

use scryfall_sdk::{HttpRequest, HttpResponse, Result, ScryfallSdk, Transport};
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const BASE: &str = "https://api.scryfall.com/";

/// Requests seen by a [`FakeTransport`], shared with the test body.
pub type RequestLog = Arc<Mutex<Vec<HttpRequest>>>;

/// Transport that answers from a table of canned responses.
///
/// Responses are keyed by the request URL without its extra query
/// parameters. Several responses queued for one URL are served in order; the
/// last one keeps being served. Unknown URLs get a 404 error object.
pub struct FakeTransport {
    routes: Mutex<HashMap<String, VecDeque<HttpResponse>>>,
    log: RequestLog,
}

impl FakeTransport {
    pub fn new() -> (Self, RequestLog) {
        let log: RequestLog = Arc::new(Mutex::new(Vec::new()));
        let transport = Self {
            routes: Mutex::new(HashMap::new()),
            log: log.clone(),
        };
        (transport, log)
    }

    /// Queue a JSON response for `path` (relative to [`BASE`]).
    pub fn json(self, path: &str, status: u16, body: Value) -> Self {
        self.raw(path, status, body.to_string().into_bytes())
    }

    /// Queue a raw byte response for `path` (relative to [`BASE`]).
    pub fn raw(self, path: &str, status: u16, body: Vec<u8>) -> Self {
        let url = format!("{}{}", BASE, path);
        self.routes
            .lock()
            .unwrap()
            .entry(url.clone())
            .or_default()
            .push_back(HttpResponse { status, url, body });
        self
    }
}

impl Transport for FakeTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        self.log.lock().unwrap().push(request.clone());
        let mut routes = self.routes.lock().unwrap();
        match routes.get_mut(&request.url) {
            Some(queue) if queue.len() > 1 => Ok(queue.pop_front().unwrap()),
            Some(queue) if !queue.is_empty() => Ok(queue.front().unwrap().clone()),
            _ => Ok(HttpResponse {
                status: 404,
                url: request.url.clone(),
                body: error_json(404, "not_found").to_string().into_bytes(),
            }),
        }
    }
}

/// Build an SDK over `transport` with throttling disabled.
pub fn setup_sdk(transport: FakeTransport) -> ScryfallSdk {
    ScryfallSdk::builder()
        .base_url(BASE)
        .rate_limit(Duration::ZERO)
        .transport(transport)
        .build()
        .unwrap()
}

/// Number of requests recorded so far.
pub fn request_count(log: &RequestLog) -> usize {
    log.lock().unwrap().len()
}

/// Clone of the `index`-th recorded request.
pub fn request(log: &RequestLog, index: usize) -> HttpRequest {
    log.lock().unwrap()[index].clone()
}

/// Value of a query parameter on a recorded request.
pub fn query_value(request: &HttpRequest, key: &str) -> Option<String> {
    request
        .query
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
}

// ---------------------------------------------------------------------------
// Payload builders
// ---------------------------------------------------------------------------

pub fn error_json(status: u16, code: &str) -> Value {
    json!({
        "object": "error",
        "code": code,
        "status": status,
        "details": "No object found."
    })
}

pub fn set_json(code: &str, id: &str) -> Value {
    json!({
        "object": "set",
        "id": id,
        "code": code,
        "name": format!("Set {}", code.to_uppercase()),
        "set_type": "expansion",
        "card_count": 249,
        "digital": false,
        "foil_only": false,
        "nonfoil_only": false,
        "released_at": "2024-06-14",
        "scryfall_uri": format!("https://scryfall.com/sets/{}", code),
        "uri": format!("{}sets/{}", BASE, id),
        "icon_svg_uri": format!("https://svgs.scryfall.io/sets/{}.svg", code),
        "search_uri": format!("{}cards/search?q=e%3A{}", BASE, code)
    })
}

pub fn card_json(name: &str, id: &str) -> Value {
    // Split in two so each `json!` stays under the macro recursion limit.
    let mut card = json!({
        "object": "card",
        "id": id,
        "oracle_id": "oracle-0001",
        "lang": "en",
        "name": name,
        "layout": "normal",
        "uri": format!("{}cards/{}", BASE, id),
        "scryfall_uri": format!("https://scryfall.com/card/a25/141/{}", id),
        "rulings_uri": format!("{}cards/{}/rulings", BASE, id),
        "prints_search_uri": format!("{}cards/search?q=oracleid%3A0001", BASE),
        "cmc": 1.0,
        "mana_cost": "{R}",
        "type_line": "Instant",
        "oracle_text": "Lightning Bolt deals 3 damage to any target.",
        "colors": ["R"],
        "color_identity": ["R"],
        "keywords": [],
        "legalities": { "modern": "legal", "standard": "not_legal" },
        "games": ["paper", "mtgo"],
        "reserved": false
    });
    let print = json!({
        "oversized": false,
        "booster": true,
        "border_color": "black",
        "collector_number": "141",
        "digital": false,
        "finishes": ["nonfoil", "foil"],
        "frame": "2015",
        "full_art": false,
        "highres_image": true,
        "image_status": "highres_scan",
        "image_uris": { "normal": "https://cards.scryfall.io/normal/front/bolt.jpg" },
        "prices": { "usd": "1.50", "eur": null },
        "promo": false,
        "rarity": "uncommon",
        "related_uris": {},
        "released_at": "2018-03-16",
        "reprint": true,
        "set": "a25",
        "set_id": "41ee6e2f-2b4b-4e4f-9b2f-7c1ee2a5e1a4",
        "set_name": "Masters 25",
        "set_type": "masters",
        "story_spotlight": false,
        "textless": false,
        "variation": false
    });
    merge(&mut card, print);
    card
}

/// Copy every key of `extra` into `target`.
pub fn merge(target: &mut Value, extra: Value) {
    if let (Some(map), Value::Object(extra)) = (target.as_object_mut(), extra) {
        map.extend(extra);
    }
}

pub fn ruling_json(comment: &str) -> Value {
    json!({
        "object": "ruling",
        "oracle_id": "oracle-0001",
        "source": "wotc",
        "published_at": "2020-01-01",
        "comment": comment
    })
}

pub fn list_json(data: Vec<Value>, next_page: Option<&str>) -> Value {
    let mut page = json!({
        "object": "list",
        "has_more": next_page.is_some(),
        "data": data
    });
    if let Some(next) = next_page {
        page["next_page"] = json!(format!("{}{}", BASE, next));
    }
    page
}
