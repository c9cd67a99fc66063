//! Request pipeline tests: error classification, pagination through the
//! transport, images, POST, caching and throttling.

mod common;

use std::time::{Duration, Instant};

use common::{FakeTransport, BASE};
use scryfall_sdk::models::Set;
use scryfall_sdk::queries::ImageParams;
use scryfall_sdk::rate_limit::RateLimiter;
use scryfall_sdk::{Method, QueryParams, Record, RecordTag, ScryfallError, ScryfallSdk};
use serde_json::json;

// ---------------------------------------------------------------------------
// Single objects
// ---------------------------------------------------------------------------

#[test]
fn fetch_resolves_a_set_by_its_tag() {
    let (transport, log) = FakeTransport::new();
    let transport = transport.json(
        "sets/385e11a4",
        200,
        common::set_json("mh3", "385e11a4-492b-4d07-b4a6-a1409ef829b8"),
    );
    let sdk = common::setup_sdk(transport);

    let record = sdk
        .fetch("sets/385e11a4", &QueryParams::new(), None)
        .unwrap();
    let set = Set::try_from(record).unwrap();
    assert_eq!(set.api_id, "385e11a4-492b-4d07-b4a6-a1409ef829b8");
    assert_eq!(set.obj.as_deref(), Some("set"));

    assert_eq!(common::request_count(&log), 1);
    let req = common::request(&log, 0);
    assert_eq!(req.method, Method::Get);
    assert_eq!(req.url, format!("{}sets/385e11a4", BASE));
    assert!(!req.follow_redirects);
}

#[test]
fn leading_slash_in_path_is_ignored() {
    let (transport, log) = FakeTransport::new();
    let transport = transport.json("sets/mh3", 200, common::set_json("mh3", "id-1"));
    let sdk = common::setup_sdk(transport);

    sdk.fetch("/sets/mh3", &QueryParams::new(), None).unwrap();
    assert_eq!(common::request(&log, 0).url, format!("{}sets/mh3", BASE));
}

#[test]
fn none_params_never_reach_the_wire() {
    let (transport, log) = FakeTransport::new();
    let transport = transport.json("sets/mh3", 200, common::set_json("mh3", "id-1"));
    let sdk = common::setup_sdk(transport);

    let mut params = QueryParams::new();
    params.set("pretty", true).set_opt::<&str>("lang", None);
    sdk.fetch("sets/mh3", &params, None).unwrap();

    let req = common::request(&log, 0);
    assert_eq!(req.query, vec![("pretty".to_string(), "true".to_string())]);
}

// ---------------------------------------------------------------------------
// Error statuses
// ---------------------------------------------------------------------------

#[test]
fn not_found_status_is_an_http_error() {
    let (transport, _log) = FakeTransport::new();
    let sdk = common::setup_sdk(transport);

    let err = sdk.sets().by_code("zzz").unwrap_err();
    assert_eq!(err.status(), Some(404));
    match err {
        ScryfallError::HttpStatus { url, body, .. } => {
            assert_eq!(url, format!("{}sets/zzz", BASE));
            assert!(body.contains("not_found"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn error_status_with_non_json_body_is_still_an_http_error() {
    let (transport, _log) = FakeTransport::new();
    let transport = transport.raw("sets/mh3", 503, b"<html>down</html>".to_vec());
    let sdk = common::setup_sdk(transport);

    let err = sdk.sets().by_code("mh3").unwrap_err();
    assert_eq!(err.status(), Some(503));
}

#[test]
fn invalid_json_on_success_is_a_json_error() {
    let (transport, _log) = FakeTransport::new();
    let transport = transport.raw("sets/mh3", 200, b"not json".to_vec());
    let sdk = common::setup_sdk(transport);

    let err = sdk.sets().by_code("mh3").unwrap_err();
    assert!(matches!(err, ScryfallError::Json(_)));
}

#[test]
fn unknown_tag_on_a_single_object_is_an_error() {
    let (transport, _log) = FakeTransport::new();
    let transport = transport.json("widgets/1", 200, json!({"object": "widget", "id": "1"}));
    let sdk = common::setup_sdk(transport);

    let err = sdk
        .fetch("widgets/1", &QueryParams::new(), None)
        .unwrap_err();
    assert!(matches!(err, ScryfallError::UnknownRecordTag(_)));
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

#[test]
fn list_endpoint_accumulates_every_page_in_order() {
    let (transport, log) = FakeTransport::new();
    let transport = transport
        .json(
            "sets",
            200,
            common::list_json(
                vec![common::set_json("mh3", "a"), common::set_json("otj", "b")],
                Some("sets?page=2"),
            ),
        )
        .json(
            "sets?page=2",
            200,
            common::list_json(vec![common::set_json("mkm", "c")], None),
        );
    let sdk = common::setup_sdk(transport);

    let list = sdk.sets().all().unwrap();
    let codes: Vec<String> = list
        .into_typed::<Set>()
        .into_iter()
        .map(|s| s.code)
        .collect();
    assert_eq!(codes, vec!["mh3", "otj", "mkm"]);

    assert_eq!(common::request_count(&log), 2);
    assert_eq!(common::request(&log, 1).url, format!("{}sets?page=2", BASE));
}

#[test]
fn accumulated_list_reports_no_more_pages() {
    let (transport, _log) = FakeTransport::new();
    let transport = transport
        .json(
            "sets",
            200,
            common::list_json(vec![common::set_json("mh3", "a")], Some("sets?page=2")),
        )
        .json(
            "sets?page=2",
            200,
            common::list_json(vec![common::set_json("mkm", "c")], None),
        );
    let sdk = common::setup_sdk(transport);

    let list = sdk.sets().all().unwrap();
    assert!(!list.has_more);
    assert!(list.next_page.is_none());
}

#[test]
fn failing_follow_up_page_fails_the_whole_call() {
    let (transport, log) = FakeTransport::new();
    let transport = transport
        .json(
            "sets",
            200,
            common::list_json(vec![common::set_json("mh3", "a")], Some("sets?page=2")),
        )
        .json("sets?page=2", 500, common::error_json(500, "internal"));
    let sdk = common::setup_sdk(transport);

    let err = sdk.sets().all().unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(common::request_count(&log), 2);
}

#[test]
fn fetch_without_result_key_collects_whole_pages() {
    let (transport, _log) = FakeTransport::new();
    let transport = transport
        .json(
            "sets",
            200,
            common::list_json(vec![common::set_json("mh3", "a")], Some("sets?page=2")),
        )
        .json(
            "sets?page=2",
            200,
            common::list_json(vec![common::set_json("mkm", "c")], None),
        );
    let sdk = common::setup_sdk(transport);

    let record = sdk.fetch("sets", &QueryParams::new(), None).unwrap();
    match record {
        Record::List(pages) => {
            assert_eq!(pages.len(), 2);
            assert!(pages.data.iter().all(|p| p.tag() == RecordTag::List));
        }
        other => panic!("expected a list, got {:?}", other.tag()),
    }
}

#[test]
fn unpaginated_fetch_returns_only_the_first_page() {
    let (transport, log) = FakeTransport::new();
    let transport = transport.json(
        "sets",
        200,
        common::list_json(vec![common::set_json("mh3", "a")], Some("sets?page=2")),
    );
    let sdk = common::setup_sdk(transport);

    let record = sdk
        .connection()
        .fetch_json_unpaginated("sets", &QueryParams::new())
        .unwrap();
    match record {
        Record::List(list) => {
            assert_eq!(list.len(), 1);
            assert!(list.has_more);
        }
        other => panic!("expected a list, got {:?}", other.tag()),
    }
    assert_eq!(common::request_count(&log), 1);
}

// ---------------------------------------------------------------------------
// Images and POST
// ---------------------------------------------------------------------------

#[test]
fn image_endpoint_returns_raw_bytes_and_follows_redirects() {
    let png = vec![0x89, b'P', b'N', b'G', 0, 1, 2, 3];
    let (transport, log) = FakeTransport::new();
    let transport = transport.raw("cards/bolt-1", 200, png.clone());
    let sdk = common::setup_sdk(transport);

    let bytes = sdk
        .cards()
        .by_id_image("bolt-1", &ImageParams::version("png"))
        .unwrap();
    assert_eq!(bytes, png);

    let req = common::request(&log, 0);
    assert!(req.follow_redirects);
    assert_eq!(common::query_value(&req, "format").as_deref(), Some("image"));
    assert_eq!(common::query_value(&req, "version").as_deref(), Some("png"));
}

#[test]
fn post_sends_the_body_and_resolves_the_list() {
    let (transport, log) = FakeTransport::new();
    let transport = transport.json(
        "cards/collection",
        200,
        common::list_json(vec![common::card_json("Lightning Bolt", "bolt-1")], None),
    );
    let sdk = common::setup_sdk(transport);

    let body = json!({"identifiers": [{"name": "Lightning Bolt"}]});
    let record = sdk
        .connection()
        .post_json("cards/collection", &body, Some("data"))
        .unwrap();
    assert_eq!(record.tag(), RecordTag::List);

    let req = common::request(&log, 0);
    assert_eq!(req.method, Method::Post);
    assert_eq!(req.body, Some(body));
}

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

#[test]
fn cached_get_is_served_without_a_second_request() {
    let dir = tempfile::tempdir().unwrap();
    let (transport, log) = FakeTransport::new();
    let transport = transport.json("sets/mh3", 200, common::set_json("mh3", "id-1"));
    let sdk = ScryfallSdk::builder()
        .base_url(BASE)
        .rate_limit(Duration::ZERO)
        .cache_dir(dir.path())
        .transport(transport)
        .build()
        .unwrap();

    let first = sdk.sets().by_code("mh3").unwrap();
    let second = sdk.sets().by_code("mh3").unwrap();
    assert_eq!(first.api_id, second.api_id);
    assert_eq!(common::request_count(&log), 1);

    sdk.clear_cache().unwrap();
    sdk.sets().by_code("mh3").unwrap();
    assert_eq!(common::request_count(&log), 2);
}

#[test]
fn error_responses_are_not_cached() {
    let dir = tempfile::tempdir().unwrap();
    let (transport, log) = FakeTransport::new();
    let sdk = ScryfallSdk::builder()
        .base_url(BASE)
        .rate_limit(Duration::ZERO)
        .cache_dir(dir.path())
        .transport(transport)
        .build()
        .unwrap();

    assert!(sdk.sets().by_code("zzz").is_err());
    assert!(sdk.sets().by_code("zzz").is_err());
    assert_eq!(common::request_count(&log), 2);
}

#[test]
fn offline_mode_serves_cached_responses_only() {
    let dir = tempfile::tempdir().unwrap();

    let (transport, _log) = FakeTransport::new();
    let transport = transport.json("sets/mh3", 200, common::set_json("mh3", "id-1"));
    let online = ScryfallSdk::builder()
        .base_url(BASE)
        .rate_limit(Duration::ZERO)
        .cache_dir(dir.path())
        .transport(transport)
        .build()
        .unwrap();
    online.sets().by_code("mh3").unwrap();

    let (transport, log) = FakeTransport::new();
    let offline = ScryfallSdk::builder()
        .base_url(BASE)
        .rate_limit(Duration::ZERO)
        .cache_dir(dir.path())
        .offline(true)
        .transport(transport)
        .build()
        .unwrap();

    let set = offline.sets().by_code("mh3").unwrap();
    assert_eq!(set.code, "mh3");

    let err = offline.sets().by_code("neo").unwrap_err();
    assert!(matches!(err, ScryfallError::NotFound(_)));
    assert_eq!(common::request_count(&log), 0);
}

fn cached_sdk(transport: FakeTransport, dir: &std::path::Path) -> ScryfallSdk {
    ScryfallSdk::builder()
        .base_url(BASE)
        .rate_limit(Duration::ZERO)
        .cache_dir(dir)
        .transport(transport)
        .build()
        .unwrap()
}

#[test]
fn random_cards_are_never_cached() {
    let dir = tempfile::tempdir().unwrap();
    let (transport, log) = FakeTransport::new();
    let transport = transport
        .json("cards/random", 200, common::card_json("Lightning Bolt", "bolt-1"))
        .json("cards/random", 200, common::card_json("Shock", "shock-1"));
    let sdk = cached_sdk(transport, dir.path());

    let first = sdk.cards().random(None).unwrap();
    let second = sdk.cards().random(None).unwrap();
    assert_eq!(first.name, "Lightning Bolt");
    assert_eq!(second.name, "Shock");
    assert_eq!(common::request_count(&log), 2);
}

#[test]
fn expired_entries_are_refetched() {
    let dir = tempfile::tempdir().unwrap();
    let (transport, log) = FakeTransport::new();
    let transport = transport.json("sets/mh3", 200, common::set_json("mh3", "id-1"));
    let sdk = ScryfallSdk::builder()
        .base_url(BASE)
        .rate_limit(Duration::ZERO)
        .cache_dir(dir.path())
        .cache_max_age(Some(Duration::ZERO))
        .transport(transport)
        .build()
        .unwrap();

    sdk.sets().by_code("mh3").unwrap();
    sdk.sets().by_code("mh3").unwrap();
    assert_eq!(common::request_count(&log), 2);
}

#[test]
fn offline_mode_serves_expired_entries() {
    let dir = tempfile::tempdir().unwrap();
    let (transport, _log) = FakeTransport::new();
    let transport = transport.json("sets/mh3", 200, common::set_json("mh3", "id-1"));
    cached_sdk(transport, dir.path()).sets().by_code("mh3").unwrap();

    let (transport, log) = FakeTransport::new();
    let offline = ScryfallSdk::builder()
        .base_url(BASE)
        .rate_limit(Duration::ZERO)
        .cache_dir(dir.path())
        .cache_max_age(Some(Duration::ZERO))
        .offline(true)
        .transport(transport)
        .build()
        .unwrap();

    assert_eq!(offline.sets().by_code("mh3").unwrap().code, "mh3");
    assert_eq!(common::request_count(&log), 0);
}

#[test]
fn corrupt_entry_is_refetched_and_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let (transport, log) = FakeTransport::new();
    let transport = transport.json("sets/mh3", 200, common::set_json("mh3", "id-1"));
    let sdk = cached_sdk(transport, dir.path());

    sdk.sets().by_code("mh3").unwrap();
    let cache = sdk.connection().cache().unwrap();
    let url = format!("{}sets/mh3", BASE);
    let path = cache.path_for(&url);
    std::fs::write(&path, b"definitely not gzip").unwrap();

    let set = sdk.sets().by_code("mh3").unwrap();
    assert_eq!(set.code, "mh3");
    assert_eq!(common::request_count(&log), 2);

    let repaired = cache.get(&url).unwrap();
    let body: serde_json::Value = serde_json::from_slice(&repaired).unwrap();
    assert_eq!(body["code"], "mh3");
}

// ---------------------------------------------------------------------------
// Throttling
// ---------------------------------------------------------------------------

#[test]
fn every_request_waits_for_the_rate_limit() {
    let (transport, _log) = FakeTransport::new();
    let transport = transport
        .json(
            "sets",
            200,
            common::list_json(vec![common::set_json("mh3", "a")], Some("sets?page=2")),
        )
        .json(
            "sets?page=2",
            200,
            common::list_json(vec![common::set_json("mkm", "c")], None),
        );
    let sdk = ScryfallSdk::builder()
        .base_url(BASE)
        .rate_limit(Duration::from_millis(40))
        .transport(transport)
        .build()
        .unwrap();

    let start = Instant::now();
    sdk.sets().all().unwrap();
    assert!(start.elapsed() >= Duration::from_millis(80));
}

#[test]
fn zero_delay_limiter_returns_immediately() {
    let limiter = RateLimiter::new(Duration::ZERO);
    let start = Instant::now();
    limiter.wait("GET", "https://api.scryfall.com/sets");
    assert!(start.elapsed() < Duration::from_millis(50));
}

#[test]
fn default_limiter_uses_half_a_second() {
    assert_eq!(RateLimiter::default().delay(), Duration::from_millis(500));
}

#[test]
fn display_describes_the_client() {
    let (transport, _log) = FakeTransport::new();
    let sdk = common::setup_sdk(transport);
    let text = sdk.to_string();
    assert!(text.contains(BASE));
    assert!(text.contains("rate_limit=0ms"));
    assert!(text.contains("cache=none"));
}
