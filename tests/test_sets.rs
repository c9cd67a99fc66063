//! Set query integration tests against canned API responses.

mod common;

use common::{FakeTransport, BASE};
use scryfall_sdk::models::Set;
use scryfall_sdk::ScryfallError;

#[test]
fn by_code_returns_the_set() {
    let (transport, log) = FakeTransport::new();
    let transport = transport.json("sets/mh3", 200, common::set_json("mh3", "set-id-1"));
    let sdk = common::setup_sdk(transport);

    let set = sdk.sets().by_code("mh3").unwrap();
    assert_eq!(set.code, "mh3");
    assert_eq!(set.name, "Set MH3");
    assert_eq!(set.api_id, "set-id-1");
    assert_eq!(set.set_type, "expansion");
    assert_eq!(common::request(&log, 0).url, format!("{}sets/mh3", BASE));
}

#[test]
fn by_id_and_by_tcgplayer_id_build_their_paths() {
    let (transport, log) = FakeTransport::new();
    let transport = transport
        .json("sets/set-id-1", 200, common::set_json("mh3", "set-id-1"))
        .json("sets/tcgplayer/23874", 200, common::set_json("mh3", "set-id-1"));
    let sdk = common::setup_sdk(transport);

    assert_eq!(sdk.sets().by_id("set-id-1").unwrap().code, "mh3");
    assert_eq!(sdk.sets().by_tcgplayer_id(23874).unwrap().code, "mh3");
    assert_eq!(
        common::request(&log, 1).url,
        format!("{}sets/tcgplayer/23874", BASE)
    );
}

#[test]
fn blank_code_is_rejected_without_a_request() {
    let (transport, log) = FakeTransport::new();
    let sdk = common::setup_sdk(transport);

    let err = sdk.sets().by_code(" ").unwrap_err();
    assert!(matches!(err, ScryfallError::Validation(_)));
    assert_eq!(common::request_count(&log), 0);
}

#[test]
fn all_skips_malformed_sets() {
    let mut broken = common::set_json("bad", "set-id-9");
    broken.as_object_mut().unwrap().remove("card_count");
    let (transport, _log) = FakeTransport::new();
    let transport = transport.json(
        "sets",
        200,
        common::list_json(
            vec![
                common::set_json("mh3", "set-id-1"),
                broken,
                common::set_json("neo", "set-id-2"),
            ],
            None,
        ),
    );
    let sdk = common::setup_sdk(transport);

    let sets: Vec<Set> = sdk.sets().all().unwrap().into_typed();
    let codes: Vec<&str> = sets.iter().map(|s| s.code.as_str()).collect();
    assert_eq!(codes, vec!["mh3", "neo"]);
}

#[test]
fn non_set_object_is_a_field_mismatch() {
    let (transport, _log) = FakeTransport::new();
    let transport = transport.json("sets/bolt", 200, common::card_json("Lightning Bolt", "b"));
    let sdk = common::setup_sdk(transport);

    let err = sdk.sets().by_code("bolt").unwrap_err();
    assert!(matches!(err, ScryfallError::FieldMismatch { .. }));
}
