//! Tag-based resolution of sanitized payloads into typed records.
//!
//! Every Scryfall object carries its kind in the (sanitized) `obj` field. The
//! closed [`RecordTag`] table maps that string to a [`Record`] variant; nested
//! polymorphic fields go through the same table.

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::card::{Card, CardFace, RelatedCard};
use super::list::{ApiList, ListEnvelope};
use super::set::Set;
use super::sub::{BulkData, CardSymbol, Catalog, ManaCost, Ruling};
use crate::error::{Result, ScryfallError};

// ---------------------------------------------------------------------------
// RecordTag
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordTag {
    Card,
    CardFace,
    RelatedCard,
    Set,
    CardSymbol,
    ManaCost,
    Ruling,
    BulkData,
    Catalog,
    List,
}

impl RecordTag {
    /// Look up a tag string. Empty and unknown tags yield `None`.
    pub fn parse(tag: &str) -> Option<Self> {
        let parsed = match tag {
            "card" => RecordTag::Card,
            "card_face" => RecordTag::CardFace,
            "related_card" => RecordTag::RelatedCard,
            "set" => RecordTag::Set,
            "card_symbol" | "symbology" => RecordTag::CardSymbol,
            "mana_cost" => RecordTag::ManaCost,
            "ruling" | "rulings" => RecordTag::Ruling,
            "bulk_data" => RecordTag::BulkData,
            "catalog" => RecordTag::Catalog,
            "list" => RecordTag::List,
            _ => return None,
        };
        Some(parsed)
    }

    /// Canonical tag string as sent by the API.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordTag::Card => "card",
            RecordTag::CardFace => "card_face",
            RecordTag::RelatedCard => "related_card",
            RecordTag::Set => "set",
            RecordTag::CardSymbol => "card_symbol",
            RecordTag::ManaCost => "mana_cost",
            RecordTag::Ruling => "ruling",
            RecordTag::BulkData => "bulk_data",
            RecordTag::Catalog => "catalog",
            RecordTag::List => "list",
        }
    }
}

impl fmt::Display for RecordTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// Any object the API can return.
#[derive(Debug, Clone)]
pub enum Record {
    Card(Box<Card>),
    CardFace(CardFace),
    RelatedCard(RelatedCard),
    Set(Set),
    CardSymbol(CardSymbol),
    ManaCost(ManaCost),
    Ruling(Ruling),
    BulkData(BulkData),
    Catalog(Catalog),
    List(ApiList),
}

impl Record {
    pub fn tag(&self) -> RecordTag {
        match self {
            Record::Card(_) => RecordTag::Card,
            Record::CardFace(_) => RecordTag::CardFace,
            Record::RelatedCard(_) => RecordTag::RelatedCard,
            Record::Set(_) => RecordTag::Set,
            Record::CardSymbol(_) => RecordTag::CardSymbol,
            Record::ManaCost(_) => RecordTag::ManaCost,
            Record::Ruling(_) => RecordTag::Ruling,
            Record::BulkData(_) => RecordTag::BulkData,
            Record::Catalog(_) => RecordTag::Catalog,
            Record::List(_) => RecordTag::List,
        }
    }
}

// ---------------------------------------------------------------------------
// Resolve
// ---------------------------------------------------------------------------

/// A record type reachable through the tag table.
pub trait Resolve: Sized {
    const TAG: RecordTag;

    /// Decode the declared fields of an already tag-checked object.
    fn from_sanitized(value: Value) -> Result<Self>;
}

fn decode_fields<T: DeserializeOwned>(tag: RecordTag, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| ScryfallError::FieldMismatch {
        tag: tag.to_string(),
        message: e.to_string(),
    })
}

macro_rules! resolvable {
    ($ty:ty, $tag:ident) => {
        impl Resolve for $ty {
            const TAG: RecordTag = RecordTag::$tag;

            fn from_sanitized(value: Value) -> Result<Self> {
                decode_fields(Self::TAG, value)
            }
        }

        impl From<$ty> for Record {
            fn from(record: $ty) -> Self {
                Record::$tag(record)
            }
        }

        impl TryFrom<Record> for $ty {
            type Error = Record;

            fn try_from(record: Record) -> std::result::Result<Self, Record> {
                match record {
                    Record::$tag(inner) => Ok(inner),
                    other => Err(other),
                }
            }
        }
    };
}

resolvable!(CardFace, CardFace);
resolvable!(RelatedCard, RelatedCard);
resolvable!(Set, Set);
resolvable!(CardSymbol, CardSymbol);
resolvable!(ManaCost, ManaCost);
resolvable!(Ruling, Ruling);
resolvable!(BulkData, BulkData);
resolvable!(Catalog, Catalog);

impl Resolve for Card {
    const TAG: RecordTag = RecordTag::Card;

    fn from_sanitized(mut value: Value) -> Result<Self> {
        let (all_parts, card_faces) = match value.as_object_mut() {
            Some(map) => (map.remove("all_parts"), map.remove("card_faces")),
            None => (None, None),
        };
        let mut card: Card = decode_fields(Self::TAG, value)?;
        card.all_parts = resolve_nested_field::<RelatedCard>("all_parts", all_parts)?;
        card.card_faces = resolve_nested_field::<CardFace>("card_faces", card_faces)?;
        Ok(card)
    }
}

impl From<Card> for Record {
    fn from(card: Card) -> Self {
        Record::Card(Box::new(card))
    }
}

impl TryFrom<Record> for Card {
    type Error = Record;

    fn try_from(record: Record) -> std::result::Result<Self, Record> {
        match record {
            Record::Card(card) => Ok(*card),
            other => Err(other),
        }
    }
}

impl Resolve for ApiList {
    const TAG: RecordTag = RecordTag::List;

    fn from_sanitized(value: Value) -> Result<Self> {
        let envelope: ListEnvelope = decode_fields(Self::TAG, value)?;
        Ok(envelope.into_list())
    }
}

impl From<ApiList> for Record {
    fn from(list: ApiList) -> Self {
        Record::List(list)
    }
}

impl TryFrom<Record> for ApiList {
    type Error = Record;

    fn try_from(record: Record) -> std::result::Result<Self, Record> {
        match record {
            Record::List(list) => Ok(list),
            other => Err(other),
        }
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Read and look up the `obj` tag of a sanitized object.
pub fn read_tag(value: &Value) -> Result<RecordTag> {
    match value.get("obj") {
        Some(Value::String(tag)) => {
            RecordTag::parse(tag).ok_or_else(|| ScryfallError::UnknownRecordTag(tag.clone()))
        }
        Some(other) => Err(ScryfallError::UnknownRecordTag(other.to_string())),
        None => Err(ScryfallError::UnknownRecordTag("<missing>".to_string())),
    }
}

/// Resolve a sanitized object into whichever record its tag names.
pub fn resolve(value: Value) -> Result<Record> {
    let tag = read_tag(&value)?;
    let record: Record = match tag {
        RecordTag::Card => Card::from_sanitized(value)?.into(),
        RecordTag::CardFace => CardFace::from_sanitized(value)?.into(),
        RecordTag::RelatedCard => RelatedCard::from_sanitized(value)?.into(),
        RecordTag::Set => Set::from_sanitized(value)?.into(),
        RecordTag::CardSymbol => CardSymbol::from_sanitized(value)?.into(),
        RecordTag::ManaCost => ManaCost::from_sanitized(value)?.into(),
        RecordTag::Ruling => Ruling::from_sanitized(value)?.into(),
        RecordTag::BulkData => BulkData::from_sanitized(value)?.into(),
        RecordTag::Catalog => Catalog::from_sanitized(value)?.into(),
        RecordTag::List => ApiList::from_sanitized(value)?.into(),
    };
    Ok(record)
}

/// Resolve a sanitized object that must be of variant `T`.
pub fn resolve_as<T: Resolve>(value: Value) -> Result<T> {
    let tag = read_tag(&value)?;
    if tag != T::TAG {
        return Err(ScryfallError::FieldMismatch {
            tag: tag.to_string(),
            message: format!("expected a '{}' object", T::TAG),
        });
    }
    T::from_sanitized(value)
}

/// Resolve every element, dropping the ones that fail to decode.
pub fn resolve_list(values: Vec<Value>) -> Vec<Record> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match resolve(value) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!(index, error = %e, "Skipping undecodable list element");
                None
            }
        })
        .collect()
}

/// Resolve a nested element declared as `T`; an untagged element is taken to
/// be a `T`.
fn resolve_nested<T: Resolve>(value: Value) -> Result<T> {
    if value.get("obj").is_none() {
        return T::from_sanitized(value);
    }
    resolve_as(value)
}

fn resolve_nested_field<T: Resolve>(field: &str, value: Option<Value>) -> Result<Option<Vec<T>>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(resolve_nested::<T>)
            .collect::<Result<Vec<T>>>()
            .map(Some),
        Some(_) => Err(ScryfallError::FieldMismatch {
            tag: RecordTag::Card.to_string(),
            message: format!("'{}' is not an array", field),
        }),
    }
}
