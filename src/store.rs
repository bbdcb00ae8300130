//! Flat-text record store: serialize/deserialize an ordered record
//! collection to and from one persisted string.
//!
//! ## Stored format
//!
//! ```text
//! image ### category ### note @@@ image ### category ### note @@@ ...
//! ```
//!
//! `###` separates the three fields of a record, `@@@` separates records.
//! The canonical image text is base64 and can never contain either
//! delimiter; `category` and `note` are free text, so a value containing a
//! delimiter literal corrupts that record on the next parse. The parser is
//! forgiving: chunks with fewer than three fields are dropped silently and
//! extra fields beyond the third are ignored. Callers rely on this
//! tolerance for partially-written data, so it is contract, not accident.

use crate::persist::Persistence;
use log::warn;
use std::io;

/// Separates records within the persisted blob.
pub const ITEM_DELIMITER: &str = "@@@";
/// Separates the three fields within one record.
pub const FIELD_DELIMITER: &str = "###";

/// One flashcard entry: canonical image text, category label, free-form note.
///
/// An immutable value object. A persisted record always has a non-empty
/// image, a category from its subject's menu, and a non-empty note; edits
/// replace the record at an index rather than mutating in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub image: String,
    pub category: String,
    pub note: String,
}

/// Serialize records in insertion order. The trailing item delimiter is
/// kept; the parser tolerates the final empty chunk.
pub fn serialize(records: &[Record]) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str(&record.image);
        out.push_str(FIELD_DELIMITER);
        out.push_str(&record.category);
        out.push_str(FIELD_DELIMITER);
        out.push_str(&record.note);
        out.push_str(ITEM_DELIMITER);
    }
    out
}

/// Parse the persisted blob back into records.
///
/// Empty input yields an empty collection. Whitespace-only chunks are
/// skipped; chunks with fewer than three fields are dropped with a warning;
/// the first three fields of a chunk become the record and any extras are
/// ignored. Survivor order matches their order in the text.
pub fn deserialize(text: &str) -> Vec<Record> {
    let mut records = Vec::new();
    if text.is_empty() {
        return records;
    }
    for chunk in text.split(ITEM_DELIMITER) {
        if chunk.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = chunk.split(FIELD_DELIMITER).collect();
        // A chunk that opens with the field delimiter has no image text;
        // a persisted record never has an empty image, so the chunk is
        // malformed data, not a record.
        if fields.len() < 3 || fields[0].is_empty() {
            warn!("dropping malformed stored chunk ({} field(s))", fields.len());
            continue;
        }
        records.push(Record {
            image: fields[0].to_string(),
            category: fields[1].to_string(),
            note: fields[2].to_string(),
        });
    }
    records
}

/// A record collection bound to one persistence key.
///
/// An explicit object constructed with its key and provider, with no
/// ambient global collection. [`load`](Self::load) re-reads the provider's
/// current text; [`save`](Self::save) overwrites the whole blob.
pub struct RecordStore<P> {
    key: String,
    persistence: P,
}

impl<P: Persistence> RecordStore<P> {
    pub fn new(key: impl Into<String>, persistence: P) -> Self {
        Self {
            key: key.into(),
            persistence,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Parse the provider's current text into records.
    pub fn load(&self) -> io::Result<Vec<Record>> {
        Ok(deserialize(&self.persistence.read_text(&self.key)?))
    }

    /// Serialize and write the whole collection back.
    pub fn save(&self, records: &[Record]) -> io::Result<()> {
        self.persistence.write_text(&self.key, &serialize(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::MemoryPersistence;

    fn record(image: &str, category: &str, note: &str) -> Record {
        Record {
            image: image.to_string(),
            category: category.to_string(),
            note: note.to_string(),
        }
    }

    // =========================================================================
    // serialize
    // =========================================================================

    #[test]
    fn serialize_empty_is_empty_string() {
        assert_eq!(serialize(&[]), "");
    }

    #[test]
    fn serialize_single_record() {
        let text = serialize(&[record("aW1n", "Matrices", "rank of a product")]);
        assert_eq!(text, "aW1n###Matrices###rank of a product@@@");
    }

    #[test]
    fn serialize_preserves_insertion_order() {
        let text = serialize(&[record("a", "X", "1"), record("b", "Y", "2")]);
        assert_eq!(text, "a###X###1@@@b###Y###2@@@");
    }

    // =========================================================================
    // deserialize
    // =========================================================================

    #[test]
    fn deserialize_empty_input() {
        assert!(deserialize("").is_empty());
    }

    #[test]
    fn deserialize_tolerates_trailing_delimiter() {
        let records = deserialize("a###X###1@@@");
        assert_eq!(records, vec![record("a", "X", "1")]);
    }

    #[test]
    fn deserialize_skips_whitespace_chunks() {
        let records = deserialize("a###X###1@@@   @@@b###Y###2@@@");
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn deserialize_drops_malformed_chunks() {
        // The leading chunk has no image text, the middle chunk has one
        // field; only the full 3-field chunk survives.
        let records = deserialize("###a###b@@@onlyonefield@@@x###y###z@@@");
        assert_eq!(records, vec![record("x", "y", "z")]);
    }

    #[test]
    fn deserialize_drops_chunks_with_two_fields() {
        let records = deserialize("img###Cat@@@x###y###z@@@");
        assert_eq!(records, vec![record("x", "y", "z")]);
    }

    #[test]
    fn deserialize_ignores_extra_fields() {
        // A note containing the field delimiter splits into a 4th field,
        // which is discarded; the first three still form a record.
        let records = deserialize("img###Cat###note###overflow@@@");
        assert_eq!(records, vec![record("img", "Cat", "note")]);
    }

    #[test]
    fn deserialize_preserves_survivor_order() {
        let records = deserialize("a###X###1@@@broken@@@b###Y###2@@@");
        assert_eq!(records[0].note, "1");
        assert_eq!(records[1].note, "2");
    }

    // =========================================================================
    // Round trip
    // =========================================================================

    #[test]
    fn round_trip_is_exact_for_delimiter_free_fields() {
        let records = vec![
            record("aW1hZ2Ux", "Derivatives", "chain rule"),
            record("aW1hZ2Uy", "Integrals", "u-substitution, then parts"),
            record("aW1hZ2Uz", "Limits", "squeeze theorem with sin(x)/x"),
        ];
        assert_eq!(deserialize(&serialize(&records)), records);
    }

    #[test]
    fn round_trip_preserves_unicode_notes() {
        let records = vec![record("aW1n", "Series", "収束判定: ratio test")];
        assert_eq!(deserialize(&serialize(&records)), records);
    }

    // =========================================================================
    // RecordStore
    // =========================================================================

    #[test]
    fn store_load_from_empty_provider() {
        let store = RecordStore::new("k", MemoryPersistence::new());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn store_save_then_load_round_trips() {
        let store = RecordStore::new("k", MemoryPersistence::new());
        let records = vec![record("a", "X", "1"), record("b", "Y", "2")];
        store.save(&records).unwrap();
        assert_eq!(store.load().unwrap(), records);
    }

    #[test]
    fn store_save_overwrites_previous_blob() {
        let store = RecordStore::new("k", MemoryPersistence::new());
        store.save(&[record("a", "X", "1")]).unwrap();
        store.save(&[record("b", "Y", "2")]).unwrap();
        assert_eq!(store.load().unwrap(), vec![record("b", "Y", "2")]);
    }

    #[test]
    fn stores_with_distinct_keys_do_not_interfere() {
        let provider = MemoryPersistence::new();
        let left = RecordStore::new("left", &provider);
        let right = RecordStore::new("right", &provider);
        left.save(&[record("a", "X", "1")]).unwrap();
        right.save(&[record("b", "Y", "2")]).unwrap();
        assert_eq!(left.load().unwrap()[0].image, "a");
        assert_eq!(right.load().unwrap()[0].image, "b");
    }
}
