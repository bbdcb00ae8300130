//! The card service: the operations an external UI collaborator calls.
//!
//! Composes the [`store`](crate::store) and the [`imaging`](crate::imaging)
//! codec into add / update / remove / get over one subject's collection.
//! Every operation re-derives the collection from the provider's current
//! text at the start of the call; the service holds no long-lived copy, so
//! an edit screen and a list screen backed by separate service instances
//! always observe each other's writes. Mutations re-serialize and write the
//! whole blob back (last writer wins).
//!
//! Failures come back as typed results; a validation or index failure
//! leaves the stored collection untouched.

use crate::imaging::{self, CodecError, STORED_MAX_DIMENSION};
use crate::persist::Persistence;
use crate::store::{Record, RecordStore};
use crate::subject::Subject;
use image::DynamicImage;
use log::debug;
use thiserror::Error;

/// Input rejection for add/update. No mutation occurs on any of these.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("no image was supplied")]
    MissingImage,
    #[error("no category selected")]
    CategoryUnselected,
    #[error("category {0:?} is not in the subject's menu")]
    UnknownCategory(String),
    #[error("note must not be empty")]
    EmptyNote,
}

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("index {index} out of bounds for {len} record(s)")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("persistence failed: {0}")]
    Storage(#[from] std::io::Error),
}

/// A record decoded for display: the bitmap at the caller's requested
/// resolution plus the category and note text.
#[derive(Debug, Clone)]
pub struct CardView {
    pub image: DynamicImage,
    pub category: String,
    pub note: String,
}

/// Orchestrates one subject's record collection.
pub struct CardService<P> {
    subject: Subject,
    store: RecordStore<P>,
}

impl<P: Persistence> CardService<P> {
    pub fn new(subject: Subject, persistence: P) -> Self {
        Self {
            subject,
            store: RecordStore::new(subject.storage_key(), persistence),
        }
    }

    pub fn subject(&self) -> Subject {
        self.subject
    }

    /// Ingest a new card: decode the raw bytes bounded to the stored cap,
    /// encode canonically, append, write the collection back.
    ///
    /// All three inputs are required atomically; any rejection leaves the
    /// store unchanged.
    pub fn add(
        &self,
        image_bytes: &[u8],
        category: &str,
        note: &str,
    ) -> Result<Record, ServiceError> {
        if image_bytes.is_empty() {
            return Err(ValidationError::MissingImage.into());
        }
        let note = validate_inputs(self.subject, category, note)?;
        let bitmap = imaging::bounded_decode(image_bytes, STORED_MAX_DIMENSION)?;
        let record = Record {
            image: imaging::encode_canonical(&bitmap)?,
            category: category.to_string(),
            note,
        };
        let mut records = self.store.load()?;
        records.push(record.clone());
        self.store.save(&records)?;
        debug!(
            "added card to {:?} ({} record(s) total)",
            self.subject,
            records.len()
        );
        Ok(record)
    }

    /// Replace the record at `index`. `None` for the image keeps the stored
    /// image text verbatim; `Some` re-ingests the new bytes at the stored
    /// cap.
    pub fn update(
        &self,
        index: usize,
        category: &str,
        note: &str,
        new_image_bytes: Option<&[u8]>,
    ) -> Result<Record, ServiceError> {
        let mut records = self.store.load()?;
        let len = records.len();
        let slot = records
            .get_mut(index)
            .ok_or(ServiceError::IndexOutOfBounds { index, len })?;
        let note = validate_inputs(self.subject, category, note)?;
        let image = match new_image_bytes {
            Some(bytes) => {
                let bitmap = imaging::bounded_decode(bytes, STORED_MAX_DIMENSION)?;
                imaging::encode_canonical(&bitmap)?
            }
            None => slot.image.clone(),
        };
        let record = Record {
            image,
            category: category.to_string(),
            note,
        };
        *slot = record.clone();
        self.store.save(&records)?;
        debug!("updated card {index} in {:?}", self.subject);
        Ok(record)
    }

    /// Remove the record at `index`. Later records shift down one index.
    pub fn remove(&self, index: usize) -> Result<(), ServiceError> {
        let mut records = self.store.load()?;
        if index >= records.len() {
            return Err(ServiceError::IndexOutOfBounds {
                index,
                len: records.len(),
            });
        }
        records.remove(index);
        self.store.save(&records)?;
        debug!(
            "removed card {index} from {:?} ({} left)",
            self.subject,
            records.len()
        );
        Ok(())
    }

    /// Decode the record at `index` for display. The stored image is
    /// re-decoded at `max_dimension` on every call; there is no per-record
    /// pixel cache.
    pub fn get(&self, index: usize, max_dimension: u32) -> Result<CardView, ServiceError> {
        let records = self.store.load()?;
        let len = records.len();
        let record = records
            .into_iter()
            .nth(index)
            .ok_or(ServiceError::IndexOutOfBounds { index, len })?;
        Ok(view(record, max_dimension)?)
    }

    /// Current number of records.
    pub fn len(&self) -> Result<usize, ServiceError> {
        Ok(self.store.load()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, ServiceError> {
        Ok(self.len()? == 0)
    }

    /// The raw records, without decoding any image.
    pub fn records(&self) -> Result<Vec<Record>, ServiceError> {
        Ok(self.store.load()?)
    }

    /// Decode every record for a list view, in insertion order.
    pub fn list(&self, max_dimension: u32) -> Result<Vec<CardView>, ServiceError> {
        self.store
            .load()?
            .into_iter()
            .map(|record| view(record, max_dimension).map_err(ServiceError::from))
            .collect()
    }

    /// Decode only the records whose category matches exactly.
    pub fn list_by_category(
        &self,
        category: &str,
        max_dimension: u32,
    ) -> Result<Vec<CardView>, ServiceError> {
        self.store
            .load()?
            .into_iter()
            .filter(|record| record.category == category)
            .map(|record| view(record, max_dimension).map_err(ServiceError::from))
            .collect()
    }
}

fn validate_inputs(
    subject: Subject,
    category: &str,
    note: &str,
) -> Result<String, ValidationError> {
    if category.is_empty() {
        return Err(ValidationError::CategoryUnselected);
    }
    if !subject.has_category(category) {
        return Err(ValidationError::UnknownCategory(category.to_string()));
    }
    let note = note.trim();
    if note.is_empty() {
        return Err(ValidationError::EmptyNote);
    }
    Ok(note.to_string())
}

fn view(record: Record, max_dimension: u32) -> Result<CardView, CodecError> {
    let image = imaging::decode_canonical(&record.image, max_dimension)?;
    Ok(CardView {
        image,
        category: record.category,
        note: record.note,
    })
}
