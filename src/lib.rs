//! # Studydeck
//!
//! Core library for an illustrated flashcard study-list app. A user builds
//! small study lists (image + category + free-form note) for several
//! subjects; collections persist locally as one flat text blob per subject
//! and are browsable, editable, and deletable by index.
//!
//! The crate is the engine only. Screens, navigation, dialogs, and the
//! system gallery picker are external collaborators: they hand this crate
//! raw image bytes and strings, and render the bitmaps and typed errors it
//! returns.
//!
//! # Architecture
//!
//! Two low-level pieces carry the real invariants, with a thin service on
//! top:
//!
//! ```text
//! raw bytes → imaging (bounded decode + canonical encode)
//!                 ↓
//!            service (add / update / remove / get)
//!                 ↓
//!            store (flat-text serialize) → persist (one slot per subject)
//! ```
//!
//! On load the flow inverts: the provider's text parses into records, and
//! each display context decodes a record's stored image at whatever
//! resolution it needs (small for list rows, large for detail views).
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Image codec: memory-bounded decode, canonical PNG+base64 encode, per-resolution re-decode |
//! | [`store`] | [`Record`](store::Record) value type, `###`/`@@@` flat-text serialization, keyed [`RecordStore`](store::RecordStore) |
//! | [`persist`] | [`Persistence`](persist::Persistence) trait with file-backed and in-memory providers |
//! | [`subject`] | The fixed per-subject category menus and storage keys |
//! | [`service`] | [`CardService`](service::CardService): the operations a UI collaborator calls |
//!
//! # Design Decisions
//!
//! ## Bounded Decode
//!
//! Source images arrive at arbitrary resolution. The codec probes
//! dimensions without allocating pixels, coarse-downsamples by a
//! power-of-two factor immediately after decoding, and only then applies a
//! precise Lanczos3 scale: the full-resolution buffer is transient, and
//! everything retained is O(maxDimension²) no matter how large the source
//! is. It never upscales: small sources pass through untouched.
//!
//! ## Canonical Stored Form
//!
//! Stored images are base64 over lossless PNG, capped at 2000 px on the
//! longer side at ingestion. Lossless means re-decoding at full bound is
//! pixel-exact; base64 means the text can never contain the store's
//! delimiters. Each display context re-decodes at its own resolution from
//! the same stored text, so the codec stays pure and cache-free.
//!
//! ## Forgiving Flat-Text Parsing
//!
//! The persisted blob is plain delimited text: it predates this
//! implementation and existing data must keep parsing. Malformed chunks
//! (fewer than three fields, or no image text) are dropped silently rather
//! than failing the whole load; callers rely on that tolerance for
//! partially-written data. The free-text fields are *not* escaped, so a
//! note containing a delimiter literal corrupts that record: a known
//! hazard of the format, kept for compatibility.
//!
//! ## No Ambient State
//!
//! Every collection is an explicit object constructed with a key and a
//! provider. Two services over the same subject observe each other's
//! writes because every operation re-reads the provider's current text;
//! writes are whole-blob, last writer wins (the app is single-user,
//! single-process).

pub mod imaging;
pub mod persist;
pub mod service;
pub mod store;
pub mod subject;

#[cfg(test)]
pub(crate) mod test_helpers;
