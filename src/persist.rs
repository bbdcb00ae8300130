//! Persistence providers: one mutable string-valued slot per key.
//!
//! The store treats persistence as a key → text mapping with whole-blob
//! overwrite semantics (last writer wins, no optimistic concurrency). A
//! missing key reads as the empty string, which the store parses as an
//! empty collection.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

/// A string-valued slot per key.
pub trait Persistence {
    /// Read the stored text for `key`. Absent keys yield an empty string.
    fn read_text(&self, key: &str) -> io::Result<String>;

    /// Overwrite the stored text for `key`.
    fn write_text(&self, key: &str, text: &str) -> io::Result<()>;
}

impl<P: Persistence + ?Sized> Persistence for &P {
    fn read_text(&self, key: &str) -> io::Result<String> {
        (**self).read_text(key)
    }

    fn write_text(&self, key: &str, text: &str) -> io::Result<()> {
        (**self).write_text(key, text)
    }
}

/// File-backed provider: one `<key>.txt` file per key under a base directory.
#[derive(Debug, Clone)]
pub struct FilePersistence {
    dir: PathBuf,
}

impl FilePersistence {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.txt"))
    }
}

impl Persistence for FilePersistence {
    fn read_text(&self, key: &str) -> io::Result<String> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e),
        }
    }

    fn write_text(&self, key: &str, text: &str) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), text)
    }
}

/// In-memory provider. Uses a Mutex (not RefCell) so it is Sync and can be
/// shared by reference across services in tests.
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Persistence for MemoryPersistence {
    fn read_text(&self, key: &str) -> io::Result<String> {
        let slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        Ok(slots.get(key).cloned().unwrap_or_default())
    }

    fn write_text(&self, key: &str, text: &str) -> io::Result<()> {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        slots.insert(key.to_string(), text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn memory_absent_key_reads_empty() {
        let p = MemoryPersistence::new();
        assert_eq!(p.read_text("nothing").unwrap(), "");
    }

    #[test]
    fn memory_write_then_read() {
        let p = MemoryPersistence::new();
        p.write_text("k", "value").unwrap();
        assert_eq!(p.read_text("k").unwrap(), "value");
    }

    #[test]
    fn memory_write_overwrites_whole_slot() {
        let p = MemoryPersistence::new();
        p.write_text("k", "first").unwrap();
        p.write_text("k", "second").unwrap();
        assert_eq!(p.read_text("k").unwrap(), "second");
    }

    #[test]
    fn memory_keys_are_independent() {
        let p = MemoryPersistence::new();
        p.write_text("a", "one").unwrap();
        p.write_text("b", "two").unwrap();
        assert_eq!(p.read_text("a").unwrap(), "one");
        assert_eq!(p.read_text("b").unwrap(), "two");
    }

    #[test]
    fn file_absent_key_reads_empty() {
        let tmp = TempDir::new().unwrap();
        let p = FilePersistence::new(tmp.path());
        assert_eq!(p.read_text("missing").unwrap(), "");
    }

    #[test]
    fn file_write_then_read() {
        let tmp = TempDir::new().unwrap();
        let p = FilePersistence::new(tmp.path());
        p.write_text("cards", "a###b###c@@@").unwrap();
        assert_eq!(p.read_text("cards").unwrap(), "a###b###c@@@");
    }

    #[test]
    fn file_write_creates_base_directory() {
        let tmp = TempDir::new().unwrap();
        let p = FilePersistence::new(tmp.path().join("nested/data"));
        p.write_text("k", "v").unwrap();
        assert_eq!(p.read_text("k").unwrap(), "v");
    }

    #[test]
    fn reference_provider_delegates() {
        let p = MemoryPersistence::new();
        let by_ref: &MemoryPersistence = &p;
        by_ref.write_text("k", "v").unwrap();
        assert_eq!(p.read_text("k").unwrap(), "v");
    }
}
