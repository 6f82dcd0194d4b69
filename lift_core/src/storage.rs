//! Key-value persistence backends for the session store.
//!
//! The store only needs to read and write whole blobs by key, so the
//! backend surface is two methods. Backends:
//! - [`FileBackend`]: one JSON file per key with file locking and atomic writes
//! - [`MemoryBackend`]: in-process map, used by tests and dry runs
//! - [`DetachedBackend`]: no storage attached; reads are empty, writes fail

use crate::{Error, Result};
use fs2::FileExt;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Narrow read/write capability over a local key-value store
pub trait StorageBackend {
    /// Read the blob stored under `key`, or None if it was never written
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Replace the blob stored under `key`
    fn save(&mut self, key: &str, bytes: &[u8]) -> Result<()>;
}

/// File-per-key backend rooted at a data directory
#[derive(Clone, Debug)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Create a backend storing its files under `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StorageBackend for FileBackend {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key);
        if !path.exists() {
            tracing::debug!("No file for key '{}' at {:?}", key, path);
            return Ok(None);
        }

        let file = File::open(&path)?;
        // Acquire shared lock for reading
        file.lock_shared()?;

        let mut contents = Vec::new();
        let read = std::io::BufReader::new(&file).read_to_end(&mut contents);
        file.unlock()?;
        read?;

        tracing::debug!("Read {} bytes for key '{}'", contents.len(), key);
        Ok(Some(contents))
    }

    /// Atomically writes the blob by:
    /// 1. Writing to a temp file in the same directory
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    fn save(&mut self, key: &str, bytes: &[u8]) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);

        let temp = NamedTempFile::new_in(&self.dir)?;

        // Acquire exclusive lock on the temp file to serialize concurrent writers
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            writer.write_all(bytes)?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(&path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved {} bytes for key '{}' to {:?}", bytes.len(), key, path);
        Ok(())
    }
}

/// In-memory backend
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw blob, bypassing the store (useful for corruption tests)
    pub fn insert_raw(&mut self, key: &str, bytes: impl Into<Vec<u8>>) {
        self.entries.insert(key.to_string(), bytes.into());
    }

    pub fn raw(&self, key: &str) -> Option<&[u8]> {
        self.entries.get(key).map(Vec::as_slice)
    }
}

impl StorageBackend for MemoryBackend {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, bytes: &[u8]) -> Result<()> {
        self.entries.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}

/// Backend for environments with no persistent storage attached
#[derive(Clone, Copy, Debug, Default)]
pub struct DetachedBackend;

impl StorageBackend for DetachedBackend {
    fn load(&self, _key: &str) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }

    fn save(&mut self, key: &str, _bytes: &[u8]) -> Result<()> {
        Err(Error::StorageUnavailable(format!(
            "cannot write '{}' without a storage backend",
            key
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_backend_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut backend = FileBackend::new(temp_dir.path());

        backend.save("sessions", b"[1,2,3]").unwrap();
        let loaded = backend.load("sessions").unwrap();

        assert_eq!(loaded.as_deref(), Some(&b"[1,2,3]"[..]));
        assert!(temp_dir.path().join("sessions.json").exists());
    }

    #[test]
    fn test_file_backend_missing_key_is_none() {
        let temp_dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(temp_dir.path().join("never-created"));

        assert!(backend.load("sessions").unwrap().is_none());
    }

    #[test]
    fn test_file_backend_creates_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        let mut backend = FileBackend::new(&nested);

        backend.save("stats", b"[]").unwrap();
        assert!(nested.join("stats.json").exists());
    }

    #[test]
    fn test_atomic_save_leaves_no_temp_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut backend = FileBackend::new(temp_dir.path());

        backend.save("sessions", b"[]").unwrap();
        backend.save("sessions", b"[{}]").unwrap();

        let extras: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != "sessions.json")
            .collect();
        assert!(
            extras.is_empty(),
            "Expected only sessions.json, found extras: {:?}",
            extras
        );
    }

    #[test]
    fn test_memory_backend_overwrites() {
        let mut backend = MemoryBackend::new();
        backend.save("k", b"one").unwrap();
        backend.save("k", b"two").unwrap();

        assert_eq!(backend.load("k").unwrap().unwrap(), b"two".to_vec());
        assert_eq!(backend.raw("k"), Some(&b"two"[..]));
    }

    #[test]
    fn test_detached_backend() {
        let mut backend = DetachedBackend;
        assert!(backend.load("k").unwrap().is_none());
        assert!(matches!(
            backend.save("k", b"[]"),
            Err(Error::StorageUnavailable(_))
        ));
    }
}
