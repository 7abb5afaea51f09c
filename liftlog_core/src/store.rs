//! Document store: the persistence adapter the core talks to.
//!
//! The core never touches ambient storage directly; everything goes through
//! the `DocumentStore` contract so tests can run against a pure in-memory
//! implementation. The filesystem store keeps one JSON file per
//! (collection, key) with file locking and atomic replace-on-write.

use crate::{Error, Result};
use fs2::FileExt;
use serde_json::Value;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// Collections used by the core
pub const HISTORY: &str = "history";
pub const EXERCISE_DATA: &str = "exerciseData";
pub const PREFERENCES: &str = "preferences";
pub const INJURIES: &str = "injuries";

/// Key-value document persistence contract
///
/// Absence of a document is not an error: `get` returns `None` and callers
/// substitute their empty default. Write failures propagate; the caller's
/// in-memory state is never rolled back.
pub trait DocumentStore {
    fn get(&self, collection: &str, key: &str) -> Result<Option<Value>>;
    fn put(&self, collection: &str, key: &str, document: &Value) -> Result<()>;
    fn delete(&self, collection: &str, key: &str) -> Result<()>;
}

fn check_component(kind: &str, value: &str) -> Result<()> {
    if value.is_empty() || value.contains(['/', '\\', '\0']) {
        return Err(Error::Storage(format!("invalid {} '{}'", kind, value)));
    }
    Ok(())
}

// ============================================================================
// Filesystem store
// ============================================================================

/// Filesystem-backed document store rooted at a data directory
///
/// Layout: `<root>/<collection>/<key>.json`. Reads take a shared lock;
/// writes go through a locked temp file and an atomic rename, so a crashed
/// writer never leaves a half-written document behind.
pub struct FsDocumentStore {
    root: PathBuf,
}

impl FsDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn document_path(&self, collection: &str, key: &str) -> Result<PathBuf> {
        check_component("collection", collection)?;
        check_component("key", key)?;
        Ok(self.root.join(collection).join(format!("{}.json", key)))
    }

    fn read_locked(path: &Path) -> Result<String> {
        let file = File::open(path)?;
        file.lock_shared()?;
        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        let read = reader.read_to_string(&mut contents);
        file.unlock()?;
        read?;
        Ok(contents)
    }
}

impl DocumentStore for FsDocumentStore {
    fn get(&self, collection: &str, key: &str) -> Result<Option<Value>> {
        let path = self.document_path(collection, key)?;
        if !path.exists() {
            tracing::debug!("No document at {:?}", path);
            return Ok(None);
        }

        let contents = Self::read_locked(&path)?;
        match serde_json::from_str::<Value>(&contents) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                // Malformed stored JSON is treated as absent, not fatal
                tracing::warn!("Failed to parse document {:?}: {}. Treating as absent.", path, e);
                Ok(None)
            }
        }
    }

    fn put(&self, collection: &str, key: &str, document: &Value) -> Result<()> {
        let path = self.document_path(collection, key)?;
        let parent = path
            .parent()
            .ok_or_else(|| Error::Storage("document path missing parent".to_string()))?;
        std::fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;
        temp.as_file().lock_exclusive()?;
        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(document)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }
        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;
        temp.persist(&path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Wrote document {:?}", path);
        Ok(())
    }

    fn delete(&self, collection: &str, key: &str) -> Result<()> {
        let path = self.document_path(collection, key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!("Deleted document {:?}", path);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Io(e)),
        }
    }
}

// ============================================================================
// In-memory store
// ============================================================================

/// Pure in-memory store for tests and ephemeral use
#[derive(Default)]
pub struct MemoryStore {
    documents: Mutex<HashMap<(String, String), Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryStore {
    fn get(&self, collection: &str, key: &str) -> Result<Option<Value>> {
        let documents = self
            .documents
            .lock()
            .map_err(|_| Error::Storage("memory store poisoned".to_string()))?;
        Ok(documents.get(&(collection.to_string(), key.to_string())).cloned())
    }

    fn put(&self, collection: &str, key: &str, document: &Value) -> Result<()> {
        let mut documents = self
            .documents
            .lock()
            .map_err(|_| Error::Storage("memory store poisoned".to_string()))?;
        documents.insert((collection.to_string(), key.to_string()), document.clone());
        Ok(())
    }

    fn delete(&self, collection: &str, key: &str) -> Result<()> {
        let mut documents = self
            .documents
            .lock()
            .map_err(|_| Error::Storage("memory store poisoned".to_string()))?;
        documents.remove(&(collection.to_string(), key.to_string()));
        Ok(())
    }
}
