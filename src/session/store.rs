//! The persistence collaborator: where a session parks its cart between
//! visits. The engine never depends on the store's durability: anything
//! missing, stale or unparsable reads back as an empty cart.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::cart::LineItem;
use crate::core::Result;

/// Envelope version; bumped when the stored layout changes. A mismatch
/// reads as absence, never as an error.
pub const STORED_CART_VERSION: u32 = 1;

/// The versioned payload a session writes on every cart change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCart {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub lines: Vec<LineItem>,
}

impl StoredCart {
    pub fn new(lines: Vec<LineItem>) -> StoredCart {
        StoredCart {
            version: STORED_CART_VERSION,
            saved_at: Utc::now(),
            lines,
        }
    }

    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes a raw payload, tolerating damage: a parse failure or a
    /// version mismatch yields `None` and a warning, not an error.
    pub fn decode(payload: &str) -> Option<StoredCart> {
        match serde_json::from_str::<StoredCart>(payload) {
            Ok(stored) if stored.version == STORED_CART_VERSION => Some(stored),
            Ok(stored) => {
                log::warn!(
                    "stored cart has version {} (expected {STORED_CART_VERSION}), starting empty",
                    stored.version
                );
                None
            }
            Err(err) => {
                log::warn!("stored cart is unreadable ({err}), starting empty");
                None
            }
        }
    }
}

/// Where raw stored-cart payloads live. Implementations only move bytes;
/// the session owns the tolerance rules for what the bytes contain.
pub trait SessionStore: Send {
    /// The last saved payload, or `None` when nothing is stored.
    fn load(&self) -> Result<Option<String>>;

    /// Replaces the stored payload.
    fn save(&self, payload: &str) -> Result<()>;

    /// Drops the stored payload, e.g. after order completion.
    fn discard(&self) -> Result<()>;
}

/// A single JSON file on disk. Saves go through a sibling temp file and
/// an atomic rename, so a crash mid-save leaves the previous cart intact.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl AsRef<Path>) -> FileSessionStore {
        FileSessionStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, payload: &str) -> Result<()> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;
        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(payload.as_bytes())?;
        temp.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }

    fn discard(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// An in-memory store holding the raw payload. The default collaborator
/// for tests; `with_payload` seeds it with arbitrary (including corrupt)
/// data to exercise the session's tolerance rules.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    payload: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> MemorySessionStore {
        MemorySessionStore::default()
    }

    pub fn with_payload(payload: impl Into<String>) -> MemorySessionStore {
        MemorySessionStore {
            payload: Mutex::new(Some(payload.into())),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.payload.lock()?.clone())
    }

    fn save(&self, payload: &str) -> Result<()> {
        *self.payload.lock()? = Some(payload.to_string());
        Ok(())
    }

    fn discard(&self) -> Result<()> {
        *self.payload.lock()? = None;
        Ok(())
    }
}
