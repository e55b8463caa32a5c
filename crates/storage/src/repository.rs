use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use leitner_core::model::Deck;
use thiserror::Error;
use tracing::debug;

use crate::record::{self, LoadReport};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A shared in-memory store was poisoned by a panicking writer.
    #[error("store lock poisoned: {0}")]
    Poisoned(String),
}

/// Repository contract for a single persisted deck.
///
/// Implementations are synchronous; a load or save runs to completion before
/// returning.
pub trait DeckRepository: Send + Sync {
    /// Replace the contents of `deck` with the stored cards.
    ///
    /// The deck is cleared first and only filled once the whole store has
    /// been read, so an error leaves it empty. A store that does not exist
    /// yet leaves it empty and is not an error. Lines that are not valid
    /// records are skipped.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Read` for I/O failures other than a missing
    /// store.
    fn load_into(&self, deck: &mut Deck) -> Result<LoadReport, StorageError>;

    /// Persist every card, replacing whatever was stored before.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Write` if the store cannot be created or
    /// written. The in-memory deck is never modified.
    fn save(&self, deck: &Deck) -> Result<(), StorageError>;

    /// Human-readable location of the store, for status messages.
    fn location(&self) -> String;

    /// Load into a fresh deck.
    ///
    /// # Errors
    ///
    /// Same as [`DeckRepository::load_into`].
    fn load(&self) -> Result<Deck, StorageError> {
        let mut deck = Deck::new();
        self.load_into(&mut deck)?;
        Ok(deck)
    }
}

/// In-memory store using the same line format as the file store.
///
/// Clones share state, so a test can keep a handle and inspect what a
/// service saved.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    contents: Arc<Mutex<Option<String>>>,
    fail_writes: Arc<AtomicBool>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from existing store text.
    #[must_use]
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Arc::new(Mutex::new(Some(contents.into()))),
            fail_writes: Arc::default(),
        }
    }

    /// Raw store text, or `None` if nothing was ever saved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Poisoned` if the lock is poisoned.
    pub fn contents(&self) -> Result<Option<String>, StorageError> {
        let guard = self
            .contents
            .lock()
            .map_err(|e| StorageError::Poisoned(e.to_string()))?;
        Ok(guard.clone())
    }

    /// Make subsequent saves fail, to exercise error paths.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn path() -> PathBuf {
        PathBuf::from("memory")
    }
}

impl DeckRepository for InMemoryRepository {
    fn load_into(&self, deck: &mut Deck) -> Result<LoadReport, StorageError> {
        deck.clear();
        let guard = self
            .contents
            .lock()
            .map_err(|e| StorageError::Poisoned(e.to_string()))?;
        let Some(text) = guard.as_deref() else {
            return Ok(LoadReport::missing());
        };
        let mut loaded = Deck::new();
        let report =
            record::read_deck(text.as_bytes(), &mut loaded).map_err(|source| StorageError::Read {
                path: Self::path(),
                source,
            })?;
        *deck = loaded;
        Ok(report)
    }

    fn save(&self, deck: &Deck) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Write {
                path: Self::path(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "writes disabled"),
            });
        }

        let mut buf = Vec::new();
        record::write_deck(deck, &mut buf).map_err(|source| StorageError::Write {
            path: Self::path(),
            source,
        })?;
        let text = String::from_utf8(buf).map_err(|e| StorageError::Write {
            path: Self::path(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })?;

        let mut guard = self
            .contents
            .lock()
            .map_err(|e| StorageError::Poisoned(e.to_string()))?;
        debug!(cards = deck.len(), "saved deck to memory");
        *guard = Some(text);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_owned()
    }
}

/// Bundles the deck repository behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub decks: Arc<dyn DeckRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            decks: Arc::new(InMemoryRepository::new()),
        }
    }
}
