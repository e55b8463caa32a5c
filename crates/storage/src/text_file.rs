use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use leitner_core::model::Deck;
use tracing::{debug, info};

use crate::record::{self, LoadReport};
use crate::repository::{DeckRepository, Storage, StorageError};

/// Deck store backed by a UTF-8 text file, one card per line.
#[derive(Debug, Clone)]
pub struct TextFileRepository {
    path: PathBuf,
}

impl TextFileRepository {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The store path resolved against the current directory.
    #[must_use]
    pub fn absolute_path(&self) -> PathBuf {
        if self.path.is_absolute() {
            return self.path.clone();
        }
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(&self.path)
    }

    fn read_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Read {
            path: self.path.clone(),
            source,
        }
    }

    fn write_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl DeckRepository for TextFileRepository {
    fn load_into(&self, deck: &mut Deck) -> Result<LoadReport, StorageError> {
        deck.clear();

        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "deck file not found, starting empty");
                return Ok(LoadReport::missing());
            }
            Err(err) => return Err(self.read_error(err)),
        };

        let mut loaded = Deck::new();
        let report = record::read_deck(BufReader::new(file), &mut loaded)
            .map_err(|e| self.read_error(e))?;
        *deck = loaded;
        info!(
            path = %self.path.display(),
            loaded = report.loaded,
            skipped = report.skipped,
            "loaded deck"
        );
        Ok(report)
    }

    fn save(&self, deck: &Deck) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
        }

        // `File::create` truncates an existing file.
        let file = File::create(&self.path).map_err(|e| self.write_error(e))?;
        record::write_deck(deck, BufWriter::new(file)).map_err(|e| self.write_error(e))?;

        debug!(path = %self.path.display(), cards = deck.len(), "saved deck");
        Ok(())
    }

    fn location(&self) -> String {
        self.absolute_path().display().to_string()
    }
}

impl Storage {
    /// Build a `Storage` backed by a text file at `path`.
    #[must_use]
    pub fn text_file(path: impl Into<PathBuf>) -> Self {
        Self {
            decks: Arc::new(TextFileRepository::new(path)),
        }
    }
}
