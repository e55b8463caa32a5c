#![forbid(unsafe_code)]

pub mod record;
pub mod repository;
pub mod text_file;

pub use record::{CardRecord, LoadReport};
pub use repository::{DeckRepository, InMemoryRepository, Storage, StorageError};
pub use text_file::TextFileRepository;
