#![forbid(unsafe_code)]

pub mod deck_service;
pub mod error;
pub mod sessions;

pub use deck_service::{AddOutcome, DeckService};
pub use error::{DeckServiceError, SessionError};
pub use sessions::{Recall, SessionEnd, StudyAnswer, StudyResponse, StudySession, StudySummary};
