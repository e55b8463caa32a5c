mod response;
mod study;

// Public API of the study subsystem.
pub use crate::error::SessionError;
pub use response::{Recall, StudyResponse};
pub use study::{SessionEnd, StudyAnswer, StudySession, StudySummary};
