use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use leitner_core::model::{BoxStats, Card, CardKey, Deck};
use storage::record::LoadReport;
use storage::repository::DeckRepository;

use crate::error::{DeckServiceError, SessionError};
use crate::sessions::{Recall, StudyAnswer, StudySession, StudySummary};

/// Whether `add_card` inserted a new card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    Duplicate,
}

/// Owns the working deck and persists it after every mutation.
///
/// Randomness comes from an owned `StdRng`; pass a seed for reproducible
/// study order.
pub struct DeckService {
    deck: Deck,
    decks: Arc<dyn DeckRepository>,
    rng: StdRng,
}

impl DeckService {
    /// Create a service over an empty deck. Call [`DeckService::load`] to
    /// read the store.
    #[must_use]
    pub fn new(decks: Arc<dyn DeckRepository>, rng: StdRng) -> Self {
        Self {
            deck: Deck::new(),
            decks,
            rng,
        }
    }

    /// Like [`DeckService::new`], seeding the RNG when `seed` is given and
    /// from the OS otherwise.
    #[must_use]
    pub fn with_seed(decks: Arc<dyn DeckRepository>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::new(decks, rng)
    }

    /// Replace the working deck with the stored one.
    ///
    /// On failure the working deck is left empty.
    ///
    /// # Errors
    ///
    /// Returns `DeckServiceError::Storage` for I/O failures other than a
    /// missing store.
    pub fn load(&mut self) -> Result<LoadReport, DeckServiceError> {
        match self.decks.load_into(&mut self.deck) {
            Ok(report) => {
                if report.skipped > 0 {
                    warn!(skipped = report.skipped, "ignored malformed card records");
                }
                Ok(report)
            }
            Err(err) => {
                self.deck.clear();
                Err(err.into())
            }
        }
    }

    /// Persist the working deck.
    ///
    /// # Errors
    ///
    /// Returns `DeckServiceError::Storage` if writing fails; the working deck
    /// is unchanged.
    pub fn save(&self) -> Result<(), DeckServiceError> {
        self.decks.save(&self.deck)?;
        debug!(cards = self.deck.len(), "deck saved");
        Ok(())
    }

    #[must_use]
    pub fn location(&self) -> String {
        self.decks.location()
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Snapshot of every card in deck order.
    #[must_use]
    pub fn cards(&self) -> Vec<Card> {
        self.deck.all()
    }

    #[must_use]
    pub fn stats(&self) -> BoxStats {
        self.deck.box_stats()
    }

    /// Add a new card in box 1 and save.
    ///
    /// A duplicate is not saved again.
    ///
    /// # Errors
    ///
    /// Returns `DeckServiceError::Storage` if the save fails. The card stays
    /// in the working deck and is written by the next successful save.
    pub fn add_card(
        &mut self,
        front: impl Into<String>,
        back: impl Into<String>,
    ) -> Result<AddOutcome, DeckServiceError> {
        let card = Card::new(front, back);
        if !self.deck.add_card(card) {
            debug!("duplicate card ignored");
            return Ok(AddOutcome::Duplicate);
        }
        info!(cards = self.deck.len(), "card added");
        self.save()?;
        Ok(AddOutcome::Added)
    }

    /// Remove a card by identity and save when something was removed.
    ///
    /// # Errors
    ///
    /// Returns `DeckServiceError::Storage` if the save fails.
    pub fn remove_card(&mut self, key: &CardKey) -> Result<Option<Card>, DeckServiceError> {
        let Some(removed) = self.deck.remove_card(key) else {
            return Ok(None);
        };
        self.save()?;
        Ok(Some(removed))
    }

    /// Begin a no-repeat study cycle.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` when the deck has no cards.
    pub fn start_study(&self) -> Result<StudySession, SessionError> {
        if self.deck.is_empty() {
            return Err(SessionError::Empty);
        }
        Ok(StudySession::new())
    }

    /// Next card of the session, or `None` once every card was shown.
    pub fn next_study_card(&mut self, session: &mut StudySession) -> Option<Card> {
        session.next_card(&self.deck, &mut self.rng)
    }

    /// Move the studied card up or down one box.
    pub fn answer(
        &mut self,
        session: &mut StudySession,
        key: &CardKey,
        recall: Recall,
    ) -> Option<StudyAnswer> {
        session.record(&mut self.deck, key, recall)
    }

    /// End the session and save progress.
    ///
    /// # Errors
    ///
    /// Returns `DeckServiceError::Storage` if the save fails.
    pub fn finish_study(&self, session: StudySession) -> Result<StudySummary, DeckServiceError> {
        let summary = session.summary();
        info!(
            shown = summary.shown,
            correct = summary.correct,
            incorrect = summary.incorrect,
            "study session finished"
        );
        self.save()?;
        Ok(summary)
    }
}
