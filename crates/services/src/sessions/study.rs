use std::collections::HashSet;

use rand::Rng;
use tracing::debug;

use leitner_core::model::{Card, CardKey, Deck, LeitnerBox};

use super::response::Recall;

//
// ─── SUMMARY ───────────────────────────────────────────────────────────────────
//

/// Why a study session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Every card in the deck was shown once.
    CycleComplete,
    /// The learner asked to stop.
    Quit,
    /// The learner gave a reply that was not y/n/q.
    Unrecognized,
}

/// Tally of one study session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StudySummary {
    pub shown: usize,
    pub correct: usize,
    pub incorrect: usize,
}

impl StudySummary {
    #[must_use]
    pub fn answered(&self) -> usize {
        self.correct + self.incorrect
    }
}

/// Result of grading one card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyAnswer {
    pub key: CardKey,
    pub previous: LeitnerBox,
    pub current: LeitnerBox,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// A no-repeat pass over a deck.
///
/// Each call to [`StudySession::next_card`] makes a weighted pick among the
/// cards not yet shown in this session, so every card appears at most once
/// and the session runs out after `deck.len()` cards.
#[derive(Debug, Clone, Default)]
pub struct StudySession {
    seen: HashSet<CardKey>,
    summary: StudySummary,
}

impl StudySession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks the next card to show, or `None` once the cycle is complete.
    pub fn next_card<R: Rng>(&mut self, deck: &Deck, rng: &mut R) -> Option<Card> {
        let card = deck.pick_for_study_excluding(&self.seen, rng)?.clone();
        self.seen.insert(card.key());
        self.summary.shown += 1;
        debug!(
            front = card.front(),
            leitner_box = card.leitner_box().value(),
            "picked study card"
        );
        Some(card)
    }

    /// Applies the learner's recall to the deck's copy of the card.
    ///
    /// Returns `None` if the card is no longer in the deck.
    pub fn record(&mut self, deck: &mut Deck, key: &CardKey, recall: Recall) -> Option<StudyAnswer> {
        let card = deck.card_mut(key)?;
        let previous = card.leitner_box();
        match recall {
            Recall::Correct => {
                card.mark_correct();
                self.summary.correct += 1;
            }
            Recall::Incorrect => {
                card.mark_incorrect();
                self.summary.incorrect += 1;
            }
        }
        Some(StudyAnswer {
            key: key.clone(),
            previous,
            current: card.leitner_box(),
        })
    }

    #[must_use]
    pub fn summary(&self) -> StudySummary {
        self.summary
    }

    #[must_use]
    pub fn has_seen(&self, key: &CardKey) -> bool {
        self.seen.contains(key)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
