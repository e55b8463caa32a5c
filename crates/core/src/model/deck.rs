use std::collections::{BTreeMap, HashSet};

use rand::Rng;

use crate::model::card::{Card, CardKey};
use crate::model::leitner_box::LeitnerBox;
use crate::scheduler::pick_weighted;

//
// ─── BOX STATS ─────────────────────────────────────────────────────────────────
//

/// Card counts per box, with missing boxes read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoxStats {
    counts: BTreeMap<LeitnerBox, usize>,
}

impl BoxStats {
    #[must_use]
    pub fn count(&self, leitner_box: LeitnerBox) -> usize {
        self.counts.get(&leitner_box).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// All five boxes in order, zero counts included.
    pub fn rows(&self) -> impl Iterator<Item = (LeitnerBox, usize)> + '_ {
        LeitnerBox::ALL.into_iter().map(move |b| (b, self.count(b)))
    }
}

impl From<BTreeMap<LeitnerBox, usize>> for BoxStats {
    fn from(counts: BTreeMap<LeitnerBox, usize>) -> Self {
        Self { counts }
    }
}

//
// ─── DECK ──────────────────────────────────────────────────────────────────────
//

/// A duplicate-free collection of flashcards.
///
/// Cards are unique by [`CardKey`]; insertion order is kept and is the order
/// used when the deck is written out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    #[must_use]
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    /// Adds a card unless one with the same front and back already exists.
    ///
    /// Returns `true` when the card was inserted. A duplicate leaves the
    /// existing card, and its box, untouched.
    pub fn add_card(&mut self, card: Card) -> bool {
        if self.cards.iter().any(|c| c.same_card(&card)) {
            return false;
        }
        self.cards.push(card);
        true
    }

    /// Removes the card with the given identity, if any.
    pub fn remove_card(&mut self, key: &CardKey) -> Option<Card> {
        let idx = self.cards.iter().position(|c| c.has_key(key))?;
        Some(self.cards.remove(idx))
    }

    /// Drops every card.
    pub fn clear(&mut self) {
        self.cards.clear();
    }

    // Accessors
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    /// Independent snapshot of every card, in deck order.
    #[must_use]
    pub fn all(&self) -> Vec<Card> {
        self.cards.clone()
    }

    #[must_use]
    pub fn contains(&self, key: &CardKey) -> bool {
        self.cards.iter().any(|c| c.has_key(key))
    }

    #[must_use]
    pub fn get(&self, key: &CardKey) -> Option<&Card> {
        self.cards.iter().find(|c| c.has_key(key))
    }

    /// Mutable access to one card's state.
    ///
    /// Only the card is exposed, never the collection, so membership stays
    /// consistent.
    pub fn card_mut(&mut self, key: &CardKey) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| c.has_key(key))
    }

    /// Number of cards per box. Boxes without cards are absent.
    #[must_use]
    pub fn stats_by_box(&self) -> BTreeMap<LeitnerBox, usize> {
        let mut counts = BTreeMap::new();
        for card in &self.cards {
            *counts.entry(card.leitner_box()).or_insert(0) += 1;
        }
        counts
    }

    #[must_use]
    pub fn box_stats(&self) -> BoxStats {
        BoxStats::from(self.stats_by_box())
    }

    #[must_use]
    pub fn cards_in_box(&self, leitner_box: LeitnerBox) -> Vec<&Card> {
        self.cards
            .iter()
            .filter(|c| c.leitner_box() == leitner_box)
            .collect()
    }

    /// Weighted random pick across the whole deck.
    ///
    /// Lower boxes are favoured: a box 1 card is five times as likely as a
    /// box 5 card. Returns `None` for an empty deck.
    pub fn pick_for_study<R: Rng>(&self, rng: &mut R) -> Option<&Card> {
        pick_weighted(self.cards.iter(), rng)
    }

    /// Weighted random pick among cards whose key is not in `exclude`.
    ///
    /// Returns `None` when the deck is empty or every card is excluded.
    pub fn pick_for_study_excluding<R: Rng>(
        &self,
        exclude: &HashSet<CardKey>,
        rng: &mut R,
    ) -> Option<&Card> {
        if exclude.is_empty() {
            return self.pick_for_study(rng);
        }
        pick_weighted(
            self.cards.iter().filter(|c| !exclude.contains(c.key_ref())),
            rng,
        )
    }
}

impl FromIterator<Card> for Deck {
    fn from_iter<T: IntoIterator<Item = Card>>(iter: T) -> Self {
        let mut deck = Self::new();
        for card in iter {
            deck.add_card(card);
        }
        deck
    }
}

impl<'a> IntoIterator for &'a Deck {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
