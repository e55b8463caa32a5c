use crate::model::leitner_box::LeitnerBox;

//
// ─── CARD KEY ──────────────────────────────────────────────────────────────────
//

/// Identity of a card: its front and back text.
///
/// The box is deliberately not part of the key, so the same question moved
/// to another box is still the same card.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardKey {
    pub front: String,
    pub back: String,
}

impl CardKey {
    #[must_use]
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
        }
    }
}

//
// ─── CARD ──────────────────────────────────────────────────────────────────────
//

/// A question/answer pair and its current Leitner box.
///
/// `PartialEq` compares every field, box included. Use [`Card::key`] or
/// [`Card::same_card`] when asking whether two values are the same card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    key: CardKey,
    leitner_box: LeitnerBox,
}

impl Card {
    /// Creates a new card in box 1.
    #[must_use]
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self::in_box(front, back, LeitnerBox::MIN)
    }

    /// Creates a card in the given box, clamping out-of-range values.
    #[must_use]
    pub fn with_box(front: impl Into<String>, back: impl Into<String>, leitner_box: i64) -> Self {
        Self::in_box(front, back, LeitnerBox::clamped(leitner_box))
    }

    /// Creates a card from an already validated box.
    #[must_use]
    pub fn in_box(front: impl Into<String>, back: impl Into<String>, leitner_box: LeitnerBox) -> Self {
        Self {
            key: CardKey::new(front, back),
            leitner_box,
        }
    }

    // Accessors
    #[must_use]
    pub fn front(&self) -> &str {
        &self.key.front
    }

    #[must_use]
    pub fn back(&self) -> &str {
        &self.key.back
    }

    #[must_use]
    pub fn leitner_box(&self) -> LeitnerBox {
        self.leitner_box
    }

    /// Owned identity key for sets and lookups.
    #[must_use]
    pub fn key(&self) -> CardKey {
        self.key.clone()
    }

    /// Borrowed identity key.
    #[must_use]
    pub fn key_ref(&self) -> &CardKey {
        &self.key
    }

    /// True when `key` identifies this card.
    #[must_use]
    pub fn has_key(&self, key: &CardKey) -> bool {
        self.key == *key
    }

    /// True when both values are the same card, whatever their boxes.
    #[must_use]
    pub fn same_card(&self, other: &Card) -> bool {
        self.key == other.key
    }

    /// Selection weight of the card's current box.
    #[must_use]
    pub fn weight(&self) -> u32 {
        self.leitner_box.weight()
    }

    /// Moves the card up one box (no-op in box 5).
    pub fn mark_correct(&mut self) {
        self.leitner_box = self.leitner_box.promote();
    }

    /// Moves the card down one box (no-op in box 1).
    pub fn mark_incorrect(&mut self) {
        self.leitner_box = self.leitner_box.demote();
    }

    /// Sets the box, clamping into `1..=5`.
    pub fn set_box(&mut self, value: i64) {
        self.leitner_box = LeitnerBox::clamped(value);
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_card_starts_in_first_box() {
        let card = Card::new("Q", "A");
        assert_eq!(card.leitner_box(), LeitnerBox::MIN);
        assert_eq!(card.front(), "Q");
        assert_eq!(card.back(), "A");
    }

    #[test]
    fn with_box_clamps() {
        assert_eq!(Card::with_box("Q", "A", 0).leitner_box().value(), 1);
        assert_eq!(Card::with_box("Q", "A", 17).leitner_box().value(), 5);
        assert_eq!(Card::with_box("Q", "A", 4).leitner_box().value(), 4);
    }

    #[test]
    fn mark_correct_and_incorrect_follow_box_transitions() {
        for b in 1..=5 {
            let mut up = Card::with_box("Q", "A", b);
            up.mark_correct();
            assert_eq!(i64::from(up.leitner_box().value()), (b + 1).min(5));

            let mut down = Card::with_box("Q", "A", b);
            down.mark_incorrect();
            assert_eq!(i64::from(down.leitner_box().value()), (b - 1).max(1));
        }
    }

    #[test]
    fn set_box_clamps() {
        let mut card = Card::new("Q", "A");
        card.set_box(3);
        assert_eq!(card.leitner_box().value(), 3);
        card.set_box(-1);
        assert_eq!(card.leitner_box().value(), 1);
        card.set_box(100);
        assert_eq!(card.leitner_box().value(), 5);
    }

    #[test]
    fn identity_ignores_box() {
        let a = Card::with_box("Q", "A", 1);
        let b = Card::with_box("Q", "A", 5);
        assert!(a.same_card(&b));
        assert_eq!(a.key(), b.key());
        assert!(b.has_key(&a.key()));
        assert_eq!(a.key_ref(), b.key_ref());
        assert_ne!(a, b);
    }

    #[test]
    fn identity_is_case_and_whitespace_exact() {
        let a = Card::new("Q", "A");
        assert!(!a.same_card(&Card::new("q", "A")));
        assert!(!a.same_card(&Card::new("Q", "A ")));
    }
}
