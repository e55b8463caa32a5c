use rand::Rng;

use crate::model::Card;

/// Weighted random choice of one study card.
///
/// Each card is picked with probability `weight / total`, where weight is
/// `6 - box`. A single uniform draw in `[0, total)` is walked down the
/// cumulative weights, so the iterator is traversed twice and nothing is
/// allocated.
///
/// Returns `None` when the iterator yields no cards.
///
/// # Examples
///
/// ```
/// # use leitner_core::model::Card;
/// # use leitner_core::scheduler::pick_weighted;
/// # use rand::{SeedableRng, rngs::StdRng};
/// let cards = vec![Card::new("Q", "A")];
/// let mut rng = StdRng::seed_from_u64(7);
/// let picked = pick_weighted(cards.iter(), &mut rng).unwrap();
/// assert_eq!(picked.front(), "Q");
/// ```
pub fn pick_weighted<'a, I, R>(cards: I, rng: &mut R) -> Option<&'a Card>
where
    I: IntoIterator<Item = &'a Card>,
    I::IntoIter: Clone,
    R: Rng,
{
    let cards = cards.into_iter();
    let total: u64 = cards.clone().map(|c| u64::from(c.weight())).sum();
    if total == 0 {
        return None;
    }

    let mut ticket = rng.random_range(0..total);
    for card in cards {
        let weight = u64::from(card.weight());
        if ticket < weight {
            return Some(card);
        }
        ticket -= weight;
    }

    // Unreachable while the iterator is deterministic: ticket < total.
    None
}
