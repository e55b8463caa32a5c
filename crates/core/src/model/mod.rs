mod card;
mod deck;
mod leitner_box;

pub use card::{Card, CardKey};
pub use deck::{BoxStats, Deck};
pub use leitner_box::{LeitnerBox, ParseBoxError};
