#![forbid(unsafe_code)]

pub mod model;
pub mod scheduler;

pub use model::{BoxStats, Card, CardKey, Deck, LeitnerBox};
