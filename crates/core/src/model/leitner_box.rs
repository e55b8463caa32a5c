use std::fmt;
use std::str::FromStr;

use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseBoxError {
    #[error("box value is not an integer: {raw:?}")]
    NotAnInteger { raw: String },
}

//
// ─── LEITNER BOX ───────────────────────────────────────────────────────────────
//

/// Proficiency box of a card, always within `1..=5`.
///
/// New cards start in box 1. A correct answer promotes the card one box, an
/// incorrect answer demotes it one box; both saturate at the bounds. Values
/// outside the range are clamped, never rejected.
///
/// # Examples
///
/// ```
/// # use leitner_core::model::LeitnerBox;
/// assert_eq!(LeitnerBox::clamped(9), LeitnerBox::MAX);
/// assert_eq!(LeitnerBox::clamped(-3), LeitnerBox::MIN);
/// assert_eq!(LeitnerBox::MIN.weight(), 5);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LeitnerBox(u8);

impl LeitnerBox {
    pub const MIN: Self = Self(1);
    pub const MAX: Self = Self(5);

    /// Every box, lowest first.
    pub const ALL: [Self; 5] = [Self(1), Self(2), Self(3), Self(4), Self(5)];

    /// Creates a box from any integer, clamping into `1..=5`.
    #[must_use]
    pub fn clamped(value: i64) -> Self {
        let clamped = value.clamp(i64::from(Self::MIN.0), i64::from(Self::MAX.0));
        // Lossless after the clamp above.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let value = clamped as u8;
        Self(value)
    }

    /// Returns the underlying box number.
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// Next box up, or the same box at the top.
    #[must_use]
    pub fn promote(self) -> Self {
        Self(self.0.saturating_add(1).min(Self::MAX.0))
    }

    /// Next box down, or the same box at the bottom.
    #[must_use]
    pub fn demote(self) -> Self {
        Self(self.0.saturating_sub(1).max(Self::MIN.0))
    }

    /// Selection weight for study: box 1 weighs 5, box 5 weighs 1.
    #[must_use]
    pub fn weight(self) -> u32 {
        6 - u32::from(self.0)
    }
}

impl Default for LeitnerBox {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Debug for LeitnerBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LeitnerBox({})", self.0)
    }
}

impl fmt::Display for LeitnerBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<LeitnerBox> for u8 {
    fn from(value: LeitnerBox) -> Self {
        value.0
    }
}

/// Parses a base-10 `i32` and clamps it into range.
///
/// Anything that is not a plain integer (including values that overflow
/// `i32`) is an error; callers decide the fallback.
impl FromStr for LeitnerBox {
    type Err = ParseBoxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i32>()
            .map(|v| Self::clamped(i64::from(v)))
            .map_err(|_| ParseBoxError::NotAnInteger { raw: s.to_owned() })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
