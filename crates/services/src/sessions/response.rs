/// Whether the learner recalled the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recall {
    Correct,
    Incorrect,
}

/// A learner's reply after the answer is revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyResponse {
    Answered(Recall),
    Quit,
    Unrecognized,
}

impl StudyResponse {
    /// Parses `y`, `n` or `q`, ignoring case and surrounding whitespace.
    ///
    /// ```
    /// # use services::sessions::{Recall, StudyResponse};
    /// assert_eq!(StudyResponse::parse(" Y "), StudyResponse::Answered(Recall::Correct));
    /// assert_eq!(StudyResponse::parse("maybe"), StudyResponse::Unrecognized);
    /// ```
    #[must_use]
    pub fn parse(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "y" => Self::Answered(Recall::Correct),
            "n" => Self::Answered(Recall::Incorrect),
            "q" => Self::Quit,
            _ => Self::Unrecognized,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_replies() {
        assert_eq!(StudyResponse::parse("y"), StudyResponse::Answered(Recall::Correct));
        assert_eq!(StudyResponse::parse("N\n"), StudyResponse::Answered(Recall::Incorrect));
        assert_eq!(StudyResponse::parse("q"), StudyResponse::Quit);
    }

    #[test]
    fn anything_else_is_unrecognized() {
        for input in ["", "yes", "no", "quit", "x"] {
            assert_eq!(StudyResponse::parse(input), StudyResponse::Unrecognized);
        }
    }
}
