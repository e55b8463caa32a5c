use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Deck file used when neither `--deck` nor `FLASHCARDS_DECK` is set.
pub const DEFAULT_DECK_FILE: &str = "flashcards.csv";

/// Leitner-box flashcard trainer.
#[derive(Debug, Parser)]
#[command(name = "flashcards", version)]
pub struct Cli {
    /// Deck file to load and save
    #[arg(long, short = 'd', env = "FLASHCARDS_DECK", default_value = DEFAULT_DECK_FILE)]
    pub deck: PathBuf,

    /// Seed for the study order (random when omitted)
    #[arg(long, env = "FLASHCARDS_SEED")]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Interactive menu (default)
    Menu,
    /// Add a card and save
    Add { front: String, back: String },
    /// Remove a card and save
    Remove { front: String, back: String },
    /// List every card with its box
    List,
    /// Card counts per box
    Stats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_menu_and_default_file() {
        let cli = Cli::try_parse_from(["flashcards"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.seed, None);
        // FLASHCARDS_DECK may be set in the environment; only check the flag path.
        let cli = Cli::try_parse_from(["flashcards", "--deck", "x/y.csv"]).unwrap();
        assert_eq!(cli.deck, PathBuf::from("x/y.csv"));
    }

    #[test]
    fn parses_add_with_seed() {
        let cli = Cli::try_parse_from(["flashcards", "--seed", "9", "add", "Q", "A"]).unwrap();
        assert_eq!(cli.seed, Some(9));
        assert_eq!(
            cli.command,
            Some(Command::Add {
                front: "Q".into(),
                back: "A".into()
            })
        );
    }

    #[test]
    fn rejects_non_numeric_seed() {
        assert!(Cli::try_parse_from(["flashcards", "--seed", "abc"]).is_err());
    }

    #[test]
    fn command_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
