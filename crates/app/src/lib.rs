#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod input;
pub mod menu;

use std::io::{self, IsTerminal, Write};
use std::sync::Arc;

use leitner_core::model::CardKey;
use services::{AddOutcome, DeckService};
use storage::repository::Storage;

use crate::input::{ReaderLines, TerminalLines};

pub use cli::{Cli, Command};
pub use config::AppConfig;

/// Open the configured deck and execute one command.
///
/// # Errors
///
/// Returns terminal I/O errors and, for one-shot commands, storage errors.
/// The interactive menu reports storage errors itself and keeps running.
pub fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_cli(&cli);
    let storage = Storage::text_file(&config.deck_path);
    let mut service = DeckService::with_seed(Arc::clone(&storage.decks), config.seed);

    let command = cli.command.unwrap_or(Command::Menu);
    let interactive = command == Command::Menu;

    match service.load() {
        Ok(report) => {
            if interactive {
                println!(
                    "Loaded {} cards from {}",
                    service.deck().len(),
                    service.location()
                );
            }
            tracing::debug!(?report, "deck loaded");
        }
        Err(e) if interactive => {
            eprintln!("Could not load deck: {e}");
            println!(
                "Starting fresh. (Will save to {})",
                service.location()
            );
        }
        Err(e) => return Err(e.into()),
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match command {
        Command::Menu => {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                let lines = TerminalLines::new()?;
                menu::Menu::new(&mut service, lines, &mut out, io::stderr()).run()?;
            } else {
                let lines = ReaderLines::new(stdin.lock());
                menu::Menu::new(&mut service, lines, &mut out, io::stderr()).run()?;
            }
        }
        Command::Add { front, back } => match service.add_card(front.trim(), back.trim())? {
            AddOutcome::Added => writeln!(out, "Added. Saved to {}", service.location())?,
            AddOutcome::Duplicate => writeln!(out, "That card already exists.")?,
        },
        Command::Remove { front, back } => {
            match service.remove_card(&CardKey::new(front, back))? {
                Some(_) => writeln!(out, "Removed. Saved to {}", service.location())?,
                None => writeln!(out, "No such card.")?,
            }
        }
        Command::List => menu::write_cards(&mut out, &service)?,
        Command::Stats => menu::write_stats(&mut out, &service)?,
    }
    Ok(())
}
