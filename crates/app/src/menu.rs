//! Interactive text menu driving a `DeckService`.

use std::io::{self, Write};

use tracing::info;

use services::{AddOutcome, DeckService, Recall, SessionEnd, StudyResponse};

use crate::input::{Line, LineSource};

/// Terminal front end over any line source and output.
pub struct Menu<'a, L, W, E> {
    service: &'a mut DeckService,
    input: L,
    out: W,
    err: E,
}

impl<'a, L: LineSource, W: Write, E: Write> Menu<'a, L, W, E> {
    pub fn new(service: &'a mut DeckService, input: L, out: W, err: E) -> Self {
        Self {
            service,
            input,
            out,
            err,
        }
    }

    /// Run until the user picks "Save & Exit" or input ends. Ctrl-C at the
    /// main prompt only prints a hint.
    ///
    /// # Errors
    ///
    /// Returns I/O errors from the terminal streams. Storage failures are
    /// reported to the user and do not stop the loop.
    pub fn run(mut self) -> io::Result<()> {
        loop {
            writeln!(self.out, "\n--- Flashcard App ---")?;
            writeln!(self.out, "1) Add card")?;
            writeln!(self.out, "2) Study")?;
            writeln!(self.out, "3) List cards")?;
            writeln!(self.out, "4) Stats")?;
            writeln!(self.out, "5) Save & Exit")?;

            let choice = match self.prompt("Choose: ")? {
                Line::Text(choice) => choice,
                Line::Interrupted => {
                    writeln!(self.out, "Use 5 to save and exit.")?;
                    continue;
                }
                Line::Eof => {
                    self.save_and_report("Saved to", "Failed to save")?;
                    return Ok(());
                }
            };

            match choice.trim() {
                "1" => self.add_card()?,
                "2" => self.study()?,
                "3" => self.list()?,
                "4" => self.stats()?,
                "5" => {
                    self.save_and_report("Saved to", "Failed to save")?;
                    return Ok(());
                }
                _ => writeln!(self.out, "Unknown choice.")?,
            }
        }
    }

    fn prompt(&mut self, text: &str) -> io::Result<Line> {
        self.out.flush()?;
        self.input.read_line(text)
    }

    fn add_card(&mut self) -> io::Result<()> {
        let Line::Text(front) = self.prompt("Front: ")? else {
            return writeln!(self.out, "Cancelled.");
        };
        let Line::Text(back) = self.prompt("Back: ")? else {
            return writeln!(self.out, "Cancelled.");
        };

        match self.service.add_card(front.trim(), back.trim()) {
            Ok(AddOutcome::Added) => {
                writeln!(self.out, "Added.")?;
                writeln!(self.out, "Auto-saved to {}", self.service.location())?;
            }
            Ok(AddOutcome::Duplicate) => writeln!(self.out, "That card already exists.")?,
            Err(e) => {
                writeln!(self.out, "Added.")?;
                writeln!(self.err, "Auto-save failed: {e}")?;
            }
        }
        Ok(())
    }

    fn study(&mut self) -> io::Result<()> {
        let mut session = match self.service.start_study() {
            Ok(session) => session,
            Err(_) => {
                writeln!(self.out, "No cards. Add some first.")?;
                return Ok(());
            }
        };

        writeln!(
            self.out,
            "Study mode: press Enter to show answer, then y/n if you got it right."
        )?;
        writeln!(
            self.out,
            "You can also press 'q' after seeing answer to quit early."
        )?;

        let end = loop {
            let Some(card) = self.service.next_study_card(&mut session) else {
                writeln!(self.out, "\nCycle complete. Returning to main menu.")?;
                break SessionEnd::CycleComplete;
            };

            writeln!(self.out, "\nFront: {}", card.front())?;
            if !matches!(self.prompt("(press Enter to see answer) ")?, Line::Text(_)) {
                writeln!(self.out, "Quitting study early. Returning to main menu.")?;
                break SessionEnd::Quit;
            }
            writeln!(self.out, "Back: {}", card.back())?;
            let reply = match self.prompt("Did you answer correctly? (y/n or q to quit study): ")? {
                Line::Text(reply) => reply,
                Line::Interrupted | Line::Eof => "q".to_owned(),
            };

            match StudyResponse::parse(&reply) {
                StudyResponse::Answered(recall) => {
                    let Some(answer) = self.service.answer(&mut session, &card.key(), recall)
                    else {
                        continue;
                    };
                    match recall {
                        Recall::Correct => {
                            writeln!(self.out, "Great! Moved to box {}", answer.current)?;
                        }
                        Recall::Incorrect => {
                            writeln!(self.out, "No worries. Moved to box {}", answer.current)?;
                        }
                    }
                }
                StudyResponse::Quit => {
                    writeln!(self.out, "Quitting study early. Returning to main menu.")?;
                    break SessionEnd::Quit;
                }
                StudyResponse::Unrecognized => {
                    writeln!(self.out, "Unknown input, returning to menu.")?;
                    break SessionEnd::Unrecognized;
                }
            }
        };
        info!(?end, "study session ended");

        match self.service.finish_study(session) {
            Ok(summary) => {
                writeln!(
                    self.out,
                    "Reviewed {} of {} shown: {} correct, {} incorrect.",
                    summary.answered(),
                    summary.shown,
                    summary.correct,
                    summary.incorrect
                )?;
                writeln!(self.out, "Progress auto-saved to {}", self.service.location())?;
            }
            Err(e) => writeln!(self.err, "Auto-save after study failed: {e}")?,
        }
        Ok(())
    }

    fn list(&mut self) -> io::Result<()> {
        write_cards(&mut self.out, self.service)
    }

    fn stats(&mut self) -> io::Result<()> {
        write_stats(&mut self.out, self.service)
    }

    fn save_and_report(&mut self, ok: &str, failed: &str) -> io::Result<()> {
        match self.service.save() {
            Ok(()) => writeln!(self.out, "{ok} {}", self.service.location()),
            Err(e) => writeln!(self.err, "{failed}: {e}"),
        }
    }
}

/// Prints `i) [box] front -> back` for every card.
///
/// # Errors
///
/// Returns write errors from `out`.
pub fn write_cards(out: &mut impl Write, service: &DeckService) -> io::Result<()> {
    for (idx, card) in service.deck().iter().enumerate() {
        writeln!(
            out,
            "{}) [{}] {} -> {}",
            idx + 1,
            card.leitner_box(),
            card.front(),
            card.back()
        )?;
    }
    Ok(())
}

/// Prints `Box b: n` for all five boxes.
///
/// # Errors
///
/// Returns write errors from `out`.
pub fn write_stats(out: &mut impl Write, service: &DeckService) -> io::Result<()> {
    for (leitner_box, count) in service.stats().rows() {
        writeln!(out, "Box {leitner_box}: {count}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Arc;

    use storage::repository::{DeckRepository, InMemoryRepository};

    use crate::input::ReaderLines;

    /// Replays fixed reads, then reports end of input.
    struct Keystrokes(VecDeque<Line>);

    impl LineSource for Keystrokes {
        fn read_line(&mut self, _prompt: &str) -> io::Result<Line> {
            Ok(self.0.pop_front().unwrap_or(Line::Eof))
        }
    }

    fn run_menu(repo: &InMemoryRepository, input: impl LineSource) -> (String, String) {
        let mut service = DeckService::with_seed(Arc::new(repo.clone()), Some(3));
        service.load().unwrap();
        let mut out = Vec::new();
        let mut err = Vec::new();
        Menu::new(&mut service, input, &mut out, &mut err)
            .run()
            .unwrap();
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    fn run_script(repo: &InMemoryRepository, script: &str) -> (String, String) {
        run_menu(repo, ReaderLines::new(script.as_bytes()))
    }

    fn text(s: &str) -> Line {
        Line::Text(s.to_owned())
    }

    #[test]
    fn add_then_exit_persists_card() {
        let repo = InMemoryRepository::new();
        let (out, err) = run_script(&repo, "1\nHund\ndog\n5\n");

        assert!(out.contains("Added."));
        assert!(out.contains("Saved to memory"));
        assert!(err.is_empty());
        assert_eq!(repo.contents().unwrap().as_deref(), Some("Hund|dog|1\n"));
    }

    #[test]
    fn study_with_empty_deck_refuses() {
        let repo = InMemoryRepository::new();
        let (out, _) = run_script(&repo, "2\n5\n");
        assert!(out.contains("No cards. Add some first."));
    }

    #[test]
    fn full_study_cycle_promotes_every_card() {
        let repo = InMemoryRepository::with_contents("q1|a1|1\nq2|a2|3\n");
        let (out, _) = run_script(&repo, "2\n\ny\n\ny\n5\n");

        assert!(out.contains("Cycle complete."));
        assert!(out.contains("Reviewed 2 of 2 shown: 2 correct, 0 incorrect."));
        let boxes: Vec<u8> = repo
            .load()
            .unwrap()
            .iter()
            .map(|c| c.leitner_box().value())
            .collect();
        assert_eq!(boxes, vec![2, 4]);
    }

    #[test]
    fn unrecognized_reply_ends_session_and_saves() {
        let repo = InMemoryRepository::with_contents("q1|a1|2\n");
        let (out, _) = run_script(&repo, "2\n\nmaybe\n5\n");

        assert!(out.contains("Unknown input, returning to menu."));
        assert!(out.contains("Progress auto-saved to memory"));
        assert_eq!(repo.contents().unwrap().as_deref(), Some("q1|a1|2\n"));
    }

    #[test]
    fn incorrect_reply_demotes() {
        let repo = InMemoryRepository::with_contents("q1|a1|4\n");
        let (out, _) = run_script(&repo, "2\n\nn\n5\n");

        assert!(out.contains("No worries. Moved to box 3"));
        assert_eq!(repo.contents().unwrap().as_deref(), Some("q1|a1|3\n"));
    }

    #[test]
    fn stats_and_list_show_every_box() {
        let repo = InMemoryRepository::with_contents("q1|a1|1\nq2|a2|5\n");
        let (out, _) = run_script(&repo, "3\n4\n5\n");

        assert!(out.contains("1) [1] q1 -> a1"));
        assert!(out.contains("2) [5] q2 -> a2"));
        for line in ["Box 1: 1", "Box 2: 0", "Box 3: 0", "Box 4: 0", "Box 5: 1"] {
            assert!(out.contains(line), "missing {line}");
        }
    }

    #[test]
    fn unknown_choice_and_eof_exit_cleanly() {
        let repo = InMemoryRepository::new();
        let (out, _) = run_script(&repo, "9\n");
        assert!(out.contains("Unknown choice."));
        assert_eq!(repo.contents().unwrap().as_deref(), Some(""));
    }

    #[test]
    fn save_failure_is_reported_not_fatal() {
        let repo = InMemoryRepository::new();
        repo.set_fail_writes(true);
        let (out, err) = run_script(&repo, "1\nQ\nA\n3\n5\n");

        assert!(err.contains("Auto-save failed"));
        assert!(err.contains("Failed to save"));
        assert!(out.contains("1) [1] Q -> A"));
    }

    #[test]
    fn ctrl_c_at_main_prompt_only_hints() {
        let repo = InMemoryRepository::new();
        let keys = Keystrokes([Line::Interrupted, text("5")].into());
        let (out, _) = run_menu(&repo, keys);

        assert!(out.contains("Use 5 to save and exit."));
        assert!(out.contains("Saved to memory"));
    }

    #[test]
    fn ctrl_c_while_adding_cancels() {
        let repo = InMemoryRepository::new();
        let keys = Keystrokes([text("1"), text("Q"), Line::Interrupted, text("5")].into());
        let (out, _) = run_menu(&repo, keys);

        assert!(out.contains("Cancelled."));
        assert_eq!(repo.contents().unwrap().as_deref(), Some(""));
    }

    #[test]
    fn ctrl_c_during_study_quits_and_keeps_progress() {
        let repo = InMemoryRepository::with_contents("q1|a1|2\n");
        let keys = Keystrokes(
            [text("2"), text(""), Line::Interrupted, text("5")].into(),
        );
        let (out, _) = run_menu(&repo, keys);

        assert!(out.contains("Quitting study early."));
        assert!(out.contains("Progress auto-saved to memory"));
        assert_eq!(repo.contents().unwrap().as_deref(), Some("q1|a1|2\n"));
    }
}
