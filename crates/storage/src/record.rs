//! Line format for persisted cards: `front|back|box`.

use std::io::{self, BufRead, Write};

use leitner_core::model::{Card, Deck, LeitnerBox};
use tracing::debug;

/// Field delimiter inside a record line.
pub const FIELD_DELIMITER: char = '|';

/// Stands in for a literal `|` inside front/back text (U+00A6 BROKEN BAR).
pub const PIPE_SUBSTITUTE: char = '\u{a6}';

/// Persisted shape of a card.
///
/// Mirrors the domain `Card` so the text format can be read and written
/// without leaking storage concerns into the core crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRecord {
    pub front: String,
    pub back: String,
    pub leitner_box: LeitnerBox,
}

impl CardRecord {
    #[must_use]
    pub fn from_card(card: &Card) -> Self {
        Self {
            front: card.front().to_owned(),
            back: card.back().to_owned(),
            leitner_box: card.leitner_box(),
        }
    }

    #[must_use]
    pub fn into_card(self) -> Card {
        Card::in_box(self.front, self.back, self.leitner_box)
    }

    /// Encodes the record as a single line, without a trailing newline.
    ///
    /// ```
    /// # use leitner_core::model::Card;
    /// # use storage::record::CardRecord;
    /// let card = Card::with_box("a|b", "line1\nline2", 3);
    /// assert_eq!(CardRecord::from_card(&card).to_line(), "a\u{a6}b|line1 line2|3");
    /// ```
    #[must_use]
    pub fn to_line(&self) -> String {
        format!(
            "{}{sep}{}{sep}{}",
            encode_field(&self.front),
            encode_field(&self.back),
            self.leitner_box,
            sep = FIELD_DELIMITER,
        )
    }

    /// Decodes one line.
    ///
    /// Returns `None` when the line has fewer than three `|`-separated
    /// fields. Everything after the second `|` is the box field; a box that is
    /// not an integer falls back to box 1, and out-of-range values clamp.
    #[must_use]
    pub fn parse_line(line: &str) -> Option<Self> {
        let mut fields = line.splitn(3, FIELD_DELIMITER);
        let front = fields.next()?;
        let back = fields.next()?;
        let raw_box = fields.next()?;

        Some(Self {
            front: decode_field(front),
            back: decode_field(back),
            leitner_box: raw_box.parse().unwrap_or_default(),
        })
    }
}

/// Outcome of reading a store into a deck.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Cards added to the deck.
    pub loaded: usize,
    /// Lines dropped because they were not records.
    pub skipped: usize,
    /// Duplicate records collapsed into an earlier card.
    pub duplicates: usize,
    /// The store did not exist yet.
    pub missing: bool,
}

impl LoadReport {
    #[must_use]
    pub fn missing() -> Self {
        Self {
            missing: true,
            ..Self::default()
        }
    }
}

/// Reads records line by line into `deck`, skipping lines that do not parse.
///
/// The deck is not cleared here; repositories do that before calling.
///
/// # Errors
///
/// Returns any I/O error from the reader, including invalid UTF-8.
pub fn read_deck<R: BufRead>(reader: R, deck: &mut Deck) -> io::Result<LoadReport> {
    let mut report = LoadReport::default();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        match CardRecord::parse_line(&line) {
            Some(record) => {
                if deck.add_card(record.into_card()) {
                    report.loaded += 1;
                } else {
                    report.duplicates += 1;
                }
            }
            None => {
                debug!(line = idx + 1, "skipping malformed card record");
                report.skipped += 1;
            }
        }
    }
    Ok(report)
}

/// Writes one record line per card, in deck order.
///
/// # Errors
///
/// Returns any I/O error from the writer.
pub fn write_deck<W: Write>(deck: &Deck, mut writer: W) -> io::Result<()> {
    for card in deck {
        writeln!(writer, "{}", CardRecord::from_card(card).to_line())?;
    }
    writer.flush()
}

fn encode_field(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            FIELD_DELIMITER => out.push(PIPE_SUBSTITUTE),
            '\r' => {
                // CRLF collapses to one space like a bare LF.
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push(' ');
            }
            '\n' => out.push(' '),
            other => out.push(other),
        }
    }
    out
}

fn decode_field(text: &str) -> String {
    text.replace(PIPE_SUBSTITUTE, "|")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_pipes_and_collapses_newlines() {
        let card = Card::with_box("a|b", "line1\nline2", 3);
        let line = CardRecord::from_card(&card).to_line();
        assert!(!line.contains('\n'));

        let back = CardRecord::parse_line(&line).unwrap().into_card();
        assert_eq!(back.front(), "a|b");
        assert_eq!(back.back(), "line1 line2");
        assert_eq!(back.leitner_box().value(), 3);
    }

    #[test]
    fn crlf_and_lone_cr_become_single_spaces() {
        let card = Card::new("x\r\ny", "p\rq");
        let line = CardRecord::from_card(&card).to_line();
        assert_eq!(line, "x y|p q|1");
    }

    #[test]
    fn round_trip_keeps_unicode() {
        let card = Card::with_box("Wie spät ist es?", "何時ですか", 2);
        let line = CardRecord::from_card(&card).to_line();
        let back = CardRecord::parse_line(&line).unwrap().into_card();
        assert_eq!(back, card);
    }

    #[test]
    fn rejects_lines_with_fewer_than_three_fields() {
        assert!(CardRecord::parse_line("").is_none());
        assert!(CardRecord::parse_line("front only").is_none());
        assert!(CardRecord::parse_line("front|back").is_none());
    }

    #[test]
    fn extra_delimiters_land_in_box_field() {
        let rec = CardRecord::parse_line("q|a|2|extra").unwrap();
        assert_eq!(rec.front, "q");
        assert_eq!(rec.back, "a");
        assert_eq!(rec.leitner_box, LeitnerBox::MIN);
    }

    #[test]
    fn bad_box_defaults_then_clamps() {
        assert_eq!(CardRecord::parse_line("q|a|").unwrap().leitner_box.value(), 1);
        assert_eq!(CardRecord::parse_line("q|a|x").unwrap().leitner_box.value(), 1);
        assert_eq!(CardRecord::parse_line("q|a|9").unwrap().leitner_box.value(), 5);
        assert_eq!(CardRecord::parse_line("q|a|0").unwrap().leitner_box.value(), 1);
        assert_eq!(CardRecord::parse_line("q|a|4").unwrap().leitner_box.value(), 4);
    }

    #[test]
    fn read_deck_skips_short_lines_and_counts_them() {
        let input = "q1|a1|2\nonly|two\n\nq2|a2|5\nq1|a1|4\n";
        let mut deck = Deck::new();
        let report = read_deck(input.as_bytes(), &mut deck).unwrap();

        assert_eq!(deck.len(), 2);
        assert_eq!(report.loaded, 2);
        assert_eq!(report.skipped, 2);
        assert_eq!(report.duplicates, 1);
        assert!(!report.missing);
    }

    #[test]
    fn read_deck_accepts_crlf_line_endings() {
        let input = "q|a|3\r\nr|b|2\r\n";
        let mut deck = Deck::new();
        read_deck(input.as_bytes(), &mut deck).unwrap();
        let boxes: Vec<u8> = deck.iter().map(|c| c.leitner_box().value()).collect();
        assert_eq!(boxes, vec![3, 2]);
    }

    #[test]
    fn write_deck_emits_one_line_per_card() {
        let deck: Deck = [Card::with_box("q", "a", 2), Card::new("r|s", "t")]
            .into_iter()
            .collect();
        let mut out = Vec::new();
        write_deck(&deck, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "q|a|2\nr\u{a6}s|t|1\n");
    }

    #[test]
    fn empty_front_and_back_are_accepted() {
        let rec = CardRecord::parse_line("||3").unwrap();
        assert_eq!(rec.front, "");
        assert_eq!(rec.back, "");
        assert_eq!(rec.leitner_box.value(), 3);
    }
}
