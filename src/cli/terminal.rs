//! Interactive decision provider over a line-based terminal.
//!
//! Bad input is re-prompted here; the engine only ever sees a valid answer
//! or `DecisionUnavailable` once input is closed.

use std::io::{BufRead, Write};
use std::thread;
use std::time::Duration;

use gin_rummy::cards::Card;
use gin_rummy::core::{EngineError, PlayerId, PlayerMap};
use gin_rummy::melds::MeldSet;
use gin_rummy::turn::{
    DiscardChoiceProvider, DiscardView, DrawChoiceProvider, DrawSource, DrawView,
    KnockChoiceProvider, KnockView, TurnReport,
};

use super::render::{cards_line, meld_lines};

pub struct Terminal<R, W> {
    input: R,
    output: W,
    delay: Duration,
    names: PlayerMap<String>,
    current: PlayerId,
    /// Set once the knock prompt has already shown this turn's discard.
    discard_shown: bool,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W, delay: Duration) -> Self {
        Self {
            input,
            output,
            delay,
            names: PlayerMap::new(|player| player.to_string()),
            current: PlayerId::FIRST,
            discard_shown: false,
        }
    }

    pub fn names(&self) -> &PlayerMap<String> {
        &self.names
    }

    /// Ask both players for a name, keeping the default on a blank line.
    pub fn ask_names(&mut self) -> Result<(), EngineError> {
        for player in PlayerId::all() {
            self.say_now(&format!("{player} name: "), false)?;
            if let Some(line) = self.read_line()? {
                let name = line.trim();
                if !name.is_empty() {
                    self.names[player] = name.to_string();
                }
            }
        }
        Ok(())
    }

    /// Address the following prompts to `player`.
    pub fn begin_turn(&mut self, player: PlayerId) -> Result<(), EngineError> {
        self.current = player;
        self.discard_shown = false;
        self.say("\n========================================")?;
        self.say(&format!("{}'s Turn", self.names[player]))?;
        self.say("========================================")
    }

    /// Announce a finished turn: the discard and deadwood, then any knock.
    pub fn report_turn(&mut self, report: &TurnReport) -> Result<(), EngineError> {
        if !self.discard_shown {
            self.show_discard(report.discarded, report.deadwood)?;
        }
        let name = self.names[self.current].clone();
        if report.gin {
            self.say(&format!("\n{name} has GIN!"))?;
        } else if report.knocked {
            self.say(&format!("\n{name} knocks!"))?;
        }
        Ok(())
    }

    /// Print after the configured delay.
    pub fn say(&mut self, message: &str) -> Result<(), EngineError> {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        self.say_now(message, true)
    }

    /// Print immediately, for prompts and the state a player is deciding on.
    pub fn say_now(&mut self, message: &str, newline: bool) -> Result<(), EngineError> {
        let written = if newline {
            writeln!(self.output, "{message}")
        } else {
            write!(self.output, "{message}")
        };
        written.and_then(|()| self.output.flush()).map_err(closed)
    }

    /// Ask a 1=Yes / 2=No question.
    pub fn confirm(&mut self, prompt: &str) -> Result<bool, EngineError> {
        Ok(self.choose(prompt, 1, 2)? == 1)
    }

    /// Read a number in `min..=max`, asking again until one arrives.
    pub fn choose(&mut self, prompt: &str, min: usize, max: usize) -> Result<usize, EngineError> {
        loop {
            self.say_now(prompt, false)?;
            let line = self
                .read_line()?
                .ok_or_else(|| EngineError::DecisionUnavailable("input closed".into()))?;

            match line.trim().parse::<usize>() {
                Ok(choice) if (min..=max).contains(&choice) => return Ok(choice),
                Ok(_) => {
                    self.say(&format!("Out of range! Enter a number between {min} and {max}."))?;
                }
                Err(_) => self.say("Invalid input! Please enter a number.")?,
            }
        }
    }

    fn read_line(&mut self) -> Result<Option<String>, EngineError> {
        let mut line = String::new();
        match self.input.read_line(&mut line).map_err(closed)? {
            0 => Ok(None),
            _ => Ok(Some(line)),
        }
    }

    fn show_discard(&mut self, card: Card, deadwood: u32) -> Result<(), EngineError> {
        self.discard_shown = true;
        self.say(&format!("You discarded: {card}"))?;
        self.say(&format!("Your deadwood: {deadwood} points"))
    }

    fn show_melds(&mut self, melds: &MeldSet) -> Result<(), EngineError> {
        for line in meld_lines(melds) {
            self.say_now(&line, true)?;
        }
        Ok(())
    }
}

fn closed(err: std::io::Error) -> EngineError {
    EngineError::DecisionUnavailable(format!("terminal I/O failed: {err}"))
}

impl<R: BufRead, W: Write> DrawChoiceProvider for Terminal<R, W> {
    fn choose_draw(&mut self, view: &DrawView<'_>) -> Result<DrawSource, EngineError> {
        let top = view
            .discard_top
            .map_or_else(|| "(empty)".to_string(), |card| card.to_string());
        self.say_now(&format!("\nCards remaining in stock: {}", view.stock_remaining), true)?;
        self.say_now(&format!("Top of discard pile: {top}"), true)?;
        self.say_now(&format!("\n{}'s hand:", self.names[self.current]), true)?;
        self.say_now(&cards_line(view.hand), true)?;

        self.say_now("\nChoose an action:", true)?;
        self.say_now("1. Draw from stock pile", true)?;
        self.say_now("2. Draw from discard pile", true)?;
        match self.choose("Your choice: ", 1, 2)? {
            1 => Ok(DrawSource::Stock),
            _ => Ok(DrawSource::DiscardPile),
        }
    }
}

impl<R: BufRead, W: Write> DiscardChoiceProvider for Terminal<R, W> {
    fn choose_discard(&mut self, view: &DiscardView<'_>) -> Result<usize, EngineError> {
        let from = match view.source {
            DrawSource::Stock => "You drew from stock",
            DrawSource::DiscardPile => "You took from discard",
        };
        self.say(&format!("{from}: {}", view.drawn))?;
        self.say("\nUpdated hand:")?;
        self.say_now(&cards_line(view.hand), true)?;
        self.show_melds(view.melds)?;

        let len = view.hand.len();
        self.choose(&format!("\nWhich card to discard (1-{len})? "), 1, len)
    }
}

impl<R: BufRead, W: Write> KnockChoiceProvider for Terminal<R, W> {
    fn choose_knock(&mut self, view: &KnockView<'_>) -> Result<bool, EngineError> {
        self.show_discard(view.discarded, view.deadwood)?;
        let name = self.names[self.current].clone();
        self.say(&format!(
            "\n{name}, you can knock (deadwood = {})",
            view.deadwood
        ))?;
        self.confirm("Do you want to knock? (1=Yes, 2=No): ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gin_rummy::cards::parse_cards;
    use std::io::Cursor;

    fn terminal(input: &str) -> Terminal<Cursor<Vec<u8>>, Vec<u8>> {
        Terminal::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), Duration::ZERO)
    }

    fn output(terminal: &Terminal<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(terminal.output.clone()).unwrap()
    }

    #[test]
    fn test_choose_reprompts() {
        let mut term = terminal("abc\n7\n2\n");
        assert_eq!(term.choose("Pick: ", 1, 3), Ok(2));

        let out = output(&term);
        assert!(out.contains("Invalid input! Please enter a number."));
        assert!(out.contains("Out of range! Enter a number between 1 and 3."));
        assert_eq!(out.matches("Pick: ").count(), 3);
    }

    #[test]
    fn test_closed_input() {
        let mut term = terminal("");
        assert!(matches!(
            term.choose("Pick: ", 1, 2),
            Err(EngineError::DecisionUnavailable(_))
        ));
    }

    #[test]
    fn test_ask_names_keeps_defaults_for_blank_lines() {
        let mut term = terminal("Ada\n\n");
        term.ask_names().unwrap();
        assert_eq!(term.names()[PlayerId::FIRST], "Ada");
        assert_eq!(term.names()[PlayerId::SECOND], "Player 2");
    }

    #[test]
    fn test_draw_choice() {
        let mut term = terminal("2\n");
        let hand = parse_cards("AS 7D").unwrap();
        let view = DrawView {
            hand: &hand,
            discard_top: Some("KH".parse().unwrap()),
            stock_remaining: 30,
        };

        assert_eq!(term.choose_draw(&view), Ok(DrawSource::DiscardPile));
        let out = output(&term);
        assert!(out.contains("Cards remaining in stock: 30"));
        assert!(out.contains("Top of discard pile: KH"));
        assert!(out.contains("[ AS 7D ]"));
    }

    #[test]
    fn test_discard_choice_is_bounded_by_hand() {
        let mut term = terminal("4\n3\n");
        let hand = parse_cards("AS 7D KH").unwrap();
        let melds = MeldSet::find(&hand);
        let view = DiscardView {
            hand: &hand,
            drawn: hand[2],
            source: DrawSource::Stock,
            melds: &melds,
        };

        assert_eq!(term.choose_discard(&view), Ok(3));
        let out = output(&term);
        assert!(out.contains("You drew from stock: KH"));
        assert!(out.contains("No melds yet."));
        assert!(out.contains("Out of range! Enter a number between 1 and 3."));
    }

    #[test]
    fn test_knock_prompt_follows_discard_and_deadwood() {
        let mut term = terminal("1\n");
        let hand = parse_cards("2S 3S 4S 5D").unwrap();
        let melds = MeldSet::find(&hand);
        let view = KnockView {
            hand: &hand,
            discarded: "KH".parse().unwrap(),
            melds: &melds,
            deadwood: 5,
        };

        assert_eq!(term.choose_knock(&view), Ok(true));
        let out = output(&term);
        let discarded = out.find("You discarded: KH").unwrap();
        let deadwood = out.find("Your deadwood: 5 points").unwrap();
        let prompt = out.find("Do you want to knock?").unwrap();
        assert!(discarded < deadwood && deadwood < prompt);

        let report = TurnReport {
            drawn: "5D".parse().unwrap(),
            requested: DrawSource::Stock,
            source: DrawSource::Stock,
            discarded: "KH".parse().unwrap(),
            melds,
            deadwood: 5,
            knocked: true,
            gin: false,
        };
        term.report_turn(&report).unwrap();
        let out = output(&term);
        assert_eq!(out.matches("You discarded: KH").count(), 1);
        assert!(out.ends_with("Player 1 knocks!\n"));
    }

    #[test]
    fn test_report_turn_without_knock_prompt() {
        let mut term = terminal("");
        term.begin_turn(PlayerId::SECOND).unwrap();
        let hand = parse_cards("9C").unwrap();
        let report = TurnReport {
            drawn: "9C".parse().unwrap(),
            requested: DrawSource::DiscardPile,
            source: DrawSource::DiscardPile,
            discarded: "QD".parse().unwrap(),
            melds: MeldSet::find(&hand),
            deadwood: 9,
            knocked: false,
            gin: false,
        };

        term.report_turn(&report).unwrap();
        let out = output(&term);
        assert!(out.contains("You discarded: QD"));
        assert!(out.contains("Your deadwood: 9 points"));
        assert!(!out.contains("knocks!"));
    }
}
