//! Text formatting for the terminal front end. Nothing here does I/O.

use gin_rummy::cards::Card;
use gin_rummy::core::{PlayerId, PlayerMap};
use gin_rummy::game::RoundResult;
use gin_rummy::melds::MeldSet;
use gin_rummy::scoring::{OutcomeKind, Scorer};

/// `[ AS 7D KH ]`, numbered left to right from 1 for discard prompts.
pub fn cards_line(cards: &[Card]) -> String {
    let mut line = String::from("[");
    for card in cards {
        line.push(' ');
        line.push_str(&card.to_string());
    }
    line.push_str(" ]");
    line
}

pub fn meld_lines(melds: &MeldSet) -> Vec<String> {
    if melds.is_empty() {
        return vec!["No melds yet.".to_string()];
    }

    let mut lines = Vec::new();
    if !melds.sets.is_empty() {
        lines.push("Sets found:".to_string());
        lines.extend(melds.sets.iter().map(|meld| format!("  {meld}")));
    }
    if !melds.runs.is_empty() {
        lines.push("Runs found:".to_string());
        lines.extend(melds.runs.iter().map(|meld| format!("  {meld}")));
    }
    lines
}

pub fn scores_line(names: &PlayerMap<String>, scores: &PlayerMap<u32>) -> String {
    format!(
        "{} {} - {} {}",
        names[PlayerId::FIRST],
        scores[PlayerId::FIRST],
        names[PlayerId::SECOND],
        scores[PlayerId::SECOND]
    )
}

/// The headline announcing how a round ended.
pub fn result_line(result: &RoundResult, names: &PlayerMap<String>) -> String {
    match result {
        RoundResult::Draw => "Deck is empty! Round ends in a draw (no points awarded).".to_string(),
        RoundResult::Knocked { knocker, outcome } => {
            let scorer = match outcome.scorer() {
                Scorer::Knocker => *knocker,
                Scorer::Opponent => knocker.opponent(),
            };
            let name = &names[scorer];
            match outcome.kind {
                OutcomeKind::Gin => format!("GIN! {name} scores {} points!", outcome.points),
                OutcomeKind::Undercut => format!("UNDERCUT! {name} scores {} points!", outcome.points),
                OutcomeKind::Knock => format!("{name} scores {} points.", outcome.points),
            }
        }
    }
}
