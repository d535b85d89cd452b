//! Two-player Gin Rummy at the terminal.
//!
//! Usage: gin-rummy [--seed N] [--hand-size N] [--target N] [--no-delay]

mod cli;

use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gin_rummy::core::{GameConfig, GameRng, PlayerId};
use gin_rummy::game::{Match, Round, RoundProgress, RoundResult, Standing};
use gin_rummy::melds::MeldSet;

use cli::render::{cards_line, meld_lines, result_line, scores_line};
use cli::Terminal;

#[derive(Parser, Debug)]
#[command(name = "gin-rummy")]
#[command(about = "Play two-player Gin Rummy in the terminal")]
struct Args {
    /// Seed for the shuffle (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Cards dealt to each player
    #[arg(long, default_value_t = 10)]
    hand_size: usize,

    /// Score that wins the match
    #[arg(long, default_value_t = 100)]
    target: u32,

    /// Print everything immediately
    #[arg(long)]
    no_delay: bool,

    /// Pause before each paced message, in milliseconds
    #[arg(long, default_value_t = 800)]
    delay_ms: u64,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("gin-rummy failed: {err:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let config = GameConfig::default()
        .with_hand_size(args.hand_size)
        .with_target_score(args.target);
    let mut game = Match::new(config).context("invalid game settings")?;

    let mut rng = match args.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };
    tracing::debug!(seed = rng.seed(), "shuffle seed");

    let delay = if args.no_delay {
        Duration::ZERO
    } else {
        Duration::from_millis(args.delay_ms)
    };
    let stdin = io::stdin();
    let mut term = Terminal::new(stdin.lock(), io::stdout(), delay);

    term.say("=== GIN RUMMY ===\n")?;
    term.ask_names().context("failed to read player names")?;
    let names = term.names().clone();
    term.say(&format!(
        "\nWelcome {} and {}!",
        names[PlayerId::FIRST],
        names[PlayerId::SECOND]
    ))?;
    term.say(&format!("First to {} points wins the game.", args.target))?;
    term.say("Let's begin!\n")?;

    loop {
        term.say("\n\n========================================")?;
        term.say("        NEW ROUND")?;
        term.say("========================================")?;
        term.say(&format!("Current Scores: {}", scores_line(&names, game.scores())))?;

        let mut round = game.deal_round(&mut rng).context("failed to deal a round")?;
        if let Some(card) = round.discard_pile().top() {
            term.say(&format!("\nStarting discard: {card}"))?;
        }

        let result = play_round(&mut term, &mut game, &mut round)?;
        report_round(&mut term, &game, &round, &result)?;

        if let Some(winner) = game.winner() {
            term.say(&format!("\n\n{} WINS THE GAME!", names[winner]))?;
            term.say(&format!("Final Score: {}", scores_line(&names, game.scores())))?;
            break;
        }

        if !term.confirm("\nPlay another round? (1=Yes, 2=No): ")? {
            term.say("\n=== FINAL SCORES ===")?;
            for (player, score) in game.scores().iter() {
                term.say(&format!("{}: {score}", names[player]))?;
            }
            match game.standings() {
                Standing::Leader(player) => term.say(&format!("\n{} wins overall!", names[player]))?,
                Standing::Tied => term.say("\nIt's a tie!")?,
            }
            break;
        }
    }

    term.say("\nThanks for playing!")?;
    Ok(())
}

fn play_round<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    game: &mut Match,
    round: &mut Round,
) -> Result<RoundResult> {
    loop {
        let player = round.current_player();
        if !round.deck().is_empty() {
            term.begin_turn(player)?;
        }

        let progress = game
            .play_turn(round, term)
            .with_context(|| format!("{player}'s turn could not be played"))?;

        // An exhausted stock ends the round before this player moves.
        if let Some(record) = round.history().last().filter(|record| record.player == player) {
            term.report_turn(&record.report)?;
        }

        if let RoundProgress::Finished(result) = progress {
            return Ok(result);
        }
    }
}

fn report_round<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    game: &Match,
    round: &Round,
    result: &RoundResult,
) -> Result<()> {
    let names = term.names().clone();

    let RoundResult::Knocked { knocker, outcome } = result else {
        term.say("\n========== ROUND ENDS ==========")?;
        term.say(&result_line(result, &names))?;
        return Ok(());
    };

    term.say("\n========== SCORING ==========")?;
    let deadwood = [
        (*knocker, outcome.knocker_deadwood),
        (knocker.opponent(), outcome.opponent_deadwood),
    ];
    for (player, points) in deadwood {
        let hand = round.hand(player).cards();
        term.say(&format!("\n{}'s final hand:", names[player]))?;
        term.say_now(&cards_line(hand), true)?;
        for line in meld_lines(&MeldSet::find(hand)) {
            term.say_now(&line, true)?;
        }
        term.say(&format!("{} deadwood: {points} points", names[player]))?;
    }

    term.say(&format!("\n{}", result_line(result, &names)))?;
    term.say("\n--- Current Scores ---")?;
    for (player, score) in game.scores().iter() {
        term.say(&format!("{}: {score}", names[player]))?;
    }
    Ok(())
}
