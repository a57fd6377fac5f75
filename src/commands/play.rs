//! Interactive play on stdin
//!
//! Wall-clock seconds are turned into clock ticks each time input arrives, so
//! a timed game can only be seen to expire once the player presses enter.

use crate::board::BoardId;
use crate::core::Word;
use crate::error::{GameError, StoreError};
use crate::output::display::{print_outcome, print_session, print_stats_line};
use crate::persistence::Persistence;
use crate::session::{Difficulty, GameConfig, GameMode, GameOutcome, GameSession};
use crate::stats::StatsAggregator;
use crate::wordlists::WordSource;
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// What the player asked for on the command line
#[derive(Debug, Clone)]
pub struct PlayOptions {
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub word_length: usize,
    pub frenzy_words: usize,
    /// Day index for the daily puzzle
    pub daily: Option<u32>,
    /// Ignore a saved session and start over
    pub fresh: bool,
}

impl PlayOptions {
    #[must_use]
    pub fn game_config(&self) -> GameConfig {
        let config = match (self.daily, self.mode) {
            (Some(day), _) => GameConfig::daily(day),
            (None, GameMode::Frenzy) => GameConfig::frenzy(self.difficulty, self.frenzy_words),
            (None, mode) => GameConfig::for_mode(mode, self.difficulty),
        };
        config.with_word_length(self.word_length)
    }
}

/// How the input loop ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayEnd {
    Finished(GameOutcome),
    Paused,
}

/// Start or resume a game and play it on stdin
///
/// # Errors
/// Returns an error on I/O failure, on a store failure, or if the game
/// cannot be started (for example a daily puzzle that was already played).
pub fn run_play(
    options: &PlayOptions,
    source: &impl WordSource,
    store: &mut impl Persistence,
) -> Result<PlayEnd> {
    let session = open_session(options, source, store)?;
    let stdin = io::stdin();
    let mut input = stdin.lock();
    play_session(session, source, store, &mut input)
}

/// Resume the saved session if there is one, else start a new game
///
/// # Errors
/// Returns an error if the store cannot be read or the game cannot start.
pub fn open_session(
    options: &PlayOptions,
    source: &impl WordSource,
    store: &mut impl Persistence,
) -> Result<GameSession> {
    if options.daily.is_none() && !options.fresh {
        if let Some(save) = store.load_session().context("Failed to read saved session")? {
            match GameSession::restore_checked(save, &*store) {
                Ok(mut session) => {
                    store.clear_session()?;
                    session.resume()?;
                    println!(
                        "{}",
                        format!("Resuming your {} game", session.config().mode).bright_cyan()
                    );
                    return Ok(session);
                }
                Err(e) => {
                    info!(error = %e, "discarding unusable saved session");
                    store.clear_session()?;
                }
            }
        }
    }

    let config = options.game_config();
    let session = if config.is_daily() {
        GameSession::start_daily(config, source, store)?
    } else {
        GameSession::start(config, source, &mut rand::rng())?
    };
    Ok(session)
}

/// Drive `session` from `input` until it finishes or the player pauses
///
/// # Errors
/// Returns an error on I/O or store failure.
pub fn play_session(
    mut session: GameSession,
    source: &impl WordSource,
    store: &mut impl Persistence,
    input: &mut impl BufRead,
) -> Result<PlayEnd> {
    print_help();
    print_session(&session);

    let mut last_tick = Instant::now();
    loop {
        let Some(line) = read_line(input)? else {
            // End of input keeps the game for later
            return pause(session, store);
        };

        let elapsed = last_tick.elapsed().as_secs();
        last_tick += Duration::from_secs(elapsed);
        for _ in 0..elapsed {
            session.tick()?;
            if session.is_terminal() {
                break;
            }
        }
        if let Some(outcome) = session.outcome() {
            println!("{}", "⏰ Time is up!".red().bold());
            return finish(outcome.clone(), store);
        }

        let line = line.trim().to_lowercase();
        match line.split_whitespace().collect::<Vec<_>>().as_slice() {
            [] => continue,
            [":pause" | ":quit" | ":q"] => return pause(session, store),
            [":help" | ":h"] => print_help(),
            [":hint"] => match session.reveal_hint()? {
                Some((id, hint)) => println!(
                    "💡 Board {id}: letter {} is '{}'",
                    hint.position + 1,
                    hint.letter.to_ascii_uppercase()
                ),
                None => println!("No more letters to reveal"),
            },
            [":to", board, guess] => {
                let Ok(board) = board.parse::<u32>() else {
                    println!("{}", "Usage: :to <board> <word>".yellow());
                    continue;
                };
                let target = Some(BoardId(board));
                if let Some(end) = guess_once(&mut session, source, store, target, guess)? {
                    return Ok(end);
                }
            }
            [guess] if !guess.starts_with(':') => {
                if let Some(end) = guess_once(&mut session, source, store, None, guess)? {
                    return Ok(end);
                }
            }
            _ => println!("{}", "Unknown command, type :help".yellow()),
        }
    }
}

fn guess_once(
    session: &mut GameSession,
    source: &impl WordSource,
    store: &mut impl Persistence,
    board: Option<BoardId>,
    guess: &str,
) -> Result<Option<PlayEnd>> {
    let known = Word::new(guess).is_ok_and(|w| source.is_valid_dictionary_word(&w));
    if !known {
        session.record_invalid_attempt()?;
        println!("{}", format!("'{guess}' is not in the word list").yellow());
        return Ok(None);
    }

    let step = match board {
        Some(id) => session.submit_guess_to(id, guess),
        None => session.submit_guess(guess),
    };
    let step = match step {
        Ok(step) => step,
        Err(e) if e.is_invalid_guess() => {
            session.record_invalid_attempt()?;
            println!("{}", e.to_string().yellow());
            return Ok(None);
        }
        Err(
            e @ (GameError::UnknownBoard(_)
            | GameError::BoardNotActive(_)
            | GameError::BoardTerminated(_)),
        ) => {
            println!("{}", e.to_string().yellow());
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(id) = step.activated {
        debug!(board = %id, "next board opened");
    }
    match step.outcome {
        Some(outcome) => finish(outcome, store).map(Some),
        None => {
            print_session(session);
            Ok(None)
        }
    }
}

fn pause(mut session: GameSession, store: &mut impl Persistence) -> Result<PlayEnd> {
    session.pause()?;
    if session.config().is_daily() {
        println!("Daily puzzles cannot be saved; come back and start over");
        return Ok(PlayEnd::Paused);
    }
    store
        .save_session(&session.save()?)
        .context("Failed to save session")?;
    println!("{}", "⏸  Game saved. Run `play` again to resume.".bright_cyan());
    Ok(PlayEnd::Paused)
}

fn finish(outcome: GameOutcome, store: &mut impl Persistence) -> Result<PlayEnd> {
    match store.record_outcome(&outcome) {
        Ok(()) => {}
        Err(StoreError::DailyAlreadyRecorded(day)) => {
            warn!(day, "daily result not counted");
            println!(
                "{}",
                format!("Daily #{day} was already played; this result is not counted.").yellow()
            );
        }
        Err(e) => return Err(e).context("Failed to store finished game"),
    }
    print_outcome(&outcome);

    let history = store.outcomes()?;
    let stats = StatsAggregator::rebuild_for_mode(&history, outcome.mode()).snapshot();
    print_stats_line(&stats);
    Ok(PlayEnd::Finished(outcome))
}

fn print_help() {
    println!("\nType a word and press enter to guess.");
    println!("Commands: :hint  :to <board> <word>  :pause  :help\n");
}

fn read_line(input: &mut impl BufRead) -> Result<Option<String>> {
    print!("> ");
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read input")?;
    Ok((read > 0).then_some(line))
}
