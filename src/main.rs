//! Wordle Engine - CLI
//!
//! Play Wordle-style games in the terminal, inspect statistics and run bot
//! simulations.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use wordle_engine::{
    commands::{PlayOptions, SimulationOptions, collect_stats, run_play, run_simulation},
    config::Settings,
    output::{print_simulation, print_stats},
    persistence::JsonFileStore,
    session::{Difficulty, GameConfig, GameMode, today_index},
    wordlists::{EmbeddedWordSource, loader::load_from_file},
};

#[derive(Parser)]
#[command(
    name = "wordle_engine",
    about = "Wordle-style word games: classic, timed, zen, quad and frenzy",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Settings file (default: ~/.wordle_engine/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Extra word list file, one word per line
    #[arg(short = 'w', long, global = true)]
    wordlist: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game (default; resumes a saved game if there is one)
    Play {
        #[arg(short, long, value_enum, default_value_t = GameMode::Classic)]
        mode: GameMode,

        /// Overrides the configured difficulty
        #[arg(short, long, value_enum)]
        difficulty: Option<Difficulty>,

        /// Word length (overrides the configured length)
        #[arg(short, long)]
        length: Option<usize>,

        /// Play today's daily puzzle
        #[arg(long)]
        daily: bool,

        /// Daily puzzle number instead of today's
        #[arg(long, requires = "daily")]
        day: Option<u32>,

        /// Start a new game even if one is saved
        #[arg(long)]
        fresh: bool,
    },

    /// Show statistics over finished games
    Stats {
        /// Only games of this mode
        #[arg(short, long, value_enum)]
        mode: Option<GameMode>,
    },

    /// Let a bot play many games and report the statistics
    Simulate {
        #[arg(short, long, value_enum, default_value_t = GameMode::Classic)]
        mode: GameMode,

        #[arg(short, long, value_enum)]
        difficulty: Option<Difficulty>,

        /// Number of games
        #[arg(short = 'n', long, default_value = "500")]
        count: usize,

        /// Word length (overrides the configured length)
        #[arg(short, long)]
        length: Option<usize>,

        /// Seconds the bot spends on each guess
        #[arg(long, default_value = "5")]
        secs_per_guess: u32,

        /// Random seed
        #[arg(long, default_value = "0")]
        seed: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let source = load_word_source(cli.wordlist.as_deref())?;

    match cli.command.unwrap_or(Commands::Play {
        mode: GameMode::Classic,
        difficulty: None,
        length: None,
        daily: false,
        day: None,
        fresh: false,
    }) {
        Commands::Play {
            mode,
            difficulty,
            length,
            daily,
            day,
            fresh,
        } => {
            let options = PlayOptions {
                mode,
                difficulty: difficulty.unwrap_or(settings.difficulty),
                word_length: length.unwrap_or(settings.word_length),
                frenzy_words: settings.frenzy_words,
                daily: if daily { Some(day.map_or_else(today, Ok)?) } else { None },
                fresh,
            };
            let mut store = open_store(&settings)?;
            run_play(&options, &source, &mut store)?;
            Ok(())
        }
        Commands::Stats { mode } => {
            let store = open_store(&settings)?;
            let stats = collect_stats(&store, mode)?;
            let title = mode.map_or_else(
                || "STATISTICS".to_string(),
                |m| format!("STATISTICS: {}", m.name().to_uppercase()),
            );
            print_stats(&title, &stats);
            Ok(())
        }
        Commands::Simulate {
            mode,
            difficulty,
            count,
            length,
            secs_per_guess,
            seed,
        } => {
            let difficulty = difficulty.unwrap_or(settings.difficulty);
            let config = match mode {
                GameMode::Frenzy => GameConfig::frenzy(difficulty, settings.frenzy_words),
                mode => GameConfig::for_mode(mode, difficulty),
            }
            .with_word_length(length.unwrap_or(settings.word_length));

            println!("Simulating {count} {mode} games...");
            let options = SimulationOptions {
                config,
                games: count,
                seed,
                secs_per_guess,
                show_progress: true,
            };
            let result = run_simulation(&options, &source)?;
            print_simulation(&result);
            Ok(())
        }
    }
}

/// Embedded lists, plus an extra file if one was given
fn load_word_source(extra: Option<&Path>) -> Result<EmbeddedWordSource> {
    let source = EmbeddedWordSource::new();
    let Some(path) = extra else {
        return Ok(source);
    };
    let words = load_from_file(path)
        .with_context(|| format!("Failed to read word list: {}", path.display()))?;
    Ok(source.extended(words))
}

fn open_store(settings: &Settings) -> Result<JsonFileStore> {
    let path = settings.store_path();
    JsonFileStore::open(&path).with_context(|| format!("Failed to open store: {}", path.display()))
}

/// Today's daily puzzle number in the local time zone
fn today() -> Result<u32> {
    today_index().context("Local date is outside the daily puzzle range")
}
