//! Display functions for games, outcomes and statistics

use super::formatters::{blank_row, colored_row, create_progress_bar, format_clock, keyboard};
use crate::board::{BoardState, BoardStatus};
use crate::commands::SimulationResult;
use crate::core::row_to_emoji;
use crate::session::{GameOutcome, GameResult, GameSession, Termination};
use crate::stats::StatsModel;
use colored::Colorize;

/// Print every visible board, the clock and the keyboard
pub fn print_session(session: &GameSession) {
    let config = session.config();
    let clock = session.clock();
    let time = clock.remaining_secs().map_or_else(
        || format!("⏱  {}", format_clock(clock.elapsed_secs)),
        |left| format!("⏳ {} left", format_clock(left)),
    );

    println!("\n{}", "─".repeat(60).cyan());
    println!(
        "{} {} | {} | guesses: {}",
        config.mode.to_string().to_uppercase().bright_cyan().bold(),
        config.difficulty,
        time,
        session.valid_guesses()
    );
    println!("{}", "─".repeat(60).cyan());

    let active = session.active_boards();
    let boards = session.boards();
    let multi = boards.len() > 1;
    for board in &boards {
        let opened = active.contains(&board.id()) || !board.guesses().is_empty();
        if !opened {
            continue;
        }
        if multi {
            println!("\nBoard {} {}", board.id(), status_label(board));
        }
        print_board(board);
    }

    if let Some(board) = active
        .first()
        .and_then(|id| boards.iter().find(|b| b.id() == *id))
    {
        println!();
        for row in keyboard(board) {
            println!("  {row}");
        }
    }
    println!();
}

/// Print one board's rows and the rows still available
pub fn print_board(board: &BoardState) {
    for record in board.guesses() {
        println!("  {}", colored_row(record));
    }
    if board.status() == BoardStatus::Active {
        let width = board.target().len();
        let blanks = board.remaining_guesses().map_or(1, |left| left.min(6));
        for _ in 0..blanks {
            println!("  {}", blank_row(width));
        }
    }
}

fn status_label(board: &BoardState) -> colored::ColoredString {
    match board.status() {
        BoardStatus::Active => "".normal(),
        BoardStatus::Solved => "✓ solved".green(),
        BoardStatus::Exhausted => format!("✗ {}", board.target().text().to_uppercase()).red(),
    }
}

/// Print the end-of-game summary
pub fn print_outcome(outcome: &GameOutcome) {
    println!("\n{}", "═".repeat(60).bright_cyan());
    let banner = match (outcome.result(), outcome.termination()) {
        (Some(GameResult::Win), _) => "    🎉  S O L V E D !  🎉    ".bright_green().bold(),
        (Some(GameResult::Lose), Termination::TimeExpired) => "    ⏰  Out of time    ".red().bold(),
        (Some(GameResult::Lose), _) => "    ❌  Out of guesses    ".red().bold(),
        (None, _) => "    ✨  Game over    ".bright_yellow().bold(),
    };
    println!("{banner}");
    println!("{}", "═".repeat(60).bright_cyan());

    for board in outcome.boards() {
        println!(
            "\n  {} ({} guesses)",
            board.target.text().to_uppercase().bright_white().bold(),
            board.rows.len()
        );
        for row in &board.rows {
            println!("    {}", row_to_emoji(&row.comparisons));
        }
    }

    println!("\n  Mode:           {} ({})", outcome.mode(), outcome.difficulty());
    println!("  Words solved:   {}", outcome.words_solved());
    println!("  Valid guesses:  {}", outcome.valid_guesses());
    println!("  Invalid tries:  {}", outcome.invalid_guesses());
    if outcome.hints_used() > 0 {
        println!("  Hints used:     {}", outcome.hints_used());
    }
    println!("  Time:           {}", format_clock(outcome.elapsed_secs()));
    if let Some(left) = outcome.time_remaining_secs() {
        println!("  Time left:      {}", format_clock(left));
    }
    println!();
}

/// One line after a game: streak and win rate
pub fn print_stats_line(stats: &StatsModel) {
    println!(
        "  Streak: {} (best {}) | Win rate: {:.0}% over {} games\n",
        stats.current_streak.to_string().bright_yellow().bold(),
        stats.best_streak,
        stats.win_rate() * 100.0,
        stats.decided_games
    );
}

/// Print the full statistics report
pub fn print_stats(title: &str, stats: &StatsModel) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", title.bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Games:".bright_cyan().bold());
    println!("   Played:           {}", stats.total_games);
    println!("   Won:              {}", stats.total_wins.to_string().green());
    println!("   Lost:             {}", stats.total_losses().to_string().red());
    println!(
        "   Win rate:         {}",
        format!("{:.1}%", stats.win_rate() * 100.0).bright_yellow().bold()
    );
    println!("   Current streak:   {}", stats.current_streak);
    println!("   Best streak:      {}", stats.best_streak);

    println!("\n⏱  {}", "Time:".bright_cyan().bold());
    println!("   Total:            {}", format_clock(stats.total_time_secs));
    println!("   Per game:         {:.1}s", stats.average_time_per_game());
    println!("   Per word:         {:.1}s", stats.average_time_per_word());
    println!("   Per guess:        {:.1}s", stats.average_time_per_guess());

    println!("\n🔤 {}", "Guesses:".bright_cyan().bold());
    println!("   Valid:            {}", stats.total_valid_guesses);
    println!("   Invalid:          {}", stats.total_invalid_guesses);
    println!("   Hints:            {}", stats.total_hints_used);
    println!("   Words solved:     {}", stats.total_words_solved);
    println!("   Per win:          {:.2}", stats.average_guesses_per_win());
    if let Some(word) = stats.favourite_opening_word() {
        println!("   Favourite opener: {}", word.to_uppercase().bright_white().bold());
    }

    if !stats.guess_histogram.is_empty() {
        println!("\n📈 {}", "Distribution:".bright_cyan().bold());
        let most = stats.guess_histogram.values().copied().max().unwrap_or(0);
        for (&guesses, &count) in &stats.guess_histogram {
            let pct = f64::from(count) / f64::from(stats.total_wins.max(1)) * 100.0;
            let bar = create_progress_bar(f64::from(count), f64::from(most), 40);
            println!("   {guesses:>2}: {} {count:4} ({pct:5.1}%)", bar.green());
        }
    }
    println!();
}

/// Print the result of a simulation
pub fn print_simulation(result: &SimulationResult) {
    print_stats("SIMULATION RESULTS", &result.stats);
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());
    println!("   Games/second:     {:.1}\n", result.games_per_second);
}
