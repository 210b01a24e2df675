//! Scoreboard display process
//!
//! Independent read-only loop over the shared leaderboard file: polls every
//! few seconds, rotates between ranks 1-10 and 11-20 on its own timer, and
//! re-renders the table whenever the visible content changes. Never writes.

use std::time::{Duration, Instant};

use petri_panic::consts::*;
use petri_panic::display::{RankWindow, ScoreboardDisplay, build_summary};
use petri_panic::store::JsonFileStore;

const STORE_PATH: &str = "data.json";
const NAME_COLUMN_CHARS: usize = 30;

fn main() {
    env_logger::init();

    let store = JsonFileStore::new(STORE_PATH);
    let mut display = ScoreboardDisplay::new(&store);
    log::info!("scoreboard up, watching {STORE_PATH}");
    render(&display);

    let mut last = Instant::now();
    loop {
        let now = Instant::now();
        let dt = (now - last).as_secs_f32().min(0.1);
        last = now;

        if display.tick(dt, &store) {
            render(&display);
        }

        std::thread::sleep(Duration::from_millis(50));
    }
}

fn render(display: &ScoreboardDisplay) {
    println!();
    println!("TOP SCORES LEADERBOARD");
    match display.window() {
        RankWindow::Top => println!("Top 10 Players"),
        RankWindow::Next => println!(
            "Ranks {}-{}",
            RankWindow::Next.start_rank(),
            RankWindow::Next.start_rank() + RANK_WINDOW_SIZE - 1
        ),
    }
    println!("{:<6} {:<32} {:<10} Build", "Rank", "Name", "Score");

    let visible = display.visible();
    if visible.is_empty() {
        println!("No scores yet. Play to set a high score!");
        return;
    }
    for (rank, record) in visible {
        let name = display_name(&record.name);
        println!(
            "{:<6} {:<32} {:<10} {}",
            rank,
            name,
            record.score,
            build_summary(record)
        );
    }
}

/// Fit a player name into its column, truncating by characters so
/// multibyte names cannot split mid-character
fn display_name(name: &str) -> String {
    name.chars().take(NAME_COLUMN_CHARS).collect()
}
