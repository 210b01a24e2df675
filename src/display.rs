//! Read-only scoreboard view
//!
//! Polls the durable store on one fixed interval and rotates which rank
//! window is visible on another, the two timers fully decoupled. Store
//! outages are tolerated by keeping the last good view until a later poll
//! succeeds.

use crate::consts::{POLL_INTERVAL_SECS, RANK_WINDOW_SIZE, ROTATE_INTERVAL_SECS};
use crate::genome::{lives_for, size_scale_for, speed_mult_for};
use crate::leaderboard::{Leaderboard, ScoreRecord};
use crate::store::JsonFileStore;

/// Which slice of the ranking is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankWindow {
    /// Ranks 1-10
    Top,
    /// Ranks 11-20
    Next,
}

impl RankWindow {
    pub fn start_rank(self) -> usize {
        match self {
            RankWindow::Top => 1,
            RankWindow::Next => RANK_WINDOW_SIZE + 1,
        }
    }

    fn toggled(self) -> Self {
        match self {
            RankWindow::Top => RankWindow::Next,
            RankWindow::Next => RankWindow::Top,
        }
    }
}

#[derive(Debug)]
pub struct ScoreboardDisplay {
    view: Leaderboard,
    window: RankWindow,
    poll_timer: f32,
    rotate_timer: f32,
}

impl ScoreboardDisplay {
    /// Build the display with an initial read; an unavailable store just
    /// means starting from an empty view.
    pub fn new(store: &JsonFileStore) -> Self {
        let view = match store.read_all() {
            Ok(board) => board,
            Err(e) => {
                log::warn!("initial leaderboard read failed, starting empty: {e}");
                Leaderboard::new()
            }
        };
        Self {
            view,
            window: RankWindow::Top,
            poll_timer: 0.0,
            rotate_timer: 0.0,
        }
    }

    /// Advance both timers. Returns true when the visible content changed
    /// (new data or a window rotation) and a redraw is warranted.
    pub fn tick(&mut self, dt: f32, store: &JsonFileStore) -> bool {
        let mut changed = false;

        self.poll_timer += dt;
        if self.poll_timer >= POLL_INTERVAL_SECS {
            self.poll_timer = 0.0;
            match store.read_all() {
                Ok(board) => {
                    if board != self.view {
                        log::info!("leaderboard updated: {} records", board.len());
                        self.view = board;
                        changed = true;
                    }
                }
                Err(e) => {
                    // Keep the last good view; the next poll retries
                    log::warn!("leaderboard poll failed: {e}");
                }
            }
        }

        self.rotate_timer += dt;
        if self.rotate_timer >= ROTATE_INTERVAL_SECS {
            self.rotate_timer = 0.0;
            self.window = self.window.toggled();
            changed = true;
        }

        changed
    }

    pub fn window(&self) -> RankWindow {
        self.window
    }

    pub fn view(&self) -> &Leaderboard {
        &self.view
    }

    /// Records in the current window with their 1-based ranks
    pub fn visible(&self) -> Vec<(usize, &ScoreRecord)> {
        let start = self.window.start_rank();
        self.view
            .rank_range(start, RANK_WINDOW_SIZE)
            .iter()
            .enumerate()
            .map(|(i, record)| (start + i, record))
            .collect()
    }
}

/// One-line gameplay build summary for a record, e.g.
/// `Life Gene: 3  Speed Gene: 130%  Size Gene: 70%`
pub fn build_summary(record: &ScoreRecord) -> String {
    let g = &record.gameplay_circuits;
    format!(
        "Life Gene: {}  Speed Gene: {:.0}%  Size Gene: {:.0}%",
        lives_for(g.life.promoter_tier),
        speed_mult_for(g.speed.promoter_tier) * 100.0,
        size_scale_for(g.small.promoter_tier) * 100.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::GenomeBuild;
    use chrono::{TimeZone, Utc};
    use std::fs;
    use tempfile::tempdir;

    fn record(name: &str, score: u64, secs: i64) -> ScoreRecord {
        let config = GenomeBuild::default().snapshot();
        let ts = Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap();
        ScoreRecord::new(name.to_string(), score, &config, ts)
    }

    #[test]
    fn picks_up_new_records_on_poll() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data.json"));
        let mut display = ScoreboardDisplay::new(&store);
        assert!(display.visible().is_empty());

        store.append(record("a", 100, 0)).unwrap();
        // Nothing before the poll interval elapses
        assert!(!display.tick(1.0, &store));
        assert!(display.visible().is_empty());

        assert!(display.tick(POLL_INTERVAL_SECS, &store));
        assert_eq!(display.visible().len(), 1);
    }

    #[test]
    fn unchanged_content_is_not_a_change() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data.json"));
        store.append(record("a", 100, 0)).unwrap();
        let mut display = ScoreboardDisplay::new(&store);
        assert!(!display.tick(POLL_INTERVAL_SECS, &store));
    }

    #[test]
    fn retains_last_view_through_store_outage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        let store = JsonFileStore::new(&path);
        store.append(record("a", 100, 0)).unwrap();
        let mut display = ScoreboardDisplay::new(&store);
        assert_eq!(display.view().len(), 1);

        // Corrupt the file: polls fail, the view survives
        fs::write(&path, "{broken").unwrap();
        display.tick(POLL_INTERVAL_SECS, &store);
        assert_eq!(display.view().len(), 1);

        // Store recovers with more data; the next poll picks it up
        let mut repaired = Leaderboard::new();
        repaired.insert(record("a", 100, 0));
        repaired.insert(record("b", 200, 1));
        fs::write(&path, serde_json::to_string(&repaired).unwrap()).unwrap();
        display.tick(POLL_INTERVAL_SECS, &store);
        assert_eq!(display.view().len(), 2);
    }

    #[test]
    fn rotation_is_decoupled_from_polling() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data.json"));
        let mut display = ScoreboardDisplay::new(&store);
        assert_eq!(display.window(), RankWindow::Top);

        // Five polls happen before one rotation
        for _ in 0..5 {
            display.tick(POLL_INTERVAL_SECS, &store);
            assert_eq!(display.window(), RankWindow::Top);
        }
        assert!(display.tick(POLL_INTERVAL_SECS, &store));
        assert_eq!(display.window(), RankWindow::Next);
    }

    #[test]
    fn windows_cover_ranks_1_to_20() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data.json"));
        for i in 0..15 {
            store.append(record("p", 1000 - i as u64, i)).unwrap();
        }
        let mut display = ScoreboardDisplay::new(&store);
        let top: Vec<usize> = display.visible().iter().map(|(rank, _)| *rank).collect();
        assert_eq!(top, (1..=10).collect::<Vec<_>>());

        display.tick(ROTATE_INTERVAL_SECS, &store);
        let next: Vec<usize> = display.visible().iter().map(|(rank, _)| *rank).collect();
        assert_eq!(next, (11..=15).collect::<Vec<_>>());
    }

    #[test]
    fn build_summary_reads_like_the_kiosk_line() {
        let summary = build_summary(&record("a", 1, 0));
        // Default build: Life=Weak, Speed=Medium, Size=Strong
        assert_eq!(summary, "Life Gene: 1  Speed Gene: 100%  Size Gene: 70%");
    }
}
