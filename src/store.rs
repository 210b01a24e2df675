//! Durable leaderboard store shared between the game and the scoreboard
//!
//! One writer (the session loop) and one concurrent reader (the display)
//! share a single JSON file. Writes go to a sibling temp file which is then
//! renamed over the record, so a reader never observes a half-written
//! sequence. An absent or empty file means "no scores yet", not an error.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::GameResult;
use crate::leaderboard::{Leaderboard, ScoreRecord};

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full ordered sequence. Missing or empty files yield an empty
    /// leaderboard; I/O or decode failures are reported for the caller to
    /// retry.
    pub fn read_all(&self) -> GameResult<Leaderboard> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Leaderboard::new()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(Leaderboard::new());
        }
        let mut board: Leaderboard = serde_json::from_str(&raw)?;
        board.normalize();
        Ok(board)
    }

    /// Read-modify-write of the whole sequence: load current content, insert
    /// preserving sort order, atomically replace the durable record. Returns
    /// the new leaderboard. On failure the durable record is unchanged and
    /// the caller still holds the record for resubmission.
    pub fn append(&self, record: ScoreRecord) -> GameResult<Leaderboard> {
        let mut board = self.read_all()?;
        board.insert(record);
        self.write_atomic(&board)?;
        log::info!(
            "leaderboard now holds {} records ({})",
            board.len(),
            self.path.display()
        );
        Ok(board)
    }

    fn write_atomic(&self, board: &Leaderboard) -> GameResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(board)?;
        let tmp = self.tmp_path();
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut os = self.path.clone().into_os_string();
        os.push(".tmp");
        PathBuf::from(os)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::GenomeBuild;
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    fn record(name: &str, score: u64, secs: i64) -> ScoreRecord {
        let config = GenomeBuild::default().snapshot();
        let ts = Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap();
        ScoreRecord::new(name.to_string(), score, &config, ts)
    }

    #[test]
    fn absent_file_reads_empty() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data.json"));
        assert!(store.read_all().unwrap().is_empty());
    }

    #[test]
    fn empty_file_reads_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "  \n").unwrap();
        let store = JsonFileStore::new(path);
        assert!(store.read_all().unwrap().is_empty());
    }

    #[test]
    fn corrupt_file_is_an_error_not_a_panic() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "{not json").unwrap();
        let store = JsonFileStore::new(path);
        assert!(store.read_all().is_err());
    }

    #[test]
    fn append_is_monotonic_and_sorted() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data.json"));

        for (i, score) in [50u64, 200, 125, 125].into_iter().enumerate() {
            let after = store.append(record("p", score, i as i64)).unwrap();
            assert_eq!(after.len(), i + 1);
            // The record is visible immediately after its own append
            assert!(after.iter().any(|r| r.score == score));
        }

        let board = store.read_all().unwrap();
        assert_eq!(board.len(), 4);
        let scores: Vec<u64> = board.iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![200, 125, 125, 50]);
        // Equal scores keep earlier submission first
        assert!(board.get(1).unwrap().timestamp < board.get(2).unwrap().timestamp);
    }

    #[test]
    fn append_leaves_no_temp_file_behind() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        let store = JsonFileStore::new(&path);
        store.append(record("p", 10, 0)).unwrap();
        assert!(path.exists());
        assert!(!store.tmp_path().exists());
    }

    #[test]
    fn creates_missing_parent_directory() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested/data.json"));
        store.append(record("p", 10, 0)).unwrap();
        assert_eq!(store.read_all().unwrap().len(), 1);
    }
}
