//! Ranked score records
//!
//! A leaderboard is the full ordered sequence of submitted runs, sorted by
//! score descending with earlier timestamps winning ties. Records are
//! immutable once written; the sequence is only ever rewritten wholesale.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::genome::{PromoterTier, RunConfig};

/// Wire form of one circuit: promoter tier plus the coding sequence chosen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitRecord {
    pub promoter_tier: PromoterTier,
    pub coding_sequence_id: String,
}

impl CircuitRecord {
    fn new(promoter_tier: PromoterTier, coding_sequence_id: &str) -> Self {
        Self {
            promoter_tier,
            coding_sequence_id: coding_sequence_id.to_string(),
        }
    }
}

/// Appearance-only circuits as persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualCircuitRecords {
    pub shape: CircuitRecord,
    pub surface: CircuitRecord,
    pub color: CircuitRecord,
}

/// Gameplay circuits as persisted (the size trait is keyed "small")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameplayCircuits {
    pub life: CircuitRecord,
    pub speed: CircuitRecord,
    pub small: CircuitRecord,
}

/// One completed run, immutable once written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub name: String,
    pub score: u64,
    pub visual_circuits: VisualCircuitRecords,
    pub gameplay_circuits: GameplayCircuits,
    /// ISO-8601 submission time, used for tie-breaking
    pub timestamp: DateTime<Utc>,
}

impl ScoreRecord {
    pub fn new(name: String, score: u64, config: &RunConfig, timestamp: DateTime<Utc>) -> Self {
        use crate::genome::GeneTrait;
        let a = &config.assignment;
        let v = &config.visuals;
        Self {
            name,
            score,
            visual_circuits: VisualCircuitRecords {
                shape: CircuitRecord::new(v.shape_tier, v.shape.as_str()),
                surface: CircuitRecord::new(v.surface_tier, v.surface.as_str()),
                color: CircuitRecord::new(v.color_tier, v.color.as_str()),
            },
            gameplay_circuits: GameplayCircuits {
                life: CircuitRecord::new(
                    a.tier_of(GeneTrait::Life),
                    GeneTrait::Life.coding_sequence_id(),
                ),
                speed: CircuitRecord::new(
                    a.tier_of(GeneTrait::Speed),
                    GeneTrait::Speed.coding_sequence_id(),
                ),
                small: CircuitRecord::new(
                    a.tier_of(GeneTrait::Size),
                    GeneTrait::Size.coding_sequence_id(),
                ),
            },
            timestamp,
        }
    }

    /// True when `self` ranks strictly above `other`
    fn outranks(&self, other: &ScoreRecord) -> bool {
        self.score > other.score
            || (self.score == other.score && self.timestamp < other.timestamp)
    }
}

/// The full ordered sequence of score records
///
/// Serialized as a bare JSON array so the durable file stays a plain list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<ScoreRecord>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScoreRecord> {
        self.entries.iter()
    }

    pub fn get(&self, index: usize) -> Option<&ScoreRecord> {
        self.entries.get(index)
    }

    /// Insert preserving sort order (score descending, earlier timestamp
    /// first among ties)
    pub fn insert(&mut self, record: ScoreRecord) {
        let pos = self
            .entries
            .iter()
            .position(|existing| record.outranks(existing))
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, record);
    }

    /// Re-establish sort order after loading from disk. A well-behaved
    /// writer always persists sorted data; this tolerates hand-edited files.
    pub fn normalize(&mut self) {
        self.entries
            .sort_by(|a, b| b.score.cmp(&a.score).then(a.timestamp.cmp(&b.timestamp)));
    }

    /// Records for a 1-based rank range, clamped to the available entries
    pub fn rank_range(&self, start_rank: usize, len: usize) -> &[ScoreRecord] {
        let start = start_rank.saturating_sub(1).min(self.entries.len());
        let end = (start + len).min(self.entries.len());
        &self.entries[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::GenomeBuild;
    use chrono::TimeZone;

    fn record(name: &str, score: u64, secs: i64) -> ScoreRecord {
        let config = GenomeBuild::default().snapshot();
        let ts = Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap();
        ScoreRecord::new(name.to_string(), score, &config, ts)
    }

    #[test]
    fn insert_keeps_descending_order() {
        let mut board = Leaderboard::new();
        board.insert(record("a", 100, 0));
        board.insert(record("b", 300, 1));
        board.insert(record("c", 200, 2));
        let scores: Vec<u64> = board.iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![300, 200, 100]);
    }

    #[test]
    fn ties_break_by_earlier_timestamp() {
        let mut board = Leaderboard::new();
        board.insert(record("late", 200, 10));
        board.insert(record("early", 200, 5));
        assert_eq!(board.get(0).unwrap().name, "early");
        assert_eq!(board.get(1).unwrap().name, "late");
    }

    #[test]
    fn normalize_sorts_unordered_input() {
        let mut board = Leaderboard::new();
        // Simulate a hand-edited file by pushing out of order
        board.entries.push(record("low", 10, 0));
        board.entries.push(record("high", 500, 1));
        board.normalize();
        assert_eq!(board.get(0).unwrap().name, "high");
    }

    #[test]
    fn rank_range_clamps() {
        let mut board = Leaderboard::new();
        for i in 0..12 {
            board.insert(record("p", 1000 - i as u64, i));
        }
        assert_eq!(board.rank_range(1, 10).len(), 10);
        assert_eq!(board.rank_range(11, 10).len(), 2);
        assert_eq!(board.rank_range(21, 10).len(), 0);
    }

    #[test]
    fn record_captures_circuit_ids() {
        let r = record("a", 1, 0);
        assert_eq!(r.gameplay_circuits.life.coding_sequence_id, "life");
        assert_eq!(r.gameplay_circuits.small.coding_sequence_id, "small");
        assert_eq!(r.gameplay_circuits.life.promoter_tier, PromoterTier::Weak);
        assert_eq!(r.visual_circuits.shape.coding_sequence_id, "rod");
        assert_eq!(r.visual_circuits.color.promoter_tier, PromoterTier::Strong);
    }

    #[test]
    fn serializes_as_plain_array_with_iso_timestamps() {
        let mut board = Leaderboard::new();
        board.insert(record("a", 42, 0));
        let json = serde_json::to_string(&board).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains("\"promoter_tier\":\"weak\""));
        let back: Leaderboard = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
    }
}
