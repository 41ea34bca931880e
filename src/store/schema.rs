use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::summary::RunSummary;

const SCHEMA_VERSION: u32 = 1;

/// Read snapshot handed to the planner: lexeme id to progress.
pub type ProgressSnapshot = HashMap<String, LexemeProgress>;

/// Persisted per-word learning state.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LexemeProgress {
    /// 0.0 to 5.0, clamped by the mastery updater before it ever gets here.
    pub mastery: f64,
    #[serde(default)]
    pub recent_mistakes: Vec<DateTime<Utc>>,
}

/// Persisted per-level results.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub stars: u8,
    pub best_score: u32,
    pub best_accuracy: f64,
    pub completed: bool,
    pub attempts: u32,
}

impl LevelProgress {
    /// Merge one finished run: bests and stars only ever improve, every run
    /// counts as an attempt, and a level completes once a run earns a star.
    pub fn absorb(&mut self, summary: &RunSummary) {
        self.attempts += 1;
        self.stars = self.stars.max(summary.stars.min(3));
        self.best_score = self.best_score.max(summary.score);
        if summary.accuracy > self.best_accuracy {
            self.best_accuracy = summary.accuracy;
        }
        if summary.stars >= 1 {
            self.completed = true;
        }
    }
}

/// On-disk layout of one pack's progress file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PackProgressData {
    pub schema_version: u32,
    #[serde(default)]
    pub lexemes: HashMap<String, LexemeProgress>,
    #[serde(default)]
    pub levels: HashMap<String, LevelProgress>,
}

impl Default for PackProgressData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            lexemes: HashMap::new(),
            levels: HashMap::new(),
        }
    }
}

impl PackProgressData {
    /// Check if loaded data has a stale schema version and needs reset.
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }
}
