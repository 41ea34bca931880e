use chrono::{DateTime, Duration, Utc};

use crate::level::Difficulty;

pub const MASTERY_MIN: f64 = 0.0;
pub const MASTERY_MAX: f64 = 5.0;

/// Words at or above this mastery count as learned for queue building.
pub const LEARNED_THRESHOLD: f64 = 4.0;

const MISTAKE_RETENTION_DAYS: i64 = 7;
const MAX_RECENT_MISTAKES: usize = 10;

const WRONG_ANSWER_PENALTY: f64 = 0.5;

/// Apply one answer outcome to a word's mastery value and recent-mistake
/// history. Pure; `now` is passed in so updates are reproducible in tests.
///
/// Correct answers add the difficulty multiplier (capped at 5) and prune
/// mistakes older than the retention window. Wrong answers subtract a flat
/// penalty (floored at 0) and append `now`, keeping only the most recent
/// entries. The result is rounded to one decimal so float drift never
/// becomes visible across many sessions.
pub fn update(
    mastery: f64,
    recent_mistakes: &[DateTime<Utc>],
    was_correct: bool,
    difficulty: Difficulty,
    now: DateTime<Utc>,
) -> (f64, Vec<DateTime<Utc>>) {
    let (raw, mistakes) = if was_correct {
        let cutoff = now - Duration::days(MISTAKE_RETENTION_DAYS);
        let pruned: Vec<DateTime<Utc>> = recent_mistakes
            .iter()
            .copied()
            .filter(|t| *t >= cutoff)
            .collect();
        (mastery + difficulty.mastery_multiplier(), pruned)
    } else {
        let mut appended: Vec<DateTime<Utc>> = recent_mistakes.to_vec();
        appended.push(now);
        if appended.len() > MAX_RECENT_MISTAKES {
            let drop = appended.len() - MAX_RECENT_MISTAKES;
            appended.drain(..drop);
        }
        (mastery - WRONG_ANSWER_PENALTY, appended)
    };

    (round_one_decimal(raw.clamp(MASTERY_MIN, MASTERY_MAX)), mistakes)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
