use serde::{Deserialize, Serialize};

use crate::level::GameMode;

pub const MAX_STARS: u8 = 3;

// Time-mode accuracy thresholds for 3 / 2 / 1 stars.
const THREE_STAR_ACCURACY: f64 = 0.95;
const TWO_STAR_ACCURACY: f64 = 0.85;
const ONE_STAR_ACCURACY: f64 = 0.70;

/// Per-lexeme outcome within one session. `attempts` counts every slot the
/// lexeme was presented in; `is_correct` is true once any of them was
/// answered right.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub lexeme_id: String,
    pub is_correct: bool,
    pub attempts: u32,
}

/// Immutable snapshot produced once per session, handed to the progress
/// store for persistence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub pack_id: String,
    pub level_id: String,
    pub score: u32,
    /// Unique lexemes answered correctly at least once, over the slot count
    /// of the plan. Rewards eventual mastery instead of punishing early
    /// mistakes permanently.
    pub accuracy: f64,
    pub stars: u8,
    pub elapsed_secs: f64,
    pub seed: String,
    pub answers: Vec<AnswerRecord>,
    pub combo_max: u32,
}

/// Lives mode maps remaining lives directly to stars; time mode maps
/// accuracy against fixed thresholds. Always within [0, 3].
pub fn star_rating(mode: GameMode, lives_remaining: u32, accuracy: f64) -> u8 {
    match mode {
        GameMode::Lives => lives_remaining.min(u32::from(MAX_STARS)) as u8,
        GameMode::Time => {
            if accuracy >= THREE_STAR_ACCURACY {
                3
            } else if accuracy >= TWO_STAR_ACCURACY {
                2
            } else if accuracy >= ONE_STAR_ACCURACY {
                1
            } else {
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lives_mode_maps_lives_directly() {
        for lives in 0..=3 {
            assert_eq!(star_rating(GameMode::Lives, lives, 0.0), lives as u8);
        }
        // Accuracy is irrelevant in lives mode.
        assert_eq!(star_rating(GameMode::Lives, 0, 1.0), 0);
        assert_eq!(star_rating(GameMode::Lives, 3, 0.0), 3);
    }

    #[test]
    fn lives_above_three_still_cap_at_three_stars() {
        assert_eq!(star_rating(GameMode::Lives, 99, 0.0), 3);
    }

    #[test]
    fn time_mode_threshold_boundaries() {
        assert_eq!(star_rating(GameMode::Time, 0, 0.95), 3);
        assert_eq!(star_rating(GameMode::Time, 0, 0.94999), 2);
        assert_eq!(star_rating(GameMode::Time, 0, 0.85), 2);
        assert_eq!(star_rating(GameMode::Time, 0, 0.849999), 1);
        assert_eq!(star_rating(GameMode::Time, 0, 0.70), 1);
        assert_eq!(star_rating(GameMode::Time, 0, 0.6999), 0);
        assert_eq!(star_rating(GameMode::Time, 0, 1.0), 3);
        assert_eq!(star_rating(GameMode::Time, 0, 0.0), 0);
    }

    #[test]
    fn summary_roundtrips_through_json() {
        let summary = RunSummary {
            pack_id: "es-food-a1".to_string(),
            level_id: "intro".to_string(),
            score: 145,
            accuracy: 0.8,
            stars: 2,
            elapsed_secs: 42.5,
            seed: "es-food-a1-intro-7".to_string(),
            answers: vec![AnswerRecord {
                lexeme_id: "es-pan".to_string(),
                is_correct: true,
                attempts: 2,
            }],
            combo_max: 4,
        };
        let json = serde_json::to_string(&summary).unwrap();
        let back: RunSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(summary, back);
    }
}
