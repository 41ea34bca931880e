use serde::{Deserialize, Serialize};

pub const BASE_POINTS: u32 = 10;

/// Live scoring state for one session. Transitions are pure: `apply_answer`
/// returns a new state and never mutates, so the session controller holds
/// the latest value and reassigns it after every answer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreState {
    pub score: u32,
    /// Current streak of consecutive correct answers.
    pub combo: u32,
    pub combo_max: u32,
    pub correct: u32,
    pub total: u32,
    /// Every missed answer, in order. Duplicates are intentional: the list
    /// records misses, not unique words.
    pub errors: Vec<String>,
}

/// Bonus awarded on top of the base points once the streak reaches a
/// multiple of three: 5 at combo 3..=5, 10 at 6..=8, and so on.
pub fn combo_bonus(combo: u32) -> u32 {
    combo / 3 * 5
}

impl ScoreState {
    pub fn apply_answer(&self, is_correct: bool, lexeme_id: &str) -> ScoreState {
        let mut next = self.clone();
        next.total += 1;

        if is_correct {
            next.combo += 1;
            next.combo_max = next.combo_max.max(next.combo);
            next.correct += 1;
            next.score += BASE_POINTS + combo_bonus(next.combo);
        } else {
            next.combo = 0;
            next.errors.push(lexeme_id.to_string());
        }

        next
    }
}
