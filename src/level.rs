use serde::{Deserialize, Serialize};

use crate::generator::SlotKind;

/// How a session ends: by running out of lives or by running out of time.
/// The timer itself is a UI concern; the engine only needs the mode to size
/// the plan and pick the star-rating table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    #[default]
    Lives,
    Time,
}

/// Controls both distractor aggressiveness and the mastery reward multiplier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn mastery_multiplier(self) -> f64 {
        match self {
            Difficulty::Easy => 0.5,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    #[serde(default = "default_lanes")]
    pub lanes: usize,
    #[serde(default = "default_allowed_types")]
    pub allowed_types: Vec<SlotKind>,
    #[serde(default = "default_game_mode")]
    pub game_mode: GameMode,
    #[serde(default = "default_duration_secs")]
    pub duration_secs: u32,
    #[serde(default = "default_lives")]
    pub lives: u32,
    #[serde(default)]
    pub difficulty: Difficulty,
}

fn default_lanes() -> usize {
    2
}
fn default_allowed_types() -> Vec<SlotKind> {
    vec![SlotKind::Meaning]
}
fn default_game_mode() -> GameMode {
    GameMode::Lives
}
fn default_duration_secs() -> u32 {
    60
}
fn default_lives() -> u32 {
    3
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            lanes: default_lanes(),
            allowed_types: default_allowed_types(),
            game_mode: default_game_mode(),
            duration_secs: default_duration_secs(),
            lives: default_lives(),
            difficulty: Difficulty::default(),
        }
    }
}

impl LevelConfig {
    /// Clamp out-of-range values instead of rejecting them. Levels can arrive
    /// through deep links with arbitrary parameters and the game must stay
    /// playable.
    pub fn sanitized(mut self) -> Self {
        self.lanes = self.lanes.clamp(2, 3);
        self.allowed_types.dedup();
        if self.allowed_types.is_empty() {
            self.allowed_types = default_allowed_types();
        }
        if self.duration_secs == 0 {
            self.duration_secs = default_duration_secs();
        }
        self.lives = self.lives.clamp(1, 3);
        self
    }

    /// Parse level JSON, falling back to the documented default on any error.
    pub fn from_json_or_default(json: &str) -> Self {
        serde_json::from_str::<LevelConfig>(json)
            .unwrap_or_default()
            .sanitized()
    }
}
