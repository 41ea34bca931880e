use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::level::LevelConfig;

const SAMPLE_PACK: &str = include_str!("../assets/pack-es-a1.json");

#[derive(Debug, Error)]
pub enum PackError {
    #[error("failed to read pack file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse pack: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Pre-authored wrong answers, keyed by the question kind they apply to.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Distractors {
    #[serde(default)]
    pub meaning: Vec<String>,
    #[serde(default)]
    pub form: Vec<String>,
}

/// A single vocabulary entry. Identity and content are immutable; mastery
/// state lives in the progress store, never here.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub id: String,
    pub base: String,
    /// Ordered; the first entry is the primary translation.
    pub translations: Vec<String>,
    /// Grammatical variants, e.g. `"plural" -> "manzanas"`.
    #[serde(default)]
    pub forms: HashMap<String, String>,
    /// Example sentences containing the base form.
    #[serde(default)]
    pub examples: Vec<String>,
    /// Example sentences containing the plural form.
    #[serde(default)]
    pub examples_plural: Vec<String>,
    #[serde(default)]
    pub distractors: Distractors,
}

impl Word {
    pub fn primary_translation(&self) -> Option<&str> {
        self.translations.first().map(String::as_str)
    }

    /// Plural form, only when it actually differs from the base.
    pub fn plural(&self) -> Option<&str> {
        self.forms
            .get("plural")
            .map(String::as_str)
            .filter(|p| !p.eq_ignore_ascii_case(&self.base))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub id: String,
    #[serde(default)]
    pub config: LevelConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pack {
    pub id: String,
    pub title: String,
    pub language: String,
    #[serde(default)]
    pub cefr_level: String,
    pub words: Vec<Word>,
    #[serde(default)]
    pub levels: Vec<Level>,
}

impl Pack {
    pub fn from_json(json: &str) -> Result<Self, PackError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load_file(path: &Path) -> Result<Self, PackError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Embedded sample pack. The asset is validated by tests, so a parse
    /// failure can only happen on a broken build; degrade to an empty pack.
    pub fn sample() -> Self {
        serde_json::from_str(SAMPLE_PACK).unwrap_or_default()
    }

    pub fn word(&self, lexeme_id: &str) -> Option<&Word> {
        self.words.iter().find(|w| w.id == lexeme_id)
    }

    pub fn level(&self, level_id: &str) -> Option<&Level> {
        self.levels.iter().find(|l| l.id == level_id)
    }
}
