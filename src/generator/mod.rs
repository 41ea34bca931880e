pub mod anagram;
pub mod context;
pub mod distractor;
pub mod form;
pub mod meaning;
pub mod misspelling;

use serde::{Deserialize, Serialize};

use crate::level::Difficulty;
use crate::pack::Word;
use crate::rng::SessionRng;

/// Question kinds a level can enable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    Meaning,
    Form,
    Anagram,
    Context,
}

impl SlotKind {
    pub const ALL: [SlotKind; 4] = [
        SlotKind::Meaning,
        SlotKind::Form,
        SlotKind::Anagram,
        SlotKind::Context,
    ];
}

/// One answer choice. `id` doubles as the display text and must be unique
/// within a slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotOption {
    pub id: String,
    pub is_correct: bool,
}

impl SlotOption {
    pub fn new(id: impl Into<String>, is_correct: bool) -> Self {
        Self {
            id: id.into(),
            is_correct,
        }
    }
}

/// Kind-specific slot payload. Each variant carries only the fields its
/// renderer needs, so a meaning slot cannot accidentally expose anagram
/// letters and vice versa.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SlotBody {
    Meaning {
        prompt: String,
        options: Vec<SlotOption>,
    },
    Form {
        prompt: String,
        options: Vec<SlotOption>,
    },
    Anagram {
        prompt: String,
        letters: Vec<char>,
        correct_answer: String,
    },
    Context {
        prompt: String,
        /// Example sentence with the target form replaced by `____`.
        context: String,
        words: Vec<String>,
        correct_answer: String,
    },
}

impl SlotBody {
    pub fn kind(&self) -> SlotKind {
        match self {
            SlotBody::Meaning { .. } => SlotKind::Meaning,
            SlotBody::Form { .. } => SlotKind::Form,
            SlotBody::Anagram { .. } => SlotKind::Anagram,
            SlotBody::Context { .. } => SlotKind::Context,
        }
    }

    pub fn options(&self) -> Option<&[SlotOption]> {
        match self {
            SlotBody::Meaning { options, .. } | SlotBody::Form { options, .. } => Some(options),
            _ => None,
        }
    }
}

/// One question instance within a session plan.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub index: usize,
    pub lexeme_id: String,
    #[serde(flatten)]
    pub body: SlotBody,
}

/// Dispatch to the builder for `kind`. Returns `None` when the word lacks
/// the data that kind requires; the planner retries with another kind.
pub fn build_slot(
    kind: SlotKind,
    word: &Word,
    index: usize,
    lanes: usize,
    difficulty: Difficulty,
    siblings: &[Word],
    rng: &mut SessionRng,
) -> Option<Slot> {
    match kind {
        SlotKind::Meaning => meaning::build(word, index, lanes, difficulty, siblings, rng),
        SlotKind::Form => form::build(word, index, lanes, difficulty, siblings, rng),
        SlotKind::Anagram => anagram::build(word, index, difficulty, rng),
        SlotKind::Context => context::build(word, index, rng),
    }
}

/// Shared helper for the two choice kinds: correct answer plus distractors,
/// shuffled so the correct option's position is not predictable.
pub(crate) fn choice_options(
    correct: &str,
    distractors: Vec<String>,
    rng: &mut SessionRng,
) -> Vec<SlotOption> {
    let mut options = Vec::with_capacity(distractors.len() + 1);
    options.push(SlotOption::new(correct, true));
    for d in distractors {
        options.push(SlotOption::new(d, false));
    }
    rng.shuffle(&mut options);
    options
}
