use serde::{Deserialize, Serialize};

use crate::engine::queue::{self, WordState};
use crate::generator::{Slot, build_slot};
use crate::level::{GameMode, LevelConfig};
use crate::pack::Pack;
use crate::rng::SessionRng;
use crate::store::schema::ProgressSnapshot;

// Timed sessions budget roughly this long per question.
const SECS_PER_SLOT: u32 = 5;
const MIN_TIMED_SLOTS: usize = 5;

// How many kinds to try for one word before skipping it.
const MAX_KIND_ATTEMPTS: usize = 4;

/// A fully specified session: replaying the same seed against the same pack
/// and config regenerates it exactly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionPlan {
    pub seed: String,
    pub slots: Vec<Slot>,
}

/// Generate the ordered slot list for one session.
///
/// With `restrict` given (and matching at least one word), the plan covers
/// exactly the restricted words in pack order; review-mistakes and
/// fresh-level entry points use this. Without a restriction, lives mode
/// drills the whole pack in order, while time mode sizes the plan from the
/// duration budget and fills it through the adaptive queue.
pub fn plan(
    pack: &Pack,
    config: &LevelConfig,
    seed: &str,
    restrict: Option<&[String]>,
    progress: &ProgressSnapshot,
) -> SessionPlan {
    let config = config.clone().sanitized();
    let mut rng = SessionRng::new(seed);

    let restricted: Vec<String> = restrict
        .map(|ids| {
            pack.words
                .iter()
                .filter(|w| ids.contains(&w.id))
                .map(|w| w.id.clone())
                .collect()
        })
        .unwrap_or_default();

    let ordered_ids: Vec<String> = if !restricted.is_empty() {
        restricted
    } else {
        match config.game_mode {
            GameMode::Lives => pack.words.iter().map(|w| w.id.clone()).collect(),
            GameMode::Time => {
                let states: Vec<WordState> = pack
                    .words
                    .iter()
                    .map(|w| {
                        let p = progress.get(&w.id);
                        WordState {
                            lexeme_id: w.id.clone(),
                            mastery: p.map(|p| p.mastery).unwrap_or(0.0),
                            recent_mistakes: p.map(|p| p.recent_mistakes.len()).unwrap_or(0),
                        }
                    })
                    .collect();
                let total =
                    ((config.duration_secs / SECS_PER_SLOT) as usize).max(MIN_TIMED_SLOTS);
                queue::build(&states, total, &mut rng)
            }
        }
    };

    let mut slots: Vec<Slot> = Vec::with_capacity(ordered_ids.len());
    for lexeme_id in &ordered_ids {
        let Some(word) = pack.word(lexeme_id) else {
            continue;
        };
        for _ in 0..MAX_KIND_ATTEMPTS {
            let kind = config.allowed_types[rng.pick_index(config.allowed_types.len())];
            if let Some(slot) = build_slot(
                kind,
                word,
                slots.len(),
                config.lanes,
                config.difficulty,
                &pack.words,
                &mut rng,
            ) {
                slots.push(slot);
                break;
            }
            // Kind could not handle this word; re-roll and try again.
        }
        // All attempts failed: skip the word rather than abort the session.
    }

    SessionPlan {
        seed: seed.to_string(),
        slots,
    }
}
