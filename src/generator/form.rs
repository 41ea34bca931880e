use crate::generator::distractor::{self, DistractorKind};
use crate::generator::{Slot, SlotBody, choice_options};
use crate::level::Difficulty;
use crate::pack::Word;
use crate::rng::SessionRng;

/// Form choice: shown the translation, pick the correctly spelled word.
/// Distractors fall back to synthesized misspellings when nothing is
/// authored, so this kind works on any word with a translation.
pub fn build(
    word: &Word,
    index: usize,
    lanes: usize,
    difficulty: Difficulty,
    siblings: &[Word],
    rng: &mut SessionRng,
) -> Option<Slot> {
    let prompt = word.primary_translation()?.to_string();

    let distractors = distractor::build(
        word,
        DistractorKind::Form,
        siblings,
        lanes,
        difficulty,
        rng,
    );

    Some(Slot {
        index,
        lexeme_id: word.id.clone(),
        body: SlotBody::Form {
            prompt,
            options: choice_options(&word.base, distractors, rng),
        },
    })
}
