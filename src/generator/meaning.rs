use crate::generator::distractor::{self, DistractorKind};
use crate::generator::{Slot, SlotBody, choice_options};
use crate::level::Difficulty;
use crate::pack::Word;
use crate::rng::SessionRng;

/// Meaning choice: shown the base form, pick the right translation.
pub fn build(
    word: &Word,
    index: usize,
    lanes: usize,
    difficulty: Difficulty,
    siblings: &[Word],
    rng: &mut SessionRng,
) -> Option<Slot> {
    let correct = word.primary_translation()?;

    let distractors = distractor::build(
        word,
        DistractorKind::Meaning,
        siblings,
        lanes,
        difficulty,
        rng,
    );

    Some(Slot {
        index,
        lexeme_id: word.id.clone(),
        body: SlotBody::Meaning {
            prompt: word.base.clone(),
            options: choice_options(correct, distractors, rng),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pack::Pack;

    #[test]
    fn prompt_is_the_base_form_and_correct_is_the_translation() {
        let pack = Pack::sample();
        let word = pack.word("es-pan").unwrap();
        let mut rng = SessionRng::new("meaning");

        let slot = build(word, 3, 2, Difficulty::Normal, &pack.words, &mut rng).unwrap();
        assert_eq!(slot.index, 3);
        let SlotBody::Meaning { prompt, options } = &slot.body else {
            panic!("expected a meaning slot");
        };
        assert_eq!(prompt, "pan");
        assert_eq!(options.len(), 2);
        let correct = options.iter().find(|o| o.is_correct).unwrap();
        assert_eq!(correct.id, "bread");
    }

    #[test]
    fn word_without_translations_yields_no_slot() {
        let word = Word {
            id: "w1".to_string(),
            base: "sol".to_string(),
            ..Word::default()
        };
        let mut rng = SessionRng::new("meaning-none");
        assert!(build(&word, 0, 2, Difficulty::Normal, &[], &mut rng).is_none());
    }

    #[test]
    fn three_lane_slot_has_three_distinct_options() {
        let pack = Pack::sample();
        let word = pack.word("es-queso").unwrap();
        let mut rng = SessionRng::new("lanes");

        let slot = build(word, 0, 3, Difficulty::Normal, &pack.words, &mut rng).unwrap();
        let options = slot.body.options().unwrap();
        assert_eq!(options.len(), 3);
        let mut ids: Vec<&str> = options.iter().map(|o| o.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }
}
