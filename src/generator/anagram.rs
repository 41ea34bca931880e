use crate::generator::{Slot, SlotBody};
use crate::level::Difficulty;
use crate::pack::Word;
use crate::rng::SessionRng;

const MIN_LETTERS: usize = 3;

// Filler policy: easy and normal present exactly the word's own letters;
// hard mixes in this many extra letters the player has to discard.
const HARD_FILLER_COUNT: usize = 3;

const FILLER_POOL: &[char] = &[
    'a', 'e', 'i', 'o', 'u', 'r', 's', 'n', 'l', 't', 'd', 'm',
];

/// Anagram: shown the translation, reassemble the word from shuffled
/// letters. Words shorter than three letters make trivial anagrams, so
/// those yield no slot.
pub fn build(
    word: &Word,
    index: usize,
    difficulty: Difficulty,
    rng: &mut SessionRng,
) -> Option<Slot> {
    let prompt = word.primary_translation()?.to_string();
    let answer = word.base.to_lowercase();

    let mut letters: Vec<char> = answer.chars().collect();
    if letters.len() < MIN_LETTERS {
        return None;
    }

    if difficulty == Difficulty::Hard {
        for _ in 0..HARD_FILLER_COUNT {
            letters.push(FILLER_POOL[rng.pick_index(FILLER_POOL.len())]);
        }
    }
    rng.shuffle(&mut letters);

    Some(Slot {
        index,
        lexeme_id: word.id.clone(),
        body: SlotBody::Anagram {
            prompt,
            letters,
            correct_answer: answer,
        },
    })
}
