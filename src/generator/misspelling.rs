use crate::level::Difficulty;
use crate::rng::SessionRng;

// Substitutions stay within phonetically adjacent vowels so the wrong
// spelling remains pronounceable.
const VOWEL_SUBS: &[(char, char)] = &[
    ('a', 'e'),
    ('e', 'i'),
    ('i', 'e'),
    ('o', 'u'),
    ('u', 'o'),
    ('y', 'i'),
];

const ALPHABET: &[char] = &[
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r',
    's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

#[derive(Clone, Copy)]
enum Mutation {
    Delete,
    Duplicate,
    Transpose,
    VowelSwap,
}

// Easy distractors should be visibly wrong; hard ones take a second look.
const CONSPICUOUS: &[Mutation] = &[Mutation::Delete, Mutation::Duplicate];
const SUBTLE: &[Mutation] = &[Mutation::Transpose, Mutation::VowelSwap];
const ANY: &[Mutation] = &[
    Mutation::Delete,
    Mutation::Duplicate,
    Mutation::Transpose,
    Mutation::VowelSwap,
];

/// Produce a plausible wrong spelling of `word`, guaranteed to differ from
/// the input. Deterministic given the rng state.
pub fn misspell(word: &str, difficulty: Difficulty, rng: &mut SessionRng) -> String {
    let chars: Vec<char> = word.chars().collect();

    // Structural mutation of very short words tends to be degenerate.
    if chars.len() < 3 {
        return append_letter(&chars, rng);
    }

    let repertoire = match difficulty {
        Difficulty::Easy => CONSPICUOUS,
        Difficulty::Normal => ANY,
        Difficulty::Hard => SUBTLE,
    };
    let mutation = repertoire[rng.pick_index(repertoire.len())];

    let mutated = apply(&chars, mutation, rng);
    if mutated == word {
        // Last resort: a longer string can never equal the input.
        append_letter(&chars, rng)
    } else {
        mutated
    }
}

fn apply(chars: &[char], mutation: Mutation, rng: &mut SessionRng) -> String {
    match mutation {
        Mutation::Delete => {
            let idx = rng.pick_index(chars.len());
            chars
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != idx)
                .map(|(_, c)| c)
                .collect()
        }
        Mutation::Duplicate => {
            let idx = rng.pick_index(chars.len());
            let mut out: Vec<char> = chars.to_vec();
            out.insert(idx, chars[idx]);
            out.into_iter().collect()
        }
        Mutation::Transpose => {
            let idx = rng.pick_index(chars.len() - 1);
            let mut out: Vec<char> = chars.to_vec();
            out.swap(idx, idx + 1);
            out.into_iter().collect()
        }
        Mutation::VowelSwap => {
            let vowel_positions: Vec<usize> = chars
                .iter()
                .enumerate()
                .filter(|(_, c)| VOWEL_SUBS.iter().any(|(from, _)| from == *c))
                .map(|(i, _)| i)
                .collect();
            if vowel_positions.is_empty() {
                // No vowel to swap; fall through to a transposition.
                return apply(chars, Mutation::Transpose, rng);
            }
            let pos = vowel_positions[rng.pick_index(vowel_positions.len())];
            let mut out: Vec<char> = chars.to_vec();
            out[pos] = VOWEL_SUBS
                .iter()
                .find(|(from, _)| *from == chars[pos])
                .map(|(_, to)| *to)
                .unwrap_or(chars[pos]);
            out.into_iter().collect()
        }
    }
}

fn append_letter(chars: &[char], rng: &mut SessionRng) -> String {
    let mut out: Vec<char> = chars.to_vec();
    out.push(ALPHABET[rng.pick_index(ALPHABET.len())]);
    out.into_iter().collect()
}
