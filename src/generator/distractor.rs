use crate::generator::misspelling;
use crate::level::Difficulty;
use crate::pack::Word;
use crate::rng::SessionRng;

/// Which field a distractor competes against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DistractorKind {
    Meaning,
    Form,
}

// Cap on misspelling retries so a pathological vocabulary (single letter,
// heavy duplicates) cannot spin forever.
const MAX_SYNTH_ATTEMPTS: usize = 24;

/// Build up to `lanes - 1` wrong answers for `word`: authored distractors
/// first, then sibling words' corresponding field, then (form questions
/// only) synthesized misspellings. Output is distinct and never equals the
/// correct answer; a shorter list on degenerate pools is acceptable.
pub fn build(
    word: &Word,
    kind: DistractorKind,
    siblings: &[Word],
    lanes: usize,
    difficulty: Difficulty,
    rng: &mut SessionRng,
) -> Vec<String> {
    let quota = lanes.saturating_sub(1);
    let correct = match kind {
        DistractorKind::Meaning => word.primary_translation().unwrap_or_default(),
        DistractorKind::Form => word.base.as_str(),
    };

    let mut picked: Vec<String> = Vec::with_capacity(quota);

    let mut authored: Vec<String> = match kind {
        DistractorKind::Meaning => word.distractors.meaning.clone(),
        DistractorKind::Form => word.distractors.form.clone(),
    };
    rng.shuffle(&mut authored);
    take_distinct(&mut picked, authored, correct, quota);

    if picked.len() < quota {
        let mut fallback: Vec<String> = siblings
            .iter()
            .filter(|s| s.id != word.id)
            .filter_map(|s| match kind {
                DistractorKind::Meaning => s.primary_translation().map(str::to_string),
                DistractorKind::Form => Some(s.base.clone()),
            })
            .collect();
        rng.shuffle(&mut fallback);
        take_distinct(&mut picked, fallback, correct, quota);
    }

    if kind == DistractorKind::Form && picked.len() < quota {
        let mut attempts = 0;
        while picked.len() < quota && attempts < MAX_SYNTH_ATTEMPTS {
            attempts += 1;
            let candidate = misspelling::misspell(&word.base, difficulty, rng);
            if candidate != correct && !picked.contains(&candidate) {
                picked.push(candidate);
            }
        }
    }

    picked
}

fn take_distinct(picked: &mut Vec<String>, candidates: Vec<String>, correct: &str, quota: usize) {
    for candidate in candidates {
        if picked.len() >= quota {
            break;
        }
        if candidate != correct && !candidate.is_empty() && !picked.contains(&candidate) {
            picked.push(candidate);
        }
    }
}
