use crate::engine::mastery::LEARNED_THRESHOLD;
use crate::rng::SessionRng;

/// Per-word snapshot the queue builder selects from. Mastery and mistake
/// counts come from the progress store; the builder never reads live state.
#[derive(Clone, Debug)]
pub struct WordState {
    pub lexeme_id: String,
    pub mastery: f64,
    pub recent_mistakes: usize,
}

// Share of slots reserved for already-learned words, randomized per
// session within this band so mastered vocabulary keeps resurfacing.
const LEARNED_SHARE_MIN: f64 = 0.20;
const LEARNED_SHARE_MAX: f64 = 0.30;

const MISTAKE_WEIGHT_CAP: usize = 3;

/// Selection weight for a learning-pool word: lower mastery and more recent
/// mistakes each raise the odds independently, with diminishing returns on
/// the mistake count.
fn weight(state: &WordState) -> f64 {
    (5.0 - state.mastery) * 2.0 + state.recent_mistakes.min(MISTAKE_WEIGHT_CAP) as f64 * 3.0 + 1.0
}

/// Build an ordered drill queue of exactly `total_slots` lexeme ids.
///
/// Words split into learned (mastery >= 4) and learning pools. A randomized
/// 20-30% share of slots draws uniformly from the learned pool; the rest
/// draws from the learning pool by weighted sampling with replacement. An
/// empty learning pool falls back to uniform learned sampling, and vice
/// versa. A final best-effort pass breaks up immediate repeats.
pub fn build(words: &[WordState], total_slots: usize, rng: &mut SessionRng) -> Vec<String> {
    if words.is_empty() || total_slots == 0 {
        return Vec::new();
    }

    let learned: Vec<&WordState> = words
        .iter()
        .filter(|w| w.mastery >= LEARNED_THRESHOLD)
        .collect();
    let learning: Vec<&WordState> = words
        .iter()
        .filter(|w| w.mastery < LEARNED_THRESHOLD)
        .collect();

    let share = rng.range_f64(LEARNED_SHARE_MIN, LEARNED_SHARE_MAX);
    let learned_slots = if learning.is_empty() {
        total_slots
    } else if learned.is_empty() {
        0
    } else {
        ((total_slots as f64 * share).round() as usize).min(total_slots)
    };

    let mut queue: Vec<String> = Vec::with_capacity(total_slots);
    for _ in 0..learned_slots {
        queue.push(learned[rng.pick_index(learned.len())].lexeme_id.clone());
    }
    while queue.len() < total_slots {
        match pick_weighted(&learning, rng) {
            Some(state) => queue.push(state.lexeme_id.clone()),
            None => queue.push(learned[rng.pick_index(learned.len())].lexeme_id.clone()),
        }
    }

    rng.shuffle(&mut queue);
    break_up_repeats(&mut queue);
    queue
}

fn pick_weighted<'a>(pool: &[&'a WordState], rng: &mut SessionRng) -> Option<&'a WordState> {
    if pool.is_empty() {
        return None;
    }
    let total: f64 = pool.iter().map(|w| weight(w)).sum();
    if total <= 0.0 {
        return Some(pool[rng.pick_index(pool.len())]);
    }

    let mut roll = rng.next_f64() * total;
    for &state in pool {
        roll -= weight(state);
        if roll <= 0.0 {
            return Some(state);
        }
    }
    pool.last().copied()
}

/// Single pass: swap any element equal to its predecessor with a later
/// non-matching one. Best-effort; a single-word pool stays repetitive.
fn break_up_repeats(queue: &mut [String]) {
    for i in 1..queue.len() {
        if queue[i] != queue[i - 1] {
            continue;
        }
        if let Some(j) = (i + 1..queue.len()).find(|&j| queue[j] != queue[i - 1]) {
            queue.swap(i, j);
        }
    }
}
