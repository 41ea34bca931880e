use crate::generator::{Slot, SlotBody};
use crate::pack::Word;
use crate::rng::SessionRng;

pub const BLANK: &str = "____";

/// Fill-in-context: an example sentence with the target word blanked out,
/// and the singular/plural pair as candidates. Needs a plural form that
/// differs from the base and a sentence that actually contains the chosen
/// form; otherwise yields no slot.
pub fn build(word: &Word, index: usize, rng: &mut SessionRng) -> Option<Slot> {
    let plural = word.plural()?.to_string();
    let prompt = word.primary_translation()?.to_string();

    // Pick which form the sentence will use; fall back to the other if the
    // preferred one has no usable sentence.
    let prefer_plural = rng.gen_bool(0.5);
    let attempt = |use_plural: bool, rng: &mut SessionRng| -> Option<(String, String)> {
        let (form, pool) = if use_plural {
            (plural.as_str(), &word.examples_plural)
        } else {
            (word.base.as_str(), &word.examples)
        };
        let sentence = rng.choose(pool)?;
        elide(sentence, form).map(|context| (form.to_lowercase(), context))
    };

    let (correct_answer, context) =
        attempt(prefer_plural, rng).or_else(|| attempt(!prefer_plural, rng))?;

    let mut words = vec![word.base.to_lowercase(), plural.to_lowercase()];
    rng.shuffle(&mut words);

    Some(Slot {
        index,
        lexeme_id: word.id.clone(),
        body: SlotBody::Context {
            prompt,
            context,
            words,
            correct_answer,
        },
    })
}

/// Replace the first case-insensitive occurrence of `form` with the blank
/// token. Returns `None` when the sentence does not contain the form.
/// Comparison is per-char so accented characters cannot skew byte offsets.
fn elide(sentence: &str, form: &str) -> Option<String> {
    let lower = |c: char| c.to_lowercase().next().unwrap_or(c);
    let haystack: Vec<char> = sentence.chars().map(lower).collect();
    let needle: Vec<char> = form.chars().map(lower).collect();
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }

    let start = (0..=haystack.len() - needle.len())
        .find(|&i| haystack[i..i + needle.len()] == needle[..])?;

    let original: Vec<char> = sentence.chars().collect();
    let mut out: String = original[..start].iter().collect();
    out.push_str(BLANK);
    out.extend(&original[start + needle.len()..]);
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pack::Pack;

    #[test]
    fn context_contains_the_blank_and_not_the_answer() {
        let pack = Pack::sample();
        let word = pack.word("es-uva").unwrap();
        let mut rng = SessionRng::new("context");

        let slot = build(word, 0, &mut rng).unwrap();
        let SlotBody::Context {
            context,
            words,
            correct_answer,
            ..
        } = &slot.body
        else {
            panic!("expected a context slot");
        };
        assert!(context.contains(BLANK));
        assert!(!context.to_lowercase().contains(correct_answer));
        assert!(words.contains(correct_answer));
        assert_eq!(words.len(), 2);
    }

    #[test]
    fn candidates_are_the_singular_plural_pair() {
        let pack = Pack::sample();
        let word = pack.word("es-sopa").unwrap();
        let mut rng = SessionRng::new("pair");

        let slot = build(word, 0, &mut rng).unwrap();
        let SlotBody::Context { words, .. } = &slot.body else {
            panic!("expected a context slot");
        };
        let mut sorted = words.clone();
        sorted.sort();
        assert_eq!(sorted, vec!["sopa".to_string(), "sopas".to_string()]);
    }

    #[test]
    fn word_without_plural_yields_no_slot() {
        let pack = Pack::sample();
        // "leche" has no plural form in the sample pack.
        let word = pack.word("es-leche").unwrap();
        let mut rng = SessionRng::new("no-plural");
        assert!(build(word, 0, &mut rng).is_none());
    }

    #[test]
    fn falls_back_to_the_other_form_when_one_pool_is_empty() {
        let mut word = Pack::sample().word("es-pan").unwrap().clone();
        word.examples_plural.clear();
        let mut rng = SessionRng::new("fallback");

        // With no plural sentences, every build must use the singular.
        for _ in 0..20 {
            let slot = build(&word, 0, &mut rng).unwrap();
            let SlotBody::Context { correct_answer, .. } = &slot.body else {
                panic!("expected a context slot");
            };
            assert_eq!(correct_answer, "pan");
        }
    }

    #[test]
    fn elide_is_case_insensitive_and_byte_safe() {
        assert_eq!(
            elide("La Manzana es roja.", "manzana"),
            Some("La ____ es roja.".to_string())
        );
        assert_eq!(elide("No fruit here.", "manzana"), None);
    }
}
