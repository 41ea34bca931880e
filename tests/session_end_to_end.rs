use chrono::Utc;
use tempfile::TempDir;

use lexidrill::engine::mastery;
use lexidrill::generator::{SlotBody, SlotKind};
use lexidrill::level::{Difficulty, GameMode, LevelConfig};
use lexidrill::pack::Pack;
use lexidrill::session::planner;
use lexidrill::session::run::SessionRun;
use lexidrill::store::ProgressStore;
use lexidrill::store::json_store::JsonProgressStore;
use lexidrill::store::schema::{LexemeProgress, ProgressSnapshot};

fn five_word_pack() -> Pack {
    let mut pack = Pack::sample();
    pack.words.truncate(5);
    pack
}

#[test]
fn five_word_lives_scenario() {
    let pack = five_word_pack();
    let config = LevelConfig {
        lanes: 2,
        allowed_types: vec![SlotKind::Meaning],
        lives: 3,
        ..LevelConfig::default()
    };

    let plan = planner::plan(&pack, &config, "test-1", None, &ProgressSnapshot::new());
    assert_eq!(plan.slots.len(), 5);
    for slot in &plan.slots {
        let options = slot.body.options().expect("meaning slots have options");
        assert_eq!(options.len(), 2);
        assert_eq!(options.iter().filter(|o| o.is_correct).count(), 1);
    }
}

#[test]
fn replaying_a_seed_regenerates_the_exact_session() {
    let pack = Pack::sample();
    let config = LevelConfig {
        lanes: 3,
        allowed_types: SlotKind::ALL.to_vec(),
        game_mode: GameMode::Time,
        duration_secs: 120,
        difficulty: Difficulty::Hard,
        ..LevelConfig::default()
    };

    let first = planner::plan(&pack, &config, "replay-me", None, &ProgressSnapshot::new());
    let second = planner::plan(&pack, &config, "replay-me", None, &ProgressSnapshot::new());
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn anagram_letters_always_cover_the_answer() {
    let pack = Pack::sample();
    let config = LevelConfig {
        allowed_types: vec![SlotKind::Anagram],
        difficulty: Difficulty::Hard,
        ..LevelConfig::default()
    };
    let plan = planner::plan(&pack, &config, "anagrams", None, &ProgressSnapshot::new());
    assert!(!plan.slots.is_empty());

    for slot in &plan.slots {
        let SlotBody::Anagram {
            letters,
            correct_answer,
            ..
        } = &slot.body
        else {
            panic!("expected anagram slots only");
        };
        let mut available = letters.clone();
        for needed in correct_answer.chars() {
            let pos = available
                .iter()
                .position(|&c| c == needed)
                .unwrap_or_else(|| panic!("missing '{needed}' for {correct_answer}"));
            available.remove(pos);
        }
    }
}

#[test]
fn full_session_persists_mastery_and_level_progress() {
    let dir = TempDir::new().unwrap();
    let mut store = JsonProgressStore::with_base_dir(dir.path().to_path_buf()).unwrap();

    let pack = five_word_pack();
    let config = LevelConfig {
        lanes: 2,
        allowed_types: vec![SlotKind::Meaning],
        ..LevelConfig::default()
    };
    let snapshot = store.snapshot(&pack.id);
    let plan = planner::plan(&pack, &config, "persist-1", None, &snapshot);

    let mut run = SessionRun::new(plan, &pack.id, "intro", &config);
    let now = Utc::now();
    while let Some(slot) = run.current_slot().cloned() {
        // Miss the first word once overall, answer the rest correctly.
        let is_correct = slot.index != 0;
        let previous = store.lexeme_progress(&pack.id, &slot.lexeme_id);
        let (mastery, mistakes) = mastery::update(
            previous.mastery,
            &previous.recent_mistakes,
            is_correct,
            config.difficulty,
            now,
        );
        store
            .set_lexeme_progress(
                &pack.id,
                &slot.lexeme_id,
                LexemeProgress {
                    mastery,
                    recent_mistakes: mistakes,
                },
            )
            .unwrap();
        run.answer_current(is_correct);
    }

    assert!(run.is_finished());
    let summary = run.summary();
    assert_eq!(summary.accuracy, 0.8);
    assert_eq!(run.lives_remaining(), 2);
    assert_eq!(summary.stars, 2);

    let level = store.record_run(&summary).unwrap();
    assert_eq!(level.stars, 2);
    assert_eq!(level.attempts, 1);
    assert!(level.completed);

    // Reload from disk: the missed word lost mastery, the others gained.
    let mut reloaded = JsonProgressStore::with_base_dir(dir.path().to_path_buf()).unwrap();
    let missed_id = &pack.words[0].id;
    let missed = reloaded.lexeme_progress(&pack.id, missed_id);
    assert_eq!(missed.mastery, 0.0);
    assert_eq!(missed.recent_mistakes.len(), 1);

    let drilled = reloaded.lexeme_progress(&pack.id, &pack.words[1].id);
    assert_eq!(drilled.mastery, 1.0);
    assert!(drilled.recent_mistakes.is_empty());
}

#[test]
fn review_mistakes_flow_restricts_to_missed_words() {
    let pack = Pack::sample();
    let config = LevelConfig {
        lanes: 2,
        allowed_types: vec![SlotKind::Meaning],
        ..LevelConfig::default()
    };

    // First run: miss two specific words.
    let plan = planner::plan(&pack, &config, "first-run", None, &ProgressSnapshot::new());
    let mut run = SessionRun::new(plan, &pack.id, "intro", &config);
    let missed = ["es-queso".to_string(), "es-uva".to_string()];
    while let Some(slot) = run.current_slot().cloned() {
        run.answer_current(!missed.contains(&slot.lexeme_id));
    }
    let summary = run.summary();
    let wrong_ids: Vec<String> = summary
        .answers
        .iter()
        .filter(|a| !a.is_correct)
        .map(|a| a.lexeme_id.clone())
        .collect();
    assert_eq!(wrong_ids, missed.to_vec());

    // Review session covers exactly the missed words.
    let review = planner::plan(
        &pack,
        &config,
        "review-run",
        Some(&wrong_ids),
        &ProgressSnapshot::new(),
    );
    let planned: Vec<&str> = review.slots.iter().map(|s| s.lexeme_id.as_str()).collect();
    assert_eq!(planned, vec!["es-queso", "es-uva"]);
}

#[test]
fn mastered_words_shift_the_timed_queue_toward_weak_ones() {
    let pack = Pack::sample();
    let config = LevelConfig {
        game_mode: GameMode::Time,
        duration_secs: 300,
        allowed_types: vec![SlotKind::Meaning],
        ..LevelConfig::default()
    };

    // Everything mastered except one struggling word.
    let mut snapshot = ProgressSnapshot::new();
    for word in &pack.words {
        snapshot.insert(
            word.id.clone(),
            LexemeProgress {
                mastery: 5.0,
                recent_mistakes: vec![],
            },
        );
    }
    snapshot.insert(
        "es-pan".to_string(),
        LexemeProgress {
            mastery: 0.5,
            recent_mistakes: vec![Utc::now(), Utc::now()],
        },
    );

    let plan = planner::plan(&pack, &config, "weighted", None, &snapshot);
    let pan_slots = plan
        .slots
        .iter()
        .filter(|s| s.lexeme_id == "es-pan")
        .count();
    // 60 slots; the one learning word owns the 70-80% learning share.
    assert!(pan_slots >= 30, "es-pan drawn only {pan_slots}/60 times");
}
