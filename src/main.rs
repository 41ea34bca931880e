use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};

use lexidrill::config::AppConfig;
use lexidrill::engine::mastery;
use lexidrill::generator::{Slot, SlotBody};
use lexidrill::level::LevelConfig;
use lexidrill::pack::Pack;
use lexidrill::session::planner::{self, SessionPlan};
use lexidrill::session::run::SessionRun;
use lexidrill::store::ProgressStore;
use lexidrill::store::json_store::JsonProgressStore;
use lexidrill::store::schema::LexemeProgress;

#[derive(Parser)]
#[command(name = "lexidrill", version, about = "Vocabulary drill session engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a session plan and print it as JSON
    Plan {
        #[arg(short, long, help = "Pack file (defaults to the embedded sample pack)")]
        pack: Option<PathBuf>,
        #[arg(short, long, help = "Level id within the pack")]
        level: Option<String>,
        #[arg(short, long, help = "Session seed (defaults to pack-level-timestamp)")]
        seed: Option<String>,
        #[arg(long, help = "Restrict the session to these lexeme ids")]
        restrict: Vec<String>,
    },
    /// Play a session interactively on stdin/stdout
    Drill {
        #[arg(short, long)]
        pack: Option<PathBuf>,
        #[arg(short, long)]
        level: Option<String>,
        #[arg(short, long)]
        seed: Option<String>,
    },
    /// Show stored progress for a pack
    Stats {
        #[arg(short, long)]
        pack: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load().unwrap_or_default();

    match cli.command {
        Command::Plan {
            pack,
            level,
            seed,
            restrict,
        } => {
            let pack = load_pack(&config, pack)?;
            let (level_id, level_config) = resolve_level(&config, &pack, level);
            let seed = seed.unwrap_or_else(|| derive_seed(&pack.id, &level_id));
            let restrict = (!restrict.is_empty()).then_some(restrict);

            let mut store = JsonProgressStore::new()?;
            let snapshot = store.snapshot(&pack.id);
            let plan = planner::plan(&pack, &level_config, &seed, restrict.as_deref(), &snapshot);
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
        Command::Drill { pack, level, seed } => {
            let pack = load_pack(&config, pack)?;
            let (level_id, level_config) = resolve_level(&config, &pack, level);
            let seed = seed.unwrap_or_else(|| derive_seed(&pack.id, &level_id));

            let mut store = JsonProgressStore::new()?;
            let snapshot = store.snapshot(&pack.id);
            let plan = planner::plan(&pack, &level_config, &seed, None, &snapshot);
            run_drill(plan, &pack, &level_id, &level_config, &mut store)?;
        }
        Command::Stats { pack } => {
            let pack = load_pack(&config, pack)?;
            let mut store = JsonProgressStore::new()?;
            print_stats(&pack, &mut store);
        }
    }

    Ok(())
}

fn load_pack(config: &AppConfig, path: Option<PathBuf>) -> Result<Pack> {
    let path = path.or_else(|| {
        (!config.default_pack.is_empty()).then(|| PathBuf::from(&config.default_pack))
    });
    match path {
        Some(path) => {
            Pack::load_file(&path).with_context(|| format!("loading pack {}", path.display()))
        }
        None => Ok(Pack::sample()),
    }
}

fn resolve_level(
    config: &AppConfig,
    pack: &Pack,
    level: Option<String>,
) -> (String, LevelConfig) {
    let level_id = level.unwrap_or_else(|| config.default_level.clone());
    let mut level_config = pack
        .level(&level_id)
        .map(|l| l.config.clone())
        .unwrap_or_default()
        .sanitized();
    if let Some(difficulty) = config.difficulty_override {
        level_config.difficulty = difficulty;
    }
    (level_id, level_config)
}

fn derive_seed(pack_id: &str, level_id: &str) -> String {
    format!("{pack_id}-{level_id}-{}", Utc::now().timestamp())
}

fn run_drill(
    plan: SessionPlan,
    pack: &Pack,
    level_id: &str,
    level_config: &LevelConfig,
    store: &mut JsonProgressStore,
) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut run = SessionRun::new(plan, &pack.id, level_id, level_config);
    let mut mastery_updates: Vec<(String, LexemeProgress)> = Vec::new();

    println!("{} / {} ({} lives)", pack.title, level_id, run.lives_remaining());

    while let Some(slot) = run.current_slot().cloned() {
        print_slot(&slot);
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next().transpose()? else {
            break; // stdin closed; finish with what we have
        };
        let is_correct = check_answer(&slot, line.trim());

        let previous = mastery_updates
            .iter()
            .rev()
            .find(|(id, _)| *id == slot.lexeme_id)
            .map(|(_, p)| p.clone())
            .unwrap_or_else(|| store.lexeme_progress(&pack.id, &slot.lexeme_id));
        let (new_mastery, new_mistakes) = mastery::update(
            previous.mastery,
            &previous.recent_mistakes,
            is_correct,
            level_config.difficulty,
            Utc::now(),
        );
        mastery_updates.push((
            slot.lexeme_id.clone(),
            LexemeProgress {
                mastery: new_mastery,
                recent_mistakes: new_mistakes,
            },
        ));

        let before = run.score().score;
        run.answer_current(is_correct);
        if is_correct {
            let awarded = run.score().score - before;
            println!("  correct (+{awarded} pts, combo {})", run.score().combo);
        } else {
            println!("  wrong, lives left: {}", run.lives_remaining());
        }
    }

    run.force_finish();
    let summary = run.summary();

    // Keep only the last update per lexeme.
    let mut latest: Vec<(String, LexemeProgress)> = Vec::new();
    for (id, progress) in mastery_updates {
        latest.retain(|(existing, _)| *existing != id);
        latest.push((id, progress));
    }
    store.set_lexeme_progress_batch(&pack.id, latest)?;
    let level = store.record_run(&summary)?;

    println!();
    println!(
        "score {}  accuracy {:.0}%  stars {}  best {}",
        summary.score,
        summary.accuracy * 100.0,
        "*".repeat(summary.stars as usize),
        level.best_score,
    );
    Ok(())
}

fn print_stats(pack: &Pack, store: &mut JsonProgressStore) {
    println!("{} ({})", pack.title, pack.id);
    for level in &pack.levels {
        let progress = store.level_progress(&pack.id, &level.id);
        println!(
            "  {:<12} stars {}  best {}  accuracy {:.0}%  attempts {}",
            level.id,
            progress.stars,
            progress.best_score,
            progress.best_accuracy * 100.0,
            progress.attempts,
        );
    }
    println!();
    for word in &pack.words {
        let progress = store.lexeme_progress(&pack.id, &word.id);
        println!(
            "  {:<16} mastery {:.1}  recent mistakes {}",
            word.base,
            progress.mastery,
            progress.recent_mistakes.len(),
        );
    }
}

fn print_slot(slot: &Slot) {
    println!();
    match &slot.body {
        SlotBody::Meaning { prompt, options } | SlotBody::Form { prompt, options } => {
            println!("[{}] {}", slot.index + 1, prompt);
            for (i, option) in options.iter().enumerate() {
                println!("  {}) {}", i + 1, option.id);
            }
        }
        SlotBody::Anagram {
            prompt, letters, ..
        } => {
            let scrambled: String = letters.iter().collect();
            println!("[{}] {} (unscramble: {})", slot.index + 1, prompt, scrambled);
        }
        SlotBody::Context {
            context, words, ..
        } => {
            println!("[{}] {}", slot.index + 1, context);
            println!("  ({})", words.join(" / "));
        }
    }
}

fn check_answer(slot: &Slot, input: &str) -> bool {
    match &slot.body {
        SlotBody::Meaning { options, .. } | SlotBody::Form { options, .. } => input
            .parse::<usize>()
            .ok()
            .and_then(|n| options.get(n.wrapping_sub(1)))
            .is_some_and(|option| option.is_correct),
        SlotBody::Anagram { correct_answer, .. } | SlotBody::Context { correct_answer, .. } => {
            input.to_lowercase() == *correct_answer
        }
    }
}
