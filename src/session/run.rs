use std::time::Instant;

use crate::engine::scoring::ScoreState;
use crate::generator::Slot;
use crate::level::{GameMode, LevelConfig};
use crate::session::planner::SessionPlan;
use crate::session::summary::{AnswerRecord, RunSummary, star_rating};

/// Owns all live state for one running session: the plan, the latest
/// `ScoreState`, remaining lives, and per-lexeme answer records. Built
/// fresh per session and discarded after the summary is emitted; nothing
/// here is shared between sessions.
pub struct SessionRun {
    plan: SessionPlan,
    pack_id: String,
    level_id: String,
    game_mode: GameMode,
    lives_remaining: u32,
    score: ScoreState,
    answers: Vec<AnswerRecord>,
    cursor: usize,
    started_at: Option<Instant>,
    finished_at: Option<Instant>,
}

impl SessionRun {
    pub fn new(plan: SessionPlan, pack_id: &str, level_id: &str, config: &LevelConfig) -> Self {
        Self {
            plan,
            pack_id: pack_id.to_string(),
            level_id: level_id.to_string(),
            game_mode: config.game_mode,
            lives_remaining: config.lives,
            score: ScoreState::default(),
            answers: Vec::new(),
            cursor: 0,
            started_at: None,
            finished_at: None,
        }
    }

    pub fn plan(&self) -> &SessionPlan {
        &self.plan
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    pub fn lives_remaining(&self) -> u32 {
        self.lives_remaining
    }

    pub fn current_slot(&self) -> Option<&Slot> {
        if self.is_finished() {
            None
        } else {
            self.plan.slots.get(self.cursor)
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
            || self.cursor >= self.plan.slots.len()
            || (self.game_mode == GameMode::Lives && self.lives_remaining == 0)
    }

    /// Record the answer for the current slot and advance. No-op when the
    /// session is already over.
    pub fn answer_current(&mut self, is_correct: bool) {
        let Some(slot) = self.current_slot() else {
            return;
        };
        let lexeme_id = slot.lexeme_id.clone();

        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }

        self.score = self.score.apply_answer(is_correct, &lexeme_id);
        self.record_answer(&lexeme_id, is_correct);

        if !is_correct && self.game_mode == GameMode::Lives {
            self.lives_remaining = self.lives_remaining.saturating_sub(1);
        }

        self.cursor += 1;
        if self.is_finished() {
            self.finished_at = Some(Instant::now());
        }
    }

    fn record_answer(&mut self, lexeme_id: &str, is_correct: bool) {
        match self.answers.iter_mut().find(|a| a.lexeme_id == lexeme_id) {
            Some(record) => {
                record.attempts += 1;
                record.is_correct |= is_correct;
            }
            None => self.answers.push(AnswerRecord {
                lexeme_id: lexeme_id.to_string(),
                is_correct,
                attempts: 1,
            }),
        }
    }

    /// End the session early; the UI timer calls this when time runs out.
    pub fn force_finish(&mut self) {
        if self.finished_at.is_none() {
            self.finished_at = Some(Instant::now());
        }
    }

    pub fn elapsed_secs(&self) -> f64 {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => end.duration_since(start).as_secs_f64(),
            (Some(start), None) => start.elapsed().as_secs_f64(),
            _ => 0.0,
        }
    }

    /// Unique lexemes answered correctly at least once, over the slot count
    /// of the plan. Independent of how many attempts each one took.
    pub fn accuracy(&self) -> f64 {
        if self.plan.slots.is_empty() {
            return 0.0;
        }
        let unique_correct = self.answers.iter().filter(|a| a.is_correct).count();
        unique_correct as f64 / self.plan.slots.len() as f64
    }

    pub fn summary(&self) -> RunSummary {
        let accuracy = self.accuracy();
        RunSummary {
            pack_id: self.pack_id.clone(),
            level_id: self.level_id.clone(),
            score: self.score.score,
            accuracy,
            stars: star_rating(self.game_mode, self.lives_remaining, accuracy),
            elapsed_secs: self.elapsed_secs(),
            seed: self.plan.seed.clone(),
            answers: self.answers.clone(),
            combo_max: self.score.combo_max,
        }
    }
}
