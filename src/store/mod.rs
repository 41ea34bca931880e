pub mod json_store;
pub mod schema;

use anyhow::Result;

use crate::session::summary::RunSummary;
use crate::store::schema::{LexemeProgress, LevelProgress, ProgressSnapshot};

/// Narrow persistence contract the engine consumes. Reads return defaults
/// for unknown ids so a fresh player needs no setup; writes are expected to
/// be durable but the engine never retries them itself.
pub trait ProgressStore {
    fn lexeme_progress(&mut self, pack_id: &str, lexeme_id: &str) -> LexemeProgress;
    fn set_lexeme_progress(
        &mut self,
        pack_id: &str,
        lexeme_id: &str,
        progress: LexemeProgress,
    ) -> Result<()>;
    fn level_progress(&mut self, pack_id: &str, level_id: &str) -> LevelProgress;
    fn set_level_progress(
        &mut self,
        pack_id: &str,
        level_id: &str,
        progress: LevelProgress,
    ) -> Result<()>;

    /// Read view of every lexeme's progress in a pack, taken at session
    /// start and never refreshed during the session.
    fn snapshot(&mut self, pack_id: &str) -> ProgressSnapshot;

    /// Fold a finished run into the level record.
    fn record_summary(&mut self, summary: &RunSummary) -> Result<()> {
        let mut level = self.level_progress(&summary.pack_id, &summary.level_id);
        level.absorb(summary);
        self.set_level_progress(&summary.pack_id, &summary.level_id, level)
    }
}
