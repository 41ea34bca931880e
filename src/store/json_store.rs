use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;

use crate::session::summary::RunSummary;
use crate::store::ProgressStore;
use crate::store::schema::{LexemeProgress, LevelProgress, PackProgressData, ProgressSnapshot};

/// File-backed progress store: one JSON file per pack under the platform
/// data directory. Loads lazily, caches in memory, and writes through a
/// tmp-file rename so a crash mid-write never corrupts saved progress.
pub struct JsonProgressStore {
    base_dir: PathBuf,
    cache: HashMap<String, PackProgressData>,
}

impl JsonProgressStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lexidrill");
        Self::with_base_dir(base_dir)
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self {
            base_dir,
            cache: HashMap::new(),
        })
    }

    fn file_path(&self, pack_id: &str) -> PathBuf {
        // Pack ids can come from untrusted files; keep only filename-safe
        // characters.
        let safe: String = pack_id
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        self.base_dir.join(format!("progress-{safe}.json"))
    }

    fn pack_data(&mut self, pack_id: &str) -> &mut PackProgressData {
        if !self.cache.contains_key(pack_id) {
            let loaded = self.load(pack_id);
            self.cache.insert(pack_id.to_string(), loaded);
        }
        self.cache.get_mut(pack_id).expect("just inserted")
    }

    fn load(&self, pack_id: &str) -> PackProgressData {
        let path = self.file_path(pack_id);
        if !path.exists() {
            return PackProgressData::default();
        }
        let data: PackProgressData = fs::read_to_string(&path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default();
        // Stale schema: start over rather than misinterpret old fields.
        if data.needs_reset() {
            PackProgressData::default()
        } else {
            data
        }
    }

    fn save(&self, pack_id: &str) -> Result<()> {
        let data = self.cache.get(pack_id).cloned().unwrap_or_default();
        let path = self.file_path(pack_id);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(&data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}

impl ProgressStore for JsonProgressStore {
    fn lexeme_progress(&mut self, pack_id: &str, lexeme_id: &str) -> LexemeProgress {
        self.pack_data(pack_id)
            .lexemes
            .get(lexeme_id)
            .cloned()
            .unwrap_or_default()
    }

    fn set_lexeme_progress(
        &mut self,
        pack_id: &str,
        lexeme_id: &str,
        progress: LexemeProgress,
    ) -> Result<()> {
        self.pack_data(pack_id)
            .lexemes
            .insert(lexeme_id.to_string(), progress);
        self.save(pack_id)
    }

    fn level_progress(&mut self, pack_id: &str, level_id: &str) -> LevelProgress {
        self.pack_data(pack_id)
            .levels
            .get(level_id)
            .cloned()
            .unwrap_or_default()
    }

    fn set_level_progress(
        &mut self,
        pack_id: &str,
        level_id: &str,
        progress: LevelProgress,
    ) -> Result<()> {
        self.pack_data(pack_id)
            .levels
            .insert(level_id.to_string(), progress);
        self.save(pack_id)
    }

    fn snapshot(&mut self, pack_id: &str) -> ProgressSnapshot {
        self.pack_data(pack_id).lexemes.clone()
    }
}

impl JsonProgressStore {
    /// Persist a whole session's lexeme updates in one write.
    pub fn set_lexeme_progress_batch(
        &mut self,
        pack_id: &str,
        updates: impl IntoIterator<Item = (String, LexemeProgress)>,
    ) -> Result<()> {
        let data = self.pack_data(pack_id);
        for (lexeme_id, progress) in updates {
            data.lexemes.insert(lexeme_id, progress);
        }
        self.save(pack_id)
    }

    /// Record a finished run and return the merged level progress.
    pub fn record_run(&mut self, summary: &RunSummary) -> Result<LevelProgress> {
        self.record_summary(summary)?;
        Ok(self.level_progress(&summary.pack_id, &summary.level_id))
    }
}
