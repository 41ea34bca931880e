use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::level::Difficulty;

/// CLI-level settings, separate from per-level config which ships inside
/// packs. Saved as TOML under the platform config directory.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the default pack file; empty means the embedded sample pack.
    #[serde(default)]
    pub default_pack: String,
    #[serde(default = "default_level")]
    pub default_level: String,
    // TOML cannot represent a bare None, so skip the key entirely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty_override: Option<Difficulty>,
}

fn default_level() -> String {
    "intro".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_pack: String::new(),
            default_level: default_level(),
            difficulty_override: None,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: AppConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(AppConfig::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lexidrill")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_from_empty_toml() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert!(config.default_pack.is_empty());
        assert_eq!(config.default_level, "intro");
        assert!(config.difficulty_override.is_none());
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let config: AppConfig = toml::from_str(r#"default_pack = "packs/de-b1.json""#).unwrap();
        assert_eq!(config.default_pack, "packs/de-b1.json");
        assert_eq!(config.default_level, "intro");
    }

    #[test]
    fn roundtrip_through_toml() {
        let config = AppConfig {
            default_pack: "my-pack.json".to_string(),
            default_level: "mixed".to_string(),
            difficulty_override: Some(Difficulty::Hard),
        };
        let serialized = toml::to_string_pretty(&config).unwrap();
        let back: AppConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(back.default_pack, config.default_pack);
        assert_eq!(back.default_level, config.default_level);
        assert_eq!(back.difficulty_override, Some(Difficulty::Hard));
    }
}
