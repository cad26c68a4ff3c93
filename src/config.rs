//! Configuration for taskdown.
//!
//! Process-wide settings loaded from a TOML file: where the notes live,
//! which metadata dialect to write, and the editing surface defaults. The
//! core parser/serializer never read config; the chosen dialect and default
//! tags are threaded into them explicitly by the callers.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::fields::Dialect;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the note files.
    #[serde(default)]
    pub notes_dir: Option<PathBuf>,
    /// Metadata dialect used when writing task blocks.
    #[serde(default)]
    pub dialect: Dialect,
    /// Tags added to every task created through the editing surface.
    #[serde(default)]
    pub default_tags: Vec<String>,
    /// Stamp today's date into `created` when adding a task.
    #[serde(default = "default_true")]
    pub stamp_created: bool,
    /// Whether the TUI task list starts with completed tasks visible.
    #[serde(default)]
    pub show_completed: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notes_dir: None,
            dialect: Dialect::Inline,
            default_tags: Vec::new(),
            stamp_created: true,
            show_completed: false,
        }
    }
}

impl Config {
    /// Load the config file, falling back to defaults on any problem.
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|p| std::fs::read_to_string(p).ok())
            .and_then(|s| toml::from_str(&s).ok())
            .unwrap_or_default()
    }

    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(self)?;
            std::fs::write(path, content)?;
        }
        Ok(())
    }

    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "taskdown")
            .map(|d| d.config_dir().join("config.toml"))
    }

    /// Resolve the notes directory: config value, else `~/.taskdown`.
    pub fn resolve_notes_dir(&self) -> PathBuf {
        if let Some(dir) = &self.notes_dir {
            return dir.clone();
        }
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".taskdown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.dialect, Dialect::Inline);
        assert!(config.stamp_created);
        assert!(!config.show_completed);
        assert!(config.default_tags.is_empty());
    }

    #[test]
    fn test_parse_partial_config() {
        let config: Config = toml::from_str(
            r##"
            dialect = "bullet"
            default_tags = ["#inbox"]
            "##,
        )
        .unwrap();
        assert_eq!(config.dialect, Dialect::Bullet);
        assert_eq!(config.default_tags, vec!["#inbox"]);
        assert!(config.stamp_created);
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = Config::default();
        config.dialect = Dialect::Bullet;
        config.notes_dir = Some(PathBuf::from("/tmp/notes"));
        let text = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.dialect, Dialect::Bullet);
        assert_eq!(back.notes_dir, Some(PathBuf::from("/tmp/notes")));
    }
}
