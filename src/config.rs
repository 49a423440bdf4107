//! Configuration for the loop hooks.
//!
//! Two layers: [`LoopConfig`] carries the iteration ceiling and scratchpad
//! location into the decision logic, and [`ProjectConfig`] is the optional
//! `.cursor/loop-hooks.yaml` file that switches on debug event logging.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Maximum number of follow-up iterations a hook will request.
pub const MAX_ITERATIONS: u32 = 10;

/// Scratchpad path relative to the project root.
pub const SCRATCHPAD_PATH: &str = ".cursor/scratchpad.md";

/// Project config file path relative to the project root.
pub const CONFIG_FILE_PATH: &str = ".cursor/loop-hooks.yaml";

/// Parameters shared by both loop hooks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopConfig {
    /// Iteration ceiling; `loop_count >= max_iterations` always stops.
    pub max_iterations: u32,
    /// Scratchpad path, resolved against `base_dir` when relative.
    pub scratchpad_path: PathBuf,
    /// Base directory for file operations (defaults to current directory).
    /// Used by tests to avoid changing global CWD.
    pub base_dir: Option<PathBuf>,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            max_iterations: MAX_ITERATIONS,
            scratchpad_path: PathBuf::from(SCRATCHPAD_PATH),
            base_dir: None,
        }
    }
}

impl LoopConfig {
    /// Get the base directory for file operations, defaulting to current directory.
    pub fn base_dir(&self) -> &Path {
        self.base_dir.as_deref().unwrap_or_else(|| Path::new("."))
    }

    /// Full path of the scratchpad file.
    pub fn scratchpad(&self) -> PathBuf {
        self.base_dir().join(&self.scratchpad_path)
    }
}

/// Project configuration read from `.cursor/loop-hooks.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ProjectConfig {
    /// Append every hook invocation to `.cursor/hook-events.jsonl`.
    #[serde(default)]
    pub debug_logging: bool,
}

impl ProjectConfig {
    /// Load config from a specific base directory, returning None if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(base_dir: &Path) -> Result<Option<Self>> {
        let config_path = Self::config_path(base_dir);
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path)?;
        // An empty YAML document parses as null; treat it as all defaults.
        if content.trim().is_empty() {
            return Ok(Some(Self::default()));
        }
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(Some(config))
    }

    /// Save config to a specific base directory. Tests use this to set up fixtures.
    #[cfg(test)]
    pub fn save_to(&self, base_dir: &Path) -> Result<()> {
        let config_path = Self::config_path(base_dir);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Get the config file path for a base directory.
    pub fn config_path(base_dir: &Path) -> PathBuf {
        base_dir.join(CONFIG_FILE_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_loop_config_defaults() {
        let config = LoopConfig::default();
        assert_eq!(config.max_iterations, 10);
        assert_eq!(config.scratchpad_path, PathBuf::from(".cursor/scratchpad.md"));
        assert_eq!(config.base_dir(), Path::new("."));
    }

    #[test]
    fn test_loop_config_scratchpad_uses_base_dir() {
        let config = LoopConfig { base_dir: Some(PathBuf::from("/work")), ..Default::default() };
        assert_eq!(config.scratchpad(), PathBuf::from("/work/.cursor/scratchpad.md"));
    }

    #[test]
    fn test_loop_config_absolute_scratchpad_ignores_base_dir() {
        let config = LoopConfig {
            scratchpad_path: PathBuf::from("/notes/pad.md"),
            base_dir: Some(PathBuf::from("/work")),
            ..Default::default()
        };
        assert_eq!(config.scratchpad(), PathBuf::from("/notes/pad.md"));
    }

    #[test]
    fn test_project_config_missing() {
        let dir = TempDir::new().unwrap();
        assert_eq!(ProjectConfig::load_from(dir.path()).unwrap(), None);
    }

    #[test]
    fn test_project_config_round_trip() {
        let dir = TempDir::new().unwrap();
        let config = ProjectConfig { debug_logging: true };
        config.save_to(dir.path()).unwrap();

        let loaded = ProjectConfig::load_from(dir.path()).unwrap();
        assert_eq!(loaded, Some(config));
    }

    #[test]
    fn test_project_config_empty_file_is_default() {
        let dir = TempDir::new().unwrap();
        let path = ProjectConfig::config_path(dir.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "").unwrap();

        let loaded = ProjectConfig::load_from(dir.path()).unwrap();
        assert_eq!(loaded, Some(ProjectConfig::default()));
    }

    #[test]
    fn test_project_config_invalid_yaml() {
        let dir = TempDir::new().unwrap();
        let path = ProjectConfig::config_path(dir.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "debug_logging: [not, a, bool]").unwrap();

        assert!(ProjectConfig::load_from(dir.path()).is_err());
    }
}
