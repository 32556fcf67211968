//! Cross-cutting UI preferences.
//!
//! Exactly two flags exist: dark mode and sidebar collapse. They live in a
//! single store constructed once in `main` and injected into the app, and
//! they are the only state the client persists between runs.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::error::{CoreError, Result};

/// The two cross-cutting UI flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiPrefs {
    #[serde(default)]
    dark_mode: bool,
    #[serde(default)]
    sidebar_collapsed: bool,
}

impl Default for UiPrefs {
    /// Initial values: dark mode off, sidebar expanded.
    fn default() -> Self {
        Self {
            dark_mode: false,
            sidebar_collapsed: false,
        }
    }
}

impl UiPrefs {
    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn sidebar_collapsed(&self) -> bool {
        self.sidebar_collapsed
    }

    pub fn set_dark_mode(&mut self, on: bool) {
        self.dark_mode = on;
    }

    pub fn set_sidebar_collapsed(&mut self, collapsed: bool) {
        self.sidebar_collapsed = collapsed;
    }

    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_collapsed = !self.sidebar_collapsed;
    }

    /// Preferences file path: `~/.assetdeck/prefs.toml`.
    pub fn prefs_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".assetdeck/prefs.toml")
    }

    /// Load preferences, falling back to the defaults when the file does
    /// not exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::prefs_path())
    }

    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|err| CoreError::toml_parse(path.clone(), err))
    }

    /// Save preferences, creating the directory on first write.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::prefs_path())
    }

    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(path, toml_str)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_are_light_mode_and_expanded_sidebar() {
        let prefs = UiPrefs::default();
        assert!(!prefs.dark_mode());
        assert!(!prefs.sidebar_collapsed());
    }

    #[test]
    fn toggles_flip_only_their_own_flag() {
        let mut prefs = UiPrefs::default();
        prefs.toggle_dark_mode();
        assert!(prefs.dark_mode());
        assert!(!prefs.sidebar_collapsed());

        prefs.toggle_sidebar();
        assert!(prefs.dark_mode());
        assert!(prefs.sidebar_collapsed());
    }

    #[test]
    fn roundtrips_through_toml_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.toml");

        let mut prefs = UiPrefs::default();
        prefs.set_dark_mode(true);
        prefs.save_to(&path).unwrap();

        let loaded = UiPrefs::load_from(&path).unwrap();
        assert_eq!(loaded, prefs);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("does-not-exist.toml");
        let loaded = UiPrefs::load_from(&path).unwrap();
        assert_eq!(loaded, UiPrefs::default());
    }
}
