//! Process-wide theme mode.
//!
//! Built once at startup from `preferences.toml`, then shared as
//! `Arc<ThemeStore>`. Views subscribe to a `watch` receiver; every toggle
//! writes the new mode back to disk.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use roster_core::ThemeMode;
use roster_error::Error;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

pub const PREFERENCES_FILE: &str = "preferences.toml";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub theme: ThemeMode,
}

impl Preferences {
    /// Missing or unreadable files yield defaults.
    pub fn load(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read preferences");
                return Self::default();
            }
        };
        toml::from_str(&text).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring malformed preferences");
            Self::default()
        })
    }

    /// Write through a temp file in the same directory, then rename over `path`.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let text = toml::to_string(self).map_err(|e| Error::Internal(e.to_string()))?;
        let dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        std::fs::create_dir_all(&dir).map_err(|e| Error::io("create preferences dir", &dir, e))?;
        let mut tmp = tempfile::NamedTempFile::new_in(&dir)
            .map_err(|e| Error::io("create temp preferences", &dir, e))?;
        tmp.write_all(text.as_bytes())
            .and_then(|_| tmp.flush())
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| Error::io("write preferences", path, e))?;
        tmp.persist(path)
            .map_err(|e| Error::io("persist preferences", path, e.error))?;
        Ok(())
    }
}

#[derive(Debug)]
pub struct ThemeStore {
    tx: watch::Sender<ThemeMode>,
    prefs_path: Option<PathBuf>,
}

impl ThemeStore {
    /// Reads the persisted mode once.
    pub fn load(prefs_path: PathBuf) -> Self {
        let prefs = Preferences::load(&prefs_path);
        tracing::debug!(mode = %prefs.theme, path = %prefs_path.display(), "theme loaded");
        Self {
            tx: watch::Sender::new(prefs.theme),
            prefs_path: Some(prefs_path),
        }
    }

    /// A store that never touches disk.
    pub fn in_memory(mode: ThemeMode) -> Self {
        Self {
            tx: watch::Sender::new(mode),
            prefs_path: None,
        }
    }

    /// `{config_dir}/roster/preferences.toml`
    pub fn default_prefs_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("roster").join(PREFERENCES_FILE))
    }

    pub fn mode(&self) -> ThemeMode {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ThemeMode> {
        self.tx.subscribe()
    }

    /// Flip the mode, notify subscribers, persist.
    ///
    /// The in-memory mode changes even if the write fails; the error is returned
    /// so the caller can report it.
    pub fn toggle(&self) -> Result<ThemeMode, Error> {
        let next = self.mode().toggled();
        self.tx.send_replace(next);
        tracing::info!(mode = %next, "theme toggled");
        if let Some(path) = &self.prefs_path {
            Preferences { theme: next }.save(path)?;
        }
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_defaults_to_light() {
        let dir = tempfile::tempdir().unwrap();
        let store = ThemeStore::load(dir.path().join("nope.toml"));
        assert_eq!(store.mode(), ThemeMode::Light);
    }

    #[test]
    fn toggle_persists_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster").join(PREFERENCES_FILE);
        let store = ThemeStore::load(path.clone());
        assert_eq!(store.toggle().unwrap(), ThemeMode::Dark);

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.trim(), r#"theme = "dark""#);
        assert_eq!(ThemeStore::load(path).mode(), ThemeMode::Dark);
    }

    #[test]
    fn malformed_preferences_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PREFERENCES_FILE);
        std::fs::write(&path, "theme = \"solarized\"").unwrap();
        assert_eq!(ThemeStore::load(path).mode(), ThemeMode::Light);
    }

    #[tokio::test]
    async fn subscribers_see_toggles() {
        let store = ThemeStore::in_memory(ThemeMode::Light);
        let mut rx = store.subscribe();
        store.toggle().unwrap();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), ThemeMode::Dark);
    }
}
