//! Session state and the persistent settings store.
//!
//! The store is a flat string-to-string map; the terminal keeps the chosen
//! username, the chosen theme, and the command history in it. Every
//! in-memory mutation is mirrored to the store immediately.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

pub const KEY_USERNAME: &str = "terminal-username";
pub const KEY_THEME: &str = "terminal-theme";
pub const KEY_HISTORY: &str = "terminal-history";

pub const DEFAULT_USERNAME: &str = "visitor";

/// Oldest history entries are evicted beyond this length.
pub const MAX_HISTORY: usize = 100;

/// String-keyed, string-valued persistence. Absence of a key means the
/// documented default applies.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
    fn clear(&mut self);
}

/// Store backed by a JSON file under the user's home directory. Writes
/// happen synchronously on every mutation; write failures are logged and
/// the in-memory view stays authoritative for the session.
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens the default store at `~/.portfolio-terminal/settings.json`.
    pub fn open() -> Result<Self> {
        let home = dirs::home_dir().context("could not determine home directory")?;
        Ok(Self::at(home.join(".portfolio-terminal").join("settings.json")))
    }

    /// Opens a store at an explicit path, loading existing values if the
    /// file is present and readable.
    pub fn at(path: PathBuf) -> Self {
        let values = fs::read_to_string(&path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default();
        Self { path, values }
    }

    fn persist(&self) {
        let write = || -> Result<()> {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create settings directory: {}", parent.display())
                })?;
            }
            let content = serde_json::to_string_pretty(&self.values)?;
            fs::write(&self.path, content)
                .with_context(|| format!("failed to write settings file: {}", self.path.display()))
        };
        if let Err(e) = write() {
            tracing::warn!(error = %e, "settings not persisted");
        }
    }
}

impl SettingsStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        self.persist();
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
        self.persist();
    }

    fn clear(&mut self) {
        self.values.clear();
        self.persist();
    }
}

/// In-memory store, used by tests and as a fallback when no home directory
/// is available.
#[derive(Default)]
pub struct MemStore {
    values: BTreeMap<String, String>,
}

impl SettingsStore for MemStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }

    fn clear(&mut self) {
        self.values.clear();
    }
}

/// Mutable state owned by the running terminal instance.
pub struct Session {
    pub username: String,
    pub theme_id: String,
    pub history: Vec<String>,
    /// Index into `history`; `history.len()` means "past the newest entry".
    pub history_cursor: usize,
}

impl Session {
    /// Loads persisted state, falling back to defaults for absent keys.
    pub fn load(store: &dyn SettingsStore, fallback_theme: &str) -> Self {
        let username = store
            .get(KEY_USERNAME)
            .unwrap_or_else(|| DEFAULT_USERNAME.to_string());
        let theme_id = store
            .get(KEY_THEME)
            .unwrap_or_else(|| fallback_theme.to_string());
        let mut history: Vec<String> = store
            .get(KEY_HISTORY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        if history.len() > MAX_HISTORY {
            history.drain(..history.len() - MAX_HISTORY);
        }
        let history_cursor = history.len();
        Self {
            username,
            theme_id,
            history,
            history_cursor,
        }
    }

    /// Appends a submitted command, evicting the oldest entries beyond the
    /// cap, resets the cursor past the newest entry, and persists.
    pub fn push_history(&mut self, entry: &str, store: &mut dyn SettingsStore) {
        self.history.push(entry.to_string());
        while self.history.len() > MAX_HISTORY {
            self.history.remove(0);
        }
        self.history_cursor = self.history.len();
        self.persist_history(store);
    }

    fn persist_history(&self, store: &mut dyn SettingsStore) {
        let encoded =
            serde_json::to_string(&self.history).unwrap_or_else(|_| String::from("[]"));
        store.set(KEY_HISTORY, &encoded);
    }

    pub fn clear_history(&mut self, store: &mut dyn SettingsStore) {
        self.history.clear();
        self.history_cursor = 0;
        store.remove(KEY_HISTORY);
    }

    pub fn set_username(&mut self, username: &str, store: &mut dyn SettingsStore) {
        self.username = username.to_string();
        store.set(KEY_USERNAME, username);
    }

    pub fn set_theme(&mut self, theme_id: &str, store: &mut dyn SettingsStore) {
        self.theme_id = theme_id.to_string();
        store.set(KEY_THEME, theme_id);
    }

    /// Clears all persisted state and restores the defaults, including the
    /// platform-preferred theme.
    pub fn reset(&mut self, store: &mut dyn SettingsStore, system_theme: &str) {
        store.clear();
        self.username = DEFAULT_USERNAME.to_string();
        self.theme_id = system_theme.to_string();
        self.history.clear();
        self.history_cursor = 0;
    }
}
