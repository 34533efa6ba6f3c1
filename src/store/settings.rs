//! Settings service
//!
//! The single owner of the two persisted keys: the search history list and
//! the display-mode flag. Both are stored as JSON text.

use crate::constants::storage::{DARK_MODE_KEY, HISTORY_KEY};
use crate::error::{Error, Result};
use crate::history::HistoryList;
use crate::store::{FileStore, KvStore, MemoryStore};

/// Typed access to history and display mode
pub struct Settings {
    store: Box<dyn KvStore>,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings").finish_non_exhaustive()
    }
}

impl Settings {
    /// Wrap a store
    pub fn new(store: impl KvStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Settings backed by the default data file
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(FileStore::open_default()?))
    }

    /// Settings that live only for this process
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Load the history list; an absent key is an empty list
    ///
    /// A value that is not a JSON array of strings is reported as a store
    /// error rather than silently discarded.
    pub fn history(&self) -> Result<HistoryList> {
        match self.store.get(HISTORY_KEY)? {
            None => Ok(HistoryList::default()),
            Some(raw) => serde_json::from_str::<Option<HistoryList>>(&raw)
                .map(Option::unwrap_or_default)
                .map_err(|e| Error::Store(format!("Corrupted history: {}", e))),
        }
    }

    fn save_history(&mut self, history: &HistoryList) -> Result<()> {
        let raw = serde_json::to_string(history)?;
        self.store.set(HISTORY_KEY, &raw)
    }

    /// Record a searched address; empty and duplicate addresses are ignored
    pub fn add_history(&mut self, ip: &str) -> Result<HistoryList> {
        let mut history = self.history()?;
        if history.add(ip) {
            self.save_history(&history)?;
        }
        Ok(history)
    }

    /// Remove every occurrence of an address
    pub fn remove_history(&mut self, ip: &str) -> Result<HistoryList> {
        let mut history = self.history()?;
        history.remove(ip);
        self.save_history(&history)?;
        Ok(history)
    }

    /// Delete the persisted history entirely
    pub fn clear_history(&mut self) -> Result<HistoryList> {
        self.store.remove(HISTORY_KEY)?;
        Ok(HistoryList::default())
    }

    /// Read the display-mode flag; absent or `null` means light mode
    pub fn dark_mode(&self) -> Result<bool> {
        match self.store.get(DARK_MODE_KEY)? {
            None => Ok(false),
            Some(raw) => serde_json::from_str::<Option<bool>>(&raw)
                .map(|flag| flag.unwrap_or(false))
                .map_err(|e| Error::Store(format!("Corrupted display mode: {}", e))),
        }
    }

    /// Persist the display-mode flag
    pub fn set_dark_mode(&mut self, dark: bool) -> Result<()> {
        self.store.set(DARK_MODE_KEY, &serde_json::to_string(&dark)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_settings() {
        let settings = Settings::in_memory();
        assert!(settings.history().unwrap().is_empty());
        assert!(!settings.dark_mode().unwrap());
    }

    #[test]
    fn test_history_operations() {
        let mut settings = Settings::in_memory();

        settings.add_history("1.2.3.4").unwrap();
        settings.add_history("1.2.3.4").unwrap();
        let history = settings.add_history("5.6.7.8").unwrap();
        assert_eq!(history.entries(), ["1.2.3.4", "5.6.7.8"]);

        let history = settings.remove_history("1.2.3.4").unwrap();
        assert_eq!(history.entries(), ["5.6.7.8"]);
        assert_eq!(settings.history().unwrap().entries(), ["5.6.7.8"]);

        assert!(settings.clear_history().unwrap().is_empty());
        assert!(settings.history().unwrap().is_empty());
    }

    #[test]
    fn test_add_empty_not_persisted() {
        let mut settings = Settings::in_memory();
        settings.add_history("").unwrap();
        assert!(settings.history().unwrap().is_empty());
    }

    #[test]
    fn test_history_stored_as_json_array() {
        let mut store = MemoryStore::new();
        store.set(HISTORY_KEY, r#"["9.9.9.9"]"#).unwrap();
        let mut settings = Settings::new(store);

        let history = settings.add_history("1.1.1.1").unwrap();
        assert_eq!(history.entries(), ["9.9.9.9", "1.1.1.1"]);
    }

    #[test]
    fn test_null_history_is_empty() {
        let mut store = MemoryStore::new();
        store.set(HISTORY_KEY, "null").unwrap();
        let settings = Settings::new(store);

        assert!(settings.history().unwrap().is_empty());
    }

    #[test]
    fn test_corrupted_history() {
        let mut store = MemoryStore::new();
        store.set(HISTORY_KEY, "{not json").unwrap();
        let mut settings = Settings::new(store);

        assert!(matches!(settings.history(), Err(Error::Store(_))));
        assert!(matches!(settings.add_history("1.1.1.1"), Err(Error::Store(_))));
    }

    #[test]
    fn test_dark_mode_roundtrip() {
        let mut settings = Settings::in_memory();

        settings.set_dark_mode(true).unwrap();
        assert!(settings.dark_mode().unwrap());

        settings.set_dark_mode(false).unwrap();
        assert!(!settings.dark_mode().unwrap());
    }

    #[test]
    fn test_corrupted_dark_mode() {
        let mut store = MemoryStore::new();
        store.set(DARK_MODE_KEY, "yes please").unwrap();
        let settings = Settings::new(store);

        assert!(matches!(settings.dark_mode(), Err(Error::Store(_))));
    }

    #[test]
    fn test_file_backed_settings() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");

        {
            let mut settings = Settings::new(FileStore::open(path.clone()));
            settings.add_history("8.8.8.8").unwrap();
            settings.set_dark_mode(true).unwrap();
        }

        let settings = Settings::new(FileStore::open(path));
        assert_eq!(settings.history().unwrap().entries(), ["8.8.8.8"]);
        assert!(settings.dark_mode().unwrap());
    }
}
