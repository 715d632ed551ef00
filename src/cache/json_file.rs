use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::Event;
use crate::errors::store_context;
use crate::ledger::LedgerStore;

/// Ledger kept as one pretty-printed JSON array.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).context("Failed to create ledger directory")?;
        }

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl LedgerStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Event>> {
        if !self.path.exists() {
            info!("No ledger at {}, starting empty", self.path.display());
            return Ok(Vec::new());
        }

        let json = fs::read_to_string(&self.path)
            .with_context(|| store_context("read", &self.location()))?;

        let events: Vec<Event> = serde_json::from_str(&json)
            .with_context(|| store_context("parse", &self.location()))?;

        info!("Loaded {} events from {}", events.len(), self.path.display());
        Ok(events)
    }

    fn save(&self, events: &[Event]) -> Result<()> {
        let json = serde_json::to_string_pretty(events).context("Failed to serialize ledger")?;

        let temp = self.temp_path();
        fs::write(&temp, json).with_context(|| store_context("write", &self.location()))?;
        fs::rename(&temp, &self.path).with_context(|| store_context("replace", &self.location()))?;

        info!("Saved {} events to {}", events.len(), self.path.display());
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EventId, Placements};

    fn event(id: u64) -> Event {
        Event {
            id: EventId(id),
            placements: Placements::from_ranks(
                4,
                vec![
                    (1, vec!["Ann".to_string(), "Ben".to_string()]),
                    (2, vec!["Cal".to_string(), "Dee".to_string()]),
                ],
            )
            .unwrap(),
            games: Vec::new(),
            pool_audit: None,
            recorded_at: None,
        }
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("league.json")).unwrap();

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("league.json")).unwrap();

        let events = vec![event(1), event(2)];
        store.save(&events).unwrap();

        assert_eq!(store.load().unwrap(), events);
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("league.json");
        fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::new(&path).unwrap();
        let err = store.load().unwrap_err();
        assert!(err.to_string().contains("Failed to parse ledger"));
    }
}
