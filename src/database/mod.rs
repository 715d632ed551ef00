pub mod connection;
pub mod events;
pub mod setup;

pub use connection::{checkout, open_pool, DbConn, DbPool};

use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};

use crate::domain::Event;
use crate::errors::store_context;
use crate::ledger::LedgerStore;

/// Ledger kept in a SQLite file.
pub struct SqliteStore {
    path: PathBuf,
    pool: DbPool,
}

impl SqliteStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let location = path.display().to_string();
        let pool = open_pool(&path).with_context(|| store_context("open", &location))?;
        let conn = checkout(&pool)?;
        setup::ensure_schema(&conn).with_context(|| store_context("prepare", &location))?;
        Ok(Self { path, pool })
    }
}

impl LedgerStore for SqliteStore {
    fn load(&self) -> Result<Vec<Event>> {
        let conn = checkout(&self.pool)?;
        let events = events::list_all(&conn).with_context(|| store_context("load", &self.location()))?;
        info!("Loaded {} events from {}", events.len(), self.path.display());
        Ok(events)
    }

    fn save(&self, events: &[Event]) -> Result<()> {
        let mut conn = checkout(&self.pool)?;
        let tx = conn.transaction()?;

        events::delete_all(&tx)?;
        for (seq, event) in events.iter().enumerate() {
            events::insert_event(&tx, seq, event)?;
        }
        tx.commit().with_context(|| store_context("save", &self.location()))?;

        info!("Saved {} events to {}", events.len(), self.path.display());
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
