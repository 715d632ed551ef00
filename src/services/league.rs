use anyhow::{Context, Result};
use chrono::Utc;
use log::info;

use crate::cache::JsonFileStore;
use crate::config::{AppConfig, StorageSettings, StoreKind};
use crate::database::SqliteStore;
use crate::domain::{Event, EventDraft, EventId, GameRecord, Placements, RosterSize, Stage};
use crate::errors::{import_context, EngineError};
use crate::ledger::{Ledger, LedgerStore};
use crate::transfer;

/// Opens the store the settings point at.
pub fn open_store(settings: &StorageSettings) -> Result<Box<dyn LedgerStore>> {
    match settings.kind {
        StoreKind::Json => Ok(Box::new(JsonFileStore::new(&settings.path)?)),
        StoreKind::Sqlite => Ok(Box::new(SqliteStore::open(&settings.path)?)),
    }
}

/// The ledger plus its durable home. Each mutation is applied to a copy,
/// saved, and only then made current.
pub struct LeagueService {
    ledger: Ledger,
    store: Box<dyn LedgerStore>,
}

impl LeagueService {
    pub fn open(store: Box<dyn LedgerStore>) -> Result<Self> {
        let events = store.load()?;
        let ledger = Ledger::from_events(events)
            .with_context(|| format!("Ledger at {} is inconsistent", store.location()))?;
        info!("Opened ledger at {} ({} events)", store.location(), ledger.len());
        Ok(Self { ledger, store })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::open(open_store(&config.storage)?)
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn record(&mut self, draft: EventDraft) -> Result<EventId> {
        let mut next = self.ledger.clone();
        let id = next.append(draft, Utc::now());
        self.commit(next)?;
        Ok(id)
    }

    /// Records placements entered by hand, without guided play.
    pub fn record_manual(
        &mut self,
        size: u8,
        ranks: Vec<(u8, Vec<String>)>,
        games: Vec<GameRecord>,
    ) -> Result<EventId> {
        let draft = manual_draft(size, ranks, games)?;
        self.record(draft)
    }

    pub fn delete(&mut self, id: EventId) -> Result<Event> {
        let mut next = self.ledger.clone();
        let removed = next.delete(id)?;
        self.commit(next)?;
        Ok(removed)
    }

    /// Replaces the whole ledger with a JSON payload.
    pub fn import_json(&mut self, payload: &str, source: &str) -> Result<usize> {
        let events = transfer::parse_json(payload).with_context(|| import_context("JSON", source))?;
        let count = events.len();

        let mut next = self.ledger.clone();
        next.replace_all(events)
            .with_context(|| import_context("JSON", source))?;
        self.commit(next)?;

        info!("Imported {} events from {}", count, source);
        Ok(count)
    }

    /// Appends one event per game group in a CSV sheet.
    pub fn import_csv(&mut self, data: &str, source: &str) -> Result<Vec<EventId>> {
        let drafts = transfer::parse_csv(data).with_context(|| import_context("CSV", source))?;

        let mut next = self.ledger.clone();
        let recorded_at = Utc::now();
        let ids = drafts
            .into_iter()
            .map(|draft| next.append(draft, recorded_at))
            .collect::<Vec<_>>();
        self.commit(next)?;

        info!("Imported {} events from {}", ids.len(), source);
        Ok(ids)
    }

    pub fn export(&self) -> Result<String> {
        transfer::export_json(self.ledger.events())
    }

    fn commit(&mut self, next: Ledger) -> Result<()> {
        self.store.save(next.events())?;
        self.ledger = next;
        Ok(())
    }
}

fn manual_draft(
    size: u8,
    ranks: Vec<(u8, Vec<String>)>,
    games: Vec<GameRecord>,
) -> Result<EventDraft, EngineError> {
    let size = RosterSize::try_from(size)?;
    let placements = Placements::from_ranks(size.as_u8(), ranks)?;

    let games = games
        .into_iter()
        .map(|game| {
            game.normalized().map(|mut game| {
                game.stage = Some(Stage::Manual);
                game
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(EventDraft {
        placements,
        games,
        pool_audit: None,
    })
}
