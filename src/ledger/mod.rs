//! Append-only record of events. Every mutation refolds the season table
//! from scratch.

mod store;

pub use store::{LedgerStore, MemoryStore};

use chrono::{DateTime, Utc};
use log::info;
use std::collections::HashSet;

use crate::domain::{Event, EventDraft, EventId};
use crate::errors::LedgerError;
use crate::season::{rank_players, reduce, RankedPlayer, SeasonTable};

#[derive(Debug, Clone, Default)]
pub struct Ledger {
    events: Vec<Event>,
    table: SeasonTable,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_events(events: Vec<Event>) -> Result<Self, LedgerError> {
        let mut ledger = Self::new();
        ledger.replace_all(events)?;
        Ok(ledger)
    }

    /// Events in insertion order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|event| event.id == id)
    }

    pub fn table(&self) -> &SeasonTable {
        &self.table
    }

    pub fn standings(&self) -> Vec<RankedPlayer> {
        rank_players(&self.table)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Next identifier: one past the largest id ever kept.
    pub fn next_id(&self) -> EventId {
        let max = self.events.iter().map(|event| event.id.0).max().unwrap_or(0);
        EventId(max + 1)
    }

    pub fn append(&mut self, draft: EventDraft, recorded_at: DateTime<Utc>) -> EventId {
        let id = self.next_id();
        self.events.push(draft.into_event(id, recorded_at));
        self.recompute();
        info!("Appended event {} ({} events)", id, self.events.len());
        id
    }

    /// Appends an event that already carries its id.
    pub fn append_event(&mut self, event: Event) -> Result<(), LedgerError> {
        if self.get(event.id).is_some() {
            return Err(LedgerError::DuplicateId(event.id));
        }
        let id = event.id;
        self.events.push(event);
        self.recompute();
        info!("Appended event {} ({} events)", id, self.events.len());
        Ok(())
    }

    pub fn delete(&mut self, id: EventId) -> Result<Event, LedgerError> {
        let idx = self
            .events
            .iter()
            .position(|event| event.id == id)
            .ok_or(LedgerError::UnknownEvent(id))?;
        let removed = self.events.remove(idx);
        self.recompute();
        info!("Deleted event {} ({} events left)", id, self.events.len());
        Ok(removed)
    }

    /// Swaps in a whole new event list; on error the ledger is unchanged.
    pub fn replace_all(&mut self, events: Vec<Event>) -> Result<(), LedgerError> {
        check_unique_ids(&events)?;
        self.events = events;
        self.recompute();
        info!("Ledger replaced with {} events", self.events.len());
        Ok(())
    }

    fn recompute(&mut self) {
        self.table = reduce(&self.events);
    }
}

fn check_unique_ids(events: &[Event]) -> Result<(), LedgerError> {
    let mut seen = HashSet::new();
    for event in events {
        if !seen.insert(event.id) {
            return Err(LedgerError::DuplicateId(event.id));
        }
    }
    Ok(())
}
