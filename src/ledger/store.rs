use anyhow::Result;
use std::cell::RefCell;

use crate::domain::Event;

/// Durable home of the event list. Implementations persist exactly what
/// they are handed; aggregates are never stored.
pub trait LedgerStore {
    fn load(&self) -> Result<Vec<Event>>;
    fn save(&self, events: &[Event]) -> Result<()>;
    /// Human readable location, for logs.
    fn location(&self) -> String;
}

/// Keeps the ledger in memory only; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    events: RefCell<Vec<Event>>,
}

impl MemoryStore {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events: RefCell::new(events),
        }
    }
}

impl LedgerStore for MemoryStore {
    fn load(&self) -> Result<Vec<Event>> {
        Ok(self.events.borrow().clone())
    }

    fn save(&self, events: &[Event]) -> Result<()> {
        *self.events.borrow_mut() = events.to_vec();
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
