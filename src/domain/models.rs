use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::errors::EngineError;

use super::placements::Placements;
use super::roster::normalize_name;

/// Two player names playing together.
pub type Team = [String; 2];

/// Which part of a matchday produced a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Pool,
    Bracket,
    Manual,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Pool => "pool",
            Stage::Bracket => "bracket",
            Stage::Manual => "manual",
        }
    }
}

/// One played game, as stored in the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub team1: Team,
    pub team2: Team,
    pub s1: u32,
    pub s2: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl GameRecord {
    pub fn new(team1: Team, team2: Team, s1: u32, s2: u32, stage: Stage) -> Self {
        Self {
            team1,
            team2,
            s1,
            s2,
            stage: Some(stage),
            label: None,
        }
    }

    pub fn labeled(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn is_stage(&self, stage: Stage) -> bool {
        self.stage == Some(stage)
    }

    /// Team with the higher score; `None` on a tie.
    pub fn winner(&self) -> Option<&Team> {
        match self.s1.cmp(&self.s2) {
            std::cmp::Ordering::Greater => Some(&self.team1),
            std::cmp::Ordering::Less => Some(&self.team2),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Own and opponent score for a player, if the player took part.
    pub fn scores_for(&self, name: &str) -> Option<(u32, u32)> {
        if self.team1.iter().any(|n| n == name) {
            Some((self.s1, self.s2))
        } else if self.team2.iter().any(|n| n == name) {
            Some((self.s2, self.s1))
        } else {
            None
        }
    }

    pub fn players(&self) -> impl Iterator<Item = &String> {
        self.team1.iter().chain(self.team2.iter())
    }

    /// Trims names and checks both teams hold two distinct players.
    pub fn normalized(mut self) -> Result<Self, EngineError> {
        for name in self.team1.iter_mut().chain(self.team2.iter_mut()) {
            *name = normalize_name(name)?;
        }
        let mut seen: Vec<&String> = Vec::with_capacity(4);
        for name in self.players() {
            if seen.contains(&name) {
                return Err(EngineError::MalformedTeam);
            }
            seen.push(name);
        }
        Ok(self)
    }
}

/// Ledger identifier; assigned in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One line of the pool standings table kept for auditing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolStandingRow {
    pub rank: usize,
    pub player: String,
    pub wins: u32,
    pub losses: u32,
    pub points_for: u32,
    pub points_against: u32,
    pub diff: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PoolAudit {
    pub rows: Vec<PoolStandingRow>,
    #[serde(default)]
    pub notes: Vec<String>,
}

/// A completed matchday waiting for its ledger id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub placements: Placements,
    pub games: Vec<GameRecord>,
    pub pool_audit: Option<PoolAudit>,
}

impl EventDraft {
    pub fn into_event(self, id: EventId, recorded_at: DateTime<Utc>) -> Event {
        Event {
            id,
            placements: self.placements,
            games: self.games,
            pool_audit: self.pool_audit,
            recorded_at: Some(recorded_at),
        }
    }
}

/// Immutable ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EventRecord", into = "EventRecord")]
pub struct Event {
    pub id: EventId,
    pub placements: Placements,
    pub games: Vec<GameRecord>,
    pub pool_audit: Option<PoolAudit>,
    pub recorded_at: Option<DateTime<Utc>>,
}

impl Event {
    pub fn size(&self) -> u8 {
        self.placements.size()
    }
}

/// Persisted shape of an [`Event`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventRecord {
    id: EventId,
    size: u8,
    #[serde(default)]
    placements: BTreeMap<u8, Vec<String>>,
    #[serde(default)]
    game_stats: Vec<GameRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pool_audit: Option<PoolAudit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    recorded_at: Option<DateTime<Utc>>,
}

impl TryFrom<EventRecord> for Event {
    type Error = EngineError;

    fn try_from(record: EventRecord) -> Result<Self, Self::Error> {
        let placements = Placements::from_ranks(record.size, record.placements)?;
        let games = record
            .game_stats
            .into_iter()
            .map(GameRecord::normalized)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Event {
            id: record.id,
            placements,
            games,
            pool_audit: record.pool_audit,
            recorded_at: record.recorded_at,
        })
    }
}

impl From<Event> for EventRecord {
    fn from(event: Event) -> Self {
        EventRecord {
            id: event.id,
            size: event.size(),
            placements: event.placements.to_map(),
            game_stats: event.games,
            pool_audit: event.pool_audit,
            recorded_at: event.recorded_at,
        }
    }
}
