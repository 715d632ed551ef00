use std::collections::BTreeMap;

use crate::config::is_awarded_rank;
use crate::errors::EngineError;

use super::roster::normalize_name;

/// The one or two players sharing a finishing rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finishers(Vec<String>);

impl Finishers {
    fn build(rank: u8, names: Vec<String>) -> Result<Self, EngineError> {
        if names.is_empty() || names.len() > 2 {
            return Err(EngineError::FinisherCount {
                rank,
                count: names.len(),
            });
        }
        let names = names
            .iter()
            .map(|name| normalize_name(name))
            .collect::<Result<Vec<_>, _>>()?;
        if names.len() == 2 && names[0] == names[1] {
            return Err(EngineError::DuplicatePlayer(names[0].clone()));
        }
        Ok(Self(names))
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    pub fn joined(&self) -> String {
        self.0.join(" & ")
    }
}

type Slot = Option<Finishers>;

/// Final ranks of a matchday. Each supported size enumerates exactly the
/// ranks it awards points for; other sizes keep whatever the ledger held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placements {
    Four {
        first: Slot,
        second: Slot,
    },
    Five {
        first: Slot,
        second: Slot,
        fifth: Slot,
    },
    Six {
        first: Slot,
        second: Slot,
        third: Slot,
    },
    Seven {
        first: Slot,
        second: Slot,
        third: Slot,
        seventh: Slot,
    },
    Eight {
        first: Slot,
        second: Slot,
        third: Slot,
        fourth: Slot,
    },
    Unsupported {
        size: u8,
        ranks: BTreeMap<u8, Finishers>,
    },
}

impl Placements {
    pub fn empty(size: u8) -> Self {
        match size {
            4 => Placements::Four {
                first: None,
                second: None,
            },
            5 => Placements::Five {
                first: None,
                second: None,
                fifth: None,
            },
            6 => Placements::Six {
                first: None,
                second: None,
                third: None,
            },
            7 => Placements::Seven {
                first: None,
                second: None,
                third: None,
                seventh: None,
            },
            8 => Placements::Eight {
                first: None,
                second: None,
                third: None,
                fourth: None,
            },
            size => Placements::Unsupported {
                size,
                ranks: BTreeMap::new(),
            },
        }
    }

    /// Builds placements from a sparse rank map; empty lists are dropped.
    pub fn from_ranks<I>(size: u8, ranks: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = (u8, Vec<String>)>,
    {
        let mut placements = Self::empty(size);
        for (rank, names) in ranks {
            if !names.is_empty() {
                placements.assign(rank, names)?;
            }
        }
        Ok(placements)
    }

    pub fn size(&self) -> u8 {
        match self {
            Placements::Four { .. } => 4,
            Placements::Five { .. } => 5,
            Placements::Six { .. } => 6,
            Placements::Seven { .. } => 7,
            Placements::Eight { .. } => 8,
            Placements::Unsupported { size, .. } => *size,
        }
    }

    /// Sets the finishers for a rank the size awards. A player holds at most
    /// one rank per event.
    pub fn assign(&mut self, rank: u8, names: Vec<String>) -> Result<(), EngineError> {
        let size = self.size();
        let finishers = Finishers::build(rank, names)?;
        if let Some(name) = self.placed_elsewhere(rank, &finishers) {
            return Err(EngineError::DuplicatePlayer(name));
        }
        if let Placements::Unsupported { ranks, .. } = self {
            ranks.insert(rank, finishers);
            return Ok(());
        }
        let slot = self
            .slot_mut(rank)
            .filter(|_| is_awarded_rank(size, rank))
            .ok_or(EngineError::IllegalRank { size, rank })?;
        *slot = Some(finishers);
        Ok(())
    }

    fn placed_elsewhere(&self, rank: u8, finishers: &Finishers) -> Option<String> {
        self.populated()
            .into_iter()
            .filter(|(r, _)| *r != rank)
            .flat_map(|(_, held)| held.names().iter())
            .find(|name| finishers.contains(name))
            .cloned()
    }

    pub fn get(&self, rank: u8) -> Option<&Finishers> {
        self.populated()
            .into_iter()
            .find(|(r, _)| *r == rank)
            .map(|(_, finishers)| finishers)
    }

    /// Populated ranks in ascending order.
    pub fn populated(&self) -> Vec<(u8, &Finishers)> {
        match self {
            Placements::Unsupported { ranks, .. } => ranks.iter().map(|(r, f)| (*r, f)).collect(),
            _ => self
                .slots()
                .into_iter()
                .filter_map(|(rank, slot)| slot.as_ref().map(|f| (rank, f)))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.populated().is_empty()
    }

    /// Rank a player finished at, if the player holds a placement.
    pub fn rank_of(&self, name: &str) -> Option<u8> {
        self.populated()
            .into_iter()
            .find(|(_, finishers)| finishers.contains(name))
            .map(|(rank, _)| rank)
    }

    pub fn to_map(&self) -> BTreeMap<u8, Vec<String>> {
        self.populated()
            .into_iter()
            .map(|(rank, finishers)| (rank, finishers.names().to_vec()))
            .collect()
    }

    fn slots(&self) -> Vec<(u8, &Slot)> {
        match self {
            Placements::Four { first, second } => vec![(1, first), (2, second)],
            Placements::Five {
                first,
                second,
                fifth,
            } => vec![(1, first), (2, second), (5, fifth)],
            Placements::Six {
                first,
                second,
                third,
            } => vec![(1, first), (2, second), (3, third)],
            Placements::Seven {
                first,
                second,
                third,
                seventh,
            } => vec![(1, first), (2, second), (3, third), (7, seventh)],
            Placements::Eight {
                first,
                second,
                third,
                fourth,
            } => vec![(1, first), (2, second), (3, third), (4, fourth)],
            Placements::Unsupported { .. } => Vec::new(),
        }
    }

    fn slot_mut(&mut self, rank: u8) -> Option<&mut Slot> {
        match (self, rank) {
            (Placements::Four { first, .. }, 1)
            | (Placements::Five { first, .. }, 1)
            | (Placements::Six { first, .. }, 1)
            | (Placements::Seven { first, .. }, 1)
            | (Placements::Eight { first, .. }, 1) => Some(first),
            (Placements::Four { second, .. }, 2)
            | (Placements::Five { second, .. }, 2)
            | (Placements::Six { second, .. }, 2)
            | (Placements::Seven { second, .. }, 2)
            | (Placements::Eight { second, .. }, 2) => Some(second),
            (Placements::Six { third, .. }, 3)
            | (Placements::Seven { third, .. }, 3)
            | (Placements::Eight { third, .. }, 3) => Some(third),
            (Placements::Eight { fourth, .. }, 4) => Some(fourth),
            (Placements::Five { fifth, .. }, 5) => Some(fifth),
            (Placements::Seven { seventh, .. }, 7) => Some(seventh),
            _ => None,
        }
    }
}
