use std::collections::BTreeMap;

use crate::config::Tier;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Titles {
    pub slam: u32,
    pub signature: u32,
    pub challenger: u32,
}

impl Titles {
    pub fn record(&mut self, tier: Tier) {
        match tier {
            Tier::Slam => self.slam += 1,
            Tier::Signature => self.signature += 1,
            Tier::Challenger => self.challenger += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.slam + self.signature + self.challenger
    }
}

/// Season totals for one player. Always derived from the ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerAggregate {
    pub points: u32,
    pub wins: u32,
    pub losses: u32,
    pub points_for: u32,
    pub points_against: u32,
    pub titles: Titles,
}

impl PlayerAggregate {
    pub fn games_played(&self) -> u32 {
        self.wins + self.losses
    }

    pub fn diff(&self) -> i64 {
        self.points_for as i64 - self.points_against as i64
    }

    /// Point differential per decided game; zero before any game.
    pub fn avg_diff(&self) -> f64 {
        match self.games_played() {
            0 => 0.0,
            games => self.diff() as f64 / games as f64,
        }
    }
}

/// Aggregates keyed by player name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeasonTable {
    players: BTreeMap<String, PlayerAggregate>,
}

impl SeasonTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&PlayerAggregate> {
        self.players.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.players.contains_key(name)
    }

    pub fn entry(&mut self, name: &str) -> &mut PlayerAggregate {
        self.players.entry(name.to_string()).or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PlayerAggregate)> {
        self.players.iter()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avg_diff() {
        let idle = PlayerAggregate::default();
        assert_eq!(idle.avg_diff(), 0.0);

        let busy = PlayerAggregate {
            wins: 3,
            losses: 1,
            points_for: 50,
            points_against: 40,
            ..Default::default()
        };
        assert_eq!(busy.avg_diff(), 2.5);
    }

    #[test]
    fn test_titles() {
        let mut titles = Titles::default();
        titles.record(Tier::Slam);
        titles.record(Tier::Challenger);
        titles.record(Tier::Challenger);
        assert_eq!(titles.challenger, 2);
        assert_eq!(titles.total(), 3);
    }
}
