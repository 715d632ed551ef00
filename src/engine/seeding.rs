use log::debug;
use std::collections::HashMap;

use crate::domain::{normalize_roster, RosterSize, Team};
use crate::errors::EngineError;
use crate::season::{rank_players, SeasonTable};

use super::hashing::order_deterministically;
use super::templates::LetterPair;

/// How the organiser asked for the roster to be seeded. Recorded for the
/// session log; unseeded players are drawn by name hash either way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SeedingMethod {
    #[default]
    Standings,
    Random,
}

/// Bijection between seed letters `A..` and player names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterAssignment {
    players: Vec<String>,
}

impl LetterAssignment {
    /// First player becomes `A`, second `B`, and so on.
    pub fn from_ordered(players: Vec<String>) -> Self {
        Self { players }
    }

    pub fn player(&self, letter: char) -> Option<&str> {
        let idx = (letter as u32).checked_sub('A' as u32)? as usize;
        self.players.get(idx).map(String::as_str)
    }

    pub fn letter_of(&self, name: &str) -> Option<char> {
        self.players
            .iter()
            .position(|p| p == name)
            .map(|idx| (b'A' + idx as u8) as char)
    }

    pub fn team(&self, pair: LetterPair) -> Result<Team, EngineError> {
        let first = self.player(pair.0).ok_or(EngineError::UnknownLetter(pair.0))?;
        let second = self.player(pair.1).ok_or(EngineError::UnknownLetter(pair.1))?;
        Ok([first.to_string(), second.to_string()])
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> {
        self.players
            .iter()
            .enumerate()
            .map(|(idx, name)| ((b'A' + idx as u8) as char, name.as_str()))
    }

    pub fn players(&self) -> &[String] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

/// Pre-pool seeding: players with season standing first (best first), then
/// newcomers in name-hash order.
pub fn assign_pool_letters(
    roster: &[String],
    size: RosterSize,
    season: &SeasonTable,
    method: SeedingMethod,
) -> Result<LetterAssignment, EngineError> {
    if roster.len() != size.players() {
        return Err(EngineError::RosterMismatch {
            expected: size.players(),
            actual: roster.len(),
        });
    }
    let roster = normalize_roster(roster)?;
    debug!("Seeding {} players ({:?})", roster.len(), method);

    let positions: HashMap<String, usize> = rank_players(season)
        .into_iter()
        .map(|ranked| (ranked.name, ranked.position))
        .collect();

    let (mut known, unknown): (Vec<String>, Vec<String>) = roster
        .into_iter()
        .partition(|name| positions.contains_key(name));
    known.sort_by_key(|name| positions[name]);

    let mut ordered = known;
    ordered.extend(order_deterministically(&unknown));
    Ok(LetterAssignment::from_ordered(ordered))
}
