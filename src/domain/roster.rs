use std::fmt;

use crate::errors::EngineError;

/// Number of seats at a guided matchday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RosterSize {
    Four,
    Five,
    Six,
    Seven,
    Eight,
}

impl RosterSize {
    pub const ALL: [RosterSize; 5] = [
        RosterSize::Four,
        RosterSize::Five,
        RosterSize::Six,
        RosterSize::Seven,
        RosterSize::Eight,
    ];

    pub fn players(self) -> usize {
        self.as_u8() as usize
    }

    pub fn as_u8(self) -> u8 {
        match self {
            RosterSize::Four => 4,
            RosterSize::Five => 5,
            RosterSize::Six => 6,
            RosterSize::Seven => 7,
            RosterSize::Eight => 8,
        }
    }

    /// Letters `A..` in use for this size.
    pub fn letters(self) -> impl Iterator<Item = char> {
        (0..self.as_u8()).map(|offset| (b'A' + offset) as char)
    }
}

impl TryFrom<u8> for RosterSize {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(RosterSize::Four),
            5 => Ok(RosterSize::Five),
            6 => Ok(RosterSize::Six),
            7 => Ok(RosterSize::Seven),
            8 => Ok(RosterSize::Eight),
            other => Err(EngineError::UnsupportedSize(other)),
        }
    }
}

impl fmt::Display for RosterSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// Trims a display name; blank names are rejected.
pub fn normalize_name(raw: &str) -> Result<String, EngineError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(EngineError::BlankPlayer);
    }
    Ok(name.to_string())
}

/// Trims every name and checks the roster is made of distinct players.
pub fn normalize_roster(raw: &[String]) -> Result<Vec<String>, EngineError> {
    let mut roster: Vec<String> = Vec::with_capacity(raw.len());
    for entry in raw {
        let name = normalize_name(entry)?;
        if roster.contains(&name) {
            return Err(EngineError::DuplicatePlayer(name));
        }
        roster.push(name);
    }
    Ok(roster)
}
