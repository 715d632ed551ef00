//! Fixed pairing designs per roster size. Templates only speak in letters;
//! names are substituted when a match is resolved.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::RosterSize;

/// Two seed letters playing together, e.g. `AB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LetterPair(pub char, pub char);

impl LetterPair {
    const fn from_letters(pair: &str) -> Self {
        let bytes = pair.as_bytes();
        LetterPair(bytes[0] as char, bytes[1] as char)
    }

    pub fn letters(&self) -> [char; 2] {
        [self.0, self.1]
    }
}

impl fmt::Display for LetterPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0, self.1)
    }
}

pub type PoolPairing = (LetterPair, LetterPair);

const fn pairing(team1: &str, team2: &str) -> PoolPairing {
    (LetterPair::from_letters(team1), LetterPair::from_letters(team2))
}

const POOL_FOUR: &[PoolPairing] = &[
    pairing("AB", "CD"),
    pairing("AD", "BC"),
    pairing("AC", "BD"),
];

const POOL_FIVE: &[PoolPairing] = &[
    pairing("AC", "DE"),
    pairing("AE", "BD"),
    pairing("AD", "BC"),
    pairing("AE", "BC"),
    pairing("BE", "CD"),
];

const POOL_SIX: &[PoolPairing] = &[
    pairing("AB", "CD"),
    pairing("AF", "BE"),
    pairing("CD", "EF"),
    pairing("AD", "BC"),
    pairing("AE", "BF"),
    pairing("CF", "DE"),
];

const POOL_SEVEN: &[PoolPairing] = &[
    pairing("AG", "CE"),
    pairing("BF", "DG"),
    pairing("AC", "EF"),
    pairing("BD", "EG"),
    pairing("AD", "CF"),
    pairing("BC", "AF"),
    pairing("BG", "DE"),
];

const POOL_EIGHT: &[PoolPairing] = &[
    pairing("AC", "EG"),
    pairing("BD", "FH"),
    pairing("AG", "CE"),
    pairing("BH", "DF"),
    pairing("AE", "CG"),
    pairing("BF", "DH"),
];

pub fn pool_template(size: RosterSize) -> &'static [PoolPairing] {
    match size {
        RosterSize::Four => POOL_FOUR,
        RosterSize::Five => POOL_FIVE,
        RosterSize::Six => POOL_SIX,
        RosterSize::Seven => POOL_SEVEN,
        RosterSize::Eight => POOL_EIGHT,
    }
}

/// One side of a scheduled match: seeded letters or the result of an earlier match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Seeded(LetterPair),
    WinnerOf(&'static str),
    LoserOf(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketSlot {
    pub label: &'static str,
    pub side1: Side,
    pub side2: Side,
}

/// Bracket matches in play order plus the player the bracket leaves out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketTemplate {
    pub matches: &'static [BracketSlot],
    /// `(rank, letter)` for the seed that sits out and finishes last.
    pub sits_out: Option<(u8, char)>,
}

pub const FINAL: &str = "Final";
pub const SEMI: &str = "SF";
pub const SEMI_ONE: &str = "SF1";
pub const SEMI_TWO: &str = "SF2";
pub const BRONZE: &str = "Bronze";

const fn seeded(pair: &str) -> Side {
    Side::Seeded(LetterPair::from_letters(pair))
}

const FINAL_ONLY: &[BracketSlot] = &[BracketSlot {
    label: FINAL,
    side1: seeded("AB"),
    side2: seeded("CD"),
}];

const SEMI_THEN_FINAL: &[BracketSlot] = &[
    BracketSlot {
        label: SEMI,
        side1: seeded("CD"),
        side2: seeded("EF"),
    },
    BracketSlot {
        label: FINAL,
        side1: seeded("AB"),
        side2: Side::WinnerOf(SEMI),
    },
];

const FULL_BRACKET: &[BracketSlot] = &[
    BracketSlot {
        label: SEMI_ONE,
        side1: seeded("AB"),
        side2: seeded("GH"),
    },
    BracketSlot {
        label: SEMI_TWO,
        side1: seeded("CD"),
        side2: seeded("EF"),
    },
    BracketSlot {
        label: BRONZE,
        side1: Side::LoserOf(SEMI_ONE),
        side2: Side::LoserOf(SEMI_TWO),
    },
    BracketSlot {
        label: FINAL,
        side1: Side::WinnerOf(SEMI_ONE),
        side2: Side::WinnerOf(SEMI_TWO),
    },
];

pub fn bracket_template(size: RosterSize) -> BracketTemplate {
    match size {
        RosterSize::Four => BracketTemplate {
            matches: FINAL_ONLY,
            sits_out: None,
        },
        RosterSize::Five => BracketTemplate {
            matches: FINAL_ONLY,
            sits_out: Some((5, 'E')),
        },
        RosterSize::Six => BracketTemplate {
            matches: SEMI_THEN_FINAL,
            sits_out: None,
        },
        RosterSize::Seven => BracketTemplate {
            matches: SEMI_THEN_FINAL,
            sits_out: Some((7, 'G')),
        },
        RosterSize::Eight => BracketTemplate {
            matches: FULL_BRACKET,
            sits_out: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters_in(size: RosterSize) -> Vec<char> {
        size.letters().collect()
    }

    #[test]
    fn test_pool_sizes() {
        let games: Vec<usize> = RosterSize::ALL
            .iter()
            .map(|s| pool_template(*s).len())
            .collect();
        assert_eq!(games, vec![3, 5, 6, 7, 6]);
    }

    #[test]
    fn test_every_letter_plays_equally_often() {
        let expected = [3, 4, 4, 4, 3];
        for (size, games) in RosterSize::ALL.into_iter().zip(expected) {
            let pool = pool_template(size);
            for letter in letters_in(size) {
                let played = pool
                    .iter()
                    .filter(|(t1, t2)| t1.letters().contains(&letter) || t2.letters().contains(&letter))
                    .count();
                assert_eq!(played, games, "size {size}: letter {letter}");
            }
        }
    }

    #[test]
    fn test_top_seed_always_listed_first() {
        // The tables put A in the team-1 slot whenever A plays.
        for size in RosterSize::ALL {
            assert!(pool_template(size).iter().all(|(_, t2)| !t2.letters().contains(&'A')));
        }
    }

    #[test]
    fn test_pool_uses_only_roster_letters() {
        for size in RosterSize::ALL {
            let allowed = letters_in(size);
            for (t1, t2) in pool_template(size) {
                for letter in t1.letters().iter().chain(t2.letters().iter()) {
                    assert!(allowed.contains(letter), "size {size}: stray {letter}");
                }
                assert!(t1.letters().iter().all(|l| !t2.letters().contains(l)));
            }
        }
    }

    #[test]
    fn test_bracket_references_point_backwards() {
        for size in RosterSize::ALL {
            let template = bracket_template(size);
            for (idx, slot) in template.matches.iter().enumerate() {
                let earlier: Vec<&str> = template.matches[..idx].iter().map(|m| m.label).collect();
                for side in [slot.side1, slot.side2] {
                    match side {
                        Side::WinnerOf(label) | Side::LoserOf(label) => {
                            assert!(earlier.contains(&label), "size {size}: {label}")
                        }
                        Side::Seeded(_) => {}
                    }
                }
            }
        }
    }

    #[test]
    fn test_bracket_ends_with_final() {
        for size in RosterSize::ALL {
            let template = bracket_template(size);
            assert_eq!(template.matches.last().map(|m| m.label), Some(FINAL));
        }
    }
}
