use std::fmt;

use crate::domain::{RosterSize, Stage, Team};

use super::templates::{bracket_template, pool_template, Side};

/// Advisory finishing score for a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreTarget {
    pub points: u32,
    pub win_by: u32,
}

impl ScoreTarget {
    pub const POOL: ScoreTarget = ScoreTarget {
        points: 11,
        win_by: 1,
    };
    pub const BRACKET: ScoreTarget = ScoreTarget {
        points: 15,
        win_by: 2,
    };

    /// Ways a decided score falls short of this target.
    pub fn anomalies(&self, s1: u32, s2: u32) -> Vec<ScoreAnomaly> {
        let mut found = Vec::new();
        let high = s1.max(s2);
        let margin = s1.abs_diff(s2);
        if high < self.points {
            found.push(ScoreAnomaly::UnderTarget {
                high,
                target: self.points,
            });
        }
        if margin < self.win_by {
            found.push(ScoreAnomaly::UnderMargin {
                margin,
                required: self.win_by,
            });
        }
        found
    }
}

impl fmt::Display for ScoreTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "to {}, win by {}", self.points, self.win_by)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreAnomaly {
    UnderTarget { high: u32, target: u32 },
    UnderMargin { margin: u32, required: u32 },
}

impl fmt::Display for ScoreAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreAnomaly::UnderTarget { high, target } => {
                write!(f, "winning score {} is below the target of {}", high, target)
            }
            ScoreAnomaly::UnderMargin { margin, required } => {
                write!(f, "margin of {} is under the required {}", margin, required)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Pool,
    Bracket,
}

impl Phase {
    pub fn stage(&self) -> Stage {
        match self {
            Phase::Pool => Stage::Pool,
            Phase::Bracket => Stage::Bracket,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub phase: Phase,
    pub label: Option<&'static str>,
    pub side1: Side,
    pub side2: Side,
    pub target: ScoreTarget,
}

impl ScheduleEntry {
    /// True when either side depends on an earlier result.
    pub fn is_derived(&self) -> bool {
        !matches!((self.side1, self.side2), (Side::Seeded(_), Side::Seeded(_)))
    }

    /// Labels of the matches this entry waits on.
    pub fn references(&self) -> Vec<&'static str> {
        [self.side1, self.side2]
            .into_iter()
            .filter_map(|side| match side {
                Side::WinnerOf(label) | Side::LoserOf(label) => Some(label),
                Side::Seeded(_) => None,
            })
            .collect()
    }
}

/// Outcome of one played schedule entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub phase: Phase,
    pub label: Option<&'static str>,
    pub winner: Team,
    pub loser: Team,
    pub s1: u32,
    pub s2: u32,
}

/// Latest result recorded under a label.
pub fn find_result<'a>(results: &'a [MatchResult], label: &str) -> Option<&'a MatchResult> {
    results.iter().rev().find(|r| r.label == Some(label))
}

/// Pool matches in play order, resolved later through the pool letters.
pub fn pool_schedule(size: RosterSize, target: ScoreTarget) -> Vec<ScheduleEntry> {
    pool_template(size)
        .iter()
        .map(|(team1, team2)| ScheduleEntry {
            phase: Phase::Pool,
            label: None,
            side1: Side::Seeded(*team1),
            side2: Side::Seeded(*team2),
            target,
        })
        .collect()
}

/// Bracket matches in dependency order, resolved through the bracket letters.
pub fn bracket_schedule(size: RosterSize, target: ScoreTarget) -> Vec<ScheduleEntry> {
    bracket_template(size)
        .matches
        .iter()
        .map(|slot| ScheduleEntry {
            phase: Phase::Bracket,
            label: Some(slot.label),
            side1: slot.side1,
            side2: slot.side2,
            target,
        })
        .collect()
}
