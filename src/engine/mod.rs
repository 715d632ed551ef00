//! Matchday tournament engine: seeding, schedules, pool standings, bracket
//! and placements.

pub mod hashing;
pub mod placement;
pub mod schedule;
pub mod seeding;
pub mod session;
pub mod standings;
pub mod templates;

pub use hashing::{name_hash, order_deterministically};
pub use placement::resolve_placements;
pub use schedule::{
    bracket_schedule, pool_schedule, MatchResult, Phase, ScheduleEntry, ScoreAnomaly, ScoreTarget,
};
pub use seeding::{assign_pool_letters, LetterAssignment, SeedingMethod};
pub use session::{Matchday, MatchdayState, PendingMatch, Progress};
pub use standings::{resolve_pool_standings, PoolStandings};
pub use templates::{bracket_template, pool_template, LetterPair, Side};
