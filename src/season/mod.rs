mod aggregate;
pub mod ranking;
pub mod reducer;

pub use aggregate::{PlayerAggregate, SeasonTable, Titles};
pub use ranking::{compare_standing, rank_players, RankedPlayer};
pub use reducer::{apply_event, reduce};
