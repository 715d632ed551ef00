pub mod models;
pub mod placements;
pub mod roster;

pub use models::*;
pub use placements::{Finishers, Placements};
pub use roster::{normalize_name, normalize_roster, RosterSize};
