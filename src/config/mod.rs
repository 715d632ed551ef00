pub mod points;
pub mod settings;

pub use points::{awards_for, is_awarded_rank, points_for, Award, Tier};
pub use settings::{AppConfig, ScoringSettings, StorageSettings, StoreKind};
