pub mod league;
pub mod matchday;
pub mod reporting;
