//! Moving whole ledgers in and out of the process.

mod json;
mod tabular;

pub use json::{export_json, parse_json};
pub use tabular::{parse_csv, CSV_HEADER};
