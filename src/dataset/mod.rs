//! Labeled video dataset loading.
//!
//! A dataset is a CSV file whose first four columns are, by position:
//! label, video reference, start time and end time (whole seconds).

mod parser;
mod row;

pub use parser::{load_dataset, parse_seconds};
pub use row::DatasetRow;
