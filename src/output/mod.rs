//! Output formatting for divisions.
//!
//! - [`state`] - the portable export state
//! - [`json`] and [`csv`] - file renderings of that state
//! - [`terminal`] - aligned tables for the command line

mod csv;
mod json;
mod state;
mod terminal;

pub use csv::{escape_csv_field, to_csv, CSV_HEADERS};
pub use json::to_json;
pub use state::{build_export_state, PortableState, StateParams};
pub use terminal::{format_field, render_table};
