#![deny(
    clippy::panic,
    clippy::absolute_paths,
    clippy::print_stderr,
    clippy::print_stdout
)]

//! # PubMed Export
//!
//! Turns MEDLINE records into the fixed seven-column result table and
//! exports it:
//!
//! - **Rows**: Projection of each record with placeholders for missing fields
//! - **CSV**: Semicolon-delimited, quoted, UTF-8 table with a header row
//! - **PDF**: Paginated report with a title, the search parameters and one
//!   entry per article, rendered in memory

pub mod document;
pub mod error;
pub mod rows;
pub mod tabular;

// Re-export main types for convenience
pub use document::render_pdf;
pub use error::{ExportError, Result};
pub use rows::{COLUMN_NAMES, ResultRow, rows_from_records};
pub use tabular::{CSV_DELIMITER, rows_to_csv};
