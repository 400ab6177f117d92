//! PubMed client for searching and fetching MEDLINE records
//!
//! - `client` - HTTP client for the ESearch and EFetch endpoints
//! - `query` - Search criteria and query expression building
//! - `parser` - MEDLINE text parser
//! - `models` - Parsed record type and date ordering

pub mod client;
pub mod models;
pub mod parser;
pub mod query;
pub(crate) mod responses;

// Re-export public types
pub use client::PubMedClient;
pub use models::{MedlineField, MedlineRecord, sort_by_publication_date, tags};
pub use parser::parse_medline;
pub use query::{ALL_RESULTS_CAP, InvalidResultLimit, ResultLimit, SearchCriteria};
