//! # PubMed Client
//!
//! An async client for the NCBI E-utilities that turns a set of search
//! criteria into a PubMed query, retrieves the matching PMIDs and fetches the
//! full records in MEDLINE format.
//!
//! ## Features
//!
//! - **Query building**: Date range, journal and publication type clauses
//! - **MEDLINE parsing**: Field-tagged records with text and list values
//! - **Ordering**: Records sorted by their raw publication date, newest first
//! - **Error Handling**: A single typed error for every failure of the round trip
//!
//! ## Quick Start
//!
//! ```no_run
//! use pubmed_client::{ClientConfig, PubMedClient, ResultLimit, SearchCriteria};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new().with_email("researcher@university.edu");
//!     let client = PubMedClient::with_config(config);
//!
//!     let criteria = SearchCriteria::new("Ameloblastoma AND Treatment", "2020", "2021")
//!         .with_journal("Int J Oral Maxillofac Surg")
//!         .with_limit(ResultLimit::Count(10));
//!
//!     for record in client.search_medline(&criteria).await? {
//!         println!("{}: {}", record.pmid().unwrap_or("?"), record.title().unwrap_or("-"));
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod pubmed;

// Re-export main types for convenience
pub use config::{ClientConfig, DEFAULT_TIMEOUT_SECS};
pub use error::{PubMedError, Result};
pub use pubmed::{
    InvalidResultLimit, MedlineField, MedlineRecord, PubMedClient, ResultLimit, SearchCriteria,
    parse_medline, sort_by_publication_date,
};
