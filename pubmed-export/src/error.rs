use std::io;
use std::result;

use thiserror::Error;

/// Error types for export operations
#[derive(Error, Debug)]
pub enum ExportError {
    /// CSV serialization failed
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    /// PDF assembly failed
    #[error("PDF export failed: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Writing the output buffer failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = result::Result<T, ExportError>;
