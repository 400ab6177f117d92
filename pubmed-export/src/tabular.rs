//! Semicolon-delimited CSV export
//!
//! `;` is used as the delimiter because author lists are joined with commas.

use csv::{QuoteStyle, WriterBuilder};
use tracing::debug;

use crate::error::Result;
use crate::rows::{COLUMN_NAMES, ResultRow};

pub const CSV_DELIMITER: u8 = b';';

/// Serialize rows to UTF-8 CSV bytes with a header line
///
/// Fields are quoted with `"` when they contain the delimiter, a quote or a
/// line break; embedded quotes are doubled.
///
/// # Example
///
/// ```
/// use pubmed_export::rows_to_csv;
///
/// let bytes = rows_to_csv(&[]).unwrap();
/// assert_eq!(
///     String::from_utf8(bytes).unwrap(),
///     "Título;Autores;Ano;Delineamento;Revista;Resumo;Link\n"
/// );
/// ```
pub fn rows_to_csv(rows: &[ResultRow]) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .delimiter(CSV_DELIMITER)
        .quote(b'"')
        .quote_style(QuoteStyle::Necessary)
        .has_headers(true)
        .from_writer(Vec::new());

    // The header is derived from the field names and only written together
    // with the first serialized row
    if rows.is_empty() {
        writer.write_record(COLUMN_NAMES)?;
    }
    for row in rows {
        writer.serialize(row)?;
    }

    let bytes = writer.into_inner().map_err(|err| err.into_error())?;
    debug!(rows = rows.len(), bytes = bytes.len(), "Rendered CSV export");
    Ok(bytes)
}
