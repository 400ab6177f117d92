//! MEDLINE text parser
//!
//! EFetch with `rettype=medline&retmode=text` returns records separated by
//! blank lines. Each field starts with a left-justified tag of up to four
//! characters followed by `- `; values that wrap continue on lines indented
//! by six spaces:
//!
//! ```text
//! PMID- 31978945
//! TI  - A pneumonia outbreak associated with a new coronavirus of probable bat
//!       origin.
//! AU  - Zhou P
//! AU  - Yang XL
//! ```

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::error::{PubMedError, Result};
use crate::pubmed::models::{MedlineField, MedlineRecord};

/// Tags whose repeated or wrapped values are joined into a single string.
/// Every other tag is kept as a list.
const TEXT_TAGS: &[&str] = &[
    "ID", "PMID", "SO", "RF", "NI", "JC", "TA", "IS", "CY", "TT", "CA", "IP", "VI", "DP", "YR",
    "PG", "LID", "DA", "LR", "OWN", "STAT", "DCOM", "PUBM", "DEP", "PL", "JID", "SB", "PMC",
    "EDAT", "MHDA", "PST", "AB", "AD", "EA", "TI", "JT",
];

const CONTINUATION_INDENT: &str = "      ";

fn tag_line_regex() -> &'static Regex {
    static TAG_LINE: OnceLock<Regex> = OnceLock::new();
    TAG_LINE.get_or_init(|| {
        Regex::new(r"^([A-Z][A-Z0-9]{0,3}) *-(?: (.*))?$").expect("Failed to compile tag regex")
    })
}

/// Parse a MEDLINE text payload into records
///
/// # Errors
///
/// Returns `PubMedError::MedlineParseError` when a non-blank line is neither a
/// tagged field nor a continuation of one (for example when the service
/// answers with an HTML or XML error page).
///
/// # Example
///
/// ```
/// use pubmed_client::parse_medline;
///
/// let text = "PMID- 123\nTI  - First line\n      second line\nAU  - Silva J\nAU  - Souza M\n";
/// let records = parse_medline(text).unwrap();
///
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].title(), Some("First line second line"));
/// assert_eq!(records[0].list("AU").unwrap().len(), 2);
/// ```
pub fn parse_medline(text: &str) -> Result<Vec<MedlineRecord>> {
    let mut records = Vec::new();
    let mut pending = PendingRecord::default();

    for (index, raw_line) in text.lines().enumerate() {
        let line_number = index + 1;
        let line = raw_line.trim_end();

        // An indented line that holds only whitespace is an empty
        // continuation, not a record separator
        if let Some(rest) = raw_line.strip_prefix(CONTINUATION_INDENT) {
            let rest = rest.trim();
            if !rest.is_empty() {
                pending.continue_value(rest, line_number)?;
            }
            continue;
        }

        if line.is_empty() {
            if let Some(record) = pending.finish() {
                records.push(record);
            }
            continue;
        }

        let captures = tag_line_regex()
            .captures(line)
            .ok_or_else(|| PubMedError::MedlineParseError {
                line: line_number,
                message: format!("unexpected line: {}", truncate(line, 60)),
            })?;

        let tag = &captures[1];
        let value = captures.get(2).map_or("", |m| m.as_str());
        pending.push_value(tag, value);
    }

    if let Some(record) = pending.finish() {
        records.push(record);
    }

    debug!(records = records.len(), "Parsed MEDLINE payload");
    Ok(records)
}

#[derive(Default)]
struct PendingRecord {
    fields: BTreeMap<String, Vec<String>>,
    current_tag: Option<String>,
}

impl PendingRecord {
    fn push_value(&mut self, tag: &str, value: &str) {
        self.fields
            .entry(tag.to_string())
            .or_default()
            .push(value.to_string());
        self.current_tag = Some(tag.to_string());
    }

    fn continue_value(&mut self, text: &str, line: usize) -> Result<()> {
        let last = self
            .current_tag
            .as_ref()
            .and_then(|tag| self.fields.get_mut(tag))
            .and_then(|values| values.last_mut())
            .ok_or_else(|| PubMedError::MedlineParseError {
                line,
                message: "continuation line without a preceding tag".to_string(),
            })?;

        if !last.is_empty() {
            last.push(' ');
        }
        last.push_str(text);
        Ok(())
    }

    fn finish(&mut self) -> Option<MedlineRecord> {
        self.current_tag = None;
        if self.fields.is_empty() {
            return None;
        }

        let mut record = MedlineRecord::new();
        for (tag, values) in std::mem::take(&mut self.fields) {
            let field = if TEXT_TAGS.contains(&tag.as_str()) {
                MedlineField::Text(values.join(" "))
            } else {
                MedlineField::List(values)
            };
            record.insert(tag, field);
        }
        Some(record)
    }
}

fn truncate(line: &str, max_chars: usize) -> String {
    match line.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &line[..idx]),
        None => line.to_string(),
    }
}
