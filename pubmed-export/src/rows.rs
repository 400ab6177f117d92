//! Projection of MEDLINE records into result table rows

use pubmed_client::MedlineRecord;
use pubmed_client::pubmed::tags;
use serde::Serialize;

/// Column headers of the result table, in order
pub const COLUMN_NAMES: [&str; 7] = [
    "Título",
    "Autores",
    "Ano",
    "Delineamento",
    "Revista",
    "Resumo",
    "Link",
];

const NO_TITLE: &str = "Título não disponível";
const NO_AUTHORS: &str = "Autores não disponíveis";
const NO_DATE: &str = "Data não disponível";
const NO_STUDY_TYPE: &str = "Tipo não disponível";
const NO_JOURNAL: &str = "Revista não disponível";
const NO_ABSTRACT: &str = "Resumo não disponível";
const NO_PMID: &str = "0";

const PERMALINK_BASE: &str = "https://pubmed.ncbi.nlm.nih.gov";

/// One line of the result table
///
/// Every cell holds either the record's value or a fixed placeholder, never
/// an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    #[serde(rename = "Título")]
    pub title: String,
    #[serde(rename = "Autores")]
    pub authors: String,
    #[serde(rename = "Ano")]
    pub year: String,
    #[serde(rename = "Delineamento")]
    pub study_types: String,
    #[serde(rename = "Revista")]
    pub journal: String,
    #[serde(rename = "Resumo")]
    pub abstract_text: String,
    #[serde(rename = "Link")]
    pub link: String,
}

impl ResultRow {
    /// Build the row for one record
    pub fn from_record(record: &MedlineRecord) -> Self {
        let pmid = non_blank(record.pmid()).unwrap_or(NO_PMID);

        Self {
            title: text_or(record, tags::TITLE, NO_TITLE),
            authors: joined_or(record, tags::AUTHORS, NO_AUTHORS),
            year: non_blank(record.publication_date())
                .and_then(|date| date.split_whitespace().next())
                .unwrap_or(NO_DATE)
                .to_string(),
            study_types: joined_or(record, tags::PUBLICATION_TYPE, NO_STUDY_TYPE),
            journal: text_or(record, tags::JOURNAL_ABBREVIATION, NO_JOURNAL),
            abstract_text: text_or(record, tags::ABSTRACT, NO_ABSTRACT),
            link: format!("{PERMALINK_BASE}/{pmid}/"),
        }
    }

    /// Cells in column order
    pub fn cells(&self) -> [&str; 7] {
        [
            &self.title,
            &self.authors,
            &self.year,
            &self.study_types,
            &self.journal,
            &self.abstract_text,
            &self.link,
        ]
    }
}

impl From<&MedlineRecord> for ResultRow {
    fn from(record: &MedlineRecord) -> Self {
        Self::from_record(record)
    }
}

/// One row per record, in record order
pub fn rows_from_records(records: &[MedlineRecord]) -> Vec<ResultRow> {
    records.iter().map(ResultRow::from_record).collect()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn text_or(record: &MedlineRecord, tag: &str, placeholder: &str) -> String {
    non_blank(record.text(tag)).unwrap_or(placeholder).to_string()
}

fn joined_or(record: &MedlineRecord, tag: &str, placeholder: &str) -> String {
    let joined = record
        .list(tag)
        .map(|values| values.join(", "))
        .unwrap_or_default();

    if joined.trim().is_empty() {
        placeholder.to_string()
    } else {
        joined
    }
}
