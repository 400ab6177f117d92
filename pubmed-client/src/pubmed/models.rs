use std::collections::BTreeMap;

use serde::Serialize;

/// MEDLINE tags of the fields the finder reads
pub mod tags {
    pub const PMID: &str = "PMID";
    pub const TITLE: &str = "TI";
    pub const AUTHORS: &str = "AU";
    pub const PUBLICATION_DATE: &str = "DP";
    pub const PUBLICATION_TYPE: &str = "PT";
    pub const JOURNAL_ABBREVIATION: &str = "TA";
    pub const ABSTRACT: &str = "AB";
}

/// Sort key used for records without a publication date
pub const MISSING_DATE_SORT_KEY: &str = "0000";

/// Value of one MEDLINE field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MedlineField {
    /// Single-valued field (title, abstract, date, ...)
    Text(String),
    /// Repeatable field (authors, publication types, MeSH headings, ...)
    List(Vec<String>),
}

/// One PubMed record as returned by EFetch in MEDLINE format
///
/// Fields are kept exactly as parsed, keyed by their MEDLINE tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MedlineRecord {
    fields: BTreeMap<String, MedlineField>,
}

impl MedlineRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<S: Into<String>>(&mut self, tag: S, value: MedlineField) {
        self.fields.insert(tag.into(), value);
    }

    pub fn get(&self, tag: &str) -> Option<&MedlineField> {
        self.fields.get(tag)
    }

    /// Text value of a field; list fields are not returned here
    pub fn text(&self, tag: &str) -> Option<&str> {
        match self.fields.get(tag) {
            Some(MedlineField::Text(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    /// List value of a field; a text field is exposed as a one-element slice
    pub fn list(&self, tag: &str) -> Option<&[String]> {
        match self.fields.get(tag) {
            Some(MedlineField::List(values)) => Some(values.as_slice()),
            Some(MedlineField::Text(value)) => Some(std::slice::from_ref(value)),
            None => None,
        }
    }

    pub fn pmid(&self) -> Option<&str> {
        self.text(tags::PMID)
    }

    pub fn title(&self) -> Option<&str> {
        self.text(tags::TITLE)
    }

    pub fn publication_date(&self) -> Option<&str> {
        self.text(tags::PUBLICATION_DATE)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn date_sort_key(&self) -> &str {
        self.publication_date().unwrap_or(MISSING_DATE_SORT_KEY)
    }
}

/// Sort records newest first by the raw `DP` string
///
/// The comparison is lexicographic on the string as stored (`"2021 Jun"`
/// sorts above `"2021"`), records without a date use [`MISSING_DATE_SORT_KEY`]
/// and equal keys keep their fetch order.
pub fn sort_by_publication_date(records: &mut [MedlineRecord]) {
    records.sort_by(|a, b| b.date_sort_key().cmp(a.date_sort_key()));
}
