//! Search criteria and PubMed query construction
//!
//! The query is assembled by plain concatenation. Field values are not
//! escaped: whatever the user typed is forwarded to ESearch, which rejects
//! malformed expressions with an API error.

use std::fmt;
use std::str::FromStr;

/// Number of PMIDs requested from ESearch when the user asks for every match.
///
/// ESearch requires a numeric `retmax`, so "all" is a fixed cap rather than
/// true unbounded retrieval.
pub const ALL_RESULTS_CAP: usize = 10_000;

/// Result counts offered to the user
pub const ALLOWED_COUNTS: [usize; 5] = [5, 10, 20, 50, 100];

/// How many records a search should return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultLimit {
    /// One of [`ALLOWED_COUNTS`]
    Count(usize),
    /// Every match, capped at [`ALL_RESULTS_CAP`]
    All,
}

impl ResultLimit {
    /// Value sent as `retmax` to ESearch
    ///
    /// # Example
    ///
    /// ```
    /// use pubmed_client::ResultLimit;
    ///
    /// assert_eq!(ResultLimit::Count(20).retmax(), 20);
    /// assert_eq!(ResultLimit::All.retmax(), 10_000);
    /// ```
    pub fn retmax(&self) -> usize {
        match self {
            ResultLimit::Count(n) => *n,
            ResultLimit::All => ALL_RESULTS_CAP,
        }
    }
}

impl Default for ResultLimit {
    fn default() -> Self {
        ResultLimit::Count(5)
    }
}

impl fmt::Display for ResultLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultLimit::Count(n) => write!(f, "{n}"),
            ResultLimit::All => f.write_str("Todos"),
        }
    }
}

/// Error returned when a result count is outside the offered choices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidResultLimit(pub String);

impl fmt::Display for InvalidResultLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid result count '{}', expected one of 5, 10, 20, 50, 100 or todos",
            self.0
        )
    }
}

impl std::error::Error for InvalidResultLimit {}

impl FromStr for ResultLimit {
    type Err = InvalidResultLimit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.eq_ignore_ascii_case("todos") || value.eq_ignore_ascii_case("all") {
            return Ok(ResultLimit::All);
        }

        match value.parse::<usize>() {
            Ok(n) if ALLOWED_COUNTS.contains(&n) => Ok(ResultLimit::Count(n)),
            _ => Err(InvalidResultLimit(s.to_string())),
        }
    }
}

/// Parameters of one search, fixed for the duration of the call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    pub term: String,
    pub journal: Option<String>,
    pub year_start: String,
    pub year_end: String,
    pub limit: ResultLimit,
    pub study_type: Option<String>,
}

impl SearchCriteria {
    /// Create criteria with the required fields and the default limit
    pub fn new<T, S, E>(term: T, year_start: S, year_end: E) -> Self
    where
        T: Into<String>,
        S: Into<String>,
        E: Into<String>,
    {
        Self {
            term: term.into(),
            journal: None,
            year_start: year_start.into(),
            year_end: year_end.into(),
            limit: ResultLimit::default(),
            study_type: None,
        }
    }

    /// Restrict to a journal; a blank name leaves the filter off
    pub fn with_journal<S: Into<String>>(mut self, journal: S) -> Self {
        self.journal = non_blank(journal.into());
        self
    }

    /// Restrict to a publication type; a blank value leaves the filter off
    pub fn with_study_type<S: Into<String>>(mut self, study_type: S) -> Self {
        self.study_type = non_blank(study_type.into());
        self
    }

    pub fn with_limit(mut self, limit: ResultLimit) -> Self {
        self.limit = limit;
        self
    }

    /// Build the ESearch `term` expression
    ///
    /// # Example
    ///
    /// ```
    /// use pubmed_client::SearchCriteria;
    ///
    /// let term = SearchCriteria::new("ameloblastoma", "2020", "2021")
    ///     .with_study_type("Clinical Trial")
    ///     .build_term();
    ///
    /// assert_eq!(
    ///     term,
    ///     "(ameloblastoma) AND (2020[PDAT] : 2021[PDAT]) AND Clinical Trial[PT]"
    /// );
    /// ```
    pub fn build_term(&self) -> String {
        let mut term = format!(
            "({}) AND ({}[PDAT] : {}[PDAT])",
            self.term, self.year_start, self.year_end
        );

        if let Some(ref journal) = self.journal {
            term.push_str(&format!(" AND {journal}[journal]"));
        }
        if let Some(ref study_type) = self.study_type {
            term.push_str(&format!(" AND {study_type}[PT]"));
        }

        term
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
