//! Session state: the editable search form and the last result set

use std::fmt;

use async_trait::async_trait;
use pubmed_client::{MedlineRecord, PubMedClient, ResultLimit, SearchCriteria};
use pubmed_export::{ExportError, ResultRow, render_pdf, rows_from_records, rows_to_csv};
use tracing::{info, warn};

/// Anything that can answer a search with MEDLINE records
#[async_trait]
pub trait ArticleSource: Send + Sync {
    async fn search(&self, criteria: &SearchCriteria) -> pubmed_client::Result<Vec<MedlineRecord>>;
}

#[async_trait]
impl ArticleSource for PubMedClient {
    async fn search(&self, criteria: &SearchCriteria) -> pubmed_client::Result<Vec<MedlineRecord>> {
        self.search_medline(criteria).await
    }
}

/// Raw form inputs as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchForm {
    pub term: String,
    pub journal: String,
    pub year_start: String,
    pub year_end: String,
    pub limit: ResultLimit,
    pub study_type: String,
}

impl SearchForm {
    /// Criteria for a search, or `None` when a required field is blank
    pub fn criteria(&self) -> Option<SearchCriteria> {
        let required = [&self.term, &self.year_start, &self.year_end];
        if required.iter().any(|field| field.trim().is_empty()) {
            return None;
        }

        Some(
            SearchCriteria::new(self.term.trim(), self.year_start.trim(), self.year_end.trim())
                .with_journal(self.journal.trim())
                .with_study_type(self.study_type.trim())
                .with_limit(self.limit),
        )
    }
}

/// Message shown to the user after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Warning(String),
    Error(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Info(message) => write!(f, "{message}"),
            Notice::Warning(message) => write!(f, "Aviso: {message}"),
            Notice::Error(message) => write!(f, "Erro: {message}"),
        }
    }
}

pub const MISSING_FIELDS: &str = "Preencha os campos obrigatórios (Termo, Ano Inicial e Ano Final).";
pub const NO_RESULTS: &str = "Nenhum artigo encontrado.";

/// Download formats offered once there are results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl ExportFormat {
    pub fn default_file_name(self) -> &'static str {
        match self {
            ExportFormat::Csv => "resultados_pubmed.csv",
            ExportFormat::Pdf => "resultados_pubmed.pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Csv => f.write_str("CSV"),
            ExportFormat::Pdf => f.write_str("PDF"),
        }
    }
}

/// One interactive session
///
/// The result set starts empty and is replaced wholesale by every search
/// that passes validation, including failed ones.
#[derive(Debug, Default)]
pub struct Session {
    pub form: SearchForm,
    results: Vec<MedlineRecord>,
    // Criteria of the search that produced `results`; used for the PDF header
    last_criteria: Option<SearchCriteria>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&self) -> &[MedlineRecord] {
        &self.results
    }

    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }

    /// Validate the form and run the search
    pub async fn submit<S: ArticleSource + ?Sized>(&mut self, source: &S) -> Notice {
        let Some(criteria) = self.form.criteria() else {
            warn!("Search not started: required fields are empty");
            return Notice::Warning(MISSING_FIELDS.to_string());
        };

        let outcome = source.search(&criteria).await;
        self.last_criteria = Some(criteria);

        match outcome {
            Ok(records) => {
                self.results = records;
                info!(results = self.results.len(), "Search finished");
                match self.results.len() {
                    0 => Notice::Info(NO_RESULTS.to_string()),
                    1 => Notice::Info("1 artigo encontrado.".to_string()),
                    n => Notice::Info(format!("{n} artigos encontrados.")),
                }
            }
            Err(err) => {
                self.results.clear();
                warn!(error = %err, reason = err.reason(), "Search failed");
                Notice::Error(format!("Erro ao buscar artigos: {err}"))
            }
        }
    }

    /// Table rows for the current results, in result order
    pub fn rows(&self) -> Vec<ResultRow> {
        rows_from_records(self.results())
    }

    /// Render a download, or `None` when there is nothing to download
    pub fn export(&self, format: ExportFormat) -> Result<Option<Vec<u8>>, ExportError> {
        // Results only ever come from a search, which always records its criteria
        let Some(criteria) = self.last_criteria.as_ref().filter(|_| self.has_results()) else {
            return Ok(None);
        };

        let rows = self.rows();
        let bytes = match format {
            ExportFormat::Csv => rows_to_csv(&rows)?,
            ExportFormat::Pdf => render_pdf(&rows, criteria)?,
        };
        Ok(Some(bytes))
    }
}
