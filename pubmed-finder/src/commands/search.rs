use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;
use pubmed_client::ResultLimit;

use crate::session::{ArticleSource, ExportFormat, Notice, SearchForm, Session};
use crate::shell::{save_export, show_results};

#[derive(Args, Debug)]
pub struct Search {
    /// Search term, passed to PubMed as typed (e.g. "Ameloblastoma AND Treatment")
    #[arg(value_name = "TERM")]
    term: String,

    /// First publication year
    #[arg(long, value_name = "YEAR")]
    start: String,

    /// Last publication year
    #[arg(long, value_name = "YEAR")]
    end: String,

    /// Restrict to a journal (e.g. "Int J Oral Maxillofac Surg")
    #[arg(short, long)]
    journal: Option<String>,

    /// Restrict to a publication type (e.g. "Clinical Trial")
    #[arg(long)]
    study_type: Option<String>,

    /// Number of articles: 5, 10, 20, 50, 100 or todos
    #[arg(short = 'n', long, default_value = "5")]
    count: ResultLimit,

    /// Save the results as CSV
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Save the results as PDF
    #[arg(long, value_name = "FILE")]
    pdf: Option<PathBuf>,
}

impl Search {
    fn form(&self) -> SearchForm {
        SearchForm {
            term: self.term.clone(),
            journal: self.journal.clone().unwrap_or_default(),
            year_start: self.start.clone(),
            year_end: self.end.clone(),
            limit: self.count,
            study_type: self.study_type.clone().unwrap_or_default(),
        }
    }

    pub async fn execute<S: ArticleSource>(&self, source: &S) -> Result<()> {
        let mut stdout = io::stdout().lock();
        self.execute_to(source, &mut stdout).await?;
        stdout.flush()?;
        Ok(())
    }

    async fn execute_to<S: ArticleSource, W: Write>(&self, source: &S, out: &mut W) -> Result<()> {
        let mut session = Session::new();
        session.form = self.form();

        tracing::info!(term = %self.term, limit = %self.count, "Searching PubMed");
        match session.submit(source).await {
            Notice::Info(message) => writeln!(out, "{message}")?,
            notice @ (Notice::Warning(_) | Notice::Error(_)) => bail!("{notice}"),
        }
        show_results(&session, out)?;

        let targets = [(ExportFormat::Csv, &self.csv), (ExportFormat::Pdf, &self.pdf)];
        for (format, path) in targets {
            if let Some(path) = path {
                save_export(&session, format, path, out).await?;
            }
        }
        Ok(())
    }
}
