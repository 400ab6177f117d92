//! Line-oriented interactive shell over a [`Session`]
//!
//! Each line is one command. Field commands edit the form, `buscar` runs the
//! search and the download commands write the current results to disk.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use pubmed_client::{InvalidResultLimit, ResultLimit};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, error, info};

use crate::render;
use crate::session::{ArticleSource, ExportFormat, Notice, Session};

const PROMPT: &str = "pubmed> ";

const HELP: &str = "\
Comandos:
  termo <texto>          Termo de pesquisa (obrigatório)
  revista [nome]         Nome da revista (opcional; sem valor limpa)
  inicio <ano>           Ano inicial (obrigatório)
  fim <ano>              Ano final (obrigatório)
  numero <n|todos>       Número de artigos: 5, 10, 20, 50, 100 ou todos
  delineamento [tipo]    Delineamento (opcional; sem valor limpa)
  buscar                 Buscar artigos
  tabela                 Mostrar a tabela de resultados
  csv [arquivo]          Baixar CSV (padrão: resultados_pubmed.csv)
  pdf [arquivo]          Baixar PDF (padrão: resultados_pubmed.pdf)
  formulario             Mostrar os valores atuais
  ajuda                  Mostrar esta ajuda
  sair                   Encerrar

Buscas grandes (numero todos) podem levar minutos; o tempo limite padrão é
de 300 s e pode ser alterado com --timeout <segundos> ou com a chave
timeout do arquivo --config.
";

/// Form field addressed by a set command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Term,
    Journal,
    YearStart,
    YearEnd,
    StudyType,
}

/// One parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set(Field, String),
    Limit(ResultLimit),
    Search,
    Table,
    Export(ExportFormat, Option<PathBuf>),
    Form,
    Help,
    Quit,
    Empty,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("comando desconhecido '{0}' (digite 'ajuda')")]
    Unknown(String),

    #[error(transparent)]
    Limit(#[from] InvalidResultLimit),
}

/// Parse one input line
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "" => Command::Empty,
        "termo" => Command::Set(Field::Term, rest.to_string()),
        "revista" => Command::Set(Field::Journal, rest.to_string()),
        "inicio" | "início" => Command::Set(Field::YearStart, rest.to_string()),
        "fim" => Command::Set(Field::YearEnd, rest.to_string()),
        "delineamento" => Command::Set(Field::StudyType, rest.to_string()),
        "numero" | "número" => Command::Limit(rest.parse()?),
        "buscar" => Command::Search,
        "tabela" => Command::Table,
        "csv" => Command::Export(ExportFormat::Csv, optional_path(rest)),
        "pdf" => Command::Export(ExportFormat::Pdf, optional_path(rest)),
        "formulario" | "formulário" => Command::Form,
        "ajuda" | "help" | "?" => Command::Help,
        "sair" | "exit" | "quit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(command)
}

fn optional_path(rest: &str) -> Option<PathBuf> {
    (!rest.is_empty()).then(|| PathBuf::from(rest))
}

/// Whether the shell keeps reading after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Interactive shell bound to an article source
pub struct Shell<S> {
    session: Session,
    source: S,
}

impl<S: ArticleSource> Shell<S> {
    pub fn new(source: S) -> Self {
        Self {
            session: Session::new(),
            source,
        }
    }

    #[cfg(test)]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Read commands from `input` until it ends or `sair` is given
    pub async fn run<R, W>(&mut self, input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        writeln!(out, "Encontre seu Artigo: pesquisa na PubMed. Digite 'ajuda' para ver os comandos.")?;

        let mut lines = input.lines();
        loop {
            write!(out, "{PROMPT}")?;
            out.flush()?;

            let Some(line) = lines.next_line().await? else {
                writeln!(out)?;
                break;
            };

            match parse_command(&line) {
                Ok(command) => {
                    if self.execute(command, out).await? == Flow::Quit {
                        break;
                    }
                }
                Err(err) => writeln!(out, "Erro: {err}")?,
            }
        }
        Ok(())
    }

    /// Apply one command, writing any output to `out`
    pub async fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow> {
        debug!(?command, "Executing shell command");

        match command {
            Command::Empty => {}
            Command::Set(field, value) => {
                let form = &mut self.session.form;
                let slot = match field {
                    Field::Term => &mut form.term,
                    Field::Journal => &mut form.journal,
                    Field::YearStart => &mut form.year_start,
                    Field::YearEnd => &mut form.year_end,
                    Field::StudyType => &mut form.study_type,
                };
                *slot = value;
            }
            Command::Limit(limit) => self.session.form.limit = limit,
            Command::Search => {
                let spinner = search_spinner()?;
                let notice = self.session.submit(&self.source).await;
                spinner.finish_and_clear();

                writeln!(out, "{notice}")?;
                if !matches!(notice, Notice::Warning(_)) {
                    show_results(&self.session, out)?;
                }
            }
            Command::Table => show_results(&self.session, out)?,
            Command::Export(format, path) => {
                let path = path.unwrap_or_else(|| PathBuf::from(format.default_file_name()));
                save_export(&self.session, format, &path, out).await?;
            }
            Command::Form => write!(out, "{}", render::form_summary(&self.session.form))?,
            Command::Help => write!(out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }
}

fn search_spinner() -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message("Buscando artigos na PubMed...");
    Ok(spinner)
}

/// Print the result table and the available downloads
pub fn show_results<W: Write>(session: &Session, out: &mut W) -> Result<()> {
    if !session.has_results() {
        return Ok(());
    }

    writeln!(out, "Resultados da Pesquisa")?;
    write!(out, "{}", render::table(&session.rows()))?;
    writeln!(
        out,
        "Downloads: 'csv [arquivo]' ({}), 'pdf [arquivo]' ({})",
        ExportFormat::Csv.default_file_name(),
        ExportFormat::Pdf.default_file_name()
    )?;
    Ok(())
}

/// Write a download to `path`; failures are reported, not propagated
pub async fn save_export<W: Write>(
    session: &Session,
    format: ExportFormat,
    path: &Path,
    out: &mut W,
) -> Result<bool> {
    let bytes = match session.export(format) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            writeln!(out, "Nenhum resultado para exportar. Faça uma busca primeiro.")?;
            return Ok(false);
        }
        Err(err) => {
            error!(error = %err, %format, "Export failed");
            writeln!(out, "Erro ao gerar {format}: {err}")?;
            return Ok(false);
        }
    };

    match tokio::fs::write(path, &bytes).await {
        Ok(()) => {
            info!(path = %path.display(), bytes = bytes.len(), %format, "Export saved");
            writeln!(out, "{format} salvo em {}", path.display())?;
            Ok(true)
        }
        Err(err) => {
            error!(path = %path.display(), error = %err, "Failed to write export");
            writeln!(out, "Erro ao salvar {}: {err}", path.display())?;
            Ok(false)
        }
    }
}
