use anyhow::Result;
use clap::{Parser, Subcommand};
use pubmed_client::PubMedClient;
use std::io::{self, Write};
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;
mod config;
mod render;
mod session;
mod shell;

use config::ConnectionOverrides;
use shell::Shell;

#[derive(Parser)]
#[command(
    name = "pubmed-finder",
    about = "Encontre seu Artigo: PubMed search with CSV and PDF export",
    long_about = "Search PubMed by term, period, journal and study type, browse the results \
                  as a table and download them as CSV or PDF. Without a subcommand an \
                  interactive session is started."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// API key for NCBI E-utilities (increases rate limit)
    #[arg(long, env = "NCBI_API_KEY", global = true)]
    api_key: Option<String>,

    /// Email for NCBI requests (recommended)
    #[arg(long, env = "NCBI_EMAIL", global = true)]
    email: Option<String>,

    /// Tool name for NCBI requests
    #[arg(long, env = "NCBI_TOOL", global = true)]
    tool: Option<String>,

    /// HTTP timeout in seconds (large searches such as `-n todos` can take minutes)
    #[arg(long, value_name = "SECS", global = true)]
    timeout: Option<u64>,

    /// YAML file with connection settings (flags take precedence)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single search, print the table and optionally save CSV/PDF files
    Search(Box<commands::search::Search>),
}

impl Cli {
    fn overrides(&self) -> ConnectionOverrides<'_> {
        ConnectionOverrides {
            email: self.email.as_deref(),
            api_key: self.api_key.as_deref(),
            tool: self.tool.as_deref(),
            timeout: self.timeout,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with indicatif layer for progress bars
    let filter = if cli.verbose { "debug" } else { "info" };

    let indicatif_layer = IndicatifLayer::new();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(indicatif_layer.get_stderr_writer()),
        )
        .with(indicatif_layer)
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let client_config = config::resolve(cli.config.as_deref(), cli.overrides())?;
    let client = PubMedClient::with_config(client_config);

    match &cli.command {
        Some(Commands::Search(cmd)) => cmd.execute(&client).await,
        None => {
            let stdin = BufReader::new(tokio::io::stdin());
            let mut stdout = io::stdout();
            let mut shell = Shell::new(client);
            shell.run(stdin, &mut stdout).await?;
            stdout.flush()?;
            Ok(())
        }
    }
}
