//! Connection settings: optional YAML file merged with command-line flags

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use pubmed_client::ClientConfig;
use tracing::{debug, warn};

/// Connection values given on the command line or through the environment
#[derive(Debug, Default, Clone, Copy)]
pub struct ConnectionOverrides<'a> {
    pub email: Option<&'a str>,
    pub api_key: Option<&'a str>,
    pub tool: Option<&'a str>,
    /// HTTP timeout in seconds
    pub timeout: Option<u64>,
}

/// Parse a YAML configuration file
///
/// Every key is optional:
///
/// ```yaml
/// email: someone@example.com
/// tool: pubmed-finder
/// api_key: abc123
/// base_url: https://eutils.ncbi.nlm.nih.gov/entrez/eutils
/// timeout: 60
/// ```
pub fn load_file(path: &Path) -> Result<ClientConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    parse_yaml(&text).with_context(|| format!("Invalid config file {}", path.display()))
}

fn parse_yaml(text: &str) -> Result<ClientConfig> {
    // An empty document deserializes to unit, not to an empty mapping
    if text.trim().is_empty() {
        return Ok(ClientConfig::new());
    }
    Ok(serde_yaml::from_str(text)?)
}

/// Build the client configuration, letting flags override file values
pub fn resolve(path: Option<&Path>, overrides: ConnectionOverrides<'_>) -> Result<ClientConfig> {
    let base = match path {
        Some(path) => {
            debug!(path = %path.display(), "Loading config file");
            load_file(path)?
        }
        None => ClientConfig::new(),
    };

    let config = apply(base, overrides);
    if config.email.is_none() {
        warn!("No contact email configured; NCBI asks clients to set one with --email or NCBI_EMAIL");
    }
    Ok(config)
}

fn apply(mut config: ClientConfig, overrides: ConnectionOverrides<'_>) -> ClientConfig {
    if let Some(email) = overrides.email {
        config = config.with_email(email);
    }
    if let Some(api_key) = overrides.api_key {
        config = config.with_api_key(api_key);
    }
    if let Some(tool) = overrides.tool {
        config = config.with_tool(tool);
    }
    if let Some(secs) = overrides.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    config
}
