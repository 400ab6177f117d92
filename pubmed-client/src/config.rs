//! Client configuration for NCBI E-utilities access
//!
//! NCBI asks every client to identify itself with a contact email and a tool
//! name. Both travel with each request as query parameters, so they live on
//! the configuration object handed to [`PubMedClient::with_config`](crate::PubMedClient::with_config)
//! rather than in process-wide state.

use std::time::Duration;

use serde::Deserialize;

/// Default E-utilities endpoint
pub const DEFAULT_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// Default tool name reported to NCBI
pub const DEFAULT_TOOL: &str = "pubmed-finder";

/// Default HTTP timeout; an EFetch of 10000 MEDLINE records can take minutes
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Configuration for [`PubMedClient`](crate::PubMedClient)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Contact email sent with every request
    pub email: Option<String>,
    /// Tool name sent with every request
    pub tool: Option<String>,
    /// Optional NCBI API key
    pub api_key: Option<String>,
    /// Override of the E-utilities base URL (used by tests and mirrors)
    pub base_url: Option<String>,
    /// Custom User-Agent header
    pub user_agent: Option<String>,
    /// HTTP request timeout
    #[serde(with = "timeout_secs")]
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a configuration with defaults and no contact information
    ///
    /// # Example
    ///
    /// ```
    /// use pubmed_client::ClientConfig;
    ///
    /// let config = ClientConfig::new();
    /// assert!(config.email.is_none());
    /// ```
    pub fn new() -> Self {
        Self {
            email: None,
            tool: None,
            api_key: None,
            base_url: None,
            user_agent: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Set the contact email reported to NCBI
    pub fn with_email<S: Into<String>>(mut self, email: S) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the tool name reported to NCBI
    pub fn with_tool<S: Into<String>>(mut self, tool: S) -> Self {
        self.tool = Some(tool.into());
        self
    }

    /// Set the NCBI API key
    pub fn with_api_key<S: Into<String>>(mut self, api_key: S) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Point the client at a different E-utilities endpoint
    ///
    /// # Example
    ///
    /// ```
    /// use pubmed_client::ClientConfig;
    ///
    /// let config = ClientConfig::new().with_base_url("http://127.0.0.1:8080");
    /// assert_eq!(config.effective_base_url(), "http://127.0.0.1:8080");
    /// ```
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the HTTP request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL without a trailing slash
    pub fn effective_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }

    /// User-Agent header value
    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("pubmed-client/{}", env!("CARGO_PKG_VERSION")))
    }

    /// Tool name reported to NCBI
    pub fn effective_tool(&self) -> &str {
        self.tool.as_deref().unwrap_or(DEFAULT_TOOL)
    }

    /// Identification parameters appended to every E-utilities request
    pub fn build_api_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();

        if let Some(ref api_key) = self.api_key {
            params.push(("api_key".to_string(), api_key.clone()));
        }
        if let Some(ref email) = self.email {
            params.push(("email".to_string(), email.clone()));
        }
        params.push(("tool".to_string(), self.effective_tool().to_string()));

        params
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

mod timeout_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
