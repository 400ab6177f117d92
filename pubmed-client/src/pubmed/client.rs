use reqwest::{Client, Response};
use tracing::{debug, info, instrument, warn};

use crate::config::ClientConfig;
use crate::error::{PubMedError, Result};
use crate::pubmed::models::{MedlineRecord, sort_by_publication_date};
use crate::pubmed::parser::parse_medline;
use crate::pubmed::query::SearchCriteria;
use crate::pubmed::responses::ESearchResult;

/// Largest id list sent in an EFetch query string; bigger batches are POSTed
const MAX_GET_IDS: usize = 200;

/// Client for the PubMed ESearch and EFetch endpoints
#[derive(Clone)]
pub struct PubMedClient {
    client: Client,
    pub(crate) base_url: String,
    config: ClientConfig,
}

impl PubMedClient {
    /// Create a new PubMed client with default configuration
    ///
    /// No contact email is set; NCBI expects one, so prefer
    /// [`with_config`](Self::with_config) for real use.
    pub fn new() -> Self {
        Self::with_config(ClientConfig::new())
    }

    /// Create a new PubMed client with custom configuration
    ///
    /// # Example
    ///
    /// ```
    /// use pubmed_client::{ClientConfig, PubMedClient};
    ///
    /// let config = ClientConfig::new()
    ///     .with_email("researcher@university.edu")
    ///     .with_tool("pubmed-finder");
    ///
    /// let client = PubMedClient::with_config(config);
    /// ```
    pub fn with_config(config: ClientConfig) -> Self {
        let base_url = config.effective_base_url().to_string();

        let client = Client::builder()
            .user_agent(config.effective_user_agent())
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url,
            config,
        }
    }

    /// Run a complete search: ESearch for PMIDs, EFetch of the MEDLINE
    /// records, then newest-first ordering by publication date
    ///
    /// Returns an empty list without calling EFetch when nothing matches.
    ///
    /// # Errors
    ///
    /// Any failure of either round trip is returned as is; there is no
    /// retry and no partial result.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pubmed_client::{PubMedClient, ResultLimit, SearchCriteria};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = PubMedClient::new();
    ///     let criteria = SearchCriteria::new("odontogenic keratocyst", "2015", "2024")
    ///         .with_limit(ResultLimit::Count(20));
    ///     let records = client.search_medline(&criteria).await?;
    ///     println!("Found {} records", records.len());
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self, criteria), fields(limit = criteria.limit.retmax()))]
    pub async fn search_medline(&self, criteria: &SearchCriteria) -> Result<Vec<MedlineRecord>> {
        let term = criteria.build_term();
        let pmids = self.search_ids(&term, criteria.limit.retmax()).await?;

        if pmids.is_empty() {
            info!("Search returned no PMIDs");
            return Ok(Vec::new());
        }

        let mut records = self.fetch_medline(&pmids).await?;
        sort_by_publication_date(&mut records);

        info!(
            pmids = pmids.len(),
            records = records.len(),
            "Search and fetch completed"
        );
        Ok(records)
    }

    /// Search PubMed and return at most `retmax` PMIDs
    ///
    /// # Errors
    ///
    /// * `PubMedError::RequestError` - If the HTTP request fails
    /// * `PubMedError::JsonError` - If the JSON body cannot be decoded
    /// * `PubMedError::ApiError` - On a non-success status or an `ERROR` field in the body
    #[instrument(skip(self), fields(term = %term))]
    pub async fn search_ids(&self, term: &str, retmax: usize) -> Result<Vec<String>> {
        let url = format!(
            "{}/esearch.fcgi?db=pubmed&term={}&retmax={}&retmode=json",
            self.base_url,
            urlencoding::encode(term),
            retmax
        );

        debug!("Making ESearch API request");
        let response = self.make_request(&url).await?;
        let search_result: ESearchResult = response.json().await?;

        // NCBI sometimes answers 200 OK with an ERROR field
        if let Some(error_msg) = search_result.esearchresult.error {
            return Err(PubMedError::ApiError {
                status: 200,
                message: format!("NCBI ESearch API error: {}", error_msg),
            });
        }

        let data = search_result.esearchresult;
        if let Some(ref translation) = data.querytranslation {
            debug!(query_translation = %translation, "ESearch query translation");
        }

        let total_count: usize = data
            .count
            .as_deref()
            .and_then(|c| c.parse().ok())
            .unwrap_or(0);

        if total_count > data.idlist.len() {
            warn!(
                total = total_count,
                returned = data.idlist.len(),
                "More articles match than were requested"
            );
        }

        Ok(data.idlist)
    }

    /// Fetch full MEDLINE records for a list of PMIDs in one EFetch call
    ///
    /// Records come back in the order EFetch returns them.
    #[instrument(skip(self, pmids), fields(pmids_count = pmids.len()))]
    pub async fn fetch_medline(&self, pmids: &[String]) -> Result<Vec<MedlineRecord>> {
        if pmids.is_empty() {
            return Ok(Vec::new());
        }

        let id_list = pmids.join(",");
        let url = format!("{}/efetch.fcgi", self.base_url);

        let response = if pmids.len() <= MAX_GET_IDS {
            debug!("Making EFetch API request");
            let url = format!("{url}?db=pubmed&id={id_list}&rettype=medline&retmode=text");
            self.make_request(&url).await?
        } else {
            debug!("Making EFetch API request with POST body");
            let form = vec![
                ("db".to_string(), "pubmed".to_string()),
                ("id".to_string(), id_list),
                ("rettype".to_string(), "medline".to_string()),
                ("retmode".to_string(), "text".to_string()),
            ];
            self.make_form_request(&url, form).await?
        };

        let text = response.text().await?;
        let records = parse_medline(&text)?;

        if records.len() != pmids.len() {
            warn!(
                requested = pmids.len(),
                parsed = records.len(),
                "EFetch returned a different number of records"
            );
        }

        Ok(records)
    }

    /// GET request with the identification parameters appended to the URL
    async fn make_request(&self, url: &str) -> Result<Response> {
        let mut final_url = url.to_string();
        let api_params = self.config.build_api_params();

        if !api_params.is_empty() {
            let separator = if url.contains('?') { '&' } else { '?' };
            final_url.push(separator);

            let param_strings: Vec<String> = api_params
                .into_iter()
                .map(|(key, value)| format!("{}={}", key, urlencoding::encode(&value)))
                .collect();
            final_url.push_str(&param_strings.join("&"));
        }

        debug!("Making API request to: {}", final_url);
        let response = self.client.get(&final_url).send().await?;
        Self::check_status(response)
    }

    /// POST request with the identification parameters added to the form body
    async fn make_form_request(
        &self,
        url: &str,
        mut form: Vec<(String, String)>,
    ) -> Result<Response> {
        form.extend(self.config.build_api_params());

        debug!("Making API POST request to: {}", url);
        let response = self.client.post(url).form(&form).send().await?;
        Self::check_status(response)
    }

    fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if !status.is_success() {
            warn!("API request failed with status: {}", status);
            return Err(PubMedError::ApiError {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string(),
            });
        }

        Ok(response)
    }
}

impl Default for PubMedClient {
    fn default() -> Self {
        Self::new()
    }
}
