//! Integration tests for the search-then-fetch round trip using mocked HTTP responses
//!
//! These tests use wiremock to stand in for the NCBI ESearch and EFetch endpoints.

use pubmed_client::{ClientConfig, PubMedClient, PubMedError, ResultLimit, SearchCriteria};
use tracing_test::traced_test;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const EFETCH_MEDLINE_3_RECORDS: &str = "
PMID- 34000001
DP  - 2021 Jun
TI  - Marsupialization before enucleation of large ameloblastomas.
AU  - Costa A
PT  - Journal Article
TA  - J Oral Maxillofac Surg

PMID- 34000002
DP  - 2023
TI  - Targeted therapy for BRAF-mutated ameloblastoma.
AU  - Lima B
AU  - Rocha C
PT  - Review
TA  - Oral Oncol

PMID- 34000003
DP  - 2019 Dec
TI  - Recurrence after segmental resection.
PT  - Case Reports
";

/// Helper: JSON response from ESearch
fn esearch_json_response(pmids: &[&str], total_count: usize) -> String {
    let id_list: Vec<String> = pmids.iter().map(|id| format!("\"{}\"", id)).collect();
    format!(
        r#"{{
            "header": {{"type": "esearch", "version": "0.3"}},
            "esearchresult": {{
                "count": "{}",
                "retmax": "{}",
                "retstart": "0",
                "idlist": [{}],
                "querytranslation": "ameloblastoma[All Fields]"
            }}
        }}"#,
        total_count,
        pmids.len(),
        id_list.join(",")
    )
}

/// Helper: create PubMedClient pointing to mock server
fn create_test_client(mock_server: &MockServer) -> PubMedClient {
    let config = ClientConfig::new()
        .with_base_url(mock_server.uri())
        .with_email("tester@example.com")
        .with_tool("test-client");
    PubMedClient::with_config(config)
}

fn criteria() -> SearchCriteria {
    SearchCriteria::new("Ameloblastoma AND Treatment", "2019", "2023")
        .with_limit(ResultLimit::Count(5))
}

#[tokio::test]
#[traced_test]
async fn test_search_fetch_and_sort_by_date() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("db", "pubmed"))
        .and(query_param(
            "term",
            "(Ameloblastoma AND Treatment) AND (2019[PDAT] : 2023[PDAT])",
        ))
        .and(query_param("retmax", "5"))
        .and(query_param("email", "tester@example.com"))
        .and(query_param("tool", "test-client"))
        .respond_with(ResponseTemplate::new(200).set_body_string(esearch_json_response(
            &["34000001", "34000002", "34000003"],
            3,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .and(query_param("id", "34000001,34000002,34000003"))
        .and(query_param("rettype", "medline"))
        .and(query_param("retmode", "text"))
        .and(query_param("email", "tester@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EFETCH_MEDLINE_3_RECORDS))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let records = client
        .search_medline(&criteria())
        .await
        .expect("Search should succeed");

    let dates: Vec<_> = records.iter().filter_map(|r| r.publication_date()).collect();
    assert_eq!(dates, vec!["2023", "2021 Jun", "2019 Dec"]);
    assert_eq!(records[0].pmid(), Some("34000002"));
    assert_eq!(records[0].list("AU").unwrap().len(), 2);
}

#[tokio::test]
#[traced_test]
async fn test_zero_ids_skips_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(esearch_json_response(&[], 0)))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EFETCH_MEDLINE_3_RECORDS))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let records = client.search_medline(&criteria()).await.unwrap();

    assert!(records.is_empty());
}

#[tokio::test]
#[traced_test]
async fn test_all_results_sends_fixed_cap() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("retmax", "10000"))
        .respond_with(ResponseTemplate::new(200).set_body_string(esearch_json_response(&[], 0)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let criteria = criteria().with_limit(ResultLimit::All);
    let records = client.search_medline(&criteria).await.unwrap();

    assert!(records.is_empty());
}

#[tokio::test]
#[traced_test]
async fn test_optional_clauses_reach_esearch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param(
            "term",
            "(caries) AND (2000[PDAT] : 2010[PDAT]) AND J Dent Res[journal] AND Clinical Trial[PT]",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(esearch_json_response(&[], 0)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let criteria = SearchCriteria::new("caries", "2000", "2010")
        .with_journal("J Dent Res")
        .with_study_type("Clinical Trial");

    assert!(client.search_medline(&criteria).await.unwrap().is_empty());
}

#[tokio::test]
#[traced_test]
async fn test_esearch_error_field_is_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"esearchresult": {"ERROR": "Invalid query syntax", "idlist": []}}"#,
        ))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let err = client.search_medline(&criteria()).await.unwrap_err();

    match err {
        PubMedError::ApiError { status, message } => {
            assert_eq!(status, 200);
            assert!(message.contains("Invalid query syntax"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
#[traced_test]
async fn test_server_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let err = client.search_medline(&criteria()).await.unwrap_err();

    assert!(matches!(err, PubMedError::ApiError { status: 503, .. }));
    assert_eq!(err.reason(), "Server error");
}

#[tokio::test]
#[traced_test]
async fn test_malformed_esearch_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let err = client.search_medline(&criteria()).await.unwrap_err();

    // reqwest reports body decoding failures as request errors
    assert!(matches!(
        err,
        PubMedError::RequestError(_) | PubMedError::JsonError(_)
    ));
}

#[tokio::test]
#[traced_test]
async fn test_fetch_failure_is_all_or_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(esearch_json_response(&["1", "2"], 2)),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.search_medline(&criteria()).await;

    assert!(matches!(
        result,
        Err(PubMedError::ApiError { status: 500, .. })
    ));
}

#[tokio::test]
#[traced_test]
async fn test_large_batches_are_posted() {
    let mock_server = MockServer::start().await;
    let pmids: Vec<String> = (1..=250).map(|n| n.to_string()).collect();

    Mock::given(method("POST"))
        .and(path("/efetch.fcgi"))
        .and(body_string_contains("rettype=medline"))
        .and(body_string_contains("email=tester%40example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_string("PMID- 1\nDP  - 2020\n"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let records = client.fetch_medline(&pmids).await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].pmid(), Some("1"));
}
