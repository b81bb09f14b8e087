//! Search services: the HTTP client and the canned stand-in.

use super::{SearchQuery, SearchResponse};
use crate::error::SearchError;
use reqwest::Url;
use std::{fs, path::PathBuf};
use tracing::debug;

/// A single-shot search request.
///
/// Awaiting [`search`](Self::search) yields exactly one of the parsed
/// response or a transport failure.
pub trait SearchService {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, SearchError>;
}

/// POSTs the query form-encoded to the service endpoint.
#[derive(Debug, Clone)]
pub struct HttpSearchService {
    http: reqwest::Client,
    endpoint: Url,
}

impl HttpSearchService {
    pub fn new(endpoint: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
        }
    }
}

impl SearchService for HttpSearchService {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, SearchError> {
        debug!(endpoint = %self.endpoint, ?query, "Sending search request");
        let resp = self
            .http
            .post(self.endpoint.clone())
            .form(query)
            .send()
            .await?
            .error_for_status()?;

        let parsed: SearchResponse = resp.json().await?;
        debug!(
            retval = parsed.retval,
            records = parsed.data.len(),
            "Search response received"
        );
        Ok(parsed)
    }
}

/// Answers every query with the same response, ignoring the query.
#[derive(Debug, Clone)]
pub enum CannedSearchService {
    Fixed(SearchResponse),
    /// Read and parse the file on each request.
    File(PathBuf),
}

impl Default for CannedSearchService {
    fn default() -> Self {
        Self::Fixed(SearchResponse::sample())
    }
}

impl SearchService for CannedSearchService {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, SearchError> {
        debug!(?query, "Answering search from canned response");
        match self {
            Self::Fixed(resp) => Ok(resp.clone()),
            Self::File(path) => {
                let src = fs::read_to_string(path).map_err(|source| SearchError::CannedRead {
                    path: path.clone(),
                    source,
                })?;
                serde_json::from_str(&src).map_err(|source| SearchError::CannedParse {
                    path: path.clone(),
                    source,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server, ServerGuard};

    const PATH: &str = "/api/music_sheet/search";

    fn service(server: &ServerGuard) -> HttpSearchService {
        HttpSearchService::new(Url::parse(&format!("{}{PATH}", server.url())).unwrap())
    }

    #[tokio::test]
    async fn posts_form_and_parses_response() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("title".into(), "Bolero".into()),
                Matcher::UrlEncoded("composer".into(), "".into()),
                Matcher::UrlEncoded("date_added_min".into(), "01-01-2019".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"retval": true, "msg": "", "data": [{"title": "Bolero", "composer": "Ravel"}]}"#,
            )
            .expect(1)
            .create_async()
            .await;

        let query = SearchQuery {
            title: "Bolero".into(),
            date_added_min: "01-01-2019".into(),
            ..Default::default()
        };
        let resp = service(&server).search(&query).await.unwrap();

        mock.assert_async().await;
        assert!(resp.retval);
        assert_eq!(resp.data.len(), 1);
    }

    #[tokio::test]
    async fn business_failure_is_a_successful_response() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", PATH)
            .with_status(200)
            .with_body(r#"{"retval": false, "msg": "Failed to parse min date, use format: %d-%m-%Y", "data": []}"#)
            .create_async()
            .await;

        let resp = service(&server)
            .search(&SearchQuery::default())
            .await
            .unwrap();
        assert!(!resp.retval);
        assert!(resp.msg.starts_with("Failed to parse min date"));
    }

    #[tokio::test]
    async fn http_error_status_is_transport_failure() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", PATH)
            .with_status(500)
            .create_async()
            .await;

        let err = service(&server)
            .search(&SearchQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::Transport(_)));
    }

    #[tokio::test]
    async fn invalid_json_is_transport_failure() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", PATH)
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let err = service(&server)
            .search(&SearchQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::Transport(_)));
    }

    #[tokio::test]
    async fn canned_default_is_sample() {
        let resp = CannedSearchService::default()
            .search(&SearchQuery::default())
            .await
            .unwrap();
        assert_eq!(resp, SearchResponse::sample());
    }

    #[tokio::test]
    async fn canned_file_is_parsed_per_request() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("response.json");
        fs::write(&path, r#"{"retval": false, "msg": "No results"}"#).unwrap();

        let svc = CannedSearchService::File(path.clone());
        let resp = svc.search(&SearchQuery::default()).await.unwrap();
        assert_eq!(resp.msg, "No results");

        fs::remove_file(&path).unwrap();
        let err = svc.search(&SearchQuery::default()).await.unwrap_err();
        assert!(matches!(err, SearchError::CannedRead { path: p, .. } if p == path));
    }

    #[tokio::test]
    async fn malformed_canned_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("response.json");
        fs::write(&path, "{\"retval\": ").unwrap();

        let err = CannedSearchService::File(path)
            .search(&SearchQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::CannedParse { .. }));
    }
}
