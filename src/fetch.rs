//! Plain JSON GETs against the news API.

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

/// Failures of a single fetch. Both kinds end up as one display string in
/// the error view.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The server answered with a non-2xx status.
    #[error("API ошибка: {status}{}", reason_suffix(.status_text))]
    Api { status: u16, status_text: String },

    /// The request never completed or the body was not the expected JSON.
    #[error("Ошибка загрузки: {0}")]
    Transport(String),
}

fn reason_suffix(status_text: &str) -> String {
    if status_text.is_empty() {
        String::new()
    } else {
        format!(" {status_text}")
    }
}

#[derive(Debug, Clone)]
pub struct DataFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl DataFetcher {
    /// `api_base` is joined onto `origin` unless it is already absolute.
    pub fn new(origin: &str, api_base: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let base_url = if api_base.starts_with("http") {
            api_base.trim_end_matches('/').to_string()
        } else {
            format!(
                "{}/{}",
                origin.trim_end_matches('/'),
                api_base.trim_matches('/')
            )
            .trim_end_matches('/')
            .to_string()
        };

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GETs `path` below the API base and decodes the body as `T`.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        let url = self.endpoint(path);
        debug!(%url, "requesting");

        let mut request = self.client.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await.map_err(|e| {
            warn!(%url, error = %e, "request failed");
            FetchError::Transport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let err = FetchError::Api {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            };
            warn!(%url, %err, "api returned an error status");
            return Err(err);
        }

        let body = response.text().await.map_err(|e| {
            warn!(%url, error = %e, "failed to read response body");
            FetchError::Transport(e.to_string())
        })?;
        debug!(%url, status = status.as_u16(), bytes = body.len(), "response received");

        serde_json::from_str(&body).map_err(|e| {
            warn!(%url, error = %e, "malformed response body");
            FetchError::Transport(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::ArticleListResponse;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn joins_relative_api_base_onto_origin() {
        let fetcher = DataFetcher::new("http://localhost:8000/", "/api").unwrap();
        assert_eq!(fetcher.base_url(), "http://localhost:8000/api");
        assert_eq!(
            fetcher.endpoint("articles/42/"),
            "http://localhost:8000/api/articles/42/"
        );
    }

    #[test]
    fn absolute_api_base_wins() {
        let fetcher = DataFetcher::new("http://ignored", "https://news.example/api/").unwrap();
        assert_eq!(fetcher.endpoint("/articles/"), "https://news.example/api/articles/");
    }

    #[tokio::test]
    async fn decodes_successful_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/articles/"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("[]", "application/json"))
            .mount(&server)
            .await;

        let fetcher = DataFetcher::new(&server.uri(), "/api").unwrap();
        let response: ArticleListResponse = fetcher.get_json("articles/", &[]).await.unwrap();
        assert_eq!(response.into_articles(), Some(vec![]));
    }

    #[tokio::test]
    async fn non_success_status_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/articles/99/"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = DataFetcher::new(&server.uri(), "/api").unwrap();
        let err = fetcher
            .get_json::<serde_json::Value>("articles/99/", &[])
            .await
            .unwrap_err();
        assert_eq!(
            err,
            FetchError::Api {
                status: 404,
                status_text: "Not Found".to_string()
            }
        );
        assert_eq!(err.to_string(), "API ошибка: 404 Not Found");
    }

    #[tokio::test]
    async fn unknown_status_has_no_reason_phrase() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/articles/"))
            .respond_with(ResponseTemplate::new(599))
            .mount(&server)
            .await;

        let fetcher = DataFetcher::new(&server.uri(), "/api").unwrap();
        let err = fetcher
            .get_json::<serde_json::Value>("articles/", &[])
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "API ошибка: 599");
    }

    #[test]
    fn decode_failures_read_as_load_errors() {
        let err = FetchError::Transport("key must be a string at line 1 column 2".into());
        assert_eq!(
            err.to_string(),
            "Ошибка загрузки: key must be a string at line 1 column 2"
        );
    }

    #[tokio::test]
    async fn requests_carry_no_custom_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/articles/"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("[]", "application/json"))
            .mount(&server)
            .await;

        let fetcher = DataFetcher::new(&server.uri(), "/api").unwrap();
        let _: serde_json::Value = fetcher.get_json("articles/", &[]).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].headers.get("user-agent").is_none());
    }

    #[tokio::test]
    async fn malformed_json_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/articles/"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("{not json", "application/json"))
            .mount(&server)
            .await;

        let fetcher = DataFetcher::new(&server.uri(), "/api").unwrap();
        let err = fetcher
            .get_json::<ArticleListResponse>("articles/", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }

    #[tokio::test]
    async fn query_parameters_are_sent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/articles/search/"))
            .and(query_param("q", "выборы 2024"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("[]", "application/json"))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = DataFetcher::new(&server.uri(), "/api").unwrap();
        let _: serde_json::Value = fetcher
            .get_json("articles/search/", &[("q", "выборы 2024")])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn unreachable_server_is_transport_error() {
        let fetcher = DataFetcher::new("http://127.0.0.1:9", "/api").unwrap();
        let err = fetcher
            .get_json::<serde_json::Value>("articles/", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }
}
