// src/fetch/http.rs
// =============================================================================
// The real HTTP fetcher, built on reqwest.
//
// Key functionality:
// - One GET per URL, no retries
// - Redirects are followed the way reqwest does by default
// - Optional per-request timeout, User-Agent and extra headers
// - Failures are sorted into timeouts, connection errors, redirect loops, ...
//   so the log says more than "error"
// =============================================================================

use super::{Fetcher, Response};
use crate::error::{CrawlError, Result, TransportFailure};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use std::time::Duration;

/// Fetches pages over HTTP(S).
///
/// Cloning is cheap: the underlying client is reference counted and shares
/// its connection pool.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// A fetcher with reqwest defaults and no timeout.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    pub fn builder() -> HttpFetcherBuilder {
        HttpFetcherBuilder::default()
    }
}

/// Settings for an `HttpFetcher`.
#[derive(Debug, Default)]
pub struct HttpFetcherBuilder {
    timeout: Option<Duration>,
    user_agent: Option<String>,
    headers: Vec<(String, String)>,
}

impl HttpFetcherBuilder {
    /// Gives up on a request after `timeout`. Unset means wait forever.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sends `name: value` with every request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn build(self) -> Result<HttpFetcher> {
        let mut headers = HeaderMap::new();
        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| CrawlError::Config(format!("invalid header name '{}': {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| CrawlError::Config(format!("invalid value for header {}: {}", name.as_str(), e)))?;
            headers.append(name, value);
        }

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|e| CrawlError::Config(format!("cannot build HTTP client: {}", e)))?;

        Ok(HttpFetcher { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Response> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| categorize_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CrawlError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| categorize_error(url, e))?;

        Ok(Response {
            status: status.as_u16(),
            body,
        })
    }
}

// Sorts a reqwest error into one of our transport failures
fn categorize_error(url: &str, error: reqwest::Error) -> CrawlError {
    let failure = if error.is_timeout() {
        TransportFailure::Timeout
    } else if error.is_redirect() {
        TransportFailure::TooManyRedirects
    } else if error.is_connect() {
        TransportFailure::Connect(error.to_string())
    } else if error.is_body() || error.is_decode() {
        TransportFailure::Body(error.to_string())
    } else {
        TransportFailure::Other(error.to_string())
    };

    CrawlError::Transport {
        url: url.to_string(),
        failure,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<p>μ's</p>"))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let response = fetcher.fetch(&server.uri()).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, "<p>μ's</p>");
    }

    #[tokio::test]
    async fn test_not_found_is_status_error_and_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/not_found.html"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let url = format!("{}/not_found.html", server.uri());
        let err = fetcher.fetch(&url).await.unwrap_err();

        assert_eq!(err.status(), Some(404));
        assert!(!err.is_transport());
    }

    #[tokio::test]
    async fn test_timeout_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("late")
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::builder()
            .timeout(Some(Duration::from_millis(50)))
            .build()
            .unwrap();
        let err = fetcher.fetch(&server.uri()).await.unwrap_err();

        assert!(matches!(
            err,
            CrawlError::Transport {
                failure: TransportFailure::Timeout,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Port 9 (discard) is essentially never listening locally
        let fetcher = HttpFetcher::new().unwrap();
        let err = fetcher.fetch("http://127.0.0.1:9/").await.unwrap_err();
        assert!(err.is_transport());
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn test_redirect_loop_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/loop"))
            .respond_with(ResponseTemplate::new(302).insert_header("location", "/loop"))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let url = format!("{}/loop", server.uri());
        let err = fetcher.fetch(&url).await.unwrap_err();

        assert!(matches!(
            err,
            CrawlError::Transport {
                failure: TransportFailure::TooManyRedirects,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_custom_headers_are_sent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("x-crawl", "yes"))
            .and(header("user-agent", "link-seeker-test"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::builder()
            .user_agent("link-seeker-test")
            .header("X-Crawl", "yes")
            .build()
            .unwrap();

        assert_eq!(fetcher.fetch(&server.uri()).await.unwrap().body, "ok");
    }

    #[test]
    fn test_invalid_header_is_config_error() {
        let result = HttpFetcher::builder().header("bad header", "x").build();
        assert!(matches!(result, Err(CrawlError::Config(_))));
    }
}
