use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::error::FetchError;

/// Status and body of an upstream response.
#[derive(Debug, Clone)]
pub struct Fetched {
    pub status: StatusCode,
    pub body: String,
}

/// Issues outbound GET requests carrying the spoofed browser headers.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn get(&self, url: &str, referer: &str) -> Result<Fetched, FetchError>;
}

/// `Fetcher` backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    user_agent: String,
}

impl HttpFetcher {
    pub fn new(user_agent: impl Into<String>) -> Result<Self, FetchError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            user_agent: user_agent.into(),
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get(&self, url: &str, referer: &str) -> Result<Fetched, FetchError> {
        let resp = self
            .client
            .get(url)
            .header("Referer", referer)
            .header("User-Agent", &self.user_agent)
            .send()
            .await?;

        let status = resp.status();
        debug!(%url, %status, "upstream responded");

        let body = resp.text().await?;
        Ok(Fetched { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_sends_spoofed_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .and(header("Referer", "https://allanime.to"))
            .and(header("User-Agent", "test-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new("test-agent").unwrap();
        let fetched = fetcher
            .get(&format!("{}/page", server.uri()), "https://allanime.to")
            .await
            .unwrap();

        assert_eq!(fetched.status, StatusCode::OK);
        assert_eq!(fetched.body, "ok");
    }

    #[tokio::test]
    async fn test_non_success_is_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down"))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new("test-agent").unwrap();
        let fetched = fetcher.get(&server.uri(), "r").await.unwrap();

        assert_eq!(fetched.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(fetched.body, "down");
    }
}
