use async_trait::async_trait;
use nr_core::{CandidateArticle, Error, Result, SearchPage, SearchRequest};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::NewsSource;

pub const DEFAULT_ENDPOINT: &str = "https://openapi.naver.com/v1/search/news.json";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone)]
pub struct NaverConfig {
    pub client_id: String,
    pub client_secret: String,
    pub endpoint: Url,
    pub timeout: Duration,
}

impl NaverConfig {
    pub fn new(client_id: String, client_secret: String) -> Result<Self> {
        if client_id.trim().is_empty() {
            return Err(Error::MissingParameter("NAVER_CLIENT_ID".to_string()));
        }
        if client_secret.trim().is_empty() {
            return Err(Error::MissingParameter("NAVER_CLIENT_SECRET".to_string()));
        }
        Ok(Self {
            client_id,
            client_secret,
            endpoint: Url::parse(DEFAULT_ENDPOINT)
                .map_err(|e| Error::InvalidParameter(format!("Invalid endpoint: {}", e)))?,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Result<Self> {
        self.endpoint = Url::parse(endpoint)
            .map_err(|e| Error::InvalidParameter(format!("Invalid endpoint '{}': {}", endpoint, e)))?;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for NaverConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NaverConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("endpoint", &self.endpoint.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Deserialize)]
struct NewsResponse {
    total: u64,
    #[serde(default)]
    items: Vec<CandidateArticle>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    #[serde(rename = "errorMessage")]
    error_message: String,
    #[serde(rename = "errorCode", default)]
    error_code: String,
}

pub struct NaverSource {
    client: Arc<Client>,
    config: NaverConfig,
}

impl NaverSource {
    pub fn new(config: NaverConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client: Arc::new(client),
            config,
        })
    }

    fn request_url(&self, request: &SearchRequest) -> Url {
        let mut url = self.config.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("query", &request.query)
            .append_pair("display", &request.display.to_string())
            .append_pair("sort", request.sort.as_str());
        url
    }
}

impl fmt::Debug for NaverSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NaverSource")
            .field("client", &"<reqwest::Client>")
            .field("config", &self.config)
            .finish()
    }
}

fn upstream_error(status: StatusCode, body: &str) -> Error {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(err) if !err.error_code.is_empty() => Error::Upstream(format!(
            "{} ({}): {}",
            status, err.error_code, err.error_message
        )),
        Ok(err) => Error::Upstream(format!("{}: {}", status, err.error_message)),
        Err(_) => Error::Upstream(format!("{}", status)),
    }
}

#[async_trait]
impl NewsSource for NaverSource {
    fn name(&self) -> &str {
        "Naver News"
    }

    async fn search(&self, request: &SearchRequest) -> Result<SearchPage> {
        let url = self.request_url(request);
        tracing::debug!("Querying {} for '{}'", self.config.endpoint, request.query);

        let response = self
            .client
            .get(url)
            .header("X-Naver-Client-Id", &self.config.client_id)
            .header("X-Naver-Client-Secret", &self.config.client_secret)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(upstream_error(status, &body));
        }

        let news = response.json::<NewsResponse>().await?;
        tracing::debug!("Naver reported {} matches, returned {}", news.total, news.items.len());
        Ok(SearchPage {
            total: news.total,
            items: news.items,
        })
    }
}
