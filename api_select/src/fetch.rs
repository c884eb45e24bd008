//! Fetching option lists from the REST API.

use std::future::Future;

use anyhow::Context;
use common::api_option::{ApiOption, ApiResultsResponse};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use thiserror::Error;

use crate::config::ApiClientConfig;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot resolve request url `{url}`")]
    InvalidUrl { url: String },
    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },
    #[error("{url} answered {status}")]
    Http { url: String, status: StatusCode },
    #[error("response from {url} is not an option list: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Source of option lists for a composed request URL.
pub trait OptionFetcher {
    fn fetch_options(&self, url: &str) -> impl Future<Output = Result<Vec<ApiOption>, LoadError>>;
}

/// [`OptionFetcher`] issuing one GET per load over `reqwest`.
///
/// No timeout and no retry: a hung request stays in flight.
#[derive(Debug, Clone)]
pub struct HttpOptionFetcher {
    config: ApiClientConfig,
    http: reqwest::Client,
}

impl HttpOptionFetcher {
    pub fn new(config: ApiClientConfig) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = &config.api_token {
            let value = HeaderValue::from_str(&format!("Token {}", token.trim()))
                .context("API token is not a valid header value")?;
            headers.insert(AUTHORIZATION, value);
        }
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build http client")?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ApiClientConfig {
        &self.config
    }
}

impl OptionFetcher for HttpOptionFetcher {
    async fn fetch_options(&self, url: &str) -> Result<Vec<ApiOption>, LoadError> {
        let url = self
            .config
            .endpoint(url)
            .ok_or_else(|| LoadError::InvalidUrl { url: url.to_string() })?;

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| LoadError::Network { url: url.clone(), message: e.to_string() })?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Http { url, status });
        }
        let response_txt = response
            .text()
            .await
            .map_err(|e| LoadError::Network { url: url.clone(), message: e.to_string() })?;
        let response: ApiResultsResponse =
            serde_json::from_str(&response_txt).map_err(|source| LoadError::Decode { url, source })?;
        Ok(response.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_header_is_rejected_when_not_ascii() {
        let config = ApiClientConfig::new("http://127.0.0.1:8000").with_api_token(Some("bad\ntoken".to_string()));
        assert!(HttpOptionFetcher::new(config).is_err());
    }

    #[tokio::test]
    async fn empty_url_is_not_requested() {
        let fetcher = HttpOptionFetcher::new(ApiClientConfig::new("http://127.0.0.1:8000")).unwrap();
        let err = fetcher.fetch_options("").await.unwrap_err();
        assert!(matches!(err, LoadError::InvalidUrl { .. }));
    }
}
