//! HTTP client for the Growth Signals backend API.
//!
//! Wraps `reqwest` with typed endpoint methods and deserialization into
//! the envelope types from [`crate::types`]. The client never retries on
//! its own; resilience policy (isolation, fallback, supersession) belongs
//! to the orchestrator consuming it.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::types::{
    AnalysisOutcome, AnalysisRequest, DashboardStats, Deal, DealsResponse, Lead, LeadQuery,
    LeadsResponse, MarketDataResponse, MarketTick, NewsItem, NewsResponse, Tweet, TweetsResponse,
};

/// Client for the Growth Signals backend API.
///
/// Takes the backend root URL at construction (the `/api` prefix is
/// appended internally), so tests can point it at a mock server.
#[derive(Debug)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Creates a new client for the backend rooted at `backend_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ApiError::InvalidUrl`] if
    /// `backend_url` is not a valid URL.
    pub fn new(backend_url: &str, timeout_secs: u64) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("gsig/0.1 (growth-signals)")
            .build()?;

        // Normalise: exactly one trailing slash so Url::join appends the
        // endpoint instead of replacing the last path segment.
        let normalised = format!("{}/api/", backend_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| ApiError::InvalidUrl(format!("'{backend_url}': {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Fetches leads matching `query`.
    ///
    /// All filter fields are optional; unset ones are omitted from the
    /// query string entirely.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] on network failure or non-2xx HTTP status.
    /// - [`ApiError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn get_leads(&self, query: &LeadQuery) -> Result<Vec<Lead>, ApiError> {
        let pairs = query.query_pairs();
        let borrowed: Vec<(&str, &str)> = pairs.iter().map(|(k, v)| (*k, v.as_str())).collect();
        let url = self.endpoint_url("leads", &borrowed)?;
        let envelope: LeadsResponse = self.get_json(url, "GET /leads").await?;
        Ok(envelope.leads)
    }

    /// Fetches the cached tweet set for instant first paint.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] on network failure or non-2xx HTTP status.
    /// - [`ApiError::Deserialize`] on an unexpected response shape.
    pub async fn get_cached_tweets(&self) -> Result<Vec<Tweet>, ApiError> {
        let url = self.endpoint_url("cached-tweets", &[])?;
        let envelope: TweetsResponse = self.get_json(url, "GET /cached-tweets").await?;
        Ok(envelope.tweets)
    }

    /// Fetches live tweets, optionally scoped to a targeting context.
    ///
    /// `ai_keywords` asks the backend to expand the context into search
    /// keywords before querying.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] on network failure or non-2xx HTTP status.
    /// - [`ApiError::Deserialize`] on an unexpected response shape.
    pub async fn get_live_tweets(
        &self,
        search_context: Option<&str>,
        ai_keywords: bool,
    ) -> Result<Vec<Tweet>, ApiError> {
        let ai = if ai_keywords { "true" } else { "false" };
        let mut params = vec![("ai_keywords", ai)];
        if let Some(context) = search_context {
            params.push(("search_context", context));
        }
        let url = self.endpoint_url("live-tweets", &params)?;
        let envelope: TweetsResponse = self.get_json(url, "GET /live-tweets").await?;
        Ok(envelope.tweets)
    }

    /// Fetches startup news, optionally scoped to a targeting context.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] on network failure or non-2xx HTTP status.
    /// - [`ApiError::Deserialize`] on an unexpected response shape.
    pub async fn get_startup_news(&self, context: Option<&str>) -> Result<Vec<NewsItem>, ApiError> {
        let params: Vec<(&str, &str)> = context.map(|c| ("context", c)).into_iter().collect();
        let url = self.endpoint_url("startup-news", &params)?;
        let envelope: NewsResponse = self.get_json(url, "GET /startup-news").await?;
        Ok(envelope.news)
    }

    /// Fetches funding and M&A deals, optionally scoped to a targeting
    /// context.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] on network failure or non-2xx HTTP status.
    /// - [`ApiError::Deserialize`] on an unexpected response shape.
    pub async fn get_deals(&self, context: Option<&str>) -> Result<Vec<Deal>, ApiError> {
        let params: Vec<(&str, &str)> = context.map(|c| ("context", c)).into_iter().collect();
        let url = self.endpoint_url("deals", &params)?;
        let envelope: DealsResponse = self.get_json(url, "GET /deals").await?;
        Ok(envelope.deals)
    }

    /// Fetches market index ticks. The backend may legitimately return an
    /// empty sequence when the widget is disabled server-side.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] on network failure or non-2xx HTTP status.
    /// - [`ApiError::Deserialize`] on an unexpected response shape.
    pub async fn get_market_data(&self) -> Result<Vec<MarketTick>, ApiError> {
        let url = self.endpoint_url("market-data", &[])?;
        let envelope: MarketDataResponse = self.get_json(url, "GET /market-data").await?;
        Ok(envelope.market_data)
    }

    /// Fetches the flat dashboard statistics object.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] on network failure or non-2xx HTTP status.
    /// - [`ApiError::Deserialize`] on an unexpected response shape.
    pub async fn get_stats(&self) -> Result<DashboardStats, ApiError> {
        let url = self.endpoint_url("stats", &[])?;
        self.get_json(url, "GET /stats").await
    }

    /// Posts free-text content to the analysis endpoint.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] on network failure or non-2xx HTTP status.
    /// - [`ApiError::Deserialize`] on an unexpected response shape.
    pub async fn analyze_content(
        &self,
        content: &str,
        company_context: Option<&str>,
    ) -> Result<AnalysisOutcome, ApiError> {
        let url = self.endpoint_url("analyze-content", &[])?;
        let body = AnalysisRequest {
            content,
            company_context,
        };
        let response = self
            .client
            .post(url.clone())
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ApiError::Deserialize {
            context: "POST /analyze-content".to_string(),
            source: e,
        })
    }

    /// Builds the full endpoint URL with percent-encoded query parameters.
    fn endpoint_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url, ApiError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| ApiError::InvalidUrl(format!("'{endpoint}': {e}")))?;
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the
    /// response body as JSON into `T`.
    async fn get_json<T: DeserializeOwned>(&self, url: Url, context: &str) -> Result<T, ApiError> {
        let response = self.client.get(url).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(backend_url: &str) -> ApiClient {
        ApiClient::new(backend_url, 30).expect("client construction should not fail")
    }

    #[test]
    fn endpoint_url_appends_api_prefix() {
        let client = test_client("http://localhost:8000");
        let url = client.endpoint_url("leads", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/leads");
    }

    #[test]
    fn endpoint_url_strips_trailing_slash() {
        let client = test_client("http://localhost:8000/");
        let url = client
            .endpoint_url("leads", &[("role", "CEO"), ("min_score", "7")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/leads?role=CEO&min_score=7"
        );
    }

    #[test]
    fn endpoint_url_encodes_special_characters() {
        let client = test_client("http://localhost:8000");
        let url = client
            .endpoint_url("leads", &[("context", "founders scaling GPUs & fintech")])
            .unwrap();
        assert!(
            url.as_str().contains("founders+scaling+GPUs+%26+fintech")
                || url.as_str().contains("founders%20scaling%20GPUs%20%26%20fintech"),
            "query param should be percent-encoded: {url}"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = ApiClient::new("not a url", 30).unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }
}
