use async_trait::async_trait;
use serde::Deserialize;

use super::analytics_provider::AnalyticsProvider;
use super::ProviderError;
use crate::models::{AnalyticsSummary, TopKeyword, TrendRecord};

/// Reqwest client for the upstream analytics API.
pub struct UpstreamAnalytics {
    client: reqwest::Client,
    base_url: String,
}

impl UpstreamAnalytics {
    pub fn from_env() -> Result<Self, ProviderError> {
        let base_url = std::env::var("UPSTREAM_API_URL")
            .map_err(|_| ProviderError::BadResponse("UPSTREAM_API_URL not set".into()))?;

        Ok(Self::new(base_url))
    }

    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_data<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T, ProviderError>
    where
        T: serde::de::DeserializeOwned + Default,
    {
        let url = format!("{}{}", self.base_url, path);

        let resp = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ProviderError::BadResponse(format!(
                "{} returned {}",
                path,
                resp.status()
            )));
        }

        let body = resp
            .json::<Envelope<T>>()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        Ok(body.data)
    }
}

// Upstream wraps every payload as { "data": ... }; a missing body maps to the
// payload's empty value.
#[derive(Debug, Deserialize)]
struct Envelope<T: Default> {
    #[serde(default)]
    data: T,
}

#[async_trait]
impl AnalyticsProvider for UpstreamAnalytics {
    async fn fetch_summary(&self, days: u32) -> Result<AnalyticsSummary, ProviderError> {
        self.get_data("/analytics/summary", &[("days", days.to_string())])
            .await
    }

    async fn fetch_trend(&self, days: u32) -> Result<Vec<TrendRecord>, ProviderError> {
        self.get_data("/analytics/sentiment-trend", &[("days", days.to_string())])
            .await
    }

    async fn fetch_keywords(
        &self,
        sentiment: Option<&str>,
        limit: u32,
    ) -> Result<Vec<TopKeyword>, ProviderError> {
        let mut query = vec![("limit", limit.to_string())];
        if let Some(sentiment) = sentiment {
            query.push(("sentiment", sentiment.to_string()));
        }

        self.get_data("/analytics/keywords", &query).await
    }
}
