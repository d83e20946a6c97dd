use async_trait::async_trait;

use super::ProviderError;
use crate::models::{AnalyticsSummary, TopKeyword, TrendRecord};

/// Read-side collaborator: the upstream analytics store that scores and
/// buckets comments. Only its JSON contract is consumed here; sentiment
/// scoring and keyword ranking happen on its side.
#[async_trait]
pub trait AnalyticsProvider: Send + Sync {
    async fn fetch_summary(&self, days: u32) -> Result<AnalyticsSummary, ProviderError>;

    async fn fetch_trend(&self, days: u32) -> Result<Vec<TrendRecord>, ProviderError>;

    async fn fetch_keywords(
        &self,
        sentiment: Option<&str>,
        limit: u32,
    ) -> Result<Vec<TopKeyword>, ProviderError>;
}
