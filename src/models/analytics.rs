use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::trend::{CategorySummary, ScorePoint, VolumePoint};

/// Window-level stats computed upstream. Every field is optional on the wire;
/// absence means zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    #[serde(default)]
    pub total_comments: i64,
    #[serde(default)]
    pub positive_count: i64,
    #[serde(default)]
    pub negative_count: i64,
    #[serde(default)]
    pub neutral_count: i64,
    #[serde(default)]
    pub mixed_count: i64,
    #[serde(default)]
    pub avg_sentiment_score: f64,
    #[serde(default)]
    pub avg_confidence: f64,
}

/// Keyword ranking entry. Ranking is computed upstream; this shape is passed
/// through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopKeyword {
    pub keyword: String,
    #[serde(default)]
    pub frequency: i64,
    #[serde(default)]
    pub sentiments: HashMap<String, i64>,
}

/// Aggregated trend payload: daily series plus per-category highlights.
#[derive(Debug, Clone, Serialize)]
pub struct TrendAnalytics {
    pub volume: Vec<VolumePoint>,
    pub score: Vec<ScorePoint>,
    pub highlights: Vec<CategorySummary>,
}

/// Combined payload for the dashboard landing view.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardPayload {
    pub summary: AnalyticsSummary,
    pub trend: TrendAnalytics,
}
