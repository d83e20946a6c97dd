use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::{AnalyticsSummary, DashboardPayload, TopKeyword, TrendAnalytics};
use crate::services::{summary_service, trend_service};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/summary", get(get_summary))
        .route("/trend", get(get_trend))
        .route("/keywords", get(get_keywords))
        .route("/dashboard", get(get_dashboard))
}

#[derive(Debug, Deserialize)]
struct PeriodQuery {
    days: Option<u32>,
}

impl PeriodQuery {
    fn days_or(&self, default: u32) -> u32 {
        // Cap at one year; the upstream store keeps no more anyway
        self.days.unwrap_or(default).clamp(1, 365)
    }
}

#[derive(Debug, Deserialize)]
struct KeywordQuery {
    sentiment: Option<String>,
    limit: Option<u32>,
}

async fn get_summary(
    Query(params): Query<PeriodQuery>,
    State(state): State<AppState>,
) -> Result<Json<AnalyticsSummary>, AppError> {
    let days = params.days_or(7);
    info!("GET /api/analytics/summary days={}", days);

    let summary = state.analytics.fetch_summary(days).await?;
    Ok(Json(summary))
}

async fn get_trend(
    Query(params): Query<PeriodQuery>,
    State(state): State<AppState>,
) -> Result<Json<TrendAnalytics>, AppError> {
    let days = params.days_or(30);
    info!("GET /api/analytics/trend days={}", days);

    let records = state.analytics.fetch_trend(days).await?;
    Ok(Json(aggregate(records)))
}

async fn get_keywords(
    Query(params): Query<KeywordQuery>,
    State(state): State<AppState>,
) -> Result<Json<Vec<TopKeyword>>, AppError> {
    let limit = params.limit.unwrap_or(10).clamp(1, 100);
    let sentiment = params
        .sentiment
        .as_deref()
        .filter(|s| !s.is_empty() && *s != "all");
    info!("GET /api/analytics/keywords limit={}", limit);

    let keywords = state.analytics.fetch_keywords(sentiment, limit).await?;
    Ok(Json(keywords))
}

async fn get_dashboard(
    Query(params): Query<PeriodQuery>,
    State(state): State<AppState>,
) -> Result<Json<DashboardPayload>, AppError> {
    let days = params.days_or(7);
    info!("GET /api/analytics/dashboard days={}", days);

    let (summary, records) = futures::try_join!(
        state.analytics.fetch_summary(days),
        state.analytics.fetch_trend(days),
    )?;

    Ok(Json(DashboardPayload {
        summary,
        trend: aggregate(records),
    }))
}

fn aggregate(records: Vec<crate::models::TrendRecord>) -> TrendAnalytics {
    let (volume, score) = trend_service::aggregate_daily(&records);
    let highlights = summary_service::summarize_categories(&records);

    TrendAnalytics {
        volume,
        score,
        highlights,
    }
}
