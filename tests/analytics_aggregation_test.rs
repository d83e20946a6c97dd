//! Aggregation invariants over raw sentiment trend records: count
//! conservation, calendar ordering and unweighted means.

use chrono::NaiveDate;

use commentpulse_backend::models::TrendRecord;
use commentpulse_backend::services::{summary_service, trend_service};

fn record(date: &str, sentiment: &str, count: i64, avg_score: f64) -> TrendRecord {
    TrendRecord {
        date: date.parse().unwrap(),
        sentiment: sentiment.to_string(),
        count,
        avg_score,
    }
}

fn sample_window() -> Vec<TrendRecord> {
    vec![
        record("2024-02-27", "positive", 14, 0.62),
        record("2024-02-27", "negative", 3, -0.41),
        record("2024-02-27", "neutral", 6, 0.02),
        record("2024-02-28", "positive", 9, 0.55),
        record("2024-02-28", "mixed", 2, 0.13),
        record("2024-02-29", "negative", 11, -0.72),
        record("2024-03-01", "positive", 4, 0.38),
        record("2024-03-01", "", 1, 0.0),
    ]
}

#[test]
fn volume_conserves_the_total_count() {
    let records = sample_window();
    let input_total: i64 = records.iter().map(|r| r.count).sum();

    let (volume, _) = trend_service::aggregate_daily(&records);
    let output_total: i64 = volume.iter().map(|p| p.count).sum();

    assert_eq!(input_total, output_total);
}

#[test]
fn series_are_strictly_increasing_with_no_duplicate_dates() {
    let (volume, score) = trend_service::aggregate_daily(&sample_window());

    let volume_dates: Vec<NaiveDate> = volume.iter().map(|p| p.date).collect();
    let score_dates: Vec<NaiveDate> = score.iter().map(|p| p.date).collect();

    assert!(volume_dates.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(volume_dates, score_dates);
    // Leap day sorts between end of February and start of March
    assert_eq!(volume_dates[2], "2024-02-29".parse::<NaiveDate>().unwrap());
}

#[test]
fn daily_score_is_the_unweighted_mean() {
    let (_, score) = trend_service::aggregate_daily(&sample_window());

    // 2024-02-27: (0.62 - 0.41 + 0.02) / 3 = 0.0766... -> 0.08
    assert_eq!(score[0].score, 0.08);
    // 2024-02-28: (0.55 + 0.13) / 2 = 0.34
    assert_eq!(score[1].score, 0.34);
}

#[test]
fn category_totals_conserve_the_input_and_keep_the_unknown_bucket() {
    let records = sample_window();
    let input_total: i64 = records.iter().map(|r| r.count).sum();

    let summaries = summary_service::summarize_categories(&records);
    let output_total: i64 = summaries.iter().map(|s| s.total_count).sum();

    assert_eq!(input_total, output_total);
    assert!(summaries.iter().any(|s| s.category == "unknown"));
}

#[test]
fn aggregation_is_referentially_transparent() {
    let records = sample_window();

    let first = trend_service::aggregate_daily(&records);
    let second = trend_service::aggregate_daily(&records);

    assert_eq!(first.0, second.0);
    assert_eq!(first.1, second.1);
}

#[test]
fn consumed_trend_payload_aggregates_fail_soft() {
    // Payload with nulls and stringly-typed numbers, as the upstream store
    // sometimes emits
    let records: Vec<TrendRecord> = serde_json::from_str(
        r#"[
            {"date": "2024-01-01", "sentiment": "positive", "count": 3, "avg_score": 0.8},
            {"date": "2024-01-01", "sentiment": "negative", "count": null, "avg_score": "-0.5"},
            {"date": "2024-01-02", "sentiment": "positive", "count": 2}
        ]"#,
    )
    .unwrap();

    let (volume, score) = trend_service::aggregate_daily(&records);

    assert_eq!(volume[0].count, 3);
    assert_eq!(volume[1].count, 2);
    // Mean of 0.8 and -0.5 on day one
    assert_eq!(score[0].score, 0.15);
    assert_eq!(score[1].score, 0.0);
}
