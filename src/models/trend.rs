use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Bucket for records whose sentiment label is missing or blank.
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// One backend-reported sentiment observation: how many comments landed on a
/// given day with a given sentiment label, and their average score.
///
/// The upstream store occasionally emits nulls or stringly-typed numbers for
/// `count` / `avg_score`; those deserialize to 0 rather than failing the whole
/// payload. This is presentation data, not a ledger.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrendRecord {
    pub date: NaiveDate,
    #[serde(default)]
    pub sentiment: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub count: i64,
    #[serde(default, deserialize_with = "lenient_score")]
    pub avg_score: f64,
}

impl TrendRecord {
    /// Sentiment label with blanks folded into the `"unknown"` bucket.
    pub fn category(&self) -> &str {
        let trimmed = self.sentiment.trim();
        if trimmed.is_empty() {
            UNKNOWN_CATEGORY
        } else {
            trimmed
        }
    }
}

/// Total comment count for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumePoint {
    pub date: NaiveDate,
    pub count: i64,
}

/// Unweighted mean of `avg_score` across the records of one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorePoint {
    pub date: NaiveDate,
    pub score: f64,
}

/// Per-sentiment rollup across the whole query window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub category: String,
    pub total_count: i64,
    pub mean_score: f64,
}

fn lenient_count<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let n = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse::<i64>().unwrap_or(0),
        _ => 0,
    };
    // Counts are non-negative by contract
    Ok(n.max(0))
}

fn lenient_score<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_numeric_fields_default_to_zero() {
        let record: TrendRecord = serde_json::from_str(
            r#"{"date": "2024-01-05", "sentiment": "positive", "count": null, "avg_score": "oops"}"#,
        )
        .unwrap();

        assert_eq!(record.count, 0);
        assert_eq!(record.avg_score, 0.0);
    }

    #[test]
    fn test_missing_numeric_fields_default_to_zero() {
        let record: TrendRecord =
            serde_json::from_str(r#"{"date": "2024-01-05", "sentiment": "negative"}"#).unwrap();

        assert_eq!(record.count, 0);
        assert_eq!(record.avg_score, 0.0);
    }

    #[test]
    fn test_stringly_typed_numbers_are_accepted() {
        let record: TrendRecord = serde_json::from_str(
            r#"{"date": "2024-01-05", "sentiment": "mixed", "count": "7", "avg_score": "-0.25"}"#,
        )
        .unwrap();

        assert_eq!(record.count, 7);
        assert_eq!(record.avg_score, -0.25);
    }

    #[test]
    fn test_negative_count_clamped() {
        let record: TrendRecord = serde_json::from_str(
            r#"{"date": "2024-01-05", "sentiment": "neutral", "count": -3, "avg_score": 0.1}"#,
        )
        .unwrap();

        assert_eq!(record.count, 0);
    }

    #[test]
    fn test_blank_sentiment_maps_to_unknown() {
        let record: TrendRecord = serde_json::from_str(
            r#"{"date": "2024-01-05", "sentiment": "  ", "count": 1, "avg_score": 0.0}"#,
        )
        .unwrap();

        assert_eq!(record.category(), UNKNOWN_CATEGORY);
    }
}
