use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{ScorePoint, TrendRecord, VolumePoint};

#[derive(Debug, Default)]
struct DayBucket {
    count: i64,
    score_sum: f64,
    samples: u32,
}

/// Group trend records into chronological daily series.
///
/// Volume sums `count` per calendar day. Score is the unweighted arithmetic
/// mean of `avg_score` per day: each record contributes one sample regardless
/// of its own count (deliberate, see the category summarizer for the same
/// choice). Output is sorted by calendar date ascending with no duplicates.
pub fn aggregate_daily(records: &[TrendRecord]) -> (Vec<VolumePoint>, Vec<ScorePoint>) {
    // BTreeMap keyed on NaiveDate gives calendar ordering for free and avoids
    // lexicographic date comparisons across month/year boundaries.
    let mut buckets: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();

    for record in records {
        let bucket = buckets.entry(record.date).or_default();
        bucket.count += record.count;
        bucket.score_sum += record.avg_score;
        bucket.samples += 1;
    }

    let volume = buckets
        .iter()
        .map(|(date, bucket)| VolumePoint {
            date: *date,
            count: bucket.count,
        })
        .collect();

    let score = buckets
        .iter()
        .map(|(date, bucket)| ScorePoint {
            date: *date,
            score: round2(bucket.score_sum / bucket.samples as f64),
        })
        .collect();

    (volume, score)
}

/// Round to two decimals for display stability.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, sentiment: &str, count: i64, avg_score: f64) -> TrendRecord {
        TrendRecord {
            date: date.parse().unwrap(),
            sentiment: sentiment.to_string(),
            count,
            avg_score,
        }
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let (volume, score) = aggregate_daily(&[]);
        assert!(volume.is_empty());
        assert!(score.is_empty());
    }

    #[test]
    fn test_worked_example() {
        let records = vec![
            record("2024-01-01", "positive", 3, 0.8),
            record("2024-01-01", "negative", 1, -0.5),
            record("2024-01-02", "positive", 2, 0.6),
        ];

        let (volume, score) = aggregate_daily(&records);

        assert_eq!(volume.len(), 2);
        assert_eq!(volume[0].date, "2024-01-01".parse().unwrap());
        assert_eq!(volume[0].count, 4);
        assert_eq!(volume[1].count, 2);

        // Mean of 0.8 and -0.5 is 0.15, unweighted by count
        assert_eq!(score[0].score, 0.15);
        assert_eq!(score[1].score, 0.6);
    }

    #[test]
    fn test_volume_conserves_total_count() {
        let records = vec![
            record("2024-03-10", "positive", 5, 0.4),
            record("2024-03-10", "neutral", 2, 0.0),
            record("2024-03-12", "negative", 7, -0.6),
            record("2024-03-11", "mixed", 1, 0.1),
        ];

        let input_total: i64 = records.iter().map(|r| r.count).sum();
        let (volume, _) = aggregate_daily(&records);
        let output_total: i64 = volume.iter().map(|p| p.count).sum();

        assert_eq!(input_total, output_total);
    }

    #[test]
    fn test_dates_sorted_by_calendar_not_string_order() {
        // Unsorted input spanning a year boundary
        let records = vec![
            record("2024-01-02", "positive", 1, 0.1),
            record("2023-12-31", "positive", 1, 0.2),
            record("2024-01-01", "positive", 1, 0.3),
        ];

        let (volume, score) = aggregate_daily(&records);

        let dates: Vec<NaiveDate> = volume.iter().map(|p| p.date).collect();
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(dates[0], "2023-12-31".parse().unwrap());
        assert_eq!(volume.len(), score.len());
    }

    #[test]
    fn test_no_duplicate_dates() {
        let records = vec![
            record("2024-05-01", "positive", 2, 0.5),
            record("2024-05-01", "negative", 3, -0.5),
            record("2024-05-01", "neutral", 1, 0.0),
        ];

        let (volume, score) = aggregate_daily(&records);

        assert_eq!(volume.len(), 1);
        assert_eq!(volume[0].count, 6);
        assert_eq!(score[0].score, 0.0);
    }
}
