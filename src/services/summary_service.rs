use std::collections::HashMap;

use crate::models::{CategorySummary, TrendRecord};
use crate::services::trend_service::round2;

#[derive(Debug, Default)]
struct CategoryBucket {
    total_count: i64,
    score_sum: f64,
    samples: u32,
}

/// Roll up trend records per sentiment category across the whole window.
///
/// Blank or missing sentiment labels fold into `"unknown"`; no category is
/// silently dropped. The mean score is unweighted: one sample per record,
/// ignoring that record's comment count. Output is sorted by descending total
/// count, ties broken by category name for stable display.
pub fn summarize_categories(records: &[TrendRecord]) -> Vec<CategorySummary> {
    let mut buckets: HashMap<String, CategoryBucket> = HashMap::new();

    for record in records {
        let bucket = buckets.entry(record.category().to_string()).or_default();
        bucket.total_count += record.count;
        bucket.score_sum += record.avg_score;
        bucket.samples += 1;
    }

    let mut summaries: Vec<CategorySummary> = buckets
        .into_iter()
        .map(|(category, bucket)| CategorySummary {
            category,
            total_count: bucket.total_count,
            mean_score: round2(bucket.score_sum / bucket.samples as f64),
        })
        .collect();

    summaries.sort_by(|a, b| {
        b.total_count
            .cmp(&a.total_count)
            .then_with(|| a.category.cmp(&b.category))
    });

    summaries
}
