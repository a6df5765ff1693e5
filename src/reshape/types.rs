//! Data types for the raw Elasticsearch aggregation response.
//!
//! Only the paths the reshape reads are modelled; every other field the
//! search backend returns (`took`, `hits`, `doc_count`, `key_as_string`, ...)
//! is ignored during deserialization.

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Top-level search response carrying the yearly aggregation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawDocument {
    pub(crate) aggregations: RawAggregations,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawAggregations {
    pub(crate) statistics_yearly: Buckets<RawYearlyBucket>,
}

/// Elasticsearch wraps every bucket list in a `{"buckets": [...]}` object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Buckets<T> {
    pub(crate) buckets: Vec<T>,
}

/// One year of statistics, keyed by the epoch millis of the year start.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawYearlyBucket {
    pub(crate) key: i64,
    pub(crate) statistics_weekly: Buckets<RawWeeklyBucket>,
}

/// One week of statistics, keyed by the epoch millis of the week start.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawWeeklyBucket {
    pub(crate) key: i64,
    pub(crate) group_by_country: Buckets<RawCountryBucket>,
}

/// Per-country metrics for a single week.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawCountryBucket {
    pub(crate) key: String,
    pub(crate) distance_avg: MetricValue,
    pub(crate) distance_med: MetricValue,
    pub(crate) count_above_50km: DocCount,
    pub(crate) count_above_100km: DocCount,
    pub(crate) count_above_150km: DocCount,
    pub(crate) count_above_200km: DocCount,
}

/// Single-value metric aggregation (`avg`, `median_absolute_deviation`, ...).
///
/// The backend reports `null` for a metric over an empty set, so the value is
/// optional, but the `value` key itself must be present. The number is kept
/// as its original JSON token.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetricValue {
    #[serde(deserialize_with = "Option::deserialize")]
    pub(crate) value: Option<Number>,
}

/// Filter aggregation result; only the matching document count is read.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct DocCount {
    pub(crate) doc_count: u64,
}

impl RawDocument {
    pub fn yearly(&self) -> &[RawYearlyBucket] {
        &self.aggregations.statistics_yearly.buckets
    }
}

impl RawYearlyBucket {
    pub fn key(&self) -> i64 {
        self.key
    }

    pub fn weekly(&self) -> &[RawWeeklyBucket] {
        &self.statistics_weekly.buckets
    }
}

impl RawWeeklyBucket {
    pub fn key(&self) -> i64 {
        self.key
    }

    pub fn countries(&self) -> &[RawCountryBucket] {
        &self.group_by_country.buckets
    }
}

impl RawCountryBucket {
    pub fn country(&self) -> &str {
        &self.key
    }
}
