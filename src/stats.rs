use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::collections::BTreeMap;

use crate::reshape::types::RawCountryBucket;

/// Weekly distance statistics for one country.
///
/// Distances keep the exact number token of the source document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatRecord {
    pub distance_avg: Option<Number>,
    pub distance_med: Option<Number>,

    // flights above each distance threshold
    pub count_above_50km: u64,
    pub count_above_100km: u64,
    pub count_above_150km: u64,
    pub count_above_200km: u64,
}

impl From<&RawCountryBucket> for StatRecord {
    fn from(bucket: &RawCountryBucket) -> Self {
        StatRecord {
            distance_avg: bucket.distance_avg.value.clone(),
            distance_med: bucket.distance_med.value.clone(),
            count_above_50km: bucket.count_above_50km.doc_count,
            count_above_100km: bucket.count_above_100km.doc_count,
            count_above_150km: bucket.count_above_150km.doc_count,
            count_above_200km: bucket.count_above_200km.doc_count,
        }
    }
}

impl StatRecord {
    pub fn avg_km(&self) -> Option<f64> {
        self.distance_avg.as_ref().and_then(Number::as_f64)
    }

    pub fn median_km(&self) -> Option<f64> {
        self.distance_med.as_ref().and_then(Number::as_f64)
    }
}

/// Weeks of one country, keyed by ISO week number.
pub type WeeklyStats = BTreeMap<u32, StatRecord>;

/// Countries of one year, keyed by country code.
pub type CountryStats = BTreeMap<String, WeeklyStats>;

/// Statistics indexed as `year -> country -> iso week -> record`.
///
/// Serializes as a plain JSON object; integer keys become strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReshapedDocument {
    years: BTreeMap<i32, CountryStats>,
}

/// Counts reported once a document has been reshaped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReshapeSummary {
    pub years: usize,
    pub countries: usize,
    pub records: usize,
}

impl ReshapedDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the entry for `year` with one empty slot per country.
    ///
    /// Returns `true` if the year was already present.
    pub fn reset_year<'a>(
        &mut self,
        year: i32,
        countries: impl IntoIterator<Item = &'a str>,
    ) -> bool {
        let slots = countries
            .into_iter()
            .map(|c| (c.to_string(), WeeklyStats::new()))
            .collect();
        self.years.insert(year, slots).is_some()
    }

    /// Stores `record` at `[year][country][week]`, overwriting any previous one.
    pub fn insert(&mut self, year: i32, country: &str, week: u32, record: StatRecord) {
        self.years
            .entry(year)
            .or_default()
            .entry(country.to_string())
            .or_default()
            .insert(week, record);
    }

    pub fn year(&self, year: i32) -> Option<&CountryStats> {
        self.years.get(&year)
    }

    pub fn get(&self, year: i32, country: &str, week: u32) -> Option<&StatRecord> {
        self.years.get(&year)?.get(country)?.get(&week)
    }

    pub fn years(&self) -> impl Iterator<Item = (i32, &CountryStats)> {
        self.years.iter().map(|(y, c)| (*y, c))
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn record_count(&self) -> usize {
        self.years
            .values()
            .flat_map(|countries| countries.values())
            .map(|weeks| weeks.len())
            .sum()
    }

    pub fn summary(&self) -> ReshapeSummary {
        ReshapeSummary {
            years: self.years.len(),
            countries: self
                .years
                .values()
                .map(|countries| countries.len())
                .max()
                .unwrap_or(0),
            records: self.record_count(),
        }
    }
}
