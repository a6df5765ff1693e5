use tracing::{debug, warn};

use crate::error::TransformError;
use crate::reshape::calendar::{calendar_year, iso_week_number};
use crate::reshape::countries::extract_countries;
use crate::reshape::types::RawDocument;
use crate::stats::{ReshapedDocument, StatRecord};

/// Rebuilds the raw aggregation as `year -> country -> iso week -> record`.
///
/// Every year receives an (initially empty) slot for each entry of
/// `countries`, whether or not that country has data in the year. Weeks are
/// filed under their yearly bucket's calendar year even when the ISO week
/// belongs to the neighbouring ISO week-year.
///
/// # Errors
///
/// Returns [`TransformError::TimestampOutOfRange`] if a bucket key cannot be
/// converted to a UTC date.
pub fn reshape(
    doc: &RawDocument,
    countries: &[String],
) -> Result<ReshapedDocument, TransformError> {
    let mut result = ReshapedDocument::new();

    for yearly in doc.yearly() {
        let year = calendar_year(yearly.key())?;

        if result.reset_year(year, countries.iter().map(String::as_str)) {
            warn!(year, key = yearly.key(), "Duplicate yearly bucket, previous weeks discarded");
        }

        for weekly in yearly.weekly() {
            let week = iso_week_number(weekly.key())?;
            debug!(
                year,
                week,
                countries = weekly.countries().len(),
                "Reshaping weekly bucket"
            );

            for bucket in weekly.countries() {
                result.insert(year, bucket.country(), week, StatRecord::from(bucket));
            }
        }
    }

    Ok(result)
}

/// Runs both passes: country extraction, then the reshape traversal.
#[tracing::instrument(skip_all, fields(yearly_buckets = doc.yearly().len()))]
pub fn transform(doc: &RawDocument) -> Result<ReshapedDocument, TransformError> {
    let countries = extract_countries(doc);
    debug!(countries = countries.len(), "Country set extracted");

    reshape(doc, &countries)
}
