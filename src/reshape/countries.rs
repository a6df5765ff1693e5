use std::collections::BTreeSet;

use crate::reshape::types::RawDocument;

/// Collects every country code found in any week of any year.
///
/// The result is deduplicated and sorted lexicographically.
pub fn extract_countries(doc: &RawDocument) -> Vec<String> {
    let countries: BTreeSet<&str> = doc
        .yearly()
        .iter()
        .flat_map(|year| year.weekly())
        .flat_map(|week| week.countries())
        .map(|bucket| bucket.country())
        .collect();

    countries.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn country(key: &str) -> serde_json::Value {
        json!({
            "key": key,
            "distance_avg": {"value": 1.0},
            "distance_med": {"value": 1.0},
            "count_above_50km": {"doc_count": 0},
            "count_above_100km": {"doc_count": 0},
            "count_above_150km": {"doc_count": 0},
            "count_above_200km": {"doc_count": 0}
        })
    }

    fn document(years: Vec<Vec<Vec<&str>>>) -> RawDocument {
        let yearly: Vec<_> = years
            .into_iter()
            .enumerate()
            .map(|(y, weeks)| {
                let weekly: Vec<_> = weeks
                    .into_iter()
                    .enumerate()
                    .map(|(w, codes)| {
                        json!({
                            "key": w as i64 * 604_800_000,
                            "group_by_country": {
                                "buckets": codes.into_iter().map(country).collect::<Vec<_>>()
                            }
                        })
                    })
                    .collect();
                json!({
                    "key": y as i64 * 31_536_000_000,
                    "statistics_weekly": {"buckets": weekly}
                })
            })
            .collect();

        serde_json::from_value(json!({
            "aggregations": {"statistics_yearly": {"buckets": yearly}}
        }))
        .unwrap()
    }

    #[test]
    fn test_extract_from_empty_document() {
        let doc = document(vec![]);
        assert!(extract_countries(&doc).is_empty());
    }

    #[test]
    fn test_extract_sorted_and_unique() {
        let doc = document(vec![
            vec![vec!["FR", "CH"], vec!["CH", "AT"]],
            vec![vec!["IT"], vec![], vec!["FR", "BR"]],
        ]);

        assert_eq!(extract_countries(&doc), vec!["AT", "BR", "CH", "FR", "IT"]);
    }

    #[test]
    fn test_single_occurrence_is_kept() {
        let doc = document(vec![vec![vec!["CH"]], vec![vec!["CH"], vec!["NZ"]]]);
        assert!(extract_countries(&doc).contains(&"NZ".to_string()));
    }

    #[test]
    fn test_ordering_is_bytewise() {
        let doc = document(vec![vec![vec!["b", "B", "a", "A"]]]);
        assert_eq!(extract_countries(&doc), vec!["A", "B", "a", "b"]);
    }
}
