//! JSON parser for the raw aggregation response.

use std::path::Path;

use tracing::debug;

use crate::error::TransformError;
use crate::reshape::types::RawDocument;

/// Decodes a [`RawDocument`] from raw bytes.
///
/// # Errors
///
/// Returns [`TransformError::Malformed`] if the bytes are not valid JSON and
/// [`TransformError::Structure`] if the JSON lacks an expected nesting level
/// or statistic field.
pub fn parse_document(bytes: &[u8]) -> Result<RawDocument, TransformError> {
    serde_json::from_slice(bytes).map_err(TransformError::from_decode)
}

/// Reads and decodes the document at `path`.
///
/// The file is read in full and closed before decoding starts.
pub fn load_document(path: &Path) -> Result<RawDocument, TransformError> {
    let bytes = std::fs::read(path).map_err(|source| TransformError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;

    let doc = parse_document(&bytes)?;
    debug!(path = %path.display(), yearly_buckets = doc.yearly().len(), "Document parsed");

    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "aggregations": {
            "statistics_yearly": {
                "buckets": [{
                    "key": 1655251200000,
                    "key_as_string": "2022-01-01T00:00:00.000Z",
                    "doc_count": 4,
                    "statistics_weekly": {
                        "buckets": [{
                            "key": 1655683200000,
                            "group_by_country": {
                                "doc_count_error_upper_bound": 0,
                                "sum_other_doc_count": 0,
                                "buckets": [{
                                    "key": "FR",
                                    "distance_avg": {"value": 120.5},
                                    "distance_med": {"value": 100.0},
                                    "count_above_50km": {"doc_count": 3},
                                    "count_above_100km": {"doc_count": 3},
                                    "count_above_150km": {"doc_count": 3},
                                    "count_above_200km": {"doc_count": 3}
                                }]
                            }
                        }]
                    }
                }]
            }
        }
    }"#;

    #[test]
    fn test_parse_valid_minimal_document() {
        let doc = parse_document(MINIMAL.as_bytes()).unwrap();
        assert_eq!(doc.yearly().len(), 1);
        assert_eq!(doc.yearly()[0].weekly()[0].countries()[0].country(), "FR");
    }

    #[test]
    fn test_parse_empty_bytes_is_malformed() {
        let err = parse_document(&[]).unwrap_err();
        assert!(matches!(err, TransformError::Malformed(_)));
    }

    #[test]
    fn test_parse_invalid_json_is_malformed() {
        let err = parse_document(b"aggregations: none").unwrap_err();
        assert!(matches!(err, TransformError::Malformed(_)));
    }

    #[test]
    fn test_parse_wrong_shape_is_structural() {
        let err = parse_document(br#"{"not": "the expected shape"}"#).unwrap_err();
        assert!(matches!(err, TransformError::Structure(_)));
    }

    #[test]
    fn test_parse_missing_weekly_level_is_structural() {
        let json = r#"{"aggregations": {"statistics_yearly": {"buckets": [{"key": 0}]}}}"#;
        let err = parse_document(json.as_bytes()).unwrap_err();
        assert!(err.is_structural());
        assert!(err.to_string().contains("statistics_weekly"));
    }

    #[test]
    fn test_parse_missing_country_key_is_structural() {
        let json = MINIMAL.replace(r#""key": "FR","#, "");
        let err = parse_document(json.as_bytes()).unwrap_err();
        assert!(err.is_structural());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_document(Path::new("/nonexistent/xcontest_stats.json")).unwrap_err();
        assert!(matches!(err, TransformError::ReadInput { .. }));
    }

    #[test]
    fn test_load_document_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw.json");
        std::fs::write(&path, MINIMAL).unwrap();

        let doc = load_document(&path).unwrap();
        assert_eq!(doc.yearly()[0].key(), 1_655_251_200_000);
    }
}
