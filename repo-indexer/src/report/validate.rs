//! Structural validation of a written report.

use super::error::ValidationError;
use serde_json::Value;

const REQUIRED_METADATA_KEYS: [&str; 3] = ["generated_at", "organization", "total_repositories"];

/// Checks the shape of a parsed report document.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered.
pub fn validate_document(document: &Value) -> Result<(), ValidationError> {
    let metadata = document
        .get("metadata")
        .ok_or(ValidationError::MissingSection("metadata"))?;
    let repositories = document
        .get("repositories")
        .ok_or(ValidationError::MissingSection("repositories"))?
        .as_array()
        .ok_or(ValidationError::RepositoriesNotArray)?;

    for key in REQUIRED_METADATA_KEYS {
        if metadata.get(key).is_none() {
            return Err(ValidationError::MissingMetadataKey(key));
        }
    }

    let expected = metadata["total_repositories"]
        .as_u64()
        .ok_or(ValidationError::InvalidTotal)?;
    let actual = repositories.len();
    if actual as u64 != expected {
        return Err(ValidationError::CountMismatch { actual, expected });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(total: Value, repositories: Value) -> Value {
        json!({
            "metadata": {
                "generated_at": "2024-01-01T00:00:00Z",
                "organization": "acme",
                "total_repositories": total,
            },
            "repositories": repositories,
        })
    }

    #[test]
    fn accepts_consistent_document() {
        let doc = document(json!(2), json!([{}, {}]));
        assert_eq!(validate_document(&doc), Ok(()));
    }

    #[test]
    fn rejects_count_mismatch() {
        let doc = document(json!(3), json!([{}, {}]));
        assert_eq!(
            validate_document(&doc),
            Err(ValidationError::CountMismatch {
                actual: 2,
                expected: 3
            })
        );
    }

    #[test]
    fn rejects_missing_sections() {
        let doc = json!({ "repositories": [] });
        assert_eq!(
            validate_document(&doc),
            Err(ValidationError::MissingSection("metadata"))
        );

        let doc = json!({ "metadata": {} });
        assert_eq!(
            validate_document(&doc),
            Err(ValidationError::MissingSection("repositories"))
        );
    }

    #[test]
    fn rejects_non_array_repositories() {
        let doc = document(json!(0), json!({}));
        assert_eq!(
            validate_document(&doc),
            Err(ValidationError::RepositoriesNotArray)
        );
    }

    #[test]
    fn rejects_missing_metadata_key() {
        let doc = json!({
            "metadata": { "generated_at": "2024-01-01T00:00:00Z", "total_repositories": 0 },
            "repositories": [],
        });
        assert_eq!(
            validate_document(&doc),
            Err(ValidationError::MissingMetadataKey("organization"))
        );
    }

    #[test]
    fn rejects_non_integer_total() {
        let doc = document(json!("two"), json!([]));
        assert_eq!(validate_document(&doc), Err(ValidationError::InvalidTotal));
    }
}
