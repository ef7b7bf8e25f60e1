use thiserror::Error;

/// Failure reaching or reading the remote pricing catalog. Never retried.
#[derive(Debug, Error)]
pub enum CatalogFetchError {
    #[error("Failed to reach pricing catalog at {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: ureq::Error,
    },

    #[error("Pricing catalog request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    #[error("Pricing catalog response was not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed pricing catalog: {reason}")]
    Malformed { reason: String },
}

/// Every error the library surfaces; callers branch on the variant.
#[derive(Debug, Error)]
pub enum EstimateError {
    #[error(transparent)]
    CatalogFetch(#[from] CatalogFetchError),

    #[error("Model \"{model}\" was not found in the pricing catalog")]
    ModelNotFound { model: String },

    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },
}

pub type Result<T, E = EstimateError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_not_found_display() {
        let e = EstimateError::ModelNotFound {
            model: "openai/gpt-9".to_string(),
        };
        assert_eq!(
            e.to_string(),
            r#"Model "openai/gpt-9" was not found in the pricing catalog"#
        );
    }

    #[test]
    fn invalid_configuration_display() {
        let e = EstimateError::InvalidConfiguration {
            reason: "chars_per_token must be greater than 0 (got 0)".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "Invalid configuration: chars_per_token must be greater than 0 (got 0)"
        );
    }

    #[test]
    fn status_error_display() {
        let e = CatalogFetchError::Status {
            url: "https://example.test/models".to_string(),
            status: 503,
        };
        assert_eq!(
            e.to_string(),
            "Pricing catalog request to https://example.test/models failed with status 503"
        );
    }

    #[test]
    fn catalog_error_converts_transparently() {
        let inner = CatalogFetchError::Malformed {
            reason: "'data' is not an array".to_string(),
        };
        let outer: EstimateError = inner.into();
        assert!(matches!(outer, EstimateError::CatalogFetch(_)));
        assert_eq!(
            outer.to_string(),
            "Malformed pricing catalog: 'data' is not an array"
        );
    }
}
