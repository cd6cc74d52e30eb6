//! Error types for identifier resolution.

use thiserror::Error;

/// Errors that can occur while resolving identifiers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The catalog does not know the identifier.
    #[error("Identifier not found: {0}")]
    IdentifierNotFound(String),

    /// Error from the underlying catalog.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// The catalog answered with a value the model rejects.
    #[error("Invalid model value: {0}")]
    Model(#[from] gooddata_model::ModelError),
}

/// Result type for resolver operations.
pub type ResolveResult<T> = std::result::Result<T, ResolveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_identifier_not_found() {
        let err = ResolveError::IdentifierNotFound("label.region".to_string());
        assert_eq!(err.to_string(), "Identifier not found: label.region");
    }

    #[test]
    fn test_error_display_catalog() {
        let err = ResolveError::Catalog("503 Service Unavailable".to_string());
        assert_eq!(err.to_string(), "Catalog error: 503 Service Unavailable");
    }

    #[test]
    fn test_error_from_model_error() {
        let model_err = gooddata_model::UriObjQualifier::new("").unwrap_err();
        let err: ResolveError = model_err.into();
        assert!(matches!(err, ResolveError::Model(_)));
        assert_eq!(err.to_string(), "Invalid model value: uri may not be empty");
    }
}
