//! Error types for model construction and access.

use thiserror::Error;

/// Errors raised while building or querying model values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A required argument was empty.
    #[error("{name} {message}")]
    IllegalArgument {
        /// Name of the offending field.
        name: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// The operation is not available on this kind of value.
    #[error("the method is not supported by the object: {0}")]
    UnsupportedOperation(&'static str),

    /// A value the payload guarantees is missing.
    #[error("{0} must not be null")]
    IllegalState(String),

    /// MAQL object reference could not be parsed.
    #[error("invalid object reference at position {position}: {message}")]
    InvalidReference {
        /// Position in the input where parsing stopped.
        position: usize,
        /// Description of the error.
        message: String,
    },
}

impl ModelError {
    pub(crate) fn empty(name: &'static str) -> Self {
        Self::IllegalArgument {
            name,
            message: "may not be empty".to_string(),
        }
    }
}

/// Result type for model operations.
pub type ModelResult<T> = std::result::Result<T, ModelError>;

/// Rejects an empty string argument.
pub(crate) fn not_empty(value: String, name: &'static str) -> ModelResult<String> {
    if value.is_empty() {
        return Err(ModelError::empty(name));
    }
    Ok(value)
}

/// Rejects an empty collection argument.
pub(crate) fn not_empty_vec<T>(value: Vec<T>, name: &'static str) -> ModelResult<Vec<T>> {
    if value.is_empty() {
        return Err(ModelError::empty(name));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_illegal_argument() {
        let err = ModelError::empty("measureIdentifier");
        assert_eq!(err.to_string(), "measureIdentifier may not be empty");
    }

    #[test]
    fn test_error_display_illegal_state() {
        let err = ModelError::IllegalState("executionResult".to_string());
        assert_eq!(err.to_string(), "executionResult must not be null");
    }

    #[test]
    fn test_not_empty_helpers() {
        assert!(not_empty(String::new(), "uri").is_err());
        assert_eq!(not_empty("a".to_string(), "uri").unwrap(), "a");
        assert!(not_empty_vec(Vec::<u8>::new(), "items").is_err());
        assert_eq!(not_empty_vec(vec![1], "items").unwrap(), vec![1]);
    }
}
