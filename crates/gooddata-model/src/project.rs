//! Project-level errors.

use std::error::Error as StdError;

use thiserror::Error;

/// Unable to update users in a project.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct ProjectUsersUpdateError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl ProjectUsersUpdateError {
    /// Creates the error without a cause.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates the error with the underlying cause.
    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn StdError + Send + Sync + 'static>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// The message.
    pub fn message(&self) -> &str {
        &self.message
    }
}
