use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

/// Graph model mutation errors.
///
/// Every failing operation leaves the model exactly as it was.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Invalid connection from '{source_id}' to '{target_id}': {reason}")]
    InvalidConnection {
        source_id: String,
        target_id: String,
        reason: &'static str,
    },

    #[error("Validation failed for {what}: {reason}")]
    Validation { what: String, reason: String },

    #[error("Duplicate id '{id}' in {context}")]
    DuplicateId { id: String, context: &'static str },

    #[error("{what} not found: '{id}'")]
    NotFound { id: String, what: &'static str },
}
