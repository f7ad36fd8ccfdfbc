//! Error types for the hn-app service layer.

/// Application error type that wraps errors from the backend crates and
/// provides a unified error interface for frontends.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Model(#[from] hn_model::ModelError),

    #[error(transparent)]
    Serialize(#[from] hn_inp::SerializeError),

    #[error(transparent)]
    Parse(#[from] hn_inp::ParseError),

    #[error(transparent)]
    Project(#[from] hn_project::ProjectError),

    #[error("Simulation service failed: {message}")]
    ExternalService { message: String },

    #[error("Diagram renderer failed: {message}")]
    Diagram { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for hn-app operations.
pub type AppResult<T> = Result<T, AppError>;
