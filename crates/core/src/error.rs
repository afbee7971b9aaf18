//! Error taxonomy for fetching and applying settings

/// Anything that keeps a settings payload from being decoded
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("malformed JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("payload is not a JSON object (found {0})")]
    NotAnObject(&'static str),
    #[error("a settings request is already in flight")]
    Busy,
}

/// A write onto the form that could not be carried out
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("form #{0} not found")]
    MissingForm(String),
    #[error("failed to set `{name}`: {message}")]
    Dom { name: String, message: String },
}

/// Result of the populate pipeline, either stage may fail
#[derive(Debug, thiserror::Error)]
pub enum PopulateError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Form(#[from] FormError),
}
