//! Shared error types for the services crate.

use thiserror::Error;

use flashdeck_core::model::DeckError;
use flashdeck_core::session::SessionError;

/// Transport and auth failures talking to a text model.
///
/// Malformed model output is not an error here; the generator absorbs it.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ModelError {
    #[error("text generation is not configured")]
    Disabled,
    #[error("text generation request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("could not decode text generation stream: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("text generation stream failed: {0}")]
    Stream(String),
}

/// Errors reading configuration from the environment.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("unknown provider {0:?} (expected \"gemini\" or \"groq\")")]
    UnknownProvider(String),
    #[error("invalid value for {var}: {raw:?}")]
    InvalidNumber { var: &'static str, raw: String },
}

/// Errors emitted by `StudyController`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ControllerError {
    #[error("{action} is not available from the {screen} screen")]
    InvalidTransition {
        action: &'static str,
        screen: &'static str,
    },
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Deck(#[from] DeckError),
}
