//! Error types for the quiz engine.

use thiserror::Error;

use gq_core::Region;

/// Result type for quiz operations.
pub type QuizResult<T> = Result<T, QuizError>;

/// Errors that can occur while running a quiz session.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The region has no places, so no session can start.
    #[error("cannot start a session: no places for region \"{0}\"")]
    DataUnavailable(Region),

    /// The submitted answer was rejected without counting as an attempt.
    #[error("invalid answer: {0}")]
    InvalidAnswerInput(String),

    /// Error from the data model or a collaborator.
    #[error("{0}")]
    Core(#[from] gq_core::CoreError),
}
