//! Error types for ranking and unlocking.

use thiserror::Error;

use gq_core::Region;

/// Result type for ranking operations.
pub type RankingResult<T> = Result<T, RankingError>;

/// Errors raised while building an unlock chain.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RankingError {
    /// The prerequisite is not yet part of the chain.
    #[error("unknown prerequisite region \"{0}\"")]
    UnknownPrerequisite(Region),

    /// The region already has a place in the chain.
    #[error("region \"{0}\" is already in the unlock chain")]
    DuplicateRegion(Region),

    /// A region already depends on this prerequisite, so the chain would fork.
    #[error("region \"{prerequisite}\" already unlocks \"{existing}\"")]
    Branching {
        /// The shared prerequisite.
        prerequisite: Region,
        /// The region already depending on it.
        existing: Region,
    },
}
