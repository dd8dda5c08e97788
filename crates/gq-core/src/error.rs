use crate::place::PlaceId;
use crate::region::Region;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by the data model and its collaborators.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The catalog for a region is empty or could not be reached.
    #[error("no places available for region \"{region}\"")]
    DataUnavailable {
        /// The region that was requested.
        region: Region,
    },

    /// Two places in one catalog share an identifier.
    #[error("duplicate place id {id} in region \"{region}\"")]
    DuplicatePlace {
        /// The repeated identifier.
        id: PlaceId,
        /// The catalog's region.
        region: Region,
    },

    /// Writing an attempt record failed.
    #[error("failed to record attempt: {0}")]
    Persistence(String),

    /// Reading from or writing to the backing store failed.
    #[error("storage error: {0}")]
    Storage(String),
}
