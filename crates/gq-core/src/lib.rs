//! Core types for the geography quiz: places, region catalogs, players,
//! and the attempt records produced by finished sessions.
//!
//! Storage and identity live outside this crate. The [`ports`] module
//! defines the traits an application implements to feed places in and
//! take results out.

/// Attempt records written at the end of a session.
pub mod attempt;
/// Error types used throughout the crate.
pub mod error;
/// Quiz subjects and their identifiers.
pub mod place;
/// Player identity as consumed by the quiz.
pub mod player;
/// Collaborator traits for catalogs, history, and identity.
pub mod ports;
/// Named regions and their read-only place catalogs.
pub mod region;

/// Re-export attempt types.
pub use attempt::AttemptRecord;
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export place types.
pub use place::{Place, PlaceId};
/// Re-export player types.
pub use player::Player;
/// Re-export collaborator traits.
pub use ports::{AttemptSink, CatalogSource, HistorySource, IdentityProvider, MemoryStore};
/// Re-export region types.
pub use region::{Region, RegionCatalog};
