//! Error types for Vicinity.

use thiserror::Error;
use uuid::Uuid;

/// Convenience result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, VicinityError>;

/// Errors surfaced by the search service and its collaborators.
///
/// Per-candidate failures (an unresolvable coordinate, a single distance
/// lookup that comes back unreachable) are absorbed inside the pipeline and
/// never appear here. Only whole-request failures do.
#[derive(Debug, Error)]
pub enum VicinityError {
    /// The listing store could not serve the request.
    #[error("listing store failure: {0}")]
    Store(String),

    /// A listing with this id is already present in the store.
    #[error("listing {0} already exists")]
    DuplicateListing(Uuid),

    /// No listing with this id exists in the store.
    #[error("listing {0} not found")]
    UnknownListing(Uuid),

    /// A configuration value failed validation.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The routing client could not be constructed.
    #[error("routing client failure: {0}")]
    Routing(String),
}
