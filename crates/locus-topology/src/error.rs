//! Error types for topology index construction.

use thiserror::Error;

/// Result type alias for topology operations.
pub type TopologyResult<T> = Result<T, TopologyError>;

/// Errors that make a topology snapshot ambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    #[error("duplicate storage id in topology snapshot: {0}")]
    DuplicateStorageId(String),

    #[error("hostname {hostname} is claimed by storage ids {first} and {second}")]
    DuplicateHostname {
        hostname: String,
        first: String,
        second: String,
    },
}
