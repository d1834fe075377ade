//! Placement error types.

use thiserror::Error;

use locus_topology::TopologyError;

/// Errors that can occur while scoring or verifying a placement.
///
/// A placement that merely lost to a better-scoring host is not an error;
/// it is reported as a failed [`Verdict`](crate::Verdict).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("volume {volume}: data owner {storage_id} not found in topology snapshot")]
    UnresolvableDataOwner { volume: String, storage_id: String },

    #[error("cannot pick a winner from an empty score table")]
    EmptyCandidateSet,

    #[error("compute node {0} matches no storage node by name or address")]
    UnknownComputeNode(String),

    #[error("topology error: {0}")]
    Topology(#[from] TopologyError),
}

pub type PlacementResult<T> = Result<T, PlacementError>;
