//! locus-topology: failure-domain index over a storage-node snapshot.
//!
//! Turns a flat list of storage nodes into per-tier membership maps
//! (rack, zone, region → hostnames) and a storage-id → node identity map.
//! The index is immutable once built and is shared by reference with the
//! scorer.

pub mod error;
pub mod index;

pub use error::{TopologyError, TopologyResult};
pub use index::TopologyIndex;
