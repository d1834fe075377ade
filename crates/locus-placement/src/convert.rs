//! Mapping between the orchestrator's node view and the storage topology.
//!
//! The orchestrator names nodes by its own node name while the storage
//! plane reports hostnames and addresses. A compute node matches a storage
//! node when the names agree or when they share any network address.

use tracing::debug;

use locus_core::{ComputeNode, Hostname, StorageNode};

use crate::error::{PlacementError, PlacementResult};

/// Resolve the storage hostname a compute node corresponds to.
///
/// Nodes are checked in snapshot order; the first one matching by name or
/// by any address is taken.
pub fn resolve_hostname(nodes: &[StorageNode], compute: &ComputeNode) -> PlacementResult<Hostname> {
    let shares_address = |node: &StorageNode| {
        node.addresses
            .iter()
            .any(|addr| compute.addresses.iter().any(|c| c == addr))
    };

    let matched = nodes
        .iter()
        .find(|n| n.hostname == compute.name || shares_address(*n));

    match matched {
        Some(node) => {
            debug!(
                compute = %compute.name,
                hostname = %node.hostname,
                "matched compute node"
            );
            Ok(node.hostname.clone())
        }
        None => Err(PlacementError::UnknownComputeNode(compute.name.clone())),
    }
}
