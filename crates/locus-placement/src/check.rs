//! End-to-end placement check.
//!
//! Builds the topology index from a snapshot, scores every volume the
//! workload mounts, maps the chosen compute node onto a storage hostname and
//! verifies it against the score table.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use locus_core::config::DEFAULT_SCHEDULER_NAME;
use locus_core::{ClusterSnapshot, ComputeNode, LocusConfig};
use locus_topology::TopologyIndex;

use crate::convert::resolve_hostname;
use crate::error::PlacementResult;
use crate::scorer::{TierWeights, score_workload};
use crate::verifier::{Verdict, verify};

/// How a placement check is carried out.
#[derive(Debug, Clone)]
pub struct CheckPolicy {
    /// Scheduler the workload was submitted to, if known.
    pub scheduler_name: Option<String>,
    /// Scheduler that ignores data locality; its placements are not checked.
    pub default_scheduler_name: String,
    /// Treat a missing data owner as an error instead of scoring the rest.
    pub strict: bool,
    pub weights: TierWeights,
}

impl Default for CheckPolicy {
    fn default() -> Self {
        Self {
            scheduler_name: None,
            default_scheduler_name: DEFAULT_SCHEDULER_NAME.to_string(),
            strict: false,
            weights: TierWeights::default(),
        }
    }
}

impl CheckPolicy {
    pub fn from_config(config: &LocusConfig) -> Self {
        Self {
            scheduler_name: config.scheduler_name().map(str::to_string),
            default_scheduler_name: config.default_scheduler_name().to_string(),
            strict: config.strict(),
            weights: config
                .weights
                .as_ref()
                .map(TierWeights::from_config)
                .unwrap_or_default(),
        }
    }

    fn uses_default_scheduler(&self) -> bool {
        self.scheduler_name.as_deref() == Some(self.default_scheduler_name.as_str())
    }
}

/// Result of a placement check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckOutcome {
    Verified(Verdict),
    Skipped { reason: String },
}

impl CheckOutcome {
    /// Skipped checks count as passing.
    pub fn passed(&self) -> bool {
        match self {
            CheckOutcome::Verified(verdict) => verdict.passed,
            CheckOutcome::Skipped { .. } => true,
        }
    }
}

/// Check that `compute` is the best data-local host for the snapshot's volumes.
pub fn check_placement(
    snapshot: &ClusterSnapshot,
    compute: &ComputeNode,
    policy: &CheckPolicy,
) -> PlacementResult<CheckOutcome> {
    if policy.uses_default_scheduler() {
        let reason = format!(
            "workload scheduled by {}, which does not score data locality",
            policy.default_scheduler_name
        );
        info!(compute = %compute.name, %reason, "placement check skipped");
        return Ok(CheckOutcome::Skipped { reason });
    }

    let index = TopologyIndex::build(&snapshot.nodes)?;
    let report = score_workload(&index, &snapshot.volumes, &policy.weights);

    let scores = if policy.strict {
        report.into_complete()?
    } else {
        if report.is_partial() {
            warn!(
                unresolved = report.unresolved.len(),
                "scoring from a partial topology, some data owners were skipped"
            );
        }
        report.scores
    };

    let hostname = resolve_hostname(&snapshot.nodes, compute)?;
    let verdict = verify(scores, &hostname)?;
    Ok(CheckOutcome::Verified(verdict))
}
