//! Data-locality scoring.
//!
//! Every replica of a volume credits the hosts around it:
//! - **Node**: the host that owns the replica
//! - **Rack**: every other online host in the owner's rack
//! - **Zone**: every other online host in the owner's zone
//! - **Region**: every other online host in the owner's region
//!
//! Credits from all replicas of all volumes of a workload are summed.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use locus_core::config::WeightsConfig;
use locus_core::{Hostname, StorageId, Tier, VolumeLocality};
use locus_topology::TopologyIndex;

use crate::error::{PlacementError, PlacementResult};

/// Points awarded per tier of proximity to a replica.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierWeights {
    pub node: u64,
    pub rack: u64,
    pub zone: u64,
    pub region: u64,
}

impl Default for TierWeights {
    fn default() -> Self {
        Self {
            node: 100,
            rack: 50,
            zone: 25,
            region: 10,
        }
    }
}

impl TierWeights {
    /// Defaults overridden by whatever tiers the config sets.
    pub fn from_config(config: &WeightsConfig) -> Self {
        let defaults = Self::default();
        Self {
            node: config.node.unwrap_or(defaults.node),
            rack: config.rack.unwrap_or(defaults.rack),
            zone: config.zone.unwrap_or(defaults.zone),
            region: config.region.unwrap_or(defaults.region),
        }
    }

    pub fn for_tier(&self, tier: Tier) -> u64 {
        match tier {
            Tier::Rack => self.rack,
            Tier::Zone => self.zone,
            Tier::Region => self.region,
        }
    }
}

/// Hostname → accumulated locality score.
///
/// Holds an entry for every hostname in the topology, including hosts that
/// scored zero. Iteration is in hostname order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreTable(BTreeMap<Hostname, u64>);

impl ScoreTable {
    /// A table with every known hostname at zero.
    pub fn zeroed(index: &TopologyIndex) -> Self {
        Self(index.hostnames().map(|h| (h.to_string(), 0)).collect())
    }

    pub fn get(&self, hostname: &str) -> Option<u64> {
        self.0.get(hostname).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(h, s)| (h.as_str(), *s))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Add another table's scores into this one, host by host.
    pub fn merge(&mut self, other: &ScoreTable) {
        for (host, points) in other.iter() {
            self.add(host, points);
        }
    }

    /// Hosts sorted best first; equal scores are ordered by hostname.
    pub fn ranked(&self) -> Vec<(&str, u64)> {
        let mut ranked: Vec<(&str, u64)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }

    /// The highest-scoring host, lexicographically smallest on ties.
    pub fn leader(&self) -> Option<(&str, u64)> {
        // Iteration is hostname-ascending, so keeping only strictly greater
        // scores leaves the smallest name among equals.
        self.iter().fold(None, |best, (host, score)| match best {
            Some((_, best_score)) if score <= best_score => best,
            _ => Some((host, score)),
        })
    }

    fn add(&mut self, hostname: &str, points: u64) {
        match self.0.get_mut(hostname) {
            Some(score) => *score = score.saturating_add(points),
            None => {
                self.0.insert(hostname.to_string(), points);
            }
        }
    }
}

impl FromIterator<(Hostname, u64)> for ScoreTable {
    fn from_iter<I: IntoIterator<Item = (Hostname, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A data owner the topology snapshot does not know about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedOwner {
    pub volume: String,
    pub storage_id: StorageId,
}

/// Scores plus any data owners that could not be credited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub scores: ScoreTable,
    /// Non-empty when the storage plane and topology snapshots disagree.
    pub unresolved: Vec<UnresolvedOwner>,
}

impl ScoreReport {
    /// True when some replica could not be resolved and the scores are
    /// computed from the remaining owners only.
    pub fn is_partial(&self) -> bool {
        !self.unresolved.is_empty()
    }

    /// Add another report's scores and diagnostics into this one.
    pub fn merge(&mut self, other: ScoreReport) {
        self.scores.merge(&other.scores);
        self.unresolved.extend(other.unresolved);
    }

    /// The score table, or the first unresolved owner as an error.
    pub fn into_complete(self) -> PlacementResult<ScoreTable> {
        match self.unresolved.into_iter().next() {
            Some(UnresolvedOwner { volume, storage_id }) => {
                Err(PlacementError::UnresolvableDataOwner { volume, storage_id })
            }
            None => Ok(self.scores),
        }
    }
}

/// Score one volume's replicas against the topology.
///
/// Duplicate storage ids within `volume` are credited once.
pub fn score_volume(
    index: &TopologyIndex,
    volume: &VolumeLocality,
    weights: &TierWeights,
) -> ScoreReport {
    let mut report = ScoreReport {
        scores: ScoreTable::zeroed(index),
        unresolved: Vec::new(),
    };

    let owners: BTreeSet<&str> = volume.data_nodes.iter().map(String::as_str).collect();

    for storage_id in owners {
        let Some(owner) = index.node(storage_id) else {
            warn!(
                volume = %volume.volume,
                storage_id,
                "data owner missing from topology snapshot"
            );
            report.unresolved.push(UnresolvedOwner {
                volume: volume.volume.clone(),
                storage_id: storage_id.to_string(),
            });
            continue;
        };

        report.scores.add(&owner.hostname, weights.node);

        for tier in Tier::ALL {
            let Some(value) = owner.tier_value(tier) else {
                continue;
            };
            let Some(members) = index.members(tier, value) else {
                continue;
            };
            let points = weights.for_tier(tier);
            for host in members.iter().filter(|h| **h != owner.hostname) {
                report.scores.add(host, points);
            }
        }

        debug!(
            volume = %volume.volume,
            owner = %owner.hostname,
            "credited replica"
        );
    }

    report
}

/// Score every volume a workload mounts and sum the results.
pub fn score_workload(
    index: &TopologyIndex,
    volumes: &[VolumeLocality],
    weights: &TierWeights,
) -> ScoreReport {
    let mut total = ScoreReport {
        scores: ScoreTable::zeroed(index),
        unresolved: Vec::new(),
    };
    for volume in volumes {
        total.merge(score_volume(index, volume, weights));
    }
    debug!(
        volumes = volumes.len(),
        hosts = total.scores.len(),
        partial = total.is_partial(),
        "workload scored"
    );
    total
}
