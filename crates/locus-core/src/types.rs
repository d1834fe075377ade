//! Snapshot data model shared by the topology index, the scorer and the CLI.
//!
//! These types describe what the storage plane and the orchestrator report
//! about the cluster at one point in time. They are plain data: every type is
//! serializable so snapshots can be captured to JSON and replayed.

use serde::{Deserialize, Serialize};

/// Identifier the storage plane assigns to a storage node.
pub type StorageId = String;

/// Hostname of a node, as known to the storage plane.
pub type Hostname = String;

// ── Storage nodes ─────────────────────────────────────────────────

/// Reported status of a storage node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    Online,
    Offline,
    #[default]
    Unknown,
}

impl NodeStatus {
    pub fn is_online(self) -> bool {
        matches!(self, NodeStatus::Online)
    }
}

/// A storage node and where it sits in the failure-domain hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageNode {
    pub storage_id: StorageId,
    pub hostname: Hostname,
    #[serde(default)]
    pub status: NodeStatus,
    /// Rack label. Empty means the node declares no rack.
    #[serde(default)]
    pub rack: String,
    #[serde(default)]
    pub zone: String,
    #[serde(default)]
    pub region: String,
    /// Network identifiers used to match this node to a compute node.
    #[serde(default)]
    pub addresses: Vec<String>,
}

impl StorageNode {
    /// Create an online node with no topology labels.
    pub fn new(storage_id: impl Into<String>, hostname: impl Into<String>) -> Self {
        Self {
            storage_id: storage_id.into(),
            hostname: hostname.into(),
            status: NodeStatus::Online,
            rack: String::new(),
            zone: String::new(),
            region: String::new(),
            addresses: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: NodeStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_rack(mut self, rack: impl Into<String>) -> Self {
        self.rack = rack.into();
        self
    }

    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = zone.into();
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.addresses.push(address.into());
        self
    }

    /// The label this node declares for `tier`, if non-empty.
    pub fn tier_value(&self, tier: Tier) -> Option<&str> {
        let value = match tier {
            Tier::Rack => &self.rack,
            Tier::Zone => &self.zone,
            Tier::Region => &self.region,
        };
        (!value.is_empty()).then_some(value.as_str())
    }
}

/// A shared failure domain above the individual node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Rack,
    Zone,
    Region,
}

impl Tier {
    /// All tiers, narrowest first.
    pub const ALL: [Tier; 3] = [Tier::Rack, Tier::Zone, Tier::Region];
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Tier::Rack => "rack",
            Tier::Zone => "zone",
            Tier::Region => "region",
        };
        f.write_str(s)
    }
}

// ── Volumes ───────────────────────────────────────────────────────

/// Which storage nodes currently hold a replica of a volume's data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeLocality {
    pub volume: String,
    /// Storage IDs of the replica owners, as reported by the storage plane.
    #[serde(default)]
    pub data_nodes: Vec<StorageId>,
}

impl VolumeLocality {
    pub fn new<I, S>(volume: impl Into<String>, data_nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            volume: volume.into(),
            data_nodes: data_nodes.into_iter().map(Into::into).collect(),
        }
    }
}

// ── Compute side ──────────────────────────────────────────────────

/// The orchestrator's view of the node a pod was scheduled onto.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputeNode {
    pub name: String,
    #[serde(default)]
    pub addresses: Vec<String>,
}

impl ComputeNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            addresses: Vec::new(),
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.addresses.push(address.into());
        self
    }
}

// ── Snapshot ──────────────────────────────────────────────────────

/// Everything the scorer needs for one workload: the storage topology and
/// the data owners of each volume the workload mounts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterSnapshot {
    #[serde(default)]
    pub nodes: Vec<StorageNode>,
    #[serde(default)]
    pub volumes: Vec<VolumeLocality>,
}

impl ClusterSnapshot {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn from_file(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }
}
