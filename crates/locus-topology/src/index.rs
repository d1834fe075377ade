//! Topology index over a storage-node snapshot.
//!
//! Built once per scoring pass and read-only afterwards. Rack, zone and
//! region membership are kept in three independent maps; only online nodes
//! are registered in them, so offline nodes never receive tier credit.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::debug;

use locus_core::{Hostname, StorageId, StorageNode, Tier};

use crate::error::{TopologyError, TopologyResult};

type Membership = BTreeMap<String, BTreeSet<Hostname>>;

/// Read-only lookup structure derived from a storage-node snapshot.
#[derive(Debug, Clone, Default)]
pub struct TopologyIndex {
    /// storage_id → node descriptor.
    by_storage_id: HashMap<StorageId, StorageNode>,
    /// Every known hostname, online or not, mapped to its storage id.
    by_hostname: BTreeMap<Hostname, StorageId>,
    by_rack: Membership,
    by_zone: Membership,
    by_region: Membership,
}

impl TopologyIndex {
    /// Build an index from a flat node list.
    ///
    /// Fails without returning a partial index if two descriptors share a
    /// storage id or a hostname.
    pub fn build(nodes: &[StorageNode]) -> TopologyResult<Self> {
        let mut index = TopologyIndex::default();

        for node in nodes {
            if index.by_storage_id.contains_key(&node.storage_id) {
                return Err(TopologyError::DuplicateStorageId(node.storage_id.clone()));
            }
            if let Some(first) = index.by_hostname.get(&node.hostname) {
                return Err(TopologyError::DuplicateHostname {
                    hostname: node.hostname.clone(),
                    first: first.clone(),
                    second: node.storage_id.clone(),
                });
            }

            index
                .by_hostname
                .insert(node.hostname.clone(), node.storage_id.clone());

            if node.status.is_online() {
                for tier in Tier::ALL {
                    if let Some(value) = node.tier_value(tier) {
                        index
                            .membership_mut(tier)
                            .entry(value.to_string())
                            .or_default()
                            .insert(node.hostname.clone());
                    }
                }
            } else {
                debug!(
                    storage_id = %node.storage_id,
                    hostname = %node.hostname,
                    status = ?node.status,
                    "node not online, excluded from tier membership"
                );
            }

            index
                .by_storage_id
                .insert(node.storage_id.clone(), node.clone());
        }

        debug!(
            nodes = index.len(),
            racks = index.by_rack.len(),
            zones = index.by_zone.len(),
            regions = index.by_region.len(),
            "topology index built"
        );
        Ok(index)
    }

    /// Look up a node by storage id.
    pub fn node(&self, storage_id: &str) -> Option<&StorageNode> {
        self.by_storage_id.get(storage_id)
    }

    /// Look up a node by hostname.
    pub fn node_by_hostname(&self, hostname: &str) -> Option<&StorageNode> {
        self.by_hostname
            .get(hostname)
            .and_then(|id| self.by_storage_id.get(id))
    }

    /// All known hostnames in lexicographic order.
    pub fn hostnames(&self) -> impl Iterator<Item = &str> {
        self.by_hostname.keys().map(String::as_str)
    }

    /// Online hostnames that declare `value` for `tier`.
    pub fn members(&self, tier: Tier, value: &str) -> Option<&BTreeSet<Hostname>> {
        self.membership(tier).get(value)
    }

    pub fn rack_members(&self, rack: &str) -> Option<&BTreeSet<Hostname>> {
        self.members(Tier::Rack, rack)
    }

    pub fn zone_members(&self, zone: &str) -> Option<&BTreeSet<Hostname>> {
        self.members(Tier::Zone, zone)
    }

    pub fn region_members(&self, region: &str) -> Option<&BTreeSet<Hostname>> {
        self.members(Tier::Region, region)
    }

    pub fn len(&self) -> usize {
        self.by_storage_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_storage_id.is_empty()
    }

    pub fn online_count(&self) -> usize {
        self.by_storage_id
            .values()
            .filter(|n| n.status.is_online())
            .count()
    }

    fn membership(&self, tier: Tier) -> &Membership {
        match tier {
            Tier::Rack => &self.by_rack,
            Tier::Zone => &self.by_zone,
            Tier::Region => &self.by_region,
        }
    }

    fn membership_mut(&mut self, tier: Tier) -> &mut Membership {
        match tier {
            Tier::Rack => &mut self.by_rack,
            Tier::Zone => &mut self.by_zone,
            Tier::Region => &mut self.by_region,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use locus_core::NodeStatus;

    fn hosts(set: Option<&BTreeSet<Hostname>>) -> Vec<&str> {
        set.map(|s| s.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    #[test]
    fn empty_snapshot_builds_empty_index() {
        let index = TopologyIndex::build(&[]).unwrap();
        assert!(index.is_empty());
        assert_eq!(index.hostnames().count(), 0);
    }

    #[test]
    fn registers_each_tier_independently() {
        let nodes = vec![
            StorageNode::new("s1", "a").with_rack("r1").with_zone("z1").with_region("east"),
            StorageNode::new("s2", "b").with_rack("r2").with_zone("z1").with_region("east"),
            StorageNode::new("s3", "c").with_zone("z2"),
        ];
        let index = TopologyIndex::build(&nodes).unwrap();

        assert_eq!(hosts(index.rack_members("r1")), vec!["a"]);
        assert_eq!(hosts(index.rack_members("r2")), vec!["b"]);
        assert_eq!(hosts(index.zone_members("z1")), vec!["a", "b"]);
        assert_eq!(hosts(index.zone_members("z2")), vec!["c"]);
        assert_eq!(hosts(index.region_members("east")), vec!["a", "b"]);
        // A zone name never leaks into the rack map.
        assert!(index.rack_members("z1").is_none());
    }

    #[test]
    fn offline_nodes_are_known_but_not_members() {
        let nodes = vec![
            StorageNode::new("s1", "a").with_rack("r1"),
            StorageNode::new("s2", "b")
                .with_rack("r1")
                .with_status(NodeStatus::Offline),
            StorageNode::new("s3", "c")
                .with_rack("r1")
                .with_status(NodeStatus::Unknown),
        ];
        let index = TopologyIndex::build(&nodes).unwrap();

        assert_eq!(hosts(index.rack_members("r1")), vec!["a"]);
        assert_eq!(index.len(), 3);
        assert_eq!(index.online_count(), 1);
        assert_eq!(index.node("s2").unwrap().hostname, "b");
        assert_eq!(index.hostnames().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn rejects_duplicate_storage_id() {
        let nodes = vec![
            StorageNode::new("s1", "a"),
            StorageNode::new("s1", "b"),
        ];
        let err = TopologyIndex::build(&nodes).unwrap_err();
        assert_eq!(err, TopologyError::DuplicateStorageId("s1".to_string()));
    }

    #[test]
    fn rejects_duplicate_hostname() {
        let nodes = vec![
            StorageNode::new("s1", "a"),
            StorageNode::new("s2", "a"),
        ];
        let err = TopologyIndex::build(&nodes).unwrap_err();
        assert!(matches!(err, TopologyError::DuplicateHostname { ref hostname, .. } if hostname == "a"));
    }

    #[test]
    fn lookup_by_hostname() {
        let nodes = vec![StorageNode::new("s1", "a").with_address("10.0.0.1")];
        let index = TopologyIndex::build(&nodes).unwrap();

        let node = index.node_by_hostname("a").unwrap();
        assert_eq!(node.storage_id, "s1");
        assert!(index.node_by_hostname("zz").is_none());
    }
}
