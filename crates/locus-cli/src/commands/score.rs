use std::path::Path;

use locus_core::{ClusterSnapshot, LocusConfig};
use locus_placement::report::format_scores;
use locus_placement::{TierWeights, score_workload};
use locus_topology::TopologyIndex;
use tracing::info;

pub fn score(snapshot: &Path, format: &str, config: &LocusConfig) -> anyhow::Result<()> {
    let snapshot = ClusterSnapshot::from_file(snapshot)?;
    print!("{}", render(&snapshot, format, config)?);
    Ok(())
}

fn render(snapshot: &ClusterSnapshot, format: &str, config: &LocusConfig) -> anyhow::Result<String> {
    let weights = config
        .weights
        .as_ref()
        .map(TierWeights::from_config)
        .unwrap_or_default();

    let index = TopologyIndex::build(&snapshot.nodes)?;
    let report = score_workload(&index, &snapshot.volumes, &weights);
    info!(
        hosts = report.scores.len(),
        volumes = snapshot.volumes.len(),
        partial = report.is_partial(),
        "scored snapshot"
    );

    match format {
        "json" => Ok(format!("{}\n", serde_json::to_string_pretty(&report)?)),
        _ => Ok(format_scores(&report)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"
    {
        "nodes": [
            {"storage_id": "s1", "hostname": "a", "status": "online", "rack": "r1"},
            {"storage_id": "s2", "hostname": "b", "status": "online", "rack": "r1"},
            {"storage_id": "s3", "hostname": "c", "status": "online", "rack": "r2"}
        ],
        "volumes": [{"volume": "pvc-1", "data_nodes": ["s1"]}]
    }"#;

    #[test]
    fn renders_json_table() {
        let snapshot = ClusterSnapshot::from_json(SNAPSHOT).unwrap();
        let out = render(&snapshot, "json", &LocusConfig::default()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(json["scores"]["a"], 100);
        assert_eq!(json["scores"]["b"], 50);
        assert_eq!(json["scores"]["c"], 0);
        assert_eq!(json["unresolved"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn renders_text_table() {
        let snapshot = ClusterSnapshot::from_json(SNAPSHOT).unwrap();
        let out = render(&snapshot, "text", &LocusConfig::default()).unwrap();
        assert_eq!(out.lines().nth(1), Some("a     100"));
    }

    #[test]
    fn reads_snapshot_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        std::fs::write(&path, SNAPSHOT).unwrap();

        assert!(score(&path, "text", &LocusConfig::default()).is_ok());
        assert!(score(&dir.path().join("missing.json"), "text", &LocusConfig::default()).is_err());
    }

    #[test]
    fn demo_snapshot_scores() {
        let demo = include_str!("../../../../demos/snapshots/two-zones.json");
        let snapshot = ClusterSnapshot::from_json(demo).unwrap();
        let out = render(&snapshot, "json", &LocusConfig::default()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(json["scores"]["worker-1"], 210);
        assert_eq!(json["scores"]["worker-2"], 180);
        assert_eq!(json["scores"]["worker-3"], 120);
        assert_eq!(json["scores"]["worker-4"], 0);
    }

    #[test]
    fn duplicate_storage_id_fails() {
        let mut snapshot = ClusterSnapshot::from_json(SNAPSHOT).unwrap();
        snapshot.nodes[2].storage_id = "s1".to_string();

        let err = render(&snapshot, "text", &LocusConfig::default()).unwrap_err();
        assert!(err.to_string().contains("duplicate storage id"));
    }
}
