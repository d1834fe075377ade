use std::path::Path;

use locus_core::{ClusterSnapshot, ComputeNode, LocusConfig};
use locus_placement::report::format_outcome;
use locus_placement::{CheckOutcome, CheckPolicy, check_placement};

/// The scheduled node as reported by the orchestrator.
pub struct VerifyRequest {
    pub node: String,
    pub addresses: Vec<String>,
    pub scheduler: Option<String>,
}

pub fn verify(
    snapshot: &Path,
    request: &VerifyRequest,
    format: &str,
    config: &LocusConfig,
) -> anyhow::Result<()> {
    let snapshot = ClusterSnapshot::from_file(snapshot)?;
    let outcome = run(&snapshot, request, config)?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&outcome)?),
        _ => print!("{}", format_outcome(&outcome)),
    }

    if !outcome.passed() {
        anyhow::bail!("placement verification failed for node {}", request.node);
    }
    Ok(())
}

fn run(
    snapshot: &ClusterSnapshot,
    request: &VerifyRequest,
    config: &LocusConfig,
) -> anyhow::Result<CheckOutcome> {
    let mut policy = CheckPolicy::from_config(config);
    if let Some(scheduler) = &request.scheduler {
        policy.scheduler_name = Some(scheduler.clone());
    }

    let compute = ComputeNode {
        name: request.node.clone(),
        addresses: request.addresses.clone(),
    };
    Ok(check_placement(snapshot, &compute, &policy)?)
}
