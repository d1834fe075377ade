use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "locus",
    about = "locus: data-locality scoring for storage-aware placement",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Path to locus.toml (weights and verification policy)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score every storage host by proximity to the snapshot's volume data
    Score {
        /// Cluster snapshot (JSON: nodes + volumes)
        #[arg(short, long)]
        snapshot: PathBuf,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Verify that a workload landed on the best data-local host.
    ///
    /// The node is matched to a storage host by name first, then by any
    /// shared address. Exits non-zero when a better host exists.
    Verify {
        /// Cluster snapshot (JSON: nodes + volumes)
        #[arg(short, long)]
        snapshot: PathBuf,
        /// Name of the node the workload was scheduled onto
        #[arg(short, long)]
        node: String,
        /// Addresses of the scheduled node (repeatable)
        #[arg(short, long = "address")]
        addresses: Vec<String>,
        /// Scheduler the workload was submitted to (overrides config)
        #[arg(long)]
        scheduler: Option<String>,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("locus=info".parse()?)
        )
        .init();

    let cli = Cli::parse();
    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Score { snapshot, format } => {
            commands::score::score(&snapshot, &format, &config)
        }
        Commands::Verify {
            snapshot,
            node,
            addresses,
            scheduler,
            format,
        } => {
            let request = commands::verify::VerifyRequest {
                node,
                addresses,
                scheduler,
            };
            commands::verify::verify(&snapshot, &request, &format, &config)
        }
    }
}
