//! locus-core: snapshot types and configuration.
//!
//! Shared by the topology index, the placement scorer and the CLI.

pub mod config;
pub mod types;

pub use config::LocusConfig;
pub use types::*;
