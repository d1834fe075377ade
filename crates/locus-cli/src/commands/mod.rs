pub mod score;
pub mod verify;

use std::path::Path;

use locus_core::LocusConfig;

/// Load locus.toml if a path was given, defaults otherwise.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<LocusConfig> {
    match path {
        Some(path) => LocusConfig::from_file(path),
        None => Ok(LocusConfig::default()),
    }
}
