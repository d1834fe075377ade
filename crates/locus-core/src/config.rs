//! locus.toml configuration parser.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name the stock Kubernetes scheduler registers under.
pub const DEFAULT_SCHEDULER_NAME: &str = "default-scheduler";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocusConfig {
    pub weights: Option<WeightsConfig>,
    pub verify: Option<VerifyConfig>,
}

/// Per-tier score weights. Unset tiers keep their default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeightsConfig {
    pub node: Option<u64>,
    pub rack: Option<u64>,
    pub zone: Option<u64>,
    pub region: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifyConfig {
    /// Scheduler the workloads under test were submitted to.
    pub scheduler_name: Option<String>,
    /// Scheduler name that does not take data locality into account.
    pub default_scheduler_name: Option<String>,
    /// Fail verification when a data owner is missing from the topology.
    pub strict: Option<bool>,
}

impl LocusConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: LocusConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn scheduler_name(&self) -> Option<&str> {
        self.verify.as_ref()?.scheduler_name.as_deref()
    }

    pub fn default_scheduler_name(&self) -> &str {
        self.verify
            .as_ref()
            .and_then(|v| v.default_scheduler_name.as_deref())
            .unwrap_or(DEFAULT_SCHEDULER_NAME)
    }

    pub fn strict(&self) -> bool {
        self.verify.as_ref().and_then(|v| v.strict).unwrap_or(false)
    }
}
