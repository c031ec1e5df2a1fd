//! Command-line configuration
//!
//! Environment names map to query service base URLs. Loaded from TOML;
//! nothing is hardcoded and nothing is global. The resulting values are
//! handed to the executor and folder client at construction.

use cmsquery_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Overrides the default config file location.
pub const CONFIG_ENV: &str = "CMSQUERY_CONFIG";
/// Logon token used when `--token` is not given.
pub const TOKEN_ENV: &str = "CMSQUERY_TOKEN";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Per-request deadline for the query and folder services, in seconds.
    pub timeout_secs: u64,
    /// Abort crawls deeper than this many levels. Unbounded when absent.
    pub max_depth: Option<usize>,
    /// Most parent folders per children query. One query per level when absent.
    pub batch_size: Option<usize>,
    /// Environment name -> base URL.
    pub environments: BTreeMap<String, String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 60,
            max_depth: None,
            batch_size: None,
            environments: BTreeMap::new(),
        }
    }
}

// ============================================================
// Loading
// ============================================================

impl AppConfig {
    /// Config file to read: `explicit`, else `$CMSQUERY_CONFIG`, else the
    /// per-user config directory.
    pub fn default_path(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(p) = explicit {
            return Some(p.to_path_buf());
        }
        if let Ok(p) = std::env::var(CONFIG_ENV) {
            if !p.is_empty() {
                return Some(PathBuf::from(p));
            }
        }
        dirs::config_dir().map(|d| d.join("cmsquery").join("config.toml"))
    }

    /// Load from `path`. A missing file gives defaults unless `required`;
    /// a file that does not parse is always an error.
    pub fn load(path: &Path, required: bool) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let config = Self::from_toml(&content).map_err(|e| {
                    Error::configuration(format!("{}: {}", path.display(), e))
                })?;
                tracing::info!("Loaded config from {}", path.display());
                Ok(config)
            }
            Err(e) if required => Err(Error::configuration(format!(
                "cannot read {}: {}",
                path.display(),
                e
            ))),
            Err(_) => {
                tracing::debug!("No config at {} - using defaults", path.display());
                Ok(Self::default())
            }
        }
    }

    /// Resolve the file location and load it. Only an explicitly named file
    /// must exist.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        match Self::default_path(explicit) {
            Some(path) => Self::load(&path, explicit.is_some()),
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Base URL for a run: an explicit host wins, otherwise the environment
    /// must be configured.
    pub fn base_url(&self, env: Option<&str>, host: Option<&str>) -> Result<String> {
        if let Some(host) = host {
            let host = host.trim();
            if host.is_empty() {
                return Err(Error::configuration("empty --host"));
            }
            return Ok(host.trim_end_matches('/').to_string());
        }

        let Some(env) = env else {
            return Err(Error::configuration("no target: pass --env or --host"));
        };
        self.environments
            .get(env)
            .map(|url| url.trim_end_matches('/').to_string())
            .ok_or_else(|| {
                let known: Vec<&str> = self.environments.keys().map(String::as_str).collect();
                Error::configuration(format!(
                    "unknown environment {:?} (known: {})",
                    env,
                    if known.is_empty() { "none".to_string() } else { known.join(", ") }
                ))
            })
    }
}

/// Logon token from the flag, else from `$CMSQUERY_TOKEN`.
pub fn resolve_token(flag: Option<String>) -> Option<String> {
    flag.or_else(|| std::env::var(TOKEN_ENV).ok())
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}
