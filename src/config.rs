//! Extension configuration.
//!
//! Only ambient knobs live here; the rule table itself is compiled in (see
//! `builtin`) and is not configurable at runtime.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Name under which the dispatch command is registered with the host. The
/// host delivers command events by this name; anything else is rejected.
pub const DEFAULT_COMMAND: &str = "site-action";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitehookConfig {
    /// Registered command name for explicit user invocation.
    pub command: String,
}

impl Default for SitehookConfig {
    fn default() -> Self {
        Self {
            command: DEFAULT_COMMAND.to_string(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("sitehook")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SitehookConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = SitehookConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: SitehookConfig = toml::from_str(&data)?;
    Ok(cfg)
}
