//! Application configuration.
//!
//! Stored as TOML:
//! - Linux: `~/.config/pubip/config.toml`
//! - Windows: `%APPDATA%/pubip/config.toml`

use std::path::{Path, PathBuf};
use std::time::Duration;

use pubip_resolver::{DEFAULT_SERVICE_URL, ResolverConfig};
use pubip_status::TimingConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// IP-echo endpoint returning `{"ip": "..."}`.
    #[serde(default = "default_service_url")]
    pub service_url: String,

    /// Lookup timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Delay between entering Refreshing and the lookup, in ms.
    #[serde(default = "default_refresh_delay_ms")]
    pub refresh_delay_ms: u64,

    /// Delay after the first lookup before connectivity changes count, in ms.
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Delay before menu clicks are forwarded, in ms.
    #[serde(default = "default_menu_action_delay_ms")]
    pub menu_action_delay_ms: u64,

    /// Show the address in the indicator title on start.
    #[serde(default = "default_true")]
    pub show_status: bool,

    /// Interface poll interval for connectivity changes, in seconds.
    #[serde(default = "default_connectivity_poll_secs")]
    pub connectivity_poll_secs: u64,
}

fn default_service_url() -> String {
    DEFAULT_SERVICE_URL.into()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_refresh_delay_ms() -> u64 {
    800
}

fn default_settle_delay_ms() -> u64 {
    3000
}

fn default_menu_action_delay_ms() -> u64 {
    200
}

fn default_true() -> bool {
    true
}

fn default_connectivity_poll_secs() -> u64 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_url: default_service_url(),
            timeout_secs: default_timeout_secs(),
            refresh_delay_ms: default_refresh_delay_ms(),
            settle_delay_ms: default_settle_delay_ms(),
            menu_action_delay_ms: default_menu_action_delay_ms(),
            show_status: default_true(),
            connectivity_poll_secs: default_connectivity_poll_secs(),
        }
    }
}

impl Config {
    /// Loads configuration from disk, or writes the defaults if not found.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&config_path())
    }

    fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }

    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            url: self.service_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs.max(1)),
        }
    }

    pub fn timing(&self) -> TimingConfig {
        TimingConfig {
            refresh_delay: Duration::from_millis(self.refresh_delay_ms),
            settle_delay: Duration::from_millis(self.settle_delay_ms),
        }
    }

    pub fn menu_action_delay(&self) -> Duration {
        Duration::from_millis(self.menu_action_delay_ms)
    }

    pub fn connectivity_poll(&self) -> Duration {
        Duration::from_secs(self.connectivity_poll_secs.max(1))
    }
}

/// Returns the platform-specific configuration file path.
fn config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").unwrap_or_else(|_| "C:\\Users\\Default\\AppData".into());
        PathBuf::from(appdata).join("pubip").join("config.toml")
    }

    #[cfg(not(target_os = "windows"))]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        PathBuf::from(home)
            .join(".config")
            .join("pubip")
            .join("config.toml")
    }
}
