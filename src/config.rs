// Copyright (c) 2026 Pegasus Heavy Industries LLC
// Licensed under the MIT License

//! Configuration file handling.
//!
//! Persists daemon settings and the power-profile table to TOML.
//! Default path: `/etc/tdpctl/config.toml`

use crate::profile::{self, PowerProfile};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default config file location.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/tdpctl/config.toml";

/// Default daemon socket path.
pub const DEFAULT_SOCKET_PATH: &str = "/run/tdpctl.sock";

/// Default poll interval in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;

/// Default path of the privileged helper program.
pub const DEFAULT_HELPER_PATH: &str = "/usr/libexec/tdpctl-apply";

// ---------------------------------------------------------------------------
// Config types
// ---------------------------------------------------------------------------

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Daemon settings.
    #[serde(default)]
    pub daemon: DaemonConfig,

    /// Named power profiles.
    #[serde(default = "profile::builtin_profiles")]
    pub profiles: Vec<PowerProfile>,
}

/// Daemon-specific settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Poll interval for the thermal engine, in milliseconds.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,

    /// Path for the Unix domain socket.
    #[serde(default = "default_socket_path")]
    pub socket_path: String,

    /// Path of the privileged helper program that performs hardware writes.
    #[serde(default = "default_helper_path")]
    pub helper_path: String,

    /// Path of the desired-profile scratch file.
    #[serde(default = "default_store_path")]
    pub profile_store_path: String,

    /// Whether to reapply the desired profile when shutting down while the
    /// thermal fallback is active.
    #[serde(default = "default_true")]
    pub restore_on_exit: bool,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            socket_path: DEFAULT_SOCKET_PATH.to_string(),
            helper_path: DEFAULT_HELPER_PATH.to_string(),
            profile_store_path: crate::store::DEFAULT_STORE_PATH.to_string(),
            restore_on_exit: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            daemon: DaemonConfig::default(),
            profiles: profile::builtin_profiles(),
        }
    }
}

// ---------------------------------------------------------------------------
// Load / Save
// ---------------------------------------------------------------------------

/// Load config from a TOML file, or return the default if the file doesn't exist.
pub fn load_config(path: &Path) -> io::Result<Config> {
    if !path.exists() {
        log::info!("No config file at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let contents = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Failed to parse config: {e}"),
        )
    })?;

    log::info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Save config to a TOML file, creating parent directories if needed.
pub fn save_config(path: &Path, config: &Config) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let contents = toml::to_string_pretty(config).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Failed to serialize config: {e}"),
        )
    })?;

    fs::write(path, contents)?;
    log::info!("Saved config to {}", path.display());
    Ok(())
}

/// Resolve the config file path from CLI arg or default.
pub fn resolve_config_path(cli_path: Option<&str>) -> PathBuf {
    cli_path
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn default_poll_interval() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

fn default_socket_path() -> String {
    DEFAULT_SOCKET_PATH.to_string()
}

fn default_helper_path() -> String {
    DEFAULT_HELPER_PATH.to_string()
}

fn default_store_path() -> String {
    crate::store::DEFAULT_STORE_PATH.to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_fills_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.daemon.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
        assert_eq!(config.daemon.socket_path, DEFAULT_SOCKET_PATH);
        assert!(config.daemon.restore_on_exit);
        assert_eq!(config.profiles.len(), 5);
    }

    #[test]
    fn test_partial_daemon_section() {
        let config: Config = toml::from_str(
            "[daemon]\npoll_interval_ms = 500\nhelper_path = \"/opt/tdpctl/apply\"\n",
        )
        .unwrap();
        assert_eq!(config.daemon.poll_interval_ms, 500);
        assert_eq!(config.daemon.helper_path, "/opt/tdpctl/apply");
        assert_eq!(config.daemon.socket_path, DEFAULT_SOCKET_PATH);
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.profiles.len(), 5);
    }
}
