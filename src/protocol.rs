// Copyright (c) 2026 Pegasus Heavy Industries LLC
// Licensed under the MIT License

//! Client-daemon protocol over Unix domain sockets.
//!
//! Messages are newline-delimited JSON. The client sends a [`Request`]
//! and the daemon replies with a [`Response`].

use crate::actuator::PlatformMode;
use crate::profile::PowerProfile;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Requests (TUI -> Daemon)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Request current temperatures, limits, and controller state.
    #[serde(rename = "get_status")]
    GetStatus,

    /// Apply a named profile and make it the restore target.
    #[serde(rename = "apply_profile")]
    ApplyProfile { name: String },

    /// Set explicit PL1/PL2 wattages without touching the profile selection.
    #[serde(rename = "set_limits")]
    SetLimits { pl1_watts: u32, pl2_watts: u32 },

    /// Set the GPU board power limit.
    #[serde(rename = "set_gpu_limit")]
    SetGpuLimit { watts: u32 },

    /// Force a platform performance mode.
    #[serde(rename = "set_platform_mode")]
    SetPlatformMode { mode: PlatformMode },

    /// Toggle the fan boost override.
    #[serde(rename = "set_fan_boost")]
    SetFanBoost { enabled: bool },

    /// List all configured profiles.
    #[serde(rename = "list_profiles")]
    ListProfiles,

    /// Create or update a profile.
    #[serde(rename = "upsert_profile")]
    UpsertProfile { profile: PowerProfile },

    /// Delete a profile by name.
    #[serde(rename = "delete_profile")]
    DeleteProfile { name: String },

    /// Save current configuration to disk.
    #[serde(rename = "save_config")]
    SaveConfig,

    /// Reload configuration from disk.
    #[serde(rename = "reload_config")]
    ReloadConfig,
}

// ---------------------------------------------------------------------------
// Responses (Daemon -> TUI)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Response {
    /// Current system status.
    #[serde(rename = "status")]
    Status {
        /// CPU package temperature in degrees Celsius, if readable.
        cpu_temp_c: Option<i64>,
        /// GPU core temperature in degrees Celsius, if readable.
        gpu_temp_c: Option<i64>,
        /// Current PL1 in watts, if the powercap interface is readable.
        pl1_watts: Option<u32>,
        /// Current PL2 in watts.
        pl2_watts: Option<u32>,
        /// GPU board power limit in watts.
        gpu_limit_watts: Option<u32>,
        /// Profile restored when the thermal fallback releases.
        desired_profile: String,
        /// Whether the thermal fallback is currently active.
        in_turbo: bool,
        /// Last commanded fan boost state.
        fan_boost: bool,
    },

    /// List of configured profiles.
    #[serde(rename = "profiles")]
    Profiles { profiles: Vec<PowerProfile> },

    /// Operation succeeded.
    #[serde(rename = "ok")]
    Ok { message: String },

    /// Operation failed.
    #[serde(rename = "error")]
    Error { message: String },
}

// ---------------------------------------------------------------------------
// Serialization helpers
// ---------------------------------------------------------------------------

/// Encode a message as a newline-delimited JSON string.
pub fn encode<T: Serialize>(msg: &T) -> Result<String, serde_json::Error> {
    let mut s = serde_json::to_string(msg)?;
    s.push('\n');
    Ok(s)
}

/// Decode a message from a JSON string (newline-trimmed).
pub fn decode<'a, T: Deserialize<'a>>(s: &'a str) -> Result<T, serde_json::Error> {
    serde_json::from_str(s.trim())
}
