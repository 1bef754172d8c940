// Copyright (c) 2026 Pegasus Heavy Industries LLC
// Licensed under the MIT License

//! External helper invocation.
//!
//! All hardware writes go through one privileged helper program. Each
//! command is a fire-and-forget subprocess call; a non-zero exit becomes an
//! `io::Error` carrying the helper's stderr so callers can log it and move
//! on. The helper call blocks the caller for its duration.

use crate::sensors::PowerLimitPair;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Platform performance mode forced through the helper.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlatformMode {
    Quiet,
    Balanced,
    Performance,
}

impl PlatformMode {
    pub fn as_str(self) -> &'static str {
        match self {
            PlatformMode::Quiet => "quiet",
            PlatformMode::Balanced => "balanced",
            PlatformMode::Performance => "performance",
        }
    }
}

/// Handle to the helper program that performs privileged writes.
#[derive(Debug, Clone)]
pub struct Actuator {
    helper_path: PathBuf,
}

impl Actuator {
    pub fn new(helper_path: impl Into<PathBuf>) -> Self {
        Self {
            helper_path: helper_path.into(),
        }
    }

    pub fn helper_path(&self) -> &Path {
        &self.helper_path
    }

    /// Apply a named profile in full (limits, platform mode, fan policy).
    pub fn apply_profile(&self, name: &str) -> io::Result<()> {
        self.invoke(&["profile", name])
    }

    /// Set explicit PL1/PL2 wattages.
    pub fn set_power_limits(&self, limits: PowerLimitPair) -> io::Result<()> {
        self.invoke(&[
            "set",
            &limits.pl1_watts.to_string(),
            &limits.pl2_watts.to_string(),
        ])
    }

    /// Set the GPU board power limit in watts.
    pub fn set_gpu_limit(&self, watts: u32) -> io::Result<()> {
        self.invoke(&["gpu", &watts.to_string()])
    }

    /// Force a platform performance mode.
    pub fn set_platform_mode(&self, mode: PlatformMode) -> io::Result<()> {
        self.invoke(&["platform", mode.as_str()])
    }

    /// Toggle the fan boost override.
    pub fn set_fan_boost(&self, enabled: bool) -> io::Result<()> {
        self.invoke(&["fanboost", if enabled { "on" } else { "off" }])
    }

    fn invoke(&self, args: &[&str]) -> io::Result<()> {
        let output = Command::new(&self.helper_path).args(args).output()?;
        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(io::Error::other(format!(
            "{} {} failed ({}): {}",
            self.helper_path.display(),
            args.join(" "),
            output.status,
            stderr.trim()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;

    fn write_helper(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("helper.sh");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn test_successful_invocation() {
        let dir = tempfile::tempdir().unwrap();
        let helper = write_helper(dir.path(), "exit 0");
        let actuator = Actuator::new(helper);

        assert!(actuator.apply_profile("balanced").is_ok());
        assert!(
            actuator
                .set_power_limits(PowerLimitPair {
                    pl1_watts: 35,
                    pl2_watts: 45
                })
                .is_ok()
        );
        assert!(actuator.set_fan_boost(false).is_ok());
    }

    #[test]
    fn test_helper_arguments_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("calls.log");
        let helper = write_helper(
            dir.path(),
            &format!("echo \"$@\" >> {}", log.display()),
        );
        let actuator = Actuator::new(helper);

        actuator.apply_profile("turbo").unwrap();
        actuator
            .set_power_limits(PowerLimitPair {
                pl1_watts: 60,
                pl2_watts: 80,
            })
            .unwrap();
        actuator.set_platform_mode(PlatformMode::Performance).unwrap();
        actuator.set_gpu_limit(115).unwrap();
        actuator.set_fan_boost(true).unwrap();

        let calls = fs::read_to_string(log).unwrap();
        let lines: Vec<&str> = calls.lines().collect();
        assert_eq!(
            lines,
            [
                "profile turbo",
                "set 60 80",
                "platform performance",
                "gpu 115",
                "fanboost on",
            ]
        );
    }

    #[test]
    fn test_failure_carries_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let helper = write_helper(dir.path(), "echo 'no such profile' >&2; exit 3");
        let actuator = Actuator::new(helper);

        let err = actuator.apply_profile("bogus").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("no such profile"), "got: {msg}");
        assert!(msg.contains("profile bogus"), "got: {msg}");
    }

    #[test]
    fn test_missing_helper_is_an_error() {
        let actuator = Actuator::new("/nonexistent/tdpctl-apply");
        assert!(actuator.apply_profile("balanced").is_err());
    }
}
