// Copyright (c) 2026 Pegasus Heavy Industries LLC
// Licensed under the MIT License

//! Desired-profile persistence.
//!
//! The profile to restore after a thermal turbo episode is a single
//! plain-text name in a scratch file, shared between the daemon and its
//! clients. Reads never fail: an unreadable or empty file yields the safe
//! default. Writes replace the whole file so readers never see a partial
//! value.

use crate::profile::SAFE_PROFILE;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default location of the desired-profile file.
pub const DEFAULT_STORE_PATH: &str = "/var/lib/tdpctl/desired_profile";

/// The desired-profile file, durable across daemon restarts.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Seed the store with the safe default on first run.
    pub fn ensure_initialized(&self) {
        if self.path.exists() {
            return;
        }
        if let Err(e) = self.set_desired_profile(SAFE_PROFILE) {
            log::warn!(
                "Could not initialize profile store at {}: {e}",
                self.path.display()
            );
        }
    }

    /// Read the stored profile name. Unreadable or empty falls back to the
    /// safe default.
    pub fn desired_profile(&self) -> String {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let name = contents.trim();
                if name.is_empty() {
                    SAFE_PROFILE.to_string()
                } else {
                    name.to_string()
                }
            }
            Err(e) => {
                log::debug!(
                    "Could not read profile store at {}: {e}",
                    self.path.display()
                );
                SAFE_PROFILE.to_string()
            }
        }
    }

    /// Persist a profile name, creating parent directories if needed.
    pub fn set_desired_profile(&self, name: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path().join("desired_profile"));
        assert_eq!(store.desired_profile(), "balanced");
    }

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path().join("desired_profile"));
        store.set_desired_profile("performance").unwrap();
        assert_eq!(store.desired_profile(), "performance");
        store.set_desired_profile("silent").unwrap();
        assert_eq!(store.desired_profile(), "silent");
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("desired_profile");
        fs::write(&path, "turbo\n").unwrap();
        let store = ProfileStore::new(path);
        assert_eq!(store.desired_profile(), "turbo");
    }

    #[test]
    fn test_empty_file_yields_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("desired_profile");
        fs::write(&path, "").unwrap();
        let store = ProfileStore::new(path);
        assert_eq!(store.desired_profile(), "balanced");
    }

    #[test]
    fn test_initialization_seeds_default_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path().join("state").join("desired_profile"));
        store.ensure_initialized();
        assert_eq!(store.desired_profile(), "balanced");

        // A later init must not clobber a user selection.
        store.set_desired_profile("performance").unwrap();
        store.ensure_initialized();
        assert_eq!(store.desired_profile(), "performance");
    }
}
