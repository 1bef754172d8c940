// Copyright (c) 2026 Pegasus Heavy Industries LLC
// Licensed under the MIT License

//! Power profile definitions.
//!
//! A profile names a PL1/PL2 wattage pair. The built-in table mirrors the
//! platform presets from silent to extreme; `turbo` and `extreme` count as
//! maximum-cooling profiles and are never used as a startup default.

use serde::{Deserialize, Serialize};

/// Profile applied when the stored selection is unusable.
pub const SAFE_PROFILE: &str = "balanced";

/// A named power-limit pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PowerProfile {
    /// Unique name for this profile
    pub name: String,
    /// Sustained power limit (PL1) in watts
    pub pl1_watts: u32,
    /// Burst power limit (PL2) in watts
    pub pl2_watts: u32,
}

impl PowerProfile {
    pub fn new(name: &str, pl1_watts: u32, pl2_watts: u32) -> Self {
        Self {
            name: name.to_string(),
            pl1_watts,
            pl2_watts,
        }
    }

    /// Validate the name is usable and the burst limit is not below the
    /// sustained limit.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("Profile name must not be empty".to_string());
        }
        if self.pl1_watts == 0 {
            return Err("PL1 must be at least 1 watt".to_string());
        }
        if self.pl2_watts < self.pl1_watts {
            return Err(format!(
                "PL2 ({}) must not be below PL1 ({})",
                self.pl2_watts, self.pl1_watts
            ));
        }
        Ok(())
    }
}

/// The built-in profile table.
pub fn builtin_profiles() -> Vec<PowerProfile> {
    vec![
        PowerProfile::new("silent", 15, 25),
        PowerProfile::new("balanced", 35, 45),
        PowerProfile::new("performance", 60, 80),
        PowerProfile::new("turbo", 80, 115),
        PowerProfile::new("extreme", 115, 150),
    ]
}

/// Look up a profile by name.
pub fn find_profile<'a>(profiles: &'a [PowerProfile], name: &str) -> Option<&'a PowerProfile> {
    profiles.iter().find(|p| p.name == name)
}

/// Whether a profile drives fans at full tilt. These are fine as a thermal
/// fallback but too loud to be the first thing a machine does after boot.
pub fn is_max_cooling(name: &str) -> bool {
    matches!(name, "turbo" | "extreme")
}

/// Resolve the profile to apply at daemon startup. A persisted
/// maximum-cooling selection is downgraded to the safe profile so a session
/// that ended hot does not boot loud.
pub fn startup_profile(desired: &str) -> &str {
    if is_max_cooling(desired) {
        SAFE_PROFILE
    } else {
        desired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_is_valid() {
        for p in builtin_profiles() {
            assert!(p.validate().is_ok(), "profile {} invalid", p.name);
        }
    }

    #[test]
    fn test_find_profile() {
        let profiles = builtin_profiles();
        let turbo = find_profile(&profiles, "turbo").unwrap();
        assert_eq!((turbo.pl1_watts, turbo.pl2_watts), (80, 115));
        assert!(find_profile(&profiles, "missing").is_none());
    }

    #[test]
    fn test_max_cooling_classification() {
        assert!(is_max_cooling("turbo"));
        assert!(is_max_cooling("extreme"));
        assert!(!is_max_cooling("balanced"));
        assert!(!is_max_cooling("silent"));
    }

    #[test]
    fn test_startup_downgrades_max_cooling() {
        assert_eq!(startup_profile("extreme"), "balanced");
        assert_eq!(startup_profile("turbo"), "balanced");
        assert_eq!(startup_profile("performance"), "performance");
    }

    #[test]
    fn test_validation_rejects_inverted_limits() {
        let p = PowerProfile::new("bad", 80, 45);
        assert!(p.validate().is_err());
    }
}
