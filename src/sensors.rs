// Copyright (c) 2026 Pegasus Heavy Industries LLC
// Licensed under the MIT License

//! Temperature and power-limit readers.
//!
//! CPU temperature comes from `/sys/class/thermal` (first zone whose type
//! looks like a CPU package sensor), GPU temperature and power limit from
//! `nvidia-smi`, and the current PL1/PL2 pair from the RAPL powercap
//! interface. Every reader returns `Option`: an unreadable sensor is a
//! normal condition, reported as absent rather than as an error.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

const THERMAL_ROOT: &str = "/sys/class/thermal";
const RAPL_ROOT: &str = "/sys/class/powercap/intel-rapl/intel-rapl:0";

/// PL1/PL2 pair assumed when the RAPL interface is unreadable. Matches the
/// balanced profile so a failed snapshot restores a sane midpoint.
pub const FALLBACK_POWER_LIMITS: PowerLimitPair = PowerLimitPair {
    pl1_watts: 35,
    pl2_watts: 45,
};

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// A discovered CPU thermal zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CpuZone {
    /// Unique identifier, e.g. "thermal_zone2"
    pub id: String,
    /// Zone type string as reported by the kernel, e.g. "x86_pkg_temp"
    pub zone_type: String,
    /// Absolute path to the `temp` file (millidegrees C)
    pub input_path: PathBuf,
}

/// Current sustained/burst power limits in watts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PowerLimitPair {
    pub pl1_watts: u32,
    pub pl2_watts: u32,
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

/// Scan `/sys/class/thermal` for the CPU package zone.
///
/// Zones are walked in name order and the first whose type contains
/// `x86_pkg` or `cpu` wins. Returns `Ok(None)` when no zone matches.
pub fn discover_cpu_zone() -> io::Result<Option<CpuZone>> {
    discover_cpu_zone_in(Path::new(THERMAL_ROOT))
}

fn discover_cpu_zone_in(root: &Path) -> io::Result<Option<CpuZone>> {
    let mut zones = Vec::new();

    for entry in fs::read_dir(root)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        if !name.starts_with("thermal_zone") {
            continue;
        }

        let zone_dir = entry.path();
        let Some(zone_type) = read_trimmed(&zone_dir.join("type")) else {
            continue;
        };
        if is_cpu_zone_type(&zone_type) {
            zones.push(CpuZone {
                id: name,
                zone_type,
                input_path: zone_dir.join("temp"),
            });
        }
    }

    zones.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(zones.into_iter().next())
}

fn is_cpu_zone_type(zone_type: &str) -> bool {
    zone_type.contains("x86_pkg") || zone_type.to_lowercase().contains("cpu")
}

// ---------------------------------------------------------------------------
// Temperature reads
// ---------------------------------------------------------------------------

/// Read the CPU package temperature in whole degrees Celsius.
pub fn read_cpu_temp(zone: &CpuZone) -> Option<i64> {
    read_trimmed(&zone.input_path)
        .and_then(|s| s.parse::<i64>().ok())
        .map(|millic| millic / 1000)
}

/// Read the GPU core temperature via `nvidia-smi`, in whole degrees Celsius.
pub fn read_gpu_temp() -> Option<i64> {
    query_nvidia_smi("temperature.gpu").and_then(|s| parse_smi_integer(&s))
}

/// Read the GPU board power limit via `nvidia-smi`, in watts.
pub fn read_gpu_power_limit() -> Option<u32> {
    query_nvidia_smi("power.limit")
        .and_then(|s| s.parse::<f64>().ok())
        .map(|w| w.round() as u32)
}

// ---------------------------------------------------------------------------
// RAPL power limits
// ---------------------------------------------------------------------------

/// Read the current PL1/PL2 pair from the powercap interface.
pub fn read_power_limits() -> Option<PowerLimitPair> {
    read_power_limits_in(Path::new(RAPL_ROOT))
}

fn read_power_limits_in(rapl_dir: &Path) -> Option<PowerLimitPair> {
    let pl1_watts = read_constraint_watts(rapl_dir, 0)?;
    let pl2_watts = read_constraint_watts(rapl_dir, 1)?;
    Some(PowerLimitPair {
        pl1_watts,
        pl2_watts,
    })
}

fn read_constraint_watts(rapl_dir: &Path, constraint: u8) -> Option<u32> {
    let path = rapl_dir.join(format!("constraint_{constraint}_power_limit_uw"));
    read_trimmed(&path)
        .and_then(|s| s.parse::<u64>().ok())
        .map(|uw| (uw / 1_000_000) as u32)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn query_nvidia_smi(field: &str) -> Option<String> {
    let output = Command::new("nvidia-smi")
        .arg(format!("--query-gpu={field}"))
        .arg("--format=csv,noheader,nounits")
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }
    let line = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if line.is_empty() { None } else { Some(line) }
}

/// Parse a single integer field out of `nvidia-smi` csv output. Multi-GPU
/// systems print one line per device; the first one wins.
fn parse_smi_integer(output: &str) -> Option<i64> {
    output.lines().next()?.trim().parse::<i64>().ok()
}

fn read_trimmed(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok().map(|s| s.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_zone_type_matching() {
        assert!(is_cpu_zone_type("x86_pkg_temp"));
        assert!(is_cpu_zone_type("CPU-therm"));
        assert!(is_cpu_zone_type("cpu_thermal"));
        assert!(!is_cpu_zone_type("acpitz"));
        assert!(!is_cpu_zone_type("nvme"));
    }

    #[test]
    fn test_parse_smi_integer() {
        assert_eq!(parse_smi_integer("63"), Some(63));
        assert_eq!(parse_smi_integer("63\n71\n"), Some(63));
        assert_eq!(parse_smi_integer("N/A"), None);
        assert_eq!(parse_smi_integer(""), None);
    }

    #[test]
    fn test_discovery_picks_first_cpu_zone() {
        let dir = tempfile::tempdir().unwrap();
        for (name, ztype, millic) in [
            ("thermal_zone0", "acpitz", "42000"),
            ("thermal_zone1", "x86_pkg_temp", "67000"),
            ("thermal_zone2", "cpu_thermal", "55000"),
        ] {
            let zone = dir.path().join(name);
            fs::create_dir(&zone).unwrap();
            fs::write(zone.join("type"), format!("{ztype}\n")).unwrap();
            fs::write(zone.join("temp"), format!("{millic}\n")).unwrap();
        }

        let zone = discover_cpu_zone_in(dir.path()).unwrap().unwrap();
        assert_eq!(zone.id, "thermal_zone1");
        assert_eq!(zone.zone_type, "x86_pkg_temp");
        assert_eq!(read_cpu_temp(&zone), Some(67));
    }

    #[test]
    fn test_discovery_without_cpu_zone() {
        let dir = tempfile::tempdir().unwrap();
        let zone = dir.path().join("thermal_zone0");
        fs::create_dir(&zone).unwrap();
        fs::write(zone.join("type"), "acpitz\n").unwrap();
        fs::write(zone.join("temp"), "40000\n").unwrap();

        assert!(discover_cpu_zone_in(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_missing_temp_file_reads_absent() {
        let zone = CpuZone {
            id: "thermal_zone9".to_string(),
            zone_type: "x86_pkg_temp".to_string(),
            input_path: PathBuf::from("/nonexistent/temp"),
        };
        assert_eq!(read_cpu_temp(&zone), None);
    }

    #[test]
    fn test_rapl_read_microwatt_conversion() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("constraint_0_power_limit_uw"), "35000000\n").unwrap();
        fs::write(dir.path().join("constraint_1_power_limit_uw"), "45000000\n").unwrap();

        let limits = read_power_limits_in(dir.path()).unwrap();
        assert_eq!(limits.pl1_watts, 35);
        assert_eq!(limits.pl2_watts, 45);
    }

    #[test]
    fn test_rapl_read_absent_when_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        // Only one constraint present: the pair is unusable.
        fs::write(dir.path().join("constraint_0_power_limit_uw"), "35000000\n").unwrap();
        assert!(read_power_limits_in(dir.path()).is_none());
    }
}
