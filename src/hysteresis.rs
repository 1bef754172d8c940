// Copyright (c) 2026 Pegasus Heavy Industries LLC
// Licensed under the MIT License

//! Thermal hysteresis decision core.
//!
//! One boolean state (`in_turbo`), two temperature readings per tick.
//! Either sensor at or above its trip point engages turbo; both sensors
//! must drop below their release bounds before turbo disengages. The gap
//! between trip and release is a dead band that prevents chattering at
//! the boundary.

/// CPU temperature at/above which turbo engages, in degrees Celsius.
pub const CPU_TRIP_C: i64 = 85;

/// GPU temperature at/above which turbo engages.
pub const GPU_TRIP_C: i64 = 75;

/// CPU temperature strictly below which turbo may release.
pub const CPU_RELEASE_C: i64 = 80;

/// GPU temperature strictly below which turbo may release.
pub const GPU_RELEASE_C: i64 = 70;

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// One poll tick's worth of temperature readings.
///
/// `None` means the sensor could not be read. An absent reading counts as
/// cold: it can never engage turbo on its own and never blocks release.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThermalSample {
    /// CPU package temperature in degrees Celsius, if readable.
    pub cpu_c: Option<i64>,
    /// GPU core temperature in degrees Celsius, if readable.
    pub gpu_c: Option<i64>,
}

/// Trip and release bounds for both sensors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub cpu_trip_c: i64,
    pub gpu_trip_c: i64,
    pub cpu_release_c: i64,
    pub gpu_release_c: i64,
}

impl Thresholds {
    /// Check that each release bound sits strictly below its trip point.
    /// Without the gap the controller would oscillate every tick near the
    /// boundary.
    pub fn validate(&self) -> Result<(), String> {
        if self.cpu_release_c >= self.cpu_trip_c {
            return Err(format!(
                "CPU release bound {} must be below trip point {}",
                self.cpu_release_c, self.cpu_trip_c
            ));
        }
        if self.gpu_release_c >= self.gpu_trip_c {
            return Err(format!(
                "GPU release bound {} must be below trip point {}",
                self.gpu_release_c, self.gpu_trip_c
            ));
        }
        Ok(())
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            cpu_trip_c: CPU_TRIP_C,
            gpu_trip_c: GPU_TRIP_C,
            cpu_release_c: CPU_RELEASE_C,
            gpu_release_c: GPU_RELEASE_C,
        }
    }
}

/// What the control loop should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Inside the dead band, or already in the correct state.
    Hold,
    /// A trip point was crossed: force the maximum-cooling state.
    EnterTurbo,
    /// Both readings dropped below their release bounds: restore the
    /// user's profile.
    ExitTurbo,
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// The turbo state machine. Starts out of turbo; state is never persisted,
/// so a daemon restart always begins quiet.
#[derive(Debug, Clone)]
pub struct TurboController {
    thresholds: Thresholds,
    in_turbo: bool,
}

impl TurboController {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            in_turbo: false,
        }
    }

    pub fn in_turbo(&self) -> bool {
        self.in_turbo
    }

    /// Evaluate one sample and advance the state machine.
    ///
    /// Entry is eager: either sensor at its trip point is enough. Exit is
    /// conservative: both sensors must be under their release bounds.
    /// Absent readings count as 0 so a dead sensor fails quiet, not hot.
    pub fn evaluate(&mut self, sample: &ThermalSample) -> Action {
        let cpu = sample.cpu_c.unwrap_or(0);
        let gpu = sample.gpu_c.unwrap_or(0);
        let t = &self.thresholds;

        if !self.in_turbo && (cpu >= t.cpu_trip_c || gpu >= t.gpu_trip_c) {
            self.in_turbo = true;
            Action::EnterTurbo
        } else if self.in_turbo && cpu < t.cpu_release_c && gpu < t.gpu_release_c {
            self.in_turbo = false;
            Action::ExitTurbo
        } else {
            Action::Hold
        }
    }
}

impl Default for TurboController {
    fn default() -> Self {
        Self::new(Thresholds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(cpu: i64, gpu: i64) -> ThermalSample {
        ThermalSample {
            cpu_c: Some(cpu),
            gpu_c: Some(gpu),
        }
    }

    #[test]
    fn test_default_thresholds_valid() {
        assert!(Thresholds::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let t = Thresholds {
            cpu_trip_c: 80,
            cpu_release_c: 85,
            ..Thresholds::default()
        };
        assert!(t.validate().is_err());
    }

    #[test]
    fn test_cool_readings_hold() {
        let mut ctl = TurboController::default();
        assert_eq!(ctl.evaluate(&sample(60, 50)), Action::Hold);
        assert_eq!(ctl.evaluate(&sample(79, 69)), Action::Hold);
        assert!(!ctl.in_turbo());
    }

    #[test]
    fn test_cpu_trip_enters_regardless_of_gpu() {
        let mut ctl = TurboController::default();
        assert_eq!(ctl.evaluate(&sample(85, 30)), Action::EnterTurbo);
        assert!(ctl.in_turbo());
    }

    #[test]
    fn test_gpu_trip_enters_regardless_of_cpu() {
        let mut ctl = TurboController::default();
        assert_eq!(ctl.evaluate(&sample(40, 75)), Action::EnterTurbo);
        assert!(ctl.in_turbo());
    }

    #[test]
    fn test_dead_band_holds_state() {
        let mut ctl = TurboController::default();
        ctl.evaluate(&sample(86, 50));
        // CPU between release (80) and trip (85): no change either way.
        assert_eq!(ctl.evaluate(&sample(82, 50)), Action::Hold);
        assert!(ctl.in_turbo());
        // Same band while out of turbo.
        let mut ctl = TurboController::default();
        assert_eq!(ctl.evaluate(&sample(82, 50)), Action::Hold);
        assert!(!ctl.in_turbo());
    }

    #[test]
    fn test_exit_requires_both_sensors_under_release() {
        let mut ctl = TurboController::default();
        ctl.evaluate(&sample(86, 76));
        // CPU is cool enough but GPU still above its release bound.
        assert_eq!(ctl.evaluate(&sample(70, 72)), Action::Hold);
        assert!(ctl.in_turbo());
        // GPU cool, CPU still hot.
        assert_eq!(ctl.evaluate(&sample(81, 50)), Action::Hold);
        assert!(ctl.in_turbo());
        // Both under release.
        assert_eq!(ctl.evaluate(&sample(79, 69)), Action::ExitTurbo);
        assert!(!ctl.in_turbo());
    }

    #[test]
    fn test_transition_edges_fire_once() {
        let mut ctl = TurboController::default();
        assert_eq!(ctl.evaluate(&sample(90, 50)), Action::EnterTurbo);
        // Repeating the same hot sample must not re-issue the entry.
        assert_eq!(ctl.evaluate(&sample(90, 50)), Action::Hold);
        assert_eq!(ctl.evaluate(&sample(90, 50)), Action::Hold);
        assert_eq!(ctl.evaluate(&sample(60, 50)), Action::ExitTurbo);
        assert_eq!(ctl.evaluate(&sample(60, 50)), Action::Hold);
    }

    #[test]
    fn test_reference_sequence() {
        let mut ctl = TurboController::default();
        let expected = [
            (60, 50, Action::Hold),
            (86, 50, Action::EnterTurbo),
            (86, 50, Action::Hold),
            (78, 50, Action::Hold),
            (74, 50, Action::ExitTurbo),
        ];
        for (cpu, gpu, action) in expected {
            assert_eq!(ctl.evaluate(&sample(cpu, gpu)), action, "at ({cpu},{gpu})");
        }
    }

    #[test]
    fn test_absent_gpu_counts_as_cold() {
        let mut ctl = TurboController::default();
        let hot_cpu = ThermalSample {
            cpu_c: Some(86),
            gpu_c: None,
        };
        let cool_cpu = ThermalSample {
            cpu_c: Some(74),
            gpu_c: None,
        };
        // A missing GPU never suppresses a CPU-driven entry...
        assert_eq!(ctl.evaluate(&hot_cpu), Action::EnterTurbo);
        // ...and never blocks release.
        assert_eq!(ctl.evaluate(&cool_cpu), Action::ExitTurbo);
    }

    #[test]
    fn test_all_sensors_absent_is_quiet() {
        let mut ctl = TurboController::default();
        assert_eq!(ctl.evaluate(&ThermalSample::default()), Action::Hold);
        assert!(!ctl.in_turbo());
    }
}
