// Copyright (c) 2026 Pegasus Heavy Industries LLC
// Licensed under the MIT License

//! tdpctl-daemon: system service that polls CPU/GPU temperatures, forces a
//! maximum-cooling platform state past the trip points, restores the user's
//! profile on cool-down, and accepts commands from TUI clients over a Unix
//! domain socket.

use clap::Parser;
use linux_tdp_utility::actuator::{Actuator, PlatformMode};
use linux_tdp_utility::config::{self, Config};
use linux_tdp_utility::hysteresis::{
    Action, CPU_TRIP_C, GPU_TRIP_C, ThermalSample, Thresholds, TurboController,
};
use linux_tdp_utility::profile::{self, SAFE_PROFILE};
use linux_tdp_utility::protocol::{self, Request, Response};
use linux_tdp_utility::sensors::{self, CpuZone, FALLBACK_POWER_LIMITS};
use linux_tdp_utility::store::ProfileStore;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::signal::unix::{SignalKind, signal};
use tokio::sync::{Mutex, Notify};
use tokio::time::{self, Duration};

/// Delay before the first sample, so transient post-boot sensor spikes do
/// not immediately trigger the fallback.
const STARTUP_SETTLE: Duration = Duration::from_secs(15);

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "tdpctl-daemon", about = "Linux power-limit and thermal fallback daemon")]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: String,

    /// Override the socket path.
    #[arg(short, long)]
    socket: Option<String>,
}

// ---------------------------------------------------------------------------
// Shared daemon state
// ---------------------------------------------------------------------------

struct DaemonState {
    config: Config,
    config_path: PathBuf,
    controller: TurboController,
    cpu_zone: Option<CpuZone>,
    store: ProfileStore,
    actuator: Actuator,
    fan_boost: bool,
}

type SharedState = Arc<Mutex<DaemonState>>;

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config_path = config::resolve_config_path(Some(&cli.config));
    let cfg = config::load_config(&config_path).unwrap_or_else(|e| {
        log::warn!("Could not load config: {e}, using defaults");
        Config::default()
    });

    if !nix::unistd::Uid::effective().is_root() {
        log::warn!("Not running as root; sensor reads and helper invocations may fail");
    }

    let socket_path = cli
        .socket
        .clone()
        .unwrap_or_else(|| cfg.daemon.socket_path.clone());

    // Discover hardware
    let cpu_zone = sensors::discover_cpu_zone().unwrap_or_else(|e| {
        log::error!("Failed to scan thermal zones: {e}");
        None
    });
    match &cpu_zone {
        Some(zone) => log::info!("CPU thermal zone: {} ({})", zone.id, zone.zone_type),
        None => log::warn!("No CPU thermal zone found; CPU temperature reads as absent"),
    }

    let thresholds = Thresholds::default();
    if let Err(e) = thresholds.validate() {
        anyhow::bail!("Invalid thresholds: {e}");
    }

    let restore_on_exit = cfg.daemon.restore_on_exit;
    let poll_interval = cfg.daemon.poll_interval_ms;
    let mut state_inner = DaemonState {
        store: ProfileStore::new(&cfg.daemon.profile_store_path),
        actuator: Actuator::new(&cfg.daemon.helper_path),
        config: cfg,
        config_path,
        controller: TurboController::new(thresholds),
        cpu_zone,
        fan_boost: false,
    };

    // Establish a known-quiet baseline before the first poll.
    reconcile_startup(&mut state_inner);
    log::info!("Thermal fallback armed (CPU {CPU_TRIP_C}C / GPU {GPU_TRIP_C}C)");

    let state: SharedState = Arc::new(Mutex::new(state_inner));

    // Clean up old socket file
    let _ = std::fs::remove_file(&socket_path);
    let listener = UnixListener::bind(&socket_path)?;

    // Make socket accessible to non-root users
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o666);
        std::fs::set_permissions(&socket_path, perms)?;
    }

    log::info!("Listening on {socket_path}");

    let shutdown = Arc::new(Notify::new());
    let shutdown_signal = shutdown.clone();

    // Signal handler: SIGINT and SIGTERM both stop the daemon.
    let mut sigterm = signal(SignalKind::terminate())?;
    let state_for_signal = state.clone();
    tokio::spawn(async move {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
        log::info!("Received shutdown signal");
        if restore_on_exit {
            let st = state_for_signal.lock().await;
            if st.controller.in_turbo() {
                let desired = st.store.desired_profile();
                match st.actuator.apply_profile(&desired) {
                    Ok(()) => log::info!("Restored profile '{desired}' before exit"),
                    Err(e) => log::error!("Failed to restore profile on exit: {e}"),
                }
            }
        }
        shutdown_signal.notify_waiters();
    });

    // Thermal engine loop
    let state_for_engine = state.clone();
    let shutdown_for_engine = shutdown.clone();
    tokio::spawn(async move {
        log::info!(
            "Settling for {}s before the first sample",
            STARTUP_SETTLE.as_secs()
        );
        tokio::select! {
            _ = time::sleep(STARTUP_SETTLE) => {}
            _ = shutdown_for_engine.notified() => return,
        }

        let mut interval = time::interval(Duration::from_millis(poll_interval));
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let mut st = state_for_engine.lock().await;
                    run_thermal_engine(&mut st);
                }
                _ = shutdown_for_engine.notified() => {
                    break;
                }
            }
        }
    });

    // Accept client connections
    loop {
        tokio::select! {
            result = listener.accept() => {
                match result {
                    Ok((stream, _addr)) => {
                        let state_clone = state.clone();
                        tokio::spawn(handle_client(stream, state_clone));
                    }
                    Err(e) => {
                        log::error!("Failed to accept connection: {e}");
                    }
                }
            }
            _ = shutdown.notified() => {
                log::info!("Daemon shutting down");
                break;
            }
        }
    }

    // Cleanup socket
    let _ = std::fs::remove_file(&socket_path);
    Ok(())
}

// ---------------------------------------------------------------------------
// Startup reconciliation
// ---------------------------------------------------------------------------

/// Apply the stored profile (downgraded if it would boot loud) and force
/// fan boost off, so the machine starts from a known-quiet baseline.
fn reconcile_startup(st: &mut DaemonState) {
    st.store.ensure_initialized();

    let desired = st.store.desired_profile();
    let effective = profile::startup_profile(&desired);
    if effective != desired {
        log::info!("Stored profile '{desired}' is max-cooling, starting with '{effective}'");
        if let Err(e) = st.store.set_desired_profile(effective) {
            log::warn!("Could not correct stored profile: {e}");
        }
    }

    if let Err(e) = st.actuator.apply_profile(effective) {
        log::error!("Failed to apply startup profile '{effective}': {e}");
    }
    if let Err(e) = st.actuator.set_fan_boost(false) {
        log::error!("Failed to disable fan boost: {e}");
    }
    st.fan_boost = false;
}

// ---------------------------------------------------------------------------
// Thermal engine
// ---------------------------------------------------------------------------

fn fmt_temp(t: Option<i64>) -> String {
    t.map(|v| v.to_string()).unwrap_or_else(|| "n/a".to_string())
}

fn run_thermal_engine(st: &mut DaemonState) {
    let sample = ThermalSample {
        cpu_c: st.cpu_zone.as_ref().and_then(sensors::read_cpu_temp),
        gpu_c: sensors::read_gpu_temp(),
    };

    match st.controller.evaluate(&sample) {
        Action::EnterTurbo => enter_turbo(st, &sample),
        Action::ExitTurbo => exit_turbo(st, &sample),
        Action::Hold => {}
    }
}

/// Force the maximum-cooling platform state while keeping the user's
/// wattage ceiling: the forced performance mode can reset the power limits
/// to platform defaults, so the current pair is snapshotted first and
/// reissued after.
fn enter_turbo(st: &DaemonState, sample: &ThermalSample) {
    log::info!(
        "Temperature high (CPU {}C / GPU {}C), engaging turbo cooling",
        fmt_temp(sample.cpu_c),
        fmt_temp(sample.gpu_c)
    );

    let limits = sensors::read_power_limits().unwrap_or_else(|| {
        log::warn!(
            "Power limits unreadable, assuming {}W/{}W",
            FALLBACK_POWER_LIMITS.pl1_watts,
            FALLBACK_POWER_LIMITS.pl2_watts
        );
        FALLBACK_POWER_LIMITS
    });
    let gpu_limit = sensors::read_gpu_power_limit();

    if let Err(e) = st.actuator.set_platform_mode(PlatformMode::Performance) {
        log::error!("Failed to force performance mode: {e}");
    }
    if let Err(e) = st.actuator.set_power_limits(limits) {
        log::error!("Failed to reissue power limits: {e}");
    }
    if let Some(watts) = gpu_limit {
        if let Err(e) = st.actuator.set_gpu_limit(watts) {
            log::error!("Failed to reissue GPU power limit: {e}");
        }
    }
}

fn exit_turbo(st: &DaemonState, sample: &ThermalSample) {
    let mut desired = st.store.desired_profile();
    if profile::find_profile(&st.config.profiles, &desired).is_none() {
        log::warn!("Stored profile '{desired}' is not configured, restoring '{SAFE_PROFILE}'");
        desired = SAFE_PROFILE.to_string();
    }

    log::info!(
        "Temperature ok (CPU {}C / GPU {}C), restoring profile '{desired}'",
        fmt_temp(sample.cpu_c),
        fmt_temp(sample.gpu_c)
    );
    if let Err(e) = st.actuator.apply_profile(&desired) {
        log::error!("Failed to restore profile '{desired}': {e}");
    }
}

// ---------------------------------------------------------------------------
// Client connection handler
// ---------------------------------------------------------------------------

async fn handle_client(stream: UnixStream, state: SharedState) {
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    while let Ok(Some(line)) = lines.next_line().await {
        let response = match protocol::decode::<Request>(&line) {
            Ok(req) => process_request(req, &state).await,
            Err(e) => Response::Error {
                message: format!("Invalid request: {e}"),
            },
        };

        let encoded = match protocol::encode(&response) {
            Ok(s) => s,
            Err(e) => {
                log::error!("Failed to encode response: {e}");
                continue;
            }
        };

        if writer.write_all(encoded.as_bytes()).await.is_err() {
            break; // Client disconnected
        }
    }
}

async fn process_request(req: Request, state: &SharedState) -> Response {
    let mut st = state.lock().await;

    match req {
        Request::GetStatus => {
            let limits = sensors::read_power_limits();
            Response::Status {
                cpu_temp_c: st.cpu_zone.as_ref().and_then(sensors::read_cpu_temp),
                gpu_temp_c: sensors::read_gpu_temp(),
                pl1_watts: limits.map(|l| l.pl1_watts),
                pl2_watts: limits.map(|l| l.pl2_watts),
                gpu_limit_watts: sensors::read_gpu_power_limit(),
                desired_profile: st.store.desired_profile(),
                in_turbo: st.controller.in_turbo(),
                fan_boost: st.fan_boost,
            }
        }

        Request::ApplyProfile { name } => {
            if profile::find_profile(&st.config.profiles, &name).is_none() {
                return Response::Error {
                    message: format!("Unknown profile: {name}"),
                };
            }
            match st.actuator.apply_profile(&name) {
                Ok(()) => {
                    if let Err(e) = st.store.set_desired_profile(&name) {
                        log::warn!("Profile applied but not persisted: {e}");
                    }
                    Response::Ok {
                        message: format!("Applied profile '{name}'"),
                    }
                }
                Err(e) => Response::Error {
                    message: format!("Failed to apply profile: {e}"),
                },
            }
        }

        Request::SetLimits {
            pl1_watts,
            pl2_watts,
        } => {
            if pl1_watts == 0 || pl2_watts < pl1_watts {
                return Response::Error {
                    message: format!("Invalid limits: PL1 {pl1_watts}W / PL2 {pl2_watts}W"),
                };
            }
            let limits = sensors::PowerLimitPair {
                pl1_watts,
                pl2_watts,
            };
            match st.actuator.set_power_limits(limits) {
                Ok(()) => Response::Ok {
                    message: format!("Set limits to {pl1_watts}W / {pl2_watts}W"),
                },
                Err(e) => Response::Error {
                    message: format!("Failed to set limits: {e}"),
                },
            }
        }

        Request::SetGpuLimit { watts } => match st.actuator.set_gpu_limit(watts) {
            Ok(()) => Response::Ok {
                message: format!("Set GPU limit to {watts}W"),
            },
            Err(e) => Response::Error {
                message: format!("Failed to set GPU limit: {e}"),
            },
        },

        Request::SetPlatformMode { mode } => match st.actuator.set_platform_mode(mode) {
            Ok(()) => Response::Ok {
                message: format!("Forced platform mode '{}'", mode.as_str()),
            },
            Err(e) => Response::Error {
                message: format!("Failed to set platform mode: {e}"),
            },
        },

        Request::SetFanBoost { enabled } => match st.actuator.set_fan_boost(enabled) {
            Ok(()) => {
                st.fan_boost = enabled;
                Response::Ok {
                    message: format!("Fan boost {}", if enabled { "on" } else { "off" }),
                }
            }
            Err(e) => Response::Error {
                message: format!("Failed to toggle fan boost: {e}"),
            },
        },

        Request::ListProfiles => Response::Profiles {
            profiles: st.config.profiles.clone(),
        },

        Request::UpsertProfile { profile } => {
            if let Err(e) = profile.validate() {
                return Response::Error { message: e };
            }

            // Replace existing or push new
            let name = profile.name.clone();
            if let Some(existing) = st.config.profiles.iter_mut().find(|p| p.name == name) {
                *existing = profile;
            } else {
                st.config.profiles.push(profile);
            }

            Response::Ok {
                message: format!("Profile '{name}' saved"),
            }
        }

        Request::DeleteProfile { name } => {
            let before = st.config.profiles.len();
            st.config.profiles.retain(|p| p.name != name);
            if st.config.profiles.len() < before {
                Response::Ok {
                    message: format!("Deleted profile '{name}'"),
                }
            } else {
                Response::Error {
                    message: format!("Profile '{name}' not found"),
                }
            }
        }

        Request::SaveConfig => match config::save_config(&st.config_path, &st.config) {
            Ok(()) => Response::Ok {
                message: format!("Config saved to {}", st.config_path.display()),
            },
            Err(e) => Response::Error {
                message: format!("Failed to save config: {e}"),
            },
        },

        Request::ReloadConfig => match config::load_config(&st.config_path) {
            Ok(cfg) => {
                st.store = ProfileStore::new(&cfg.daemon.profile_store_path);
                st.actuator = Actuator::new(&cfg.daemon.helper_path);
                st.config = cfg;
                Response::Ok {
                    message: "Config reloaded".to_string(),
                }
            }
            Err(e) => Response::Error {
                message: format!("Failed to reload config: {e}"),
            },
        },
    }
}
