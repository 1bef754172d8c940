// Copyright (c) 2026 Pegasus Heavy Industries LLC
// Licensed under the MIT License

//! tdpctl-tui: terminal UI client that connects to the tdpctl daemon over a
//! Unix domain socket and provides live monitoring, profile selection,
//! custom power limits, and hardware switches.

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use linux_tdp_utility::actuator::PlatformMode;
use linux_tdp_utility::config;
use linux_tdp_utility::profile::PowerProfile;
use linux_tdp_utility::protocol::{self, Request, Response};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs},
};
use std::io::{self, BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;
use std::time::Duration;

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "tdpctl-tui", about = "Linux power-limit control TUI client")]
struct Cli {
    /// Path to the daemon socket.
    #[arg(short, long, default_value = config::DEFAULT_SOCKET_PATH)]
    socket: String,
}

// ---------------------------------------------------------------------------
// App state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Dashboard,
    Profiles,
    Limits,
    System,
}

impl Tab {
    const ALL: [Tab; 4] = [Tab::Dashboard, Tab::Profiles, Tab::Limits, Tab::System];

    fn index(self) -> usize {
        match self {
            Tab::Dashboard => 0,
            Tab::Profiles => 1,
            Tab::Limits => 2,
            Tab::System => 3,
        }
    }

    fn title(self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Profiles => "Profiles",
            Tab::Limits => "Limits",
            Tab::System => "System",
        }
    }
}

/// Last status snapshot received from the daemon.
#[derive(Debug, Clone, Default)]
struct StatusData {
    cpu_temp_c: Option<i64>,
    gpu_temp_c: Option<i64>,
    pl1_watts: Option<u32>,
    pl2_watts: Option<u32>,
    gpu_limit_watts: Option<u32>,
    desired_profile: String,
    in_turbo: bool,
    fan_boost: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LimitField {
    Pl1,
    Pl2,
    Gpu,
}

struct App {
    tab: Tab,
    running: bool,
    status_message: String,
    connection: Option<Connection>,

    // Dashboard
    status: Option<StatusData>,

    // Profiles
    profiles: Vec<PowerProfile>,
    profile_list_state: ListState,

    // Limits
    limit_field: LimitField,
    pl1_sel: u32,
    pl2_sel: u32,
    gpu_sel: u32,
}

struct Connection {
    stream: UnixStream,
    reader: BufReader<UnixStream>,
}

impl Connection {
    fn connect(path: &str) -> io::Result<Self> {
        let stream = UnixStream::connect(path)?;
        stream.set_read_timeout(Some(Duration::from_secs(2)))?;
        let reader = BufReader::new(stream.try_clone()?);
        Ok(Self { stream, reader })
    }

    fn send_request(&mut self, req: &Request) -> io::Result<Response> {
        let encoded = protocol::encode(req).map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, format!("Encode error: {e}"))
        })?;
        self.stream.write_all(encoded.as_bytes())?;
        self.stream.flush()?;

        let mut line = String::new();
        self.reader.read_line(&mut line)?;
        protocol::decode(&line).map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, format!("Decode error: {e}"))
        })
    }
}

impl App {
    fn new(socket_path: &str) -> Self {
        let connection = match Connection::connect(socket_path) {
            Ok(c) => {
                log::info!("Connected to daemon at {socket_path}");
                Some(c)
            }
            Err(e) => {
                log::error!("Could not connect to daemon: {e}");
                None
            }
        };

        let mut app = Self {
            tab: Tab::Dashboard,
            running: true,
            status_message: String::new(),
            connection,
            status: None,
            profiles: Vec::new(),
            profile_list_state: ListState::default(),
            limit_field: LimitField::Pl1,
            pl1_sel: 35,
            pl2_sel: 45,
            gpu_sel: 100,
        };

        if app.connection.is_some() {
            app.refresh_status();
            app.refresh_profiles();
        } else {
            app.status_message =
                "Not connected to daemon. Is tdpctl-daemon running?".to_string();
        }

        app
    }

    fn refresh_status(&mut self) {
        if let Some(conn) = &mut self.connection {
            match conn.send_request(&Request::GetStatus) {
                Ok(Response::Status {
                    cpu_temp_c,
                    gpu_temp_c,
                    pl1_watts,
                    pl2_watts,
                    gpu_limit_watts,
                    desired_profile,
                    in_turbo,
                    fan_boost,
                }) => {
                    self.status = Some(StatusData {
                        cpu_temp_c,
                        gpu_temp_c,
                        pl1_watts,
                        pl2_watts,
                        gpu_limit_watts,
                        desired_profile,
                        in_turbo,
                        fan_boost,
                    });
                }
                Ok(Response::Error { message }) => {
                    self.status_message = format!("Error: {message}");
                }
                Err(e) => {
                    self.status_message = format!("Connection error: {e}");
                    self.connection = None;
                }
                _ => {}
            }
        }
    }

    fn refresh_profiles(&mut self) {
        if let Some(conn) = &mut self.connection {
            match conn.send_request(&Request::ListProfiles) {
                Ok(Response::Profiles { profiles }) => {
                    self.profiles = profiles;
                    if self.profile_list_state.selected().is_none() && !self.profiles.is_empty() {
                        self.profile_list_state.select(Some(0));
                    }
                }
                Err(e) => {
                    self.status_message = format!("Connection error: {e}");
                    self.connection = None;
                }
                _ => {}
            }
        }
    }

    /// Send a request and surface the ok/error message in the status bar.
    fn send_simple(&mut self, req: Request) {
        if let Some(conn) = &mut self.connection {
            match conn.send_request(&req) {
                Ok(Response::Ok { message }) => {
                    self.status_message = message;
                }
                Ok(Response::Error { message }) => {
                    self.status_message = format!("Error: {message}");
                }
                Err(e) => {
                    self.status_message = format!("Connection error: {e}");
                    self.connection = None;
                }
                _ => {}
            }
        }
        self.refresh_status();
    }

    fn selected_profile(&self) -> Option<&PowerProfile> {
        self.profile_list_state
            .selected()
            .and_then(|i| self.profiles.get(i))
    }

    fn apply_selected_profile(&mut self) {
        let Some(profile) = self.selected_profile().cloned() else {
            self.status_message = "Select a profile first".to_string();
            return;
        };
        self.send_simple(Request::ApplyProfile { name: profile.name });
    }

    fn apply_limit_selection(&mut self) {
        match self.limit_field {
            LimitField::Pl1 | LimitField::Pl2 => self.send_simple(Request::SetLimits {
                pl1_watts: self.pl1_sel,
                pl2_watts: self.pl2_sel,
            }),
            LimitField::Gpu => self.send_simple(Request::SetGpuLimit {
                watts: self.gpu_sel,
            }),
        }
    }

    fn toggle_fan_boost(&mut self) {
        let enabled = self.status.as_ref().map(|s| s.fan_boost).unwrap_or(false);
        self.send_simple(Request::SetFanBoost { enabled: !enabled });
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&cli.socket);

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> anyhow::Result<()> {
    let tick_rate = Duration::from_millis(500);

    while app.running {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                handle_input(app, key.code, key.modifiers);
            }
        } else {
            // Periodic refresh
            app.refresh_status();
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Input handling
// ---------------------------------------------------------------------------

fn handle_input(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
    // Global keys
    match key {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
            return;
        }
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        _ => {}
    }

    // Tab switching
    match key {
        KeyCode::Char('1') => app.tab = Tab::Dashboard,
        KeyCode::Char('2') => app.tab = Tab::Profiles,
        KeyCode::Char('3') => app.tab = Tab::Limits,
        KeyCode::Char('4') => app.tab = Tab::System,
        KeyCode::Tab => {
            let idx = (app.tab.index() + 1) % Tab::ALL.len();
            app.tab = Tab::ALL[idx];
        }
        KeyCode::BackTab => {
            let idx = (app.tab.index() + Tab::ALL.len() - 1) % Tab::ALL.len();
            app.tab = Tab::ALL[idx];
        }
        _ => {}
    }

    // Tab-specific keys
    match app.tab {
        Tab::Dashboard => handle_dashboard_input(app, key),
        Tab::Profiles => handle_profiles_input(app, key),
        Tab::Limits => handle_limits_input(app, key),
        Tab::System => handle_system_input(app, key),
    }
}

fn handle_dashboard_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('r') => {
            app.refresh_status();
            app.status_message = "Refreshed".to_string();
        }
        _ => {}
    }
}

fn handle_profiles_input(app: &mut App, key: KeyCode) {
    let count = app.profiles.len();
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            if count > 0 {
                let i = app.profile_list_state.selected().unwrap_or(0);
                let new_i = if i == 0 { count - 1 } else { i - 1 };
                app.profile_list_state.select(Some(new_i));
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if count > 0 {
                let i = app.profile_list_state.selected().unwrap_or(0);
                let new_i = (i + 1) % count;
                app.profile_list_state.select(Some(new_i));
            }
        }
        KeyCode::Enter => {
            app.apply_selected_profile();
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(profile) = app.selected_profile().cloned() {
                app.send_simple(Request::DeleteProfile { name: profile.name });
                app.refresh_profiles();
            }
        }
        _ => {}
    }
}

fn handle_limits_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            app.limit_field = match app.limit_field {
                LimitField::Pl1 => LimitField::Gpu,
                LimitField::Pl2 => LimitField::Pl1,
                LimitField::Gpu => LimitField::Pl2,
            };
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.limit_field = match app.limit_field {
                LimitField::Pl1 => LimitField::Pl2,
                LimitField::Pl2 => LimitField::Gpu,
                LimitField::Gpu => LimitField::Pl1,
            };
        }
        KeyCode::Left | KeyCode::Char('h') => match app.limit_field {
            LimitField::Pl1 => app.pl1_sel = app.pl1_sel.saturating_sub(5).max(10),
            LimitField::Pl2 => app.pl2_sel = app.pl2_sel.saturating_sub(5).max(15),
            LimitField::Gpu => app.gpu_sel = app.gpu_sel.saturating_sub(5).max(50),
        },
        KeyCode::Right | KeyCode::Char('l') => match app.limit_field {
            LimitField::Pl1 => app.pl1_sel = (app.pl1_sel + 5).min(150),
            LimitField::Pl2 => app.pl2_sel = (app.pl2_sel + 5).min(180),
            LimitField::Gpu => app.gpu_sel = (app.gpu_sel + 5).min(200),
        },
        KeyCode::Char('c') => {
            // Copy current live values into the selectors
            if let Some(status) = &app.status {
                if let Some(pl1) = status.pl1_watts {
                    app.pl1_sel = pl1;
                }
                if let Some(pl2) = status.pl2_watts {
                    app.pl2_sel = pl2;
                }
                if let Some(gpu) = status.gpu_limit_watts {
                    app.gpu_sel = gpu;
                }
                app.status_message = "Selectors set to live values".to_string();
            }
        }
        KeyCode::Enter => {
            app.apply_limit_selection();
        }
        _ => {}
    }
}

fn handle_system_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('f') => app.toggle_fan_boost(),
        KeyCode::Char('u') => app.send_simple(Request::SetPlatformMode {
            mode: PlatformMode::Quiet,
        }),
        KeyCode::Char('b') => app.send_simple(Request::SetPlatformMode {
            mode: PlatformMode::Balanced,
        }),
        KeyCode::Char('p') => app.send_simple(Request::SetPlatformMode {
            mode: PlatformMode::Performance,
        }),
        KeyCode::Char('s') => app.send_simple(Request::SaveConfig),
        KeyCode::Char('r') => {
            app.send_simple(Request::ReloadConfig);
            app.refresh_profiles();
        }
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// UI rendering
// ---------------------------------------------------------------------------

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // tab bar
            Constraint::Min(0),    // content
            Constraint::Length(3), // status bar
        ])
        .split(f.area());

    draw_tabs(f, app, chunks[0]);

    match app.tab {
        Tab::Dashboard => draw_dashboard(f, app, chunks[1]),
        Tab::Profiles => draw_profiles(f, app, chunks[1]),
        Tab::Limits => draw_limits(f, app, chunks[1]),
        Tab::System => draw_system(f, app, chunks[1]),
    }

    draw_status_bar(f, app, chunks[2]);
}

fn draw_tabs(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Tab::ALL.iter().map(|t| Line::from(t.title())).collect();

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(" tdpctl "))
        .select(app.tab.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    f.render_widget(tabs, area);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let connected = if app.connection.is_some() {
        Span::styled(" CONNECTED ", Style::default().fg(Color::Green).bold())
    } else {
        Span::styled(" DISCONNECTED ", Style::default().fg(Color::Red).bold())
    };

    let msg = Span::raw(format!("  {}", app.status_message));

    let help = match app.tab {
        Tab::Dashboard => " [r]efresh  [q]uit ",
        Tab::Profiles => " [j/k]nav  [Enter]apply  [d]elete  [q]uit ",
        Tab::Limits => " [j/k]field  [h/l]adjust  [c]opy live  [Enter]apply  [q]uit ",
        Tab::System => " [f]an boost  [u]quiet [b]alanced [p]erformance  [s]ave [r]eload  [q]uit ",
    };

    let status_line = Line::from(vec![connected, msg]);
    let help_line = Line::from(Span::styled(help, Style::default().fg(Color::DarkGray)));

    let paragraph =
        Paragraph::new(vec![status_line, help_line]).block(Block::default().borders(Borders::ALL));

    f.render_widget(paragraph, area);
}

fn temp_span(label: &str, temp: Option<i64>) -> Line<'static> {
    let value = match temp {
        Some(t) => {
            let color = if t >= 85 {
                Color::Red
            } else if t >= 70 {
                Color::Yellow
            } else {
                Color::Green
            };
            Span::styled(format!("{t}°C"), Style::default().fg(color).bold())
        }
        None => Span::styled("n/a", Style::default().fg(Color::DarkGray)),
    };
    Line::from(vec![Span::raw(format!("  {label:<5}")), value])
}

fn draw_dashboard(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let Some(status) = &app.status else {
        let placeholder = Paragraph::new("No status received from daemon yet")
            .block(Block::default().borders(Borders::ALL).title(" Status "));
        f.render_widget(placeholder, area);
        return;
    };

    // Power panel
    let watts = |w: Option<u32>| {
        w.map(|v| format!("{v} W"))
            .unwrap_or_else(|| "n/a".to_string())
    };
    let turbo_line = if status.in_turbo {
        Line::from(Span::styled(
            "  TURBO COOLING ACTIVE",
            Style::default().fg(Color::Red).bold(),
        ))
    } else {
        Line::from(Span::styled(
            "  thermal state normal",
            Style::default().fg(Color::Green),
        ))
    };

    let power_lines = vec![
        Line::from(""),
        Line::from(format!("  PL1 (sustained): {}", watts(status.pl1_watts))),
        Line::from(format!("  PL2 (burst):     {}", watts(status.pl2_watts))),
        Line::from(format!(
            "  GPU limit:       {}",
            watts(status.gpu_limit_watts)
        )),
        Line::from(""),
        Line::from(format!("  Profile: {}", status.desired_profile)),
        Line::from(format!(
            "  Fan boost: {}",
            if status.fan_boost { "on" } else { "off" }
        )),
        Line::from(""),
        turbo_line,
    ];

    let power_widget = Paragraph::new(power_lines)
        .block(Block::default().borders(Borders::ALL).title(" Power "));
    f.render_widget(power_widget, chunks[0]);

    // Temperature panel
    let temp_lines = vec![
        Line::from(""),
        temp_span("CPU", status.cpu_temp_c),
        temp_span("GPU", status.gpu_temp_c),
        Line::from(""),
        Line::from(Span::styled(
            "  Turbo cooling engages at CPU 85°C / GPU 75°C",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "  and releases below CPU 80°C / GPU 70°C",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let temp_widget = Paragraph::new(temp_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Temperatures "),
    );
    f.render_widget(temp_widget, chunks[1]);
}

fn draw_profiles(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let desired = app
        .status
        .as_ref()
        .map(|s| s.desired_profile.as_str())
        .unwrap_or("");

    // Profile list
    let items: Vec<ListItem> = app
        .profiles
        .iter()
        .map(|p| {
            let marker = if p.name == desired { "● " } else { "  " };
            ListItem::new(format!(
                "{marker}{} ({}W / {}W)",
                p.name, p.pl1_watts, p.pl2_watts
            ))
        })
        .collect();

    let profile_list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Select Profile "),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    f.render_stateful_widget(profile_list, chunks[0], &mut app.profile_list_state.clone());

    // Detail panel
    let info = if let Some(profile) = app.selected_profile() {
        vec![
            Line::from(""),
            Line::from(format!("  Profile: {}", profile.name)),
            Line::from(format!("  PL1 (sustained): {} W", profile.pl1_watts)),
            Line::from(format!("  PL2 (burst):     {} W", profile.pl2_watts)),
            Line::from(""),
            Line::from(Span::styled(
                "  [Enter] applies the profile and makes it the",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                "  restore target after turbo cooling episodes.",
                Style::default().fg(Color::DarkGray),
            )),
        ]
    } else {
        vec![Line::from("  Select a profile from the list")]
    };

    let info_widget =
        Paragraph::new(info).block(Block::default().borders(Borders::ALL).title(" Details "));
    f.render_widget(info_widget, chunks[1]);
}

fn limit_bar(label: &str, value: u32, min: u32, max: u32, selected: bool) -> Line<'static> {
    let bar_width = 30usize;
    let frac = (value.saturating_sub(min)) as f64 / (max - min) as f64;
    let filled = (frac * bar_width as f64).round() as usize;
    let filled = filled.min(bar_width);
    let bar = format!(
        "{} [{}{}] {value:>3} W",
        label,
        "█".repeat(filled),
        "░".repeat(bar_width - filled)
    );

    if selected {
        Line::from(Span::styled(
            format!("▶ {bar}"),
            Style::default().fg(Color::Cyan).bold(),
        ))
    } else {
        Line::from(format!("  {bar}"))
    }
}

fn draw_limits(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(0)])
        .split(area);

    let lines = vec![
        Line::from(""),
        limit_bar(
            "PL1",
            app.pl1_sel,
            10,
            150,
            app.limit_field == LimitField::Pl1,
        ),
        Line::from(""),
        limit_bar(
            "PL2",
            app.pl2_sel,
            15,
            180,
            app.limit_field == LimitField::Pl2,
        ),
        Line::from(""),
        limit_bar(
            "GPU",
            app.gpu_sel,
            50,
            200,
            app.limit_field == LimitField::Gpu,
        ),
    ];

    let selector_widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Custom Power Limits "),
    );
    f.render_widget(selector_widget, chunks[0]);

    let note = vec![
        Line::from(""),
        Line::from("  [Enter] on PL1/PL2 sends both CPU limits together;"),
        Line::from("  [Enter] on GPU sends the GPU board limit."),
        Line::from(""),
        Line::from(Span::styled(
            "  Custom limits do not change the profile selection; the",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "  stored profile is still restored after turbo cooling.",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let note_widget =
        Paragraph::new(note).block(Block::default().borders(Borders::ALL).title(" Notes "));
    f.render_widget(note_widget, chunks[1]);
}

fn draw_system(f: &mut Frame, app: &App, area: Rect) {
    let fan_boost = app
        .status
        .as_ref()
        .map(|s| if s.fan_boost { "on" } else { "off" })
        .unwrap_or("unknown");

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  [f] ", Style::default().fg(Color::Cyan).bold()),
            Span::raw(format!("Fan boost override (currently {fan_boost})")),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  [u] ", Style::default().fg(Color::Cyan).bold()),
            Span::raw("Force quiet platform mode"),
        ]),
        Line::from(vec![
            Span::styled("  [b] ", Style::default().fg(Color::Cyan).bold()),
            Span::raw("Force balanced platform mode"),
        ]),
        Line::from(vec![
            Span::styled("  [p] ", Style::default().fg(Color::Cyan).bold()),
            Span::raw("Force performance platform mode"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  [s] ", Style::default().fg(Color::Cyan).bold()),
            Span::raw("Save daemon configuration"),
        ]),
        Line::from(vec![
            Span::styled("  [r] ", Style::default().fg(Color::Cyan).bold()),
            Span::raw("Reload daemon configuration from disk"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  Platform mode and fan boost are overridden by the daemon",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "  whenever turbo cooling engages.",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Hardware Switches "),
    );
    f.render_widget(widget, area);
}
