//! `teamgen` binary.
//!
//! Loads settings, takes over the terminal, and runs the draw UI at a fixed
//! frame rate until the user quits. Logs go to a file because the terminal is
//! owned by the UI.

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::{
    env,
    fs::{self, File, OpenOptions},
    io::{Stdout, Write, stdout},
    path::{Path, PathBuf},
    sync::Mutex,
    time::Duration,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use teamgen_engine::{App, AppSettings, TeamgenConfig};
use teamgen_tui::{InputPump, draw, handle_events};

const FRAME_DURATION: Duration = Duration::from_millis(16);
const LOG_FILE_NAME: &str = "teamgen.log";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let mut problems = Vec::new();
    let opened = log_dirs()
        .into_iter()
        .find_map(|dir| match open_log(&dir) {
            Ok(file) => Some((dir.join(LOG_FILE_NAME), file)),
            Err(problem) => {
                problems.push(problem);
                None
            }
        });

    let Some((path, file)) = opened else {
        // No usable log file: keep the filter so `tracing` macros stay cheap.
        tracing_subscriber::registry().with(filter).init();
        return;
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .with(filter)
        .init();
    tracing::info!(path = %path.display(), "teamgen starting");
    for problem in problems {
        tracing::warn!("{problem}");
    }
}

/// `~/.teamgen/logs`, then `./.teamgen/logs`.
fn log_dirs() -> Vec<PathBuf> {
    let home = TeamgenConfig::path()
        .and_then(|config| config.parent().map(|dir| dir.join("logs")));
    home.into_iter()
        .chain(std::iter::once(Path::new(".teamgen").join("logs")))
        .collect()
}

fn open_log(dir: &Path) -> Result<File, String> {
    fs::create_dir_all(dir)
        .map_err(|e| format!("cannot create log dir {}: {e}", dir.display()))?;
    let path = dir.join(LOG_FILE_NAME);
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| format!("cannot open log file {}: {e}", path.display()))
}

fn load_settings() -> AppSettings {
    let config = TeamgenConfig::load().unwrap_or_else(|err| {
        tracing::warn!(path = %err.path().display(), "Falling back to default settings: {err}");
        None
    });
    let seed = env::var("TEAMGEN_SEED").ok();
    AppSettings::from_config(config.as_ref()).with_env_seed(seed.as_deref())
}

/// Raw mode plus alternate screen for as long as this value lives.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        match Self::alternate_screen() {
            Ok(terminal) => Ok(Self { terminal }),
            Err(err) => {
                restore_terminal();
                Err(err)
            }
        }
    }

    fn alternate_screen() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        execute!(stdout(), EnterAlternateScreen)?;
        Ok(Terminal::new(CrosstermBackend::new(stdout()))?)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        restore_terminal();
        let _ = self.terminal.show_cursor();
    }
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(stdout(), LeaveAlternateScreen);
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let mut app = App::new(load_settings());
    let result = async {
        let mut session = TerminalSession::enter()?;
        run_app(&mut session.terminal, &mut app).await
    }
    .await;

    match &result {
        Ok(()) => tracing::info!("teamgen exiting"),
        Err(err) => tracing::error!("teamgen exiting on error: {err:?}"),
    }
    result
}

async fn run_app<B>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B: Backend + Write,
    B::Error: Send + Sync + 'static,
{
    let mut input = InputPump::new();
    let mut frames = tokio::time::interval(FRAME_DURATION);
    frames.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result = loop {
        frames.tick().await;

        match handle_events(app, &mut input) {
            Ok(true) => break Ok(()),
            Ok(false) => {}
            Err(err) => break Err(err),
        }

        app.tick();
        if let Err(err) = terminal.draw(|frame| draw(frame, app)) {
            break Err(err.into());
        }
    };

    input.shutdown().await;
    result
}
