//! SwipeDeck CLI - Binary entry point and terminal session management.
//!
//! # Architecture
//!
//! The CLI bridges [`swipedeck_engine`] (deck state machine) and
//! [`swipedeck_tui`] (rendering and input), providing RAII-based terminal
//! management with guaranteed cleanup.
//!
//! ```text
//! main() -> load config + items -> TerminalSession::new() -> run_loop()
//!                                                              |
//!                                   DeckController + DeckView <-+
//! ```
//!
//! # Event Loop
//!
//! A fixed 16ms render cadence:
//!
//! 1. Wait for frame tick
//! 2. Drain input queue (non-blocking via [`swipedeck_tui::InputPump`])
//! 3. Apply refreshed items from the file watcher, if any
//! 4. Fire due deck and tutorial timers (`deck.tick()`)
//! 5. Render frame

mod args;
mod items;
mod listener;
mod samples;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
        size as terminal_size,
    },
};
use ratatui::prelude::*;
use serde::de::DeserializeOwned;
use std::{
    fmt::Display,
    fs::{self, OpenOptions},
    io::{Stdout, Write, stdout},
    path::PathBuf,
    str::FromStr,
    sync::Mutex,
    time::{Duration, Instant},
};
use tokio::sync::mpsc;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use swipedeck_engine::{Candidate, DeckController, DeckKind, Job, SwipeDeckConfig};
use swipedeck_tui::{DeckView, InputPump, RenderCard, draw, handle_events, viewport_units};

use crate::args::Cli;
use crate::listener::HostListener;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let (log_file, init_warnings) = open_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // If we can't open a log file, prefer "no logs" over corrupting the TUI
    // by writing to stdout/stderr.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_log_file() -> (Option<(PathBuf, std::fs::File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&candidate)
        {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: ~/.swipedeck/logs/swipedeck.log
    if let Some(config_path) = SwipeDeckConfig::path()
        && let Some(config_dir) = config_path.parent()
    {
        candidates.push(config_dir.join("logs").join("swipedeck.log"));
    }

    // Fallback: ./.swipedeck/logs/swipedeck.log (useful in constrained environments)
    candidates.push(PathBuf::from(".swipedeck").join("logs").join("swipedeck.log"));

    candidates
}

/// RAII wrapper for terminal state with guaranteed cleanup on drop.
///
/// Manages raw mode, the alternate screen, mouse capture (drags become
/// swipes) and focus reporting (losing focus releases a drag). On drop all
/// of it is restored, even after panics or early returns.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self> {
        enable_raw_mode()?;

        let mut out = stdout();
        if let Err(err) = execute!(
            out,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableFocusChange
        ) {
            let _ = disable_raw_mode();
            let _ = execute!(
                out,
                DisableFocusChange,
                DisableMouseCapture,
                LeaveAlternateScreen
            );
            return Err(err.into());
        }

        let terminal = match Terminal::new(CrosstermBackend::new(out)) {
            Ok(t) => t,
            Err(err) => {
                let _ = disable_raw_mode();
                let _ = execute!(
                    stdout(),
                    DisableFocusChange,
                    DisableMouseCapture,
                    LeaveAlternateScreen
                );
                return Err(err.into());
            }
        };

        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            DisableFocusChange,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = self.terminal.show_cursor();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = match SwipeDeckConfig::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(err) => {
            tracing::warn!("{err}; running on defaults");
            SwipeDeckConfig::default()
        }
    };

    let kind = if cli.candidates {
        DeckKind::Candidates
    } else {
        config.deck_kind().unwrap_or_default()
    };
    tracing::info!(deck = kind.as_str(), "Starting");

    match kind {
        DeckKind::Jobs => run::<Job>(kind, &cli, &config, samples::jobs).await,
        DeckKind::Candidates => run::<Candidate>(kind, &cli, &config, samples::candidates).await,
    }
}

fn deck_title(kind: DeckKind) -> &'static str {
    match kind {
        DeckKind::Jobs => "Jobs",
        DeckKind::Candidates => "Candidates",
    }
}

async fn run<T>(
    kind: DeckKind,
    cli: &Cli,
    config: &SwipeDeckConfig,
    fallback: fn() -> Vec<T>,
) -> Result<()>
where
    T: RenderCard + DeserializeOwned + Send + 'static,
    T::Id: FromStr,
    <T::Id as FromStr>::Err: Display,
{
    let (items, watcher) = match &cli.items {
        Some(path) => {
            let (items, raw) = items::load_items::<T>(path)
                .await
                .with_context(|| format!("cannot open {}", path.display()))?;
            (items, Some(items::spawn_watcher(path.clone(), raw)))
        }
        None => (fallback(), None),
    };

    let initial = cli
        .initial
        .as_deref()
        .and_then(|raw| match raw.parse::<T::Id>() {
            Ok(id) => Some(id),
            Err(err) => {
                tracing::warn!("Ignoring --initial {raw:?}: {err}");
                None
            }
        });

    let (columns, _) = terminal_size()?;
    let mut deck = DeckController::new(
        config.settings(kind),
        viewport_units(columns),
        HostListener::default(),
    );
    deck.initialize(items, initial.as_ref(), Instant::now());

    let mut view = DeckView::new(
        deck_title(kind),
        config.boundary_copy(kind),
        config.ui_options(),
    );

    let result = {
        let mut session = TerminalSession::new()?;
        run_loop(&mut session.terminal, &mut deck, &mut view, watcher).await
    };

    deck.unmount();
    if let Some(path) = deck.listener().location() {
        tracing::info!(path, "Last location");
    }
    result
}

const FRAME_DURATION: Duration = Duration::from_millis(16);

async fn run_loop<B, T>(
    terminal: &mut Terminal<B>,
    deck: &mut DeckController<T, HostListener>,
    view: &mut DeckView,
    mut watcher: Option<mpsc::Receiver<Vec<T>>>,
) -> Result<()>
where
    B: Backend + Write,
    B::Error: Send + Sync + 'static,
    T: RenderCard,
{
    let mut input = InputPump::new();
    let mut frames = tokio::time::interval(FRAME_DURATION);
    frames.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result: Result<()> = loop {
        frames.tick().await;

        // Non-blocking input (drain queue only)
        let back = match handle_events(deck, &mut input) {
            Ok(back) => back,
            Err(e) => break Err(e),
        };
        if back || deck.listener().back_requested() {
            break Ok(());
        }

        let now = Instant::now();
        if let Some(rx) = watcher.as_mut() {
            while let Ok(items) = rx.try_recv() {
                deck.replace_items(items, now);
            }
        }

        deck.tick(now);

        if deck.listener_mut().take_bell() {
            let _ = terminal.backend_mut().write_all(b"\x07");
            let _ = Write::flush(terminal.backend_mut());
        }

        if let Err(e) = terminal.draw(|frame| draw(frame, deck, view, now)) {
            break Err(e.into());
        }
    };

    input.shutdown().await;
    result
}
