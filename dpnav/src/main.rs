//! dpnav: dual-pane navigator for DataPower appliances and the local filesystem.
//!
//! Entry point for the `dpnav` binary. Wires the terminal lifecycle (`tui`),
//! the input thread (`input`), the coordinator thread from `dpnav-core`, and
//! the render loop (`ui`, `theme`).
//!
//! # Threads
//!
//! | Thread        | Owns                          | Talks through                     |
//! |---------------|-------------------------------|-----------------------------------|
//! | input         | crossterm `read()`            | crossbeam `bounded(1)` → coordinator |
//! | coordinator   | session, dialog, repositories | tokio `mpsc::channel(1)` → render |
//! | main (tokio)  | the terminal                  | draws the newest redraw request   |
//!
//! # Startup sequence (order matters)
//!
//! 1. Parse the CLI, open the log file, load the config.
//! 2. Build the local repository while the process is still single-threaded:
//!    the local UTC offset can only be read safely before other threads exist.
//! 3. Start the tokio runtime, install the panic hook, register signals,
//!    enter the alternate screen.
//! 4. Spawn the input and coordinator threads; run the render loop.
//!
//! Every way out of the render loop reaches `restore_tui()` before the
//! process prints anything or exits.

mod cli;
mod input;
mod logging;
mod theme;
mod tui;
mod ui;

use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

use anyhow::{anyhow, Context};
use clap::Parser;
use tokio::sync::mpsc;

use dpnav_core::mgmt::HttpConnector;
use dpnav_core::repo::{ApplianceRepository, LocalRepository};
use dpnav_core::{Config, Coordinator, RedrawRequest, Repository};

use crate::cli::Cli;
use crate::theme::Theme;

/// Poll interval for the signal flag while no redraw arrives.
const HEARTBEAT: Duration = Duration::from_millis(50);

/// Why the render loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exit {
    /// The coordinator asked to quit.
    Quit,
    /// The coordinator dropped its sender, normally because it failed.
    Closed,
    /// SIGTERM, SIGINT or SIGHUP.
    Signal,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "exiting with failure");
            eprintln!("dpnav: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let log_path = logging::init(cli.log_file.as_deref(), cli.debug)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), log = %log_path.display(), "dpnav starting");

    let config_file = cli.config.clone().unwrap_or_else(dpnav_core::config::config_path);
    let mut config = Config::load(&config_file)
        .with_context(|| format!("cannot load config {}", config_file.display()))?;
    cli.apply(&mut config)?;
    tracing::info!(
        config = %config_file.display(),
        appliances = config.appliances.len(),
        startup = ?config.previous_appliance,
        "configuration loaded"
    );

    let theme = Theme::from_name(config.theme.as_deref().unwrap_or("dark"));
    let local = LocalRepository::new(cli.local_start(&config));
    let appliance = ApplianceRepository::new(&config, Box::new(HttpConnector));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("cannot start async runtime")?;
    runtime.block_on(interactive(appliance, local, theme))
}

/// Runs the TUI until quit, signal or a fatal coordinator error.
async fn interactive(
    appliance: ApplianceRepository,
    local: LocalRepository,
    theme: Theme,
) -> anyhow::Result<()> {
    tui::install_panic_hook();
    let shutdown = tui::register_signals().context("cannot register signal handlers")?;
    let mut terminal = tui::init_tui().context("cannot initialise terminal")?;

    let outcome = drive(&mut terminal, appliance, local, &theme, &shutdown).await;
    tui::restore_tui().context("cannot restore terminal")?;

    let (exit, coordinator) = outcome?;
    tracing::info!(?exit, "render loop finished");
    match exit {
        // The coordinator may be inside a blocking appliance request; it is
        // not waited for.
        Exit::Signal => Ok(()),
        Exit::Quit | Exit::Closed => coordinator
            .join()
            .map_err(|_| anyhow!("coordinator thread panicked"))?
            .map_err(anyhow::Error::from),
    }
}

type CoordinatorHandle = JoinHandle<dpnav_core::Result<()>>;

async fn drive(
    terminal: &mut tui::Tui,
    appliance: ApplianceRepository,
    local: LocalRepository,
    theme: &Theme,
    shutdown: &AtomicBool,
) -> anyhow::Result<(Exit, CoordinatorHandle)> {
    let size = terminal.size()?;
    let (input_tx, input_rx) = crossbeam_channel::bounded(1);
    let (redraw_tx, mut redraw_rx) = mpsc::channel::<RedrawRequest>(1);

    input::spawn_input_thread(input_tx).context("cannot start input thread")?;
    // Repository calls block (reqwest::blocking), so the coordinator lives on
    // a plain thread outside the runtime.
    let coordinator = std::thread::Builder::new()
        .name("dpnav-coordinator".into())
        .spawn(move || {
            let repos = [Repository::Appliance(appliance), Repository::Local(local)];
            Coordinator::start(repos, size.width, size.height)?.run(input_rx, &redraw_tx)
        })
        .context("cannot start coordinator thread")?;

    let exit = render_loop(terminal, &mut redraw_rx, theme, shutdown).await?;
    Ok((exit, coordinator))
}

/// Draws redraw requests until quit, channel close or a signal.
///
/// Requests carry full snapshots, so when several are pending only the newest
/// is drawn. The heartbeat arm makes sure the signal flag is seen even when
/// nothing is being drawn.
async fn render_loop(
    terminal: &mut tui::Tui,
    rx: &mut mpsc::Receiver<RedrawRequest>,
    theme: &Theme,
    shutdown: &AtomicBool,
) -> std::io::Result<Exit> {
    loop {
        tokio::select! {
            _ = tokio::time::sleep(HEARTBEAT) => {
                if shutdown.load(Ordering::Relaxed) {
                    return Ok(Exit::Signal);
                }
            }
            maybe_request = rx.recv() => {
                let Some(mut request) = maybe_request else {
                    return Ok(Exit::Closed);
                };
                while let Ok(newer) = rx.try_recv() {
                    request = newer;
                }
                if matches!(request, RedrawRequest::Quit) {
                    return Ok(Exit::Quit);
                }
                terminal.draw(|frame| ui::render(frame, &request, theme))?;
                if shutdown.load(Ordering::Relaxed) {
                    return Ok(Exit::Signal);
                }
            }
        }
    }
}
