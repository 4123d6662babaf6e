//! Terminal lifecycle management for dpnav.
//!
//! The TUI renders to stderr so stdout stays free for the final diagnostic of
//! a failed run and for shell redirection. Every exit path (quit key, signal,
//! coordinator failure, panic) goes through [`restore_tui`], which only
//! touches the terminal the first time it is called.

use crossterm::cursor::Show;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
use signal_hook::flag::register;
use std::io::{stderr, BufWriter, Stderr};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// The terminal type used by dpnav: CrosstermBackend over a buffered stderr writer.
pub type Tui = Terminal<CrosstermBackend<BufWriter<Stderr>>>;

/// Set once the terminal has been handed back to the shell.
static RESTORED: AtomicBool = AtomicBool::new(false);

/// Initialise the terminal for TUI rendering.
///
/// Enables raw mode and enters the alternate screen. Call [`restore_tui`] at
/// every exit path.
///
/// # Errors
///
/// Returns `Err` if `enable_raw_mode`, `execute!`, or `Terminal::new` fails.
pub fn init_tui() -> std::io::Result<Tui> {
    let mut out = BufWriter::new(stderr());
    enable_raw_mode()?;
    execute!(out, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(out))
}

/// Restore the terminal to its pre-TUI state.
///
/// Only the first call does anything, so quit, signal and panic paths may all
/// call it without coordinating. ratatui 0.30 does not restore on `Drop`.
///
/// # Errors
///
/// Returns `Err` if `disable_raw_mode` or `execute!` fails. Callers in the panic
/// hook should use `let _ = restore_tui();`.
pub fn restore_tui() -> std::io::Result<()> {
    if RESTORED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    disable_raw_mode()?;
    execute!(stderr(), LeaveAlternateScreen, Show)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic message.
///
/// Must be called **before** [`init_tui`]. Chains onto the previously installed
/// hook so the default panic printer still runs, now on a usable terminal.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_tui();
        original_hook(panic_info);
    }));
}

/// Registers SIGTERM, SIGINT and SIGHUP to set a shared `AtomicBool`.
///
/// The render loop polls the flag on its heartbeat. In raw mode Ctrl-C arrives
/// as a key, so SIGINT only fires when it is sent from outside.
///
/// # Errors
///
/// Returns `Err` if the OS refuses to register a handler.
pub fn register_signals() -> std::io::Result<Arc<AtomicBool>> {
    let flag = Arc::new(AtomicBool::new(false));
    for signal in [SIGTERM, SIGINT, SIGHUP] {
        register(signal, Arc::clone(&flag))?;
    }
    Ok(flag)
}
