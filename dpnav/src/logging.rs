//! Log file setup.
//!
//! The terminal belongs to the TUI, so logs go to a per-process file:
//! `$XDG_STATE_HOME/dpnav/logs/dpnav-<pid>.log` (typically
//! `~/.local/state/dpnav/logs/`), falling back to the system temp directory.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber writing to `explicit` or the default log
/// path, and returns the path actually used.
///
/// The level comes from `RUST_LOG` (default `info`); `debug` forces `debug`.
pub fn init(explicit: Option<&Path>, debug: bool) -> anyhow::Result<PathBuf> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => log_dir().join(format!("dpnav-{}.log", std::process::id())),
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("cannot create log directory {}", parent.display()))?;
    }
    let file = File::create(&path).with_context(|| format!("cannot open log file {}", path.display()))?;

    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    let fmt_layer = fmt::layer().with_ansi(false).with_writer(Arc::new(file));
    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .try_init()
        .context("tracing subscriber already installed")?;
    Ok(path)
}

fn log_dir() -> PathBuf {
    xdg_state_dir()
        .map(|state| state.join("dpnav").join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("dpnav-logs"))
}

fn xdg_state_dir() -> Option<PathBuf> {
    if let Ok(state_home) = std::env::var("XDG_STATE_HOME") {
        let path = PathBuf::from(state_home);
        if path.is_absolute() {
            return Some(path);
        }
    }
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".local").join("state"))
}
