//! Configuration store: the TOML config file plus per-appliance credentials.
//!
//! Passwords live here in plaintext for the lifetime of the process. A
//! credential typed into the password dialog is written back with
//! [`ApplianceConfig::set_password`]; nothing is persisted to disk.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Top-level contents of `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Theme name, e.g. `"dark"` or `"catppuccin-mocha"`.
    pub theme: Option<String>,
    /// Starting directory for the local pane.
    pub local_path: Option<PathBuf>,
    /// Appliance opened directly at startup when it has a credential.
    pub previous_appliance: Option<String>,
    pub appliances: BTreeMap<String, ApplianceConfig>,
}

/// Connection settings for one named appliance.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApplianceConfig {
    pub rest_url: Option<String>,
    pub soma_url: Option<String>,
    pub username: String,
    /// Empty until configured or entered through the password dialog.
    pub password: String,
    /// Domain opened right after connecting; empty lists domains first.
    pub domain: String,
    pub insecure_tls: bool,
}

/// The management interface an appliance is reached through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interface<'a> {
    Rest(&'a str),
    Soma(&'a str),
}

impl ApplianceConfig {
    pub fn has_credential(&self) -> bool {
        !self.password.is_empty()
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    /// The configured interface. REST and SOMA are mutually exclusive.
    pub fn interface(&self) -> Result<Interface<'_>> {
        match (self.rest_url.as_deref(), self.soma_url.as_deref()) {
            (Some(url), None) => Ok(Interface::Rest(url)),
            (None, Some(url)) => Ok(Interface::Soma(url)),
            (Some(_), Some(_)) => Err(Error::Config(
                "both rest_url and soma_url are set; choose one".to_owned(),
            )),
            (None, None) => Err(Error::Config("neither rest_url nor soma_url is set".to_owned())),
        }
    }

    /// URL shown in pane titles, empty when no interface is configured.
    pub fn display_url(&self) -> &str {
        self.rest_url
            .as_deref()
            .or(self.soma_url.as_deref())
            .unwrap_or_default()
    }
}

impl Config {
    /// Reads `path`. A missing file yields the default configuration; a file
    /// that exists but does not parse is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(Error::Config(format!("cannot read {}: {e}", path.display())));
            }
        };
        Self::parse(&raw).map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    pub fn parse(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| Error::Config(e.to_string()))
    }
}

/// Returns the default config file path.
///
/// Prefers `$XDG_CONFIG_HOME/dpnav/config.toml`; falls back to
/// `~/.config/dpnav/config.toml` when the env var is absent.
pub fn config_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(".config"))
        })
        .unwrap_or_else(|| PathBuf::from(".config"));
    base.join("dpnav").join("config.toml")
}
