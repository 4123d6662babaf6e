//! Command-line interface and how it overrides the config file.

use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use dpnav_core::{ApplianceConfig, Config};

/// Name of the appliance built from `--rest-url`/`--soma-url` when
/// `--appliance` is not given.
const AD_HOC_APPLIANCE: &str = "cli";

#[derive(Debug, Parser)]
#[command(
    name = "dpnav",
    version,
    about = "Dual-pane navigator for DataPower appliances and the local filesystem"
)]
pub struct Cli {
    /// Starting directory of the local pane
    #[arg(short, long, value_name = "DIR")]
    pub local: Option<PathBuf>,

    /// Config file (default: $XDG_CONFIG_HOME/dpnav/config.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Appliance to open at startup, or the name for an ad-hoc appliance
    #[arg(short, long, value_name = "NAME")]
    pub appliance: Option<String>,

    /// REST management URL of an ad-hoc appliance
    #[arg(short, long, value_name = "URL", conflicts_with = "soma_url")]
    pub rest_url: Option<String>,

    /// SOMA management URL of an ad-hoc appliance
    #[arg(short, long, value_name = "URL")]
    pub soma_url: Option<String>,

    #[arg(short, long)]
    pub username: Option<String>,

    /// Password; leave out to be prompted on first use
    #[arg(short, long)]
    pub password: Option<String>,

    /// Domain to open directly instead of listing domains
    #[arg(short, long)]
    pub domain: Option<String>,

    /// Accept invalid TLS certificates from the appliance
    #[arg(long)]
    pub insecure: bool,

    /// Log file (default: $XDG_STATE_HOME/dpnav/logs/dpnav-<pid>.log)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log at debug level regardless of RUST_LOG
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Starting directory of the local pane: flag, then config, then `.`.
    pub fn local_start(&self, config: &Config) -> PathBuf {
        self.local
            .clone()
            .or_else(|| config.local_path.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Applies appliance selection and connection flags to `config`.
    ///
    /// With a management URL the flags describe a whole new appliance, which
    /// is registered and selected. Without one they adjust the selected
    /// configured appliance.
    pub fn apply(&self, config: &mut Config) -> anyhow::Result<()> {
        if self.rest_url.is_some() || self.soma_url.is_some() {
            let name = self.appliance.as_deref().unwrap_or(AD_HOC_APPLIANCE).to_owned();
            let appliance = ApplianceConfig {
                rest_url: self.rest_url.clone(),
                soma_url: self.soma_url.clone(),
                username: self.username.clone().unwrap_or_default(),
                password: self.password.clone().unwrap_or_default(),
                domain: self.domain.clone().unwrap_or_default(),
                insecure_tls: self.insecure,
            };
            tracing::info!(appliance = %name, "registering appliance from command line");
            config.appliances.insert(name.clone(), appliance);
            config.previous_appliance = Some(name);
            return Ok(());
        }

        if let Some(name) = &self.appliance {
            if !config.appliances.contains_key(name) {
                bail!("appliance '{name}' is not configured; give --rest-url or --soma-url to define it");
            }
            config.previous_appliance = Some(name.clone());
        }
        let overrides = self.username.is_some() || self.password.is_some() || self.domain.is_some() || self.insecure;
        if !overrides {
            return Ok(());
        }
        let Some(selected) = config
            .previous_appliance
            .as_ref()
            .and_then(|name| config.appliances.get_mut(name))
        else {
            bail!("connection flags need --appliance or a configured previous_appliance");
        };
        if let Some(username) = &self.username {
            selected.username = username.clone();
        }
        if let Some(password) = &self.password {
            selected.set_password(password.clone());
        }
        if let Some(domain) = &self.domain {
            selected.domain = domain.clone();
        }
        selected.insecure_tls |= self.insecure;
        Ok(())
    }
}
