//! Repository backed by DataPower appliances.
//!
//! Navigation levels, top to bottom:
//!
//! | Location kind      | Listing                                    |
//! |--------------------|--------------------------------------------|
//! | `Root`             | configured appliances (no "..")            |
//! | `ApplianceConfig`  | domains, or filestores if a domain is set  |
//! | `RemoteDomain`     | filestores of the domain                   |
//! | `RemoteFilestore`  | filestore root contents                    |
//! | `RemoteDirectory`  | directory contents                         |
//!
//! Bulk interfaces (SOMA) return a whole filestore per request. The
//! repository keeps at most one such snapshot: opening a filestore root
//! always refetches it, deeper listings reuse it until
//! [`invalidate_cache`](ApplianceRepository::invalidate_cache) is called.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::{ApplianceConfig, Config};
use crate::error::{Error, Result};
use crate::item::{self, Item};
use crate::location::{Kind, Location};
use crate::mgmt::{Connector, DirectoryNode, ManagementApi};
use crate::paths;

struct Active {
    name: String,
    api: Box<dyn ManagementApi>,
}

struct Snapshot {
    appliance: String,
    domain: String,
    filestore: String,
    tree: DirectoryNode,
}

impl Snapshot {
    fn covers(&self, appliance: &str, domain: &str, filestore: &str) -> bool {
        self.appliance == appliance && self.domain == domain && self.filestore == filestore
    }
}

pub struct ApplianceRepository {
    appliances: BTreeMap<String, ApplianceConfig>,
    startup_appliance: Option<String>,
    connector: Box<dyn Connector>,
    active: Option<Active>,
    snapshot: Option<Snapshot>,
    invalidated: bool,
}

impl ApplianceRepository {
    pub fn new(config: &Config, connector: Box<dyn Connector>) -> Self {
        Self {
            appliances: config.appliances.clone(),
            startup_appliance: config.previous_appliance.clone(),
            connector,
            active: None,
            snapshot: None,
            invalidated: false,
        }
    }

    /// Credential store entry for `name`.
    pub fn appliance(&self, name: &str) -> Option<&ApplianceConfig> {
        self.appliances.get(name)
    }

    /// Opens the startup appliance directly when it is configured and already
    /// has a credential; otherwise starts at the appliance list.
    pub fn initial_item(&self) -> Item {
        let root = Location::root();
        let usable = self
            .startup_appliance
            .as_deref()
            .and_then(|name| self.appliances.get(name).map(|cfg| (name, cfg)))
            .filter(|(_, cfg)| cfg.has_credential());
        match usable {
            Some((name, cfg)) => {
                tracing::debug!(appliance = name, "starting inside appliance");
                Item::new(name, Location::descend(&root, Kind::ApplianceConfig, name, &cfg.domain, ""))
            }
            None => {
                if let Some(name) = &self.startup_appliance {
                    tracing::info!(appliance = %name, "startup appliance unknown or without password");
                }
                Item::new("", root)
            }
        }
    }

    pub fn title(&self, location: &Location) -> String {
        if location.kind == Kind::Root {
            return "DataPower appliances".to_owned();
        }
        let (user, url) = self
            .appliances
            .get(&location.appliance)
            .map(|cfg| (cfg.username.as_str(), cfg.display_url()))
            .unwrap_or_default();
        format!("{user} @ {url} ({}) {}", location.domain, location.path)
    }

    pub fn get_list(&mut self, location: &Arc<Location>) -> Result<Vec<Item>> {
        tracing::debug!(%location, kind = ?location.kind, "appliance listing");
        match location.kind {
            Kind::Root => Ok(self.list_appliances(location)),
            Kind::ApplianceConfig if location.domain.is_empty() => self
                .list_domains(location)
                .map_err(|e| e.listing("list domains", location.to_string())),
            Kind::ApplianceConfig | Kind::RemoteDomain => self
                .list_filestores(location)
                .map_err(|e| e.listing("list filestores", location.to_string())),
            Kind::RemoteFilestore | Kind::RemoteDirectory => self
                .list_directory(location)
                .map_err(|e| e.listing("list directory", location.to_string())),
            Kind::RemoteFile | Kind::LocalDirectory | Kind::LocalFile => Ok(Vec::new()),
        }
    }

    pub fn invalidate_cache(&mut self) {
        tracing::debug!(cached = self.snapshot.is_some(), "filestore snapshot invalidated");
        self.invalidated = true;
    }

    /// Name of the appliance whose empty credential blocks entering `item`.
    pub fn missing_credential(&self, item: &Item) -> Option<String> {
        if item.is_parent_entry() || !item.location.kind.is_remote() {
            return None;
        }
        let name = item
            .location
            .ancestor(Kind::ApplianceConfig)
            .map_or(item.location.appliance.as_str(), |loc| loc.appliance.as_str());
        match self.appliances.get(name) {
            Some(cfg) if !cfg.has_credential() => Some(name.to_owned()),
            _ => None,
        }
    }

    pub fn store_credential(&mut self, appliance: &str, secret: String) {
        let Some(cfg) = self.appliances.get_mut(appliance) else {
            tracing::warn!(appliance, "credential entered for unknown appliance");
            return;
        };
        cfg.set_password(secret);
        tracing::info!(appliance, "credential stored");
        // A client built with the old credential must not be reused.
        if self.active.as_ref().is_some_and(|a| a.name == appliance) {
            self.active = None;
            self.snapshot = None;
        }
    }

    fn list_appliances(&mut self, location: &Arc<Location>) -> Vec<Item> {
        self.active = None;
        self.snapshot = None;
        let mut items: Vec<Item> = self
            .appliances
            .iter()
            .map(|(name, cfg)| {
                Item::new(
                    name,
                    Location::descend(location, Kind::ApplianceConfig, name, &cfg.domain, ""),
                )
            })
            .collect();
        item::sort_items(&mut items);
        items
    }

    fn list_domains(&mut self, location: &Arc<Location>) -> Result<Vec<Item>> {
        let domains = self.connect(&location.appliance)?.domains()?;
        let children = domains
            .into_iter()
            .map(|domain| {
                let loc = Location::descend(location, Kind::RemoteDomain, &location.appliance, &domain, "");
                Item::new(domain, loc)
            })
            .collect();
        Ok(item::with_parent_entry(location, children))
    }

    fn list_filestores(&mut self, location: &Arc<Location>) -> Result<Vec<Item>> {
        let filestores = self.connect(&location.appliance)?.filestores(&location.domain)?;
        let children = filestores
            .into_iter()
            .map(|store| {
                let loc = Location::descend(
                    location,
                    Kind::RemoteFilestore,
                    &location.appliance,
                    &location.domain,
                    &store,
                );
                Item::new(store, loc)
            })
            .collect();
        Ok(item::with_parent_entry(location, children))
    }

    fn list_directory(&mut self, location: &Arc<Location>) -> Result<Vec<Item>> {
        let appliance = location.appliance.as_str();
        let domain = location.domain.as_str();
        let path = location.path.as_str();
        self.connect(appliance)?;

        let Self { active, snapshot, invalidated, .. } = self;
        let Some(api) = active.as_ref().map(|a| a.api.as_ref()) else {
            return Err(Error::Config(format!("appliance {appliance} is not connected")));
        };

        let node = if api.is_bulk() {
            let filestore = paths::filestore_of(path);
            let cached = snapshot.as_ref().is_some_and(|s| s.covers(appliance, domain, filestore));
            if paths::is_filestore_root(path) || *invalidated || !cached {
                tracing::debug!(appliance, domain, filestore, "fetching filestore snapshot");
                let tree = api.fetch_filestore(domain, filestore)?;
                *invalidated = false;
                *snapshot = Some(Snapshot {
                    appliance: appliance.to_owned(),
                    domain: domain.to_owned(),
                    filestore: filestore.to_owned(),
                    tree,
                });
            } else {
                tracing::debug!(appliance, domain, path, "listing from cached snapshot");
            }
            match snapshot.as_ref().and_then(|s| s.tree.find(path)) {
                Some(node) => node.clone(),
                None => {
                    // Gone since the snapshot was taken; show it empty.
                    tracing::warn!(appliance, domain, path, "directory missing from snapshot");
                    DirectoryNode::new(path)
                }
            }
        } else {
            api.fetch_directory(domain, path)?
        };

        Ok(item::with_parent_entry(location, directory_items(location, node)))
    }

    /// Returns the client for `appliance`, connecting if another appliance
    /// (or none) is active.
    fn connect(&mut self, appliance: &str) -> Result<&dyn ManagementApi> {
        let active = match self.active.take() {
            Some(active) if active.name == appliance => active,
            _ => {
                let cfg = self
                    .appliances
                    .get(appliance)
                    .ok_or_else(|| Error::Config(format!("unknown appliance {appliance}")))?;
                self.snapshot = None;
                Active { name: appliance.to_owned(), api: self.connector.connect(appliance, cfg)? }
            }
        };
        Ok(self.active.insert(active).api.as_ref())
    }
}

fn directory_items(location: &Arc<Location>, node: DirectoryNode) -> Vec<Item> {
    let dirs = node.directories.into_iter().map(|dir| {
        let name = paths::dp_name(&dir.path).to_owned();
        let loc = Location::descend(
            location,
            Kind::RemoteDirectory,
            &location.appliance,
            &location.domain,
            dir.path,
        );
        Item::new(name, loc)
    });
    let files = node.files.into_iter().map(|file| {
        let loc = Location::descend(
            location,
            Kind::RemoteFile,
            &location.appliance,
            &location.domain,
            paths::dp_path(&location.path, &file.name),
        );
        Item::new(file.name, loc).with_details(file.size, file.modified)
    });
    dirs.chain(files).collect()
}
