//! In-memory management API shared by the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use dpnav_core::config::{ApplianceConfig, Config};
use dpnav_core::mgmt::{Connector, DirectoryNode, FileEntry, ManagementApi};
use dpnav_core::repo::ApplianceRepository;
use dpnav_core::{Error, Result};

#[derive(Default)]
pub struct Calls {
    pub connects: AtomicUsize,
    pub domain_lists: AtomicUsize,
    pub filestore_fetches: AtomicUsize,
}

impl Calls {
    pub fn get(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

#[derive(Clone)]
pub struct Fixture {
    pub domains: Vec<String>,
    pub bulk: bool,
    pub broken: bool,
}

impl Default for Fixture {
    fn default() -> Self {
        Self { domains: vec!["domainA".into(), "domainB".into()], bulk: true, broken: false }
    }
}

/// `local:` holding `xsl/` (with `xsl/old/`) and `readme.txt`.
pub fn local_tree() -> DirectoryNode {
    let file = |name: &str| FileEntry { name: name.into(), size: "42".into(), modified: "2024-05-01 10:00:00".into() };
    DirectoryNode {
        path: "local:".into(),
        directories: vec![DirectoryNode {
            path: "local:/xsl".into(),
            directories: vec![DirectoryNode::new("local:/xsl/old")],
            files: vec![file("main.xsl"), file("Common.xsl")],
        }],
        files: vec![file("readme.txt")],
    }
}

struct FakeApi {
    fixture: Fixture,
    calls: Arc<Calls>,
}

impl ManagementApi for FakeApi {
    fn is_bulk(&self) -> bool {
        self.fixture.bulk
    }

    fn domains(&self) -> Result<Vec<String>> {
        self.calls.domain_lists.fetch_add(1, Ordering::SeqCst);
        if self.fixture.broken {
            return Err(Error::Config("appliance unreachable".into()));
        }
        Ok(self.fixture.domains.clone())
    }

    fn filestores(&self, _domain: &str) -> Result<Vec<String>> {
        Ok(vec!["local:".into(), "store:".into()])
    }

    fn fetch_filestore(&self, _domain: &str, _filestore: &str) -> Result<DirectoryNode> {
        self.calls.filestore_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(local_tree())
    }

    fn fetch_directory(&self, _domain: &str, path: &str) -> Result<DirectoryNode> {
        let mut node = local_tree().find(path).cloned().unwrap_or_else(|| DirectoryNode::new(path));
        for dir in &mut node.directories {
            dir.directories.clear();
            dir.files.clear();
        }
        Ok(node)
    }
}

pub struct FakeConnector {
    pub fixture: Fixture,
    pub calls: Arc<Calls>,
}

impl Connector for FakeConnector {
    fn connect(&self, _name: &str, _config: &ApplianceConfig) -> Result<Box<dyn ManagementApi>> {
        self.calls.connects.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeApi { fixture: self.fixture.clone(), calls: Arc::clone(&self.calls) }))
    }
}

/// Config with one SOMA appliance named `dev`, opened at startup.
pub fn config(password: &str, domain: &str) -> Config {
    let mut config = Config { previous_appliance: Some("dev".into()), ..Config::default() };
    config.appliances.insert(
        "dev".into(),
        ApplianceConfig {
            soma_url: Some("https://dp.example:5550".into()),
            username: "admin".into(),
            password: password.into(),
            domain: domain.into(),
            ..ApplianceConfig::default()
        },
    );
    config
}

pub fn appliance_repo(config: &Config, fixture: Fixture) -> (ApplianceRepository, Arc<Calls>) {
    let calls = Arc::new(Calls::default());
    let connector = FakeConnector { fixture, calls: Arc::clone(&calls) };
    (ApplianceRepository::new(config, Box::new(connector)), calls)
}

pub fn names(items: &[dpnav_core::Item]) -> Vec<&str> {
    items.iter().map(|i| i.name.as_str()).collect()
}
