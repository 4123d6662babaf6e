//! Clients for the appliance management interfaces.
//!
//! The appliance repository only needs four questions answered: which
//! domains exist, which filestores a domain has, and what a filestore or
//! directory contains. [`ManagementApi`] is that seam; REST and SOMA are the
//! two wire implementations, chosen per appliance by [`HttpConnector`].

mod http;
pub mod rest;
pub mod soma;

use crate::config::{ApplianceConfig, Interface};
use crate::error::Result;

pub use self::http::HttpClient;
pub use self::rest::RestApi;
pub use self::soma::SomaApi;

/// A file inside a filestore directory. `size` and `modified` are kept as the
/// appliance formats them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub size: String,
    pub modified: String,
}

/// A directory and whatever the response revealed below it.
///
/// Bulk responses populate the whole subtree; per-directory responses leave
/// child directories empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryNode {
    /// Full DataPower path, `local:` for a filestore root.
    pub path: String,
    pub directories: Vec<DirectoryNode>,
    pub files: Vec<FileEntry>,
}

impl DirectoryNode {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), ..Default::default() }
    }

    /// Finds the node for `path` in this subtree.
    pub fn find(&self, path: &str) -> Option<&DirectoryNode> {
        if self.path == path {
            return Some(self);
        }
        self.directories
            .iter()
            .filter(|d| path.starts_with(d.path.as_str()))
            .find_map(|d| d.find(path))
    }
}

/// Read-only view of one appliance's management interface.
pub trait ManagementApi: Send {
    /// True when [`fetch_filestore`](Self::fetch_filestore) returns the whole
    /// subtree in one round trip, making a cached snapshot worthwhile.
    fn is_bulk(&self) -> bool;

    fn domains(&self) -> Result<Vec<String>>;

    fn filestores(&self, domain: &str) -> Result<Vec<String>>;

    /// Contents of a filestore root (`local:`), recursively for bulk interfaces.
    fn fetch_filestore(&self, domain: &str, filestore: &str) -> Result<DirectoryNode>;

    /// Contents of a single directory.
    fn fetch_directory(&self, domain: &str, path: &str) -> Result<DirectoryNode>;
}

/// Creates a [`ManagementApi`] for an appliance.
pub trait Connector: Send {
    fn connect(&self, name: &str, config: &ApplianceConfig) -> Result<Box<dyn ManagementApi>>;
}

/// Production connector: REST or SOMA over `reqwest`, per the appliance config.
#[derive(Debug, Default)]
pub struct HttpConnector;

impl Connector for HttpConnector {
    fn connect(&self, name: &str, config: &ApplianceConfig) -> Result<Box<dyn ManagementApi>> {
        let interface = config.interface()?;
        tracing::info!(appliance = name, ?interface, user = %config.username, "connecting");
        match interface {
            Interface::Rest(url) => Ok(Box::new(RestApi::new(HttpClient::new(url, config)?))),
            Interface::Soma(url) => Ok(Box::new(SomaApi::new(HttpClient::new(url, config)?))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_descends_through_matching_prefixes() {
        let tree = DirectoryNode {
            path: "local:".into(),
            directories: vec![
                DirectoryNode::new("local:/a"),
                DirectoryNode {
                    path: "local:/ab".into(),
                    directories: vec![DirectoryNode::new("local:/ab/c")],
                    files: vec![],
                },
            ],
            files: vec![],
        };
        assert_eq!(tree.find("local:/ab/c").unwrap().path, "local:/ab/c");
        assert_eq!(tree.find("local:").unwrap().path, "local:");
        assert!(tree.find("local:/missing").is_none());
    }
}
