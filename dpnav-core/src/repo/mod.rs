//! Repositories: the two backends a pane can be bound to.
//!
//! The set of backends is closed, so a repository is an enum and every
//! operation matches exhaustively. Both variants honour the same listing
//! contract: children sorted by [`crate::item::compare`], preceded by a ".."
//! entry everywhere except at `Root`, and either a complete list or an error.

pub mod appliance;
pub mod localfs;

use crate::error::Result;
use crate::item::Item;

pub use self::appliance::ApplianceRepository;
pub use self::localfs::LocalRepository;

pub enum Repository {
    Appliance(ApplianceRepository),
    Local(LocalRepository),
}

impl Repository {
    /// The first location shown when a pane starts.
    pub fn initial_item(&self) -> Result<Item> {
        match self {
            Repository::Appliance(r) => Ok(r.initial_item()),
            Repository::Local(r) => r.initial_item(),
        }
    }

    /// Breadcrumb for the pane header. Never performs I/O.
    pub fn title(&self, item: &Item) -> String {
        match self {
            Repository::Appliance(r) => r.title(&item.location),
            Repository::Local(r) => r.title(&item.location),
        }
    }

    /// Children of `item`'s location. The only blocking, fallible call.
    pub fn get_list(&mut self, item: &Item) -> Result<Vec<Item>> {
        match self {
            Repository::Appliance(r) => r.get_list(&item.location),
            Repository::Local(r) => r.get_list(&item.location),
        }
    }

    /// Drops any bulk snapshot so the next listing refetches it.
    pub fn invalidate_cache(&mut self) {
        match self {
            Repository::Appliance(r) => r.invalidate_cache(),
            Repository::Local(_) => {}
        }
    }

    /// Appliance whose credential must be entered before `item` can be opened.
    pub fn missing_credential(&self, item: &Item) -> Option<String> {
        match self {
            Repository::Appliance(r) => r.missing_credential(item),
            Repository::Local(_) => None,
        }
    }

    /// Stores a credential entered by the user.
    pub fn store_credential(&mut self, appliance: &str, secret: String) {
        match self {
            Repository::Appliance(r) => r.store_credential(appliance, secret),
            Repository::Local(_) => {
                tracing::debug!(appliance, "local repository ignores credentials");
            }
        }
    }
}
