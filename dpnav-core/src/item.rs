//! The tree-node value shown in a pane, and the ordering every listing follows.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::location::Location;

/// Name of the synthetic entry that ascends to the parent location.
pub const PARENT_NAME: &str = "..";

/// One row of a listing.
///
/// `size` and `modified` are display strings formatted by the repository;
/// the engine never interprets them. `selected` is owned by the engine:
/// repositories always produce items with it cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    pub size: String,
    pub modified: String,
    pub selected: bool,
    pub location: Arc<Location>,
}

impl Item {
    pub fn new(name: impl Into<String>, location: Arc<Location>) -> Self {
        Self {
            name: name.into(),
            size: String::new(),
            modified: String::new(),
            selected: false,
            location,
        }
    }

    pub fn with_details(mut self, size: impl Into<String>, modified: impl Into<String>) -> Self {
        self.size = size.into();
        self.modified = modified.into();
        self
    }

    /// The ".." entry for a listing of `listed`.
    pub fn parent_entry(listed: &Location) -> Self {
        Item::new(PARENT_NAME, listed.parent_or_root())
    }

    pub fn is_parent_entry(&self) -> bool {
        self.name == PARENT_NAME
    }
}

/// Total order used by every listing: ".." first, then containers before
/// files, then case-insensitive name, with the exact name as tie-break so
/// repeated loads of the same data always produce the same sequence.
pub fn compare(a: &Item, b: &Item) -> Ordering {
    b.is_parent_entry()
        .cmp(&a.is_parent_entry())
        .then_with(|| a.location.kind.sort_rank().cmp(&b.location.kind.sort_rank()))
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.name.cmp(&b.name))
}

/// Sorts a listing in place with [`compare`].
pub fn sort_items(items: &mut [Item]) {
    items.sort_by(compare);
}

/// Prepends the ".." entry for `listed` and sorts the children.
pub fn with_parent_entry(listed: &Location, mut children: Vec<Item>) -> Vec<Item> {
    sort_items(&mut children);
    let mut items = Vec::with_capacity(children.len() + 1);
    items.push(Item::parent_entry(listed));
    items.extend(children);
    items
}
