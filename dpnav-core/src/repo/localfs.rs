//! Repository backed by the local filesystem.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use crate::error::{Error, Result};
use crate::item::{self, Item};
use crate::location::{Kind, Location};

const MODIFIED_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

pub struct LocalRepository {
    start: PathBuf,
    offset: UtcOffset,
}

impl LocalRepository {
    pub fn new(start: impl Into<PathBuf>) -> Self {
        // Must be queried before other threads exist; later calls may fail on unix.
        let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
        Self { start: start.into(), offset }
    }

    /// The start directory, with a descriptor chain reaching up to `Root`.
    pub fn initial_item(&self) -> Result<Item> {
        let path = fs::canonicalize(&self.start)
            .map_err(|source| Error::LocalIo { path: self.start.clone(), source })?;
        if !path.is_dir() {
            return Err(Error::Config(format!("{} is not a directory", path.display())));
        }
        let location = directory_chain(&path);
        tracing::debug!(path = %path.display(), depth = location.depth(), "local start directory");
        Ok(Item::new(display_name(&path), location))
    }

    pub fn title(&self, location: &Location) -> String {
        match location.kind {
            Kind::Root => "Local filesystem".to_owned(),
            _ => location.path.clone(),
        }
    }

    pub fn get_list(&self, location: &Arc<Location>) -> Result<Vec<Item>> {
        match location.kind {
            Kind::Root => Ok(filesystem_roots(location)),
            Kind::LocalDirectory => self.read_directory(location),
            _ => Ok(Vec::new()),
        }
    }

    fn read_directory(&self, location: &Arc<Location>) -> Result<Vec<Item>> {
        let dir = location.local_path.as_path();
        let io_err = |source: std::io::Error| Error::LocalIo { path: dir.to_path_buf(), source };
        let mut children = Vec::new();
        for entry in fs::read_dir(dir).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            let path = entry.path();
            // Broken symlinks still get listed, described by the link itself.
            let meta = match fs::metadata(&path).or_else(|_| fs::symlink_metadata(&path)) {
                Ok(meta) => meta,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            let kind = if meta.is_dir() { Kind::LocalDirectory } else { Kind::LocalFile };
            let size = if meta.is_dir() { String::new() } else { meta.len().to_string() };
            let modified = meta.modified().map(|t| self.format_time(t)).unwrap_or_default();
            let loc = Location::descend_local(location, kind, &path);
            let name = entry.file_name().to_string_lossy().into_owned();
            children.push(Item::new(name, loc).with_details(size, modified));
        }
        Ok(item::with_parent_entry(location, children))
    }

    fn format_time(&self, t: SystemTime) -> String {
        OffsetDateTime::from(t)
            .to_offset(self.offset)
            .format(MODIFIED_FORMAT)
            .unwrap_or_default()
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Builds descriptors from the filesystem root down to `path`.
fn directory_chain(path: &Path) -> Arc<Location> {
    let mut prefixes: Vec<&Path> = path.ancestors().collect();
    prefixes.reverse();
    prefixes.into_iter().fold(Location::root(), |parent, dir| {
        Location::descend_local(&parent, Kind::LocalDirectory, dir)
    })
}

#[cfg(unix)]
fn filesystem_roots(root: &Arc<Location>) -> Vec<Item> {
    vec![Item::new("/", Location::descend_local(root, Kind::LocalDirectory, Path::new("/")))]
}

#[cfg(windows)]
fn filesystem_roots(root: &Arc<Location>) -> Vec<Item> {
    (b'A'..=b'Z')
        .map(|letter| format!("{}:\\", letter as char))
        .filter(|drive| Path::new(drive).exists())
        .map(|drive| {
            let loc = Location::descend_local(root, Kind::LocalDirectory, Path::new(&drive));
            Item::new(drive, loc)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_climbs_to_root() {
        let dir = tempfile::tempdir().unwrap();
        let repo = LocalRepository::new(dir.path());
        let start = repo.initial_item().unwrap();
        assert_eq!(start.location.kind, Kind::LocalDirectory);
        let top = start.location.ancestors().last().unwrap();
        assert_eq!(top.kind, Kind::Root);
        let below_root = start.location.ancestors().nth(start.location.depth() - 1).unwrap();
        assert!(below_root.parent.as_ref().is_some_and(|p| p.kind == Kind::Root));
    }

    #[test]
    fn lists_directories_first_with_details() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "hello").unwrap();
        fs::create_dir(dir.path().join("Zdir")).unwrap();
        let repo = LocalRepository::new(dir.path());
        let start = repo.initial_item().unwrap();
        let items = repo.get_list(&start.location).unwrap();
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["..", "Zdir", "b.txt"]);
        assert_eq!(items[2].size, "5");
        assert_eq!(items[2].modified.len(), "2024-01-01 00:00:00".len());
        assert_eq!(items[2].location.kind, Kind::LocalFile);
    }

    #[test]
    fn root_has_no_parent_entry() {
        let repo = LocalRepository::new(".");
        let items = repo.get_list(&Location::root()).unwrap();
        assert!(!items.is_empty());
        assert!(items.iter().all(|i| !i.is_parent_entry()));
        assert_eq!(repo.title(&Location::root()), "Local filesystem");
    }

    #[test]
    fn start_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let repo = LocalRepository::new(dir.path().join("missing"));
        assert!(matches!(repo.initial_item(), Err(Error::LocalIo { .. })));
    }
}
