//! Location descriptors: immutable, parent-linked addresses into a hierarchy.
//!
//! A `Location` never knows its children. Listings are recomputed on demand
//! by the owning repository, so the only structural link is the `parent`
//! pointer. Descriptors are shared as `Arc<Location>` and only ever created
//! by extending an existing descriptor, which keeps every chain acyclic and
//! terminating at a `Root`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// What kind of node a descriptor addresses.
///
/// `Root` is shared by both backends: on the appliance side it is the
/// "choose an appliance" list, on the local side the list of filesystem roots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Root,
    /// An appliance has been chosen; no domain yet unless one is preconfigured.
    ApplianceConfig,
    RemoteDomain,
    RemoteFilestore,
    RemoteDirectory,
    RemoteFile,
    LocalDirectory,
    LocalFile,
}

impl Kind {
    /// True for kinds that can be entered to produce a child listing.
    pub fn is_container(self) -> bool {
        !matches!(self, Kind::RemoteFile | Kind::LocalFile)
    }

    /// True for kinds that live on an appliance and need its credential.
    pub fn is_remote(self) -> bool {
        matches!(
            self,
            Kind::ApplianceConfig
                | Kind::RemoteDomain
                | Kind::RemoteFilestore
                | Kind::RemoteDirectory
                | Kind::RemoteFile
        )
    }

    /// Ordering rank inside a listing: containers before files.
    pub fn sort_rank(self) -> u8 {
        if self.is_container() {
            0
        } else {
            1
        }
    }
}

/// Immutable address of one node. Fields other than `kind` are meaningful
/// only for the kinds that use them and are empty otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub kind: Kind,
    pub appliance: String,
    pub domain: String,
    /// DataPower path (`local:/dir/file`), or the display form of a local path.
    pub path: String,
    /// Exact local filesystem path; empty for every non-local kind.
    pub local_path: PathBuf,
    pub parent: Option<Arc<Location>>,
}

impl Location {
    /// The top of every chain.
    pub fn root() -> Arc<Location> {
        Arc::new(Location {
            kind: Kind::Root,
            appliance: String::new(),
            domain: String::new(),
            path: String::new(),
            local_path: PathBuf::new(),
            parent: None,
        })
    }

    /// Builds a child descriptor below `parent`.
    pub fn descend(
        parent: &Arc<Location>,
        kind: Kind,
        appliance: impl Into<String>,
        domain: impl Into<String>,
        path: impl Into<String>,
    ) -> Arc<Location> {
        Arc::new(Location {
            kind,
            appliance: appliance.into(),
            domain: domain.into(),
            path: path.into(),
            local_path: PathBuf::new(),
            parent: Some(Arc::clone(parent)),
        })
    }

    /// Builds a local child descriptor. `path` is kept byte for byte, so names
    /// that are not valid UTF-8 can still be entered; `self.path` only holds
    /// its lossy rendering for titles.
    pub fn descend_local(parent: &Arc<Location>, kind: Kind, path: &Path) -> Arc<Location> {
        Arc::new(Location {
            kind,
            appliance: String::new(),
            domain: String::new(),
            path: path.to_string_lossy().into_owned(),
            local_path: path.to_path_buf(),
            parent: Some(Arc::clone(parent)),
        })
    }

    /// The descriptor a ".." entry in this location's listing points at.
    pub fn parent_or_root(&self) -> Arc<Location> {
        self.parent.clone().unwrap_or_else(Location::root)
    }

    /// Walks from `self` towards the root and returns the first descriptor of `kind`.
    pub fn ancestor(&self, kind: Kind) -> Option<&Location> {
        self.ancestors().find(|loc| loc.kind == kind)
    }

    /// Iterates `self` followed by every ancestor up to the root.
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors { next: Some(self) }
    }

    /// Number of hops to the root.
    pub fn depth(&self) -> usize {
        self.ancestors().count() - 1
    }

    /// Address equality ignoring the parent chain.
    ///
    /// Used to find the row of a departed location after ascending, where the
    /// relisted child is a fresh descriptor for the same place.
    pub fn same_place(&self, other: &Location) -> bool {
        self.kind == other.kind
            && self.appliance == other.appliance
            && self.domain == other.domain
            && self.path == other.path
            && self.local_path == other.local_path
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            Kind::Root => write!(f, "<root>"),
            Kind::ApplianceConfig => write!(f, "{}", self.appliance),
            Kind::RemoteDomain => write!(f, "{} ({})", self.appliance, self.domain),
            Kind::RemoteFilestore | Kind::RemoteDirectory | Kind::RemoteFile => {
                write!(f, "{} ({}) {}", self.appliance, self.domain, self.path)
            }
            Kind::LocalDirectory | Kind::LocalFile => write!(f, "{}", self.local_path.display()),
        }
    }
}

/// Iterator returned by [`Location::ancestors`].
pub struct Ancestors<'a> {
    next: Option<&'a Location>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a Location;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent.as_deref();
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filestore_chain() -> Arc<Location> {
        let root = Location::root();
        let appliance = Location::descend(&root, Kind::ApplianceConfig, "dev", "", "");
        let domain = Location::descend(&appliance, Kind::RemoteDomain, "dev", "default", "");
        let store = Location::descend(&domain, Kind::RemoteFilestore, "dev", "default", "local:");
        Location::descend(&store, Kind::RemoteDirectory, "dev", "default", "local:/xsl")
    }

    #[test]
    fn chain_terminates_at_root() {
        let dir = filestore_chain();
        let last = dir.ancestors().last().unwrap();
        assert_eq!(last.kind, Kind::Root);
        assert_eq!(dir.depth(), 4);
    }

    #[test]
    fn ancestor_recovers_domain_context() {
        let dir = filestore_chain();
        let domain = dir.ancestor(Kind::RemoteDomain).unwrap();
        assert_eq!(domain.domain, "default");
        assert!(dir.ancestor(Kind::LocalDirectory).is_none());
        // A descriptor matches itself.
        assert_eq!(dir.ancestor(Kind::RemoteDirectory).unwrap().path, "local:/xsl");
    }

    #[test]
    fn parent_of_root_is_root() {
        assert_eq!(Location::root().parent_or_root().kind, Kind::Root);
    }

    #[test]
    fn same_place_ignores_parents() {
        let a = filestore_chain();
        let b = Location::descend(&Location::root(), Kind::RemoteDirectory, "dev", "default", "local:/xsl");
        assert!(a.same_place(&b));
        assert_ne!(*a, *b);
    }

    #[cfg(unix)]
    #[test]
    fn local_descriptors_keep_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let raw = Path::new("/tmp").join(OsStr::from_bytes(b"bad\xffname"));
        let loc = Location::descend_local(&Location::root(), Kind::LocalDirectory, &raw);
        assert_eq!(loc.local_path, raw);
        assert_eq!(loc.path, "/tmp/bad\u{fffd}name");

        let other = Path::new("/tmp").join(OsStr::from_bytes(b"bad\xfename"));
        let sibling = Location::descend_local(&Location::root(), Kind::LocalDirectory, &other);
        // Same lossy rendering, different places.
        assert_eq!(loc.path, sibling.path);
        assert!(!loc.same_place(&sibling));
    }

    #[test]
    fn files_are_not_containers() {
        assert!(!Kind::LocalFile.is_container());
        assert!(Kind::Root.is_container());
        assert!(Kind::RemoteFilestore.is_remote());
        assert!(!Kind::Root.is_remote());
    }
}
