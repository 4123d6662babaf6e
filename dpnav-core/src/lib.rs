//! Navigation engine of dpnav.
//!
//! Two panes, each bound to a [`Repository`]: one browses DataPower
//! appliances (appliance, domain, filestore, directory), the other the local
//! filesystem. The [`Coordinator`] owns all state and is driven by
//! [`InputEvent`]s; it reports what to draw as [`RedrawRequest`]s.

pub mod config;
pub mod coordinator;
pub mod dialog;
pub mod error;
pub mod events;
pub mod item;
pub mod keys;
pub mod location;
pub mod mgmt;
pub mod paths;
pub mod repo;
pub mod session;

pub use config::{ApplianceConfig, Config};
pub use coordinator::{Coordinator, Navigation};
pub use error::{Error, Result};
pub use events::{InputEvent, RedrawRequest, RedrawSink};
pub use item::Item;
pub use location::{Kind, Location};
pub use repo::Repository;
pub use session::{Motion, PaneState, SessionState, Side};
