//! Lazy Forest
//!
//! Arena of group nodes that is fetched one level at a time.
//! Expanding a node loads its children once; later toggles only flip
//! visibility. At most one fetch is in flight per node.

mod entity;
mod forest;
mod loader;

pub use entity::Entity;
pub use forest::{Branch, Forest, LoadOutcome, LoadTicket, Node, Toggle, ViewState};
pub use loader::{refresh_roots, sync_and_refresh, toggle, BranchSource, ForestCell, ToggleOutcome};
