//! Entity Trait
//!
//! Contract for records that can live in a forest node.

use std::fmt::Debug;
use std::hash::Hash;

/// A record with a stable identifier
pub trait Entity: Clone {
    /// The type of the record's unique identifier
    type Id: Clone + Eq + Hash + Debug;

    /// Returns the record's unique identifier
    fn id(&self) -> Self::Id;
}
