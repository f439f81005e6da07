//! Arena handles for schema graph elements
//!
//! Elements reference each other by index into the arenas owned by
//! [`EdmModel`](super::EdmModel), so partner navigation properties can point
//! at one another without shared ownership.

use serde::{Deserialize, Serialize};

/// Handle to an entity or complex type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeId(pub(crate) usize);

/// Handle to a structural property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PropertyId(pub(crate) usize);

/// Handle to a navigation property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NavigationId(pub(crate) usize);

/// Handle to an entity set or singleton of the entity container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NavigationSourceId {
    EntitySet(usize),
    Singleton(usize),
}

impl TypeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl PropertyId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl NavigationId {
    pub fn index(self) -> usize {
        self.0
    }
}
