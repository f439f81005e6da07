//! Entity container, entity sets, singletons and their bindings

use super::handles::{NavigationId, NavigationSourceId, TypeId};
use super::location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Navigation property binding declared on an entity set or singleton
///
/// `path` is `/`-separated and ends with the bound navigation property;
/// `target` names an entity set or singleton of the same container. Both
/// stay textual so that unresolvable bindings can still be reported.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationBinding {
    pub path: String,
    pub target: String,
    pub location: ErrorLocation,
}

impl NavigationBinding {
    pub fn new(path: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            target: target.into(),
            location: ErrorLocation::unknown(),
        }
    }
}

/// Whether a navigation source is a collection or a single instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NavigationSourceKind {
    EntitySet,
    Singleton,
}

/// Entity set or singleton
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationSource {
    pub name: String,
    pub kind: NavigationSourceKind,
    pub element_type: TypeId,
    pub bindings: Vec<NavigationBinding>,
    pub location: ErrorLocation,
}

impl NavigationSource {
    pub fn is_singleton(&self) -> bool {
        self.kind == NavigationSourceKind::Singleton
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperationImportKind {
    Action,
    Function,
}

/// Action or function import. Only its name participates in validation.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationImport {
    pub name: String,
    pub kind: OperationImportKind,
    pub location: ErrorLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntityContainer {
    pub name: String,
    pub entity_sets: Vec<NavigationSource>,
    pub singletons: Vec<NavigationSource>,
    pub operation_imports: Vec<OperationImport>,
    pub location: ErrorLocation,
}

impl EntityContainer {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            entity_sets: Vec::new(),
            singletons: Vec::new(),
            operation_imports: Vec::new(),
            location: ErrorLocation::unknown(),
        }
    }

    pub fn source(&self, id: NavigationSourceId) -> Option<&NavigationSource> {
        match id {
            NavigationSourceId::EntitySet(index) => self.entity_sets.get(index),
            NavigationSourceId::Singleton(index) => self.singletons.get(index),
        }
    }

    pub(crate) fn source_mut(&mut self, id: NavigationSourceId) -> Option<&mut NavigationSource> {
        match id {
            NavigationSourceId::EntitySet(index) => self.entity_sets.get_mut(index),
            NavigationSourceId::Singleton(index) => self.singletons.get_mut(index),
        }
    }

    /// All entity sets followed by all singletons, in declaration order
    pub fn sources(&self) -> impl Iterator<Item = (NavigationSourceId, &NavigationSource)> {
        let sets = self
            .entity_sets
            .iter()
            .enumerate()
            .map(|(index, set)| (NavigationSourceId::EntitySet(index), set));
        let singletons = self
            .singletons
            .iter()
            .enumerate()
            .map(|(index, singleton)| (NavigationSourceId::Singleton(index), singleton));
        sets.chain(singletons)
    }

    /// Entity sets take precedence over singletons of the same name
    pub fn find_source(&self, name: &str) -> Option<NavigationSourceId> {
        self.sources()
            .find(|(_, source)| source.name == name)
            .map(|(id, _)| id)
    }
}

/// Result of asking a navigation source where a navigation property leads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationTarget {
    /// Bound to an entity set or singleton of the container
    Bound(NavigationSourceId),
    /// Containment navigation; its targets are owned and need no binding
    Contained { navigation: NavigationId },
    /// Several bindings of this navigation lead to different targets and no
    /// path was given to disambiguate them
    Ambiguous(Vec<NavigationSourceId>),
    /// Not bound from this navigation source
    Unknown,
}

impl NavigationTarget {
    pub fn source(&self) -> Option<NavigationSourceId> {
        match self {
            NavigationTarget::Bound(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, NavigationTarget::Unknown)
    }
}
