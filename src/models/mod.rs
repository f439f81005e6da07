//! Schema graph models
//!
//! Defines the read-only graph the validation rules inspect: entity and
//! complex types, structural and navigation properties, and the entity
//! container with its navigation sources and bindings.

pub mod binding;
pub mod builder;
pub mod container;
pub mod edm_model;
pub mod enums;
pub mod error;
pub mod handles;
pub mod location;
pub mod navigation;
pub mod partner;
pub mod structured_type;

pub use binding::{BindingPathResolution, UnresolvedReason, normalize_path};
pub use builder::ModelBuilder;
pub use container::{
    EntityContainer, NavigationBinding, NavigationSource, NavigationSourceKind, NavigationTarget,
    OperationImport, OperationImportKind,
};
pub use edm_model::EdmModel;
pub use enums::*;
pub use error::ModelError;
pub use handles::{NavigationId, NavigationSourceId, PropertyId, TypeId};
pub use location::ErrorLocation;
pub use navigation::{ConstraintPair, NavigationProperty, NavigationPropertyInfo, Partner};
pub use partner::{NavigationPairing, PendingNavigation, resolve_partners};
pub use structured_type::{PropertyType, StructuralProperty, StructuredType};
