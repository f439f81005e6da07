//! EDM Validation - navigation-property and referential-integrity checks
//!
//! Provides:
//! - A schema graph of entity and complex types, navigation properties and
//!   an entity container, assembled with [`ModelBuilder`]
//! - Partner pairing and navigation property binding resolution
//! - Version-keyed validation rules reporting [`EdmError`]s
//! - YAML/JSON model documents for loading and saving graphs

pub mod cli;
pub mod model;
pub mod models;
pub mod validation;

pub use model::{DocumentError, DocumentFormat, ModelLoader, ModelSaver, SchemaDocument};

// Re-export models
pub use models::enums::*;
pub use models::{
    EdmModel, ErrorLocation, ModelBuilder, ModelError, NavigationBinding, NavigationId,
    NavigationPropertyInfo, NavigationSourceId, NavigationTarget, PropertyId, TypeId,
};

pub use validation::{
    EdmError, EdmErrorCode, EdmValidator, RuleId, ValidationConfig, ValidationReport,
    validate_model,
};
