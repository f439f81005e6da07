//! Validation functionality
//!
//! Provides the navigation-property and referential-integrity rules:
//! - Principal-end multiplicity against dependent nullability
//! - Referential constraint consistency
//! - Containment edges
//! - Entity container members and navigation property bindings

pub mod bindings;
pub mod config;
pub mod container;
pub mod containment;
pub mod error;
pub mod multiplicity;
pub mod navigation;
pub mod referential;
pub mod rule;
pub mod validator;

pub use config::{ConfigError, ValidationConfig, ValidationConfigBuilder};
pub use error::{EdmError, EdmErrorCode};
pub use multiplicity::{DependentNullability, classify_dependents};
pub use rule::{RuleId, RuleRegistry, ValidationRule};
pub use validator::{EdmValidator, ValidationReport, validate_model};
