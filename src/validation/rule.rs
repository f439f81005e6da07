//! Rule abstraction and the version-keyed rule registry
//!
//! Each rule is a stateless struct that inspects the whole model and
//! appends every violation it finds, in declaration order of the offending
//! elements. Which rules run is decided here, per modelling-language
//! version, rather than inside the rules.

use super::error::EdmError;
use super::{bindings, containment, container, multiplicity, navigation, referential};
use crate::models::{EdmModel, EdmVersion};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a rule, used to disable it through configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleId {
    NavigationTypeMustBeEntity,
    PrincipalEndMultiplicity,
    DuplicateDependentProperty,
    DependentPropertyBelongsToDependent,
    PrincipalPropertyBelongsToPrincipal,
    ConstraintTypeMatch,
    NullableDependentKey,
    OnDeleteOnManyEnd,
    NonRecursiveContainment,
    RecursiveContainmentSource,
    RecursiveContainmentTarget,
    NavigationSourceTypeMustBeEntity,
    NavigationSourceTypeHasKey,
    ContainerMemberNames,
    BindingPathResolves,
    BindingTargetValid,
    CollectionBindingNotSingleton,
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

pub trait ValidationRule: Send + Sync {
    fn id(&self) -> RuleId;

    /// Versions this rule belongs to
    fn versions(&self) -> &'static [EdmVersion] {
        &[EdmVersion::V4, EdmVersion::V401]
    }

    fn check(&self, model: &EdmModel, errors: &mut Vec<EdmError>);
}

/// Ordered rule battery for one modelling-language version
pub struct RuleRegistry;

impl RuleRegistry {
    pub fn for_version(version: EdmVersion) -> Vec<Box<dyn ValidationRule>> {
        Self::all()
            .into_iter()
            .filter(|rule| rule.versions().contains(&version))
            .collect()
    }

    /// Every rule of every version, in evaluation order
    pub fn all() -> Vec<Box<dyn ValidationRule>> {
        vec![
            Box::new(navigation::TargetMustBeEntityType),
            Box::new(multiplicity::PrincipalEndMultiplicity),
            Box::new(referential::DuplicateDependentProperty),
            Box::new(referential::DependentPropertyBelongsToDependent),
            Box::new(referential::PrincipalPropertyBelongsToPrincipal),
            Box::new(referential::ConstraintTypeMatch),
            Box::new(referential::NullableDependentKey),
            Box::new(navigation::OnDeleteOnManyEnd),
            Box::new(containment::NonRecursiveContainmentSource),
            Box::new(containment::RecursiveContainmentSource),
            Box::new(containment::RecursiveContainmentTarget),
            Box::new(container::SourceTypeMustBeEntityType),
            Box::new(container::SourceTypeHasKey),
            Box::new(container::UniqueMemberNames),
            Box::new(container::CaseInsensitiveUniqueMemberNames),
            Box::new(bindings::BindingPathResolves),
            Box::new(bindings::BindingTargetValid),
            Box::new(bindings::CollectionBindingNotSingleton),
        ]
    }
}
