//! Validation error taxonomy

use crate::models::ErrorLocation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable codes of the problems the validator reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdmErrorCode {
    InvalidNavigationPropertyType,
    InvalidMultiplicityOfPrincipalEnd,
    DuplicateDependentProperty,
    DependentPropertiesMustBelongToDependentEntity,
    BadPrincipalPropertiesInReferentialConstraint,
    TypeMismatchRelationshipConstraint,
    InvalidKey,
    EndWithManyMultiplicityCannotHaveOperationsSpecified,
    NavigationPropertyWithNonRecursiveContainmentSourceMustBeFromOne,
    NavigationPropertyWithRecursiveContainmentSourceMustBeFromZeroOrOne,
    NavigationPropertyWithRecursiveContainmentTargetMustBeOptional,
    EntitySetTypeMustBeEntityType,
    SingletonTypeMustBeEntityType,
    NavigationSourceTypeHasNoKeys,
    DuplicateEntityContainerMemberName,
    UnresolvedNavigationPropertyBindingPath,
    NavigationPropertyMappingMustPointToValidTargetForProperty,
    NavigationPropertyOfCollectionTypeMustNotTargetToSingleton,
}

impl fmt::Display for EdmErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// One problem found in a model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdmError {
    pub code: EdmErrorCode,
    pub message: String,
    pub location: ErrorLocation,
}

impl EdmError {
    pub fn new(code: EdmErrorCode, message: impl Into<String>, location: ErrorLocation) -> Self {
        Self {
            code,
            message: message.into(),
            location,
        }
    }
}

impl fmt::Display for EdmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.code, self.message, self.location)
    }
}
