//! Referential constraint consistency
//!
//! Checks the `(dependent, principal)` property pairs attached to the
//! dependent direction of a navigation pair. Duplicate principal properties
//! across different dependents are allowed.

use super::error::{EdmError, EdmErrorCode};
use super::rule::{RuleId, ValidationRule};
use crate::models::{EdmModel, PropertyId, PropertyType};
use std::collections::HashSet;

/// The same dependent property may appear only once per constraint
pub struct DuplicateDependentProperty;

impl ValidationRule for DuplicateDependentProperty {
    fn id(&self) -> RuleId {
        RuleId::DuplicateDependentProperty
    }

    fn check(&self, model: &EdmModel, errors: &mut Vec<EdmError>) {
        for (_, nav) in model.navigations() {
            let mut seen = HashSet::new();
            let duplicate = nav.dependent_properties().find(|prop| !seen.insert(*prop));
            if let Some(prop) = duplicate {
                errors.push(EdmError::new(
                    EdmErrorCode::DuplicateDependentProperty,
                    format!(
                        "The dependent property '{}' appears more than once in the referential constraint of the navigation '{}'.",
                        model.property(prop).name,
                        nav.name
                    ),
                    nav.location.clone(),
                ));
            }
        }
    }
}

/// Dependent properties must be declared on the dependent type or its bases
pub struct DependentPropertyBelongsToDependent;

impl ValidationRule for DependentPropertyBelongsToDependent {
    fn id(&self) -> RuleId {
        RuleId::DependentPropertyBelongsToDependent
    }

    fn check(&self, model: &EdmModel, errors: &mut Vec<EdmError>) {
        for (_, nav) in model.navigations() {
            for prop in nav.dependent_properties() {
                if model.property_declared_in_chain(prop, nav.declaring_type) {
                    continue;
                }
                errors.push(EdmError::new(
                    EdmErrorCode::DependentPropertiesMustBelongToDependentEntity,
                    format!(
                        "The dependent property '{}' of the navigation '{}' must belong to the dependent entity type '{}'.",
                        model.property(prop).name,
                        nav.name,
                        model.qualified_name(nav.declaring_type)
                    ),
                    nav.location.clone(),
                ));
            }
        }
    }
}

/// Principal properties must be declared on the principal type or its bases
pub struct PrincipalPropertyBelongsToPrincipal;

impl ValidationRule for PrincipalPropertyBelongsToPrincipal {
    fn id(&self) -> RuleId {
        RuleId::PrincipalPropertyBelongsToPrincipal
    }

    fn check(&self, model: &EdmModel, errors: &mut Vec<EdmError>) {
        for (_, nav) in model.navigations() {
            for prop in nav.principal_properties() {
                if model.property_declared_in_chain(prop, nav.target_type) {
                    continue;
                }
                errors.push(EdmError::new(
                    EdmErrorCode::BadPrincipalPropertiesInReferentialConstraint,
                    format!(
                        "The principal property '{}' referenced by the navigation '{}' is not a property of the principal entity type '{}'.",
                        model.property(prop).name,
                        nav.name,
                        model.qualified_name(nav.target_type)
                    ),
                    nav.location.clone(),
                ));
            }
        }
    }
}

/// Each dependent/principal pair must share one primitive type
pub struct ConstraintTypeMatch;

impl ValidationRule for ConstraintTypeMatch {
    fn id(&self) -> RuleId {
        RuleId::ConstraintTypeMatch
    }

    fn check(&self, model: &EdmModel, errors: &mut Vec<EdmError>) {
        for (_, nav) in model.navigations() {
            for pair in &nav.constraint {
                let dependent = model.property(pair.dependent);
                let principal = model.property(pair.principal);
                let matches = matches!(
                    (dependent.property_type, principal.property_type),
                    (PropertyType::Primitive(left), PropertyType::Primitive(right)) if left == right
                ) && dependent.is_collection == principal.is_collection;
                if matches {
                    continue;
                }
                errors.push(EdmError::new(
                    EdmErrorCode::TypeMismatchRelationshipConstraint,
                    format!(
                        "The types of the dependent property '{}' and the principal property '{}' in the referential constraint of the navigation '{}' do not match.",
                        dependent.name, principal.name, nav.name
                    ),
                    nav.location.clone(),
                ));
            }
        }
    }
}

/// Dependent properties that form the dependent key must be non-nullable
///
/// Applies only when the dependent properties are exactly the key of the
/// dependent type. One error per nullable key property, in key order.
pub struct NullableDependentKey;

impl ValidationRule for NullableDependentKey {
    fn id(&self) -> RuleId {
        RuleId::NullableDependentKey
    }

    fn check(&self, model: &EdmModel, errors: &mut Vec<EdmError>) {
        for (_, nav) in model.navigations() {
            if !nav.has_constraint() {
                continue;
            }
            let key = model.key_of(nav.declaring_type);
            if key.is_empty() {
                continue;
            }

            let dependents: HashSet<PropertyId> = nav.dependent_properties().collect();
            let key_set: HashSet<PropertyId> = key.iter().copied().collect();
            if dependents != key_set {
                continue;
            }

            for prop in key.iter().copied() {
                let property = model.property(prop);
                if !property.nullable {
                    continue;
                }
                let location = if property.location.is_known() {
                    property.location.clone()
                } else {
                    nav.location.clone()
                };
                errors.push(EdmError::new(
                    EdmErrorCode::InvalidKey,
                    format!(
                        "The key property '{}' of the entity type '{}' is a dependent property of the navigation '{}' and cannot be nullable.",
                        property.name,
                        model.qualified_name(nav.declaring_type),
                        nav.name
                    ),
                    location,
                ));
            }
        }
    }
}
