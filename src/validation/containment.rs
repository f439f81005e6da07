//! Containment edge rules
//!
//! `contains_target` marks the contained direction of a pair; its partner
//! (explicit or implicit) is the back edge towards the container. A
//! navigation is recursive when its declaring type is or derives from its
//! target type.

use super::error::{EdmError, EdmErrorCode};
use super::rule::{RuleId, ValidationRule};
use crate::models::{EdmModel, Multiplicity, NavigationId, NavigationProperty};

fn containment_edges(
    model: &EdmModel,
    recursive: bool,
) -> impl Iterator<Item = (NavigationId, &NavigationProperty)> {
    model
        .navigations()
        .filter(move |(id, nav)| nav.contains_target && model.is_recursive(*id) == recursive)
}

/// A type contained by an unrelated type has exactly one container
pub struct NonRecursiveContainmentSource;

impl ValidationRule for NonRecursiveContainmentSource {
    fn id(&self) -> RuleId {
        RuleId::NonRecursiveContainment
    }

    fn check(&self, model: &EdmModel, errors: &mut Vec<EdmError>) {
        for (id, nav) in containment_edges(model, false) {
            if model.partner_multiplicity(id) == Multiplicity::One {
                continue;
            }
            errors.push(EdmError::new(
                EdmErrorCode::NavigationPropertyWithNonRecursiveContainmentSourceMustBeFromOne,
                format!(
                    "The containment navigation '{}' is not recursive, so the multiplicity of its partner must be '1'.",
                    nav.name
                ),
                nav.location.clone(),
            ));
        }
    }
}

/// The root of a recursive containment tree has no container
pub struct RecursiveContainmentSource;

impl ValidationRule for RecursiveContainmentSource {
    fn id(&self) -> RuleId {
        RuleId::RecursiveContainmentSource
    }

    fn check(&self, model: &EdmModel, errors: &mut Vec<EdmError>) {
        for (id, nav) in containment_edges(model, true) {
            if model.partner_multiplicity(id) == Multiplicity::ZeroOrOne {
                continue;
            }
            errors.push(EdmError::new(
                EdmErrorCode::NavigationPropertyWithRecursiveContainmentSourceMustBeFromZeroOrOne,
                format!(
                    "The containment navigation '{}' is recursive, so the multiplicity of its partner must be '0..1'.",
                    nav.name
                ),
                nav.location.clone(),
            ));
        }
    }
}

/// A recursive containment must be able to terminate
pub struct RecursiveContainmentTarget;

impl ValidationRule for RecursiveContainmentTarget {
    fn id(&self) -> RuleId {
        RuleId::RecursiveContainmentTarget
    }

    fn check(&self, model: &EdmModel, errors: &mut Vec<EdmError>) {
        for (_, nav) in containment_edges(model, true) {
            if nav.target_multiplicity == Multiplicity::ZeroOrOne {
                continue;
            }
            errors.push(EdmError::new(
                EdmErrorCode::NavigationPropertyWithRecursiveContainmentTargetMustBeOptional,
                format!(
                    "The containment navigation '{}' is recursive, so its target multiplicity must be '0..1'.",
                    nav.name
                ),
                nav.location.clone(),
            ));
        }
    }
}
