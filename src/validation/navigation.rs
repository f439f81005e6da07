//! Per-navigation shape rules

use super::error::{EdmError, EdmErrorCode};
use super::rule::{RuleId, ValidationRule};
use crate::models::{EdmModel, Multiplicity, OnDeleteAction};

/// Navigation properties lead to entity types only
pub struct TargetMustBeEntityType;

impl ValidationRule for TargetMustBeEntityType {
    fn id(&self) -> RuleId {
        RuleId::NavigationTypeMustBeEntity
    }

    fn check(&self, model: &EdmModel, errors: &mut Vec<EdmError>) {
        for (_, nav) in model.navigations() {
            if model.structured_type(nav.target_type).is_entity() {
                continue;
            }
            errors.push(EdmError::new(
                EdmErrorCode::InvalidNavigationPropertyType,
                format!(
                    "The type '{}' of the navigation '{}' must be an entity type.",
                    model.qualified_name(nav.target_type),
                    nav.name
                ),
                nav.location.clone(),
            ));
        }
    }
}

/// An on-delete action may not be declared when the opposite end is `*`.
/// `None` takes no action and is always allowed.
pub struct OnDeleteOnManyEnd;

impl ValidationRule for OnDeleteOnManyEnd {
    fn id(&self) -> RuleId {
        RuleId::OnDeleteOnManyEnd
    }

    fn check(&self, model: &EdmModel, errors: &mut Vec<EdmError>) {
        for (id, nav) in model.navigations() {
            let Some(action) = nav.on_delete.filter(|action| *action != OnDeleteAction::None)
            else {
                continue;
            };
            if model.partner_multiplicity(id) != Multiplicity::Many {
                continue;
            }
            errors.push(EdmError::new(
                EdmErrorCode::EndWithManyMultiplicityCannotHaveOperationsSpecified,
                format!(
                    "The navigation '{}' declares the on-delete action '{:?}' but the multiplicity of its partner is '*'.",
                    nav.name, action
                ),
                nav.location.clone(),
            ));
        }
    }
}
