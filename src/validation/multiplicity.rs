//! Principal/dependent analysis of constrained navigation pairs
//!
//! The navigation carrying the referential constraint is the dependent
//! direction; its target multiplicity is the multiplicity of the principal
//! end. Nullability of the dependent properties fixes what that
//! multiplicity must be.

use super::error::{EdmError, EdmErrorCode};
use super::rule::{RuleId, ValidationRule};
use crate::models::{EdmModel, Multiplicity, NavigationId};

/// Nullability of a navigation's dependent properties taken together
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependentNullability {
    AllNonNullable,
    AllNullable,
    Mixed,
}

impl DependentNullability {
    /// Principal-end multiplicity implied by this nullability, if any
    pub fn required_principal_multiplicity(self) -> Option<Multiplicity> {
        match self {
            DependentNullability::AllNonNullable => Some(Multiplicity::One),
            DependentNullability::AllNullable => Some(Multiplicity::ZeroOrOne),
            DependentNullability::Mixed => None,
        }
    }
}

/// Classify the dependent properties of `nav`. `None` when it carries no constraint.
pub fn classify_dependents(model: &EdmModel, nav: NavigationId) -> Option<DependentNullability> {
    let navigation = model.navigation(nav);
    let mut nullable = 0usize;
    let mut total = 0usize;
    for prop in navigation.dependent_properties() {
        total += 1;
        if model.property(prop).nullable {
            nullable += 1;
        }
    }

    match (total, nullable) {
        (0, _) => None,
        (_, 0) => Some(DependentNullability::AllNonNullable),
        (total, nullable) if total == nullable => Some(DependentNullability::AllNullable),
        _ => Some(DependentNullability::Mixed),
    }
}

/// Declared principal-end multiplicity must match dependent nullability
pub struct PrincipalEndMultiplicity;

impl ValidationRule for PrincipalEndMultiplicity {
    fn id(&self) -> RuleId {
        RuleId::PrincipalEndMultiplicity
    }

    fn check(&self, model: &EdmModel, errors: &mut Vec<EdmError>) {
        for (id, nav) in model.navigations() {
            let Some(nullability) = classify_dependents(model, id) else {
                continue;
            };
            let Some(required) = nullability.required_principal_multiplicity() else {
                continue;
            };
            if nav.target_multiplicity == required {
                continue;
            }

            let wording = match nullability {
                DependentNullability::AllNullable => "nullable",
                _ => "non-nullable",
            };
            errors.push(EdmError::new(
                EdmErrorCode::InvalidMultiplicityOfPrincipalEnd,
                format!(
                    "Because all dependent properties of the navigation '{}' are {}, the multiplicity of the principal end must be '{}'.",
                    nav.name,
                    wording,
                    required.symbol()
                ),
                nav.location.clone(),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ModelBuilder, NavigationPropertyInfo, PrimitiveKind};

    fn badge_model(id_nullable: bool, name_nullable: bool) -> (EdmModel, NavigationId) {
        let mut builder = ModelBuilder::new("NS");
        let person = builder.entity_type("Person").unwrap();
        let person_id = builder
            .add_primitive_property(person, "Id", PrimitiveKind::Int32, false)
            .unwrap();
        let person_name = builder
            .add_primitive_property(person, "Name", PrimitiveKind::String, false)
            .unwrap();
        let badge = builder.entity_type("Badge").unwrap();
        let dep_id = builder
            .add_primitive_property(badge, "PersonId", PrimitiveKind::Int32, id_nullable)
            .unwrap();
        let dep_name = builder
            .add_primitive_property(badge, "PersonName", PrimitiveKind::String, name_nullable)
            .unwrap();
        let (to_person, _) = builder
            .add_bidirectional_navigation(
                badge,
                NavigationPropertyInfo::new("ToPerson", person, Multiplicity::One)
                    .with_constraint([(dep_id, person_id), (dep_name, person_name)]),
                NavigationPropertyInfo::new("ToBadge", badge, Multiplicity::Many),
            )
            .unwrap();
        (builder.build().unwrap(), to_person)
    }

    #[test]
    fn test_classification() {
        let (model, nav) = badge_model(false, false);
        assert_eq!(
            classify_dependents(&model, nav),
            Some(DependentNullability::AllNonNullable)
        );
        let (model, nav) = badge_model(true, true);
        assert_eq!(
            classify_dependents(&model, nav),
            Some(DependentNullability::AllNullable)
        );
        let (model, nav) = badge_model(true, false);
        assert_eq!(classify_dependents(&model, nav), Some(DependentNullability::Mixed));
        let partner = model.partner(nav).unwrap();
        assert_eq!(classify_dependents(&model, partner), None);
    }

    #[test]
    fn test_principal_duality() {
        let (model, nav) = badge_model(false, false);
        let partner = model.partner(nav).unwrap();
        assert!(!model.is_principal(nav));
        assert!(model.is_principal(partner));
        assert_eq!(model.is_principal(nav), !model.is_principal(partner));
    }

    #[test]
    fn test_non_nullable_dependents_accept_one() {
        let (model, _) = badge_model(false, false);
        let mut errors = Vec::new();
        PrincipalEndMultiplicity.check(&model, &mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_nullable_dependents_reject_one() {
        let (model, _) = badge_model(true, true);
        let mut errors = Vec::new();
        PrincipalEndMultiplicity.check(&model, &mut errors);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, EdmErrorCode::InvalidMultiplicityOfPrincipalEnd);
        assert_eq!(
            errors[0].message,
            "Because all dependent properties of the navigation 'ToPerson' are nullable, the multiplicity of the principal end must be '0..1'."
        );
    }
}
