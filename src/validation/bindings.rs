//! Navigation property binding rules
//!
//! Every binding of every entity set and singleton is checked on its own,
//! so one malformed binding can yield several errors.

use super::error::{EdmError, EdmErrorCode};
use super::rule::{RuleId, ValidationRule};
use crate::models::{
    BindingPathResolution, EdmModel, NavigationBinding, NavigationSource, NavigationSourceId,
    TypeId,
};

// Each binding of each navigation source, entity sets first.
fn each_binding<F>(model: &EdmModel, mut visit: F)
where
    F: FnMut(&NavigationSource, &NavigationBinding, BindingPathResolution),
{
    let Some(container) = model.container() else {
        return;
    };
    for (_, source) in container.sources() {
        for binding in &source.bindings {
            let resolution = model.resolve_binding_path(source.element_type, &binding.path);
            visit(source, binding, resolution);
        }
    }
}

/// Binding paths must lead to a navigation property
pub struct BindingPathResolves;

impl ValidationRule for BindingPathResolves {
    fn id(&self) -> RuleId {
        RuleId::BindingPathResolves
    }

    fn check(&self, model: &EdmModel, errors: &mut Vec<EdmError>) {
        each_binding(model, |source, binding, resolution| {
            if let BindingPathResolution::Unresolved(reason) = resolution {
                errors.push(EdmError::new(
                    EdmErrorCode::UnresolvedNavigationPropertyBindingPath,
                    format!(
                        "The binding path '{}' of '{}' cannot be resolved: {}.",
                        binding.path, source.name, reason
                    ),
                    binding.location.clone(),
                ));
            }
        });
    }
}

/// Binding targets must exist and hold the navigation's target type
///
/// The target's element type must be the navigation target type, one of
/// its bases or one of its derived types. A binding whose path does not
/// resolve has no valid target either.
pub struct BindingTargetValid;

impl ValidationRule for BindingTargetValid {
    fn id(&self) -> RuleId {
        RuleId::BindingTargetValid
    }

    fn check(&self, model: &EdmModel, errors: &mut Vec<EdmError>) {
        each_binding(model, |source, binding, resolution| {
            let valid = match resolution.navigation() {
                Some(nav) => target_element_type(model, &binding.target).is_some_and(|element| {
                    let target_type = model.navigation(nav).target_type;
                    model.is_or_inherits_from(element, target_type)
                        || model.is_or_inherits_from(target_type, element)
                }),
                None => false,
            };
            if valid {
                return;
            }
            errors.push(EdmError::new(
                EdmErrorCode::NavigationPropertyMappingMustPointToValidTargetForProperty,
                format!(
                    "The binding '{}' of '{}' must point to a valid target for the navigation, but points to '{}'.",
                    binding.path, source.name, binding.target
                ),
                binding.location.clone(),
            ));
        });
    }
}

/// Collection-valued navigations cannot be bound to singletons
pub struct CollectionBindingNotSingleton;

impl ValidationRule for CollectionBindingNotSingleton {
    fn id(&self) -> RuleId {
        RuleId::CollectionBindingNotSingleton
    }

    fn check(&self, model: &EdmModel, errors: &mut Vec<EdmError>) {
        each_binding(model, |source, binding, resolution| {
            let Some(nav) = resolution.navigation() else {
                return;
            };
            let to_singleton = matches!(
                model.find_binding_target(&binding.target),
                Some(NavigationSourceId::Singleton(_))
            );
            if !to_singleton || !model.navigation(nav).is_collection() {
                return;
            }
            errors.push(EdmError::new(
                EdmErrorCode::NavigationPropertyOfCollectionTypeMustNotTargetToSingleton,
                format!(
                    "The collection-valued navigation '{}' of '{}' cannot be bound to the singleton '{}'.",
                    binding.path, source.name, binding.target
                ),
                binding.location.clone(),
            ));
        });
    }
}

fn target_element_type(model: &EdmModel, target: &str) -> Option<TypeId> {
    let id = model.find_binding_target(target)?;
    model
        .container()
        .and_then(|container| container.source(id))
        .map(|source| source.element_type)
}
