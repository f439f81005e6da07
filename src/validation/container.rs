//! Entity container rules

use super::error::{EdmError, EdmErrorCode};
use super::rule::{RuleId, ValidationRule};
use crate::models::{EdmModel, EdmVersion, ErrorLocation, NavigationSourceKind};
use std::collections::HashSet;

/// Entity sets and singletons hold entities
pub struct SourceTypeMustBeEntityType;

impl ValidationRule for SourceTypeMustBeEntityType {
    fn id(&self) -> RuleId {
        RuleId::NavigationSourceTypeMustBeEntity
    }

    fn check(&self, model: &EdmModel, errors: &mut Vec<EdmError>) {
        let Some(container) = model.container() else {
            return;
        };
        for (_, source) in container.sources() {
            if model.structured_type(source.element_type).is_entity() {
                continue;
            }
            let (code, noun) = match source.kind {
                NavigationSourceKind::EntitySet => (EdmErrorCode::EntitySetTypeMustBeEntityType, "entity set"),
                NavigationSourceKind::Singleton => (EdmErrorCode::SingletonTypeMustBeEntityType, "singleton"),
            };
            errors.push(EdmError::new(
                code,
                format!(
                    "The type '{}' of the {} '{}' must be an entity type.",
                    model.qualified_name(source.element_type),
                    noun,
                    source.name
                ),
                source.location.clone(),
            ));
        }
    }
}

/// Entity sets need a keyed element type
pub struct SourceTypeHasKey;

impl ValidationRule for SourceTypeHasKey {
    fn id(&self) -> RuleId {
        RuleId::NavigationSourceTypeHasKey
    }

    fn check(&self, model: &EdmModel, errors: &mut Vec<EdmError>) {
        let Some(container) = model.container() else {
            return;
        };
        for set in &container.entity_sets {
            let element = model.structured_type(set.element_type);
            if !element.is_entity() || !model.key_of(set.element_type).is_empty() {
                continue;
            }
            errors.push(EdmError::new(
                EdmErrorCode::NavigationSourceTypeHasNoKeys,
                format!(
                    "The entity set '{}' is based on the type '{}' that has no keys defined.",
                    set.name,
                    model.qualified_name(set.element_type)
                ),
                set.location.clone(),
            ));
        }
    }
}

// Entity sets, then singletons, then operation imports.
fn container_members(model: &EdmModel) -> Vec<(&str, &ErrorLocation)> {
    let Some(container) = model.container() else {
        return Vec::new();
    };
    container
        .sources()
        .map(|(_, source)| (source.name.as_str(), &source.location))
        .chain(
            container
                .operation_imports
                .iter()
                .map(|import| (import.name.as_str(), &import.location)),
        )
        .collect()
}

fn report_duplicates<F>(model: &EdmModel, errors: &mut Vec<EdmError>, normalize: F)
where
    F: Fn(&str) -> String,
{
    let Some(container) = model.container() else {
        return;
    };
    let mut seen = HashSet::new();
    for (name, location) in container_members(model) {
        if seen.insert(normalize(name)) {
            continue;
        }
        errors.push(EdmError::new(
            EdmErrorCode::DuplicateEntityContainerMemberName,
            format!(
                "Each member name in the entity container '{}' must be unique. The name '{}' is already defined.",
                container.name, name
            ),
            location.clone(),
        ));
    }
}

/// Container member names are unique across all member kinds
pub struct UniqueMemberNames;

impl ValidationRule for UniqueMemberNames {
    fn id(&self) -> RuleId {
        RuleId::ContainerMemberNames
    }

    fn versions(&self) -> &'static [EdmVersion] {
        &[EdmVersion::V4]
    }

    fn check(&self, model: &EdmModel, errors: &mut Vec<EdmError>) {
        report_duplicates(model, errors, str::to_string);
    }
}

/// Like [`UniqueMemberNames`], treating names that differ only by case as equal
pub struct CaseInsensitiveUniqueMemberNames;

impl ValidationRule for CaseInsensitiveUniqueMemberNames {
    fn id(&self) -> RuleId {
        RuleId::ContainerMemberNames
    }

    fn versions(&self) -> &'static [EdmVersion] {
        &[EdmVersion::V401]
    }

    fn check(&self, model: &EdmModel, errors: &mut Vec<EdmError>) {
        report_duplicates(model, errors, str::to_lowercase);
    }
}
