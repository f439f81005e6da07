//! Model saving functionality
//!
//! Writes an [`EdmModel`] back out as a [`SchemaDocument`]. A model that
//! was loaded from a document and saved again loads into an equivalent
//! graph.

use super::document::{
    BindingDocument, ConstraintDocument, ContainerDocument, DocumentFormat, NavigationDocument,
    NavigationSourceDocument, OperationImportDocument, PropertyDocument, SchemaDocument,
    TypeDocument,
};
use super::error::DocumentError;
use crate::models::{
    EdmModel, Multiplicity, NavigationId, NavigationSource, Partner, PropertyType, TypeId,
};
use std::path::Path;
use tracing::info;

/// Serializes schema graphs
pub struct ModelSaver;

impl ModelSaver {
    pub fn to_document(model: &EdmModel) -> SchemaDocument {
        let mut entity_types = Vec::new();
        let mut complex_types = Vec::new();
        for (id, ty) in model.types() {
            let document = type_document(model, id);
            if ty.is_entity() {
                entity_types.push(document);
            } else {
                complex_types.push(document);
            }
        }

        let container = model.container().map(|container| ContainerDocument {
            name: container.name.clone(),
            entity_sets: container
                .entity_sets
                .iter()
                .map(|set| source_document(model, set))
                .collect(),
            singletons: container
                .singletons
                .iter()
                .map(|singleton| source_document(model, singleton))
                .collect(),
            operation_imports: container
                .operation_imports
                .iter()
                .map(|import| OperationImportDocument {
                    name: import.name.clone(),
                    kind: import.kind,
                })
                .collect(),
        });

        SchemaDocument {
            namespace: model.namespace().to_string(),
            entity_types,
            complex_types,
            container,
        }
    }

    pub fn to_yaml_string(model: &EdmModel) -> Result<String, DocumentError> {
        Ok(serde_yaml::to_string(&Self::to_document(model))?)
    }

    pub fn to_json_string(model: &EdmModel) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(&Self::to_document(model))?)
    }

    pub fn render(model: &EdmModel, format: DocumentFormat) -> Result<String, DocumentError> {
        match format {
            DocumentFormat::Yaml => Self::to_yaml_string(model),
            DocumentFormat::Json => Self::to_json_string(model),
        }
    }

    /// Save the model, picking the format from the file extension
    pub fn save_file(model: &EdmModel, path: &Path) -> Result<(), DocumentError> {
        let content = Self::render(model, DocumentFormat::from_path(path))?;
        std::fs::write(path, content).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Saved model '{}' to {}", model.namespace(), path.display());
        Ok(())
    }
}

fn type_document(model: &EdmModel, id: TypeId) -> TypeDocument {
    let ty = model.structured_type(id);
    TypeDocument {
        name: ty.name.clone(),
        base_type: ty.base.map(|base| model.structured_type(base).name.clone()),
        is_abstract: ty.is_abstract,
        key: ty
            .key
            .iter()
            .map(|prop| model.property(*prop).name.clone())
            .collect(),
        properties: ty
            .properties
            .iter()
            .map(|prop| {
                let property = model.property(*prop);
                PropertyDocument {
                    name: property.name.clone(),
                    type_name: match property.property_type {
                        PropertyType::Primitive(kind) => kind.qualified_name().to_string(),
                        PropertyType::Complex(complex) => model.structured_type(complex).name.clone(),
                    },
                    collection: property.is_collection,
                    nullable: property.nullable,
                }
            })
            .collect(),
        navigation_properties: ty
            .navigations
            .iter()
            .map(|nav| navigation_document(model, *nav))
            .collect(),
    }
}

fn navigation_document(model: &EdmModel, id: NavigationId) -> NavigationDocument {
    let nav = model.navigation(id);
    let (partner, implicit_partner_multiplicity) = match nav.partner {
        Partner::Explicit(partner) => (Some(model.navigation(partner).name.clone()), None),
        Partner::Implicit { multiplicity } => {
            let default = if nav.contains_target && !model.is_recursive(id) {
                Multiplicity::One
            } else {
                Multiplicity::ZeroOrOne
            };
            (None, (multiplicity != default).then_some(multiplicity))
        }
    };

    NavigationDocument {
        name: nav.name.clone(),
        target: model.structured_type(nav.target_type).name.clone(),
        multiplicity: nav.target_multiplicity,
        partner,
        contains_target: nav.contains_target,
        referential_constraints: nav
            .constraint
            .iter()
            .map(|pair| ConstraintDocument {
                property: model.property(pair.dependent).name.clone(),
                referenced_property: model.property(pair.principal).name.clone(),
            })
            .collect(),
        on_delete: nav.on_delete,
        implicit_partner_multiplicity,
    }
}

fn source_document(model: &EdmModel, source: &NavigationSource) -> NavigationSourceDocument {
    NavigationSourceDocument {
        name: source.name.clone(),
        element_type: model.structured_type(source.element_type).name.clone(),
        bindings: source
            .bindings
            .iter()
            .map(|binding| BindingDocument {
                path: binding.path.clone(),
                target: binding.target.clone(),
            })
            .collect(),
    }
}
