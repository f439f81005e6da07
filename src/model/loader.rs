//! Model loading functionality
//!
//! Turns a [`SchemaDocument`] into an [`EdmModel`]: names are resolved to
//! handles, partners are paired and every element gets an error location
//! of the form `<source>#/<Type>/<member>`. Types, members and container
//! elements keep their document order.

use super::document::{
    DocumentFormat, NavigationDocument, NavigationSourceDocument, SchemaDocument, TypeDocument,
};
use super::error::DocumentError;
use crate::models::{
    EdmModel, ErrorLocation, ModelBuilder, ModelError, NavigationBinding, NavigationPairing,
    NavigationPropertyInfo, NavigationSourceKind, PendingNavigation, PrimitiveKind, PropertyId,
    PropertyType, TypeId, TypeKind, resolve_partners,
};
use std::path::Path;
use tracing::{info, warn};

const IN_MEMORY_SOURCE: &str = "<memory>";

fn location(source: &str, segments: &[&str]) -> ErrorLocation {
    ErrorLocation::new(format!("{}#/{}", source, segments.join("/")))
}

/// Builds schema graphs from documents
#[derive(Debug, Clone)]
pub struct ModelLoader {
    source_name: String,
}

impl Default for ModelLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelLoader {
    pub fn new() -> Self {
        Self {
            source_name: IN_MEMORY_SOURCE.to_string(),
        }
    }

    /// Prefix error locations with `name` instead of `<memory>`
    pub fn with_source_name(name: impl Into<String>) -> Self {
        Self {
            source_name: name.into(),
        }
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn from_yaml_str(&self, content: &str) -> Result<EdmModel, DocumentError> {
        let document: SchemaDocument = serde_yaml::from_str(content)?;
        self.load_document(&document)
    }

    pub fn from_json_str(&self, content: &str) -> Result<EdmModel, DocumentError> {
        let document: SchemaDocument = serde_json::from_str(content)?;
        self.load_document(&document)
    }

    pub fn load_str(&self, content: &str, format: DocumentFormat) -> Result<EdmModel, DocumentError> {
        match format {
            DocumentFormat::Yaml => self.from_yaml_str(content),
            DocumentFormat::Json => self.from_json_str(content),
        }
    }

    /// Load a model file, picking the format from its extension
    pub fn load_file(path: &Path) -> Result<EdmModel, DocumentError> {
        let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::with_source_name(path.display().to_string())
            .load_str(&content, DocumentFormat::from_path(path))
    }

    pub fn load_document(&self, document: &SchemaDocument) -> Result<EdmModel, DocumentError> {
        self.build(document).map_err(|error| DocumentError::Model {
            source_name: self.source_name.clone(),
            error,
        })
    }

    fn build(&self, document: &SchemaDocument) -> Result<EdmModel, ModelError> {
        let mut builder = ModelBuilder::new(document.namespace.clone());

        let declared: Vec<(&TypeDocument, TypeKind)> = document
            .entity_types
            .iter()
            .map(|ty| (ty, TypeKind::Entity))
            .chain(document.complex_types.iter().map(|ty| (ty, TypeKind::Complex)))
            .collect();

        let mut types = Vec::with_capacity(declared.len());
        for (ty, kind) in &declared {
            let id = builder.add_type(&ty.name, *kind)?;
            builder.set_type_location(id, location(&self.source_name, &[&ty.name]))?;
            builder.set_abstract(id, ty.is_abstract)?;
            types.push(id);
        }

        for ((ty, _), id) in declared.iter().zip(&types) {
            if let Some(base) = &ty.base_type {
                let base_id = resolve_type(&builder, base)?;
                builder.set_base_type(*id, base_id)?;
            }
        }

        for ((ty, _), id) in declared.iter().zip(&types) {
            for property in &ty.properties {
                let property_type = match property.type_name.parse::<PrimitiveKind>() {
                    Ok(kind) => PropertyType::Primitive(kind),
                    Err(_) => PropertyType::Complex(resolve_type(&builder, &property.type_name)?),
                };
                let prop = builder.add_property(
                    *id,
                    &property.name,
                    property_type,
                    property.collection,
                    property.nullable,
                )?;
                builder.set_property_location(
                    prop,
                    location(&self.source_name, &[&ty.name, &property.name]),
                )?;
            }
        }

        for ((ty, _), id) in declared.iter().zip(&types) {
            if ty.key.is_empty() {
                continue;
            }
            let key = ty
                .key
                .iter()
                .map(|name| resolve_property(builder.model(), *id, name))
                .collect::<Result<Vec<_>, _>>()?;
            builder.set_key(*id, &key)?;
        }

        let mut pending = Vec::new();
        for ((ty, _), id) in declared.iter().zip(&types) {
            for navigation in &ty.navigation_properties {
                pending.push(self.pending_navigation(&builder, *id, &ty.name, navigation)?);
            }
        }
        // Navigation properties keep document order; partners are linked
        // once both directions exist.
        let pairings = resolve_partners(builder.model(), &pending)?;
        let mut ids = Vec::with_capacity(pending.len());
        for nav in &pending {
            let id = match nav.implicit_partner_multiplicity {
                Some(multiplicity) => builder.add_unidirectional_navigation_with_partner_multiplicity(
                    nav.declaring_type,
                    nav.info.clone(),
                    multiplicity,
                )?,
                None => builder.add_unidirectional_navigation(nav.declaring_type, nav.info.clone())?,
            };
            ids.push(id);
        }
        for pairing in pairings {
            if let NavigationPairing::Pair(first, second) = pairing {
                builder.link_partners(ids[first], ids[second])?;
            }
        }

        let mut source_count = 0;
        if let Some(container) = &document.container {
            builder.entity_container(&container.name)?;
            builder.set_container_location(location(&self.source_name, &[&container.name]))?;

            let sources = container
                .entity_sets
                .iter()
                .map(|source| (source, NavigationSourceKind::EntitySet))
                .chain(
                    container
                        .singletons
                        .iter()
                        .map(|source| (source, NavigationSourceKind::Singleton)),
                );
            for (source, kind) in sources {
                self.add_source(&mut builder, &container.name, source, kind)?;
                source_count += 1;
            }
            for import in &container.operation_imports {
                builder.add_operation_import(
                    &import.name,
                    import.kind,
                    location(&self.source_name, &[&container.name, &import.name]),
                )?;
            }

            if source_count == 0 && container.operation_imports.is_empty() {
                warn!(
                    "Entity container {} in {} declares no members",
                    container.name, self.source_name
                );
            }
        }

        let model = builder.build()?;
        info!(
            "Loaded {} types, {} navigation properties and {} navigation sources from {}",
            declared.len(),
            pending.len(),
            source_count,
            self.source_name
        );
        Ok(model)
    }

    fn pending_navigation(
        &self,
        builder: &ModelBuilder,
        declaring_type: TypeId,
        type_name: &str,
        navigation: &NavigationDocument,
    ) -> Result<PendingNavigation, ModelError> {
        let model = builder.model();
        let target = resolve_type(builder, &navigation.target)?;
        let constraint = navigation
            .referential_constraints
            .iter()
            .map(|pair| -> Result<_, ModelError> {
                Ok((
                    resolve_property(model, declaring_type, &pair.property)?,
                    resolve_property(model, target, &pair.referenced_property)?,
                ))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut info = NavigationPropertyInfo::new(&navigation.name, target, navigation.multiplicity)
            .contains_target(navigation.contains_target)
            .with_constraint(constraint)
            .at(location(&self.source_name, &[type_name, &navigation.name]));
        if let Some(action) = navigation.on_delete {
            info = info.on_delete(action);
        }

        Ok(PendingNavigation {
            declaring_type,
            partner: navigation.partner.clone(),
            implicit_partner_multiplicity: navigation.implicit_partner_multiplicity,
            info,
        })
    }

    fn add_source(
        &self,
        builder: &mut ModelBuilder,
        container_name: &str,
        source: &NavigationSourceDocument,
        kind: NavigationSourceKind,
    ) -> Result<(), ModelError> {
        let element_type = resolve_type(builder, &source.element_type)?;
        let id = builder.add_navigation_source(&source.name, element_type, kind)?;
        builder.set_source_location(id, location(&self.source_name, &[container_name, &source.name]))?;
        for binding in &source.bindings {
            let mut navigation_binding = NavigationBinding::new(&binding.path, &binding.target);
            navigation_binding.location = location(
                &self.source_name,
                &[container_name, &source.name, binding.path.as_str()],
            );
            builder.add_binding(id, navigation_binding)?;
        }
        Ok(())
    }
}

fn resolve_type(builder: &ModelBuilder, name: &str) -> Result<TypeId, ModelError> {
    builder
        .model()
        .find_type(name)
        .ok_or_else(|| ModelError::UnknownType(name.to_string()))
}

fn resolve_property(model: &EdmModel, ty: TypeId, name: &str) -> Result<PropertyId, ModelError> {
    model
        .find_property(ty, name)
        .ok_or_else(|| ModelError::UnknownProperty {
            type_name: model.structured_type(ty).name.clone(),
            property: name.to_string(),
        })
}
