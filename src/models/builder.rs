//! Fluent construction of the schema graph
//!
//! The builder enforces the preconditions the validation rules rely on:
//! known multiplicities, symmetric partners, at most one containing end and
//! at most one constrained end per pair, and an acyclic base-type chain.

use super::container::{
    EntityContainer, NavigationBinding, NavigationSource, NavigationSourceKind, OperationImport,
    OperationImportKind,
};
use super::edm_model::EdmModel;
use super::enums::{Multiplicity, PrimitiveKind, TypeKind};
use super::error::ModelError;
use super::handles::{NavigationId, NavigationSourceId, PropertyId, TypeId};
use super::location::ErrorLocation;
use super::navigation::{NavigationProperty, NavigationPropertyInfo, Partner};
use super::structured_type::{PropertyType, StructuralProperty, StructuredType};
use once_cell::sync::Lazy;
use petgraph::algo::{is_cyclic_directed, tarjan_scc};
use petgraph::graph::DiGraph;
use regex::Regex;
use tracing::debug;

static SIMPLE_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}_][\p{L}\p{Nd}_]{0,127}$").expect("valid identifier pattern"));

fn check_identifier(name: &str) -> Result<(), ModelError> {
    if SIMPLE_IDENTIFIER.is_match(name) {
        Ok(())
    } else {
        Err(ModelError::InvalidName(name.to_string()))
    }
}

/// What the pairing preconditions look at in one direction of a pair
struct PairEnd<'a> {
    source: TypeId,
    name: &'a str,
    target: TypeId,
    contains_target: bool,
    constrained: bool,
}

impl<'a> PairEnd<'a> {
    fn of_info(source: TypeId, info: &'a NavigationPropertyInfo) -> Self {
        Self {
            source,
            name: &info.name,
            target: info.target,
            contains_target: info.contains_target,
            constrained: !info.constraint.is_empty(),
        }
    }

    fn of_navigation(nav: &'a NavigationProperty) -> Self {
        Self {
            source: nav.declaring_type,
            name: &nav.name,
            target: nav.target_type,
            contains_target: nav.contains_target,
            constrained: nav.has_constraint(),
        }
    }
}

/// Assembles an [`EdmModel`]
///
/// # Example
///
/// ```rust
/// use edm_validation::models::{ModelBuilder, Multiplicity, NavigationPropertyInfo, PrimitiveKind};
///
/// let mut builder = ModelBuilder::new("NS");
/// let person = builder.entity_type("Person").unwrap();
/// let id = builder.add_primitive_property(person, "Id", PrimitiveKind::Int32, false).unwrap();
/// builder.set_key(person, &[id]).unwrap();
/// builder
///     .add_unidirectional_navigation(
///         person,
///         NavigationPropertyInfo::new("Friends", person, Multiplicity::Many),
///     )
///     .unwrap();
/// let model = builder.build().unwrap();
/// assert_eq!(model.navigations().count(), 1);
/// ```
#[derive(Debug)]
pub struct ModelBuilder {
    model: EdmModel,
}

impl ModelBuilder {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            model: EdmModel::empty(namespace.into()),
        }
    }

    /// The graph assembled so far
    pub fn model(&self) -> &EdmModel {
        &self.model
    }

    pub fn entity_type(&mut self, name: &str) -> Result<TypeId, ModelError> {
        self.add_type(name, TypeKind::Entity)
    }

    pub fn complex_type(&mut self, name: &str) -> Result<TypeId, ModelError> {
        self.add_type(name, TypeKind::Complex)
    }

    pub fn add_type(&mut self, name: &str, kind: TypeKind) -> Result<TypeId, ModelError> {
        check_identifier(name)?;
        if self.model.types.iter().any(|ty| ty.name == name) {
            return Err(ModelError::DuplicateTypeName(name.to_string()));
        }
        let id = TypeId(self.model.types.len());
        self.model
            .types
            .push(StructuredType::new(name.to_string(), kind));
        Ok(id)
    }

    pub fn set_base_type(&mut self, ty: TypeId, base: TypeId) -> Result<(), ModelError> {
        self.check_type(ty)?;
        self.check_type(base)?;
        if self.model.types[ty.0].kind != self.model.types[base.0].kind {
            return Err(ModelError::InvalidKind {
                type_name: self.model.types[base.0].name.clone(),
                expected: "base type of the same kind",
            });
        }
        self.model.types[ty.0].base = Some(base);
        Ok(())
    }

    pub fn set_abstract(&mut self, ty: TypeId, is_abstract: bool) -> Result<(), ModelError> {
        self.check_type(ty)?;
        self.model.types[ty.0].is_abstract = is_abstract;
        Ok(())
    }

    pub fn set_type_location(&mut self, ty: TypeId, location: ErrorLocation) -> Result<(), ModelError> {
        self.check_type(ty)?;
        self.model.types[ty.0].location = location;
        Ok(())
    }

    pub fn add_primitive_property(
        &mut self,
        ty: TypeId,
        name: &str,
        kind: PrimitiveKind,
        nullable: bool,
    ) -> Result<PropertyId, ModelError> {
        self.add_property(ty, name, PropertyType::Primitive(kind), false, nullable)
    }

    pub fn add_complex_property(
        &mut self,
        ty: TypeId,
        name: &str,
        complex: TypeId,
        nullable: bool,
    ) -> Result<PropertyId, ModelError> {
        self.check_type(complex)?;
        if !self.model.types[complex.0].is_complex() {
            return Err(ModelError::InvalidKind {
                type_name: self.model.types[complex.0].name.clone(),
                expected: "complex type",
            });
        }
        self.add_property(ty, name, PropertyType::Complex(complex), false, nullable)
    }

    pub fn add_property(
        &mut self,
        ty: TypeId,
        name: &str,
        property_type: PropertyType,
        is_collection: bool,
        nullable: bool,
    ) -> Result<PropertyId, ModelError> {
        self.check_type(ty)?;
        if let PropertyType::Complex(complex) = property_type {
            self.check_type(complex)?;
        }
        self.check_member_name(ty, name)?;

        let id = PropertyId(self.model.properties.len());
        self.model.properties.push(StructuralProperty {
            name: name.to_string(),
            declaring_type: ty,
            property_type,
            is_collection,
            nullable,
            location: ErrorLocation::unknown(),
        });
        self.model.types[ty.0].properties.push(id);
        Ok(id)
    }

    pub fn set_property_location(
        &mut self,
        prop: PropertyId,
        location: ErrorLocation,
    ) -> Result<(), ModelError> {
        let property = self
            .model
            .properties
            .get_mut(prop.0)
            .ok_or_else(|| ModelError::UnknownType(format!("property #{}", prop.0)))?;
        property.location = location;
        Ok(())
    }

    /// Declare the key of an entity type. Key properties may be inherited.
    pub fn set_key(&mut self, ty: TypeId, key: &[PropertyId]) -> Result<(), ModelError> {
        self.check_type(ty)?;
        if !self.model.types[ty.0].is_entity() {
            return Err(ModelError::InvalidKind {
                type_name: self.model.types[ty.0].name.clone(),
                expected: "entity type",
            });
        }
        for prop in key {
            self.check_property_in_chain(*prop, ty)?;
        }
        self.model.types[ty.0].key = key.to_vec();
        Ok(())
    }

    /// Add a navigation property without a named partner
    ///
    /// Its implicit opposite gets multiplicity `1` when the navigation
    /// contains a type unrelated to its own (a contained instance has
    /// exactly one owner) and `0..1` otherwise.
    pub fn add_unidirectional_navigation(
        &mut self,
        source: TypeId,
        info: NavigationPropertyInfo,
    ) -> Result<NavigationId, ModelError> {
        let recursive = self.check_type(source).is_ok()
            && self.check_type(info.target).is_ok()
            && self.model.is_or_inherits_from(source, info.target);
        let implicit = if info.contains_target && !recursive {
            Multiplicity::One
        } else {
            Multiplicity::ZeroOrOne
        };
        self.add_unidirectional_navigation_with_partner_multiplicity(source, info, implicit)
    }

    pub fn add_unidirectional_navigation_with_partner_multiplicity(
        &mut self,
        source: TypeId,
        info: NavigationPropertyInfo,
        partner_multiplicity: Multiplicity,
    ) -> Result<NavigationId, ModelError> {
        self.check_navigation(source, &info)?;
        if partner_multiplicity == Multiplicity::Unknown {
            return Err(ModelError::MultiplicityOutOfRange {
                navigation: info.name.clone(),
            });
        }
        let id = self.push_navigation(
            source,
            info,
            Partner::Implicit {
                multiplicity: partner_multiplicity,
            },
        );
        Ok(id)
    }

    /// Add a navigation property and its partner declared on the target type
    pub fn add_bidirectional_navigation(
        &mut self,
        source: TypeId,
        info: NavigationPropertyInfo,
        partner_info: NavigationPropertyInfo,
    ) -> Result<(NavigationId, NavigationId), ModelError> {
        let partner_source = info.target;
        self.add_navigation_pair(source, info, partner_source, partner_info)
    }

    /// Add a partnered pair whose second direction is declared on
    /// `partner_source`, the target type of `info` or one of its bases
    pub fn add_navigation_pair(
        &mut self,
        source: TypeId,
        info: NavigationPropertyInfo,
        partner_source: TypeId,
        partner_info: NavigationPropertyInfo,
    ) -> Result<(NavigationId, NavigationId), ModelError> {
        self.check_navigation(source, &info)?;
        self.check_navigation(partner_source, &partner_info)?;

        self.check_pair(
            PairEnd::of_info(source, &info),
            PairEnd::of_info(partner_source, &partner_info),
        )?;

        let first = NavigationId(self.model.navigations.len());
        let second = NavigationId(first.0 + 1);
        self.push_navigation(source, info, Partner::Explicit(second));
        self.push_navigation(partner_source, partner_info, Partner::Explicit(first));
        Ok((first, second))
    }

    /// Pair two navigation properties that were added without partners
    ///
    /// Lets a loader add navigation properties in declaration order and
    /// connect partners afterwards. The same pairing preconditions as
    /// [`ModelBuilder::add_navigation_pair`] apply.
    pub fn link_partners(&mut self, first: NavigationId, second: NavigationId) -> Result<(), ModelError> {
        let (Some(nav), Some(partner)) = (
            self.model.navigations.get(first.0),
            self.model.navigations.get(second.0),
        ) else {
            return Err(ModelError::UnknownNavigation(format!(
                "#{}",
                first.0.max(second.0)
            )));
        };
        if first == second || nav.explicit_partner().is_some() || partner.explicit_partner().is_some()
        {
            return Err(ModelError::PartnerNotSymmetric {
                navigation: nav.name.clone(),
                partner: partner.name.clone(),
            });
        }
        self.check_pair(PairEnd::of_navigation(nav), PairEnd::of_navigation(partner))?;

        self.model.navigations[first.0].partner = Partner::Explicit(second);
        self.model.navigations[second.0].partner = Partner::Explicit(first);
        Ok(())
    }

    pub fn entity_container(&mut self, name: &str) -> Result<(), ModelError> {
        check_identifier(name)?;
        if let Some(existing) = &self.model.container {
            return Err(ModelError::ContainerAlreadyDeclared(existing.name.clone()));
        }
        self.model.container = Some(EntityContainer::new(name.to_string()));
        Ok(())
    }

    pub fn set_container_location(&mut self, location: ErrorLocation) -> Result<(), ModelError> {
        self.container_mut()?.location = location;
        Ok(())
    }

    pub fn add_entity_set(
        &mut self,
        name: &str,
        element_type: TypeId,
    ) -> Result<NavigationSourceId, ModelError> {
        self.add_navigation_source(name, element_type, NavigationSourceKind::EntitySet)
    }

    pub fn add_singleton(
        &mut self,
        name: &str,
        element_type: TypeId,
    ) -> Result<NavigationSourceId, ModelError> {
        self.add_navigation_source(name, element_type, NavigationSourceKind::Singleton)
    }

    /// Duplicate member names are accepted here and reported by validation
    pub fn add_navigation_source(
        &mut self,
        name: &str,
        element_type: TypeId,
        kind: NavigationSourceKind,
    ) -> Result<NavigationSourceId, ModelError> {
        check_identifier(name)?;
        self.check_type(element_type)?;
        let container = self.container_mut()?;
        let source = NavigationSource {
            name: name.to_string(),
            kind,
            element_type,
            bindings: Vec::new(),
            location: ErrorLocation::unknown(),
        };
        let id = match kind {
            NavigationSourceKind::EntitySet => {
                container.entity_sets.push(source);
                NavigationSourceId::EntitySet(container.entity_sets.len() - 1)
            }
            NavigationSourceKind::Singleton => {
                container.singletons.push(source);
                NavigationSourceId::Singleton(container.singletons.len() - 1)
            }
        };
        Ok(id)
    }

    pub fn set_source_location(
        &mut self,
        source: NavigationSourceId,
        location: ErrorLocation,
    ) -> Result<(), ModelError> {
        self.source_mut(source)?.location = location;
        Ok(())
    }

    pub fn add_operation_import(
        &mut self,
        name: &str,
        kind: OperationImportKind,
        location: ErrorLocation,
    ) -> Result<(), ModelError> {
        check_identifier(name)?;
        self.container_mut()?.operation_imports.push(OperationImport {
            name: name.to_string(),
            kind,
            location,
        });
        Ok(())
    }

    /// Bind a navigation path of `source` to a target by name
    ///
    /// Paths and targets are resolved during validation so that broken
    /// bindings surface as validation errors.
    pub fn add_binding(
        &mut self,
        source: NavigationSourceId,
        binding: NavigationBinding,
    ) -> Result<(), ModelError> {
        self.source_mut(source)?.bindings.push(binding);
        Ok(())
    }

    /// Finish the graph, rejecting cyclic base-type chains
    pub fn build(self) -> Result<EdmModel, ModelError> {
        let mut graph = DiGraph::<usize, ()>::new();
        let nodes: Vec<_> = (0..self.model.types.len())
            .map(|index| graph.add_node(index))
            .collect();
        for (index, ty) in self.model.types.iter().enumerate() {
            if let Some(base) = ty.base {
                graph.add_edge(nodes[index], nodes[base.0], ());
            }
        }
        if is_cyclic_directed(&graph) {
            let offender = tarjan_scc(&graph)
                .into_iter()
                .find(|component| {
                    component.len() > 1
                        || self.model.types[graph[component[0]]].base == Some(TypeId(graph[component[0]]))
                })
                .and_then(|component| component.first().copied())
                .map(|node| self.model.types[graph[node]].name.clone())
                .unwrap_or_default();
            return Err(ModelError::InheritanceCycle(offender));
        }

        debug!(
            "Built model '{}' with {} types, {} navigation properties",
            self.model.namespace,
            self.model.types.len(),
            self.model.navigations.len()
        );
        Ok(self.model)
    }

    fn check_type(&self, ty: TypeId) -> Result<(), ModelError> {
        if ty.0 < self.model.types.len() {
            Ok(())
        } else {
            Err(ModelError::UnknownType(format!("#{}", ty.0)))
        }
    }

    fn check_member_name(&self, ty: TypeId, name: &str) -> Result<(), ModelError> {
        check_identifier(name)?;
        let declared = &self.model.types[ty.0];
        let clash = declared
            .properties
            .iter()
            .any(|prop| self.model.properties[prop.0].name == name)
            || declared
                .navigations
                .iter()
                .any(|nav| self.model.navigations[nav.0].name == name);
        if clash {
            return Err(ModelError::DuplicateMemberName {
                type_name: declared.name.clone(),
                member: name.to_string(),
            });
        }
        Ok(())
    }

    fn check_property_in_chain(&self, prop: PropertyId, ty: TypeId) -> Result<(), ModelError> {
        let known = prop.0 < self.model.properties.len()
            && self.model.property_declared_in_chain(prop, ty);
        if known {
            Ok(())
        } else {
            Err(ModelError::UnknownProperty {
                type_name: self.model.types[ty.0].name.clone(),
                property: self
                    .model
                    .properties
                    .get(prop.0)
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| format!("#{}", prop.0)),
            })
        }
    }

    fn check_navigation(&self, source: TypeId, info: &NavigationPropertyInfo) -> Result<(), ModelError> {
        self.check_type(source)?;
        self.check_type(info.target)?;
        if info.multiplicity == Multiplicity::Unknown {
            return Err(ModelError::MultiplicityOutOfRange {
                navigation: info.name.clone(),
            });
        }
        self.check_member_name(source, &info.name)?;
        // Constraint properties only need to exist; which type declares
        // them is a validation concern.
        for pair in &info.constraint {
            for prop in [pair.dependent, pair.principal] {
                if prop.0 >= self.model.properties.len() {
                    return Err(ModelError::UnknownProperty {
                        type_name: self.model.types[source.0].name.clone(),
                        property: format!("#{}", prop.0),
                    });
                }
            }
        }
        Ok(())
    }

    fn check_pair(&self, end: PairEnd<'_>, partner: PairEnd<'_>) -> Result<(), ModelError> {
        if !self.model.is_or_inherits_from(end.target, partner.source)
            || !self.model.is_or_inherits_from(end.source, partner.target)
        {
            return Err(ModelError::PartnerTargetMismatch {
                navigation: end.name.to_string(),
                partner: partner.name.to_string(),
                declaring_type: self.model.types[end.source.0].name.clone(),
            });
        }
        if end.source == partner.source && end.name == partner.name {
            return Err(ModelError::DuplicateMemberName {
                type_name: self.model.types[end.source.0].name.clone(),
                member: end.name.to_string(),
            });
        }
        if end.contains_target && partner.contains_target {
            return Err(ModelError::ContainmentOnBothEnds {
                navigation: end.name.to_string(),
                partner: partner.name.to_string(),
            });
        }
        if end.constrained && partner.constrained {
            return Err(ModelError::ConstraintOnBothEnds {
                navigation: end.name.to_string(),
                partner: partner.name.to_string(),
            });
        }
        Ok(())
    }

    fn push_navigation(
        &mut self,
        source: TypeId,
        info: NavigationPropertyInfo,
        partner: Partner,
    ) -> NavigationId {
        let id = NavigationId(self.model.navigations.len());
        self.model.navigations.push(NavigationProperty {
            name: info.name,
            declaring_type: source,
            target_type: info.target,
            target_multiplicity: info.multiplicity,
            contains_target: info.contains_target,
            partner,
            constraint: info.constraint,
            on_delete: info.on_delete,
            location: info.location,
        });
        self.model.types[source.0].navigations.push(id);
        id
    }

    fn container_mut(&mut self) -> Result<&mut EntityContainer, ModelError> {
        self.model
            .container
            .as_mut()
            .ok_or(ModelError::MissingContainer)
    }

    fn source_mut(&mut self, source: NavigationSourceId) -> Result<&mut NavigationSource, ModelError> {
        self.container_mut()?
            .source_mut(source)
            .ok_or_else(|| ModelError::UnknownType(format!("{:?}", source)))
    }
}
