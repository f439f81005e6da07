//! The schema graph
//!
//! [`EdmModel`] owns every type, property and navigation property in arenas
//! indexed by the handles in [`super::handles`]. It is assembled by
//! [`ModelBuilder`](super::ModelBuilder) and read-only afterwards.

use super::container::EntityContainer;
use super::handles::{NavigationId, PropertyId, TypeId};
use super::navigation::NavigationProperty;
use super::structured_type::{StructuralProperty, StructuredType};

#[derive(Debug, Clone, PartialEq)]
pub struct EdmModel {
    pub(crate) namespace: String,
    pub(crate) types: Vec<StructuredType>,
    pub(crate) properties: Vec<StructuralProperty>,
    pub(crate) navigations: Vec<NavigationProperty>,
    pub(crate) container: Option<EntityContainer>,
}

impl EdmModel {
    pub(crate) fn empty(namespace: String) -> Self {
        Self {
            namespace,
            types: Vec::new(),
            properties: Vec::new(),
            navigations: Vec::new(),
            container: None,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn container(&self) -> Option<&EntityContainer> {
        self.container.as_ref()
    }

    /// # Panics
    ///
    /// Panics if `id` was not handed out by the builder of this model.
    /// Use [`EdmModel::get_structured_type`] for handles of unknown origin.
    pub fn structured_type(&self, id: TypeId) -> &StructuredType {
        &self.types[id.0]
    }

    /// # Panics
    ///
    /// Panics if `id` was not handed out by the builder of this model.
    pub fn property(&self, id: PropertyId) -> &StructuralProperty {
        &self.properties[id.0]
    }

    /// # Panics
    ///
    /// Panics if `id` was not handed out by the builder of this model.
    pub fn navigation(&self, id: NavigationId) -> &NavigationProperty {
        &self.navigations[id.0]
    }

    pub fn get_structured_type(&self, id: TypeId) -> Option<&StructuredType> {
        self.types.get(id.0)
    }

    pub fn get_property(&self, id: PropertyId) -> Option<&StructuralProperty> {
        self.properties.get(id.0)
    }

    pub fn get_navigation(&self, id: NavigationId) -> Option<&NavigationProperty> {
        self.navigations.get(id.0)
    }

    /// Types in declaration order
    pub fn types(&self) -> impl Iterator<Item = (TypeId, &StructuredType)> {
        self.types
            .iter()
            .enumerate()
            .map(|(index, ty)| (TypeId(index), ty))
    }

    /// Navigation properties in declaration order
    pub fn navigations(&self) -> impl Iterator<Item = (NavigationId, &NavigationProperty)> {
        self.navigations
            .iter()
            .enumerate()
            .map(|(index, nav)| (NavigationId(index), nav))
    }

    pub fn qualified_name(&self, id: TypeId) -> String {
        format!("{}.{}", self.namespace, self.structured_type(id).name)
    }

    /// Look a type up by simple name or by `Namespace.Name`
    pub fn find_type(&self, name: &str) -> Option<TypeId> {
        let simple = match name.rsplit_once('.') {
            Some((namespace, simple)) if namespace == self.namespace => simple,
            Some(_) => return None,
            None => name,
        };
        self.types()
            .find(|(_, ty)| ty.name == simple)
            .map(|(id, _)| id)
    }

    /// The type itself followed by its bases, nearest first
    pub fn base_chain(&self, id: TypeId) -> BaseChain<'_> {
        BaseChain {
            model: self,
            next: Some(id),
            remaining: self.types.len(),
        }
    }

    pub fn is_or_inherits_from(&self, ty: TypeId, ancestor: TypeId) -> bool {
        self.base_chain(ty).any(|id| id == ancestor)
    }

    /// Every type deriving from `id`, directly or transitively, in declaration order
    pub fn derived_types(&self, id: TypeId) -> Vec<TypeId> {
        self.types()
            .map(|(candidate, _)| candidate)
            .filter(|candidate| *candidate != id && self.is_or_inherits_from(*candidate, id))
            .collect()
    }

    /// Declared and inherited structural properties, base-most first
    pub fn all_properties(&self, id: TypeId) -> Vec<PropertyId> {
        let mut chain: Vec<TypeId> = self.base_chain(id).collect();
        chain.reverse();
        chain
            .into_iter()
            .flat_map(|ty| self.structured_type(ty).properties.iter().copied())
            .collect()
    }

    /// Find a structural property declared on the type or inherited from a base
    pub fn find_property(&self, id: TypeId, name: &str) -> Option<PropertyId> {
        self.base_chain(id).find_map(|ty| {
            self.structured_type(ty)
                .properties
                .iter()
                .copied()
                .find(|prop| self.property(*prop).name == name)
        })
    }

    /// Find a navigation property declared on the type or inherited from a base
    pub fn find_navigation(&self, id: TypeId, name: &str) -> Option<NavigationId> {
        self.base_chain(id).find_map(|ty| {
            self.structured_type(ty)
                .navigations
                .iter()
                .copied()
                .find(|nav| self.navigation(*nav).name == name)
        })
    }

    /// Effective key: the nearest declared key along the base chain
    pub fn key_of(&self, id: TypeId) -> &[PropertyId] {
        self.base_chain(id)
            .map(|ty| self.structured_type(ty).key.as_slice())
            .find(|key| !key.is_empty())
            .unwrap_or(&[])
    }

    /// Navigation from a type to itself or to one of its base types
    pub fn is_recursive(&self, nav: NavigationId) -> bool {
        let nav = self.navigation(nav);
        self.is_or_inherits_from(nav.declaring_type, nav.target_type)
    }

    pub fn property_declared_in_chain(&self, prop: PropertyId, ty: TypeId) -> bool {
        let declaring = self.property(prop).declaring_type;
        self.is_or_inherits_from(ty, declaring)
    }
}

/// Iterator over a type and its bases
///
/// Bounded by the number of types so that a cyclic base link, which the
/// builder rejects, can never loop forever.
pub struct BaseChain<'a> {
    model: &'a EdmModel,
    next: Option<TypeId>,
    remaining: usize,
}

impl Iterator for BaseChain<'_> {
    type Item = TypeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.next?;
        self.remaining -= 1;
        self.next = self.model.structured_type(current).base;
        Some(current)
    }
}
