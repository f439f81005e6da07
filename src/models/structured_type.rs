//! Entity types, complex types and their structural properties

use super::enums::{PrimitiveKind, TypeKind};
use super::handles::{NavigationId, PropertyId, TypeId};
use super::location::ErrorLocation;

/// Type of a structural property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyType {
    Primitive(PrimitiveKind),
    Complex(TypeId),
}

impl PropertyType {
    pub fn as_primitive(&self) -> Option<PrimitiveKind> {
        match self {
            PropertyType::Primitive(kind) => Some(*kind),
            PropertyType::Complex(_) => None,
        }
    }

    pub fn as_complex(&self) -> Option<TypeId> {
        match self {
            PropertyType::Complex(id) => Some(*id),
            PropertyType::Primitive(_) => None,
        }
    }
}

/// A named, typed structural property attached to exactly one type
#[derive(Debug, Clone, PartialEq)]
pub struct StructuralProperty {
    pub name: String,
    pub declaring_type: TypeId,
    pub property_type: PropertyType,
    /// Whether the property holds a collection of `property_type`
    pub is_collection: bool,
    pub nullable: bool,
    pub location: ErrorLocation,
}

/// Entity or complex type with a single-inheritance base link
///
/// Members are stored as handles in declaration order; inherited members
/// are reached by walking `base` through the owning model.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredType {
    pub name: String,
    pub kind: TypeKind,
    pub base: Option<TypeId>,
    pub is_abstract: bool,
    pub properties: Vec<PropertyId>,
    pub navigations: Vec<NavigationId>,
    /// Declared key, in order. Empty when the key is inherited or absent.
    pub key: Vec<PropertyId>,
    pub location: ErrorLocation,
}

impl StructuredType {
    pub(crate) fn new(name: String, kind: TypeKind) -> Self {
        Self {
            name,
            kind,
            base: None,
            is_abstract: false,
            properties: Vec::new(),
            navigations: Vec::new(),
            key: Vec::new(),
            location: ErrorLocation::unknown(),
        }
    }

    pub fn is_entity(&self) -> bool {
        self.kind == TypeKind::Entity
    }

    pub fn is_complex(&self) -> bool {
        self.kind == TypeKind::Complex
    }
}
