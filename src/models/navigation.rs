//! Navigation properties and referential constraints

use super::enums::{Multiplicity, OnDeleteAction};
use super::handles::{NavigationId, PropertyId, TypeId};
use super::location::ErrorLocation;

/// Opposite direction of a navigation property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partner {
    /// Named navigation property on the target type pointing back
    Explicit(NavigationId),
    /// Invisible opposite of a unidirectional navigation property.
    /// Only its multiplicity is observable.
    Implicit { multiplicity: Multiplicity },
}

/// One dependent/principal property pair of a referential constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstraintPair {
    /// Property on the navigation's declaring type
    pub dependent: PropertyId,
    /// Property on the navigation's target type
    pub principal: PropertyId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavigationProperty {
    pub name: String,
    pub declaring_type: TypeId,
    pub target_type: TypeId,
    pub target_multiplicity: Multiplicity,
    pub contains_target: bool,
    pub partner: Partner,
    /// Referential constraint, in declaration order. Non-empty marks this
    /// navigation as the dependent direction.
    pub constraint: Vec<ConstraintPair>,
    pub on_delete: Option<OnDeleteAction>,
    pub location: ErrorLocation,
}

impl NavigationProperty {
    pub fn is_collection(&self) -> bool {
        self.target_multiplicity.is_collection()
    }

    pub fn has_constraint(&self) -> bool {
        !self.constraint.is_empty()
    }

    pub fn explicit_partner(&self) -> Option<NavigationId> {
        match self.partner {
            Partner::Explicit(id) => Some(id),
            Partner::Implicit { .. } => None,
        }
    }

    pub fn dependent_properties(&self) -> impl Iterator<Item = PropertyId> + '_ {
        self.constraint.iter().map(|pair| pair.dependent)
    }

    pub fn principal_properties(&self) -> impl Iterator<Item = PropertyId> + '_ {
        self.constraint.iter().map(|pair| pair.principal)
    }
}

/// Description of one navigation direction handed to the model builder
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationPropertyInfo {
    pub name: String,
    pub target: TypeId,
    pub multiplicity: Multiplicity,
    pub contains_target: bool,
    pub constraint: Vec<ConstraintPair>,
    pub on_delete: Option<OnDeleteAction>,
    pub location: ErrorLocation,
}

impl NavigationPropertyInfo {
    pub fn new(name: impl Into<String>, target: TypeId, multiplicity: Multiplicity) -> Self {
        Self {
            name: name.into(),
            target,
            multiplicity,
            contains_target: false,
            constraint: Vec::new(),
            on_delete: None,
            location: ErrorLocation::unknown(),
        }
    }

    pub fn contains_target(mut self, contains: bool) -> Self {
        self.contains_target = contains;
        self
    }

    /// Append `(dependent, principal)` pairs to the referential constraint
    pub fn with_constraint<I>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (PropertyId, PropertyId)>,
    {
        self.constraint.extend(
            pairs
                .into_iter()
                .map(|(dependent, principal)| ConstraintPair {
                    dependent,
                    principal,
                }),
        );
        self
    }

    pub fn on_delete(mut self, action: OnDeleteAction) -> Self {
        self.on_delete = Some(action);
        self
    }

    pub fn at(mut self, location: ErrorLocation) -> Self {
        self.location = location;
        self
    }
}
