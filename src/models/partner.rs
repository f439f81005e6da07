//! Partner resolution
//!
//! A partnered navigation property and its partner form one logical pair
//! with two directions, each reachable from the other. Unidirectional
//! navigation properties get an implicit opposite that only carries a
//! multiplicity; it is never named and never bound.

use super::edm_model::EdmModel;
use super::enums::Multiplicity;
use super::error::ModelError;
use super::handles::{NavigationId, TypeId};
use super::navigation::{NavigationPropertyInfo, Partner};
use std::collections::HashMap;

impl EdmModel {
    /// Explicit partner of a navigation property, if it has one
    pub fn partner(&self, nav: NavigationId) -> Option<NavigationId> {
        self.navigation(nav).explicit_partner()
    }

    /// Multiplicity of the opposite direction, explicit or implicit
    pub fn partner_multiplicity(&self, nav: NavigationId) -> Multiplicity {
        match self.navigation(nav).partner {
            Partner::Explicit(partner) => self.navigation(partner).target_multiplicity,
            Partner::Implicit { multiplicity } => multiplicity,
        }
    }

    /// A navigation is principal iff its partner carries the referential
    /// constraint pointing at it. The implicit opposite of a dependent
    /// unidirectional navigation is principal too, but it has no handle.
    pub fn is_principal(&self, nav: NavigationId) -> bool {
        self.partner(nav)
            .map(|partner| self.navigation(partner).has_constraint())
            .unwrap_or(false)
    }

    pub fn is_dependent(&self, nav: NavigationId) -> bool {
        self.navigation(nav).has_constraint()
    }
}

/// Navigation property as declared in a document, partner still by name
#[derive(Debug, Clone)]
pub struct PendingNavigation {
    pub declaring_type: TypeId,
    pub partner: Option<String>,
    /// Multiplicity of the implicit opposite when `partner` is absent
    pub implicit_partner_multiplicity: Option<Multiplicity>,
    pub info: NavigationPropertyInfo,
}

/// How pending navigation properties are to be created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationPairing {
    /// Indices of the two directions, the first declared first
    Pair(usize, usize),
    Unidirectional(usize),
}

/// Pair navigation properties whose partner names cross-reference each other
///
/// The partner of a navigation is looked up on its target type and that
/// type's bases. Pairings are returned in declaration order of their first
/// direction. Fails on a partner name that cannot be found and on a partner
/// that does not name the navigation back.
pub fn resolve_partners(
    model: &EdmModel,
    pending: &[PendingNavigation],
) -> Result<Vec<NavigationPairing>, ModelError> {
    let mut by_name: HashMap<(TypeId, &str), usize> = HashMap::new();
    for (index, nav) in pending.iter().enumerate() {
        by_name.insert((nav.declaring_type, nav.info.name.as_str()), index);
    }

    let mut assigned = vec![false; pending.len()];
    let mut pairings = Vec::new();

    for (index, nav) in pending.iter().enumerate() {
        if assigned[index] {
            continue;
        }
        let Some(partner_name) = nav.partner.as_deref() else {
            assigned[index] = true;
            pairings.push(NavigationPairing::Unidirectional(index));
            continue;
        };

        let partner_index = model
            .base_chain(nav.info.target)
            .find_map(|ty| by_name.get(&(ty, partner_name)).copied())
            .ok_or_else(|| ModelError::PartnerNotFound {
                navigation: nav.info.name.clone(),
                partner: partner_name.to_string(),
                target: model.structured_type(nav.info.target).name.clone(),
            })?;

        let partner = &pending[partner_index];
        let points_back = partner.partner.as_deref() == Some(nav.info.name.as_str())
            && model.is_or_inherits_from(nav.declaring_type, partner.info.target);
        if partner_index == index || assigned[partner_index] || !points_back {
            return Err(ModelError::PartnerNotSymmetric {
                navigation: nav.info.name.clone(),
                partner: partner_name.to_string(),
            });
        }

        assigned[index] = true;
        assigned[partner_index] = true;
        pairings.push(NavigationPairing::Pair(index, partner_index));
    }

    Ok(pairings)
}
