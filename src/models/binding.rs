//! Navigation property binding resolution
//!
//! A binding path is `/`-separated and walks from a navigation source's
//! element type to the bound navigation property. Intermediate segments
//! may be complex-typed structural properties, containment navigation
//! properties or type casts (`Namespace.DerivedType`).

use super::container::{NavigationSource, NavigationTarget};
use super::edm_model::EdmModel;
use super::handles::{NavigationId, NavigationSourceId, TypeId};
use super::structured_type::PropertyType;
use std::fmt;

/// Why a binding path could not be resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnresolvedReason {
    EmptyPath,
    /// No property, navigation property or type of that name is reachable
    UnknownSegment(String),
    /// Segment resolved to something that cannot be traversed, such as a
    /// primitive property or a non-containment navigation property
    NotTraversable(String),
    /// Final segment is not a navigation property
    NotNavigation(String),
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnresolvedReason::EmptyPath => write!(f, "the path is empty"),
            UnresolvedReason::UnknownSegment(segment) => {
                write!(f, "the segment '{}' cannot be found", segment)
            }
            UnresolvedReason::NotTraversable(segment) => write!(
                f,
                "the segment '{}' is neither a complex property nor a containment navigation",
                segment
            ),
            UnresolvedReason::NotNavigation(segment) => {
                write!(f, "the segment '{}' is not a navigation property", segment)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingPathResolution {
    Resolved(NavigationId),
    Unresolved(UnresolvedReason),
}

impl BindingPathResolution {
    pub fn navigation(&self) -> Option<NavigationId> {
        match self {
            BindingPathResolution::Resolved(nav) => Some(*nav),
            BindingPathResolution::Unresolved(_) => None,
        }
    }
}

/// Strip surrounding whitespace and slashes so equivalent paths compare equal
pub fn normalize_path(path: &str) -> &str {
    path.trim().trim_matches('/')
}

enum Member {
    Property(PropertyType),
    Navigation(NavigationId),
}

impl EdmModel {
    /// Resolve a binding path against `element_type`
    pub fn resolve_binding_path(&self, element_type: TypeId, path: &str) -> BindingPathResolution {
        let path = normalize_path(path);
        if path.is_empty() {
            return BindingPathResolution::Unresolved(UnresolvedReason::EmptyPath);
        }

        let segments: Vec<&str> = path.split('/').collect();
        let mut current = element_type;
        for (index, segment) in segments.iter().enumerate() {
            let last = index + 1 == segments.len();
            if segment.is_empty() {
                return BindingPathResolution::Unresolved(UnresolvedReason::EmptyPath);
            }

            if segment.contains('.') {
                match self.find_type(segment) {
                    Some(cast) if !last && self.is_or_inherits_from(cast, current) => {
                        current = cast;
                        continue;
                    }
                    Some(_) if last => {
                        return BindingPathResolution::Unresolved(UnresolvedReason::NotNavigation(
                            segment.to_string(),
                        ));
                    }
                    _ => {
                        return BindingPathResolution::Unresolved(UnresolvedReason::UnknownSegment(
                            segment.to_string(),
                        ));
                    }
                }
            }

            let Some(member) = self.find_member_in_scope(current, segment) else {
                return BindingPathResolution::Unresolved(UnresolvedReason::UnknownSegment(
                    segment.to_string(),
                ));
            };

            match (member, last) {
                (Member::Navigation(nav), true) => return BindingPathResolution::Resolved(nav),
                (Member::Property(_), true) => {
                    return BindingPathResolution::Unresolved(UnresolvedReason::NotNavigation(
                        segment.to_string(),
                    ));
                }
                (Member::Property(PropertyType::Complex(complex)), false) => current = complex,
                (Member::Navigation(nav), false) if self.navigation(nav).contains_target => {
                    current = self.navigation(nav).target_type;
                }
                _ => {
                    return BindingPathResolution::Unresolved(UnresolvedReason::NotTraversable(
                        segment.to_string(),
                    ));
                }
            }
        }

        BindingPathResolution::Unresolved(UnresolvedReason::EmptyPath)
    }

    /// Members of the type and its bases first, then of derived types
    fn find_member_in_scope(&self, ty: TypeId, name: &str) -> Option<Member> {
        let lookup = |candidate: TypeId| {
            self.find_navigation(candidate, name)
                .map(Member::Navigation)
                .or_else(|| {
                    self.find_property(candidate, name)
                        .map(|prop| Member::Property(self.property(prop).property_type))
                })
        };
        lookup(ty).or_else(|| self.derived_types(ty).into_iter().find_map(lookup))
    }

    /// Where `nav` leads when reached from `source` along `path`
    ///
    /// With a path, only a binding declared for exactly that path counts.
    /// Without one, a binding of the bare navigation name wins; otherwise
    /// the distinct targets of all bindings of `nav` decide between a single
    /// target and [`NavigationTarget::Ambiguous`]. Containment navigation
    /// properties without a binding are [`NavigationTarget::Contained`], and
    /// anything else is [`NavigationTarget::Unknown`].
    pub fn find_navigation_target(
        &self,
        source: NavigationSourceId,
        nav: NavigationId,
        path: Option<&str>,
    ) -> NavigationTarget {
        let Some(navigation_source) = self.container().and_then(|container| container.source(source))
        else {
            return NavigationTarget::Unknown;
        };

        let bound = self.bound_targets(navigation_source, nav);
        let navigation_name = self.navigation(nav).name.as_str();
        let requested = normalize_path(path.unwrap_or(navigation_name));

        if let Some((_, target)) = bound.iter().find(|(bound_path, _)| *bound_path == requested) {
            return NavigationTarget::Bound(*target);
        }

        if path.is_none() {
            let mut targets: Vec<NavigationSourceId> = Vec::new();
            for (_, target) in &bound {
                if !targets.contains(target) {
                    targets.push(*target);
                }
            }
            match targets.len() {
                0 => {}
                1 => return NavigationTarget::Bound(targets[0]),
                _ => return NavigationTarget::Ambiguous(targets),
            }
        }

        if self.navigation(nav).contains_target {
            NavigationTarget::Contained { navigation: nav }
        } else {
            NavigationTarget::Unknown
        }
    }

    /// Target of `nav` for an instance of `instance_type` in `source`
    ///
    /// Bindings cast to the instance type, or to a type between it and the
    /// source's element type, take precedence over the uncast binding.
    pub fn find_navigation_target_for_instance(
        &self,
        source: NavigationSourceId,
        nav: NavigationId,
        instance_type: TypeId,
    ) -> NavigationTarget {
        let element_type = self
            .container()
            .and_then(|container| container.source(source))
            .map(|navigation_source| navigation_source.element_type);
        let navigation_name = &self.navigation(nav).name;

        if let Some(element_type) = element_type {
            for ty in self.base_chain(instance_type) {
                if ty == element_type {
                    break;
                }
                let cast_path = format!("{}/{}", self.qualified_name(ty), navigation_name);
                let target = self.find_navigation_target(source, nav, Some(&cast_path));
                if let NavigationTarget::Bound(_) = target {
                    return target;
                }
            }
        }

        self.find_navigation_target(source, nav, Some(navigation_name))
    }

    /// Resolve a binding target name, optionally prefixed by the container
    /// name or by `Namespace.Container`
    pub fn find_binding_target(&self, target: &str) -> Option<NavigationSourceId> {
        let container = self.container()?;
        let name = match target.split_once('/') {
            Some((prefix, name)) => {
                let container_name = match prefix.rsplit_once('.') {
                    Some((namespace, simple)) if namespace == self.namespace() => simple,
                    Some(_) => return None,
                    None => prefix,
                };
                if container_name != container.name {
                    return None;
                }
                name
            }
            None => target,
        };
        container.find_source(name)
    }

    // Bindings of `source` that resolve to `nav` and to an existing target,
    // keyed by normalized path, in declaration order.
    fn bound_targets<'a>(
        &self,
        source: &'a NavigationSource,
        nav: NavigationId,
    ) -> Vec<(&'a str, NavigationSourceId)> {
        source
            .bindings
            .iter()
            .filter(|binding| {
                self.resolve_binding_path(source.element_type, &binding.path)
                    .navigation()
                    == Some(nav)
            })
            .filter_map(|binding| {
                self.find_binding_target(&binding.target)
                    .map(|target| (normalize_path(&binding.path), target))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ModelBuilder, Multiplicity, NavigationBinding, NavigationPropertyInfo, PrimitiveKind};

    struct Fixture {
        model: EdmModel,
        people: NavigationSourceId,
        friends: NavigationId,
        address_city: NavigationId,
    }

    fn fixture() -> Fixture {
        let mut builder = ModelBuilder::new("NS");
        let city = builder.entity_type("City").unwrap();
        let address = builder.complex_type("Address").unwrap();
        let person = builder.entity_type("Person").unwrap();
        let id = builder
            .add_primitive_property(person, "Id", PrimitiveKind::Int32, false)
            .unwrap();
        builder.set_key(person, &[id]).unwrap();
        builder.add_complex_property(person, "Home", address, true).unwrap();
        builder.add_complex_property(person, "Work", address, true).unwrap();
        let address_city = builder
            .add_unidirectional_navigation(
                address,
                NavigationPropertyInfo::new("City", city, Multiplicity::ZeroOrOne),
            )
            .unwrap();
        let friends = builder
            .add_unidirectional_navigation(
                person,
                NavigationPropertyInfo::new("Friends", person, Multiplicity::Many),
            )
            .unwrap();

        builder.entity_container("Container").unwrap();
        let people = builder.add_entity_set("People", person).unwrap();
        builder.add_entity_set("Cities", city).unwrap();
        builder.add_entity_set("OtherCities", city).unwrap();
        builder
            .add_binding(people, NavigationBinding::new("Home/City", "Cities"))
            .unwrap();
        builder
            .add_binding(people, NavigationBinding::new("Work/City", "OtherCities"))
            .unwrap();

        Fixture {
            model: builder.build().unwrap(),
            people,
            friends,
            address_city,
        }
    }

    #[test]
    fn test_resolves_through_complex_properties() {
        let f = fixture();
        let person = f.model.find_type("Person").unwrap();
        assert_eq!(
            f.model.resolve_binding_path(person, "Home/City"),
            BindingPathResolution::Resolved(f.address_city)
        );
        assert_eq!(
            f.model.resolve_binding_path(person, "/Friends/"),
            BindingPathResolution::Resolved(f.friends)
        );
    }

    #[test]
    fn test_unresolvable_paths() {
        let f = fixture();
        let person = f.model.find_type("Person").unwrap();
        assert_eq!(
            f.model.resolve_binding_path(person, "Office/City"),
            BindingPathResolution::Unresolved(UnresolvedReason::UnknownSegment("Office".to_string()))
        );
        assert_eq!(
            f.model.resolve_binding_path(person, "Id/City"),
            BindingPathResolution::Unresolved(UnresolvedReason::NotTraversable("Id".to_string()))
        );
        assert_eq!(
            f.model.resolve_binding_path(person, "Friends/Friends"),
            BindingPathResolution::Unresolved(UnresolvedReason::NotTraversable("Friends".to_string()))
        );
        assert_eq!(
            f.model.resolve_binding_path(person, "Home"),
            BindingPathResolution::Unresolved(UnresolvedReason::NotNavigation("Home".to_string()))
        );
        assert_eq!(
            f.model.resolve_binding_path(person, ""),
            BindingPathResolution::Unresolved(UnresolvedReason::EmptyPath)
        );
    }

    #[test]
    fn test_multi_binding_is_path_specific() {
        let f = fixture();
        let cities = f.model.find_binding_target("Cities").unwrap();
        let other = f.model.find_binding_target("Container/OtherCities").unwrap();
        assert_eq!(f.model.find_binding_target("NS.Container/OtherCities"), Some(other));
        assert_eq!(f.model.find_binding_target("Other.Container/OtherCities"), None);

        assert_eq!(
            f.model
                .find_navigation_target(f.people, f.address_city, Some("Home/City")),
            NavigationTarget::Bound(cities)
        );
        assert_eq!(
            f.model
                .find_navigation_target(f.people, f.address_city, Some("Work/City")),
            NavigationTarget::Bound(other)
        );
        assert_eq!(
            f.model.find_navigation_target(f.people, f.address_city, None),
            NavigationTarget::Ambiguous(vec![cities, other])
        );
    }

    #[test]
    fn test_unbound_navigation_is_unknown() {
        let f = fixture();
        assert_eq!(
            f.model.find_navigation_target(f.people, f.friends, None),
            NavigationTarget::Unknown
        );
        let cities = f.model.find_binding_target("Cities").unwrap();
        assert_eq!(
            f.model
                .find_navigation_target(cities, f.address_city, Some("Home/City")),
            NavigationTarget::Unknown
        );
    }
}
