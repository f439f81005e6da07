//! Navigation property binding tests

use edm_validation::models::{
    BindingPathResolution, EdmModel, ModelBuilder, Multiplicity, NavigationBinding, NavigationId,
    NavigationPropertyInfo, NavigationSourceId, NavigationTarget, PrimitiveKind, TypeId,
};
use edm_validation::validation::{EdmErrorCode, validate_model};
use edm_validation::EdmVersion;

fn codes(model: &EdmModel) -> Vec<EdmErrorCode> {
    let (_, errors) = validate_model(model, EdmVersion::V4);
    errors.into_iter().map(|error| error.code).collect()
}

fn keyed_entity(builder: &mut ModelBuilder, name: &str) -> TypeId {
    let ty = builder.entity_type(name).unwrap();
    let id = builder
        .add_primitive_property(ty, "Id", PrimitiveKind::Int32, false)
        .unwrap();
    builder.set_key(ty, &[id]).unwrap();
    ty
}

mod multi_binding_tests {
    use super::*;

    struct Fixture {
        model: EdmModel,
        people: NavigationSourceId,
        set_a: NavigationSourceId,
        set_b: NavigationSourceId,
        nav: NavigationId,
    }

    fn fixture() -> Fixture {
        let mut builder = ModelBuilder::new("NS");
        let person = keyed_entity(&mut builder, "Person");
        let city = keyed_entity(&mut builder, "City");
        let address = builder.complex_type("Address").unwrap();
        let nav = builder
            .add_unidirectional_navigation(
                address,
                NavigationPropertyInfo::new("Nav", city, Multiplicity::ZeroOrOne),
            )
            .unwrap();
        builder
            .add_complex_property(person, "ComplexProp1", address, true)
            .unwrap();
        builder
            .add_complex_property(person, "ComplexProp2", address, true)
            .unwrap();

        builder.entity_container("Container").unwrap();
        let people = builder.add_entity_set("People", person).unwrap();
        let set_a = builder.add_entity_set("SetA", city).unwrap();
        let set_b = builder.add_entity_set("SetB", city).unwrap();
        builder
            .add_binding(people, NavigationBinding::new("ComplexProp1/Nav", "SetA"))
            .unwrap();
        builder
            .add_binding(people, NavigationBinding::new("ComplexProp2/Nav", "SetB"))
            .unwrap();

        Fixture {
            model: builder.build().unwrap(),
            people,
            set_a,
            set_b,
            nav,
        }
    }

    #[test]
    fn test_each_path_resolves_to_its_own_target() {
        let f = fixture();
        assert!(codes(&f.model).is_empty());
        assert_eq!(
            f.model
                .find_navigation_target(f.people, f.nav, Some("ComplexProp1/Nav")),
            NavigationTarget::Bound(f.set_a)
        );
        assert_eq!(
            f.model
                .find_navigation_target(f.people, f.nav, Some("ComplexProp2/Nav")),
            NavigationTarget::Bound(f.set_b)
        );
    }

    #[test]
    fn test_unpathed_lookup_on_multi_binding_is_ambiguous() {
        let f = fixture();
        assert_eq!(
            f.model.find_navigation_target(f.people, f.nav, None),
            NavigationTarget::Ambiguous(vec![f.set_a, f.set_b])
        );
    }

    #[test]
    fn test_other_source_reports_unknown() {
        let f = fixture();
        let target = f
            .model
            .find_navigation_target(f.set_a, f.nav, Some("ComplexProp1/Nav"));
        assert!(target.is_unknown());
        assert_eq!(target.source(), None);
    }
}

mod singleton_tests {
    use super::*;

    #[test]
    fn test_collection_navigation_bound_to_singleton() {
        let mut builder = ModelBuilder::new("NS");
        let person = keyed_entity(&mut builder, "Person");
        builder
            .add_bidirectional_navigation(
                person,
                NavigationPropertyInfo::new("Reports", person, Multiplicity::Many),
                NavigationPropertyInfo::new("Manager", person, Multiplicity::ZeroOrOne),
            )
            .unwrap();
        builder.entity_container("Container").unwrap();
        let people = builder.add_entity_set("People", person).unwrap();
        let boss = builder.add_singleton("Boss", person).unwrap();
        builder
            .add_binding(people, NavigationBinding::new("Reports", "Boss"))
            .unwrap();
        builder
            .add_binding(boss, NavigationBinding::new("Manager", "People"))
            .unwrap();
        builder
            .add_binding(boss, NavigationBinding::new("Reports", "Boss"))
            .unwrap();
        let model = builder.build().unwrap();

        assert_eq!(
            codes(&model),
            vec![
                EdmErrorCode::NavigationPropertyOfCollectionTypeMustNotTargetToSingleton,
                EdmErrorCode::NavigationPropertyOfCollectionTypeMustNotTargetToSingleton,
            ]
        );
    }

    #[test]
    fn test_qualified_binding_targets() {
        let mut builder = ModelBuilder::new("NS");
        let person = keyed_entity(&mut builder, "Person");
        builder
            .add_unidirectional_navigation(
                person,
                NavigationPropertyInfo::new("Friends", person, Multiplicity::Many),
            )
            .unwrap();
        builder.entity_container("Container").unwrap();
        let people = builder.add_entity_set("People", person).unwrap();
        let others = builder.add_entity_set("Others", person).unwrap();
        builder
            .add_binding(people, NavigationBinding::new("Friends", "NS.Container/People"))
            .unwrap();
        builder
            .add_binding(others, NavigationBinding::new("Friends", "Other.Container/People"))
            .unwrap();
        let model = builder.build().unwrap();

        assert_eq!(
            codes(&model),
            vec![EdmErrorCode::NavigationPropertyMappingMustPointToValidTargetForProperty]
        );
        let friends = model.find_navigation(person, "Friends").unwrap();
        assert_eq!(
            model.find_navigation_target(people, friends, None),
            NavigationTarget::Bound(people)
        );
    }

    #[test]
    fn test_singleton_of_complex_type() {
        let mut builder = ModelBuilder::new("NS");
        let address = builder.complex_type("Address").unwrap();
        builder.entity_container("Container").unwrap();
        builder.add_singleton("Home", address).unwrap();
        let model = builder.build().unwrap();
        assert_eq!(codes(&model), vec![EdmErrorCode::SingletonTypeMustBeEntityType]);
    }
}

mod derived_type_tests {
    use super::*;

    struct Fixture {
        model: EdmModel,
        person: TypeId,
        employee: TypeId,
        people: NavigationSourceId,
        employees: NavigationSourceId,
        friends: NavigationId,
        manager: NavigationId,
    }

    fn fixture() -> Fixture {
        let mut builder = ModelBuilder::new("NS");
        let person = keyed_entity(&mut builder, "Person");
        let employee = builder.entity_type("Employee").unwrap();
        builder.set_base_type(employee, person).unwrap();
        let friends = builder
            .add_unidirectional_navigation(
                person,
                NavigationPropertyInfo::new("Friends", person, Multiplicity::Many),
            )
            .unwrap();
        let manager = builder
            .add_unidirectional_navigation(
                employee,
                NavigationPropertyInfo::new("Manager", employee, Multiplicity::ZeroOrOne),
            )
            .unwrap();

        builder.entity_container("Container").unwrap();
        let people = builder.add_entity_set("People", person).unwrap();
        let employees = builder.add_entity_set("Employees", employee).unwrap();
        builder
            .add_binding(people, NavigationBinding::new("Friends", "People"))
            .unwrap();
        builder
            .add_binding(people, NavigationBinding::new("NS.Employee/Friends", "Employees"))
            .unwrap();
        builder
            .add_binding(people, NavigationBinding::new("Manager", "Employees"))
            .unwrap();
        builder
            .add_binding(employees, NavigationBinding::new("Friends", "People"))
            .unwrap();

        Fixture {
            model: builder.build().unwrap(),
            person,
            employee,
            people,
            employees,
            friends,
            manager,
        }
    }

    #[test]
    fn test_derived_bindings_validate() {
        let f = fixture();
        assert!(codes(&f.model).is_empty());
    }

    #[test]
    fn test_base_navigation_visible_from_derived_set() {
        let f = fixture();
        assert_eq!(
            f.model.resolve_binding_path(f.employee, "Friends"),
            BindingPathResolution::Resolved(f.friends)
        );
        assert_eq!(
            f.model.find_navigation_target(f.employees, f.friends, None),
            NavigationTarget::Bound(f.people)
        );
    }

    #[test]
    fn test_derived_navigation_bindable_from_base_set() {
        let f = fixture();
        assert_eq!(
            f.model.resolve_binding_path(f.person, "Manager"),
            BindingPathResolution::Resolved(f.manager)
        );
        assert_eq!(
            f.model.find_navigation_target(f.people, f.manager, None),
            NavigationTarget::Bound(f.employees)
        );
    }

    #[test]
    fn test_cast_binding_takes_precedence_for_derived_instances() {
        let f = fixture();
        assert_eq!(
            f.model
                .find_navigation_target_for_instance(f.people, f.friends, f.employee),
            NavigationTarget::Bound(f.employees)
        );
        assert_eq!(
            f.model
                .find_navigation_target_for_instance(f.people, f.friends, f.person),
            NavigationTarget::Bound(f.people)
        );
    }

    #[test]
    fn test_cast_to_unrelated_type_does_not_resolve() {
        let f = fixture();
        assert!(f
            .model
            .resolve_binding_path(f.employee, "NS.Person/Friends")
            .navigation()
            .is_none());
    }
}

mod path_tests {
    use super::*;

    fn order_model(binding_path: &str) -> EdmModel {
        let mut builder = ModelBuilder::new("NS");
        let order = keyed_entity(&mut builder, "Order");
        let product = keyed_entity(&mut builder, "Product");
        let line = builder.entity_type("OrderLine").unwrap();
        builder
            .add_unidirectional_navigation(
                order,
                NavigationPropertyInfo::new("Lines", line, Multiplicity::Many).contains_target(true),
            )
            .unwrap();
        builder
            .add_unidirectional_navigation(
                order,
                NavigationPropertyInfo::new("Related", order, Multiplicity::Many),
            )
            .unwrap();
        builder
            .add_unidirectional_navigation(
                line,
                NavigationPropertyInfo::new("Product", product, Multiplicity::ZeroOrOne),
            )
            .unwrap();

        builder.entity_container("Container").unwrap();
        let orders = builder.add_entity_set("Orders", order).unwrap();
        builder.add_entity_set("Products", product).unwrap();
        builder
            .add_binding(orders, NavigationBinding::new(binding_path, "Products"))
            .unwrap();
        builder.build().unwrap()
    }

    #[test]
    fn test_path_through_containment_navigation() {
        assert!(codes(&order_model("Lines/Product")).is_empty());
    }

    #[test]
    fn test_path_through_plain_navigation_is_unresolved() {
        assert_eq!(
            codes(&order_model("Related/Lines/Product")),
            vec![
                EdmErrorCode::UnresolvedNavigationPropertyBindingPath,
                EdmErrorCode::NavigationPropertyMappingMustPointToValidTargetForProperty,
            ]
        );
    }

    #[test]
    fn test_binding_to_wrong_target_type() {
        assert_eq!(
            codes(&order_model("Related")),
            vec![EdmErrorCode::NavigationPropertyMappingMustPointToValidTargetForProperty]
        );
    }

    #[test]
    fn test_contained_navigation_without_binding() {
        let model = order_model("Lines/Product");
        let orders = model.find_binding_target("Orders").unwrap();
        let order = model.find_type("Order").unwrap();
        let lines = model.find_navigation(order, "Lines").unwrap();
        assert_eq!(
            model.find_navigation_target(orders, lines, None),
            NavigationTarget::Contained { navigation: lines }
        );
    }
}
