//! Model document loading, saving and graph invariants

use edm_validation::models::{EdmModel, Multiplicity, Partner};
use edm_validation::validation::{EdmErrorCode, validate_model};
use edm_validation::{DocumentFormat, EdmVersion, ModelLoader, ModelSaver, SchemaDocument};

const SHOP: &str = r#"
namespace: Shop
complexTypes:
  - name: Address
    properties:
      - name: Street
        type: Edm.String
    navigationProperties:
      - name: City
        type: City
        multiplicity: "0..1"
entityTypes:
  - name: City
    key: [Id]
    properties:
      - name: Id
        type: Edm.Int32
        nullable: false
  - name: Customer
    key: [Id]
    properties:
      - name: Id
        type: Edm.Int32
        nullable: false
      - name: Home
        type: Address
    navigationProperties:
      - name: Orders
        type: Order
        multiplicity: "*"
        partner: Customer
  - name: VipCustomer
    baseType: Customer
  - name: Order
    key: [Id]
    properties:
      - name: Id
        type: Edm.Int32
        nullable: false
      - name: CustomerId
        type: Edm.Int32
        nullable: false
    navigationProperties:
      - name: Customer
        type: Shop.Customer
        multiplicity: "1"
        partner: Orders
        referentialConstraints:
          - property: CustomerId
            referencedProperty: Id
      - name: Lines
        type: OrderLine
        multiplicity: "*"
        containsTarget: true
  - name: OrderLine
    key: [Id]
    properties:
      - name: Id
        type: Edm.Int32
        nullable: false
    navigationProperties:
      - name: Product
        type: Product
        multiplicity: "0..1"
  - name: Product
    key: [Id]
    properties:
      - name: Id
        type: Edm.Int32
        nullable: false
container:
  name: Shop
  entitySets:
    - name: Customers
      type: Customer
      bindings:
        - path: Orders
          target: Orders
        - path: Home/City
          target: Cities
    - name: Orders
      type: Order
      bindings:
        - path: Customer
          target: Customers
        - path: Lines/Product
          target: Products
    - name: Cities
      type: City
    - name: Products
      type: Product
  singletons:
    - name: TopCustomer
      type: VipCustomer
      bindings:
        - path: Orders
          target: Shop/Orders
  operationImports:
    - name: GetTopOrders
      kind: function
"#;

fn shop() -> EdmModel {
    ModelLoader::with_source_name("shop.yaml")
        .from_yaml_str(SHOP)
        .unwrap()
}

mod document_tests {
    use super::*;

    #[test]
    fn test_shop_model_is_valid_in_both_versions() {
        let model = shop();
        for version in [EdmVersion::V4, EdmVersion::V401] {
            let (valid, errors) = validate_model(&model, version);
            assert!(valid, "{:?}", errors);
        }
    }

    #[test]
    fn test_yaml_round_trip_preserves_document() {
        let model = shop();
        let saved = ModelSaver::to_yaml_string(&model).unwrap();
        let reloaded = ModelLoader::new().from_yaml_str(&saved).unwrap();

        assert_eq!(ModelSaver::to_document(&model), ModelSaver::to_document(&reloaded));
        assert!(validate_model(&reloaded, EdmVersion::V4).0);
    }

    #[test]
    fn test_saved_document_keeps_declaration_order() {
        let original: SchemaDocument = serde_yaml::from_str(SHOP).unwrap();
        let saved = ModelSaver::to_document(&shop());
        let names = |document: &SchemaDocument| -> Vec<(String, Vec<String>)> {
            document
                .entity_types
                .iter()
                .map(|ty| {
                    (
                        ty.name.clone(),
                        ty.navigation_properties
                            .iter()
                            .map(|nav| nav.name.clone())
                            .collect(),
                    )
                })
                .collect()
        };
        assert_eq!(names(&saved), names(&original));
    }

    #[test]
    fn test_json_file_round_trip() {
        let model = shop();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.json");

        ModelSaver::save_file(&model, &path).unwrap();
        assert_eq!(DocumentFormat::from_path(&path), DocumentFormat::Json);
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(serde_json::from_str::<serde_json::Value>(&content).is_ok());

        let reloaded = ModelLoader::load_file(&path).unwrap();
        assert_eq!(ModelSaver::to_document(&model), ModelSaver::to_document(&reloaded));
    }

    #[test]
    fn test_render_matches_format_specific_output() {
        let model = shop();
        assert_eq!(
            ModelSaver::render(&model, DocumentFormat::Json).unwrap(),
            ModelSaver::to_json_string(&model).unwrap()
        );
        assert_eq!(
            ModelSaver::render(&model, DocumentFormat::Yaml).unwrap(),
            ModelSaver::to_yaml_string(&model).unwrap()
        );
    }

    #[test]
    fn test_errors_carry_document_locations() {
        let broken = SHOP.replacen(
            "      - name: CustomerId\n        type: Edm.Int32\n        nullable: false",
            "      - name: CustomerId\n        type: Edm.Int32\n        nullable: true",
            1,
        );
        let model = ModelLoader::with_source_name("shop.yaml")
            .from_yaml_str(&broken)
            .unwrap();
        let (valid, errors) = validate_model(&model, EdmVersion::V4);

        assert!(!valid);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].code,
            EdmErrorCode::InvalidMultiplicityOfPrincipalEnd
        );
        assert_eq!(errors[0].location.as_str(), Some("shop.yaml#/Order/Customer"));
    }

    #[test]
    fn test_unknown_binding_target_is_reported() {
        let broken = SHOP.replace("target: Cities", "target: Towns");
        let model = ModelLoader::new().from_yaml_str(&broken).unwrap();
        let (_, errors) = validate_model(&model, EdmVersion::V4);
        let codes: Vec<EdmErrorCode> = errors.iter().map(|error| error.code).collect();
        assert_eq!(
            codes,
            vec![EdmErrorCode::NavigationPropertyMappingMustPointToValidTargetForProperty]
        );
        assert_eq!(
            errors[0].location.as_str(),
            Some("<memory>#/Shop/Customers/Home/City")
        );
    }
}

mod graph_tests {
    use super::*;

    #[test]
    fn test_partners_are_symmetric() {
        let model = shop();
        for (id, nav) in model.navigations() {
            if let Some(partner) = nav.explicit_partner() {
                assert_eq!(model.partner(partner), Some(id));
                assert_eq!(model.navigation(partner).target_type, nav.declaring_type);
                assert_eq!(
                    model.partner_multiplicity(id),
                    model.navigation(partner).target_multiplicity
                );
            }
        }
    }

    #[test]
    fn test_containment_is_one_sided() {
        let model = shop();
        for (_, nav) in model.navigations().filter(|(_, nav)| nav.contains_target) {
            if let Some(partner) = nav.explicit_partner() {
                assert!(!model.navigation(partner).contains_target);
            }
        }
    }

    #[test]
    fn test_unidirectional_navigations_get_implicit_partners() {
        let model = shop();
        let order = model.find_type("Order").unwrap();
        let line = model.find_type("OrderLine").unwrap();
        let lines = model.find_navigation(order, "Lines").unwrap();
        let product = model.find_navigation(line, "Product").unwrap();

        assert_eq!(
            model.navigation(lines).partner,
            Partner::Implicit {
                multiplicity: Multiplicity::One
            }
        );
        assert_eq!(
            model.navigation(product).partner,
            Partner::Implicit {
                multiplicity: Multiplicity::ZeroOrOne
            }
        );
    }

    #[test]
    fn test_constraint_side_is_dependent() {
        let model = shop();
        let order = model.find_type("Order").unwrap();
        let customer = model.find_type("Customer").unwrap();
        let to_customer = model.find_navigation(order, "Customer").unwrap();
        let to_orders = model.find_navigation(customer, "Orders").unwrap();

        assert!(model.is_dependent(to_customer));
        assert!(model.is_principal(to_orders));
        assert!(!model.navigation(to_orders).has_constraint());
    }

    #[test]
    fn test_derived_type_inherits_navigation_and_key() {
        let model = shop();
        let vip = model.find_type("VipCustomer").unwrap();
        let customer = model.find_type("Customer").unwrap();
        assert!(model.is_or_inherits_from(vip, customer));
        assert!(model.find_navigation(vip, "Orders").is_some());
        assert_eq!(model.key_of(vip), model.key_of(customer));
    }
}
