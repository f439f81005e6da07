//! Serialized form of a schema graph
//!
//! References between elements are by name: types by simple or
//! namespace-qualified name, partners and key members by member name,
//! binding targets by navigation source name.

use crate::models::{Multiplicity, OnDeleteAction, OperationImportKind};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

fn default_true() -> bool {
    true
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDocument {
    pub namespace: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entity_types: Vec<TypeDocument>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub complex_types: Vec<TypeDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<ContainerDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDocument {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_type: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_abstract: bool,
    /// Key property names, entity types only
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PropertyDocument>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub navigation_properties: Vec<NavigationDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDocument {
    pub name: String,
    /// `Edm.*` primitive name or complex type name
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub collection: bool,
    #[serde(default = "default_true")]
    pub nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationDocument {
    pub name: String,
    /// Target entity type name
    #[serde(rename = "type")]
    pub target: String,
    pub multiplicity: Multiplicity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub contains_target: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub referential_constraints: Vec<ConstraintDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<OnDeleteAction>,
    /// Multiplicity of the unnamed opposite when no partner is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implicit_partner_multiplicity: Option<Multiplicity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintDocument {
    /// Dependent property on the declaring type
    pub property: String,
    /// Principal property on the target type
    pub referenced_property: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerDocument {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entity_sets: Vec<NavigationSourceDocument>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub singletons: Vec<NavigationSourceDocument>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub operation_imports: Vec<OperationImportDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationSourceDocument {
    pub name: String,
    #[serde(rename = "type")]
    pub element_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bindings: Vec<BindingDocument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingDocument {
    pub path: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationImportDocument {
    pub name: String,
    pub kind: OperationImportKind,
}

/// Text encoding of a [`SchemaDocument`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    #[default]
    Yaml,
    Json,
}

impl DocumentFormat {
    /// Guess the format from a file extension; anything but `.json` is YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }
}

impl FromStr for DocumentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(DocumentFormat::Yaml),
            "json" => Ok(DocumentFormat::Json),
            other => Err(format!("unsupported document format '{}'", other)),
        }
    }
}
