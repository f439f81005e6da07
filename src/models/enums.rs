//! Enumerations shared across the schema graph

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declared multiplicity of a navigation end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Multiplicity {
    /// Unset sentinel. Never accepted by the model builder.
    #[serde(skip)]
    Unknown,
    #[serde(rename = "0..1")]
    ZeroOrOne,
    #[serde(rename = "1")]
    One,
    #[serde(rename = "*")]
    Many,
}

impl Multiplicity {
    pub fn is_collection(self) -> bool {
        self == Multiplicity::Many
    }

    /// Symbol used in messages and documents
    pub fn symbol(self) -> &'static str {
        match self {
            Multiplicity::Unknown => "?",
            Multiplicity::ZeroOrOne => "0..1",
            Multiplicity::One => "1",
            Multiplicity::Many => "*",
        }
    }
}

impl fmt::Display for Multiplicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Entity or complex type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Entity,
    Complex,
}

/// Action taken on dependents when the source of a navigation is deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OnDeleteAction {
    Cascade,
    SetNull,
    SetDefault,
    None,
}

/// Primitive types a structural property may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Binary,
    Boolean,
    Byte,
    Date,
    DateTimeOffset,
    Decimal,
    Double,
    Duration,
    Guid,
    Int16,
    Int32,
    Int64,
    SByte,
    Single,
    String,
    TimeOfDay,
}

impl PrimitiveKind {
    const ALL: [PrimitiveKind; 16] = [
        PrimitiveKind::Binary,
        PrimitiveKind::Boolean,
        PrimitiveKind::Byte,
        PrimitiveKind::Date,
        PrimitiveKind::DateTimeOffset,
        PrimitiveKind::Decimal,
        PrimitiveKind::Double,
        PrimitiveKind::Duration,
        PrimitiveKind::Guid,
        PrimitiveKind::Int16,
        PrimitiveKind::Int32,
        PrimitiveKind::Int64,
        PrimitiveKind::SByte,
        PrimitiveKind::Single,
        PrimitiveKind::String,
        PrimitiveKind::TimeOfDay,
    ];

    /// Fully qualified name, e.g. `Edm.Int32`
    pub fn qualified_name(self) -> &'static str {
        match self {
            PrimitiveKind::Binary => "Edm.Binary",
            PrimitiveKind::Boolean => "Edm.Boolean",
            PrimitiveKind::Byte => "Edm.Byte",
            PrimitiveKind::Date => "Edm.Date",
            PrimitiveKind::DateTimeOffset => "Edm.DateTimeOffset",
            PrimitiveKind::Decimal => "Edm.Decimal",
            PrimitiveKind::Double => "Edm.Double",
            PrimitiveKind::Duration => "Edm.Duration",
            PrimitiveKind::Guid => "Edm.Guid",
            PrimitiveKind::Int16 => "Edm.Int16",
            PrimitiveKind::Int32 => "Edm.Int32",
            PrimitiveKind::Int64 => "Edm.Int64",
            PrimitiveKind::SByte => "Edm.SByte",
            PrimitiveKind::Single => "Edm.Single",
            PrimitiveKind::String => "Edm.String",
            PrimitiveKind::TimeOfDay => "Edm.TimeOfDay",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qualified_name())
    }
}

impl FromStr for PrimitiveKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PrimitiveKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.qualified_name() == s)
            .ok_or_else(|| format!("unknown primitive type '{}'", s))
    }
}

/// Revision of the modelling language a rule set is chosen for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EdmVersion {
    #[default]
    #[serde(rename = "4.0")]
    V4,
    #[serde(rename = "4.01")]
    V401,
}

impl fmt::Display for EdmVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdmVersion::V4 => write!(f, "4.0"),
            EdmVersion::V401 => write!(f, "4.01"),
        }
    }
}

impl FromStr for EdmVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "4" | "4.0" => Ok(EdmVersion::V4),
            "4.01" => Ok(EdmVersion::V401),
            other => Err(format!("unsupported EDM version '{}'", other)),
        }
    }
}
