//! Construction-time failures of the schema graph

use thiserror::Error;

/// Violated preconditions of the data model, raised while the graph is built
///
/// These are programmer or document errors, not schema-design mistakes, and
/// are never deferred into the validation error list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Navigation property declared with the `Unknown` multiplicity
    #[error("multiplicity of navigation property '{navigation}' is out of range: Unknown is not a valid multiplicity")]
    MultiplicityOutOfRange { navigation: String },

    #[error("unknown type '{0}'")]
    UnknownType(String),

    #[error("unknown navigation property '{0}'")]
    UnknownNavigation(String),

    #[error("type '{0}' is declared more than once")]
    DuplicateTypeName(String),

    #[error("type '{type_name}' already declares a member named '{member}'")]
    DuplicateMemberName { type_name: String, member: String },

    #[error("entity container '{0}' has already been declared")]
    ContainerAlreadyDeclared(String),

    #[error("base type chain of '{0}' is cyclic")]
    InheritanceCycle(String),

    #[error("'{type_name}' is not a valid {expected}")]
    InvalidKind {
        type_name: String,
        expected: &'static str,
    },

    #[error("'{0}' is not a valid simple identifier")]
    InvalidName(String),

    #[error("property '{property}' is not declared on type '{type_name}' or its base types")]
    UnknownProperty { type_name: String, property: String },

    #[error("partner '{partner}' of navigation property '{navigation}' was not found on type '{target}'")]
    PartnerNotFound {
        navigation: String,
        partner: String,
        target: String,
    },

    #[error("navigation property '{navigation}' names '{partner}' as partner, but '{partner}' does not point back to it")]
    PartnerNotSymmetric { navigation: String, partner: String },

    #[error("partner '{partner}' of navigation property '{navigation}' does not target the declaring type '{declaring_type}'")]
    PartnerTargetMismatch {
        navigation: String,
        partner: String,
        declaring_type: String,
    },

    #[error("navigation property '{navigation}' and its partner '{partner}' cannot both contain their targets")]
    ContainmentOnBothEnds { navigation: String, partner: String },

    #[error("navigation property '{navigation}' and its partner '{partner}' cannot both carry a referential constraint")]
    ConstraintOnBothEnds { navigation: String, partner: String },

    #[error("no entity container has been declared")]
    MissingContainer,
}
