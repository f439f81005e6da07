//! Source-position tokens carried through validation untouched

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque source position supplied by whatever layer constructed the model.
///
/// The validator never computes locations; it copies the token of the
/// offending element into each error it reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorLocation(Option<String>);

impl ErrorLocation {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    /// Location for elements built without source information
    pub fn unknown() -> Self {
        Self(None)
    }

    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_known(&self) -> bool {
        self.0.is_some()
    }
}

impl fmt::Display for ErrorLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(token) => write!(f, "{}", token),
            None => write!(f, "(unknown location)"),
        }
    }
}
