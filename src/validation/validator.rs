//! Validation driver
//!
//! Runs the rule set of the configured version over a model and collects
//! every error, rule by rule. Validation never mutates the model; running
//! it twice yields the same report.

use super::config::ValidationConfig;
use super::error::{EdmError, EdmErrorCode};
use super::rule::{RuleRegistry, ValidationRule};
use crate::models::{EdmModel, EdmVersion};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Outcome of validating one model
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub version: EdmVersion,
    pub errors: Vec<EdmError>,
    /// Errors were dropped because the configured cap was reached
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub truncated: bool,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[EdmError] {
        &self.errors
    }

    pub fn errors_with_code(&self, code: EdmErrorCode) -> impl Iterator<Item = &EdmError> {
        self.errors.iter().filter(move |error| error.code == code)
    }

    pub fn into_parts(self) -> (bool, Vec<EdmError>) {
        (self.errors.is_empty(), self.errors)
    }
}

pub struct EdmValidator {
    config: ValidationConfig,
    rules: Vec<Box<dyn ValidationRule>>,
}

impl EdmValidator {
    pub fn new(config: ValidationConfig) -> Self {
        let rules = RuleRegistry::for_version(config.version)
            .into_iter()
            .filter(|rule| config.is_enabled(rule.id()))
            .collect();
        Self { config, rules }
    }

    pub fn with_version(version: EdmVersion) -> Self {
        Self::new(ValidationConfig::builder().version(version).build())
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    pub fn validate(&self, model: &EdmModel) -> ValidationReport {
        debug!(
            "Validating model '{}' against EDM {} with {} rules",
            model.namespace(),
            self.config.version,
            self.rules.len()
        );

        let mut errors = Vec::new();
        let mut truncated = false;
        for rule in &self.rules {
            let before = errors.len();
            rule.check(model, &mut errors);
            debug!("Rule {} reported {} errors", rule.id(), errors.len() - before);

            if let Some(max) = self.config.max_errors.filter(|max| *max > 0) {
                if errors.len() > max {
                    errors.truncate(max);
                    truncated = true;
                    break;
                }
            }
        }

        info!(
            "Validated model '{}': {} errors",
            model.namespace(),
            errors.len()
        );
        ValidationReport {
            version: self.config.version,
            errors,
            truncated,
        }
    }
}

impl Default for EdmValidator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

/// Validate `model` with every rule of `version`
pub fn validate_model(model: &EdmModel, version: EdmVersion) -> (bool, Vec<EdmError>) {
    EdmValidator::with_version(version).validate(model).into_parts()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ModelBuilder, Multiplicity, NavigationPropertyInfo};
    use crate::validation::RuleId;

    fn invalid_model() -> EdmModel {
        let mut builder = ModelBuilder::new("NS");
        let person = builder.entity_type("Person").unwrap();
        let address = builder.complex_type("Address").unwrap();
        builder
            .add_bidirectional_navigation(
                person,
                NavigationPropertyInfo::new("ToFriend", person, Multiplicity::One).contains_target(true),
                NavigationPropertyInfo::new("ToPerson", person, Multiplicity::One),
            )
            .unwrap();
        builder
            .add_unidirectional_navigation(
                person,
                NavigationPropertyInfo::new("Home", address, Multiplicity::ZeroOrOne),
            )
            .unwrap();
        builder.build().unwrap()
    }

    #[test]
    fn test_rule_major_order() {
        let (valid, errors) = validate_model(&invalid_model(), EdmVersion::V4);
        assert!(!valid);
        let codes: Vec<_> = errors.iter().map(|error| error.code).collect();
        assert_eq!(
            codes,
            vec![
                EdmErrorCode::InvalidNavigationPropertyType,
                EdmErrorCode::NavigationPropertyWithRecursiveContainmentSourceMustBeFromZeroOrOne,
                EdmErrorCode::NavigationPropertyWithRecursiveContainmentTargetMustBeOptional,
            ]
        );
    }

    #[test]
    fn test_disabled_rules_are_skipped() {
        let config = ValidationConfig::builder()
            .disable_rule(RuleId::NavigationTypeMustBeEntity)
            .build();
        let report = EdmValidator::new(config).validate(&invalid_model());
        assert_eq!(report.errors().len(), 2);
        assert_eq!(
            report
                .errors_with_code(EdmErrorCode::InvalidNavigationPropertyType)
                .count(),
            0
        );
    }

    #[test]
    fn test_max_errors_truncates_in_order() {
        let config = ValidationConfig::builder().max_errors(2).build();
        let report = EdmValidator::new(config).validate(&invalid_model());
        assert_eq!(report.errors().len(), 2);
        assert!(report.truncated);
        assert_eq!(report.errors()[0].code, EdmErrorCode::InvalidNavigationPropertyType);
    }

    #[test]
    fn test_zero_max_errors_keeps_every_error() {
        let config = ValidationConfig::from_toml_str("maxErrors = 0").unwrap();
        let report = EdmValidator::new(config).validate(&invalid_model());
        assert!(!report.is_valid());
        assert_eq!(report.errors().len(), 3);
        assert!(!report.truncated);

        let config = ValidationConfig {
            max_errors: Some(0),
            ..ValidationConfig::default()
        };
        let report = EdmValidator::new(config).validate(&invalid_model());
        assert_eq!(report.errors().len(), 3);
        assert!(!report.truncated);
    }

    #[test]
    fn test_validation_is_idempotent() {
        let model = invalid_model();
        let validator = EdmValidator::default();
        assert_eq!(validator.validate(&model), validator.validate(&model));
    }
}
