//! Validate command implementation

use crate::cli::error::CliError;
use crate::cli::output::{OutputFormat, format_report};
use crate::model::{DocumentFormat, ModelLoader};
use crate::models::EdmVersion;
use crate::validation::{EdmValidator, ValidationConfig, ValidationReport};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

/// Arguments of one validate invocation
#[derive(Debug, Clone, Default)]
pub struct ValidateOptions {
    /// File path, or `-` for stdin
    pub input: String,
    /// Overrides the format guessed from the file extension
    pub format: Option<DocumentFormat>,
    /// Overrides the version from the configuration file
    pub version: Option<EdmVersion>,
    pub config: Option<PathBuf>,
    pub output: OutputFormat,
}

/// Load input content from file or stdin
fn load_input(input: &str) -> Result<String, CliError> {
    if input == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| CliError::InvalidArgument(format!("Failed to read stdin: {}", e)))?;
        Ok(content)
    } else {
        let path = PathBuf::from(input);
        std::fs::read_to_string(&path).map_err(|e| CliError::FileReadError(path, e.to_string()))
    }
}

fn load_config(options: &ValidateOptions) -> Result<ValidationConfig, CliError> {
    let mut config = match &options.config {
        Some(path) => {
            ValidationConfig::from_file(path).map_err(|e| CliError::ConfigError(e.to_string()))?
        }
        None => ValidationConfig::default(),
    };
    if let Some(version) = options.version {
        config.version = version;
    }
    Ok(config)
}

/// Load and validate the model described by `options`
pub fn run_validate(options: &ValidateOptions) -> Result<ValidationReport, CliError> {
    let config = load_config(options)?;
    let content = load_input(&options.input)?;
    let format = options.format.unwrap_or_else(|| {
        if options.input == "-" {
            DocumentFormat::Yaml
        } else {
            DocumentFormat::from_path(Path::new(&options.input))
        }
    });
    let source = if options.input == "-" { "<stdin>" } else { options.input.as_str() };

    let model = ModelLoader::with_source_name(source)
        .load_str(&content, format)
        .map_err(|e| CliError::LoadError(e.to_string()))?;
    info!("Validating {} against EDM {}", source, config.version);
    Ok(EdmValidator::new(config).validate(&model))
}

/// Handle the validate command
pub fn handle_validate(options: &ValidateOptions) -> Result<(), CliError> {
    let report = run_validate(options)?;
    let source = if options.input == "-" { "<stdin>" } else { options.input.as_str() };
    print!("{}", format_report(&report, source, options.output)?);
    if options.output == OutputFormat::Json {
        println!();
    }

    if report.is_valid() {
        Ok(())
    } else {
        Err(CliError::ValidationError(report.errors().len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MODEL: &str = r#"
namespace: NS
entityTypes:
  - name: Person
    key: [Id]
    properties:
      - name: Id
        type: Edm.Int32
        nullable: false
container:
  name: Container
  entitySets:
    - name: People
      type: Person
  singletons:
    - name: people
      type: Person
"#;

    fn write_model() -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(MODEL.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_version_override_changes_rule_set() {
        let file = write_model();
        let mut options = ValidateOptions {
            input: file.path().display().to_string(),
            ..Default::default()
        };
        assert!(run_validate(&options).unwrap().is_valid());

        options.version = Some(EdmVersion::V401);
        let report = run_validate(&options).unwrap();
        assert_eq!(report.errors().len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let options = ValidateOptions {
            input: "/nonexistent/model.yaml".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            run_validate(&options),
            Err(CliError::FileReadError(_, _))
        ));
    }

    #[test]
    fn test_config_file_is_applied() {
        let file = write_model();
        let mut config = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        config
            .write_all(b"version = \"4.01\"\ndisabledRules = [\"containerMemberNames\"]\n")
            .unwrap();
        let options = ValidateOptions {
            input: file.path().display().to_string(),
            config: Some(config.path().to_path_buf()),
            ..Default::default()
        };
        let report = run_validate(&options).unwrap();
        assert_eq!(report.version, EdmVersion::V401);
        assert!(report.is_valid());
    }
}
