//! YAML parsing with error handling

use serde::de::DeserializeOwned;

use crate::yaml::diagnostics::{YamlError, YamlSyntaxError};

/// Parse YAML content into a typed value with nice error messages
pub fn parse_yaml<T: DeserializeOwned>(content: &str, filename: &str) -> Result<T, YamlError> {
    serde_yml::from_str(content).map_err(|e| {
        YamlError::Syntax(YamlSyntaxError::from_serde_error(&e, content, filename))
    })
}

/// Parse YAML from a file path
pub fn parse_yaml_file<T: DeserializeOwned>(path: &std::path::Path) -> Result<T, YamlError> {
    let content = std::fs::read_to_string(path)?;
    let filename = path.display().to_string();
    parse_yaml(&content, &filename)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::params::ProcessSettings;
    use crate::core::yield_model::YieldModel;

    #[test]
    fn test_parse_process_settings() {
        let yaml = "die_area_mm2: 42.5\nmodel: nb\ncluster_factor: 0.8";
        let settings: ProcessSettings = parse_yaml(yaml, "fabyield.yaml").unwrap();
        assert_eq!(settings.die_area_mm2, 42.5);
        assert_eq!(settings.model, YieldModel::NegativeBinomial);
        assert_eq!(settings.cluster_factor, 0.8);
        assert_eq!(settings.wafer_diameter_mm, 300.0);
    }

    #[test]
    fn test_unknown_model_reports_filename() {
        let yaml = "die_area_mm2: 42.5\nmodel: gaussian\n";
        let err = parse_yaml::<ProcessSettings>(yaml, "fabyield.yaml").unwrap_err();
        match err {
            YamlError::Syntax(syntax) => {
                assert_eq!(syntax.filename, "fabyield.yaml");
                assert!(syntax.message.contains("gaussian"));
            }
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_invalid_yaml_returns_error() {
        let yaml = "die_area_mm2: [1, 2\n";
        let result: Result<ProcessSettings, _> = parse_yaml(yaml, "test.yaml");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result: Result<ProcessSettings, _> =
            parse_yaml_file(std::path::Path::new("/nonexistent/fabyield.yaml"));
        assert!(matches!(result, Err(YamlError::Io(_))));
    }
}
