use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::attribution::AttributionConfig;

/// Top-level config file.
///
/// Example YAML:
/// ```yaml
/// coefficients: precompute_causal_effects.csv
/// model: model.json
/// attribution:
///   top_positive: 10
///   top_negative: 10
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Two-column CSV of precomputed causal-effect coefficients
    #[serde(default)]
    pub coefficients: Option<PathBuf>,

    /// Classifier artifact (JSON)
    #[serde(default)]
    pub model: Option<PathBuf>,

    #[serde(default)]
    pub attribution: Option<AttributionConfig>,
}

impl Config {
    /// Make relative paths relative to `base` (the config file's directory).
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        let resolve = |p: PathBuf| if p.is_relative() { base.join(p) } else { p };
        self.coefficients = self.coefficients.map(resolve);
        self.model = self.model.map(resolve);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
coefficients: data/effects.csv
model: /opt/models/model.json
attribution:
  top_positive: 5
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.coefficients, Some(PathBuf::from("data/effects.csv")));
        assert_eq!(config.attribution.unwrap().top_positive, Some(5));
    }

    #[test]
    fn test_empty_config_parse() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<Config, _> = serde_saphyr::from_str("queries: []\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_relative_paths_only() {
        let config = Config {
            coefficients: Some(PathBuf::from("effects.csv")),
            model: Some(PathBuf::from("/abs/model.json")),
            attribution: None,
        }
        .resolve_paths(Path::new("/etc/taxa-rank"));
        assert_eq!(
            config.coefficients,
            Some(PathBuf::from("/etc/taxa-rank/effects.csv"))
        );
        assert_eq!(config.model, Some(PathBuf::from("/abs/model.json")));
    }
}
