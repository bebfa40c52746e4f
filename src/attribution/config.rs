use serde::{Deserialize, Serialize};

pub const DEFAULT_TOP_POSITIVE: usize = 10;
pub const DEFAULT_TOP_NEGATIVE: usize = 10;

/// Attribution limits.
///
/// Example YAML:
/// ```yaml
/// attribution:
///   top_positive: 10
///   top_negative: 10
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AttributionConfig {
    /// Most risk-raising taxa to keep (default: 10)
    #[serde(default)]
    pub top_positive: Option<usize>,

    /// Most risk-lowering taxa to keep (default: 10)
    #[serde(default)]
    pub top_negative: Option<usize>,
}

impl AttributionConfig {
    pub fn positive_limit(&self) -> usize {
        self.top_positive.unwrap_or(DEFAULT_TOP_POSITIVE)
    }

    pub fn negative_limit(&self) -> usize {
        self.top_negative.unwrap_or(DEFAULT_TOP_NEGATIVE)
    }
}

impl Default for AttributionConfig {
    fn default() -> Self {
        Self {
            top_positive: Some(DEFAULT_TOP_POSITIVE),
            top_negative: Some(DEFAULT_TOP_NEGATIVE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_attribution_config() {
        let config = AttributionConfig::default();
        assert_eq!(config.positive_limit(), 10);
        assert_eq!(config.negative_limit(), 10);
    }

    #[test]
    fn test_attribution_config_serde_roundtrip() {
        let config = AttributionConfig::default();
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: AttributionConfig = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_attribution_config_falls_back() {
        let yaml = "top_positive: 5\n";
        let config: AttributionConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.positive_limit(), 5);
        assert_eq!(config.negative_limit(), 10);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "top_k: 5\n";
        let result: Result<AttributionConfig, _> = serde_saphyr::from_str(yaml);
        assert!(result.is_err());
    }
}
