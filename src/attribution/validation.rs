use super::config::AttributionConfig;

/// Validate attribution limits at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_attribution(config: &AttributionConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.top_positive == Some(0) {
        errors.push("attribution.top_positive: must be at least 1".to_string());
    }

    if config.top_negative == Some(0) {
        errors.push("attribution.top_negative: must be at least 1".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        assert!(validate_attribution(&AttributionConfig::default()).is_ok());
    }

    #[test]
    fn test_empty_config() {
        let config = AttributionConfig {
            top_positive: None,
            top_negative: None,
        };
        assert!(validate_attribution(&config).is_ok());
    }

    #[test]
    fn test_zero_limit() {
        let config = AttributionConfig {
            top_positive: Some(0),
            top_negative: Some(3),
        };
        let errors = validate_attribution(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("attribution.top_positive"));
    }

    #[test]
    fn test_collects_all_errors() {
        let config = AttributionConfig {
            top_positive: Some(0),
            top_negative: Some(0),
        };
        let errors = validate_attribution(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
