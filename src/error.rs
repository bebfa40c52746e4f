use std::path::PathBuf;
use thiserror::Error;

/// Startup-fatal problems with the coefficient source.
#[derive(Debug, Error)]
pub enum CoefficientError {
    #[error("Failed to read coefficient table at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed coefficient table: {0}")]
    Csv(#[from] csv::Error),

    #[error("Coefficient table line {line}: expected 2 columns (feature, coefficient), found {found}")]
    ColumnCount { line: u64, found: usize },

    #[error("Coefficient table line {line}: empty feature identifier")]
    EmptyFeature { line: u64 },

    #[error("Coefficient for '{feature}' is not a number: '{raw}'")]
    NonNumeric { feature: String, raw: String },

    #[error("Coefficient for '{feature}' is not finite: {value}")]
    NonFinite { feature: String, value: f64 },

    #[error("Conflicting coefficients for '{feature}': {first} and {second}")]
    ConflictingDuplicate {
        feature: String,
        first: f64,
        second: f64,
    },
}

/// Startup-fatal problems with the classifier artifact.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Failed to read model artifact at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Model artifact declares no features")]
    EmptySchema,

    #[error("Model artifact lists feature '{0}' more than once")]
    DuplicateFeature(String),

    #[error("Model artifact has {weights} weights for {features} features")]
    ShapeMismatch { features: usize, weights: usize },

    #[error("Model artifact has a non-finite parameter for '{0}'")]
    NonFiniteParameter(String),

    #[error("Model threshold must lie strictly between 0 and 1, got {0}")]
    InvalidThreshold(f64),
}

/// Per-request validation failures. Recoverable; reported back to the caller.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("Missing required features: {}", .0.join(", "))]
    MissingFeatures(Vec<String>),

    #[error("Null values found in the following features: {}", .0.join(", "))]
    NullValues(Vec<String>),

    #[error("Non-numeric values found in the following features: {}", .0.join(", "))]
    NonNumeric(Vec<String>),

    #[error("Impact overflows for the following features: {}", .0.join(", "))]
    NonFiniteImpact(Vec<String>),

    #[error("Classifier score is not finite (features: {})", .0.join(", "))]
    NonFiniteScore(Vec<String>),

    #[error("Feature '{0}' appears more than once")]
    DuplicateFeature(String),

    #[error("Invalid age {0}: must be at least 1")]
    InvalidAge(f64),

    #[error("No patient ID column found (expected '#OTU ID' or 'sample-id')")]
    MissingPatientIdColumn,

    #[error("Patient '{0}' not found")]
    UnknownPatient(String),

    #[error("The input table contains no rows")]
    EmptyTable,

    #[error("Malformed input table: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_lists_every_feature() {
        let err = InputError::MissingFeatures(vec!["g__Prevotella".to_string(), "g__Blautia".to_string()]);
        assert_eq!(
            err.to_string(),
            "Missing required features: g__Prevotella, g__Blautia"
        );
    }

    #[test]
    fn test_conflicting_duplicate_names_feature() {
        let err = CoefficientError::ConflictingDuplicate {
            feature: "g__Dialister".to_string(),
            first: 0.5,
            second: -0.5,
        };
        assert!(err.to_string().contains("g__Dialister"));
    }
}
