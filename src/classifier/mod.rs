pub mod linear;
pub mod schema;

pub use linear::{LinearModel, LinearModelArtifact};
pub use schema::{FeatureSchema, AGE_FEATURE};

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::subject::FeatureVector;

/// Binary outcome of the diagnostic classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Diagnosis {
    NotDetected,
    Detected,
}

impl Diagnosis {
    pub fn from_label(label: u8) -> Self {
        if label == 1 {
            Diagnosis::Detected
        } else {
            Diagnosis::NotDetected
        }
    }

    pub fn is_detected(self) -> bool {
        self == Diagnosis::Detected
    }
}

/// Opaque diagnostic model. Must be deterministic for the same input.
pub trait Classifier {
    /// Features the model consumes, age included.
    fn schema(&self) -> &FeatureSchema;

    fn predict(&self, input: &FeatureVector) -> Result<Diagnosis, InputError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnosis_labels() {
        assert_eq!(Diagnosis::from_label(1), Diagnosis::Detected);
        assert_eq!(Diagnosis::from_label(0), Diagnosis::NotDetected);
        assert!(!Diagnosis::NotDetected.is_detected());
    }
}
