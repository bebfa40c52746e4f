use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use super::schema::FeatureSchema;
use super::{Classifier, Diagnosis};
use crate::error::{ClassifierError, InputError};
use crate::subject::FeatureVector;

/// On-disk form of a [`LinearModel`].
///
/// Example JSON:
/// ```json
/// {
///   "selected_features": ["g__Prevotella", "g__Blautia", "age"],
///   "intercept": -1.2,
///   "weights": [0.8, -0.4, 0.01],
///   "threshold": 0.5
/// }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LinearModelArtifact {
    pub selected_features: Vec<String>,
    pub intercept: f64,
    pub weights: Vec<f64>,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_threshold() -> f64 {
    0.5
}

/// Logistic model over a fixed feature schema.
///
/// Stands in for whatever model produced the artifact; only its binary
/// decision is used.
#[derive(Debug, Clone)]
pub struct LinearModel {
    schema: FeatureSchema,
    intercept: f64,
    weights: Vec<f64>,
    threshold: f64,
}

impl LinearModel {
    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        let content = fs::read_to_string(path).map_err(|source| ClassifierError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact: LinearModelArtifact = serde_json::from_str(&content)?;
        let model = Self::from_artifact(artifact)?;
        log::info!(
            "Loaded classifier from {} ({} features)",
            path.display(),
            model.schema.features().len()
        );
        Ok(model)
    }

    pub fn from_artifact(artifact: LinearModelArtifact) -> Result<Self, ClassifierError> {
        if artifact.selected_features.is_empty() {
            return Err(ClassifierError::EmptySchema);
        }

        let mut seen = HashSet::new();
        for feature in &artifact.selected_features {
            if !seen.insert(feature.as_str()) {
                return Err(ClassifierError::DuplicateFeature(feature.clone()));
            }
        }

        if artifact.weights.len() != artifact.selected_features.len() {
            return Err(ClassifierError::ShapeMismatch {
                features: artifact.selected_features.len(),
                weights: artifact.weights.len(),
            });
        }

        if !artifact.intercept.is_finite() {
            return Err(ClassifierError::NonFiniteParameter("intercept".to_string()));
        }
        if let Some((feature, _)) = artifact
            .selected_features
            .iter()
            .zip(&artifact.weights)
            .find(|(_, w)| !w.is_finite())
        {
            return Err(ClassifierError::NonFiniteParameter(feature.clone()));
        }

        if !(artifact.threshold > 0.0 && artifact.threshold < 1.0) {
            return Err(ClassifierError::InvalidThreshold(artifact.threshold));
        }

        Ok(Self {
            schema: FeatureSchema::new(artifact.selected_features),
            intercept: artifact.intercept,
            weights: artifact.weights,
            threshold: artifact.threshold,
        })
    }

    /// Predicted probability of a positive diagnosis.
    pub fn probability(&self, input: &FeatureVector) -> Result<f64, InputError> {
        let values = self.schema.arrange(input)?;
        let z = self.intercept
            + self
                .weights
                .iter()
                .zip(&values)
                .map(|(w, x)| w * x)
                .sum::<f64>();

        if !z.is_finite() {
            let mut offending: Vec<String> = self
                .schema
                .features()
                .iter()
                .zip(self.weights.iter().zip(&values))
                .filter(|(_, (w, x))| !(*w * *x).is_finite())
                .map(|(f, _)| f.clone())
                .collect();
            // Every term finite but the sum overflowed: blame every nonzero term
            if offending.is_empty() {
                offending = self
                    .schema
                    .features()
                    .iter()
                    .zip(self.weights.iter().zip(&values))
                    .filter(|(_, (w, x))| *w * *x != 0.0)
                    .map(|(f, _)| f.clone())
                    .collect();
            }
            return Err(InputError::NonFiniteScore(offending));
        }

        Ok(1.0 / (1.0 + (-z).exp()))
    }
}

impl Classifier for LinearModel {
    fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    fn predict(&self, input: &FeatureVector) -> Result<Diagnosis, InputError> {
        let p = self.probability(input)?;
        log::debug!("Classifier probability {:.4} (threshold {})", p, self.threshold);
        Ok(if p >= self.threshold {
            Diagnosis::Detected
        } else {
            Diagnosis::NotDetected
        })
    }
}
