use std::collections::HashMap;

use crate::error::InputError;
use crate::subject::FeatureVector;

pub const AGE_FEATURE: &str = "age";

/// Ordered feature list a classifier was trained on.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSchema {
    features: Vec<String>,
    age_feature: String,
}

impl FeatureSchema {
    pub fn new(features: Vec<String>) -> Self {
        Self {
            features,
            age_feature: AGE_FEATURE.to_string(),
        }
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn age_feature(&self) -> &str {
        &self.age_feature
    }

    /// Schema features that are taxa, i.e. everything except age.
    pub fn bacteria_features(&self) -> Vec<String> {
        self.features
            .iter()
            .filter(|f| **f != self.age_feature)
            .cloned()
            .collect()
    }

    /// Lay a feature vector out in schema order.
    ///
    /// Every schema feature missing from the vector is reported at once.
    /// Extra subject features are ignored.
    pub fn arrange(&self, input: &FeatureVector) -> Result<Vec<f64>, InputError> {
        let values: HashMap<&str, f64> = input.subject().iter().collect();
        let mut ordered = Vec::with_capacity(self.features.len());
        let mut missing = Vec::new();

        for feature in &self.features {
            if *feature == self.age_feature {
                ordered.push(input.age());
            } else if let Some(v) = values.get(feature.as_str()) {
                ordered.push(*v);
            } else {
                missing.push(feature.clone());
            }
        }

        if missing.is_empty() {
            Ok(ordered)
        } else {
            Err(InputError::MissingFeatures(missing))
        }
    }
}
