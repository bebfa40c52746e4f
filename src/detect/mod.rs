use serde::Serialize;

use crate::attribution::{rank_with, AttributionConfig, RankedAttribution};
use crate::classifier::{Classifier, Diagnosis};
use crate::coefficients::CoefficientTable;
use crate::error::InputError;
use crate::subject::{FeatureVector, SubjectVector};

/// Outcome of one detection request.
///
/// `attribution` is present exactly when the diagnosis is positive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionReport {
    pub patient_id: String,
    pub diagnosis: Diagnosis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribution: Option<RankedAttribution>,
}

/// Classifier gate plus attribution, over immutable startup state.
///
/// Holds no per-request state, so a shared reference can serve concurrent
/// requests.
pub struct Detector<C> {
    table: CoefficientTable,
    classifier: C,
    config: AttributionConfig,
}

impl<C: Classifier> Detector<C> {
    pub fn new(table: CoefficientTable, classifier: C, config: AttributionConfig) -> Self {
        Self {
            table,
            classifier,
            config,
        }
    }

    pub fn table(&self) -> &CoefficientTable {
        &self.table
    }

    /// Taxa the classifier needs from an input table.
    pub fn required_features(&self) -> Vec<String> {
        self.classifier.schema().bacteria_features()
    }

    /// Run the classifier and, on a positive result, explain it.
    ///
    /// Only taxa the classifier consumed are ranked; extra subject features
    /// are dropped before attribution.
    pub fn detect(
        &self,
        patient_id: &str,
        subject: SubjectVector,
        age: f64,
    ) -> Result<DetectionReport, InputError> {
        let input = FeatureVector::new(subject, age)?;
        let diagnosis = self.classifier.predict(&input)?;
        log::info!("Patient {}: {:?}", patient_id, diagnosis);

        let attribution = if diagnosis.is_detected() {
            let consumed = input.subject().select(&self.required_features());
            Some(rank_with(&consumed, &self.table, &self.config)?)
        } else {
            None
        };

        Ok(DetectionReport {
            patient_id: patient_id.to_string(),
            diagnosis,
            attribution,
        })
    }

    /// Attribution without consulting the classifier.
    pub fn rank_only(&self, subject: &SubjectVector) -> Result<RankedAttribution, InputError> {
        rank_with(subject, &self.table, &self.config)
    }
}
