//! Explains microbiome-based schizophrenia detections by ranking taxa on
//! their causal impact for a single patient.
//!
//! The core is [`attribution::rank`]: it multiplies each precomputed
//! population-level causal-effect coefficient by the patient's measured
//! abundance, then keeps the strongest risk-raising and risk-lowering taxa.

pub mod attribution;
pub mod classifier;
pub mod coefficients;
pub mod config;
pub mod detect;
pub mod error;
pub mod output;
pub mod subject;

pub use attribution::{rank, rank_with, AttributionConfig, ImpactRecord, RankedAttribution};
pub use coefficients::CoefficientTable;
pub use error::{ClassifierError, CoefficientError, InputError};
pub use subject::{FeatureVector, SubjectVector};
