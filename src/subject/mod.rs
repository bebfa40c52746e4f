pub mod table;
pub mod vector;

pub use table::PatientTable;
pub use vector::{FeatureVector, SubjectVector};
