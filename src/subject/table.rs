use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::vector::SubjectVector;
use crate::error::InputError;

/// Patient id columns, in order of preference.
const ID_COLUMNS: &[&str] = &["#OTU ID", "sample-id"];

/// A composition table with one row per patient.
///
/// Only the columns a model asks for are ever parsed; anything else in the
/// file is carried along untouched.
#[derive(Debug, Clone)]
pub struct PatientTable {
    id_column: usize,
    headers: Vec<String>,
    rows: Vec<csv::StringRecord>,
}

impl PatientTable {
    pub fn load(path: &Path) -> Result<Self, InputError> {
        let file = File::open(path).map_err(|e| {
            InputError::Malformed(format!("failed to open {}: {}", path.display(), e))
        })?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, InputError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| InputError::Malformed(e.to_string()))?
            .iter()
            .map(str::to_string)
            .collect();

        let id_column = ID_COLUMNS
            .iter()
            .find_map(|name| headers.iter().position(|h| h == name))
            .ok_or(InputError::MissingPatientIdColumn)?;

        let rows = reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| InputError::Malformed(e.to_string()))?;

        if rows.is_empty() {
            return Err(InputError::EmptyTable);
        }

        log::debug!(
            "Loaded patient table: {} rows, {} columns, id column '{}'",
            rows.len(),
            headers.len(),
            headers[id_column]
        );

        Ok(Self {
            id_column,
            headers,
            rows,
        })
    }

    pub fn id_column(&self) -> &str {
        &self.headers[self.id_column]
    }

    /// Unique patient ids in file order, trimmed the same way `subject` matches them.
    pub fn patient_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .filter_map(|row| row.get(self.id_column))
            .map(str::trim)
            .filter(|id| seen.insert(*id))
            .collect()
    }

    /// Extract one patient's measurements for `required` features.
    ///
    /// Missing columns are reported before the patient is looked up, since no
    /// row of such a file can be scored.
    pub fn subject(&self, patient_id: &str, required: &[String]) -> Result<SubjectVector, InputError> {
        let index: HashMap<&str, usize> = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.as_str(), i))
            .collect();

        let missing: Vec<String> = required
            .iter()
            .filter(|f| !index.contains_key(f.as_str()))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(InputError::MissingFeatures(missing));
        }

        let row = self
            .rows
            .iter()
            .find(|row| row.get(self.id_column).map(str::trim) == Some(patient_id.trim()))
            .ok_or_else(|| InputError::UnknownPatient(patient_id.to_string()))?;

        SubjectVector::parse(
            required
                .iter()
                .map(|f| (f.clone(), row.get(index[f.as_str()]).unwrap_or(""))),
        )
    }
}
