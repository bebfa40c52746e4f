use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::CoefficientError;

/// Precomputed population-level causal-effect coefficients, keyed by taxon.
///
/// Built once at startup and never mutated afterwards, so a single table can
/// be shared by reference across any number of concurrent rankings.
///
/// Example CSV (header names are ignored):
/// ```text
/// Bacteria,Causal Effect
/// g__Prevotella,0.0213
/// g__Blautia,-0.0071
/// ```
#[derive(Debug, Clone, Default)]
pub struct CoefficientTable {
    order: Vec<String>,
    values: HashMap<String, f64>,
}

impl CoefficientTable {
    /// Build from (feature, coefficient) rows.
    ///
    /// A repeated feature with the same coefficient is collapsed; a repeated
    /// feature with a different one is a construction error.
    pub fn from_rows<I, K>(rows: I) -> Result<Self, CoefficientError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let mut table = Self::default();
        for (feature, value) in rows {
            table.insert(feature.into(), value)?;
        }
        Ok(table)
    }

    pub fn load(path: &Path) -> Result<Self, CoefficientError> {
        let file = File::open(path).map_err(|source| CoefficientError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_reader(file)?;
        log::info!(
            "Loaded {} causal-effect coefficients from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CoefficientError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let width = reader.headers()?.len();
        if width != 2 {
            return Err(CoefficientError::ColumnCount {
                line: 1,
                found: width,
            });
        }

        let mut table = Self::default();
        for record in reader.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            if record.len() != 2 {
                return Err(CoefficientError::ColumnCount {
                    line,
                    found: record.len(),
                });
            }

            let feature = &record[0];
            if feature.is_empty() {
                return Err(CoefficientError::EmptyFeature { line });
            }

            let raw = &record[1];
            let value: f64 = raw.parse().map_err(|_| CoefficientError::NonNumeric {
                feature: feature.to_string(),
                raw: raw.to_string(),
            })?;

            table.insert(feature.to_string(), value)?;
        }
        Ok(table)
    }

    fn insert(&mut self, feature: String, value: f64) -> Result<(), CoefficientError> {
        if !value.is_finite() {
            return Err(CoefficientError::NonFinite { feature, value });
        }

        match self.values.entry(feature) {
            Entry::Occupied(existing) => {
                let first = *existing.get();
                if first != value {
                    return Err(CoefficientError::ConflictingDuplicate {
                        feature: existing.key().clone(),
                        first,
                        second: value,
                    });
                }
                log::debug!("Ignoring repeated coefficient row for '{}'", existing.key());
            }
            Entry::Vacant(slot) => {
                self.order.push(slot.key().clone());
                slot.insert(value);
            }
        }
        Ok(())
    }

    /// Coefficient for `feature`, or `None` when the table has no estimate.
    pub fn lookup(&self, feature: &str) -> Option<f64> {
        self.values.get(feature).copied()
    }

    pub fn contains(&self, feature: &str) -> bool {
        self.values.contains_key(feature)
    }

    /// Rows in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.order.iter().map(|f| (f.as_str(), self.values[f]))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
