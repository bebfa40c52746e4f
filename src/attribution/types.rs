use serde::{Deserialize, Serialize};

/// Signed contribution of one taxon to a subject's predicted risk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactRecord {
    pub feature: String,
    pub impact: f64,
}

/// Top positive and top negative impacts, merged and sorted descending.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankedAttribution {
    records: Vec<ImpactRecord>,
}

impl RankedAttribution {
    pub(crate) fn from_sorted(records: Vec<ImpactRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ImpactRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ImpactRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Entries that raised the predicted risk.
    pub fn positive(&self) -> impl Iterator<Item = &ImpactRecord> {
        self.records.iter().filter(|r| r.impact > 0.0)
    }

    /// Entries that lowered the predicted risk.
    pub fn negative(&self) -> impl Iterator<Item = &ImpactRecord> {
        self.records.iter().filter(|r| r.impact < 0.0)
    }

    pub fn into_records(self) -> Vec<ImpactRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a RankedAttribution {
    type Item = &'a ImpactRecord;
    type IntoIter = std::slice::Iter<'a, ImpactRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Every impact a subject produced, before partitioning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Impacts {
    /// One record per matched feature, in subject order. Zero impacts included.
    pub records: Vec<ImpactRecord>,
    /// Subject features with no coefficient in the table.
    pub unmatched: Vec<String>,
}
