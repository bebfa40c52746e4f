use std::collections::HashSet;

use crate::error::InputError;

/// Cell contents treated as a missing measurement.
const NULL_TOKENS: &[&str] = &["", "na", "nan", "null", "none"];

/// One subject's taxon measurements, iterated in insertion order.
///
/// Every value is finite and every feature id is unique; both are checked on
/// construction, so anything holding a `SubjectVector` can rank it without
/// further validation. Age is never stored here, see [`FeatureVector`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubjectVector {
    entries: Vec<(String, f64)>,
}

impl SubjectVector {
    /// Build from already-numeric values.
    ///
    /// Non-finite values are rejected as non-numeric, listing every offending
    /// feature at once.
    pub fn new<I, K>(entries: I) -> Result<Self, InputError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut non_finite = Vec::new();
        let mut out = Vec::new();

        for (feature, value) in entries {
            let feature = feature.into();
            if !seen.insert(feature.clone()) {
                return Err(InputError::DuplicateFeature(feature));
            }
            if !value.is_finite() {
                non_finite.push(feature);
                continue;
            }
            out.push((feature, value));
        }

        if !non_finite.is_empty() {
            return Err(InputError::NonNumeric(non_finite));
        }
        Ok(Self { entries: out })
    }

    /// Build from raw text cells, as read from a table.
    ///
    /// Null cells are reported before non-numeric ones, matching the order in
    /// which a user would fix an upload.
    pub fn parse<I, K, V>(fields: I) -> Result<Self, InputError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut nulls = Vec::new();
        let mut non_numeric = Vec::new();
        let mut parsed = Vec::new();

        for (feature, raw) in fields {
            let feature = feature.into();
            let raw = raw.as_ref().trim();
            if is_null(raw) {
                nulls.push(feature);
                continue;
            }
            match raw.parse::<f64>() {
                Ok(v) if v.is_finite() => parsed.push((feature, v)),
                _ => non_numeric.push(feature),
            }
        }

        if !nulls.is_empty() {
            return Err(InputError::NullValues(nulls));
        }
        if !non_numeric.is_empty() {
            return Err(InputError::NonNumeric(non_numeric));
        }
        Self::new(parsed)
    }

    pub fn get(&self, feature: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(f, _)| f == feature)
            .map(|(_, v)| *v)
    }

    /// Keep only `features`, preserving this vector's order.
    pub fn select(&self, features: &[String]) -> SubjectVector {
        let wanted: HashSet<&str> = features.iter().map(String::as_str).collect();
        Self {
            entries: self
                .entries
                .iter()
                .filter(|(f, _)| wanted.contains(f.as_str()))
                .cloned()
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(f, v)| (f.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn is_null(raw: &str) -> bool {
    NULL_TOKENS.iter().any(|t| raw.eq_ignore_ascii_case(t))
}

/// Classifier input: the subject's taxa plus age.
///
/// Age is kept out of the [`SubjectVector`] so it can never reach the
/// attribution engine.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    subject: SubjectVector,
    age: f64,
}

impl FeatureVector {
    pub fn new(subject: SubjectVector, age: f64) -> Result<Self, InputError> {
        if !age.is_finite() || age < 1.0 {
            return Err(InputError::InvalidAge(age));
        }
        Ok(Self { subject, age })
    }

    pub fn subject(&self) -> &SubjectVector {
        &self.subject
    }

    pub fn age(&self) -> f64 {
        self.age
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_insertion_order() {
        let v = SubjectVector::new(vec![("c", 3.0), ("a", 1.0), ("b", 2.0)]).unwrap();
        let order: Vec<&str> = v.iter().map(|(f, _)| f).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
        assert_eq!(v.get("a"), Some(1.0));
        assert_eq!(v.get("z"), None);
    }

    #[test]
    fn test_select_keeps_own_order() {
        let v = SubjectVector::new(vec![("c", 3.0), ("a", 1.0), ("b", 2.0)]).unwrap();
        let picked = v.select(&["b".to_string(), "c".to_string(), "z".to_string()]);
        let entries: Vec<(&str, f64)> = picked.iter().collect();
        assert_eq!(entries, vec![("c", 3.0), ("b", 2.0)]);
    }

    #[test]
    fn test_rejects_duplicate_feature() {
        let err = SubjectVector::new(vec![("a", 1.0), ("a", 2.0)]).unwrap_err();
        assert_eq!(err, InputError::DuplicateFeature("a".to_string()));
    }

    #[test]
    fn test_rejects_non_finite_values() {
        let err = SubjectVector::new(vec![("a", f64::NAN), ("b", 1.0), ("c", f64::INFINITY)])
            .unwrap_err();
        assert_eq!(
            err,
            InputError::NonNumeric(vec!["a".to_string(), "c".to_string()])
        );
    }

    #[test]
    fn test_parse_reports_all_nulls() {
        let err = SubjectVector::parse(vec![("a", ""), ("b", "0.5"), ("c", "NA")]).unwrap_err();
        assert_eq!(
            err,
            InputError::NullValues(vec!["a".to_string(), "c".to_string()])
        );
    }

    #[test]
    fn test_parse_reports_non_numeric() {
        let err = SubjectVector::parse(vec![("a", "abc"), ("b", "0.5"), ("c", "inf")]).unwrap_err();
        assert_eq!(
            err,
            InputError::NonNumeric(vec!["a".to_string(), "c".to_string()])
        );
    }

    #[test]
    fn test_parse_trims_and_accepts_scientific() {
        let v = SubjectVector::parse(vec![("a", " 1e-3 "), ("b", "-2")]).unwrap();
        assert_eq!(v.get("a"), Some(0.001));
        assert_eq!(v.get("b"), Some(-2.0));
    }

    #[test]
    fn test_feature_vector_rejects_invalid_age() {
        let subject = SubjectVector::default();
        assert_eq!(
            FeatureVector::new(subject.clone(), 0.0).unwrap_err(),
            InputError::InvalidAge(0.0)
        );
        assert!(FeatureVector::new(subject.clone(), f64::NAN).is_err());
        assert_eq!(FeatureVector::new(subject, 34.0).unwrap().age(), 34.0);
    }
}
