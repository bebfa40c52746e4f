use super::config::AttributionConfig;
use super::types::{ImpactRecord, Impacts, RankedAttribution};
use crate::coefficients::CoefficientTable;
use crate::error::InputError;
use crate::subject::SubjectVector;

/// Impact of every subject feature that has a coefficient, in subject order.
///
/// `impact = coefficient * value`. Features the table has no estimate for are
/// listed in `unmatched` rather than treated as errors: the subject schema and
/// the coefficient table come from different sources.
///
/// A product that overflows to a non-finite value is malformed input; every
/// such feature is reported at once.
pub fn compute_impacts(
    subject: &SubjectVector,
    table: &CoefficientTable,
) -> Result<Impacts, InputError> {
    let mut impacts = Impacts::default();
    let mut overflowed = Vec::new();

    for (feature, value) in subject.iter() {
        match table.lookup(feature) {
            Some(coefficient) => {
                let impact = coefficient * value;
                if !impact.is_finite() {
                    overflowed.push(feature.to_string());
                    continue;
                }
                impacts.records.push(ImpactRecord {
                    feature: feature.to_string(),
                    impact,
                });
            }
            None => impacts.unmatched.push(feature.to_string()),
        }
    }

    if !overflowed.is_empty() {
        return Err(InputError::NonFiniteImpact(overflowed));
    }
    Ok(impacts)
}

/// Rank with the default limits (10 positive, 10 negative).
pub fn rank(
    subject: &SubjectVector,
    table: &CoefficientTable,
) -> Result<RankedAttribution, InputError> {
    rank_with(subject, table, &AttributionConfig::default())
}

/// Rank a subject's impacts.
///
/// Keeps the `top_positive` largest positive impacts and the `top_negative`
/// most negative ones, then merges them into a single descending sequence.
/// Zero impacts never appear. Equal impacts keep subject iteration order.
pub fn rank_with(
    subject: &SubjectVector,
    table: &CoefficientTable,
    config: &AttributionConfig,
) -> Result<RankedAttribution, InputError> {
    let impacts = compute_impacts(subject, table)?;

    if !impacts.unmatched.is_empty() {
        log::debug!(
            "{} subject features have no coefficient: {}",
            impacts.unmatched.len(),
            impacts.unmatched.join(", ")
        );
    }

    let (mut positive, mut negative): (Vec<_>, Vec<_>) = impacts
        .records
        .into_iter()
        .filter(|r| r.impact != 0.0)
        .partition(|r| r.impact > 0.0);

    // sort_by is stable, so ties stay in subject order throughout
    positive.sort_by(|a, b| b.impact.total_cmp(&a.impact));
    positive.truncate(config.positive_limit());

    negative.sort_by(|a, b| a.impact.total_cmp(&b.impact));
    negative.truncate(config.negative_limit());

    let mut merged = positive;
    merged.append(&mut negative);
    merged.sort_by(|a, b| b.impact.total_cmp(&a.impact));

    log::debug!("Ranked {} attributable features", merged.len());

    Ok(RankedAttribution::from_sorted(merged))
}
