use async_trait::async_trait;

use crate::error::PipelineResult;
use crate::types::{AdjudicationQuery, ScoredAlert};
use crate::util;

/// Scorers compute derived fields for every candidate without reordering
/// or dropping any of them.
#[async_trait]
pub trait Scorer: Send + Sync {
    /// Decide if this scorer should run for the given query.
    fn enable(&self, _query: &AdjudicationQuery) -> bool {
        true
    }

    /// Score candidates. The returned vector must be positionally aligned
    /// with the input; only the fields this scorer owns need to be set.
    async fn score(
        &self,
        query: &AdjudicationQuery,
        candidates: &[ScoredAlert],
    ) -> PipelineResult<Vec<ScoredAlert>>;

    /// Copy the fields this scorer is responsible for onto the candidate.
    fn update(&self, candidate: &mut ScoredAlert, scored: ScoredAlert);

    /// Returns a stable name for logging/metrics.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}

/// Flip the SMARTS criticality polarity so higher = worse.
///
/// The upstream system emits 0 for the riskiest customers and 5 for the
/// safest; every downstream comparison assumes the opposite.
pub fn criticality_score(raw: i64) -> i64 {
    5 - raw
}

/// Scale a model probability in [0, 1] to a percentage.
pub fn probability_pct(raw: f64) -> f64 {
    100.0 * raw
}

/// Computes the derived adjudication fields for every alert.
///
/// An alert is flagged when its fraud probability strictly exceeds the
/// alert threshold or its flipped criticality strictly exceeds the maximum
/// the operator allows. Values outside the documented input domains are
/// not rejected; they flow through the same arithmetic.
pub struct AdjudicationScorer;

#[async_trait]
impl Scorer for AdjudicationScorer {
    async fn score(
        &self,
        query: &AdjudicationQuery,
        candidates: &[ScoredAlert],
    ) -> PipelineResult<Vec<ScoredAlert>> {
        let scored = candidates
            .iter()
            .map(|c| {
                let kyc_risk_score = criticality_score(c.record.kyc_risk_score_raw);
                let fraud_probability_pct = probability_pct(c.record.fraud_probability_raw);
                let adjudicate = fraud_probability_pct > f64::from(query.alert_threshold)
                    || kyc_risk_score > i64::from(query.kyc_max_allowed);

                ScoredAlert {
                    kyc_risk_score,
                    fraud_probability_pct,
                    adjudicate,
                    ..c.clone()
                }
            })
            .collect();

        Ok(scored)
    }

    fn update(&self, candidate: &mut ScoredAlert, scored: ScoredAlert) {
        candidate.kyc_risk_score = scored.kyc_risk_score;
        candidate.fraud_probability_pct = scored.fraud_probability_pct;
        candidate.adjudicate = scored.adjudicate;
    }
}
