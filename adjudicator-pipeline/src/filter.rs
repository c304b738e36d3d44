use async_trait::async_trait;

use crate::error::PipelineResult;
use crate::types::{AdjudicationQuery, ScoredAlert};
use crate::util;

/// Result of a filter operation, partitioning candidates into kept and removed.
pub struct FilterResult {
    pub kept: Vec<ScoredAlert>,
    pub removed: Vec<ScoredAlert>,
}

/// Filters run sequentially and partition candidates into kept and removed
/// sets. Kept candidates must preserve their relative input order; the
/// display table is rendered in source-file order, never resorted.
#[async_trait]
pub trait Filter: Send + Sync {
    /// Decide if this filter should run for the given query.
    fn enable(&self, _query: &AdjudicationQuery) -> bool {
        true
    }

    /// Filter candidates by evaluating each against some criteria.
    async fn filter(
        &self,
        query: &AdjudicationQuery,
        candidates: Vec<ScoredAlert>,
    ) -> PipelineResult<FilterResult>;

    /// Returns a stable name for logging/metrics.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}

/// Removes alerts that are not flagged for adjudication.
///
/// Only active when the operator asks for adjudicated rows exclusively;
/// with the toggle off every row is kept and the stage is skipped.
pub struct AdjudicationStatusFilter;

#[async_trait]
impl Filter for AdjudicationStatusFilter {
    fn enable(&self, query: &AdjudicationQuery) -> bool {
        query.filter_adjudicated_only
    }

    async fn filter(
        &self,
        _query: &AdjudicationQuery,
        candidates: Vec<ScoredAlert>,
    ) -> PipelineResult<FilterResult> {
        let (kept, removed): (Vec<_>, Vec<_>) =
            candidates.into_iter().partition(|c| c.adjudicate);

        Ok(FilterResult { kept, removed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert_loader::AlertRecord;

    fn alert(id: i64, adjudicate: bool) -> ScoredAlert {
        let mut a = ScoredAlert::from_record(AlertRecord {
            association_id: id,
            kyc_risk_score_raw: 0,
            fraud_probability_raw: 0.0,
            overpayment_amount_90d: 0.0,
            total_merchant_credit_90d: 0.0,
            csr_notes: String::new(),
            explanation_1_feature_name: String::new(),
            explanation_1_strength: String::new(),
            explanation_2_feature_name: String::new(),
            explanation_2_strength: String::new(),
        });
        a.adjudicate = adjudicate;
        a
    }

    fn adjudicated_only_query() -> AdjudicationQuery {
        AdjudicationQuery {
            filter_adjudicated_only: true,
            ..AdjudicationQuery::default()
        }
    }

    #[test]
    fn disabled_unless_the_toggle_is_set() {
        let filter = AdjudicationStatusFilter;
        assert!(!filter.enable(&AdjudicationQuery::default()));
        assert!(filter.enable(&adjudicated_only_query()));
    }

    #[tokio::test]
    async fn partitions_by_adjudication_flag() {
        let filter = AdjudicationStatusFilter;
        let candidates = vec![alert(1, true), alert(2, false), alert(3, true)];

        let FilterResult { kept, removed } = filter
            .filter(&adjudicated_only_query(), candidates)
            .await
            .unwrap();

        assert_eq!(kept.len(), 2);
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].record.association_id, 2);
    }

    #[tokio::test]
    async fn kept_rows_preserve_relative_order() {
        let filter = AdjudicationStatusFilter;
        let candidates = vec![
            alert(5, true),
            alert(1, false),
            alert(9, true),
            alert(2, true),
            alert(8, false),
        ];

        let FilterResult { kept, .. } = filter
            .filter(&adjudicated_only_query(), candidates)
            .await
            .unwrap();

        let ids: Vec<i64> = kept.iter().map(|c| c.record.association_id).collect();
        assert_eq!(ids, vec![5, 9, 2]);
    }
}
