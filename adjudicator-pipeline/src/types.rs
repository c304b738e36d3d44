use serde::Serialize;

use crate::alert_loader::AlertRecord;

// ---------------------------------------------------------------------------
// Query types
// ---------------------------------------------------------------------------

/// Operator-controlled parameters for one adjudication run.
///
/// The presentation layer owns the lifecycle of these values (defaults,
/// updates on interaction) and re-runs the pipeline on every change; the
/// pipeline itself never holds them between runs.
#[derive(Clone, Debug)]
pub struct AdjudicationQuery {
    /// Probability-of-fraud threshold, integer percent in [0, 100].
    pub alert_threshold: u8,
    /// Maximum allowable SMARTS criticality, integer in [0, 6].
    pub kyc_max_allowed: u8,
    /// When true, only rows flagged for adjudication are displayed.
    pub filter_adjudicated_only: bool,
}

impl Default for AdjudicationQuery {
    fn default() -> Self {
        Self {
            alert_threshold: 10,
            kyc_max_allowed: 3,
            filter_adjudicated_only: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Candidate types
// ---------------------------------------------------------------------------

/// An alert carrying its derived adjudication fields.
///
/// The derived fields are recomputed from scratch on every pipeline run;
/// nothing here survives a parameter change.
#[derive(Clone, Debug, Serialize)]
pub struct ScoredAlert {
    /// The raw record, untouched since load.
    pub record: AlertRecord,

    // Derived fields (populated by the scoring stage)
    /// SMARTS criticality with polarity flipped so higher = worse.
    pub kyc_risk_score: i64,
    /// Model fraud probability scaled to [0, 100].
    pub fraud_probability_pct: f64,
    /// Whether this alert crosses either operator threshold.
    pub adjudicate: bool,
}

impl ScoredAlert {
    /// Wrap a raw record with unscored derived fields.
    pub fn from_record(record: AlertRecord) -> Self {
        Self {
            record,
            kyc_risk_score: 0,
            fraud_probability_pct: 0.0,
            adjudicate: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_defaults_match_the_ui_defaults() {
        let query = AdjudicationQuery::default();
        assert_eq!(query.alert_threshold, 10);
        assert_eq!(query.kyc_max_allowed, 3);
        assert!(!query.filter_adjudicated_only);
    }
}
