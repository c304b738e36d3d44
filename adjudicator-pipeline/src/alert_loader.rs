//! CSV alert data loader.
//!
//! Parses pre-scored alert CSV files into `AlertRecord` structs.
//! Expected CSV columns (additional columns are ignored):
//!   association_id, kycRiskScore, SAR_1_PREDICTION, overpaymentAmt90d,
//!   totalMerchCred90d, csrNotes, EXPLANATION_1_FEATURE_NAME,
//!   EXPLANATION_1_QUALITATIVE_STRENGTH, EXPLANATION_2_FEATURE_NAME,
//!   EXPLANATION_2_QUALITATIVE_STRENGTH

use serde::{Deserialize, Serialize};
use std::io::Read;
use tracing::debug;

use crate::error::{PipelineError, PipelineResult};

/// One row of the raw alert table, exactly as scored upstream.
///
/// `kyc_risk_score_raw` carries the third-party system's polarity (lower
/// value = higher risk) and `fraud_probability_raw` is a model probability
/// in [0, 1]. Neither is validated against its documented domain here;
/// out-of-range values flow through the arithmetic unchanged.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AlertRecord {
    #[serde(rename = "association_id")]
    pub association_id: i64,
    #[serde(rename = "kycRiskScore")]
    pub kyc_risk_score_raw: i64,
    #[serde(rename = "SAR_1_PREDICTION")]
    pub fraud_probability_raw: f64,
    #[serde(rename = "overpaymentAmt90d")]
    pub overpayment_amount_90d: f64,
    #[serde(rename = "totalMerchCred90d")]
    pub total_merchant_credit_90d: f64,
    #[serde(rename = "csrNotes")]
    pub csr_notes: String,
    #[serde(rename = "EXPLANATION_1_FEATURE_NAME")]
    pub explanation_1_feature_name: String,
    #[serde(rename = "EXPLANATION_1_QUALITATIVE_STRENGTH")]
    pub explanation_1_strength: String,
    #[serde(rename = "EXPLANATION_2_FEATURE_NAME")]
    pub explanation_2_feature_name: String,
    #[serde(rename = "EXPLANATION_2_QUALITATIVE_STRENGTH")]
    pub explanation_2_strength: String,
}

/// Load alert records from a CSV reader, in source order.
pub fn load_alerts<R: Read>(reader: R) -> PipelineResult<Vec<AlertRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (line_num, result) in csv_reader.deserialize().enumerate() {
        let record: AlertRecord = result.map_err(|source| PipelineError::Parse {
            line: line_num + 2,
            source,
        })?;
        records.push(record);
    }

    debug!(records = records.len(), "alert table loaded");
    Ok(records)
}

/// Load alert records from a CSV file path.
pub fn load_alerts_file(path: &str) -> PipelineResult<Vec<AlertRecord>> {
    let file = std::fs::File::open(path).map_err(|source| PipelineError::FileOpen {
        path: path.to_string(),
        source,
    })?;
    load_alerts(file)
}
