//! Projection of scored alerts into the human-facing display schema.
//!
//! Column selection, renaming, and formatting all happen here. Row order is
//! whatever the caller passes in; projection never reorders.

use serde::Serialize;

use crate::error::{PipelineError, PipelineResult};
use crate::types::ScoredAlert;

/// Display column names, in render and export order.
pub const DISPLAY_COLUMNS: [&str; 9] = [
    "Transaction ID",
    "Adjudicate",
    "Probability of Fraud",
    "SMARTS Criticality Score",
    "Overpayment Amount 90 Days",
    "Total Merchant Credit 90 Days",
    "Representative Notes",
    "Primary Explanation",
    "Secondary Explanation",
];

/// One fully formatted row of the display table. Every cell is a string;
/// the presentation layer renders them verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub transaction_id: String,
    pub adjudicate: String,
    pub probability_of_fraud: String,
    pub smarts_criticality_score: String,
    pub overpayment_amount_90d: String,
    pub total_merchant_credit_90d: String,
    pub representative_notes: String,
    pub primary_explanation: String,
    pub secondary_explanation: String,
}

impl DisplayRow {
    /// Cell values in `DISPLAY_COLUMNS` order.
    pub fn cells(&self) -> [&str; 9] {
        [
            &self.transaction_id,
            &self.adjudicate,
            &self.probability_of_fraud,
            &self.smarts_criticality_score,
            &self.overpayment_amount_90d,
            &self.total_merchant_credit_90d,
            &self.representative_notes,
            &self.primary_explanation,
            &self.secondary_explanation,
        ]
    }
}

/// The final, formatted, filtered table intended for rendering and export.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DisplayTable {
    pub rows: Vec<DisplayRow>,
}

impl DisplayTable {
    /// Number of rows, surfaced to the operator as the `Total Alerts` metric.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Project scored alerts into the display schema, preserving order.
pub fn project(alerts: &[ScoredAlert]) -> PipelineResult<DisplayTable> {
    let mut rows = Vec::with_capacity(alerts.len());
    for alert in alerts {
        rows.push(DisplayRow {
            transaction_id: format_transaction_id(alert.record.association_id),
            adjudicate: if alert.adjudicate { "Yes" } else { "No" }.to_string(),
            probability_of_fraud: format_percent(alert.fraud_probability_pct)?,
            smarts_criticality_score: alert.kyc_risk_score.to_string(),
            overpayment_amount_90d: format_currency(
                "Overpayment Amount 90 Days",
                alert.record.overpayment_amount_90d,
            )?,
            total_merchant_credit_90d: format_currency(
                "Total Merchant Credit 90 Days",
                alert.record.total_merchant_credit_90d,
            )?,
            representative_notes: alert.record.csr_notes.clone(),
            primary_explanation: format_explanation(
                &alert.record.explanation_1_feature_name,
                &alert.record.explanation_1_strength,
            ),
            secondary_explanation: format_explanation(
                &alert.record.explanation_2_feature_name,
                &alert.record.explanation_2_strength,
            ),
        });
    }

    Ok(DisplayTable { rows })
}

/// `"ALX-"` plus the identifier zero-left-padded to 6 digits.
pub fn format_transaction_id(association_id: i64) -> String {
    format!("ALX-{association_id:06}")
}

/// Fixed two-decimal percentage, e.g. `"5.00%"`.
pub fn format_percent(pct: f64) -> PipelineResult<String> {
    if !pct.is_finite() {
        return Err(PipelineError::NonFinite {
            column: "Probability of Fraud",
            value: pct,
        });
    }
    Ok(format!("{pct:.2}%"))
}

/// Currency format: `"$"` + thousands-grouped amount with 2 decimals.
pub fn format_currency(column: &'static str, amount: f64) -> PipelineResult<String> {
    if !amount.is_finite() {
        return Err(PipelineError::NonFinite {
            column,
            value: amount,
        });
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    let total_cents = (amount.abs() * 100.0).round() as u64;
    let whole = total_cents / 100;
    let cents = total_cents % 100;
    Ok(format!("${}{}.{:02}", sign, group_thousands(whole), cents))
}

/// `"{name}: {strength}"`, with empty sides left empty.
///
/// A missing feature name or strength produces a stray separator
/// (e.g. `": Moderate"`) rather than collapsing the cell.
pub fn format_explanation(feature_name: &str, strength: &str) -> String {
    format!("{feature_name}: {strength}")
}

/// Insert a comma before every third digit, counting from the right.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    if value < 1_000 {
        return digits;
    }

    let mut grouped = String::new();
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert_loader::AlertRecord;

    #[test]
    fn transaction_id_is_zero_padded() {
        assert_eq!(format_transaction_id(7), "ALX-000007");
        assert_eq!(format_transaction_id(42), "ALX-000042");
        assert_eq!(format_transaction_id(123456), "ALX-123456");
        // Wider identifiers keep all their digits.
        assert_eq!(format_transaction_id(98765432), "ALX-98765432");
    }

    #[test]
    fn percent_is_fixed_two_decimals() {
        assert_eq!(format_percent(5.0).unwrap(), "5.00%");
        assert_eq!(format_percent(12.345).unwrap(), "12.35%");
        assert_eq!(format_percent(0.0).unwrap(), "0.00%");
    }

    #[test]
    fn percent_rejects_non_finite_values() {
        let err = format_percent(f64::NAN).unwrap_err();
        assert!(matches!(err, PipelineError::NonFinite { .. }));
        assert!(format_percent(f64::INFINITY).is_err());
    }

    #[test]
    fn currency_groups_thousands_with_two_decimals() {
        assert_eq!(
            format_currency("Overpayment Amount 90 Days", 1234.5).unwrap(),
            "$1,234.50"
        );
        assert_eq!(format_currency("x", 0.0).unwrap(), "$0.00");
        assert_eq!(format_currency("x", 999.994).unwrap(), "$999.99");
        assert_eq!(format_currency("x", 1_234_567.891).unwrap(), "$1,234,567.89");
    }

    #[test]
    fn currency_keeps_the_sign_inside_the_dollar() {
        assert_eq!(format_currency("x", -5.0).unwrap(), "$-5.00");
    }

    #[test]
    fn currency_rejects_non_finite_values() {
        let err = format_currency("Overpayment Amount 90 Days", f64::NAN).unwrap_err();
        match err {
            PipelineError::NonFinite { column, .. } => {
                assert_eq!(column, "Overpayment Amount 90 Days");
            }
            other => panic!("expected NonFinite, got {other:?}"),
        }
    }

    #[test]
    fn explanation_concatenation_preserves_empty_sides() {
        assert_eq!(format_explanation("Velocity", "Strong"), "Velocity: Strong");
        assert_eq!(format_explanation("", "Moderate"), ": Moderate");
        assert_eq!(format_explanation("Velocity", ""), "Velocity: ");
        assert_eq!(format_explanation("", ""), ": ");
    }

    #[test]
    fn projection_preserves_row_order_and_formats_cells() {
        let mut first = ScoredAlert::from_record(AlertRecord {
            association_id: 7,
            kyc_risk_score_raw: 0,
            fraud_probability_raw: 0.5,
            overpayment_amount_90d: 1234.5,
            total_merchant_credit_90d: 0.0,
            csr_notes: "call notes".into(),
            explanation_1_feature_name: "Velocity".into(),
            explanation_1_strength: "Strong".into(),
            explanation_2_feature_name: String::new(),
            explanation_2_strength: "Moderate".into(),
        });
        first.kyc_risk_score = 5;
        first.fraud_probability_pct = 50.0;
        first.adjudicate = true;

        let mut second = ScoredAlert::from_record(AlertRecord {
            association_id: 42,
            kyc_risk_score_raw: 5,
            fraud_probability_raw: 0.05,
            overpayment_amount_90d: 0.0,
            total_merchant_credit_90d: 300.0,
            csr_notes: String::new(),
            explanation_1_feature_name: String::new(),
            explanation_1_strength: String::new(),
            explanation_2_feature_name: String::new(),
            explanation_2_strength: String::new(),
        });
        second.kyc_risk_score = 0;
        second.fraud_probability_pct = 5.0;
        second.adjudicate = false;

        let table = project(&[first, second]).unwrap();
        assert_eq!(table.row_count(), 2);

        let row = &table.rows[0];
        assert_eq!(row.transaction_id, "ALX-000007");
        assert_eq!(row.adjudicate, "Yes");
        assert_eq!(row.probability_of_fraud, "50.00%");
        assert_eq!(row.smarts_criticality_score, "5");
        assert_eq!(row.overpayment_amount_90d, "$1,234.50");
        assert_eq!(row.representative_notes, "call notes");
        assert_eq!(row.primary_explanation, "Velocity: Strong");
        assert_eq!(row.secondary_explanation, ": Moderate");

        let row = &table.rows[1];
        assert_eq!(row.transaction_id, "ALX-000042");
        assert_eq!(row.adjudicate, "No");
        assert_eq!(row.probability_of_fraud, "5.00%");
        assert_eq!(row.smarts_criticality_score, "0");
        assert_eq!(row.total_merchant_credit_90d, "$300.00");
    }
}
