use std::env;
use std::process;
use std::time::Instant;

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use adjudicator_pipeline::display::DisplayRow;
use adjudicator_pipeline::export::export_csv;
use adjudicator_pipeline::pipeline::{AdjudicationResult, AlertPipeline};
use adjudicator_pipeline::types::AdjudicationQuery;

/// Download artifact name used when `--export` is given without a path.
const DEFAULT_EXPORT_FILE: &str = "fraud_alerts.csv";

// ---------------------------------------------------------------------------
// JSON output contract
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct DigestJson {
    generated_at: String,
    alert_threshold: u8,
    kyc_max_allowed: u8,
    filter_adjudicated_only: bool,
    total_alerts: usize,
    alerts: Vec<DisplayRow>,
    summary: SummaryJson,
}

#[derive(Serialize)]
struct SummaryJson {
    records_loaded: usize,
    flagged_for_adjudication: usize,
    rows_filtered_out: usize,
    load_ms: u128,
    pipeline_ms: u128,
}

fn build_json(
    result: &AdjudicationResult,
    query: &AdjudicationQuery,
    records_loaded: usize,
    load_ms: u128,
    pipeline_ms: u128,
) -> DigestJson {
    DigestJson {
        generated_at: Utc::now().to_rfc3339(),
        alert_threshold: query.alert_threshold,
        kyc_max_allowed: query.kyc_max_allowed,
        filter_adjudicated_only: query.filter_adjudicated_only,
        total_alerts: result.display.row_count(),
        alerts: result.display.rows.clone(),
        summary: SummaryJson {
            records_loaded,
            flagged_for_adjudication: result.flagged_count(),
            rows_filtered_out: result.removed.len(),
            load_ms,
            pipeline_ms,
        },
    }
}

// ---------------------------------------------------------------------------
// Human-readable output
// ---------------------------------------------------------------------------

fn print_human(
    result: &AdjudicationResult,
    query: &AdjudicationQuery,
    records_loaded: usize,
    load_ms: u128,
    pipeline_ms: u128,
) {
    println!();
    println!("  \u{2554}{}\u{2557}", "\u{2550}".repeat(62));
    println!("  \u{2551}{:^62}\u{2551}", "FRAUD ALERT ADJUDICATOR");
    println!("  \u{255a}{}\u{255d}", "\u{2550}".repeat(62));
    println!();

    println!(
        "  {} alerts loaded  \u{00b7}  {} flagged for adjudication  \u{00b7}  {} displayed",
        records_loaded,
        result.flagged_count(),
        result.display.row_count()
    );
    println!(
        "  Alert threshold {}%  \u{00b7}  Max SMARTS criticality {}  \u{00b7}  adjudicated-only: {}",
        query.alert_threshold,
        query.kyc_max_allowed,
        if query.filter_adjudicated_only { "on" } else { "off" }
    );
    println!();
    println!("  Total Alerts: {}", result.display.row_count());
    println!();

    if result.display.rows.is_empty() {
        println!("  No alerts to display at the current thresholds.");
    } else {
        println!("  {:\u{2500}<78}", "");
        for (i, row) in result.display.rows.iter().enumerate() {
            println!(
                "  {:>3}. {:12} {:3}  {:>8}  SMARTS {:>2}  over {:>12}  credit {:>12}",
                i + 1,
                row.transaction_id,
                row.adjudicate,
                row.probability_of_fraud,
                row.smarts_criticality_score,
                row.overpayment_amount_90d,
                row.total_merchant_credit_90d,
            );
            if !row.representative_notes.is_empty() {
                println!("       notes: {}", row.representative_notes);
            }
            println!(
                "       primary: {}  \u{00b7}  secondary: {}",
                row.primary_explanation, row.secondary_explanation
            );
            println!();
        }
        println!("  {:\u{2500}<78}", "");
    }

    println!();
    println!(
        "  \u{23f1}  CSV loaded in {}ms \u{00b7} Pipeline ran in {}ms \u{00b7} Total {}ms",
        load_ms,
        pipeline_ms,
        load_ms + pipeline_ms
    );
    println!();
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn usage() -> ! {
    eprintln!(
        "Usage: adjudicator-server <alerts.csv> [--alert-threshold N] [--kyc-max N] \
         [--adjudicated-only] [--json] [--export [PATH]]"
    );
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --alert-threshold   Probability-of-fraud threshold in percent, 0-100 (default: 10)");
    eprintln!("  --kyc-max           Maximum allowable SMARTS criticality, 0-6 (default: 3)");
    eprintln!("  --adjudicated-only  Display only alerts flagged for adjudication");
    eprintln!("  --json              Output as JSON instead of formatted text");
    eprintln!(
        "  --export [PATH]     Write the display table as CSV (default: {})",
        DEFAULT_EXPORT_FILE
    );
    eprintln!();
    eprintln!("Example:");
    eprintln!("  adjudicator-server fixtures/aml_alert_scored.csv");
    eprintln!("  adjudicator-server fixtures/aml_alert_scored.csv --adjudicated-only --json");
    eprintln!("  adjudicator-server fixtures/aml_alert_scored.csv --alert-threshold 25 --export");
    process::exit(1);
}

fn parse_bounded(flag: &str, value: &str, max: u8) -> u8 {
    let parsed: u8 = value.parse().unwrap_or_else(|_| {
        eprintln!("Error: {} requires an integer between 0 and {}", flag, max);
        process::exit(1);
    });
    if parsed > max {
        eprintln!("Error: {} must be between 0 and {}", flag, max);
        process::exit(1);
    }
    parsed
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        usage();
    }

    let csv_path = &args[1];

    let mut query = AdjudicationQuery::default();
    let mut json_output = false;
    let mut export_path: Option<String> = None;
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--alert-threshold" => {
                if i + 1 < args.len() {
                    query.alert_threshold = parse_bounded("--alert-threshold", &args[i + 1], 100);
                    i += 2;
                } else {
                    eprintln!("Error: --alert-threshold requires a value");
                    process::exit(1);
                }
            }
            "--kyc-max" => {
                if i + 1 < args.len() {
                    query.kyc_max_allowed = parse_bounded("--kyc-max", &args[i + 1], 6);
                    i += 2;
                } else {
                    eprintln!("Error: --kyc-max requires a value");
                    process::exit(1);
                }
            }
            "--adjudicated-only" => {
                query.filter_adjudicated_only = true;
                i += 1;
            }
            "--json" => {
                json_output = true;
                i += 1;
            }
            "--export" => {
                if i + 1 < args.len() && !args[i + 1].starts_with("--") {
                    export_path = Some(args[i + 1].clone());
                    i += 2;
                } else {
                    export_path = Some(DEFAULT_EXPORT_FILE.to_string());
                    i += 1;
                }
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                usage();
            }
        }
    }

    // Load the alert table once; it is immutable for the rest of the run.
    let load_start = Instant::now();
    let pipeline = match AlertPipeline::from_csv_path(csv_path) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error loading alerts: {}", e);
            process::exit(1);
        }
    };
    let load_ms = load_start.elapsed().as_millis();
    let records_loaded = pipeline.records().len();
    info!(records = records_loaded, path = %csv_path, "alert table loaded");

    let pipeline_start = Instant::now();
    let result = match pipeline.execute(&query).await {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error running adjudication: {}", e);
            process::exit(1);
        }
    };
    let pipeline_ms = pipeline_start.elapsed().as_millis();

    if let Some(path) = &export_path {
        let bytes = match export_csv(&result.display) {
            Ok(b) => b,
            Err(e) => {
                eprintln!("Error exporting alerts: {}", e);
                process::exit(1);
            }
        };
        if let Err(e) = std::fs::write(path, bytes) {
            eprintln!("Error writing '{}': {}", path, e);
            process::exit(1);
        }
        info!(path = %path, rows = result.display.row_count(), "display table exported");
    }

    if json_output {
        let digest = build_json(&result, &query, records_loaded, load_ms, pipeline_ms);
        println!("{}", serde_json::to_string_pretty(&digest).unwrap());
    } else {
        print_human(&result, &query, records_loaded, load_ms, pipeline_ms);
    }
}
