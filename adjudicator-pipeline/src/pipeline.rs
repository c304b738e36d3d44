//! Stage wiring for one adjudication run.
//!
//! The pipeline owns the immutable alert table for the life of the process
//! and re-derives everything else per query. Nothing is carried between
//! runs: a parameter change means a full pass over the table.

use tracing::{debug, info};

use crate::alert_loader::{self, AlertRecord};
use crate::display::{self, DisplayTable};
use crate::error::PipelineResult;
use crate::filter::{AdjudicationStatusFilter, Filter};
use crate::scorer::{AdjudicationScorer, Scorer};
use crate::types::{AdjudicationQuery, ScoredAlert};

/// Everything one run produces, in input order throughout.
pub struct AdjudicationResult {
    /// Every record with derived fields computed, before any filtering.
    pub scored: Vec<ScoredAlert>,
    /// Rows removed by the filter stages.
    pub removed: Vec<ScoredAlert>,
    /// The formatted table for rendering and export.
    pub display: DisplayTable,
}

impl AdjudicationResult {
    /// Number of alerts flagged for adjudication across the whole table.
    pub fn flagged_count(&self) -> usize {
        self.scored.iter().filter(|a| a.adjudicate).count()
    }
}

/// The alert adjudication pipeline.
///
/// Pipeline flow:
/// 1. AdjudicationScorer derives criticality, probability percent, and the
///    adjudication flag from the raw record plus the operator thresholds
/// 2. AdjudicationStatusFilter drops unflagged rows when the operator asks
///    for adjudicated rows only
/// 3. Projection formats the kept rows into the display schema
pub struct AlertPipeline {
    records: Vec<AlertRecord>,
    scorers: Vec<Box<dyn Scorer>>,
    filters: Vec<Box<dyn Filter>>,
}

impl AlertPipeline {
    /// Create a pipeline over an already-loaded alert table.
    pub fn new(records: Vec<AlertRecord>) -> Self {
        Self {
            records,
            scorers: vec![Box::new(AdjudicationScorer)],
            filters: vec![Box::new(AdjudicationStatusFilter)],
        }
    }

    /// Load the alert table from a CSV file and build the pipeline over it.
    ///
    /// This is the primary constructor for production use.
    pub fn from_csv_path(path: &str) -> PipelineResult<Self> {
        Ok(Self::new(alert_loader::load_alerts_file(path)?))
    }

    /// The raw table, read-only, in source-file order.
    pub fn records(&self) -> &[AlertRecord] {
        &self.records
    }

    /// Run one full adjudication pass for the given query.
    ///
    /// Stateless and idempotent: the same query against the same table
    /// yields the same result, and nothing from this run is reused by the
    /// next one.
    pub async fn execute(&self, query: &AdjudicationQuery) -> PipelineResult<AdjudicationResult> {
        let mut candidates: Vec<ScoredAlert> = self
            .records
            .iter()
            .cloned()
            .map(ScoredAlert::from_record)
            .collect();

        for scorer in &self.scorers {
            if !scorer.enable(query) {
                continue;
            }
            let scored = scorer.score(query, &candidates).await?;
            for (candidate, update) in candidates.iter_mut().zip(scored) {
                scorer.update(candidate, update);
            }
            debug!(
                stage = scorer.name(),
                candidates = candidates.len(),
                "scoring stage complete"
            );
        }

        let scored = candidates.clone();

        let mut kept = candidates;
        let mut removed = Vec::new();
        for filter in &self.filters {
            if !filter.enable(query) {
                continue;
            }
            let result = filter.filter(query, kept).await?;
            debug!(
                stage = filter.name(),
                kept = result.kept.len(),
                removed = result.removed.len(),
                "filter stage complete"
            );
            kept = result.kept;
            removed.extend(result.removed);
        }

        let display = display::project(&kept)?;

        let result = AdjudicationResult {
            scored,
            removed,
            display,
        };
        info!(
            total = result.scored.len(),
            flagged = result.flagged_count(),
            displayed = result.display.row_count(),
            "adjudication run complete"
        );

        Ok(result)
    }
}
