//! Fraud alert adjudication pipeline.
//!
//! Loads a pre-scored alert table once, then recomputes the adjudication
//! flag, the filtered display table, and its CSV export on every change of
//! the operator thresholds. The pipeline is pure and re-entrant: queries are
//! plain values and runs share nothing but the immutable table.

pub mod alert_loader;
pub mod display;
pub mod error;
pub mod export;
pub mod filter;
pub mod pipeline;
pub mod scorer;
pub mod types;
pub mod util;

pub use alert_loader::AlertRecord;
pub use display::{DisplayRow, DisplayTable, DISPLAY_COLUMNS};
pub use error::{PipelineError, PipelineResult};
pub use pipeline::{AdjudicationResult, AlertPipeline};
pub use types::{AdjudicationQuery, ScoredAlert};
