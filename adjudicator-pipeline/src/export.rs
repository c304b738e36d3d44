//! CSV serialization of the display table.

use crate::display::{DisplayTable, DISPLAY_COLUMNS};
use crate::error::{PipelineError, PipelineResult};

/// Serialize a display table to UTF-8 CSV bytes.
///
/// Header row carries the display column names; data rows follow in table
/// order with no index column. Output is byte-identical across calls with
/// the same table, so callers may memoize it keyed on the table value.
pub fn export_csv(table: &DisplayTable) -> PipelineResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(DISPLAY_COLUMNS)?;
    for row in &table.rows {
        writer.write_record(row.cells())?;
    }

    writer
        .into_inner()
        .map_err(|e| PipelineError::Export(csv::Error::from(e.into_error())))
}
