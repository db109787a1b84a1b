use chrono::{NaiveDate, NaiveDateTime};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::PipelineError;
use crate::record::FinancialRecord;

/// UTF-8 byte order mark, so spreadsheet tools pick the right encoding.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// `esg_financial_analysis_<YYYYMMDD target>_<YYYYMMDD_HHMMSS now>.csv`
pub fn output_filename(target: NaiveDate, now: NaiveDateTime) -> String {
    format!(
        "esg_financial_analysis_{}_{}.csv",
        target.format("%Y%m%d"),
        now.format("%Y%m%d_%H%M%S")
    )
}

/// Writes the BOM, the header and one row per record in order. Nulls are empty cells.
///
/// # Errors
///
/// Returns [`PipelineError::Io`] or [`PipelineError::Csv`] when the sink fails.
pub fn write_csv<W: Write>(mut sink: W, records: &[FinancialRecord]) -> Result<(), PipelineError> {
    sink.write_all(UTF8_BOM)?;
    let mut wtr = csv::Writer::from_writer(sink);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Creates the output file under `dir` and writes `records` into it.
///
/// # Errors
///
/// Fails when the file cannot be created or written.
pub fn export_csv(
    dir: &Path,
    target: NaiveDate,
    now: NaiveDateTime,
    records: &[FinancialRecord],
) -> Result<PathBuf, PipelineError> {
    let path = dir.join(output_filename(target, now));
    let file = File::create(&path)?;
    write_csv(BufWriter::new(file), records)?;
    tracing::info!(path = %path.display(), rows = records.len(), "CSV written");
    Ok(path)
}
