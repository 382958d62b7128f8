//! Call history CSV export

use crate::format::format_call_duration;
use chrono::TimeZone;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use staycrm_core::{CallRecord, Error, Result};
use std::fmt::Display;
use std::path::Path;
use tracing::info;

/// Column header of the export
pub const CALL_HISTORY_HEADER: [&str; 8] = [
    "Date", "User", "Type", "Status", "Duration", "Result", "Phone", "Notes",
];

/// Render the call log as CSV, with dates shown in `tz`
///
/// Only the notes column is quoted, always, with embedded quotes doubled.
/// Lines are separated by `\n` with no newline after the last row.
pub fn export_call_history<Tz>(records: &[CallRecord], tz: &Tz) -> Result<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CALL_HISTORY_HEADER).map_err(export_error)?;
    for record in records {
        writer
            .write_record([
                record
                    .date
                    .with_timezone(tz)
                    .format("%Y-%m-%d %H:%M")
                    .to_string(),
                record.user.clone(),
                record.call_type.to_string(),
                record.status.to_string(),
                format_call_duration(record.duration),
                record.result.clone(),
                record.phone.clone(),
                quote_notes(record.notes.as_deref().unwrap_or_default()),
            ])
            .map_err(export_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Export(e.to_string()))?;
    let mut csv = String::from_utf8(bytes).map_err(|e| Error::Export(e.to_string()))?;
    if csv.ends_with('\n') {
        csv.pop();
    }
    Ok(csv)
}

/// Write [`export_call_history`] output to `path`
pub fn write_call_history<Tz>(path: &Path, records: &[CallRecord], tz: &Tz) -> Result<()>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let csv = export_call_history(records, tz)?;
    std::fs::write(path, csv)?;
    info!(path = %path.display(), rows = records.len(), "Wrote call history");
    Ok(())
}

fn quote_notes(notes: &str) -> String {
    format!("\"{}\"", notes.replace('"', "\"\""))
}

fn export_error(err: csv::Error) -> Error {
    Error::Export(err.to_string())
}
