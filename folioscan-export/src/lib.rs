//! folioscan-export: output adapters for parsed transaction records (CSV, JSON,
//! field maps, text table).

pub mod error;
pub mod format;
pub mod json;
pub mod table;
pub mod tabular;

pub use error::{ExportError, ExportResult};
pub use format::{DEFAULT_FILE_PREFIX, OutputFormat, default_file_name};
pub use json::{from_json_str, to_dicts, to_dicts_pretty, to_json_string};
pub use table::RecordTable;
pub use tabular::{read_csv, read_csv_file, write_csv, write_csv_file};

use folioscan_core::TransactionRecord;

/// Render records in the requested format.
pub fn render(records: &[TransactionRecord], format: OutputFormat) -> ExportResult<String> {
    match format {
        OutputFormat::Csv => {
            let mut buf = Vec::new();
            write_csv(records, &mut buf)?;
            Ok(String::from_utf8_lossy(&buf).into_owned())
        }
        OutputFormat::Json => to_json_string(records),
        OutputFormat::Dicts => to_dicts_pretty(records),
        OutputFormat::Table => Ok(RecordTable::from_records(records).to_string()),
    }
}
