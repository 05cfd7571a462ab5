//! CSV export of transaction records, and the reader used to load an export back.

use folioscan_core::TransactionRecord;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::error::ExportResult;

/// Write a header row followed by one row per record.
pub fn write_csv<W: Write>(records: &[TransactionRecord], writer: W) -> ExportResult<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(TransactionRecord::COLUMNS)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_csv_file(records: &[TransactionRecord], path: impl AsRef<Path>) -> ExportResult<()> {
    let file = File::create(path.as_ref())?;
    write_csv(records, file)
}

/// Load records from a CSV export (header row expected).
pub fn read_csv<R: Read>(reader: R) -> ExportResult<Vec<TransactionRecord>> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
    let mut records = Vec::new();
    for result in rdr.deserialize() {
        records.push(result?);
    }
    Ok(records)
}

pub fn read_csv_file(path: impl AsRef<Path>) -> ExportResult<Vec<TransactionRecord>> {
    let file = File::open(path.as_ref())?;
    read_csv(file)
}
