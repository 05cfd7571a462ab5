//! JSON encodings: a compact JSON string and a list of ordered field maps.

use folioscan_core::TransactionRecord;
use serde_json::{Map, Value};

use crate::error::ExportResult;

pub fn to_json_string(records: &[TransactionRecord]) -> ExportResult<String> {
    Ok(serde_json::to_string(records)?)
}

/// One map per record, keys in column order.
pub fn to_dicts(records: &[TransactionRecord]) -> ExportResult<Vec<Map<String, Value>>> {
    records
        .iter()
        .map(|r| -> ExportResult<Map<String, Value>> {
            Ok(serde_json::from_value(serde_json::to_value(r)?)?)
        })
        .collect()
}

pub fn to_dicts_pretty(records: &[TransactionRecord]) -> ExportResult<String> {
    Ok(serde_json::to_string_pretty(&to_dicts(records)?)?)
}

pub fn from_json_str(s: &str) -> ExportResult<Vec<TransactionRecord>> {
    Ok(serde_json::from_str(s)?)
}
