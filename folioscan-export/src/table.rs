//! Generic table view of the records: named columns plus string rows.

use folioscan_core::TransactionRecord;
use std::fmt;

/// Columns holding numbers are right-aligned when rendered.
const NUMERIC_COLUMNS: [&str; 4] = ["amount", "units", "nav", "balance_units"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RecordTable {
    pub fn from_records(records: &[TransactionRecord]) -> Self {
        let rows = records
            .iter()
            .map(|r| {
                vec![
                    r.instrument_name.clone(),
                    r.instrument_id.clone(),
                    r.account_id.clone(),
                    r.date.clone(),
                    r.transaction_kind.to_string(),
                    r.amount.to_string(),
                    r.units.to_string(),
                    r.nav.to_string(),
                    r.balance_units.to_string(),
                ]
            })
            .collect();

        Self {
            columns: TransactionRecord::COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of one column, top to bottom. Missing cells read as empty.
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|row| cell(row, idx)).collect())
    }
}

fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map_or("", String::as_str)
}

impl fmt::Display for RecordTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let index_width = self.rows.len().saturating_sub(1).to_string().len();
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| {
                self.rows
                    .iter()
                    .map(|row| cell(row, i).chars().count())
                    .max()
                    .unwrap_or(0)
                    .max(c.chars().count())
            })
            .collect();

        let numeric: Vec<bool> = self
            .columns
            .iter()
            .map(|c| NUMERIC_COLUMNS.contains(&c.as_str()))
            .collect();

        let write_row = |f: &mut fmt::Formatter<'_>, index: &str, cells: &[String]| -> fmt::Result {
            write!(f, "{index:>index_width$}")?;
            for (i, (&w, &right)) in widths.iter().zip(&numeric).enumerate() {
                let text = cell(cells, i);
                if right {
                    write!(f, "  {text:>w$}")?;
                } else {
                    write!(f, "  {text:<w$}")?;
                }
            }
            writeln!(f)
        };

        write_row(f, "", &self.columns)?;
        for (i, row) in self.rows.iter().enumerate() {
            write_row(f, &i.to_string(), row)?;
        }
        writeln!(f)?;
        write!(f, "[{} rows x {} columns]", self.rows.len(), self.columns.len())
    }
}
