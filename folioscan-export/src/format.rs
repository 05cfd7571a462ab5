//! Output format selection and default output file naming.

use chrono::NaiveDateTime;
use folioscan_core::StatementError;
use std::fmt;
use std::str::FromStr;

/// Prefix of generated output files, e.g. `CAMS_data_04_10_2023_00_25.csv`
pub const DEFAULT_FILE_PREFIX: &str = "CAMS_data";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Header row plus one row per record
    Csv,
    /// Compact JSON array of objects
    Json,
    /// Pretty-printed list of field maps
    Dicts,
    /// Aligned text table
    Table,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Csv,
        OutputFormat::Json,
        OutputFormat::Dicts,
        OutputFormat::Table,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Dicts => "dicts",
            OutputFormat::Table => "table",
        }
    }

    pub const fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json | OutputFormat::Dicts => "json",
            OutputFormat::Table => "txt",
        }
    }

    fn expected() -> String {
        Self::ALL
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = StatementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "dicts" => Ok(OutputFormat::Dicts),
            // "df" was the dataframe mode of earlier tooling
            "table" | "df" => Ok(OutputFormat::Table),
            _ => Err(StatementError::UnsupportedOutputFormat {
                requested: s.to_string(),
                expected: Self::expected(),
            }),
        }
    }
}

/// Timestamped output file name: `CAMS_data_%d_%m_%Y_%H_%M.<ext>`
pub fn default_file_name(format: OutputFormat, now: NaiveDateTime) -> String {
    format!(
        "{}_{}.{}",
        DEFAULT_FILE_PREFIX,
        now.format("%d_%m_%Y_%H_%M"),
        format.extension()
    )
}
