//! Error taxonomy shared by the ingest, export and CLI crates.

use thiserror::Error;

/// Fatal errors: the request or the whole document cannot be processed.
#[derive(Debug, Error)]
pub enum StatementError {
    /// A serialization mode outside the recognized set was requested.
    #[error("unsupported output format '{requested}': expected one of {expected}")]
    UnsupportedOutputFormat { requested: String, expected: String },

    /// The text-extraction collaborator could not produce text.
    #[error("could not decode document {source_name}: {source}")]
    DocumentDecode {
        source_name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A line shape pattern failed to compile.
    #[error("invalid line pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl StatementError {
    pub fn decode(
        source_name: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::DocumentDecode {
            source_name: source_name.into(),
            source: source.into(),
        }
    }
}

/// Recoverable per-line problems. The line is skipped and the pass continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    /// The line matched a transaction shape but a numeric field did not convert.
    #[error("malformed transaction at line {line}: {field} '{raw}' is not a decimal ({content})")]
    MalformedTransactionLine {
        /// 1-based line number
        line: usize,
        field: &'static str,
        raw: String,
        content: String,
    },

    /// Strict mode only: a transaction appeared before any account/instrument header.
    #[error("transaction at line {line} precedes any account or instrument header ({content})")]
    MissingContext { line: usize, content: String },
}

impl LineError {
    pub fn line(&self) -> usize {
        match self {
            LineError::MalformedTransactionLine { line, .. } => *line,
            LineError::MissingContext { line, .. } => *line,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            LineError::MalformedTransactionLine { content, .. } => content,
            LineError::MissingContext { content, .. } => content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_error_accessors() {
        let err = LineError::MalformedTransactionLine {
            line: 12,
            field: "amount",
            raw: "(99999999999999999999999999999)".to_string(),
            content: "01-Jan-2021 Purchase ...".to_string(),
        };
        assert_eq!(err.line(), 12);
        assert_eq!(err.content(), "01-Jan-2021 Purchase ...");
        assert!(err.to_string().contains("line 12"));
    }

    #[test]
    fn test_decode_error_keeps_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad password");
        let err = StatementError::decode("statement.pdf", io);
        let msg = err.to_string();
        assert!(msg.contains("statement.pdf"));
        assert!(msg.contains("bad password"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
