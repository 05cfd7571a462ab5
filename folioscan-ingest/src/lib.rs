//! folioscan-ingest: line classification and the statement parser, plus the text
//! sources that feed it (extracted text, PDF).

pub mod classifier;
pub mod parser;
pub mod source;

pub use classifier::{LineClassifier, LineShape, ShapeTag};
pub use parser::{ParseOptions, ParsedStatement, StatementParser, parse_statement_lines};
pub use source::{PlainTextSource, TextSource, source_for_path, statement_lines};

#[cfg(feature = "pdf")]
pub use source::PdfSource;
