//! Text sources: where statement text comes from before it reaches the parser.
//!
//! PDF decoding sits behind the `pdf` feature (pdf-extract). Already-extracted
//! text files need nothing beyond std.

use folioscan_core::StatementError;
use std::fs;
use std::path::{Path, PathBuf};

/// Produces the full text of one statement document.
pub trait TextSource {
    /// Name used in logs and errors
    fn name(&self) -> String;

    fn extract_text(&self) -> Result<String, StatementError>;
}

/// Text already extracted from the statement, one layout line per line.
#[derive(Debug, Clone)]
pub struct PlainTextSource {
    path: PathBuf,
}

impl PlainTextSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TextSource for PlainTextSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn extract_text(&self) -> Result<String, StatementError> {
        fs::read_to_string(&self.path).map_err(|e| StatementError::decode(self.name(), e))
    }
}

/// A (possibly password-protected) PDF statement.
#[cfg(feature = "pdf")]
#[derive(Debug, Clone)]
pub struct PdfSource {
    path: PathBuf,
    password: Option<String>,
}

#[cfg(feature = "pdf")]
impl PdfSource {
    pub fn new(path: impl Into<PathBuf>, password: Option<String>) -> Self {
        Self {
            path: path.into(),
            password,
        }
    }
}

#[cfg(feature = "pdf")]
impl TextSource for PdfSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn extract_text(&self) -> Result<String, StatementError> {
        let bytes = fs::read(&self.path).map_err(|e| StatementError::decode(self.name(), e))?;
        let text = match &self.password {
            Some(pw) => pdf_extract::extract_text_from_mem_encrypted(&bytes, pw.as_bytes()),
            None => pdf_extract::extract_text_from_mem(&bytes),
        };
        text.map_err(|e| StatementError::decode(self.name(), e))
    }
}

/// Pick a source by file extension: `.pdf` is decoded, anything else is read as text.
pub fn source_for_path(
    path: &Path,
    password: Option<String>,
) -> Result<Box<dyn TextSource + Send + Sync>, StatementError> {
    let is_pdf = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));

    if !is_pdf {
        return Ok(Box::new(PlainTextSource::new(path)));
    }

    #[cfg(feature = "pdf")]
    {
        Ok(Box::new(PdfSource::new(path, password)))
    }

    #[cfg(not(feature = "pdf"))]
    {
        let _ = password;
        Err(StatementError::decode(
            path.display().to_string(),
            "PDF support is not compiled in (rebuild with --features pdf)",
        ))
    }
}

/// Remove thousands separators and split into lines.
pub fn statement_lines(text: &str) -> Vec<String> {
    text.replace(',', "").lines().map(str::to_owned).collect()
}
