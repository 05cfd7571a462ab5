//! Parse several statement documents at once, one blocking task per document.

use folioscan_core::StatementError;
use folioscan_ingest::{ParsedStatement, StatementParser, source_for_path};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Debug)]
pub struct DocumentOutcome {
    pub path: PathBuf,
    pub result: Result<ParsedStatement, StatementError>,
}

impl DocumentOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes come back in input order regardless of which task finishes first.
pub async fn parse_documents(
    parser: Arc<StatementParser>,
    inputs: Vec<PathBuf>,
    password: Option<String>,
) -> Vec<DocumentOutcome> {
    let handles: Vec<_> = inputs
        .into_iter()
        .map(|path| {
            let parser = Arc::clone(&parser);
            let password = password.clone();
            let task_path = path.clone();
            let handle = tokio::task::spawn_blocking(move || parse_one(&parser, &task_path, password));
            (path, handle)
        })
        .collect();

    let mut outcomes = Vec::with_capacity(handles.len());
    for (path, handle) in handles {
        let result = match handle.await {
            Ok(result) => result,
            Err(join_err) => Err(StatementError::decode(path.display().to_string(), join_err)),
        };
        match &result {
            Ok(parsed) => info!(
                document = %path.display(),
                records = parsed.records.len(),
                issues = parsed.issues.len(),
                lines = parsed.lines_seen,
                "parsed document"
            ),
            Err(e) => error!(document = %path.display(), "{e}"),
        }
        outcomes.push(DocumentOutcome { path, result });
    }
    outcomes
}

fn parse_one(
    parser: &StatementParser,
    path: &Path,
    password: Option<String>,
) -> Result<ParsedStatement, StatementError> {
    let source = source_for_path(path, password)?;
    parser.parse_source(source.as_ref())
}
