//! Statement parser: one pass over the extracted lines, carrying the current
//! account and instrument from header lines into every transaction record.

use folioscan_core::{InstrumentRef, LineError, StatementError, TransactionKind, TransactionRecord};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::classifier::{
    FullTransaction, LineClassifier, LineShape, QuantityTransaction, parse_decimal, strip_parens,
};
use crate::source::{TextSource, statement_lines};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Reject transactions seen before both an account and an instrument header.
    #[serde(default)]
    pub strict_context: bool,
}

/// Carry-over state. Only header lines change it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ParserContext {
    account_id: Option<String>,
    instrument: Option<InstrumentRef>,
}

impl ParserContext {
    fn is_complete(&self) -> bool {
        self.account_id.is_some() && self.instrument.is_some()
    }
}

/// A matched transaction line before numeric conversion.
enum Draft<'a> {
    Full(TransactionKind, FullTransaction<'a>),
    Quantity(QuantityTransaction<'a>),
}

/// Output of one parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedStatement {
    /// In input line order
    pub records: Vec<TransactionRecord>,
    /// Lines that looked like transactions but were dropped, in line order
    pub issues: Vec<LineError>,
    pub lines_seen: usize,
}

impl ParsedStatement {
    pub fn into_records(self) -> Vec<TransactionRecord> {
        self.records
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct StatementParser {
    classifier: LineClassifier,
    options: ParseOptions,
}

impl StatementParser {
    pub fn new(options: ParseOptions) -> Result<Self, StatementError> {
        Ok(Self {
            classifier: LineClassifier::new()?,
            options,
        })
    }

    pub fn classifier(&self) -> &LineClassifier {
        &self.classifier
    }

    /// Parse lines whose thousands separators are already stripped.
    pub fn parse<I, S>(&self, lines: I) -> ParsedStatement
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ctx = ParserContext::default();
        let mut out = ParsedStatement::default();

        for (idx, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            let line_no = idx + 1;
            out.lines_seen = line_no;

            let Some(shape) = self.classifier.classify(line) else {
                continue;
            };

            match shape {
                LineShape::AccountHeader { account_id, .. } => {
                    debug!(line = line_no, account_id, "account header");
                    ctx.account_id = Some(account_id.to_string());
                }
                LineShape::InstrumentHeader {
                    instrument_name,
                    instrument_id,
                    advisor,
                } => {
                    debug!(line = line_no, instrument_id, instrument_name, ?advisor, "instrument header");
                    ctx.instrument = Some(InstrumentRef::new(instrument_id, instrument_name));
                }
                LineShape::Buy(t) => {
                    self.emit(&ctx, line_no, line, Draft::Full(TransactionKind::Buy, t), &mut out)
                }
                LineShape::Sell(t) => {
                    self.emit(&ctx, line_no, line, Draft::Full(TransactionKind::Sell, t), &mut out)
                }
                LineShape::QuantityOnly(t) => {
                    self.emit(&ctx, line_no, line, Draft::Quantity(t), &mut out)
                }
            }
        }

        debug!(
            lines = out.lines_seen,
            records = out.records.len(),
            issues = out.issues.len(),
            "statement parsed"
        );
        out
    }

    /// Parse raw extracted text: strip thousands separators, then split into lines.
    pub fn parse_text(&self, text: &str) -> ParsedStatement {
        self.parse(statement_lines(text))
    }

    pub fn parse_source(&self, source: &dyn TextSource) -> Result<ParsedStatement, StatementError> {
        let text = source.extract_text()?;
        Ok(self.parse_text(&text))
    }

    fn emit(
        &self,
        ctx: &ParserContext,
        line_no: usize,
        line: &str,
        draft: Draft<'_>,
        out: &mut ParsedStatement,
    ) {
        match self.build_record(ctx, line_no, line, draft) {
            Ok(record) => out.records.push(record),
            Err(issue) => {
                warn!(line = issue.line(), content = issue.content(), "skipping line: {issue}");
                out.issues.push(issue);
            }
        }
    }

    fn build_record(
        &self,
        ctx: &ParserContext,
        line_no: usize,
        line: &str,
        draft: Draft<'_>,
    ) -> Result<TransactionRecord, LineError> {
        if self.options.strict_context && !ctx.is_complete() {
            return Err(LineError::MissingContext {
                line: line_no,
                content: line.to_string(),
            });
        }

        let num = |field: &'static str, raw: &str| -> Result<Decimal, LineError> {
            parse_decimal(raw).map_err(|_| LineError::MalformedTransactionLine {
                line: line_no,
                field,
                raw: raw.to_string(),
                content: line.to_string(),
            })
        };

        let (date, kind, amount, units, nav, balance_units) = match draft {
            Draft::Full(TransactionKind::Buy, t) => (
                t.date,
                TransactionKind::Buy,
                num("amount", t.amount)?,
                num("units", t.units)?,
                num("nav", t.nav)?,
                num("balance_units", t.balance_units)?,
            ),
            Draft::Full(TransactionKind::Sell, t) => (
                t.date,
                TransactionKind::Sell,
                num("amount", strip_parens(t.amount))?,
                num("units", strip_parens(t.units))?,
                num("nav", t.nav)?,
                num("balance_units", t.balance_units)?,
            ),
            // No sell variant exists for this shape.
            Draft::Quantity(t) => (
                t.date,
                TransactionKind::Buy,
                Decimal::ZERO,
                num("units", t.units)?,
                Decimal::ZERO,
                num("balance_units", t.balance_units)?,
            ),
        };

        let empty = InstrumentRef::default();
        Ok(TransactionRecord::new(
            ctx.account_id.as_deref().unwrap_or(""),
            ctx.instrument.as_ref().unwrap_or(&empty),
            date,
            kind,
            amount,
            units,
            nav,
            balance_units,
        ))
    }
}

/// Parse with default (lenient) options.
pub fn parse_statement_lines<I, S>(lines: I) -> Result<ParsedStatement, StatementError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Ok(StatementParser::new(ParseOptions::default())?.parse(lines))
}
