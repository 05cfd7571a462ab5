//! Line classifier for consolidated account statements (CAMS layout).
//!
//! Expected text rows after PDF-to-text, thousands separators already stripped:
//!   Folio No: 1039837274 PAN: ABCDE1234F
//!   B205RG-Aditya Birla Sun Life Liquid Fund - Growth-Direct Plan-ISIN: INF209K01VA3(Advisor: DIRECT)
//!   26-Apr-2020 Purchase 360000.00 1122.052 320.8408 1122.052
//!   21-Mar-2021 Redemption (50000.00) (150.123) 333.0000 971.929
//!   15-Jun-2022 Segregated Portfolio Units 250.000 250.000

use regex::{Captures, Regex};
use rust_decimal::Decimal;
use std::str::FromStr;

const DATE: &str = r"(?P<date>[0-9]+-\S+-[0-9]+)";
const DESCRIPTION: &str = r"(?P<description>.*)";
/// Unsigned decimal: ASCII digits, optionally `.` and more digits. No sign, no grouping.
/// `\d` would also admit non-ASCII digits, which `Decimal` rejects.
/// Each numeric group, the last included, must end at whitespace or end of line.
const DECIMAL: &str = r"[0-9]+(?:\.[0-9]+)?";

/// The five line shapes, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeTag {
    AccountHeader,
    InstrumentHeader,
    Buy,
    Sell,
    QuantityOnly,
}

impl ShapeTag {
    /// First match wins.
    pub const PRECEDENCE: [ShapeTag; 5] = [
        ShapeTag::AccountHeader,
        ShapeTag::InstrumentHeader,
        ShapeTag::Buy,
        ShapeTag::Sell,
        ShapeTag::QuantityOnly,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            ShapeTag::AccountHeader => "account",
            ShapeTag::InstrumentHeader => "instrument",
            ShapeTag::Buy => "buy",
            ShapeTag::Sell => "sell",
            ShapeTag::QuantityOnly => "quantity",
        }
    }

    fn pattern(&self) -> String {
        match self {
            ShapeTag::AccountHeader => {
                r"^\s*Folio No:\s*(?P<account_id>.+?)\s+PAN:\s*(?P<tax_id>[A-Z0-9]{10})".to_string()
            }
            ShapeTag::InstrumentHeader => concat!(
                r"^\s*[^-\s]+-",
                r"(?P<instrument_name>.+?)\s*-\s*ISIN:\s*",
                r"(?P<instrument_id>[A-Z0-9]+)",
                r"(?:\s*\(\s*Advisor:\s*(?P<advisor>[^)]*?)\s*\))?"
            )
            .to_string(),
            ShapeTag::Buy => format!(
                r"^\s*{DATE}\s+{DESCRIPTION}\s+(?P<amount>{DECIMAL})\s+(?P<units>{DECIMAL})\s+(?P<nav>{DECIMAL})\s+(?P<balance_units>{DECIMAL})(?:\s|$)"
            ),
            ShapeTag::Sell => format!(
                r"^\s*{DATE}\s+{DESCRIPTION}\s+(?P<amount>\({DECIMAL}\))\s+(?P<units>\({DECIMAL}\))\s+(?P<nav>{DECIMAL})\s+(?P<balance_units>{DECIMAL})(?:\s|$)"
            ),
            ShapeTag::QuantityOnly => format!(
                r"^\s*{DATE}\s+{DESCRIPTION}\s+(?P<units>{DECIMAL})\s+(?P<balance_units>{DECIMAL})(?:\s|$)"
            ),
        }
    }
}

/// Raw tokens of a buy or sell line. Sell amounts and units keep their parentheses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FullTransaction<'a> {
    pub date: &'a str,
    pub description: &'a str,
    pub amount: &'a str,
    pub units: &'a str,
    pub nav: &'a str,
    pub balance_units: &'a str,
}

/// Raw tokens of a quantity-only line (segregated portfolio units).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityTransaction<'a> {
    pub date: &'a str,
    pub description: &'a str,
    pub units: &'a str,
    pub balance_units: &'a str,
}

/// Result of classifying one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineShape<'a> {
    AccountHeader {
        account_id: &'a str,
        /// PAN; extracted but not carried into records
        tax_id: &'a str,
    },
    InstrumentHeader {
        instrument_name: &'a str,
        instrument_id: &'a str,
        advisor: Option<&'a str>,
    },
    Buy(FullTransaction<'a>),
    Sell(FullTransaction<'a>),
    QuantityOnly(QuantityTransaction<'a>),
}

impl LineShape<'_> {
    pub fn tag(&self) -> ShapeTag {
        match self {
            LineShape::AccountHeader { .. } => ShapeTag::AccountHeader,
            LineShape::InstrumentHeader { .. } => ShapeTag::InstrumentHeader,
            LineShape::Buy(_) => ShapeTag::Buy,
            LineShape::Sell(_) => ShapeTag::Sell,
            LineShape::QuantityOnly(_) => ShapeTag::QuantityOnly,
        }
    }
}

fn group<'a>(caps: &Captures<'a>, name: &str) -> &'a str {
    caps.name(name).map_or("", |m| m.as_str())
}

fn full_transaction<'a>(caps: &Captures<'a>) -> FullTransaction<'a> {
    FullTransaction {
        date: group(caps, "date"),
        description: group(caps, "description").trim(),
        amount: group(caps, "amount"),
        units: group(caps, "units"),
        nav: group(caps, "nav"),
        balance_units: group(caps, "balance_units"),
    }
}

/// Ordered pattern table; stateless once built.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    patterns: Vec<(ShapeTag, Regex)>,
}

impl LineClassifier {
    pub fn new() -> Result<Self, regex::Error> {
        let patterns = ShapeTag::PRECEDENCE
            .iter()
            .map(|tag| Ok((*tag, Regex::new(&tag.pattern())?)))
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self { patterns })
    }

    /// Classify a line against the shapes in precedence order.
    pub fn classify<'a>(&self, line: &'a str) -> Option<LineShape<'a>> {
        self.patterns
            .iter()
            .find_map(|(tag, re)| re.captures(line).map(|caps| extract(*tag, &caps)))
    }
}

fn extract<'a>(tag: ShapeTag, caps: &Captures<'a>) -> LineShape<'a> {
    match tag {
        ShapeTag::AccountHeader => LineShape::AccountHeader {
            account_id: group(caps, "account_id").trim(),
            tax_id: group(caps, "tax_id"),
        },
        ShapeTag::InstrumentHeader => LineShape::InstrumentHeader {
            instrument_name: group(caps, "instrument_name")
                .trim_matches(|c: char| c == '-' || c.is_whitespace()),
            instrument_id: group(caps, "instrument_id"),
            advisor: caps.name("advisor").map(|m| m.as_str()),
        },
        ShapeTag::Buy => LineShape::Buy(full_transaction(caps)),
        ShapeTag::Sell => LineShape::Sell(full_transaction(caps)),
        ShapeTag::QuantityOnly => LineShape::QuantityOnly(QuantityTransaction {
            date: group(caps, "date"),
            description: group(caps, "description").trim(),
            units: group(caps, "units"),
            balance_units: group(caps, "balance_units"),
        }),
    }
}

/// Remove one enclosing pair of parentheses, e.g. `(150.123)` -> `150.123`.
pub fn strip_parens(token: &str) -> &str {
    token
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .unwrap_or(token)
}

/// Convert an unsigned decimal token. Scale is kept as printed.
pub fn parse_decimal(token: &str) -> Result<Decimal, rust_decimal::Error> {
    Decimal::from_str(token)
}
