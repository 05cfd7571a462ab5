//! Transaction record types produced by the statement parser

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Printed date layout on statement transaction lines, e.g. `26-Apr-2020`
pub const STATEMENT_DATE_FORMAT: &str = "%d-%b-%Y";

/// Direction of a transaction. The sign of the stored amounts never carries it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    #[serde(rename = "Buy")]
    Buy,
    #[serde(rename = "Sell")]
    Sell,
}

impl TransactionKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Buy => "Buy",
            TransactionKind::Sell => "Sell",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Buy" => Ok(TransactionKind::Buy),
            "Sell" => Ok(TransactionKind::Sell),
            other => Err(format!("unknown transaction kind '{other}' (expected Buy or Sell)")),
        }
    }
}

/// The instrument a run of transaction lines belongs to
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstrumentRef {
    /// ISIN code, e.g. `INF209K01VA3`
    pub instrument_id: String,
    pub instrument_name: String,
}

impl InstrumentRef {
    pub fn new(instrument_id: impl Into<String>, instrument_name: impl Into<String>) -> Self {
        Self {
            instrument_id: instrument_id.into(),
            instrument_name: instrument_name.into(),
        }
    }
}

/// One transaction row of a statement.
///
/// Field order is the tabular export column order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionRecord {
    pub instrument_name: String,
    pub instrument_id: String,
    /// Folio number of the holding account
    pub account_id: String,
    /// Transaction date as printed (`DD-Mon-YYYY`)
    pub date: String,
    pub transaction_kind: TransactionKind,
    /// Monetary value; zero for quantity-only lines
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub units: Decimal,
    /// Per-unit price at transaction time; zero for quantity-only lines
    #[serde(with = "rust_decimal::serde::str")]
    pub nav: Decimal,
    /// Unit balance after the transaction, as printed
    #[serde(with = "rust_decimal::serde::str")]
    pub balance_units: Decimal,
}

impl TransactionRecord {
    /// Tabular column order, identical to the serialized field order
    pub const COLUMNS: [&'static str; 9] = [
        "instrument_name",
        "instrument_id",
        "account_id",
        "date",
        "transaction_kind",
        "amount",
        "units",
        "nav",
        "balance_units",
    ];

    /// Create a new TransactionRecord.
    ///
    /// `amount` and `units` are stored as magnitudes; `kind` is the only
    /// carrier of direction.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        account_id: impl Into<String>,
        instrument: &InstrumentRef,
        date: impl Into<String>,
        kind: TransactionKind,
        amount: Decimal,
        units: Decimal,
        nav: Decimal,
        balance_units: Decimal,
    ) -> Self {
        Self {
            instrument_name: instrument.instrument_name.clone(),
            instrument_id: instrument.instrument_id.clone(),
            account_id: account_id.into(),
            date: date.into(),
            transaction_kind: kind,
            amount: amount.abs(),
            units: units.abs(),
            nav,
            balance_units,
        }
    }

    /// Parse the printed date into a calendar date, if it has the usual layout
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, STATEMENT_DATE_FORMAT).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn fund() -> InstrumentRef {
        InstrumentRef::new("INF209K01VA3", "Aditya Birla Sun Life Liquid Fund - Growth-Direct Plan")
    }

    #[test]
    fn test_record_creation_stores_magnitudes() {
        let record = TransactionRecord::new(
            "1039837274",
            &fund(),
            "21-Mar-2021",
            TransactionKind::Sell,
            dec("-50000.00"),
            dec("-150.123"),
            dec("333.0000"),
            dec("971.929"),
        );
        assert_eq!(record.amount, dec("50000.00"));
        assert_eq!(record.units, dec("150.123"));
        assert_eq!(record.transaction_kind, TransactionKind::Sell);
        assert_eq!(record.instrument_id, "INF209K01VA3");
        assert_eq!(record.account_id, "1039837274");
    }

    #[test]
    fn test_decimal_scale_is_preserved() {
        let record = TransactionRecord::new(
            "1",
            &fund(),
            "26-Apr-2020",
            TransactionKind::Buy,
            dec("360000.00"),
            dec("1122.052"),
            dec("320.8408"),
            dec("1122.052"),
        );
        assert_eq!(record.amount.to_string(), "360000.00");
        assert_eq!(record.nav.to_string(), "320.8408");
    }

    #[test]
    fn test_parsed_date() {
        let mut record = TransactionRecord::new(
            "1",
            &InstrumentRef::default(),
            "26-Apr-2020",
            TransactionKind::Buy,
            Decimal::ZERO,
            Decimal::ONE,
            Decimal::ZERO,
            Decimal::ONE,
        );
        assert_eq!(record.parsed_date(), NaiveDate::from_ymd_opt(2020, 4, 26));

        record.date = "2020/04/26".to_string();
        assert_eq!(record.parsed_date(), None);
    }

    #[test]
    fn test_kind_round_trips_through_str() {
        assert_eq!("Buy".parse::<TransactionKind>().unwrap(), TransactionKind::Buy);
        assert_eq!(TransactionKind::Sell.to_string(), "Sell");
        assert!("sell".parse::<TransactionKind>().is_err());
    }
}
