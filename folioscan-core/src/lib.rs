//! folioscan-core: transaction record types and the error taxonomy for statement parsing

pub mod error;
pub mod record;

pub use error::{LineError, StatementError};
pub use record::{InstrumentRef, STATEMENT_DATE_FORMAT, TransactionKind, TransactionRecord};
