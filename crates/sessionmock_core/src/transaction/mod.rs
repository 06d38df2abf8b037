//! Transaction mocks and the ledger that verifies them.
//!
//! A [`TransactionalSessionMock`] appends one [`TransactionMock`] to its
//! [`TransactionLedger`] per `begin_transaction` call. The handle returned to
//! the caller and the ledger entry share their counters, so after the code
//! under test has run, the ledger knows for every transaction:
//!
//! - **commits**: how often `commit` was called (0, 1 or more)
//! - **disposals**: how often `dispose` was called (0, 1 or more)
//!
//! A transaction committed exactly once counts as committed; a transaction
//! never committed but disposed counts as rolled back.

mod ledger;
mod record;
mod session;

pub use ledger::TransactionLedger;
pub use record::{TransactionMock, COMMIT};
pub use session::TransactionalSessionMock;
