//! # sessionmock core
//!
//! Call-counting mocks for the capabilities in `sessionmock_abstractions`.
//!
//! This crate provides:
//! - Disposal and call counters with overflow detection
//! - Session mocks (read-only, unit-of-work, transactional)
//! - A transaction ledger that verifies commit, rollback and disposal
//! - Session factory mocks (trait-based and closure-based)
//!
//! Every mock is a cheap handle: clones share their counters. Hand a clone to
//! the code under test, keep another, and verify afterwards. All
//! verifications return the first violation as a [`MockError`] whose
//! `Display` output is a complete assertion message.
//!
//! ## Example
//!
//! ```rust
//! use sessionmock_core::prelude::*;
//!
//! fn transfer<S: TransactionalSession>(session: &mut S) -> Result<(), S::Error> {
//!     let mut transaction = session.begin_transaction()?;
//!     transaction.commit()?;
//!     transaction.dispose()?;
//!     session.dispose()
//! }
//!
//! let session = TransactionalSessionMock::new();
//! transfer(&mut session.clone()).unwrap();
//!
//! session
//!     .all_transactions_must_be_committed()
//!     .and_then(|s| s.must_be_disposed())
//!     .unwrap();
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod counter;
mod error;
mod factory;
mod ordinal;
mod session;
pub mod transaction;
mod verify;

pub use config::LedgerConfig;
pub use counter::{CallCounter, DisposalCounter};
pub use error::{ExpectedCalls, MockError, MockResult};
pub use factory::{DelegateSessionFactoryMock, SessionFactoryMock, CREATE_SESSION, OPEN_SESSION};
pub use ordinal::Ordinal;
pub use session::{ReadOnlySessionMock, SessionMock, SAVE_CHANGES, SAVE_CHANGES_ASYNC};
pub use transaction::{TransactionLedger, TransactionMock, TransactionalSessionMock, COMMIT};
pub use verify::{DisposableMock, SaveChangesMock, TransactionalMock};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        DelegateSessionFactoryMock, DisposableMock, LedgerConfig, MockError, MockResult,
        ReadOnlySessionMock, SaveChangesMock, SessionFactoryMock, SessionMock, TransactionMock,
        TransactionalMock, TransactionalSessionMock,
    };
    pub use sessionmock_abstractions::{
        AsyncDisposable, AsyncReadOnlySession, AsyncSession, AsyncTransaction,
        AsyncTransactionalSession, DataAccess, Disposable, ReadOnlySession, Session,
        SessionFactory, Transaction, TransactionalSession,
    };
}
