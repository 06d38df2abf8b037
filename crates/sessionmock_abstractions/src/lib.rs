//! # sessionmock abstractions
//!
//! Capability traits for code that talks to a database through sessions.
//!
//! This crate is the lowest layer of the workspace. It only describes what a
//! data-access layer can do; it carries no implementation. Application code
//! depends on these traits, production code implements them against a real
//! database, and `sessionmock_core` implements them with call-counting mocks.
//!
//! ## Design Principles
//!
//! - Every capability reports failures through [`DataAccess::Error`]
//! - Synchronous and asynchronous capabilities are separate traits with
//!   distinct method names, so one type may implement both
//! - Async methods return `impl Future + Send` and never require a runtime
//!
//! ## Capabilities
//!
//! - [`Disposable`] / [`AsyncDisposable`] - resources that must be released
//! - [`ReadOnlySession`] / [`AsyncReadOnlySession`] - query-only sessions
//! - [`Session`] / [`AsyncSession`] - sessions that save changes
//! - [`Transaction`] / [`AsyncTransaction`] - explicit units of commit
//! - [`TransactionalSession`] / [`AsyncTransactionalSession`] - sessions that
//!   hand out transactions
//! - [`SessionFactory`] - opens sessions on demand
//!
//! ## Example
//!
//! ```rust
//! use sessionmock_abstractions::{DataAccess, Disposable, Transaction, TransactionalSession};
//!
//! fn import_rows<S>(session: &mut S, rows: &[&str]) -> Result<(), S::Error>
//! where
//!     S: TransactionalSession,
//! {
//!     for _row in rows {
//!         let mut transaction = session.begin_transaction()?;
//!         // ... write the row
//!         transaction.commit()?;
//!         transaction.dispose()?;
//!     }
//!     Ok(())
//! }
//! # let _ = import_rows::<NoSession>;
//! # struct NoSession;
//! # #[derive(Debug)] struct Never;
//! # impl std::fmt::Display for Never { fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str("never") } }
//! # impl std::error::Error for Never {}
//! # impl DataAccess for NoSession { type Error = Never; }
//! # impl Disposable for NoSession { fn dispose(&mut self) -> Result<(), Never> { Ok(()) } }
//! # impl sessionmock_abstractions::ReadOnlySession for NoSession {}
//! # impl TransactionalSession for NoSession {
//! #     type Tx = NoSession;
//! #     fn begin_transaction(&mut self) -> Result<NoSession, Never> { Ok(NoSession) }
//! # }
//! # impl Transaction for NoSession { fn commit(&mut self) -> Result<(), Never> { Ok(()) } }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod disposable;
mod factory;
mod session;
mod transaction;

pub use disposable::{AsyncDisposable, DataAccess, Disposable};
pub use factory::SessionFactory;
pub use session::{AsyncReadOnlySession, AsyncSession, ReadOnlySession, Session};
pub use transaction::{
    AsyncTransaction, AsyncTransactionalSession, Transaction, TransactionalSession,
};
