//! Transaction capabilities.

use crate::disposable::{AsyncDisposable, Disposable};
use crate::session::{AsyncReadOnlySession, ReadOnlySession};
use std::future::Future;

/// An explicit unit of commit within a session.
///
/// Disposing a transaction that was not committed rolls it back.
pub trait Transaction: Disposable {
    /// Commits all changes made in this transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit failed.
    fn commit(&mut self) -> Result<(), Self::Error>;
}

/// Asynchronous counterpart of [`Transaction`].
pub trait AsyncTransaction: AsyncDisposable {
    /// Commits all changes made in this transaction.
    ///
    /// # Errors
    ///
    /// The returned future resolves to an error if the commit failed.
    fn commit_async(&mut self) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// A session that hands out transactions.
///
/// Callers are expected to dispose every transaction before beginning the
/// next one.
pub trait TransactionalSession: ReadOnlySession {
    /// The transaction type handed out by this session.
    type Tx: Transaction<Error = Self::Error>;

    /// Begins a new transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if no transaction could be started.
    fn begin_transaction(&mut self) -> Result<Self::Tx, Self::Error>;
}

/// Asynchronous counterpart of [`TransactionalSession`].
pub trait AsyncTransactionalSession: AsyncReadOnlySession {
    /// The transaction type handed out by this session.
    type AsyncTx: AsyncTransaction<Error = Self::Error>;

    /// Begins a new transaction.
    ///
    /// # Errors
    ///
    /// The returned future resolves to an error if no transaction could be
    /// started.
    fn begin_transaction_async(
        &mut self,
    ) -> impl Future<Output = Result<Self::AsyncTx, Self::Error>> + Send;
}
