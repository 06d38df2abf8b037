//! Transactional session mock.

use crate::config::LedgerConfig;
use crate::counter::DisposalCounter;
use crate::error::{MockError, MockResult};
use crate::transaction::ledger::TransactionLedger;
use crate::transaction::record::TransactionMock;
use crate::verify::{DisposableMock, TransactionalMock};
use sessionmock_abstractions::{
    AsyncDisposable, AsyncReadOnlySession, AsyncTransactionalSession, DataAccess, Disposable,
    ReadOnlySession, TransactionalSession,
};
use std::future::{self, Future};
use std::sync::Arc;

#[derive(Debug, Default)]
struct TransactionalSessionState {
    disposal: DisposalCounter,
    ledger: TransactionLedger,
}

/// Mock for a session that hands out transactions.
///
/// Every transaction begun through the mock is recorded in its
/// [`TransactionLedger`]. By default, beginning a transaction fails while the
/// previous one is still undisposed.
///
/// # Example
///
/// ```rust
/// use sessionmock_core::{DisposableMock, TransactionalMock, TransactionalSessionMock};
///
/// let session = TransactionalSessionMock::new();
/// for _ in 0..3 {
///     let transaction = session.begin_transaction().unwrap();
///     transaction.commit().unwrap();
///     transaction.dispose().unwrap();
/// }
/// session.dispose().unwrap();
///
/// session
///     .all_transactions_must_be_committed()
///     .and_then(|s| s.must_be_disposed())
///     .unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct TransactionalSessionMock {
    state: Arc<TransactionalSessionState>,
}

impl TransactionalSessionMock {
    /// Creates a mock that requires each transaction to be disposed before
    /// the next one begins.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock with the given ledger configuration.
    #[must_use]
    pub fn with_config(config: LedgerConfig) -> Self {
        Self {
            state: Arc::new(TransactionalSessionState {
                disposal: DisposalCounter::new(),
                ledger: TransactionLedger::new(config),
            }),
        }
    }

    /// Begins a new transaction.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::PreviousTransactionNotClosed`] if the previous
    /// transaction is still open and the ledger enforces closing.
    pub fn begin_transaction(&self) -> MockResult<TransactionMock> {
        self.state.ledger.begin_transaction()
    }

    /// Records one disposal of the session.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::Overflow`] if the counter is exhausted.
    pub fn dispose(&self) -> MockResult<()> {
        self.state.disposal.dispose()
    }

    /// Returns true if `other` shares this mock's state.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}

impl TransactionalMock for TransactionalSessionMock {
    fn ledger(&self) -> &TransactionLedger {
        &self.state.ledger
    }
}

impl DisposableMock for TransactionalSessionMock {
    fn disposal(&self) -> &DisposalCounter {
        &self.state.disposal
    }

    fn dependents_must_be_disposed(&self) -> MockResult<()> {
        self.state.ledger.all_transactions_must_be_disposed()
    }
}

impl DataAccess for TransactionalSessionMock {
    type Error = MockError;
}

impl Disposable for TransactionalSessionMock {
    fn dispose(&mut self) -> MockResult<()> {
        self.state.disposal.dispose()
    }
}

impl AsyncDisposable for TransactionalSessionMock {
    fn dispose_async(&mut self) -> impl Future<Output = MockResult<()>> + Send {
        future::ready(self.state.disposal.dispose())
    }
}

impl ReadOnlySession for TransactionalSessionMock {}

impl AsyncReadOnlySession for TransactionalSessionMock {}

impl TransactionalSession for TransactionalSessionMock {
    type Tx = TransactionMock;

    fn begin_transaction(&mut self) -> MockResult<TransactionMock> {
        self.state.ledger.begin_transaction()
    }
}

impl AsyncTransactionalSession for TransactionalSessionMock {
    type AsyncTx = TransactionMock;

    fn begin_transaction_async(
        &mut self,
    ) -> impl Future<Output = MockResult<TransactionMock>> + Send {
        future::ready(self.state.ledger.begin_transaction())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ordinal::Ordinal;
    use sessionmock_abstractions::Transaction;

    fn run_units_of_work<S>(session: &mut S, count: usize) -> Result<(), S::Error>
    where
        S: TransactionalSession,
    {
        for _ in 0..count {
            let mut transaction = session.begin_transaction()?;
            transaction.commit()?;
            transaction.dispose()?;
        }
        session.dispose()
    }

    #[test]
    fn generic_caller_satisfies_all_verifications() {
        let session = TransactionalSessionMock::new();
        let mut handed_out = session.clone();

        run_units_of_work(&mut handed_out, 4).unwrap();

        session
            .all_transactions_must_be_committed()
            .and_then(|s| s.must_be_disposed())
            .unwrap();
        assert_eq!(session.transactions().len(), 4);
    }

    #[test]
    fn must_be_disposed_checks_transactions_first() {
        let config = LedgerConfig::new().ensure_previous_transaction_is_closed(false);
        let session = TransactionalSessionMock::with_config(config);
        session.begin_transaction().unwrap().dispose().unwrap();
        session.begin_transaction().unwrap();

        assert_eq!(
            session.must_be_disposed().unwrap_err(),
            MockError::TransactionNotDisposed {
                ordinal: Ordinal::new(2)
            }
        );

        session.ledger().transaction(1).unwrap().dispose().unwrap();
        assert_eq!(
            session.must_be_disposed().unwrap_err().to_string(),
            "\"TransactionalSessionMock\" was not disposed"
        );

        session.dispose().unwrap();
        assert!(session.must_be_disposed().is_ok());
    }

    #[test]
    fn verifications_chain_on_the_session() {
        let session = TransactionalSessionMock::new();
        for index in 0..4 {
            let transaction = session.begin_transaction().unwrap();
            if index % 2 == 0 {
                transaction.commit().unwrap();
            }
            transaction.dispose().unwrap();
        }

        let verified = session
            .transactions_with_indexes_must_be_committed(&[0, 2])
            .and_then(|s| s.transactions_with_indexes_must_be_rolled_back(&[1, 3]))
            .and_then(|s| s.last_transaction_must_be_rolled_back())
            .unwrap();
        assert!(std::ptr::eq(verified, &session));
    }

    #[test]
    fn config_is_exposed_through_ledger() {
        let session = TransactionalSessionMock::new();
        assert!(session.ledger().config().ensure_previous_transaction_is_closed);
    }
}
