//! A single recorded transaction.

use crate::counter::{CallCounter, DisposalCounter};
use crate::error::{MockError, MockResult};
use crate::ordinal::Ordinal;
use crate::verify::DisposableMock;
use sessionmock_abstractions::{
    AsyncDisposable, AsyncTransaction, DataAccess, Disposable, Transaction,
};
use std::future::{self, Future};
use std::sync::Arc;

/// Name of the commit operation in failure messages.
pub const COMMIT: &str = "commit";

#[derive(Debug)]
struct TransactionState {
    disposal: DisposalCounter,
    commits: CallCounter,
}

/// Mock transaction handed out by a transactional session.
///
/// Commit and dispose are independent counters. Neither call is rejected,
/// not even a second commit; the ledger judges the counts when the test
/// verifies the session.
#[derive(Debug, Clone)]
pub struct TransactionMock {
    state: Arc<TransactionState>,
}

impl TransactionMock {
    pub(crate) fn new() -> Self {
        Self {
            state: Arc::new(TransactionState {
                disposal: DisposalCounter::new(),
                commits: CallCounter::new(COMMIT),
            }),
        }
    }

    /// Records one commit.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::Overflow`] if the counter is exhausted.
    pub fn commit(&self) -> MockResult<()> {
        self.state.commits.increment()
    }

    /// Records one disposal.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::Overflow`] if the counter is exhausted.
    pub fn dispose(&self) -> MockResult<()> {
        self.state.disposal.dispose()
    }

    /// Returns how often this transaction was committed.
    #[must_use]
    pub fn commit_count(&self) -> u32 {
        self.state.commits.count()
    }

    /// Returns true if at least one disposal was recorded.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.state.disposal.is_disposed()
    }

    /// Returns true if `other` is a handle to the same transaction.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }

    /// Checks that the transaction at `ordinal` was committed exactly once.
    pub(crate) fn check_committed(&self, ordinal: Ordinal) -> MockResult<()> {
        match self.commit_count() {
            1 => Ok(()),
            0 => Err(MockError::TransactionNotCommitted { ordinal }),
            count => Err(MockError::TransactionCommittedTooOften { ordinal, count }),
        }
    }

    /// Checks that the transaction at `ordinal` was disposed without commit.
    pub(crate) fn check_rolled_back(&self, ordinal: Ordinal) -> MockResult<()> {
        if self.commit_count() != 0 {
            return Err(MockError::TransactionShouldHaveRolledBack { ordinal });
        }
        if !self.is_disposed() {
            return Err(MockError::TransactionNotRolledBack { ordinal });
        }
        Ok(())
    }

    pub(crate) fn check_disposed(&self, ordinal: Ordinal) -> MockResult<()> {
        if self.is_disposed() {
            Ok(())
        } else {
            Err(MockError::TransactionNotDisposed { ordinal })
        }
    }
}

impl DisposableMock for TransactionMock {
    fn disposal(&self) -> &DisposalCounter {
        &self.state.disposal
    }
}

impl DataAccess for TransactionMock {
    type Error = MockError;
}

impl Disposable for TransactionMock {
    fn dispose(&mut self) -> MockResult<()> {
        self.state.disposal.dispose()
    }
}

impl AsyncDisposable for TransactionMock {
    fn dispose_async(&mut self) -> impl Future<Output = MockResult<()>> + Send {
        future::ready(self.state.disposal.dispose())
    }
}

impl Transaction for TransactionMock {
    fn commit(&mut self) -> MockResult<()> {
        self.state.commits.increment()
    }
}

impl AsyncTransaction for TransactionMock {
    fn commit_async(&mut self) -> impl Future<Output = MockResult<()>> + Send {
        future::ready(self.state.commits.increment())
    }
}
