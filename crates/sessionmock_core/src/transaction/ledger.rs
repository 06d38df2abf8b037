//! The ordered record of transactions begun by one session.

use crate::config::LedgerConfig;
use crate::error::{MockError, MockResult};
use crate::ordinal::Ordinal;
use crate::transaction::record::TransactionMock;
use parking_lot::Mutex;
use tracing::{debug, trace};

/// Which ledger entries a verification inspects.
#[derive(Debug, Clone, Copy)]
enum Selection<'a> {
    All,
    AllExceptLast,
    Last,
    Indexes(&'a [usize]),
}

impl Selection<'_> {
    fn includes(self, index: usize, len: usize) -> bool {
        match self {
            Self::All => true,
            Self::AllExceptLast => index + 1 < len,
            Self::Last => index + 1 == len,
            Self::Indexes(indexes) => indexes.contains(&index),
        }
    }
}

/// Append-only sequence of the transactions a session has begun.
///
/// Entries keep their creation order and are addressed by 0-based index;
/// failure messages use the 1-based [`Ordinal`].
///
/// # Invariants
///
/// - Entries are never removed or reordered
/// - With [`LedgerConfig::ensure_previous_transaction_is_closed`] set, every
///   entry except the last was disposed when its successor was appended
/// - Every verification reports only the first violation in ledger order
#[derive(Debug)]
pub struct TransactionLedger {
    config: LedgerConfig,
    records: Mutex<Vec<TransactionMock>>,
}

impl TransactionLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            config,
            records: Mutex::new(Vec::new()),
        }
    }

    /// Returns the configuration of this ledger.
    #[must_use]
    pub fn config(&self) -> LedgerConfig {
        self.config
    }

    /// Returns the number of transactions begun so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Returns true if no transaction was begun.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Returns a handle to the transaction at `index`.
    #[must_use]
    pub fn transaction(&self, index: usize) -> Option<TransactionMock> {
        self.records.lock().get(index).cloned()
    }

    /// Returns handles to all transactions in the order they were begun.
    #[must_use]
    pub fn transactions(&self) -> Vec<TransactionMock> {
        self.records.lock().clone()
    }

    /// Appends a new transaction and returns a handle to it.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::PreviousTransactionNotClosed`] if the ledger
    /// enforces closing and the most recent transaction was not disposed.
    /// Nothing is appended in that case.
    pub fn begin_transaction(&self) -> MockResult<TransactionMock> {
        let mut records = self.records.lock();

        if self.config.ensure_previous_transaction_is_closed {
            if let Some(previous) = records.last() {
                if !previous.is_disposed() {
                    let last_index = records.len() - 1;
                    let err = MockError::PreviousTransactionNotClosed {
                        offending: Ordinal::from_index(last_index),
                        next: Ordinal::from_index(last_index + 1),
                    };
                    debug!(%err, "rejected begin_transaction");
                    return Err(err);
                }
            }
        }

        let transaction = TransactionMock::new();
        records.push(transaction.clone());
        trace!(count = records.len(), "transaction begun");
        Ok(transaction)
    }

    /// Checks that every transaction was committed exactly once.
    ///
    /// # Errors
    ///
    /// - [`MockError::NoTransactionsStarted`] if the ledger is empty
    /// - [`MockError::TransactionNotCommitted`] for a transaction without commit
    /// - [`MockError::TransactionCommittedTooOften`] for a repeated commit
    pub fn all_transactions_must_be_committed(&self) -> MockResult<()> {
        self.verify(Selection::All, TransactionMock::check_committed)
    }

    /// Checks that every transaction except the most recent one was committed
    /// exactly once.
    ///
    /// The most recent transaction is not inspected at all, so a ledger with a
    /// single transaction always passes.
    ///
    /// # Errors
    ///
    /// Same as [`Self::all_transactions_must_be_committed`].
    pub fn all_transactions_except_last_must_be_committed(&self) -> MockResult<()> {
        self.verify(Selection::AllExceptLast, TransactionMock::check_committed)
    }

    /// Checks that the transactions at the given 0-based indexes were
    /// committed exactly once.
    ///
    /// Indexes beyond the end of the ledger select nothing.
    ///
    /// # Errors
    ///
    /// - [`MockError::InvalidArgument`] if `indexes` is empty
    /// - otherwise the same as [`Self::all_transactions_must_be_committed`]
    pub fn transactions_with_indexes_must_be_committed(&self, indexes: &[usize]) -> MockResult<()> {
        ensure_indexes(indexes)?;
        self.verify(Selection::Indexes(indexes), TransactionMock::check_committed)
    }

    /// Checks that every transaction was rolled back, i.e. disposed without
    /// any commit.
    ///
    /// # Errors
    ///
    /// - [`MockError::NoTransactionsStarted`] if the ledger is empty
    /// - [`MockError::TransactionShouldHaveRolledBack`] for a committed one
    /// - [`MockError::TransactionNotRolledBack`] for an undisposed one
    pub fn all_transactions_must_be_rolled_back(&self) -> MockResult<()> {
        self.verify(Selection::All, TransactionMock::check_rolled_back)
    }

    /// Checks that the transactions at the given 0-based indexes were rolled
    /// back.
    ///
    /// # Errors
    ///
    /// - [`MockError::InvalidArgument`] if `indexes` is empty
    /// - otherwise the same as [`Self::all_transactions_must_be_rolled_back`]
    pub fn transactions_with_indexes_must_be_rolled_back(
        &self,
        indexes: &[usize],
    ) -> MockResult<()> {
        ensure_indexes(indexes)?;
        self.verify(Selection::Indexes(indexes), TransactionMock::check_rolled_back)
    }

    /// Checks that the most recent transaction was rolled back.
    ///
    /// # Errors
    ///
    /// Same as [`Self::all_transactions_must_be_rolled_back`].
    pub fn last_transaction_must_be_rolled_back(&self) -> MockResult<()> {
        self.verify(Selection::Last, TransactionMock::check_rolled_back)
    }

    /// Checks that every transaction was disposed.
    ///
    /// An empty ledger passes: a session that never began a transaction has
    /// nothing left open.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::TransactionNotDisposed`] for the first undisposed
    /// transaction.
    pub fn all_transactions_must_be_disposed(&self) -> MockResult<()> {
        let records = self.records.lock();
        records
            .iter()
            .enumerate()
            .try_for_each(|(index, record)| record.check_disposed(Ordinal::from_index(index)))
            .inspect_err(|err| debug!(%err, "transaction verification failed"))
    }

    fn verify(
        &self,
        selection: Selection<'_>,
        check: fn(&TransactionMock, Ordinal) -> MockResult<()>,
    ) -> MockResult<()> {
        let records = self.records.lock();
        if records.is_empty() {
            return Err(MockError::NoTransactionsStarted);
        }

        let len = records.len();
        records
            .iter()
            .enumerate()
            .filter(|(index, _)| selection.includes(*index, len))
            .try_for_each(|(index, record)| check(record, Ordinal::from_index(index)))
            .inspect_err(|err| debug!(%err, ?selection, "transaction verification failed"))
    }
}

impl Default for TransactionLedger {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}

fn ensure_indexes(indexes: &[usize]) -> MockResult<()> {
    if indexes.is_empty() {
        return Err(MockError::invalid_argument(
            "at least one transaction index must be given",
        ));
    }
    Ok(())
}
