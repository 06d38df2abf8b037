//! Fluent verification traits.
//!
//! A test usually wraps a mock in its own session type so that it can also
//! stub the queries that session offers. Implementing the accessor of one of
//! these traits is enough for the wrapper to gain every verification, each
//! returning the wrapper itself so that checks can be chained:
//!
//! ```rust
//! use sessionmock_core::{DisposableMock, DisposalCounter, SaveChangesMock, SessionMock, CallCounter};
//!
//! #[derive(Default)]
//! struct OrderSession {
//!     mock: SessionMock,
//! }
//!
//! impl DisposableMock for OrderSession {
//!     fn disposal(&self) -> &DisposalCounter {
//!         self.mock.disposal()
//!     }
//! }
//!
//! impl SaveChangesMock for OrderSession {
//!     fn save_changes_counter(&self) -> &CallCounter {
//!         self.mock.save_changes_counter()
//!     }
//! }
//!
//! let session = OrderSession::default();
//! session.mock.save_changes().unwrap();
//! session.mock.dispose().unwrap();
//!
//! session
//!     .save_changes_must_have_been_called()
//!     .and_then(|s| s.must_be_disposed())
//!     .unwrap();
//! ```

use crate::counter::{CallCounter, DisposalCounter};
use crate::error::MockResult;
use crate::transaction::{TransactionLedger, TransactionMock};

/// Verifications for mocks that must be disposed.
pub trait DisposableMock {
    /// Returns the disposal counter of this mock.
    fn disposal(&self) -> &DisposalCounter;

    /// Returns the name used in "not disposed" messages.
    ///
    /// Defaults to the unqualified type name of the implementor.
    fn mock_name(&self) -> &str {
        short_type_name(std::any::type_name::<Self>())
    }

    /// Checks resources owned by this mock before its own disposal is
    /// checked.
    ///
    /// # Errors
    ///
    /// Returns the first failure among owned resources.
    fn dependents_must_be_disposed(&self) -> MockResult<()> {
        Ok(())
    }

    /// Returns how often this mock was disposed.
    fn dispose_count(&self) -> u32 {
        self.disposal().count()
    }

    /// Checks that this mock and every resource it owns were disposed.
    ///
    /// # Errors
    ///
    /// Returns the first undisposed resource, or
    /// [`MockError::NotDisposed`](crate::MockError::NotDisposed) for the mock
    /// itself.
    fn must_be_disposed(&self) -> MockResult<&Self> {
        self.dependents_must_be_disposed()?;
        self.disposal().must_be_disposed(self.mock_name())?;
        Ok(self)
    }
}

/// Verifications for sessions that save changes.
pub trait SaveChangesMock {
    /// Returns the counter of the save-changes operation.
    fn save_changes_counter(&self) -> &CallCounter;

    /// Returns how often changes were saved.
    fn save_changes_count(&self) -> u32 {
        self.save_changes_counter().count()
    }

    /// Checks that changes were saved exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::UnexpectedCallCount`](crate::MockError::UnexpectedCallCount)
    /// otherwise.
    fn save_changes_must_have_been_called(&self) -> MockResult<&Self> {
        self.save_changes_counter()
            .must_have_been_called_exactly_once()?;
        Ok(self)
    }

    /// Checks that changes were never saved.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::UnexpectedCallCount`](crate::MockError::UnexpectedCallCount)
    /// otherwise.
    fn save_changes_must_not_have_been_called(&self) -> MockResult<&Self> {
        self.save_changes_counter().must_not_have_been_called()?;
        Ok(self)
    }
}

/// Verifications for sessions that hand out transactions.
///
/// All checks report the first violation in ledger order. See
/// [`TransactionLedger`] for the exact rules.
pub trait TransactionalMock {
    /// Returns the ledger of transactions begun through this mock.
    fn ledger(&self) -> &TransactionLedger;

    /// Returns handles to all transactions in the order they were begun.
    fn transactions(&self) -> Vec<TransactionMock> {
        self.ledger().transactions()
    }

    /// Checks that every transaction was committed exactly once.
    ///
    /// # Errors
    ///
    /// See [`TransactionLedger::all_transactions_must_be_committed`].
    fn all_transactions_must_be_committed(&self) -> MockResult<&Self> {
        self.ledger().all_transactions_must_be_committed()?;
        Ok(self)
    }

    /// Checks that every transaction but the last was committed exactly once.
    ///
    /// # Errors
    ///
    /// See [`TransactionLedger::all_transactions_except_last_must_be_committed`].
    fn all_transactions_except_last_must_be_committed(&self) -> MockResult<&Self> {
        self.ledger()
            .all_transactions_except_last_must_be_committed()?;
        Ok(self)
    }

    /// Checks that the transactions at `indexes` were committed exactly once.
    ///
    /// # Errors
    ///
    /// See [`TransactionLedger::transactions_with_indexes_must_be_committed`].
    fn transactions_with_indexes_must_be_committed(&self, indexes: &[usize]) -> MockResult<&Self> {
        self.ledger()
            .transactions_with_indexes_must_be_committed(indexes)?;
        Ok(self)
    }

    /// Checks that every transaction was rolled back.
    ///
    /// # Errors
    ///
    /// See [`TransactionLedger::all_transactions_must_be_rolled_back`].
    fn all_transactions_must_be_rolled_back(&self) -> MockResult<&Self> {
        self.ledger().all_transactions_must_be_rolled_back()?;
        Ok(self)
    }

    /// Checks that the transactions at `indexes` were rolled back.
    ///
    /// # Errors
    ///
    /// See [`TransactionLedger::transactions_with_indexes_must_be_rolled_back`].
    fn transactions_with_indexes_must_be_rolled_back(
        &self,
        indexes: &[usize],
    ) -> MockResult<&Self> {
        self.ledger()
            .transactions_with_indexes_must_be_rolled_back(indexes)?;
        Ok(self)
    }

    /// Checks that the most recent transaction was rolled back.
    ///
    /// # Errors
    ///
    /// See [`TransactionLedger::last_transaction_must_be_rolled_back`].
    fn last_transaction_must_be_rolled_back(&self) -> MockResult<&Self> {
        self.ledger().last_transaction_must_be_rolled_back()?;
        Ok(self)
    }
}

/// Strips the module path and generic arguments from a type name.
pub(crate) fn short_type_name(full: &'static str) -> &'static str {
    let without_generics = full.split('<').next().unwrap_or(full);
    without_generics
        .rsplit("::")
        .next()
        .unwrap_or(without_generics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MockError;

    #[test]
    fn short_type_name_drops_path_and_generics() {
        assert_eq!(short_type_name("my_app::tests::OrderSession"), "OrderSession");
        assert_eq!(
            short_type_name("sessionmock_core::factory::SessionFactoryMock<alloc::sync::Arc<u8>>"),
            "SessionFactoryMock"
        );
        assert_eq!(short_type_name("u32"), "u32");
    }

    struct Connection {
        disposal: DisposalCounter,
    }

    impl DisposableMock for Connection {
        fn disposal(&self) -> &DisposalCounter {
            &self.disposal
        }
    }

    #[test]
    fn default_name_is_the_implementor() {
        let connection = Connection {
            disposal: DisposalCounter::new(),
        };
        assert_eq!(
            connection.must_be_disposed().err(),
            Some(MockError::not_disposed("Connection"))
        );

        connection.disposal.dispose().unwrap();
        assert!(std::ptr::eq(
            connection.must_be_disposed().unwrap(),
            &connection
        ));
    }
}
