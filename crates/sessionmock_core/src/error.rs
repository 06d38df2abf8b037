//! Error types for mock verification.

use crate::ordinal::Ordinal;
use std::fmt;
use thiserror::Error;

/// Result type for mock operations and verifications.
pub type MockResult<T> = Result<T, MockError>;

/// How often an operation was expected to be called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedCalls {
    /// The operation must not have been called at all.
    Never,
    /// The operation must have been called exactly once.
    ExactlyOnce,
}

impl fmt::Display for ExpectedCalls {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Never => f.write_str("not have been called"),
            Self::ExactlyOnce => f.write_str("have been called exactly once"),
        }
    }
}

/// Failures reported by mocks.
///
/// Every variant is an assertion failure meant to be surfaced to the test
/// runner unchanged. The `Display` output is the message a test author sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MockError {
    /// The mock was never disposed.
    #[error("\"{mock}\" was not disposed")]
    NotDisposed {
        /// Short type name of the mock.
        mock: String,
    },

    /// An operation was called a different number of times than expected.
    #[error("{operation} must {expected}, but it was called {actual} {}", times(.actual))]
    UnexpectedCallCount {
        /// Name of the counted operation.
        operation: String,
        /// The expected number of calls.
        expected: ExpectedCalls,
        /// The recorded number of calls.
        actual: u32,
    },

    /// A transaction was begun while the previous one was still open.
    #[error("The {offending} transaction was not disposed before the {next} transaction was started.")]
    PreviousTransactionNotClosed {
        /// Position of the transaction that was left open.
        offending: Ordinal,
        /// Position the rejected transaction would have taken.
        next: Ordinal,
    },

    /// A verification needed at least one transaction, but none was begun.
    #[error("No transactions were started.")]
    NoTransactionsStarted,

    /// A transaction that should be committed was never committed.
    #[error("The {ordinal} transaction was not committed.")]
    TransactionNotCommitted {
        /// Position of the transaction.
        ordinal: Ordinal,
    },

    /// A transaction was committed more than once.
    #[error("The {ordinal} transaction was committed too often ({count} times).")]
    TransactionCommittedTooOften {
        /// Position of the transaction.
        ordinal: Ordinal,
        /// Number of recorded commits.
        count: u32,
    },

    /// A transaction that should be rolled back was committed.
    #[error("The {ordinal} transaction was committed, although it should be rolled back.")]
    TransactionShouldHaveRolledBack {
        /// Position of the transaction.
        ordinal: Ordinal,
    },

    /// A transaction that should be rolled back was never disposed.
    #[error("The {ordinal} transaction was not rolled back because it was never disposed.")]
    TransactionNotRolledBack {
        /// Position of the transaction.
        ordinal: Ordinal,
    },

    /// A transaction was never disposed.
    #[error("The {ordinal} transaction was not disposed.")]
    TransactionNotDisposed {
        /// Position of the transaction.
        ordinal: Ordinal,
    },

    /// A call counter reached its maximum value.
    #[error("call count of {counter} overflowed")]
    Overflow {
        /// Name of the counted operation.
        counter: String,
    },

    /// A verification was called with invalid arguments.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of the problem.
        message: String,
    },
}

impl MockError {
    /// Creates a not disposed error.
    pub fn not_disposed(mock: impl Into<String>) -> Self {
        Self::NotDisposed { mock: mock.into() }
    }

    /// Creates an unexpected call count error.
    pub fn unexpected_call_count(
        operation: impl Into<String>,
        expected: ExpectedCalls,
        actual: u32,
    ) -> Self {
        Self::UnexpectedCallCount {
            operation: operation.into(),
            expected,
            actual,
        }
    }

    /// Creates an overflow error.
    pub fn overflow(counter: impl Into<String>) -> Self {
        Self::Overflow {
            counter: counter.into(),
        }
    }

    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

fn times(count: &u32) -> &'static str {
    if *count == 1 {
        "time."
    } else {
        "times."
    }
}
