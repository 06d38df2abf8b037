//! Call counters shared by all mocks.
//!
//! Counters are monotonic: they start at zero (or at an explicit value),
//! only ever grow by one, and report an error instead of wrapping around.

use crate::error::{ExpectedCalls, MockError, MockResult};
use std::borrow::Cow;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::{debug, trace};

/// Counts how often a resource was disposed.
#[derive(Debug, Default)]
pub struct DisposalCounter {
    count: AtomicU32,
}

impl DisposalCounter {
    /// Creates a counter that has not recorded any disposal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a counter that has already recorded `count` disposals.
    #[must_use]
    pub fn starting_at(count: u32) -> Self {
        Self {
            count: AtomicU32::new(count),
        }
    }

    /// Records one disposal.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::Overflow`] if the count is already `u32::MAX`.
    pub fn dispose(&self) -> MockResult<()> {
        let count = checked_increment(&self.count, "dispose")?;
        trace!(count, "dispose recorded");
        Ok(())
    }

    /// Returns the number of recorded disposals.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count.load(Ordering::SeqCst)
    }

    /// Returns true if at least one disposal was recorded.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.count() > 0
    }

    /// Checks that at least one disposal was recorded.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::NotDisposed`] naming `mock` otherwise.
    pub fn must_be_disposed(&self, mock: &str) -> MockResult<()> {
        if self.is_disposed() {
            Ok(())
        } else {
            debug!(mock, "disposal verification failed");
            Err(MockError::not_disposed(mock))
        }
    }
}

/// Counts calls to a named operation such as `commit` or `save_changes`.
#[derive(Debug)]
pub struct CallCounter {
    operation: Cow<'static, str>,
    count: AtomicU32,
}

impl CallCounter {
    /// Creates a counter for `operation` that has not recorded any call.
    pub fn new(operation: impl Into<Cow<'static, str>>) -> Self {
        Self::starting_at(operation, 0)
    }

    /// Creates a counter for `operation` that has already recorded `count`
    /// calls.
    pub fn starting_at(operation: impl Into<Cow<'static, str>>, count: u32) -> Self {
        Self {
            operation: operation.into(),
            count: AtomicU32::new(count),
        }
    }

    /// Returns the name of the counted operation.
    #[must_use]
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Returns the number of recorded calls.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count.load(Ordering::SeqCst)
    }

    /// Records one call.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::Overflow`] if the count is already `u32::MAX`.
    pub fn increment(&self) -> MockResult<()> {
        let count = checked_increment(&self.count, &self.operation)?;
        trace!(operation = %self.operation, count, "call recorded");
        Ok(())
    }

    /// Checks that exactly one call was recorded.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::UnexpectedCallCount`] carrying the actual count.
    pub fn must_have_been_called_exactly_once(&self) -> MockResult<()> {
        self.expect(ExpectedCalls::ExactlyOnce, 1)
    }

    /// Checks that no call was recorded.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::UnexpectedCallCount`] carrying the actual count.
    pub fn must_not_have_been_called(&self) -> MockResult<()> {
        self.expect(ExpectedCalls::Never, 0)
    }

    fn expect(&self, expected: ExpectedCalls, wanted: u32) -> MockResult<()> {
        let actual = self.count();
        if actual == wanted {
            return Ok(());
        }
        debug!(operation = %self.operation, actual, "call count verification failed");
        Err(MockError::unexpected_call_count(
            self.operation.as_ref(),
            expected,
            actual,
        ))
    }
}

fn checked_increment(count: &AtomicU32, counter: &str) -> MockResult<u32> {
    count
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
            current.checked_add(1)
        })
        .map(|previous| previous + 1)
        .map_err(|_| MockError::overflow(counter))
}
