//! Read-only and unit-of-work session mocks.

use crate::counter::{CallCounter, DisposalCounter};
use crate::error::{MockError, MockResult};
use crate::verify::{DisposableMock, SaveChangesMock};
use sessionmock_abstractions::{
    AsyncDisposable, AsyncReadOnlySession, AsyncSession, DataAccess, Disposable, ReadOnlySession,
    Session,
};
use std::borrow::Cow;
use std::future::{self, Future};
use std::sync::Arc;

/// Name of the save-changes operation used by [`SessionMock::new`].
pub const SAVE_CHANGES: &str = "save_changes";

/// Name of the save-changes operation used by [`SessionMock::asynchronous`].
pub const SAVE_CHANGES_ASYNC: &str = "save_changes_async";

/// Mock for a session that only reads.
///
/// Clones share their counters, so a clone handed to the code under test
/// reports back to the instance the test holds.
#[derive(Debug, Clone, Default)]
pub struct ReadOnlySessionMock {
    disposal: Arc<DisposalCounter>,
}

impl ReadOnlySessionMock {
    /// Creates a new mock that was not disposed yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one disposal.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::Overflow`] if the counter is exhausted.
    pub fn dispose(&self) -> MockResult<()> {
        self.disposal.dispose()
    }

    /// Returns true if `other` shares this mock's state.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.disposal, &other.disposal)
    }
}

impl DisposableMock for ReadOnlySessionMock {
    fn disposal(&self) -> &DisposalCounter {
        &self.disposal
    }
}

impl DataAccess for ReadOnlySessionMock {
    type Error = MockError;
}

impl Disposable for ReadOnlySessionMock {
    fn dispose(&mut self) -> MockResult<()> {
        self.disposal.dispose()
    }
}

impl AsyncDisposable for ReadOnlySessionMock {
    fn dispose_async(&mut self) -> impl Future<Output = MockResult<()>> + Send {
        future::ready(self.disposal.dispose())
    }
}

impl ReadOnlySession for ReadOnlySessionMock {}

impl AsyncReadOnlySession for ReadOnlySessionMock {}

#[derive(Debug)]
struct SessionState {
    disposal: DisposalCounter,
    save_changes: CallCounter,
}

/// Mock for a unit-of-work session that saves changes.
///
/// Sync and async saves land on the same counter; the counter's name is what
/// failure messages report, so async sessions are usually created with
/// [`SessionMock::asynchronous`].
#[derive(Debug, Clone)]
pub struct SessionMock {
    state: Arc<SessionState>,
}

impl SessionMock {
    /// Creates a mock whose save operation is reported as `save_changes`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_save_changes_name(SAVE_CHANGES)
    }

    /// Creates a mock whose save operation is reported as
    /// `save_changes_async`.
    #[must_use]
    pub fn asynchronous() -> Self {
        Self::with_save_changes_name(SAVE_CHANGES_ASYNC)
    }

    /// Creates a mock whose save operation is reported under `name`.
    pub fn with_save_changes_name(name: impl Into<Cow<'static, str>>) -> Self {
        Self::from_counters(DisposalCounter::new(), CallCounter::new(name))
    }

    fn from_counters(disposal: DisposalCounter, save_changes: CallCounter) -> Self {
        Self {
            state: Arc::new(SessionState {
                disposal,
                save_changes,
            }),
        }
    }

    /// Records one save.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::Overflow`] if the counter is exhausted.
    pub fn save_changes(&self) -> MockResult<()> {
        self.state.save_changes.increment()
    }

    /// Records one disposal.
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

impl Default for SessionMock {
    fn default() -> Self {
        Self::new()
    }
}

impl DisposableMock for SessionMock {
    fn disposal(&self) -> &DisposalCounter {
        &self.state.disposal
    }
}

impl SaveChangesMock for SessionMock {
    fn save_changes_counter(&self) -> &CallCounter {
        &self.state.save_changes
    }
}

impl DataAccess for SessionMock {
    type Error = MockError;
}

impl Disposable for SessionMock {
    fn dispose(&mut self) -> MockResult<()> {
        self.state.disposal.dispose()
    }
}

impl AsyncDisposable for SessionMock {
    fn dispose_async(&mut self) -> impl Future<Output = MockResult<()>> + Send {
        future::ready(self.state.disposal.dispose())
    }
}

impl ReadOnlySession for SessionMock {}

impl AsyncReadOnlySession for SessionMock {}

impl Session for SessionMock {
    fn save_changes(&mut self) -> MockResult<()> {
        self.state.save_changes.increment()
    }
}

impl AsyncSession for SessionMock {
    fn save_changes_async(&mut self) -> impl Future<Output = MockResult<()>> + Send {
        future::ready(self.state.save_changes.increment())
    }
}
