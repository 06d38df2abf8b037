//! Session factory mocks.
//!
//! Both factories hand out clones of one pre-supplied session and count how
//! often they did so. Session mocks are handles to shared state, so every
//! "opened" session is the same instance the test holds.

use crate::counter::{CallCounter, DisposalCounter};
use crate::error::{MockError, MockResult};
use crate::verify::DisposableMock;
use sessionmock_abstractions::{AsyncDisposable, DataAccess, Disposable, SessionFactory};
use std::borrow::Cow;
use std::future::{self, Future};
use std::sync::Arc;
use tracing::trace;

/// Name of the operation counted by [`SessionFactoryMock`].
pub const OPEN_SESSION: &str = "open_session";

/// Name of the operation counted by [`DelegateSessionFactoryMock`].
pub const CREATE_SESSION: &str = "create_session";

#[derive(Debug)]
struct SessionSource<S> {
    session: S,
    opened: CallCounter,
}

impl<S: Clone> SessionSource<S> {
    fn new(session: S, operation: impl Into<Cow<'static, str>>) -> Self {
        Self {
            session,
            opened: CallCounter::new(operation),
        }
    }

    fn open(&self) -> MockResult<S> {
        self.opened.increment()?;
        trace!(operation = self.opened.operation(), "session handed out");
        Ok(self.session.clone())
    }

    fn must_have_been_called(&self) -> MockResult<()> {
        self.opened.must_have_been_called_exactly_once()
    }

    fn must_not_have_been_called(&self) -> MockResult<()> {
        self.opened.must_not_have_been_called()
    }
}

/// Mock for a [`SessionFactory`] that always opens the same session.
///
/// # Example
///
/// ```rust
/// use sessionmock_abstractions::SessionFactory;
/// use sessionmock_core::{SessionFactoryMock, SessionMock};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let session = SessionMock::new();
/// let factory = SessionFactoryMock::new(session.clone());
///
/// let opened = factory.open_session().await.unwrap();
/// assert!(opened.ptr_eq(&session));
/// factory.open_session_must_have_been_called().unwrap();
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SessionFactoryMock<S> {
    source: Arc<SessionSource<S>>,
    disposal: Arc<DisposalCounter>,
}

impl<S: Clone> SessionFactoryMock<S> {
    /// Creates a factory that hands out clones of `session`.
    pub fn new(session: S) -> Self {
        Self {
            source: Arc::new(SessionSource::new(session, OPEN_SESSION)),
            disposal: Arc::new(DisposalCounter::new()),
        }
    }

    /// Returns the session handed out by this factory.
    #[must_use]
    pub fn session(&self) -> &S {
        &self.source.session
    }

    /// Returns how often a session was opened.
    #[must_use]
    pub fn open_session_count(&self) -> u32 {
        self.source.opened.count()
    }

    /// Checks that a session was opened exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::UnexpectedCallCount`] otherwise.
    pub fn open_session_must_have_been_called(&self) -> MockResult<&Self> {
        self.source.must_have_been_called()?;
        Ok(self)
    }

    /// Checks that no session was opened.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::UnexpectedCallCount`] otherwise.
    pub fn open_session_must_not_have_been_called(&self) -> MockResult<&Self> {
        self.source.must_not_have_been_called()?;
        Ok(self)
    }

    /// Records one disposal of the factory.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::Overflow`] if the counter is exhausted.
    pub fn dispose(&self) -> MockResult<()> {
        self.disposal.dispose()
    }
}

impl<S> DisposableMock for SessionFactoryMock<S> {
    fn disposal(&self) -> &DisposalCounter {
        &self.disposal
    }
}

impl<S> DataAccess for SessionFactoryMock<S> {
    type Error = MockError;
}

impl<S: Clone + Send + Sync> SessionFactory for SessionFactoryMock<S> {
    type Session = S;

    fn open_session(&self) -> impl Future<Output = MockResult<S>> + Send {
        future::ready(self.source.open())
    }
}

impl<S> Disposable for SessionFactoryMock<S> {
    fn dispose(&mut self) -> MockResult<()> {
        self.disposal.dispose()
    }
}

impl<S> AsyncDisposable for SessionFactoryMock<S> {
    fn dispose_async(&mut self) -> impl Future<Output = MockResult<()>> + Send {
        future::ready(self.disposal.dispose())
    }
}

/// Mock for a plain session constructor such as `Fn() -> Session`.
///
/// Code that takes a closure instead of a [`SessionFactory`] receives
/// [`DelegateSessionFactoryMock::create_session`]; the mock counts its calls.
#[derive(Debug, Clone)]
pub struct DelegateSessionFactoryMock<S> {
    source: Arc<SessionSource<S>>,
    disposal: Arc<DisposalCounter>,
}

impl<S> DelegateSessionFactoryMock<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Creates a factory whose delegate returns clones of `session`.
    pub fn new(session: S) -> Self {
        Self {
            source: Arc::new(SessionSource::new(session, CREATE_SESSION)),
            disposal: Arc::new(DisposalCounter::new()),
        }
    }

    /// Returns the session handed out by the delegate.
    #[must_use]
    pub fn session(&self) -> &S {
        &self.source.session
    }

    /// Returns a delegate that hands out the session and counts each call.
    ///
    /// The delegate shares its counter with this mock and may outlive it.
    pub fn create_session(&self) -> impl Fn() -> MockResult<S> + Send + Sync + 'static {
        let source = Arc::clone(&self.source);
        move || source.open()
    }

    /// Returns how often the delegate was called.
    #[must_use]
    pub fn create_session_count(&self) -> u32 {
        self.source.opened.count()
    }

    /// Checks that the delegate was called exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::UnexpectedCallCount`] otherwise.
    pub fn create_session_must_have_been_called(&self) -> MockResult<&Self> {
        self.source.must_have_been_called()?;
        Ok(self)
    }

    /// Checks that the delegate was never called.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::UnexpectedCallCount`] otherwise.
    pub fn create_session_must_not_have_been_called(&self) -> MockResult<&Self> {
        self.source.must_not_have_been_called()?;
        Ok(self)
    }

    /// Records one disposal of the factory.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::Overflow`] if the counter is exhausted.
    pub fn dispose(&self) -> MockResult<()> {
        self.disposal.dispose()
    }
}

impl<S> DisposableMock for DelegateSessionFactoryMock<S> {
    fn disposal(&self) -> &DisposalCounter {
        &self.disposal
    }
}

impl<S> DataAccess for DelegateSessionFactoryMock<S> {
    type Error = MockError;
}

impl<S> Disposable for DelegateSessionFactoryMock<S> {
    fn dispose(&mut self) -> MockResult<()> {
        self.disposal.dispose()
    }
}

impl<S> AsyncDisposable for DelegateSessionFactoryMock<S> {
    fn dispose_async(&mut self) -> impl Future<Output = MockResult<()>> + Send {
        future::ready(self.disposal.dispose())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionMock;

    #[test]
    fn session_is_retrievable() {
        let session = SessionMock::new();
        let factory = SessionFactoryMock::new(session.clone());
        assert!(factory.session().ptr_eq(&session));
        assert!(factory.open_session_must_not_have_been_called().is_ok());
    }

    #[test]
    fn factory_reports_missing_disposal() {
        let factory = SessionFactoryMock::new(SessionMock::new());
        assert_eq!(
            factory.must_be_disposed().unwrap_err().to_string(),
            "\"SessionFactoryMock\" was not disposed"
        );
        factory.dispose().unwrap();
        assert!(factory.must_be_disposed().is_ok());
    }

    #[test]
    fn delegate_factory_reports_missing_disposal() {
        let factory = DelegateSessionFactoryMock::new(SessionMock::new());
        let create_session = factory.create_session();
        create_session().unwrap();

        assert_eq!(
            factory.must_be_disposed().unwrap_err().to_string(),
            "\"DelegateSessionFactoryMock\" was not disposed"
        );

        let mut handed_out = factory.clone();
        Disposable::dispose(&mut handed_out).unwrap();
        factory
            .must_be_disposed()
            .and_then(|f| f.create_session_must_have_been_called())
            .unwrap();
        assert_eq!(factory.dispose_count(), 1);
    }

    #[test]
    fn delegate_returns_the_same_session() {
        for calls in [1u32, 5, 17] {
            let session = SessionMock::new();
            let factory = DelegateSessionFactoryMock::new(session.clone());
            let create_session = factory.create_session();

            for call in 1..=calls {
                let created = create_session().unwrap();
                assert!(created.ptr_eq(&session));
                assert_eq!(factory.create_session_count(), call);
            }
        }
    }

    #[test]
    fn delegate_call_count_assertions() {
        let factory = DelegateSessionFactoryMock::new(SessionMock::new());
        assert!(factory.create_session_must_not_have_been_called().is_ok());

        let create_session = factory.create_session();
        create_session().unwrap();
        assert!(factory.create_session_must_have_been_called().is_ok());

        create_session().unwrap();
        assert_eq!(
            factory
                .create_session_must_have_been_called()
                .unwrap_err()
                .to_string(),
            "create_session must have been called exactly once, but it was called 2 times."
        );
    }
}
