//! Session capabilities.

use crate::disposable::{AsyncDisposable, Disposable};
use std::future::Future;

/// A session that only reads from the data store.
///
/// Read-only sessions never write, so the only obligation the caller has is to
/// dispose them.
pub trait ReadOnlySession: Disposable {}

/// Asynchronous counterpart of [`ReadOnlySession`].
pub trait AsyncReadOnlySession: AsyncDisposable {}

/// A unit-of-work session that buffers changes until they are saved.
pub trait Session: ReadOnlySession {
    /// Persists all changes made through this session.
    ///
    /// # Errors
    ///
    /// Returns an error if the changes could not be saved.
    fn save_changes(&mut self) -> Result<(), Self::Error>;
}

/// Asynchronous counterpart of [`Session`].
pub trait AsyncSession: AsyncReadOnlySession {
    /// Persists all changes made through this session.
    ///
    /// # Errors
    ///
    /// The returned future resolves to an error if the changes could not be
    /// saved.
    fn save_changes_async(&mut self) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
