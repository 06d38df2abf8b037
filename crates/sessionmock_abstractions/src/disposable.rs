//! Resource release capabilities.

use std::future::Future;

/// Root of every capability: the error type a data-access operation reports.
///
/// Sync and async capabilities share this error so that a type implementing
/// both does not end up with two competing `Error` types.
pub trait DataAccess {
    /// Error reported by the operations of this resource.
    type Error: std::error::Error + Send + Sync + 'static;
}

/// A resource that must be released explicitly.
///
/// `Drop` cannot report failures, so sessions and transactions expose an
/// explicit, fallible release operation instead.
///
/// # Invariants
///
/// - Calling `dispose` more than once is allowed; implementations decide
///   whether later calls are no-ops
pub trait Disposable: DataAccess {
    /// Releases the resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource could not be released.
    fn dispose(&mut self) -> Result<(), Self::Error>;
}

/// Asynchronous counterpart of [`Disposable`].
pub trait AsyncDisposable: DataAccess {
    /// Releases the resource asynchronously.
    ///
    /// # Errors
    ///
    /// The returned future resolves to an error if the resource could not be
    /// released.
    fn dispose_async(&mut self) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
