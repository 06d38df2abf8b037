//! Session factory capability.

use crate::disposable::DataAccess;
use std::future::Future;

/// Opens sessions on demand.
///
/// Long-lived services hold a factory and open a short-lived session per
/// unit of work.
pub trait SessionFactory: DataAccess {
    /// The session type this factory produces.
    type Session;

    /// Opens a new session.
    ///
    /// # Errors
    ///
    /// The returned future resolves to an error if the session could not be
    /// opened.
    fn open_session(&self) -> impl Future<Output = Result<Self::Session, Self::Error>> + Send;
}
