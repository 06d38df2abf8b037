//! # sessionmock testkit
//!
//! Test utilities for sessionmock.
//!
//! This crate provides:
//! - Transaction plans and scenario fixtures
//! - Property-based test generators using proptest
//! - Test logging setup for `tracing` output
//!
//! ## Usage
//!
//! ```rust
//! use sessionmock_testkit::prelude::*;
//!
//! let session = session_with_plans(&[TransactionPlan::committed(), TransactionPlan::rolled_back()]);
//! session
//!     .all_transactions_except_last_must_be_committed()
//!     .and_then(|s| s.last_transaction_must_be_rolled_back())
//!     .unwrap();
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod logging;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::logging::*;
    pub use sessionmock_core::prelude::*;
}

pub use fixtures::*;
pub use generators::*;
pub use logging::*;
