//! Transaction plans and scenario fixtures.
//!
//! A [`TransactionPlan`] describes what the code under test does with one
//! transaction. Replaying a list of plans against a session produces a ledger
//! in a known state, which is what most verification tests start from.

use sessionmock_abstractions::{Disposable, Transaction, TransactionalSession};
use sessionmock_core::{LedgerConfig, TransactionalSessionMock};
use tracing::debug;

/// What happens to one transaction between begin and the end of the test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionPlan {
    /// Number of commit calls.
    pub commits: u32,
    /// Number of dispose calls.
    pub disposals: u32,
}

impl TransactionPlan {
    /// Creates a plan with explicit call counts.
    #[must_use]
    pub const fn new(commits: u32, disposals: u32) -> Self {
        Self { commits, disposals }
    }

    /// Committed once, then disposed.
    #[must_use]
    pub const fn committed() -> Self {
        Self::new(1, 1)
    }

    /// Committed `commits` times, then disposed.
    #[must_use]
    pub const fn committed_times(commits: u32) -> Self {
        Self::new(commits, 1)
    }

    /// Disposed without commit.
    #[must_use]
    pub const fn rolled_back() -> Self {
        Self::new(0, 1)
    }

    /// Neither committed nor disposed.
    #[must_use]
    pub const fn abandoned() -> Self {
        Self::new(0, 0)
    }

    /// Returns true if the plan passes the "committed exactly once" check.
    #[must_use]
    pub const fn is_committed_once(&self) -> bool {
        self.commits == 1
    }

    /// Returns true if the plan passes the rollback check.
    #[must_use]
    pub const fn is_rolled_back(&self) -> bool {
        self.commits == 0 && self.disposals > 0
    }
}

/// Replays `plans` against any transactional session, in order.
///
/// # Errors
///
/// Returns the first error reported by the session or a transaction.
pub fn replay<S>(session: &mut S, plans: &[TransactionPlan]) -> Result<(), S::Error>
where
    S: TransactionalSession,
{
    debug!(plans = plans.len(), "replaying transaction plans");
    for plan in plans {
        let mut transaction = session.begin_transaction()?;
        for _ in 0..plan.commits {
            transaction.commit()?;
        }
        for _ in 0..plan.disposals {
            transaction.dispose()?;
        }
    }
    Ok(())
}

/// Creates a session mock whose ledger follows `plans`.
///
/// The session does not require previous transactions to be closed, so
/// abandoned transactions may appear anywhere. The session itself is left
/// undisposed.
pub fn session_with_plans(plans: &[TransactionPlan]) -> TransactionalSessionMock {
    session_with_config(
        LedgerConfig::new().ensure_previous_transaction_is_closed(false),
        plans,
    )
}

/// Creates a session mock with `config` whose ledger follows `plans`.
///
/// # Panics
///
/// Panics if `config` enforces closing and a plan other than the last one
/// leaves its transaction undisposed.
pub fn session_with_config(
    config: LedgerConfig,
    plans: &[TransactionPlan],
) -> TransactionalSessionMock {
    let session = TransactionalSessionMock::with_config(config);
    replay(&mut session.clone(), plans).expect("Failed to replay transaction plans");
    session
}

/// Common ledger shapes.
pub mod scenarios {
    use super::*;

    /// `count` transactions, each committed once and disposed, inside a
    /// disposed session.
    pub fn committed_session(count: usize) -> TransactionalSessionMock {
        let session = session_with_config(
            LedgerConfig::default(),
            &vec![TransactionPlan::committed(); count],
        );
        session.dispose().expect("Failed to dispose session");
        session
    }

    /// `count` committed transactions except the one at `index`, which is
    /// only disposed.
    pub fn session_with_uncommitted(count: usize, index: usize) -> TransactionalSessionMock {
        session_with_plans(&with_fault(count, index, TransactionPlan::rolled_back()))
    }

    /// `count` committed transactions except the one at `index`, which is
    /// committed `commits` times.
    pub fn session_with_repeated_commit(
        count: usize,
        index: usize,
        commits: u32,
    ) -> TransactionalSessionMock {
        session_with_plans(&with_fault(
            count,
            index,
            TransactionPlan::committed_times(commits),
        ))
    }

    fn with_fault(count: usize, index: usize, fault: TransactionPlan) -> Vec<TransactionPlan> {
        (0..count)
            .map(|i| {
                if i == index {
                    fault
                } else {
                    TransactionPlan::committed()
                }
            })
            .collect()
    }
}
