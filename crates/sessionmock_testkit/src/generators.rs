//! Property-based test generators using proptest.
//!
//! Provides strategies for transaction plans and ledger shapes.

use crate::fixtures::TransactionPlan;
use proptest::prelude::*;

/// Strategy for an arbitrary plan: up to 3 commits and up to 2 disposals.
pub fn transaction_plan_strategy() -> impl Strategy<Value = TransactionPlan> {
    (0u32..4, 0u32..3).prop_map(|(commits, disposals)| TransactionPlan::new(commits, disposals))
}

/// Strategy for a plan whose transaction is disposed at least once.
pub fn disposed_plan_strategy() -> impl Strategy<Value = TransactionPlan> {
    (0u32..4, 1u32..3).prop_map(|(commits, disposals)| TransactionPlan::new(commits, disposals))
}

/// Strategy for a sequence of arbitrary plans, at least `min_plans` long and
/// shorter than `max_plans`.
pub fn plan_sequence_strategy(
    min_plans: usize,
    max_plans: usize,
) -> impl Strategy<Value = Vec<TransactionPlan>> {
    prop::collection::vec(transaction_plan_strategy(), min_plans..max_plans)
}

/// Strategy for a ledger length in `1..=max_len` together with one index
/// inside it.
///
/// A `max_len` of zero is treated as one.
pub fn fault_position_strategy(max_len: usize) -> impl Strategy<Value = (usize, usize)> {
    (1..=max_len.max(1)).prop_flat_map(|len| (Just(len), 0..len))
}

/// Case budget for the ledger property tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropTestConfig {
    /// Number of generated ledgers per property.
    pub cases: u32,
    /// Upper bound on shrinking steps after a failure.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self::new(256, 1_000)
    }
}

impl PropTestConfig {
    /// Creates a budget with explicit limits.
    #[must_use]
    pub const fn new(cases: u32, max_shrink_iters: u32) -> Self {
        Self {
            cases,
            max_shrink_iters,
        }
    }

    /// Small budget for the generator self-checks.
    #[must_use]
    pub const fn quick() -> Self {
        Self::new(32, 100)
    }

    /// Large budget for the ignored soak run
    /// (`cargo test -- --ignored`).
    #[must_use]
    pub const fn thorough() -> Self {
        Self::new(2_048, 10_000)
    }

    /// Builds the proptest runner configuration.
    #[must_use]
    pub fn to_proptest_config(self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
