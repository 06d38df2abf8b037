//! Property tests for counters and the transaction ledger.

use proptest::prelude::*;
use sessionmock_core::{
    CallCounter, DisposableMock, ExpectedCalls, LedgerConfig, MockError, Ordinal,
    TransactionalMock, TransactionalSessionMock,
};
use sessionmock_testkit::scenarios;
use sessionmock_testkit::{
    disposed_plan_strategy, fault_position_strategy, init_test_logging, plan_sequence_strategy,
    session_with_config, session_with_plans, transaction_plan_strategy, PropTestConfig,
    TransactionPlan,
};

/// First plan violating `accepts`, as the ledger would report it.
fn first_violation(
    plans: &[TransactionPlan],
    accepts: impl Fn(&TransactionPlan) -> bool,
) -> Option<(Ordinal, TransactionPlan)> {
    plans
        .iter()
        .enumerate()
        .find(|(_, plan)| !accepts(*plan))
        .map(|(index, plan)| (Ordinal::from_index(index), *plan))
}

fn expected_commit_error(ordinal: Ordinal, plan: TransactionPlan) -> MockError {
    if plan.commits == 0 {
        MockError::TransactionNotCommitted { ordinal }
    } else {
        MockError::TransactionCommittedTooOften {
            ordinal,
            count: plan.commits,
        }
    }
}

fn expected_rollback_error(ordinal: Ordinal, plan: TransactionPlan) -> MockError {
    if plan.commits != 0 {
        MockError::TransactionShouldHaveRolledBack { ordinal }
    } else {
        MockError::TransactionNotRolledBack { ordinal }
    }
}

#[test]
fn empty_ledger_reports_no_transactions() {
    init_test_logging();
    let session = TransactionalSessionMock::new();
    assert_eq!(
        session.all_transactions_must_be_committed().unwrap_err(),
        MockError::NoTransactionsStarted
    );
    assert_eq!(
        session.all_transactions_must_be_committed().unwrap_err().to_string(),
        "No transactions were started."
    );
}

#[test]
fn three_transactions_second_uncommitted() {
    let session = scenarios::session_with_uncommitted(3, 1);
    let err = session.all_transactions_must_be_committed().unwrap_err();
    assert_eq!(
        err,
        MockError::TransactionNotCommitted {
            ordinal: Ordinal::new(2)
        }
    );
    assert_eq!(err.to_string(), "The 2nd transaction was not committed.");
}

proptest! {
    #![proptest_config(PropTestConfig::default().to_proptest_config())]

    #[test]
    fn exactly_once_iff_single_call(calls in 0u32..64) {
        let counter = CallCounter::new("commit");
        for _ in 0..calls {
            counter.increment().unwrap();
        }

        let result = counter.must_have_been_called_exactly_once();
        if calls == 1 {
            prop_assert!(result.is_ok());
        } else {
            let err = result.unwrap_err();
            prop_assert_eq!(
                &err,
                &MockError::unexpected_call_count("commit", ExpectedCalls::ExactlyOnce, calls)
            );
            let expected_message = format!(
                "commit must have been called exactly once, but it was called {} times.",
                calls
            );
            prop_assert_eq!(err.to_string(), expected_message);
        }
    }

    #[test]
    fn undisposed_previous_transaction_names_both_ordinals(
        (len, index) in fault_position_strategy(24),
    ) {
        let session = TransactionalSessionMock::new();
        for i in 0..=index {
            let transaction = session.begin_transaction().unwrap();
            transaction.commit().unwrap();
            if i != index {
                transaction.dispose().unwrap();
            }
        }

        let err = session.begin_transaction().unwrap_err();
        prop_assert_eq!(
            err,
            MockError::PreviousTransactionNotClosed {
                offending: Ordinal::new(index + 1),
                next: Ordinal::new(index + 2),
            }
        );
        prop_assert_eq!(session.ledger().len(), index + 1);

        session.ledger().transaction(index).unwrap().dispose().unwrap();
        for _ in index + 1..len {
            let transaction = session.begin_transaction().unwrap();
            transaction.commit().unwrap();
            transaction.dispose().unwrap();
        }
        prop_assert_eq!(session.ledger().len(), len);
        prop_assert!(session.all_transactions_must_be_committed().is_ok());
    }

    #[test]
    fn single_uncommitted_transaction_is_named((len, index) in fault_position_strategy(24)) {
        let session = scenarios::session_with_uncommitted(len, index);
        prop_assert_eq!(
            session.all_transactions_must_be_committed().unwrap_err(),
            MockError::TransactionNotCommitted { ordinal: Ordinal::from_index(index) }
        );
    }

    #[test]
    fn repeated_commit_reports_count(
        (len, index) in fault_position_strategy(24),
        commits in 2u32..10,
    ) {
        let session = scenarios::session_with_repeated_commit(len, index, commits);
        prop_assert_eq!(
            session.all_transactions_must_be_committed().unwrap_err(),
            MockError::TransactionCommittedTooOften {
                ordinal: Ordinal::from_index(index),
                count: commits,
            }
        );
    }

    #[test]
    fn single_transaction_except_last_always_passes(plan in transaction_plan_strategy()) {
        let session = session_with_plans(&[plan]);
        prop_assert!(session.all_transactions_except_last_must_be_committed().is_ok());
    }

    #[test]
    fn committed_round_trip(count in 1usize..40) {
        let session = scenarios::committed_session(count);
        prop_assert!(session.all_transactions_must_be_committed().is_ok());
        prop_assert!(session.must_be_disposed().is_ok());
    }

    #[test]
    fn commit_checks_report_first_violation(plans in plan_sequence_strategy(1, 12)) {
        let session = session_with_plans(&plans);

        let expected = first_violation(&plans, TransactionPlan::is_committed_once)
            .map(|(ordinal, plan)| expected_commit_error(ordinal, plan));
        prop_assert_eq!(session.all_transactions_must_be_committed().err(), expected);

        let except_last = &plans[..plans.len() - 1];
        let expected = first_violation(except_last, TransactionPlan::is_committed_once)
            .map(|(ordinal, plan)| expected_commit_error(ordinal, plan));
        prop_assert_eq!(
            session.all_transactions_except_last_must_be_committed().err(),
            expected
        );
    }

    #[test]
    fn rollback_checks_report_first_violation(plans in plan_sequence_strategy(1, 12)) {
        let session = session_with_plans(&plans);

        let expected = first_violation(&plans, TransactionPlan::is_rolled_back)
            .map(|(ordinal, plan)| expected_rollback_error(ordinal, plan));
        prop_assert_eq!(session.all_transactions_must_be_rolled_back().err(), expected);

        let last_index = plans.len() - 1;
        let last = plans[last_index];
        let expected = (!last.is_rolled_back())
            .then(|| expected_rollback_error(Ordinal::from_index(last_index), last));
        prop_assert_eq!(session.last_transaction_must_be_rolled_back().err(), expected);
    }

    #[test]
    fn indexed_checks_only_see_selected_transactions(
        plans in plan_sequence_strategy(1, 12),
        indexes in prop::collection::vec(0usize..16, 1..6),
    ) {
        let session = session_with_plans(&plans);

        let selected: Vec<TransactionPlan> = plans
            .iter()
            .enumerate()
            .map(|(index, plan)| {
                if indexes.contains(&index) {
                    *plan
                } else {
                    TransactionPlan::committed()
                }
            })
            .collect();
        let expected = first_violation(&selected, TransactionPlan::is_committed_once)
            .map(|(ordinal, plan)| expected_commit_error(ordinal, plan));
        prop_assert_eq!(
            session.transactions_with_indexes_must_be_committed(&indexes).err(),
            expected
        );

        let selected: Vec<TransactionPlan> = plans
            .iter()
            .enumerate()
            .map(|(index, plan)| {
                if indexes.contains(&index) {
                    *plan
                } else {
                    TransactionPlan::rolled_back()
                }
            })
            .collect();
        let expected = first_violation(&selected, TransactionPlan::is_rolled_back)
            .map(|(ordinal, plan)| expected_rollback_error(ordinal, plan));
        prop_assert_eq!(
            session.transactions_with_indexes_must_be_rolled_back(&indexes).err(),
            expected
        );
    }

    #[test]
    fn must_be_disposed_reports_first_open_transaction(plans in plan_sequence_strategy(1, 12)) {
        let session = session_with_plans(&plans);
        session.dispose().unwrap();

        let expected = first_violation(&plans, |plan| plan.disposals > 0)
            .map(|(ordinal, _)| MockError::TransactionNotDisposed { ordinal });
        prop_assert_eq!(session.must_be_disposed().err(), expected);
    }

    #[test]
    fn disposed_plans_replay_under_enforcement(
        plans in prop::collection::vec(disposed_plan_strategy(), 1..12),
    ) {
        let session = session_with_config(LedgerConfig::default(), &plans);
        prop_assert_eq!(session.ledger().len(), plans.len());
        prop_assert!(session.ledger().all_transactions_must_be_disposed().is_ok());
    }
}

proptest! {
    #![proptest_config(PropTestConfig::thorough().to_proptest_config())]

    #[test]
    #[ignore = "soak run, use --ignored"]
    fn long_ledgers_report_first_violation(plans in plan_sequence_strategy(1, 64)) {
        let session = session_with_plans(&plans);

        let expected = first_violation(&plans, TransactionPlan::is_committed_once)
            .map(|(ordinal, plan)| expected_commit_error(ordinal, plan));
        prop_assert_eq!(session.all_transactions_must_be_committed().err(), expected);

        let expected = first_violation(&plans, TransactionPlan::is_rolled_back)
            .map(|(ordinal, plan)| expected_rollback_error(ordinal, plan));
        prop_assert_eq!(session.all_transactions_must_be_rolled_back().err(), expected);
    }
}
