//! Property-based tests for action identity and effect scheduling.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated dispatch sequences.

use aftermath::core::ActionMarker;
use aftermath::effects::no_follow_up;
use aftermath::{ReplayPolicy, SideEffectReducerBuilder};
use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// One step of a generated dispatch sequence.
#[derive(Clone, Debug)]
enum Step {
    /// Dispatch a freshly allocated action
    Fresh(u8),
    /// Dispatch the previously dispatched allocation again
    Repeat,
}

prop_compose! {
    fn arbitrary_step()(fresh in any::<bool>(), value in 0..4u8) -> Step {
        if fresh { Step::Fresh(value) } else { Step::Repeat }
    }
}

fn arbitrary_replay() -> impl Strategy<Value = ReplayPolicy> {
    prop_oneof![Just(ReplayPolicy::Once), Just(ReplayPolicy::Twice)]
}

/// Resolve steps into concrete allocations, counting identity changes.
fn allocations(steps: &[Step]) -> (Vec<Arc<u8>>, usize) {
    let mut actions: Vec<Arc<u8>> = Vec::new();
    let mut distinct = 0;
    for step in steps {
        let next = match (step, actions.last()) {
            (Step::Repeat, Some(last)) => Arc::clone(last),
            (Step::Repeat, None) => {
                distinct += 1;
                Arc::new(0)
            }
            (Step::Fresh(value), _) => {
                distinct += 1;
                Arc::new(*value)
            }
        };
        actions.push(next);
    }
    (actions, distinct)
}

proptest! {
    #[test]
    fn marker_schedules_only_on_identity_change(
        pool_picks in prop::collection::vec(0..3usize, 1..30)
    ) {
        let pool: Vec<Arc<u8>> = (0..3).map(|_| Arc::new(7)).collect();
        let mut marker = ActionMarker::new();
        let mut previous: Option<usize> = None;

        for pick in pool_picks {
            let scheduled = marker.mark(&pool[pick]);
            prop_assert_eq!(scheduled, previous != Some(pick));
            previous = Some(pick);
        }
    }

    #[test]
    fn effects_run_once_per_distinct_identity(
        steps in prop::collection::vec(arbitrary_step(), 1..20),
        replay in arbitrary_replay(),
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let reduced = Arc::new(AtomicUsize::new(0));
        let effected = Arc::new(AtomicUsize::new(0));

        let reduce_counter = Arc::clone(&reduced);
        let effect_counter = Arc::clone(&effected);
        let machine = SideEffectReducerBuilder::new()
            .reducer(move |total: &u64, n: &u8| {
                reduce_counter.fetch_add(1, Ordering::SeqCst);
                total + u64::from(*n)
            })
            .effect(move |_: &u64, _: &u8| {
                effect_counter.fetch_add(1, Ordering::SeqCst);
                no_follow_up::<u8, String, ()>()
            })
            .initial_state(0)
            .runtime(runtime.handle().clone())
            .replay(replay)
            .build()
            .unwrap();

        let (actions, distinct) = allocations(&steps);
        let expected_total: u64 = actions.iter().map(|a| u64::from(**a)).sum();
        for action in actions {
            machine.dispatch_shared(action);
        }

        prop_assert_eq!(effected.load(Ordering::SeqCst), distinct);
        prop_assert_eq!(reduced.load(Ordering::SeqCst), steps.len() * replay.passes());
        prop_assert_eq!(machine.state(), expected_total);
    }

    #[test]
    fn equal_values_never_deduplicate(
        values in prop::collection::vec(0..2u8, 1..20)
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let effected = Arc::new(AtomicUsize::new(0));
        let effect_counter = Arc::clone(&effected);

        let machine = SideEffectReducerBuilder::new()
            .reducer(|count: &usize, _: &u8| count + 1)
            .effect(move |_: &usize, _: &u8| {
                effect_counter.fetch_add(1, Ordering::SeqCst);
                no_follow_up::<u8, String, ()>()
            })
            .initial_state(0)
            .runtime(runtime.handle().clone())
            .build()
            .unwrap();

        for value in &values {
            machine.dispatch(*value);
        }

        prop_assert_eq!(effected.load(Ordering::SeqCst), values.len());
        prop_assert_eq!(machine.state(), values.len());
    }
}
