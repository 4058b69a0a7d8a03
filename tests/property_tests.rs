//! Property-based tests for the resolution protocol's invariants.
//!
//! These check the ordering guarantees across many randomly generated
//! request sequences: faults never move the position, stops always
//! commit, silent denials change nothing, and the journal records every
//! attempt in order.

use proptest::prelude::*;
use turnstile::{FaultKind, Machine, Position, StopKind, Verdict};

const STATES: [&str; 4] = ["north", "east", "south", "west"];

prop_compose! {
    fn arbitrary_state()(index in 0..STATES.len()) -> &'static str {
        STATES[index]
    }
}

prop_compose! {
    fn arbitrary_targets()(targets in prop::collection::vec(arbitrary_state(), 1..40)) -> Vec<&'static str> {
        targets
    }
}

/// A machine whose rule table allows exactly the ring
/// north -> east -> south -> west -> north.
fn ring_machine() -> Machine<&'static str> {
    let mut machine = Machine::builder()
        .initial(STATES[0])
        .record_transitions(true)
        .build();
    let ring = [0usize, 1, 2, 3, 0];
    for window in ring.windows(2) {
        machine.allow(STATES[window[0]], STATES[window[1]]);
    }
    machine
}

fn full_machine(policy: impl Into<turnstile::Policy<&'static str>> + Clone) -> Machine<&'static str> {
    let mut machine = Machine::builder()
        .initial(STATES[0])
        .record_transitions(true)
        .build();
    for from in STATES {
        for to in STATES {
            machine.rule(from, to, policy.clone().into());
        }
    }
    machine
}

proptest! {
    #[test]
    fn accepted_requests_commit_and_denied_requests_stay(targets in arbitrary_targets()) {
        let mut machine = ring_machine();
        let mut expected = STATES[0];

        for target in targets {
            let before = machine.get().clone();
            let ring_next = STATES[(STATES.iter().position(|s| *s == expected).unwrap() + 1) % 4];

            match machine.set(target) {
                Ok(Verdict::Accepted) => {
                    prop_assert_eq!(target, ring_next);
                    expected = target;
                }
                Ok(Verdict::Denied) => {
                    prop_assert_ne!(target, ring_next);
                    prop_assert_eq!(machine.get(), &before);
                }
                Err(signal) => prop_assert!(false, "unexpected signal {}", signal),
            }
            prop_assert_eq!(machine.get().clone(), expected);
        }
    }

    #[test]
    fn faults_never_move_the_position(targets in arbitrary_targets()) {
        let mut machine = full_machine(FaultKind::Denied);
        let attempts = targets.len();

        for target in targets {
            let signal = machine.set(target).unwrap_err();
            prop_assert!(signal.is_fault());
            prop_assert_eq!(machine.get().clone(), STATES[0]);
        }

        let log = machine.log().unwrap();
        prop_assert_eq!(log.len(), attempts);
        prop_assert!(log.records().iter().all(|record| !record.success));
    }

    #[test]
    fn stops_always_commit_before_raising(targets in arbitrary_targets()) {
        let mut machine = full_machine(StopKind::Halt);

        for target in targets {
            let signal = machine.set(target).unwrap_err();
            prop_assert!(signal.is_stop());
            prop_assert_eq!(machine.get().clone(), target);
        }

        let log = machine.log().unwrap();
        prop_assert!(log.records().iter().all(|record| record.success));
    }

    #[test]
    fn journal_is_append_only_and_ordered(targets in arbitrary_targets()) {
        let mut machine = ring_machine();
        let mut seen: Vec<(Position<&'static str>, &'static str)> = Vec::new();

        for target in targets {
            let from = machine.get().clone();
            let _ = machine.set(target);
            seen.push((from, target));

            let log = machine.log().unwrap();
            prop_assert_eq!(log.len(), seen.len());
            for (record, (from, to)) in log.records().iter().zip(&seen) {
                prop_assert_eq!(&record.from, from);
                prop_assert_eq!(&record.to, to);
            }
        }

        let log = machine.log().unwrap();
        for pair in log.records().windows(2) {
            prop_assert!(pair[0].timestamp <= pair[1].timestamp);
        }
    }
}
