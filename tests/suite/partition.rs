//! Rosters partition the participants evenly for every supported configuration.

use std::collections::BTreeSet;

use teamgen_engine::{AssignmentOutcome, GroupCount, GroupLabel, RunState, assign_next, initialize};

use crate::common::{all_participants, count, run_to_completion, seeded};

#[test]
fn every_valid_configuration_partitions_evenly() {
    for group_count in GroupCount::ALL {
        for multiple in 1..=8 {
            let participants = group_count.get() * multiple;
            let mut state = initialize(group_count, count(participants)).unwrap();
            let mut rng = seeded(u64::from(participants));

            let placed = run_to_completion(&mut state, &mut rng);
            assert_eq!(placed, participants);

            for roster in state.rosters() {
                assert_eq!(roster.len(), multiple as usize, "{group_count} groups");
            }
            assert_eq!(
                all_participants(&state),
                (1..=participants).collect::<BTreeSet<u32>>(),
                "{group_count} groups, {participants} participants"
            );
        }
    }
}

#[test]
fn never_assigns_to_a_full_group() {
    let mut state = initialize(GroupCount::Four, count(12)).unwrap();
    let mut rng = seeded(2024);

    loop {
        let before: Vec<(GroupLabel, usize)> = state
            .rosters()
            .iter()
            .map(|roster| (roster.label(), roster.len()))
            .collect();
        match assign_next(&mut state, &mut rng) {
            AssignmentOutcome::Assigned { label, .. } => {
                let (_, len) = before
                    .iter()
                    .find(|(l, _)| *l == label)
                    .copied()
                    .unwrap();
                assert!(len < state.capacity(), "{label} was already full");
            }
            AssignmentOutcome::Complete => break,
        }
        assert!(state.rosters().iter().all(|r| r.len() <= state.capacity()));
    }
}

#[test]
fn extra_calls_after_completion_do_not_mutate() {
    let mut state = initialize(GroupCount::Three, count(9)).unwrap();
    let mut rng = seeded(1);
    run_to_completion(&mut state, &mut rng);

    let finished: RunState = state.clone();
    for _ in 0..5 {
        assert_eq!(assign_next(&mut state, &mut rng), AssignmentOutcome::Complete);
    }
    assert_eq!(state, finished);
}

#[test]
fn three_by_nine_scenario() {
    let mut state = initialize(GroupCount::Three, count(9)).unwrap();
    assert_eq!(state.capacity(), 3);
    let mut rng = seeded(99);

    for expected in 1..=9 {
        let outcome = assign_next(&mut state, &mut rng);
        assert!(
            matches!(outcome, AssignmentOutcome::Assigned { participant, .. } if participant == expected),
            "call {expected} returned {outcome:?}"
        );
    }

    assert!(state.rosters().iter().all(|roster| roster.len() == 3));
    assert_eq!(all_participants(&state), (1..=9).collect::<BTreeSet<u32>>());
    assert_eq!(assign_next(&mut state, &mut rng), AssignmentOutcome::Complete);
}

#[test]
fn rosters_keep_reveal_order() {
    let mut state = initialize(GroupCount::Four, count(16)).unwrap();
    let mut rng = seeded(5);
    run_to_completion(&mut state, &mut rng);

    for roster in state.rosters() {
        assert!(
            roster.participants().windows(2).all(|w| w[0] < w[1]),
            "{} roster out of order",
            roster.label()
        );
    }
}

#[test]
fn uneven_configurations_are_rejected() {
    let err = initialize(GroupCount::Three, count(10)).unwrap_err();
    assert_eq!(err.divisor, 3);

    let state = initialize(GroupCount::Four, count(8)).unwrap();
    assert_eq!(state.capacity(), 2);

    for participants in [1, 2, 5, 7, 11] {
        assert!(initialize(GroupCount::Three, count(participants)).is_err());
    }
    for participants in [2, 6, 10, 13] {
        assert!(initialize(GroupCount::Four, count(participants)).is_err());
    }
}
