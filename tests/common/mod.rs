//! Shared test utilities and fixtures

#![allow(dead_code)]

use std::collections::BTreeSet;
use std::num::NonZeroU32;

use rand::SeedableRng;
use rand::rngs::StdRng;
use teamgen_engine::{AssignmentOutcome, RunState, assign_next};

pub fn count(n: u32) -> NonZeroU32 {
    NonZeroU32::new(n).expect("test counts are non-zero")
}

pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Drive a run until the engine reports `Complete`, returning how many
/// participants were placed.
pub fn run_to_completion(state: &mut RunState, rng: &mut StdRng) -> u32 {
    let mut placed = 0;
    while let AssignmentOutcome::Assigned { .. } = assign_next(state, rng) {
        placed += 1;
    }
    placed
}

/// Every participant index across all rosters, asserting there are no duplicates.
pub fn all_participants(state: &RunState) -> BTreeSet<u32> {
    let mut seen = BTreeSet::new();
    for roster in state.rosters() {
        for &p in roster.participants() {
            assert!(seen.insert(p), "participant {p} placed twice");
        }
    }
    seen
}
