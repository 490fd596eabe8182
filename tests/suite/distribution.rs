//! Statistical checks on the draw policy.

use std::collections::HashMap;

use teamgen_engine::{AssignmentOutcome, GroupCount, GroupLabel, assign_next, initialize};

use crate::common::{count, seeded};

const RUNS: u32 = 6000;

#[test]
fn first_draw_is_uniform_across_groups() {
    let mut rng = seeded(0x7ea5);
    let mut hits: HashMap<GroupLabel, u32> = HashMap::new();

    for _ in 0..RUNS {
        let mut state = initialize(GroupCount::Three, count(9)).unwrap();
        if let AssignmentOutcome::Assigned { label, .. } = assign_next(&mut state, &mut rng) {
            *hits.entry(label).or_default() += 1;
        }
    }

    let expected = f64::from(RUNS) / 3.0;
    for label in GroupCount::Three.labels() {
        let observed = f64::from(hits.get(label).copied().unwrap_or(0));
        let deviation = (observed - expected).abs() / expected;
        assert!(deviation < 0.1, "{label}: {observed} vs {expected}");
    }
}

#[test]
fn draw_is_uniform_over_eligible_not_weighted_by_free_slots() {
    // Capacity 3. Pre-fill so Green is full, Blue has 2 free and
    // Multicolor has 3 free. Capacity weighting would favour Multicolor 3:2;
    // the uniform policy gives 1:1.
    let mut rng = seeded(0xbeef);
    let mut blue = 0u32;
    let mut multi = 0u32;

    for _ in 0..RUNS {
        let mut state = initialize(GroupCount::Three, count(9)).unwrap();
        let mut fill = Scripted(vec![0, 0, 0, 0]);
        for _ in 0..4 {
            assign_next(&mut state, &mut fill);
        }
        assert_eq!(state.roster(GroupLabel::Green).map(<[u32]>::len), Some(3));
        assert_eq!(state.roster(GroupLabel::Blue).map(<[u32]>::len), Some(1));

        match assign_next(&mut state, &mut rng) {
            AssignmentOutcome::Assigned {
                label: GroupLabel::Blue,
                ..
            } => blue += 1,
            AssignmentOutcome::Assigned {
                label: GroupLabel::Multicolor,
                ..
            } => multi += 1,
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    let ratio = f64::from(multi) / f64::from(blue);
    assert!((0.9..1.1).contains(&ratio), "multicolor/blue ratio {ratio}");
}

struct Scripted(Vec<usize>);

impl teamgen_engine::RandomSource for Scripted {
    fn pick(&mut self, _len: usize) -> usize {
        self.0.remove(0)
    }
}
