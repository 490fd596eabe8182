//! Random group assignment.
//!
//! A run is an explicit [`RunState`] value threaded through [`initialize`] and
//! [`assign_next`]. Nothing here holds hidden state between calls, so a run can
//! be driven (and replayed) entirely by the caller and its [`RandomSource`].

use std::num::NonZeroU32;

use rand::Rng;
use rand::rngs::StdRng;
use tracing::debug;

use teamgen_types::{ConfigError, Configuration, GroupCount, GroupLabel};

/// Source of uniform indices for the group draw.
pub trait RandomSource {
    /// Returns an index in `[0, len)`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

impl RandomSource for StdRng {
    fn pick(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

/// The participants placed in one group, in reveal order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    label: GroupLabel,
    participants: Vec<u32>,
}

impl Roster {
    fn new(label: GroupLabel, capacity: usize) -> Self {
        Self {
            label,
            participants: Vec::with_capacity(capacity),
        }
    }

    #[must_use]
    pub fn label(&self) -> GroupLabel {
        self.label
    }

    #[must_use]
    pub fn participants(&self) -> &[u32] {
        &self.participants
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

/// Complete state of one assignment run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunState {
    config: Configuration,
    /// One roster per label, in label-table order.
    rosters: Vec<Roster>,
    /// 1-based index of the next participant; `participant_count + 1` once all are placed.
    cursor: u32,
}

impl RunState {
    #[must_use]
    pub fn config(&self) -> Configuration {
        self.config
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.config.capacity()
    }

    #[must_use]
    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    #[must_use]
    pub fn rosters(&self) -> &[Roster] {
        &self.rosters
    }

    #[must_use]
    pub fn roster(&self, label: GroupLabel) -> Option<&[u32]> {
        self.rosters
            .iter()
            .find(|roster| roster.label == label)
            .map(Roster::participants)
    }

    /// Number of participants placed so far.
    #[must_use]
    pub fn assigned(&self) -> u32 {
        self.cursor - 1
    }

    /// Groups that still have room, in label-table order.
    #[must_use]
    pub fn eligible_labels(&self) -> Vec<GroupLabel> {
        let capacity = self.capacity();
        self.rosters
            .iter()
            .filter(|roster| roster.len() < capacity)
            .map(Roster::label)
            .collect()
    }

    /// True once every group is at capacity.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        let capacity = self.capacity();
        self.rosters.iter().all(|roster| roster.len() >= capacity)
    }
}

/// Result of a single [`assign_next`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentOutcome {
    Assigned { label: GroupLabel, participant: u32 },
    /// Every group is full; the state was left untouched.
    Complete,
}

/// Validate the split and build an empty run.
pub fn initialize(
    group_count: GroupCount,
    participant_count: NonZeroU32,
) -> Result<RunState, ConfigError> {
    let config = Configuration::new(group_count, participant_count)?;
    let capacity = config.capacity();
    let rosters = group_count
        .labels()
        .iter()
        .map(|&label| Roster::new(label, capacity))
        .collect();

    Ok(RunState {
        config,
        rosters,
        cursor: 1,
    })
}

/// Place the next participant into a group drawn uniformly from the groups
/// that are not yet full.
///
/// Each eligible group is equally likely regardless of how many free slots it
/// has left. Once all groups are full this returns
/// [`AssignmentOutcome::Complete`] on every call without touching `state`.
pub fn assign_next<R>(state: &mut RunState, rng: &mut R) -> AssignmentOutcome
where
    R: RandomSource + ?Sized,
{
    let capacity = state.capacity();
    let eligible: Vec<usize> = state
        .rosters
        .iter()
        .enumerate()
        .filter(|(_, roster)| roster.len() < capacity)
        .map(|(idx, _)| idx)
        .collect();

    if eligible.is_empty() {
        return AssignmentOutcome::Complete;
    }

    // Out-of-range picks from a misbehaving source wrap instead of panicking.
    let pick = rng.pick(eligible.len()) % eligible.len();
    let roster = &mut state.rosters[eligible[pick]];
    let participant = state.cursor;
    roster.participants.push(participant);
    state.cursor += 1;

    debug!(
        label = roster.label.as_str(),
        participant,
        eligible = eligible.len(),
        "Assigned participant"
    );

    AssignmentOutcome::Assigned {
        label: roster.label,
        participant,
    }
}
