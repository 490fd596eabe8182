//! Run lifecycle state machine.
//!
//! ```text
//! NotStarted --start(ok)----------> Running
//! NotStarted --start(err)---------> NotStarted   (ConfigError returned)
//! Running    --assign_next--------> Running      (eligible groups remain)
//! Running    --assign_next--------> Finished     (Complete)
//! Finished   --assign_next--------> Finished     (Complete, no-op)
//! Running | Finished --reset------> NotStarted
//! ```

use std::mem;
use std::num::NonZeroU32;

use tracing::info;

use teamgen_types::{ConfigError, GroupCount};

use crate::assignment::{AssignmentOutcome, RandomSource, RunState, assign_next, initialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Running,
    Finished,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    NotStarted,
    Running(RunState),
    Finished(RunState),
}

/// A session equal to one that was never started.
#[must_use]
pub fn reset() -> Session {
    Session::NotStarted
}

impl Session {
    /// Start a run. On error the session is left as it was.
    pub fn start(
        &mut self,
        group_count: GroupCount,
        participant_count: NonZeroU32,
    ) -> Result<(), ConfigError> {
        let state = initialize(group_count, participant_count)?;
        info!(
            groups = group_count.get(),
            participants = participant_count.get(),
            capacity = state.capacity(),
            "Run started"
        );
        *self = Session::Running(state);
        Ok(())
    }

    /// Advance the run by one participant.
    ///
    /// Returns `None` when no run has been started; callers are expected not
    /// to do that, but it is not an error.
    pub fn assign_next<R>(&mut self, rng: &mut R) -> Option<AssignmentOutcome>
    where
        R: RandomSource + ?Sized,
    {
        let outcome = match self {
            Session::NotStarted => return None,
            Session::Finished(_) => return Some(AssignmentOutcome::Complete),
            Session::Running(state) => assign_next(state, rng),
        };

        if outcome == AssignmentOutcome::Complete
            && let Session::Running(state) = mem::take(self)
        {
            info!(participants = state.assigned(), "Run finished");
            *self = Session::Finished(state);
        }
        Some(outcome)
    }

    pub fn reset(&mut self) {
        if !matches!(self, Session::NotStarted) {
            info!("Run reset");
        }
        *self = reset();
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        match self {
            Session::NotStarted => Phase::NotStarted,
            Session::Running(_) => Phase::Running,
            Session::Finished(_) => Phase::Finished,
        }
    }

    #[must_use]
    pub fn run(&self) -> Option<&RunState> {
        match self {
            Session::NotStarted => None,
            Session::Running(state) | Session::Finished(state) => Some(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn count(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn default_is_not_started() {
        let session = Session::default();
        assert_eq!(session.phase(), Phase::NotStarted);
        assert!(session.run().is_none());
        assert_eq!(session, reset());
    }

    #[test]
    fn invalid_start_stays_not_started() {
        let mut session = Session::default();
        let err = session.start(GroupCount::Three, count(10)).unwrap_err();
        assert_eq!(err.divisor, 3);
        assert_eq!(session.phase(), Phase::NotStarted);
    }

    #[test]
    fn assign_before_start_is_a_no_op() {
        let mut session = Session::default();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(session.assign_next(&mut rng), None);
        assert_eq!(session, Session::NotStarted);
    }

    #[test]
    fn runs_to_finished_and_stays_there() {
        let mut session = Session::default();
        let mut rng = StdRng::seed_from_u64(3);
        session.start(GroupCount::Four, count(8)).unwrap();
        assert_eq!(session.phase(), Phase::Running);

        for _ in 0..8 {
            assert!(matches!(
                session.assign_next(&mut rng),
                Some(AssignmentOutcome::Assigned { .. })
            ));
            assert_eq!(session.phase(), Phase::Running);
        }

        assert_eq!(
            session.assign_next(&mut rng),
            Some(AssignmentOutcome::Complete)
        );
        assert_eq!(session.phase(), Phase::Finished);

        let finished = session.clone();
        assert_eq!(
            session.assign_next(&mut rng),
            Some(AssignmentOutcome::Complete)
        );
        assert_eq!(session, finished);
        assert_eq!(session.run().map(RunState::assigned), Some(8));
    }

    #[test]
    fn reset_matches_fresh_session() {
        let mut rng = StdRng::seed_from_u64(11);

        let mut running = Session::default();
        running.start(GroupCount::Three, count(6)).unwrap();
        running.assign_next(&mut rng);
        running.reset();
        assert_eq!(running, Session::default());

        let mut finished = Session::default();
        finished.start(GroupCount::Three, count(3)).unwrap();
        while finished.phase() != Phase::Finished {
            finished.assign_next(&mut rng);
        }
        finished.reset();
        assert_eq!(finished, Session::default());
    }
}
