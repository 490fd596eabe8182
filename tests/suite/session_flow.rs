//! Lifecycle tests: session state machine and the interactive controller.

use std::time::Duration;

use teamgen_engine::{
    App, AppSettings, AssignmentOutcome, DrawResult, FormError, GroupCount, Phase, Screen,
    Session, reset,
};

use crate::common::{count, seeded};

#[test]
fn reset_after_any_prefix_matches_fresh_session() {
    for calls in 0..=10 {
        let mut session = Session::default();
        let mut rng = seeded(calls);
        session.start(GroupCount::Three, count(9)).unwrap();
        for _ in 0..calls {
            session.assign_next(&mut rng);
        }
        session.reset();
        assert_eq!(session, Session::default(), "after {calls} calls");
        assert_eq!(session, reset());
    }
}

#[test]
fn tenth_call_finishes_the_session() {
    let mut session = Session::default();
    let mut rng = seeded(8);
    session.start(GroupCount::Three, count(9)).unwrap();

    for _ in 0..9 {
        assert!(matches!(
            session.assign_next(&mut rng),
            Some(AssignmentOutcome::Assigned { .. })
        ));
    }
    assert_eq!(session.phase(), Phase::Running);
    assert_eq!(
        session.assign_next(&mut rng),
        Some(AssignmentOutcome::Complete)
    );
    assert_eq!(session.phase(), Phase::Finished);
}

#[test]
fn restarting_after_reset_uses_new_configuration() {
    let mut session = Session::default();
    let mut rng = seeded(4);
    session.start(GroupCount::Three, count(3)).unwrap();
    session.assign_next(&mut rng);
    session.reset();

    session.start(GroupCount::Four, count(4)).unwrap();
    let run = session.run().unwrap();
    assert_eq!(run.rosters().len(), 4);
    assert_eq!(run.cursor(), 1);
}

#[test]
fn app_full_cycle_with_reveal_pacing() {
    let reveal = Duration::from_millis(2000);
    let settings = AppSettings {
        default_groups: GroupCount::Four,
        default_participants: 10,
        reveal_duration: reveal,
        ..AppSettings::default()
    };
    let mut app = App::with_rng(settings, seeded(77));

    assert!(!app.start());
    assert!(matches!(
        app.form().error(),
        Some(FormError::Uneven(err)) if err.divisor == 4
    ));

    // 10 -> 12
    app.form_mut().focus_next();
    app.form_mut().delete_char();
    app.form_mut().delete_char();
    app.form_mut().enter_char('1');
    app.form_mut().enter_char('2');
    assert!(app.start());

    for participant in 1..=12 {
        assert!(matches!(
            app.draw_next(),
            DrawResult::Revealed { participant: p, .. } if p == participant
        ));
        assert_eq!(app.draw_next(), DrawResult::Busy);
        app.advance(reveal);
    }

    assert_eq!(app.draw_next(), DrawResult::Finished);
    assert_eq!(app.screen(), Screen::Results);
    let run = app.run().unwrap();
    assert!(run.rosters().iter().all(|roster| roster.len() == 3));

    app.new_run();
    assert_eq!(app.screen(), Screen::Setup);
    assert_eq!(app.session(), &Session::default());
}
