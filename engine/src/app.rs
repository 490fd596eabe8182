//! Interactive controller driven by the terminal front-end.
//!
//! `App` owns the [`Session`], the setup form, and the reveal overlay. The
//! overlay timer only gates user input; the session itself has already
//! advanced by the time a reveal is shown.

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use teamgen_types::GroupLabel;
use teamgen_types::ui::{RevealTimer, UiOptions};

use crate::assignment::{AssignmentOutcome, RunState};
use crate::config::AppSettings;
use crate::form::SetupForm;
use crate::session::{Phase, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Setup,
    Draw,
    Results,
}

/// The assignment currently on display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reveal {
    pub label: GroupLabel,
    pub participant: u32,
    pub timer: RevealTimer,
}

/// What happened when the user asked for the next draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawResult {
    Revealed { label: GroupLabel, participant: u32 },
    /// A reveal is still on screen.
    Busy,
    Finished,
    NoRun,
}

pub struct App {
    session: Session,
    form: SetupForm,
    reveal: Option<Reveal>,
    rng: StdRng,
    settings: AppSettings,
    last_frame: Instant,
    tick: usize,
    results_scroll: u16,
    results_scroll_max: u16,
    should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new(settings: AppSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => {
                info!(seed, "Using fixed draw seed");
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(settings, rng)
    }

    #[must_use]
    pub fn with_rng(settings: AppSettings, rng: StdRng) -> Self {
        Self {
            session: Session::default(),
            form: SetupForm::new(settings.default_groups, settings.default_participants),
            reveal: None,
            rng,
            settings,
            last_frame: Instant::now(),
            tick: 0,
            results_scroll: 0,
            results_scroll_max: 0,
            should_quit: false,
        }
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        match self.session.phase() {
            Phase::NotStarted => Screen::Setup,
            Phase::Running => Screen::Draw,
            Phase::Finished => Screen::Results,
        }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn run(&self) -> Option<&RunState> {
        self.session.run()
    }

    #[must_use]
    pub fn form(&self) -> &SetupForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut SetupForm {
        &mut self.form
    }

    #[must_use]
    pub fn reveal(&self) -> Option<&Reveal> {
        self.reveal.as_ref()
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.settings.ui_options
    }

    #[must_use]
    pub fn tick_count(&self) -> usize {
        self.tick
    }

    /// Participant shown in the draw header: the one on display while a
    /// reveal is open, otherwise the next one to be drawn.
    #[must_use]
    pub fn current_participant(&self) -> Option<u32> {
        if let Some(reveal) = &self.reveal {
            return Some(reveal.participant);
        }
        self.run().map(RunState::cursor)
    }

    /// Validate the form and start a run. Errors stay on the form.
    pub fn start(&mut self) -> bool {
        let parsed = self.form.parse();
        let result = parsed.and_then(|(groups, participants)| {
            self.session
                .start(groups, participants)
                .map_err(Into::into)
        });

        match result {
            Ok(()) => {
                self.form.clear_error();
                self.reveal = None;
                self.results_scroll = 0;
                true
            }
            Err(err) => {
                debug!(error = %err, "Setup rejected");
                self.form.set_error(err);
                false
            }
        }
    }

    pub fn draw_next(&mut self) -> DrawResult {
        if self.reveal.is_some() {
            return DrawResult::Busy;
        }

        match self.session.assign_next(&mut self.rng) {
            Some(AssignmentOutcome::Assigned { label, participant }) => {
                self.reveal = Some(Reveal {
                    label,
                    participant,
                    timer: RevealTimer::new(self.settings.reveal_duration),
                });
                DrawResult::Revealed { label, participant }
            }
            Some(AssignmentOutcome::Complete) => DrawResult::Finished,
            None => DrawResult::NoRun,
        }
    }

    /// Discard the run and go back to setup. Form values are kept.
    pub fn new_run(&mut self) {
        self.session.reset();
        self.reveal = None;
        self.results_scroll = 0;
        self.form.clear_error();
    }

    /// Rows the results view is scrolled past its top.
    #[must_use]
    pub fn results_scroll(&self) -> u16 {
        self.results_scroll.min(self.results_scroll_max)
    }

    /// Set by the renderer each frame from the content and viewport heights.
    pub fn update_results_scroll_max(&mut self, max: u16) {
        self.results_scroll_max = max;
        self.results_scroll = self.results_scroll.min(max);
    }

    #[must_use]
    pub fn results_scrollable(&self) -> bool {
        self.results_scroll_max > 0
    }

    pub fn scroll_results_up(&mut self, rows: u16) {
        self.results_scroll = self.results_scroll.saturating_sub(rows);
    }

    pub fn scroll_results_down(&mut self, rows: u16) {
        self.results_scroll = self
            .results_scroll
            .saturating_add(rows)
            .min(self.results_scroll_max);
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Advance timers by the wall-clock time since the previous frame.
    pub fn tick(&mut self) {
        let now = Instant::now();
        let delta = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        self.advance(delta);
    }

    pub fn advance(&mut self, delta: Duration) {
        self.tick = self.tick.wrapping_add(1);
        if let Some(reveal) = &mut self.reveal {
            reveal.timer.advance(delta);
            if reveal.timer.is_finished() {
                self.reveal = None;
            }
        }
    }
}
