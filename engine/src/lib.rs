//! Assignment engine and run state machine for teamgen.
//!
//! The [`assignment`] module is the core: [`initialize`] validates a split and
//! builds a [`RunState`], [`assign_next`] places one participant, and
//! [`reset`] discards a run. [`App`] layers the interactive setup form and the
//! timed reveal on top for the terminal front-end.

mod app;
mod assignment;
mod config;
mod form;
mod session;

pub use app::{App, DrawResult, Reveal, Screen};
pub use assignment::{AssignmentOutcome, RandomSource, Roster, RunState, assign_next, initialize};
pub use config::{
    AppConfig, AppSettings, DEFAULT_PARTICIPANTS, DEFAULT_REVEAL_MS, DrawConfig, SettingsError,
    TeamgenConfig, config_path,
};
pub use form::{FormError, FormField, SetupForm};
pub use session::{Phase, Session, reset};

pub use teamgen_types::ui::{RevealTimer, UiOptions};
pub use teamgen_types::{ConfigError, Configuration, GroupCount, GroupLabel, UnsupportedGroupCount};
