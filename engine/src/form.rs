//! Setup form: the two numeric fields shown before a run starts.

use std::num::NonZeroU32;

use thiserror::Error;

use teamgen_types::{ConfigError, GroupCount, UnsupportedGroupCount};

/// Longest accepted number, in digits.
const MAX_DIGITS: usize = 5;

/// Largest participant count the form can hold.
pub(crate) const MAX_PARTICIPANTS: u32 = 99_999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Groups,
    Participants,
}

impl FormField {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            FormField::Groups => "Groups (3-4)",
            FormField::Participants => "Participants",
        }
    }

    #[must_use]
    fn other(self) -> Self {
        match self {
            FormField::Groups => FormField::Participants,
            FormField::Participants => FormField::Groups,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{} must be a positive whole number", field.label())]
    NotANumber { field: FormField },
    #[error(transparent)]
    UnsupportedGroups(#[from] UnsupportedGroupCount),
    #[error("The participant count must be divisible by {}!", .0.divisor)]
    Uneven(#[from] ConfigError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupForm {
    groups: String,
    participants: String,
    focus: FormField,
    error: Option<FormError>,
}

impl SetupForm {
    #[must_use]
    pub fn new(groups: GroupCount, participants: u32) -> Self {
        Self {
            groups: groups.get().to_string(),
            participants: participants.min(MAX_PARTICIPANTS).to_string(),
            focus: FormField::default(),
            error: None,
        }
    }

    #[must_use]
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Groups => &self.groups,
            FormField::Participants => &self.participants,
        }
    }

    fn value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Groups => &mut self.groups,
            FormField::Participants => &mut self.participants,
        }
    }

    #[must_use]
    pub fn focus(&self) -> FormField {
        self.focus
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.other();
    }

    #[must_use]
    pub fn error(&self) -> Option<&FormError> {
        self.error.as_ref()
    }

    pub fn set_error(&mut self, error: FormError) {
        self.error = Some(error);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Append a digit to the focused field. Anything else is ignored.
    pub fn enter_char(&mut self, c: char) {
        if !c.is_ascii_digit() {
            return;
        }
        let value = self.value_mut(self.focus);
        if value.len() < MAX_DIGITS {
            value.push(c);
        }
    }

    pub fn delete_char(&mut self) {
        let focus = self.focus;
        self.value_mut(focus).pop();
    }

    /// Parse both fields. Divisibility is checked by the engine, not here.
    pub fn parse(&self) -> Result<(GroupCount, NonZeroU32), FormError> {
        let groups: u32 = self.groups.parse().map_err(|_| FormError::NotANumber {
            field: FormField::Groups,
        })?;
        let groups = GroupCount::try_from(groups)?;

        let participants = self
            .participants
            .parse::<u32>()
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or(FormError::NotANumber {
                field: FormField::Participants,
            })?;

        Ok((groups, participants))
    }
}
