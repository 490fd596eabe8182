//! Core domain types for teamgen.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

pub mod ui;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use thiserror::Error;

// ============================================================================
// Group Types
// ============================================================================

/// Number of groups a run is split into.
///
/// Only three and four groups are supported; each count has its own fixed
/// label table (see [`GroupCount::labels`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum GroupCount {
    #[default]
    Three,
    Four,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unsupported group count {0}; expected 3 or 4")]
pub struct UnsupportedGroupCount(pub u32);

const THREE_GROUP_LABELS: [GroupLabel; 3] =
    [GroupLabel::Green, GroupLabel::Blue, GroupLabel::Multicolor];
const FOUR_GROUP_LABELS: [GroupLabel; 4] = [
    GroupLabel::Blue,
    GroupLabel::Green,
    GroupLabel::Red,
    GroupLabel::Multicolor,
];

impl GroupCount {
    pub const ALL: [GroupCount; 2] = [GroupCount::Three, GroupCount::Four];

    #[must_use]
    pub const fn get(self) -> u32 {
        match self {
            GroupCount::Three => 3,
            GroupCount::Four => 4,
        }
    }

    /// Labels in display order. The ordering is fixed per count and is not
    /// derived from the label enum's declaration order.
    #[must_use]
    pub const fn labels(self) -> &'static [GroupLabel] {
        match self {
            GroupCount::Three => &THREE_GROUP_LABELS,
            GroupCount::Four => &FOUR_GROUP_LABELS,
        }
    }
}

impl TryFrom<u32> for GroupCount {
    type Error = UnsupportedGroupCount;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            3 => Ok(GroupCount::Three),
            4 => Ok(GroupCount::Four),
            other => Err(UnsupportedGroupCount(other)),
        }
    }
}

impl From<GroupCount> for u32 {
    fn from(value: GroupCount) -> Self {
        value.get()
    }
}

impl fmt::Display for GroupCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Identity of one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupLabel {
    Blue,
    Green,
    Red,
    Multicolor,
}

impl GroupLabel {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupLabel::Blue => "blue",
            GroupLabel::Green => "green",
            GroupLabel::Red => "red",
            GroupLabel::Multicolor => "multicolor",
        }
    }

    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            GroupLabel::Blue => "Blue",
            GroupLabel::Green => "Green",
            GroupLabel::Red => "Red",
            GroupLabel::Multicolor => "Multicolor",
        }
    }
}

impl fmt::Display for GroupLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Raised when the participants cannot be split into equally-sized groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("participant count {participant_count} must be divisible by {divisor}")]
pub struct ConfigError {
    /// The group count the participant count has to be a multiple of.
    pub divisor: u32,
    pub participant_count: u32,
}

/// A validated run configuration.
///
/// Construction guarantees `participant_count % group_count == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Configuration {
    group_count: GroupCount,
    participant_count: NonZeroU32,
}

impl Configuration {
    pub fn new(group_count: GroupCount, participant_count: NonZeroU32) -> Result<Self, ConfigError> {
        let divisor = group_count.get();
        if participant_count.get() % divisor != 0 {
            return Err(ConfigError {
                divisor,
                participant_count: participant_count.get(),
            });
        }
        Ok(Self {
            group_count,
            participant_count,
        })
    }

    #[must_use]
    pub fn group_count(&self) -> GroupCount {
        self.group_count
    }

    #[must_use]
    pub fn participant_count(&self) -> u32 {
        self.participant_count.get()
    }

    /// Maximum roster length for every group.
    #[must_use]
    pub fn capacity(&self) -> usize {
        (self.participant_count.get() / self.group_count.get()) as usize
    }
}
