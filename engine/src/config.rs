use serde::Deserialize;
use std::{fs, path::Path, path::PathBuf, time::Duration};
use thiserror::Error;

use teamgen_types::GroupCount;
use teamgen_types::ui::UiOptions;

use crate::form::MAX_PARTICIPANTS;

pub const DEFAULT_PARTICIPANTS: u32 = 9;
pub const DEFAULT_REVEAL_MS: u64 = 2000;

#[derive(Debug, Default, Deserialize)]
pub struct TeamgenConfig {
    pub app: Option<AppConfig>,
    pub draw: Option<DrawConfig>,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl SettingsError {
    pub fn path(&self) -> &PathBuf {
        match self {
            SettingsError::Read { path, .. } | SettingsError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Use ASCII-only glyphs for icons.
    #[serde(default)]
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
    /// Disable the reveal pop animation.
    #[serde(default)]
    pub reduced_motion: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct DrawConfig {
    /// Prefilled group count on the setup screen.
    pub default_groups: Option<GroupCount>,
    /// Prefilled participant count on the setup screen.
    pub default_participants: Option<u32>,
    /// How long each assignment stays on screen before the next draw is allowed.
    pub reveal_ms: Option<u64>,
    /// Fixed RNG seed for reproducible draws.
    pub seed: Option<u64>,
}

impl TeamgenConfig {
    pub fn load() -> Result<Option<Self>, SettingsError> {
        let path = match config_path() {
            Some(path) => path,
            None => return Ok(None),
        };
        Self::load_from(&path)
    }

    /// Load from an explicit path. A missing file is not an error.
    pub fn load_from(path: &Path) -> Result<Option<Self>, SettingsError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(SettingsError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(SettingsError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".teamgen").join("config.toml"))
}

/// Effective settings after applying config and environment over defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    pub ui_options: UiOptions,
    pub default_groups: GroupCount,
    pub default_participants: u32,
    pub reveal_duration: Duration,
    pub seed: Option<u64>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            ui_options: UiOptions::default(),
            default_groups: GroupCount::default(),
            default_participants: DEFAULT_PARTICIPANTS,
            reveal_duration: Duration::from_millis(DEFAULT_REVEAL_MS),
            seed: None,
        }
    }
}

impl AppSettings {
    #[must_use]
    pub fn from_config(config: Option<&TeamgenConfig>) -> Self {
        let mut settings = Self::default();

        if let Some(app) = config.and_then(|cfg| cfg.app.as_ref()) {
            settings.ui_options = UiOptions {
                ascii_only: app.ascii_only,
                high_contrast: app.high_contrast,
                reduced_motion: app.reduced_motion,
            };
        }

        if let Some(draw) = config.and_then(|cfg| cfg.draw.as_ref()) {
            if let Some(groups) = draw.default_groups {
                settings.default_groups = groups;
            }
            match draw.default_participants {
                Some(0) => tracing::warn!("Ignoring default_participants = 0 in config"),
                Some(n) if n > MAX_PARTICIPANTS => tracing::warn!(
                    "Ignoring default_participants = {n} in config (max {MAX_PARTICIPANTS})"
                ),
                Some(n) => settings.default_participants = n,
                None => {}
            }
            if let Some(ms) = draw.reveal_ms {
                settings.reveal_duration = Duration::from_millis(ms);
            }
            settings.seed = draw.seed;
        }

        settings
    }

    /// Apply `TEAMGEN_SEED` on top of the config seed.
    #[must_use]
    pub fn with_env_seed(mut self, raw: Option<&str>) -> Self {
        if let Some(raw) = raw {
            match raw.trim().parse::<u64>() {
                Ok(seed) => self.seed = Some(seed),
                Err(_) => tracing::warn!("Ignoring invalid TEAMGEN_SEED: {}", raw),
            }
        }
        self
    }
}
