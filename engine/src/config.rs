use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;

use swipedeck_types::{BoundaryCopy, DeckKind, RouteTemplate, ThresholdFraction, ui::UiOptions};

use crate::deck::DeckSettings;
use crate::tutorial::TutorialSchedule;

/// Overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "SWIPEDECK_CONFIG";

/// `~/.swipedeck/config.toml`
///
/// ```toml
/// [app]
/// deck = "candidates"
/// reduced_motion = true
///
/// [deck]
/// threshold_fraction = 0.3
/// dead_zone = 50.0
/// exit_delay_ms = 200
///
/// [tutorial]
/// reveal_delays_ms = [5000, 25000]
///
/// [copy]
/// end_title = "That's all for now"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct SwipeDeckConfig {
    pub app: Option<AppConfig>,
    pub deck: Option<DeckConfig>,
    pub tutorial: Option<TutorialConfig>,
    pub copy: Option<CopyConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Which deck variant to show when the command line doesn't say.
    pub deck: Option<DeckKind>,
    /// Use ASCII-only glyphs for borders and icons.
    #[serde(default)]
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
    /// Snap cards instead of animating them.
    #[serde(default)]
    pub reduced_motion: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeckConfig {
    /// Fraction of the viewport width a drag must pass to commit. Default: 0.3.
    pub threshold_fraction: Option<f32>,
    /// Overshoot past an end that counts as a bounce. Default: 50.0.
    pub dead_zone: Option<f32>,
    pub exit_delay_ms: Option<u64>,
    pub boundary_hold_ms: Option<u64>,
    pub boundary_fade_ms: Option<u64>,
    /// Address pattern reported on navigation, e.g. "/jobs/{id}".
    pub route: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TutorialConfig {
    pub enabled: Option<bool>,
    pub first_delay_ms: Option<u64>,
    pub first_duration_ms: Option<u64>,
    pub reveal_delays_ms: Option<Vec<u64>>,
    pub reveal_duration_ms: Option<u64>,
    pub staleness_buffer_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CopyConfig {
    pub start_title: Option<String>,
    pub start_body: Option<String>,
    pub end_title: Option<String>,
    pub end_body: Option<String>,
    pub empty: Option<String>,
}

fn millis(value: Option<u64>, default: Duration) -> Duration {
    value.map_or(default, Duration::from_millis)
}

impl SwipeDeckConfig {
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let path = match config_path() {
            Some(path) => path,
            None => return Ok(None),
        };
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(config),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
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

    #[must_use]
    pub fn deck_kind(&self) -> Option<DeckKind> {
        self.app.as_ref().and_then(|app| app.deck)
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.app
            .as_ref()
            .map(|app| UiOptions {
                ascii_only: app.ascii_only,
                high_contrast: app.high_contrast,
                reduced_motion: app.reduced_motion,
            })
            .unwrap_or_default()
    }

    /// Resolve deck tunables for `kind`, falling back to defaults for
    /// anything missing or invalid.
    #[must_use]
    pub fn settings(&self, kind: DeckKind) -> DeckSettings {
        let defaults = DeckSettings::default();
        let deck = self.deck.as_ref();

        let threshold = match deck.and_then(|d| d.threshold_fraction) {
            Some(raw) => ThresholdFraction::new(raw).unwrap_or_else(|err| {
                tracing::warn!("{err}; using {}", ThresholdFraction::DEFAULT.get());
                ThresholdFraction::DEFAULT
            }),
            None => defaults.threshold,
        };

        let dead_zone = match deck.and_then(|d| d.dead_zone) {
            Some(value) if value.is_finite() && value >= 0.0 => value,
            Some(value) => {
                tracing::warn!("Ignoring invalid dead_zone {value}");
                defaults.dead_zone
            }
            None => defaults.dead_zone,
        };

        let route = deck
            .and_then(|d| d.route.as_deref())
            .map_or_else(|| kind.route(), RouteTemplate::new);

        DeckSettings {
            threshold,
            dead_zone,
            exit_delay: millis(deck.and_then(|d| d.exit_delay_ms), defaults.exit_delay),
            boundary_hold: millis(
                deck.and_then(|d| d.boundary_hold_ms),
                defaults.boundary_hold,
            ),
            boundary_fade: millis(
                deck.and_then(|d| d.boundary_fade_ms),
                defaults.boundary_fade,
            ),
            route: Some(route),
            tutorial: self.tutorial_schedule(),
        }
    }

    #[must_use]
    pub fn tutorial_schedule(&self) -> TutorialSchedule {
        let defaults = TutorialSchedule::default();
        let Some(tutorial) = self.tutorial.as_ref() else {
            return defaults;
        };
        TutorialSchedule {
            enabled: tutorial.enabled.unwrap_or(defaults.enabled),
            first_delay: millis(tutorial.first_delay_ms, defaults.first_delay),
            first_duration: millis(tutorial.first_duration_ms, defaults.first_duration),
            reveal_delays: tutorial.reveal_delays_ms.as_ref().map_or_else(
                || defaults.reveal_delays.clone(),
                |delays| delays.iter().copied().map(Duration::from_millis).collect(),
            ),
            reveal_duration: millis(tutorial.reveal_duration_ms, defaults.reveal_duration),
            staleness_buffer: millis(tutorial.staleness_buffer_ms, defaults.staleness_buffer),
        }
    }

    /// Boundary captions for `kind` with any configured overrides applied.
    #[must_use]
    pub fn boundary_copy(&self, kind: DeckKind) -> BoundaryCopy {
        let mut copy = kind.boundary_copy();
        let Some(overrides) = self.copy.as_ref() else {
            return copy;
        };
        let fields = [
            (&overrides.start_title, &mut copy.start_title),
            (&overrides.start_body, &mut copy.start_body),
            (&overrides.end_title, &mut copy.end_title),
            (&overrides.end_body, &mut copy.end_body),
            (&overrides.empty, &mut copy.empty),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                slot.clone_from(value);
            }
        }
        copy
    }
}

pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = env::var(CONFIG_PATH_ENV)
        && !path.trim().is_empty()
    {
        return Some(PathBuf::from(path));
    }
    dirs::home_dir().map(|home| home.join(".swipedeck").join("config.toml"))
}
