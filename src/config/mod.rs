use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::Result;
use crate::animation::Easing;
use crate::error::Error as ToastError;
use crate::types::{Position, Rect, Size};

mod defaults;
mod env;
mod raw;
mod serde;

pub(crate) use serde::HumantimeDuration;

const TICK_BOUNDS: RangeInclusive<Duration> = Duration::from_millis(1)..=Duration::from_secs(1);
const MAX_SHAKE_FREQUENCY: f64 = 120.0;

#[derive(Debug, Clone)]
pub struct Config {
    pub layout: LayoutSettings,
    pub animation: AnimationSettings,
    pub icons: IconSettings,
    pub queue_capacity: usize,
    pub default_anchor: Position,
    pub screens: Vec<Rect>,
}

/// Pixel geometry shared by every slot group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutSettings {
    pub popup_size: Size,
    /// Gap between two stacked popups.
    pub spacing: i32,
    /// Gap between the anchored screen edges and the nearest popup.
    pub edge_margin: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSettings {
    pub tick: Duration,
    pub settle: Duration,
    pub fade_in: Duration,
    pub fade_out: Duration,
    pub easing: Easing,
    /// Oscillations per second while shaking.
    pub shake_frequency: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSettings {
    pub image_dir: PathBuf,
    pub cache_size: usize,
}

impl Config {
    /// Load configuration from an optional file and the environment.
    ///
    /// A missing file is not an error; defaults and environment overrides
    /// apply.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be parsed, when environment
    /// overrides are invalid, or when the resulting values fail validation.
    pub fn from_env_and_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::load(path, false)
    }

    /// Like [`Config::from_env_and_file`], for a path the user asked for
    /// explicitly.
    ///
    /// # Errors
    ///
    /// Additionally returns [`ConfigError::FileRead`] when the file does not
    /// exist or cannot be read.
    ///
    /// [`ConfigError::FileRead`]: crate::error::ConfigError::FileRead
    pub fn from_env_and_required_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::load(path, true)
    }

    fn load(path: impl AsRef<Path>, required: bool) -> Result<Self> {
        let mut raw = raw::load(path, required).map_err(ToastError::from)?;
        raw.apply_env_overrides().map_err(ToastError::from)?;
        raw.validate_and_build()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layout: LayoutSettings::default(),
            animation: AnimationSettings::default(),
            icons: IconSettings::default(),
            queue_capacity: defaults::default_queue_bound(),
            default_anchor: Position::default(),
            screens: vec![defaults::default_screen()],
        }
    }
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            popup_size: Size::new(defaults::default_popup_width(), defaults::default_popup_height()),
            spacing: defaults::default_spacing(),
            edge_margin: defaults::default_edge_margin(),
        }
    }
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            tick: defaults::default_tick(),
            settle: defaults::default_settle(),
            fade_in: defaults::default_fade_in(),
            fade_out: defaults::default_fade_out(),
            easing: Easing::default(),
            shake_frequency: defaults::default_shake_frequency(),
        }
    }
}

impl AnimationSettings {
    /// Settings with every transition instantaneous; positions jump straight
    /// to their targets.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            settle: Duration::ZERO,
            fade_in: Duration::ZERO,
            fade_out: Duration::ZERO,
            ..Self::default()
        }
    }
}

impl Default for IconSettings {
    fn default() -> Self {
        Self {
            image_dir: defaults::default_image_dir(),
            cache_size: defaults::default_icon_cache_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AnimationSettings, Config};
    use crate::error::{ConfigError, Error};
    use crate::types::Position;
    use std::time::Duration;

    #[test]
    fn explicit_missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap_or_else(|err| panic!("tempdir: {err}"));
        let path = dir.path().join("missing.toml");
        match Config::from_env_and_required_file(&path) {
            Err(Error::Config(ConfigError::FileRead { path: reported, .. })) => {
                assert_eq!(reported, path);
            }
            other => panic!("expected FileRead, got {other:?}"),
        }
        assert!(Config::from_env_and_file(&path).is_ok());
    }

    #[test]
    fn explicit_file_is_applied() {
        let dir = tempfile::tempdir().unwrap_or_else(|err| panic!("tempdir: {err}"));
        let path = dir.path().join("toaster.toml");
        std::fs::write(&path, "[layout]\nposition = \"top-left\"\n")
            .unwrap_or_else(|err| panic!("write config: {err}"));
        let config = Config::from_env_and_required_file(&path)
            .unwrap_or_else(|err| panic!("config should load: {err}"));
        assert_eq!(config.default_anchor, Position::TopLeft);
    }

    #[test]
    fn defaults_describe_one_screen() {
        let config = Config::default();
        assert_eq!(config.screens.len(), 1);
        assert!(config.layout.popup_size.width > 0);
        assert_eq!(config.icons.image_dir.to_string_lossy(), "resources");
    }

    #[test]
    fn instant_animation_keeps_tick() {
        let instant = AnimationSettings::instant();
        assert_eq!(instant.fade_in, Duration::ZERO);
        assert_eq!(instant.settle, Duration::ZERO);
        assert_eq!(instant.tick, AnimationSettings::default().tick);
    }
}
