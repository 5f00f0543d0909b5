use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use serde_with::serde_as;

use crate::Result;
use crate::animation::Easing;
use crate::error::ConfigError;
use crate::types::{Position, Rect, Size};

use super::defaults::{
    default_edge_margin, default_fade_in, default_fade_out, default_icon_cache_size,
    default_image_dir, default_popup_height, default_popup_width, default_position,
    default_queue_bound, default_screen, default_settle, default_shake_frequency,
    default_spacing, default_tick,
};
use super::env::{env_duration, env_parse, env_string};
use super::{
    AnimationSettings, Config, HumantimeDuration, IconSettings, LayoutSettings,
    MAX_SHAKE_FREQUENCY, TICK_BOUNDS,
};

/// Layer the TOML file at `path` under the `TOASTER__*` environment.
///
/// A `required` file that cannot be read fails with
/// [`ConfigError::FileRead`]; otherwise a missing file is skipped.
pub(super) fn load(
    path: impl AsRef<Path>,
    required: bool,
) -> std::result::Result<RawConfig, ConfigError> {
    let mut builder = ::config::Config::builder();
    let path = path.as_ref();
    if required {
        std::fs::metadata(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
    }
    builder = builder.add_source(::config::File::from(path).required(required));
    builder = builder.add_source(
        ::config::Environment::with_prefix("TOASTER")
            .separator("__")
            .try_parsing(true),
    );

    builder
        .build()
        .map_err(|err| ConfigError::Other(err.to_string()))?
        .try_deserialize()
        .map_err(|err| ConfigError::Parse(err.to_string()))
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct RawConfig {
    #[serde(default)]
    pub(super) layout: RawLayout,
    #[serde(default)]
    pub(super) animation: RawAnimation,
    #[serde(default)]
    pub(super) icons: RawIcons,
    #[serde(default)]
    pub(super) service: RawService,
    #[serde(default)]
    pub(super) screens: Vec<Rect>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawLayout {
    #[serde(default = "default_popup_width")]
    pub(super) width: i32,
    #[serde(default = "default_popup_height")]
    pub(super) height: i32,
    #[serde(default = "default_spacing")]
    pub(super) spacing: i32,
    #[serde(default = "default_edge_margin")]
    pub(super) edge_margin: i32,
    #[serde(default = "default_position")]
    pub(super) position: String,
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub(super) struct RawAnimation {
    #[serde(default = "default_tick")]
    #[serde_as(as = "HumantimeDuration")]
    pub(super) tick: Duration,
    #[serde(default = "default_settle")]
    #[serde_as(as = "HumantimeDuration")]
    pub(super) settle: Duration,
    #[serde(default = "default_fade_in")]
    #[serde_as(as = "HumantimeDuration")]
    pub(super) fade_in: Duration,
    #[serde(default = "default_fade_out")]
    #[serde_as(as = "HumantimeDuration")]
    pub(super) fade_out: Duration,
    #[serde(default)]
    pub(super) easing: Option<String>,
    #[serde(default = "default_shake_frequency")]
    pub(super) shake_frequency: f64,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawIcons {
    #[serde(default = "default_image_dir")]
    pub(super) image_dir: PathBuf,
    #[serde(default = "default_icon_cache_size")]
    pub(super) cache_size: usize,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawService {
    #[serde(default = "default_queue_bound")]
    pub(super) queue_bound: usize,
}

impl Default for RawLayout {
    fn default() -> Self {
        Self {
            width: default_popup_width(),
            height: default_popup_height(),
            spacing: default_spacing(),
            edge_margin: default_edge_margin(),
            position: default_position(),
        }
    }
}

impl Default for RawAnimation {
    fn default() -> Self {
        Self {
            tick: default_tick(),
            settle: default_settle(),
            fade_in: default_fade_in(),
            fade_out: default_fade_out(),
            easing: None,
            shake_frequency: default_shake_frequency(),
        }
    }
}

impl Default for RawIcons {
    fn default() -> Self {
        Self {
            image_dir: default_image_dir(),
            cache_size: default_icon_cache_size(),
        }
    }
}

impl Default for RawService {
    fn default() -> Self {
        Self {
            queue_bound: default_queue_bound(),
        }
    }
}

impl RawConfig {
    pub(super) fn apply_env_overrides(&mut self) -> std::result::Result<(), ConfigError> {
        if let Some(position) = env_string("TOASTER_POSITION")? {
            self.layout.position = position;
        }
        if let Some(spacing) = env_parse::<i32>("TOASTER_SPACING")? {
            self.layout.spacing = spacing;
        }
        if let Some(margin) = env_parse::<i32>("TOASTER_EDGE_MARGIN")? {
            self.layout.edge_margin = margin;
        }
        if let Some(settle) = env_duration("TOASTER_SETTLE")? {
            self.animation.settle = settle;
        }
        if let Some(fade_in) = env_duration("TOASTER_FADE_IN")? {
            self.animation.fade_in = fade_in;
        }
        if let Some(fade_out) = env_duration("TOASTER_FADE_OUT")? {
            self.animation.fade_out = fade_out;
        }
        if let Some(easing) = env_string("TOASTER_EASING")? {
            self.animation.easing = Some(easing);
        }
        if let Some(dir) = env_string("TOASTER_IMAGE_DIR")? {
            self.icons.image_dir = PathBuf::from(dir);
        }
        if let Some(queue) = env_parse::<usize>("TOASTER_QUEUE_BOUND")? {
            self.service.queue_bound = queue;
        }
        Ok(())
    }

    pub(super) fn validate_and_build(self) -> Result<Config> {
        if self.layout.width <= 0 || self.layout.height <= 0 {
            return Err(ConfigError::InvalidField {
                field: "layout.width",
                message: format!(
                    "popup size must be positive, got {}x{}",
                    self.layout.width, self.layout.height
                ),
            }
            .into());
        }
        if self.layout.spacing < 0 {
            return Err(ConfigError::InvalidField {
                field: "layout.spacing",
                message: "spacing cannot be negative".to_string(),
            }
            .into());
        }
        if self.layout.edge_margin < 0 {
            return Err(ConfigError::InvalidField {
                field: "layout.edge_margin",
                message: "edge margin cannot be negative".to_string(),
            }
            .into());
        }
        let default_anchor =
            Position::from_str(&self.layout.position).map_err(|err| ConfigError::InvalidField {
                field: "layout.position",
                message: err,
            })?;

        if !TICK_BOUNDS.contains(&self.animation.tick) {
            return Err(ConfigError::InvalidField {
                field: "animation.tick",
                message: format!(
                    "expected between {:?} and {:?}, got {:?}",
                    TICK_BOUNDS.start(),
                    TICK_BOUNDS.end(),
                    self.animation.tick
                ),
            }
            .into());
        }
        let easing = match self.animation.easing.as_deref() {
            Some(raw) => Easing::from_str(raw).map_err(|err| ConfigError::InvalidField {
                field: "animation.easing",
                message: err,
            })?,
            None => Easing::default(),
        };
        let frequency = self.animation.shake_frequency;
        if !frequency.is_finite() || frequency <= 0.0 || frequency > MAX_SHAKE_FREQUENCY {
            return Err(ConfigError::InvalidField {
                field: "animation.shake_frequency",
                message: format!("expected between 0 and {MAX_SHAKE_FREQUENCY} Hz, got {frequency}"),
            }
            .into());
        }

        if self.icons.cache_size == 0 {
            return Err(ConfigError::InvalidField {
                field: "icons.cache_size",
                message: "icon cache size must be greater than zero".to_string(),
            }
            .into());
        }
        if self.service.queue_bound == 0 {
            return Err(ConfigError::InvalidField {
                field: "service.queue_bound",
                message: "queue bound must be greater than zero".to_string(),
            }
            .into());
        }
        if let Some(screen) = self.screens.iter().find(|s| s.width <= 0 || s.height <= 0) {
            return Err(ConfigError::InvalidField {
                field: "screens",
                message: format!("screen {screen:?} has an empty area"),
            }
            .into());
        }

        let screens = if self.screens.is_empty() {
            vec![default_screen()]
        } else {
            self.screens
        };

        Ok(Config {
            layout: LayoutSettings {
                popup_size: Size::new(self.layout.width, self.layout.height),
                spacing: self.layout.spacing,
                edge_margin: self.layout.edge_margin,
            },
            animation: AnimationSettings {
                tick: self.animation.tick,
                settle: self.animation.settle,
                fade_in: self.animation.fade_in,
                fade_out: self.animation.fade_out,
                easing,
                shake_frequency: frequency,
            },
            icons: IconSettings {
                image_dir: self.icons.image_dir,
                cache_size: self.icons.cache_size,
            },
            queue_capacity: self.service.queue_bound,
            default_anchor,
            screens,
        })
    }
}
