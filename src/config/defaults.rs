use std::path::PathBuf;
use std::time::Duration;

use crate::types::Rect;

pub(super) const fn default_popup_width() -> i32 {
    300
}

pub(super) const fn default_popup_height() -> i32 {
    87
}

pub(super) const fn default_spacing() -> i32 {
    10
}

pub(super) const fn default_edge_margin() -> i32 {
    20
}

pub(super) const fn default_tick() -> Duration {
    Duration::from_millis(16)
}

pub(super) const fn default_settle() -> Duration {
    Duration::from_millis(300)
}

pub(super) const fn default_fade_in() -> Duration {
    Duration::from_millis(150)
}

pub(super) const fn default_fade_out() -> Duration {
    Duration::from_millis(150)
}

pub(super) const fn default_shake_frequency() -> f64 {
    16.0
}

pub(super) fn default_image_dir() -> PathBuf {
    PathBuf::from("resources")
}

pub(super) const fn default_icon_cache_size() -> usize {
    16
}

pub(super) const fn default_queue_bound() -> usize {
    64
}

pub(super) fn default_position() -> String {
    "bottom-right".to_string()
}

pub(super) const fn default_screen() -> Rect {
    Rect::new(0, 0, 1920, 1080)
}
