use tracing::{debug, info};

use crate::icon::Icon;
use crate::layout::GroupKey;
use crate::request::NotificationRequest;
use crate::types::{Point, PopupId, Size};

/// What a popup should look like on one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub origin: Point,
    pub opacity: f32,
}

/// Everything a renderer needs to build a new popup window.
#[derive(Debug)]
pub struct PopupView<'a> {
    pub id: PopupId,
    pub request: &'a NotificationRequest,
    /// `None` when the request had no icon or it failed to load.
    pub icon: Option<&'a Icon>,
    pub group: GroupKey,
    pub size: Size,
    pub frame: Frame,
}

/// Draws popups. Lives on the coordinator task and is only ever called from
/// it.
///
/// Entry/exit completion and clicks travel the other way, through
/// [`crate::service::Notifier`].
pub trait Renderer {
    fn open(&mut self, view: &PopupView<'_>);

    fn update(&mut self, id: PopupId, frame: Frame);

    /// The popup is closed; release whatever backs it.
    fn dispose(&mut self, id: PopupId);
}

/// Renderer that only logs, for headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingRenderer;

impl Renderer for TracingRenderer {
    fn open(&mut self, view: &PopupView<'_>) {
        info!(
            popup_id = %view.id,
            screen = view.group.screen,
            anchor = %view.group.anchor,
            x = view.frame.origin.x,
            y = view.frame.origin.y,
            title = view.request.title().unwrap_or(""),
            text = view.request.text().unwrap_or(""),
            dark = view.request.is_dark(),
            icon = view.icon.is_some(),
            "open popup"
        );
    }

    fn update(&mut self, id: PopupId, frame: Frame) {
        debug!(
            popup_id = %id,
            x = frame.origin.x,
            y = frame.origin.y,
            opacity = frame.opacity,
            "frame"
        );
    }

    fn dispose(&mut self, id: PopupId) {
        info!(popup_id = %id, "dispose popup");
    }
}
