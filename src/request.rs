use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::icon::{BuiltinIcon, IconRef};
use crate::types::{PopupId, Position, Size};

/// Callback run when the body of a popup is clicked.
#[derive(Clone)]
pub struct ClickAction(Arc<dyn Fn(PopupId) + Send + Sync>);

impl ClickAction {
    pub fn new(action: impl Fn(PopupId) + Send + Sync + 'static) -> Self {
        Self(Arc::new(action))
    }

    pub fn invoke(&self, id: PopupId) {
        (self.0)(id);
    }
}

impl fmt::Debug for ClickAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClickAction(..)")
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ShakeSpec {
    pub duration: Duration,
    /// 4 is a nudge, 10 a violent shake.
    pub amplitude: u32,
}

/// Everything the caller chose for one notification, frozen at `show` time.
#[derive(Clone, Debug, Default)]
pub struct NotificationRequest {
    title: Option<String>,
    text: Option<String>,
    icon: Option<IconRef>,
    position: Option<Position>,
    screen: Option<i32>,
    hide_after: Duration,
    dark: bool,
    hide_close_button: bool,
    on_action: Option<ClickAction>,
    shake: Option<ShakeSpec>,
    size: Option<Size>,
}

impl NotificationRequest {
    #[must_use]
    pub fn builder() -> NotificationBuilder {
        NotificationBuilder::default()
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    #[must_use]
    pub const fn icon(&self) -> Option<&IconRef> {
        self.icon.as_ref()
    }

    /// `None` follows the pointer with the configured default anchor.
    #[must_use]
    pub const fn position(&self) -> Option<Position> {
        self.position
    }

    /// `None` follows the pointer.
    #[must_use]
    pub const fn screen(&self) -> Option<i32> {
        self.screen
    }

    /// Zero means the popup stays until closed.
    #[must_use]
    pub const fn hide_after(&self) -> Duration {
        self.hide_after
    }

    #[must_use]
    pub const fn is_dark(&self) -> bool {
        self.dark
    }

    #[must_use]
    pub const fn hides_close_button(&self) -> bool {
        self.hide_close_button
    }

    #[must_use]
    pub const fn on_action(&self) -> Option<&ClickAction> {
        self.on_action.as_ref()
    }

    #[must_use]
    pub const fn shake(&self) -> Option<ShakeSpec> {
        self.shake
    }

    #[must_use]
    pub const fn size(&self) -> Option<Size> {
        self.size
    }
}

#[derive(Debug, Default)]
#[must_use]
pub struct NotificationBuilder {
    request: NotificationRequest,
}

impl NotificationBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.request.title = Some(title.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.request.text = Some(text.into());
        self
    }

    pub fn icon(mut self, icon: IconRef) -> Self {
        self.request.icon = Some(icon);
        self
    }

    pub fn icon_named(self, name: impl Into<String>) -> Self {
        self.icon(IconRef::Named(name.into()))
    }

    pub fn warning(self) -> Self {
        self.icon(IconRef::Builtin(BuiltinIcon::Warning))
    }

    pub fn information(self) -> Self {
        self.icon(IconRef::Builtin(BuiltinIcon::Information))
    }

    pub fn error(self) -> Self {
        self.icon(IconRef::Builtin(BuiltinIcon::Error))
    }

    pub fn confirm(self) -> Self {
        self.icon(IconRef::Builtin(BuiltinIcon::Confirm))
    }

    pub fn position(mut self, position: Position) -> Self {
        self.request.position = Some(position);
        self
    }

    pub fn screen(mut self, screen: i32) -> Self {
        self.request.screen = Some(screen);
        self
    }

    pub fn hide_after(mut self, delay: Duration) -> Self {
        self.request.hide_after = delay;
        self
    }

    /// Signed variant for callers holding raw milliseconds; negatives mean
    /// "never".
    pub fn hide_after_ms(self, millis: i64) -> Self {
        let millis = u64::try_from(millis).unwrap_or(0);
        self.hide_after(Duration::from_millis(millis))
    }

    pub fn dark_style(mut self) -> Self {
        self.request.dark = true;
        self
    }

    pub fn hide_close_button(mut self) -> Self {
        self.request.hide_close_button = true;
        self
    }

    pub fn on_action(mut self, action: impl Fn(PopupId) + Send + Sync + 'static) -> Self {
        self.request.on_action = Some(ClickAction::new(action));
        self
    }

    /// Shake once the popup is visible.
    pub fn shake(mut self, duration: Duration, amplitude: u32) -> Self {
        self.request.shake = Some(ShakeSpec {
            duration,
            amplitude,
        });
        self
    }

    pub fn size(mut self, size: Size) -> Self {
        self.request.size = Some(size);
        self
    }

    #[must_use]
    pub fn build(self) -> NotificationRequest {
        self.request
    }
}

impl From<NotificationBuilder> for NotificationRequest {
    fn from(builder: NotificationBuilder) -> Self {
        builder.build()
    }
}
