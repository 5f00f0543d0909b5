use crate::types::{Point, Position, Rect};

/// Source of screen geometry and pointer location.
pub trait ScreenProvider {
    /// Bounds of every screen, in the order screen indices refer to.
    fn screens(&self) -> Vec<Rect>;

    fn pointer(&self) -> Option<Point>;
}

/// Fixed screen layout, typically read from configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticScreens {
    screens: Vec<Rect>,
    pointer: Option<Point>,
}

impl StaticScreens {
    #[must_use]
    pub const fn new(screens: Vec<Rect>) -> Self {
        Self {
            screens,
            pointer: None,
        }
    }

    #[must_use]
    pub fn with_pointer(mut self, pointer: Point) -> Self {
        self.pointer = Some(pointer);
        self
    }
}

impl ScreenProvider for StaticScreens {
    fn screens(&self) -> Vec<Rect> {
        self.screens.clone()
    }

    fn pointer(&self) -> Option<Point> {
        self.pointer
    }
}

/// Concrete place a popup is laid out against.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ScreenTarget {
    pub screen: usize,
    pub bounds: Rect,
    pub anchor: Position,
}

/// Pick the screen and anchor for a request.
///
/// A negative index selects the first screen and an index past the end the
/// last. Without an index the popup follows the pointer onto whichever screen
/// contains it (screen 0 when the pointer is unknown or off every screen).
/// A missing position anchors at `default_anchor`. Returns `None` only when
/// there is no screen at all.
#[must_use]
pub fn resolve(
    screens: &[Rect],
    pointer: Option<Point>,
    screen: Option<i32>,
    position: Option<Position>,
    default_anchor: Position,
) -> Option<ScreenTarget> {
    let last = screens.len().checked_sub(1)?;
    let index = match screen {
        Some(requested) => usize::try_from(requested).map_or(0, |i| i.min(last)),
        None => pointer
            .and_then(|p| screens.iter().position(|bounds| bounds.contains(p)))
            .unwrap_or(0),
    };
    Some(ScreenTarget {
        screen: index,
        bounds: screens[index],
        anchor: position.unwrap_or(default_anchor),
    })
}
