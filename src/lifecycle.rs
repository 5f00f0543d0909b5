use std::fmt::{self, Display};

/// Formal state of one popup.
///
/// `Created -> Showing -> Visible -> Closing -> Closed`; a popup that is
/// still entering may also go straight to `Closing`. `Closed` is absorbing.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Lifecycle {
    #[default]
    Created,
    Showing,
    Visible,
    Closing,
    Closed,
}

impl Lifecycle {
    /// The popup has been handed to the renderer.
    pub fn begin_showing(&mut self) -> bool {
        self.advance(Self::Created, Self::Showing)
    }

    /// The entry animation has completed.
    pub fn become_visible(&mut self) -> bool {
        self.advance(Self::Showing, Self::Visible)
    }

    pub fn begin_closing(&mut self) -> bool {
        if matches!(self, Self::Showing | Self::Visible) {
            *self = Self::Closing;
            return true;
        }
        false
    }

    /// The exit animation has completed.
    pub fn finish_closing(&mut self) -> bool {
        self.advance(Self::Closing, Self::Closed)
    }

    /// Still on screen and not on its way out.
    #[must_use]
    pub const fn is_live(self) -> bool {
        matches!(self, Self::Showing | Self::Visible)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Showing => "showing",
            Self::Visible => "visible",
            Self::Closing => "closing",
            Self::Closed => "closed",
        }
    }

    fn advance(&mut self, from: Self, to: Self) -> bool {
        if *self == from {
            *self = to;
            return true;
        }
        false
    }
}

impl Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
