//! Runtime state of one on-screen notification.

use std::sync::Arc;
use std::time::Instant;

use crate::animation::{Fade, Offset, Settle, Shake};
use crate::config::AnimationSettings;
use crate::icon::Icon;
use crate::layout::GroupKey;
use crate::lifecycle::Lifecycle;
use crate::render::Frame;
use crate::request::{NotificationRequest, ShakeSpec};
use crate::types::{Point, PopupId, Size};

/// Mutable companion of a [`NotificationRequest`], owned by the coordinator.
///
/// `group` is how the popup finds its stack again; it is a lookup key, the
/// stack itself never holds anything but ids.
#[derive(Debug)]
pub struct PopupHandle {
    id: PopupId,
    request: Arc<NotificationRequest>,
    icon: Option<Arc<Icon>>,
    group: GroupKey,
    size: Size,
    slot: Option<usize>,
    rest: Point,
    drawn: Offset,
    lifecycle: Lifecycle,
    opacity: f32,
    fade: Option<Fade>,
    settle: Option<Settle>,
    shake: Option<Shake>,
    pending_shake: Option<ShakeSpec>,
    dirty: bool,
}

/// What changed for a popup during one tick.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub(crate) struct Step {
    pub frame: Option<Frame>,
    pub entered: bool,
    pub exited: bool,
}

impl PopupHandle {
    pub(crate) fn new(
        id: PopupId,
        request: Arc<NotificationRequest>,
        icon: Option<Arc<Icon>>,
        group: GroupKey,
        size: Size,
    ) -> Self {
        let pending_shake = request.shake();
        Self {
            id,
            request,
            icon,
            group,
            size,
            slot: None,
            rest: Point::default(),
            drawn: Offset::default(),
            lifecycle: Lifecycle::Created,
            opacity: 0.0,
            fade: None,
            settle: None,
            shake: None,
            pending_shake,
            dirty: false,
        }
    }

    #[must_use]
    pub const fn id(&self) -> PopupId {
        self.id
    }

    #[must_use]
    pub fn request(&self) -> &NotificationRequest {
        &self.request
    }

    #[must_use]
    pub fn icon(&self) -> Option<&Icon> {
        self.icon.as_deref()
    }

    #[must_use]
    pub const fn group(&self) -> GroupKey {
        self.group
    }

    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// `None` once the popup has left its stack.
    #[must_use]
    pub const fn slot(&self) -> Option<usize> {
        self.slot
    }

    /// Origin of the assigned slot, ignoring any animation.
    #[must_use]
    pub const fn resting(&self) -> Point {
        self.rest
    }

    #[must_use]
    pub const fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    #[must_use]
    pub const fn is_shaking(&self) -> bool {
        self.shake.is_some()
    }

    #[must_use]
    pub const fn is_settling(&self) -> bool {
        self.settle.is_some()
    }

    #[must_use]
    pub const fn opacity(&self) -> f32 {
        self.opacity
    }

    pub(crate) const fn is_animating(&self) -> bool {
        self.fade.is_some() || self.settle.is_some() || self.shake.is_some() || self.dirty
    }

    /// Position without the shake overlay.
    #[must_use]
    pub fn position_at(&self, now: Instant) -> Offset {
        self.settle.map_or(self.drawn, |settle| settle.sample(now))
    }

    #[must_use]
    pub fn frame_at(&self, now: Instant) -> Frame {
        let mut position = self.position_at(now);
        if let Some(shake) = &self.shake {
            position.x += shake.offset(now);
        }
        let opacity = self.fade.map_or(self.opacity, |fade| fade.opacity(now));
        Frame {
            origin: position.round(),
            opacity,
        }
    }

    /// Move to `slot` whose origin is `target`. A popup that has never been
    /// drawn is placed directly; otherwise a settle starts from wherever it
    /// is drawn right now. Returns whether the slot index changed.
    pub(crate) fn retarget(
        &mut self,
        slot: usize,
        target: Point,
        now: Instant,
        animation: &AnimationSettings,
    ) -> bool {
        let moved = self.slot != Some(slot);
        self.slot = Some(slot);
        if self.rest == target && self.lifecycle != Lifecycle::Created {
            return moved;
        }
        if self.lifecycle == Lifecycle::Created || animation.settle.is_zero() {
            self.drawn = Offset::from(target);
            self.settle = None;
            self.dirty = true;
        } else {
            let from = self.position_at(now);
            self.settle = Some(Settle::new(
                from,
                target,
                now,
                animation.settle,
                animation.easing,
            ));
        }
        self.rest = target;
        moved
    }

    pub(crate) fn begin_showing(&mut self, now: Instant, animation: &AnimationSettings) -> bool {
        if !self.lifecycle.begin_showing() {
            return false;
        }
        self.dirty = false;
        if animation.fade_in.is_zero() {
            self.opacity = 1.0;
        } else {
            self.fade = Some(Fade::fade_in(now, animation.fade_in));
        }
        true
    }

    /// Entry done: settle the opacity and start a shake that was waiting.
    pub(crate) fn become_visible(&mut self, now: Instant, animation: &AnimationSettings) -> bool {
        if !self.lifecycle.become_visible() {
            return false;
        }
        self.fade = None;
        self.opacity = 1.0;
        self.dirty = true;
        if let Some(spec) = self.pending_shake.take() {
            self.start_shake(spec, now, animation);
        }
        true
    }

    /// Shake now when visible, later when still entering, never when on the
    /// way out. Returns whether the shake started immediately.
    pub(crate) fn request_shake(
        &mut self,
        spec: ShakeSpec,
        now: Instant,
        animation: &AnimationSettings,
    ) -> bool {
        match self.lifecycle {
            Lifecycle::Created | Lifecycle::Showing => {
                self.pending_shake = Some(spec);
                false
            }
            Lifecycle::Visible => {
                self.start_shake(spec, now, animation);
                true
            }
            Lifecycle::Closing | Lifecycle::Closed => false,
        }
    }

    fn start_shake(&mut self, spec: ShakeSpec, now: Instant, animation: &AnimationSettings) {
        if spec.duration.is_zero() {
            self.dirty |= self.shake.take().is_some();
            return;
        }
        self.shake = Some(Shake::new(
            spec.amplitude,
            spec.duration,
            animation.shake_frequency,
            now,
        ));
    }

    /// Leave the stack and start fading out.
    pub(crate) fn begin_closing(&mut self, now: Instant, animation: &AnimationSettings) -> bool {
        let opacity = self.fade.map_or(self.opacity, |fade| fade.opacity(now));
        if !self.lifecycle.begin_closing() {
            return false;
        }
        self.slot = None;
        self.shake = None;
        self.pending_shake = None;
        self.opacity = opacity;
        self.fade = if animation.fade_out.is_zero() {
            None
        } else {
            Some(Fade::fade_out(opacity, now, animation.fade_out))
        };
        true
    }

    pub(crate) fn finish_closing(&mut self) -> bool {
        if !self.lifecycle.finish_closing() {
            return false;
        }
        self.fade = None;
        self.settle = None;
        self.opacity = 0.0;
        true
    }

    /// Advance every running animation to `now`.
    ///
    /// Finished animations are dropped after their last frame is produced,
    /// so the final frame always sits exactly on the resting position.
    pub(crate) fn advance(&mut self, now: Instant, animation: &AnimationSettings) -> Step {
        if !self.is_animating() {
            return Step::default();
        }
        let frame = self.frame_at(now);
        let mut step = Step {
            frame: Some(frame),
            ..Step::default()
        };
        self.dirty = false;

        if let Some(settle) = self.settle.filter(|settle| settle.is_finished(now)) {
            self.drawn = Offset::from(settle.target());
            self.settle = None;
        }
        if self.shake.is_some_and(|shake| shake.is_finished(now)) {
            self.shake = None;
        }
        if let Some(fade) = self.fade.filter(|fade| fade.is_finished(now)) {
            self.opacity = fade.opacity(now);
            self.fade = None;
            match self.lifecycle {
                Lifecycle::Showing => step.entered = self.become_visible(now, animation),
                Lifecycle::Closing => step.exited = true,
                _ => {}
            }
        }
        step
    }
}

#[cfg(test)]
mod tests {
    use super::PopupHandle;
    use crate::config::AnimationSettings;
    use crate::layout::GroupKey;
    use crate::lifecycle::Lifecycle;
    use crate::request::{NotificationRequest, ShakeSpec};
    use crate::types::{Point, PopupId, Position, Size};
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    fn popup(request: NotificationRequest) -> PopupHandle {
        PopupHandle::new(
            PopupId::new(),
            Arc::new(request),
            None,
            GroupKey {
                screen: 0,
                anchor: Position::BottomRight,
            },
            Size::new(300, 87),
        )
    }

    #[test]
    fn first_placement_jumps() {
        let animation = AnimationSettings::default();
        let now = Instant::now();
        let mut handle = popup(NotificationRequest::default());
        handle.retarget(0, Point::new(100, 200), now, &animation);
        assert!(!handle.is_settling());
        assert_eq!(handle.frame_at(now).origin, Point::new(100, 200));
    }

    #[test]
    fn slot_change_settles_from_current_position() {
        let animation = AnimationSettings::default();
        let now = Instant::now();
        let mut handle = popup(NotificationRequest::default());
        handle.retarget(1, Point::new(100, 200), now, &animation);
        handle.begin_showing(now, &animation);
        assert!(handle.retarget(0, Point::new(100, 300), now, &animation));
        assert!(handle.is_settling());
        assert_eq!(handle.frame_at(now).origin, Point::new(100, 200));

        let later = now + animation.settle;
        let step = handle.advance(later, &animation);
        assert_eq!(step.frame.map(|f| f.origin), Some(Point::new(100, 300)));
        assert!(!handle.is_settling());
    }

    #[test]
    fn shake_waits_for_visibility() {
        let animation = AnimationSettings::default();
        let now = Instant::now();
        let mut handle = popup(NotificationRequest::default());
        handle.retarget(0, Point::new(0, 0), now, &animation);
        handle.begin_showing(now, &animation);
        let spec = ShakeSpec {
            duration: Duration::from_millis(200),
            amplitude: 6,
        };
        assert!(!handle.request_shake(spec, now, &animation));
        assert!(!handle.is_shaking());

        let step = handle.advance(now + animation.fade_in, &animation);
        assert!(step.entered);
        assert_eq!(handle.lifecycle(), Lifecycle::Visible);
        assert!(handle.is_shaking());
    }

    #[test]
    fn closing_drops_shake_and_slot() {
        let animation = AnimationSettings::instant();
        let now = Instant::now();
        let mut handle = popup(NotificationRequest::default());
        handle.retarget(0, Point::new(0, 0), now, &animation);
        handle.begin_showing(now, &animation);
        handle.become_visible(now, &animation);
        handle.request_shake(
            ShakeSpec {
                duration: Duration::from_secs(1),
                amplitude: 10,
            },
            now,
            &animation,
        );
        assert!(handle.begin_closing(now, &animation));
        assert!(!handle.is_shaking());
        assert_eq!(handle.slot(), None);
        assert!(!handle.begin_closing(now, &animation));
        assert!(handle.finish_closing());
        assert_eq!(handle.lifecycle(), Lifecycle::Closed);
    }

    #[test]
    fn shake_settles_back_to_rest() {
        let animation = AnimationSettings::instant();
        let now = Instant::now();
        let mut handle = popup(NotificationRequest::default());
        handle.retarget(0, Point::new(50, 50), now, &animation);
        handle.begin_showing(now, &animation);
        handle.become_visible(now, &animation);
        handle.advance(now, &animation);
        handle.request_shake(
            ShakeSpec {
                duration: Duration::from_millis(300),
                amplitude: 10,
            },
            now,
            &animation,
        );
        let end = handle.advance(now + Duration::from_millis(300), &animation);
        assert_eq!(end.frame.map(|f| f.origin), Some(Point::new(50, 50)));
        assert!(!handle.is_shaking());
        assert_eq!(handle.advance(now + Duration::from_secs(1), &animation).frame, None);
    }
}
