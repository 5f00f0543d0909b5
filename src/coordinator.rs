//! Single-owner popup coordinator.
//!
//! Owns every stack and every popup. All operations are synchronous and run
//! to completion; callers pass the `now` they are acting at, so the service
//! loop and the tests drive the exact same code. Misuse (unknown ids, closed
//! popups, shaking something on its way out) is logged and ignored.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::config::{AnimationSettings, Config, LayoutSettings};
use crate::icon::Icon;
use crate::layout::{GroupKey, SlotGroup, stack_targets};
use crate::lifecycle::Lifecycle;
use crate::popup::PopupHandle;
use crate::render::{PopupView, Renderer};
use crate::request::{NotificationRequest, ShakeSpec};
use crate::screen::{ScreenProvider, resolve};
use crate::timer::DismissTimers;
use crate::types::{ClickRegion, Point, PopupId, Position, Rect};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinatorSettings {
    pub layout: LayoutSettings,
    pub animation: AnimationSettings,
    pub default_anchor: Position,
}

impl From<&Config> for CoordinatorSettings {
    fn from(config: &Config) -> Self {
        Self {
            layout: config.layout,
            animation: config.animation,
            default_anchor: config.default_anchor,
        }
    }
}

impl Default for CoordinatorSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// Point-in-time view of one popup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopupSnapshot {
    pub id: PopupId,
    pub group: GroupKey,
    /// `None` while closing.
    pub slot: Option<usize>,
    pub lifecycle: Lifecycle,
    pub resting: Point,
    pub origin: Point,
    pub opacity: f32,
    pub shaking: bool,
    pub settling: bool,
}

#[derive(Debug)]
struct Stack {
    bounds: Rect,
    slots: SlotGroup,
}

pub struct Coordinator<R, S> {
    settings: CoordinatorSettings,
    renderer: R,
    screens: S,
    popups: HashMap<PopupId, PopupHandle>,
    stacks: HashMap<GroupKey, Stack>,
    timers: DismissTimers,
}

impl<R, S> Coordinator<R, S>
where
    R: Renderer,
    S: ScreenProvider,
{
    pub fn new(settings: CoordinatorSettings, renderer: R, screens: S) -> Self {
        Self {
            settings,
            renderer,
            screens,
            popups: HashMap::new(),
            stacks: HashMap::new(),
            timers: DismissTimers::new(),
        }
    }

    /// Put a new popup on screen.
    ///
    /// `icon` is the already resolved graphic; `None` renders without one.
    /// Returns `false` when the popup could not be placed (duplicate id or no
    /// screen at all).
    pub fn show(
        &mut self,
        id: PopupId,
        request: Arc<NotificationRequest>,
        icon: Option<Arc<Icon>>,
        now: Instant,
    ) -> bool {
        if self.popups.contains_key(&id) {
            warn!(popup_id = %id, "popup already shown, ignoring");
            return false;
        }
        let screens = self.screens.screens();
        let Some(target) = resolve(
            &screens,
            self.screens.pointer(),
            request.screen(),
            request.position(),
            self.settings.default_anchor,
        ) else {
            warn!(popup_id = %id, "no screen available, dropping popup");
            return false;
        };

        let key = GroupKey {
            screen: target.screen,
            anchor: target.anchor,
        };
        let size = request.size().unwrap_or(self.settings.layout.popup_size);
        let hide_after = request.hide_after();
        self.popups.insert(
            id,
            PopupHandle::new(id, request, icon, key, size),
        );

        let stack = self.stacks.entry(key).or_insert_with(|| Stack {
            bounds: target.bounds,
            slots: SlotGroup::new(),
        });
        stack.bounds = target.bounds;
        let slot = stack.slots.insert(id, key.anchor);
        let shifted = self.relayout(key, now);

        let animation = self.settings.animation;
        let Some(popup) = self.popups.get_mut(&id) else {
            return false;
        };
        popup.begin_showing(now, &animation);
        let view = PopupView {
            id,
            request: popup.request(),
            icon: popup.icon(),
            group: key,
            size,
            frame: popup.frame_at(now),
        };
        self.renderer.open(&view);

        if !hide_after.is_zero() {
            match now.checked_add(hide_after) {
                Some(deadline) => self.timers.schedule(id, deadline),
                None => debug!(popup_id = %id, ?hide_after, "delay out of range, never dismissing"),
            }
        }
        if animation.fade_in.is_zero() {
            popup.become_visible(now, &animation);
        }

        info!(
            popup_id = %id,
            screen = key.screen,
            anchor = %key.anchor,
            slot,
            shifted,
            hide_after_ms = u64::try_from(hide_after.as_millis()).unwrap_or(u64::MAX),
            "popup shown"
        );
        true
    }

    /// Start closing `id`: cancel its timer and shake, free its slot and
    /// move every sibling that was farther from the anchor one slot closer.
    ///
    /// Returns how many siblings changed slot. Unknown or already closing
    /// popups are left alone and yield 0.
    pub fn close(&mut self, id: PopupId, now: Instant) -> usize {
        let animation = self.settings.animation;
        let Some(popup) = self.popups.get_mut(&id) else {
            debug!(popup_id = %id, "close for unknown popup ignored");
            return 0;
        };
        let vacated = popup.slot();
        if !popup.begin_closing(now, &animation) {
            debug!(popup_id = %id, state = %popup.lifecycle(), "popup already closing");
            return 0;
        }
        let key = popup.group();
        self.timers.cancel(id);

        let mut shifted = 0;
        if let Some(stack) = self.stacks.get_mut(&key) {
            stack.slots.remove(id);
            if stack.slots.is_empty() {
                self.stacks.remove(&key);
            } else {
                shifted = self.relayout(key, now);
            }
        }
        info!(popup_id = %id, vacated = ?vacated, shifted, "popup closing");

        if animation.fade_out.is_zero() {
            self.finish_close(id);
        }
        shifted
    }

    /// Shake a visible popup, or remember the request until it becomes
    /// visible. A new shake replaces one in progress.
    pub fn shake(&mut self, id: PopupId, duration: Duration, amplitude: u32, now: Instant) {
        let animation = self.settings.animation;
        let Some(popup) = self.popups.get_mut(&id) else {
            debug!(popup_id = %id, "shake for unknown popup ignored");
            return;
        };
        let spec = ShakeSpec {
            duration,
            amplitude,
        };
        if popup.request_shake(spec, now, &animation) {
            debug!(popup_id = %id, amplitude, ?duration, "shaking popup");
        } else {
            debug!(popup_id = %id, state = %popup.lifecycle(), "shake deferred or dropped");
        }
    }

    /// A click landed on `id`. A body click runs the popup's action first;
    /// either kind of click closes it.
    pub fn click(&mut self, id: PopupId, region: ClickRegion, now: Instant) {
        let Some(popup) = self.popups.get(&id) else {
            debug!(popup_id = %id, "click on unknown popup ignored");
            return;
        };
        if !popup.lifecycle().is_live() {
            debug!(popup_id = %id, state = %popup.lifecycle(), "click on closing popup ignored");
            return;
        }
        if region == ClickRegion::Body {
            if let Some(action) = popup.request().on_action().cloned() {
                debug!(popup_id = %id, "running click action");
                action.invoke(id);
            }
        }
        self.close(id, now);
    }

    /// The renderer finished its own entry animation early.
    pub fn entry_finished(&mut self, id: PopupId, now: Instant) {
        let animation = self.settings.animation;
        if let Some(popup) = self.popups.get_mut(&id) {
            if popup.become_visible(now, &animation) {
                debug!(popup_id = %id, "popup visible");
            }
        }
    }

    /// The renderer finished its own exit animation early.
    pub fn exit_finished(&mut self, id: PopupId) {
        if self
            .popups
            .get(&id)
            .is_some_and(|popup| popup.lifecycle() == Lifecycle::Closing)
        {
            self.finish_close(id);
        }
    }

    /// Advance timers and animations to `now`, pushing changed frames to the
    /// renderer.
    pub fn tick(&mut self, now: Instant) {
        for id in self.timers.due(now) {
            info!(popup_id = %id, "auto-dismiss");
            self.close(id, now);
        }

        let animation = self.settings.animation;
        let mut exited = Vec::new();
        for (id, popup) in &mut self.popups {
            let step = popup.advance(now, &animation);
            if let Some(frame) = step.frame {
                self.renderer.update(*id, frame);
            }
            if step.entered {
                debug!(popup_id = %id, "popup visible");
            }
            if step.exited {
                exited.push(*id);
            }
        }
        for id in exited {
            self.finish_close(id);
        }
    }

    /// Whether any popup still has an animation to play.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.popups.values().any(PopupHandle::is_animating)
    }

    /// Every popup as drawn at `now`, grouped by stack in slot order;
    /// closing popups trail their stack.
    #[must_use]
    pub fn snapshot(&self, now: Instant) -> Vec<PopupSnapshot> {
        let mut all: Vec<_> = self
            .popups
            .values()
            .map(|popup| snapshot_of(popup, now))
            .collect();
        all.sort_by_key(|s| {
            (
                s.group.screen,
                s.group.anchor.as_str(),
                s.slot.unwrap_or(usize::MAX),
            )
        });
        all
    }

    #[must_use]
    pub fn popup(&self, id: PopupId, now: Instant) -> Option<PopupSnapshot> {
        self.popups.get(&id).map(|popup| snapshot_of(popup, now))
    }

    /// Ids of `group`, nearest the anchor first.
    #[must_use]
    pub fn group(&self, key: GroupKey) -> Vec<PopupId> {
        self.stacks
            .get(&key)
            .map(|stack| stack.slots.ids().to_vec())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.popups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.popups.is_empty()
    }

    #[must_use]
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Give the renderer back once the coordinator is done.
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    #[must_use]
    pub fn pending_dismissals(&self) -> usize {
        self.timers.len()
    }

    /// Dispose every popup at once, skipping exit animations.
    pub fn shutdown(&mut self) {
        let ids: Vec<_> = self.popups.keys().copied().collect();
        for id in ids {
            self.timers.cancel(id);
            self.renderer.dispose(id);
        }
        self.popups.clear();
        self.stacks.clear();
        info!("coordinator shut down");
    }

    /// Recompute slot targets of `key` and retarget every member.
    fn relayout(&mut self, key: GroupKey, now: Instant) -> usize {
        let Some(stack) = self.stacks.get(&key) else {
            return 0;
        };
        let popups = &self.popups;
        let targets = stack_targets(
            &stack.slots,
            stack.bounds,
            key.anchor,
            &self.settings.layout,
            |id| popups.get(&id).map_or(self.settings.layout.popup_size, PopupHandle::size),
        );

        let animation = self.settings.animation;
        let mut shifted = 0;
        for (slot, (id, origin)) in targets.into_iter().enumerate() {
            let Some(popup) = self.popups.get_mut(&id) else {
                continue;
            };
            let was_placed = popup.slot().is_some();
            if popup.retarget(slot, origin, now, &animation) && was_placed {
                debug!(popup_id = %id, slot, "re-slotted");
                shifted += 1;
            }
        }
        shifted
    }

    fn finish_close(&mut self, id: PopupId) {
        let Some(popup) = self.popups.get_mut(&id) else {
            return;
        };
        if popup.finish_closing() {
            self.renderer.dispose(id);
            self.popups.remove(&id);
            info!(popup_id = %id, "popup closed");
        }
    }
}

fn snapshot_of(popup: &PopupHandle, now: Instant) -> PopupSnapshot {
    PopupSnapshot {
        id: popup.id(),
        group: popup.group(),
        slot: popup.slot(),
        lifecycle: popup.lifecycle(),
        resting: popup.resting(),
        origin: popup.frame_at(now).origin,
        opacity: popup.opacity(),
        shaking: popup.is_shaking(),
        settling: popup.is_settling(),
    }
}

#[cfg(test)]
mod tests {
    use super::{Coordinator, CoordinatorSettings};
    use crate::config::AnimationSettings;
    use crate::layout::GroupKey;
    use crate::lifecycle::Lifecycle;
    use crate::render::{Frame, PopupView, Renderer};
    use crate::request::NotificationRequest;
    use crate::screen::StaticScreens;
    use crate::types::{ClickRegion, Point, PopupId, Position, Rect};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{Duration, Instant};

    #[derive(Default)]
    struct Recorder {
        opened: Vec<PopupId>,
        frames: Vec<(PopupId, Frame)>,
        disposed: Vec<PopupId>,
    }

    impl Renderer for Recorder {
        fn open(&mut self, view: &PopupView<'_>) {
            self.opened.push(view.id);
        }

        fn update(&mut self, id: PopupId, frame: Frame) {
            self.frames.push((id, frame));
        }

        fn dispose(&mut self, id: PopupId) {
            self.disposed.push(id);
        }
    }

    const BOTTOM_RIGHT: GroupKey = GroupKey {
        screen: 0,
        anchor: Position::BottomRight,
    };

    fn coordinator(animation: AnimationSettings) -> Coordinator<Recorder, StaticScreens> {
        let settings = CoordinatorSettings {
            animation,
            ..CoordinatorSettings::default()
        };
        Coordinator::new(
            settings,
            Recorder::default(),
            StaticScreens::new(vec![Rect::new(0, 0, 1920, 1080)]),
        )
    }

    fn show(
        coordinator: &mut Coordinator<Recorder, StaticScreens>,
        request: NotificationRequest,
        now: Instant,
    ) -> PopupId {
        let id = PopupId::new();
        assert!(coordinator.show(id, Arc::new(request), None, now));
        id
    }

    fn bottom_right() -> NotificationRequest {
        NotificationRequest::builder()
            .position(Position::BottomRight)
            .screen(0)
            .build()
    }

    fn live_slots(coordinator: &Coordinator<Recorder, StaticScreens>) -> Vec<usize> {
        let mut slots: Vec<_> = coordinator
            .snapshot(Instant::now())
            .into_iter()
            .filter(|s| s.group == BOTTOM_RIGHT)
            .filter_map(|s| s.slot)
            .collect();
        slots.sort_unstable();
        slots
    }

    #[test]
    fn newest_bottom_popup_sits_nearest_the_corner() {
        let now = Instant::now();
        let mut c = coordinator(AnimationSettings::instant());
        let first = show(&mut c, bottom_right(), now);
        let second = show(&mut c, bottom_right(), now);
        let third = show(&mut c, bottom_right(), now);
        assert_eq!(c.group(BOTTOM_RIGHT), vec![third, second, first]);
        assert_eq!(live_slots(&c), vec![0, 1, 2]);
        assert_eq!(c.popup(third, now).map(|s| s.resting), Some(Point::new(1600, 973)));
    }

    #[test]
    fn closing_the_middle_popup_closes_the_gap() {
        let now = Instant::now();
        let mut c = coordinator(AnimationSettings::instant());
        let first = show(&mut c, bottom_right(), now);
        let second = show(&mut c, bottom_right(), now);
        let third = show(&mut c, bottom_right(), now);

        assert_eq!(c.close(second, now), 1);
        assert_eq!(c.group(BOTTOM_RIGHT), vec![third, first]);
        assert_eq!(live_slots(&c), vec![0, 1]);
        assert_eq!(c.popup(first, now).map(|s| s.resting), Some(Point::new(1600, 876)));
        assert!(c.popup(second, now).is_none());
        assert_eq!(c.renderer().disposed, vec![second]);
    }

    #[test]
    fn closing_the_nearest_popup_shifts_everyone() {
        let now = Instant::now();
        let mut c = coordinator(AnimationSettings::default());
        let ids: Vec<_> = (0..4)
            .map(|_| {
                show(
                    &mut c,
                    NotificationRequest::builder()
                        .position(Position::TopLeft)
                        .screen(0)
                        .build(),
                    now,
                )
            })
            .collect();
        let later = now + Duration::from_secs(1);
        c.tick(later);
        assert_eq!(c.close(ids[0], later), 3);
        let key = GroupKey {
            screen: 0,
            anchor: Position::TopLeft,
        };
        for snapshot in c.snapshot(now).into_iter().filter(|s| s.group == key) {
            assert_eq!(snapshot.settling, snapshot.slot.is_some());
        }
    }

    #[test]
    fn close_is_idempotent() {
        let now = Instant::now();
        let mut c = coordinator(AnimationSettings::instant());
        let id = show(&mut c, bottom_right(), now);
        c.close(id, now);
        assert_eq!(c.close(id, now), 0);
        c.close(PopupId::new(), now);
        assert_eq!(c.renderer().disposed, vec![id]);
        assert!(c.is_empty());
    }

    #[test]
    fn exit_fade_keeps_popup_until_done() {
        let now = Instant::now();
        let animation = AnimationSettings::default();
        let mut c = coordinator(animation);
        let id = show(&mut c, bottom_right(), now);
        c.tick(now + animation.fade_in);
        assert_eq!(c.popup(id, now).map(|s| s.lifecycle), Some(Lifecycle::Visible));

        let closing_at = now + Duration::from_secs(1);
        c.close(id, closing_at);
        assert_eq!(c.popup(id, now).map(|s| s.lifecycle), Some(Lifecycle::Closing));
        c.tick(closing_at + animation.fade_out / 2);
        assert!(c.renderer().disposed.is_empty());
        c.tick(closing_at + animation.fade_out);
        assert_eq!(c.renderer().disposed, vec![id]);
    }

    #[test]
    fn renderer_can_finish_exit_early() {
        let now = Instant::now();
        let mut c = coordinator(AnimationSettings::default());
        let id = show(&mut c, bottom_right(), now);
        c.entry_finished(id, now);
        assert_eq!(c.popup(id, now).map(|s| s.lifecycle), Some(Lifecycle::Visible));
        c.close(id, now);
        c.exit_finished(id);
        assert!(c.popup(id, now).is_none());
    }

    #[test]
    fn auto_dismiss_fires_at_the_deadline() {
        let now = Instant::now();
        let mut c = coordinator(AnimationSettings::instant());
        let id = show(
            &mut c,
            NotificationRequest::builder()
                .hide_after(Duration::from_millis(500))
                .build(),
            now,
        );
        c.tick(now + Duration::from_millis(499));
        assert!(c.popup(id, now).is_some());
        c.tick(now + Duration::from_millis(500));
        assert!(c.popup(id, now).is_none());
    }

    #[test]
    fn zero_delay_never_dismisses() {
        let now = Instant::now();
        let mut c = coordinator(AnimationSettings::instant());
        let id = show(&mut c, bottom_right(), now);
        assert_eq!(c.pending_dismissals(), 0);
        c.tick(now + Duration::from_secs(3600));
        assert!(c.popup(id, now).is_some());
    }

    #[test]
    fn unbounded_delay_never_dismisses() {
        let now = Instant::now();
        let mut c = coordinator(AnimationSettings::instant());
        let id = show(
            &mut c,
            NotificationRequest::builder()
                .hide_after(Duration::MAX)
                .build(),
            now,
        );
        assert_eq!(c.pending_dismissals(), 0);
        c.tick(now + Duration::from_secs(86_400));
        assert!(c.popup(id, now).is_some());
        assert_eq!(c.close(id, now), 0);
        assert!(c.is_empty());
    }

    #[test]
    fn early_close_cancels_the_timer() {
        let now = Instant::now();
        let mut c = coordinator(AnimationSettings::instant());
        let id = show(
            &mut c,
            NotificationRequest::builder()
                .hide_after(Duration::from_millis(100))
                .build(),
            now,
        );
        assert_eq!(c.pending_dismissals(), 1);
        c.click(id, ClickRegion::CloseButton, now);
        assert_eq!(c.pending_dismissals(), 0);
    }

    #[test]
    fn body_click_runs_action_once_and_closes() {
        let now = Instant::now();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let mut c = coordinator(AnimationSettings::default());
        let id = show(
            &mut c,
            NotificationRequest::builder()
                .on_action(move |_| {
                    counter.fetch_add(1, Ordering::SeqCst);
                })
                .build(),
            now,
        );
        c.click(id, ClickRegion::Body, now);
        c.click(id, ClickRegion::Body, now);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(c.popup(id, now).map(|s| s.lifecycle), Some(Lifecycle::Closing));
    }

    #[test]
    fn close_button_skips_action() {
        let now = Instant::now();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let mut c = coordinator(AnimationSettings::instant());
        let id = show(
            &mut c,
            NotificationRequest::builder()
                .on_action(move |_| {
                    counter.fetch_add(1, Ordering::SeqCst);
                })
                .build(),
            now,
        );
        c.click(id, ClickRegion::CloseButton, now);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert!(c.popup(id, now).is_none());
    }

    #[test]
    fn shake_before_visible_is_deferred() {
        let now = Instant::now();
        let animation = AnimationSettings::default();
        let mut c = coordinator(animation);
        let id = show(&mut c, bottom_right(), now);
        c.shake(id, Duration::from_millis(400), 8, now);
        assert_eq!(c.popup(id, now).map(|s| s.shaking), Some(false));
        c.tick(now + animation.fade_in);
        assert_eq!(c.popup(id, now).map(|s| s.shaking), Some(true));
    }

    #[test]
    fn shake_ends_on_resting_position() {
        let now = Instant::now();
        let mut c = coordinator(AnimationSettings::instant());
        let id = show(&mut c, bottom_right(), now);
        c.shake(id, Duration::from_millis(400), 10, now);
        let resting = c.popup(id, now).map(|s| s.resting);
        c.tick(now + Duration::from_millis(31));
        c.tick(now + Duration::from_millis(400));
        let last = c
            .renderer()
            .frames
            .iter()
            .rev()
            .find(|(frame_id, _)| *frame_id == id)
            .map(|(_, frame)| frame.origin);
        assert_eq!(last, resting);
        assert_eq!(c.popup(id, now).map(|s| s.shaking), Some(false));
    }

    #[test]
    fn zero_amplitude_shake_never_moves() {
        let now = Instant::now();
        let mut c = coordinator(AnimationSettings::instant());
        let id = show(&mut c, bottom_right(), now);
        let resting = c.popup(id, now).map(|s| s.resting);
        c.shake(id, Duration::from_millis(200), 0, now);
        for ms in (0..=200).step_by(16) {
            c.tick(now + Duration::from_millis(ms));
        }
        assert!(
            c.renderer()
                .frames
                .iter()
                .all(|(_, frame)| Some(frame.origin) == resting)
        );
    }

    #[test]
    fn request_shake_applies_once_visible() {
        let now = Instant::now();
        let animation = AnimationSettings::default();
        let mut c = coordinator(animation);
        let id = show(
            &mut c,
            NotificationRequest::builder()
                .shake(Duration::from_millis(300), 4)
                .build(),
            now,
        );
        assert_eq!(c.popup(id, now).map(|s| s.shaking), Some(false));
        c.tick(now + animation.fade_in);
        assert_eq!(c.popup(id, now).map(|s| s.shaking), Some(true));
    }

    #[test]
    fn shaking_closed_popup_is_a_no_op() {
        let now = Instant::now();
        let mut c = coordinator(AnimationSettings::instant());
        let id = show(&mut c, bottom_right(), now);
        c.close(id, now);
        c.shake(id, Duration::from_millis(300), 4, now);
        c.click(id, ClickRegion::Body, now);
        assert!(c.is_empty());
    }

    #[test]
    fn settle_animations_land_on_new_slots() {
        let now = Instant::now();
        let animation = AnimationSettings::default();
        let mut c = coordinator(animation);
        let first = show(&mut c, bottom_right(), now);
        let second = show(&mut c, bottom_right(), now);
        let t1 = now + Duration::from_secs(1);
        c.tick(t1);
        assert_eq!(c.popup(first, now).map(|s| s.resting), Some(Point::new(1600, 876)));

        c.close(second, t1);
        assert_eq!(c.popup(first, now).map(|s| s.settling), Some(true));
        c.tick(t1 + animation.settle / 2);
        let midway = c
            .renderer()
            .frames
            .iter()
            .rev()
            .find(|(frame_id, _)| *frame_id == first)
            .map(|(_, f)| f.origin.y);
        assert!(midway.is_some_and(|y| y > 876 && y < 973));
        c.tick(t1 + animation.settle);
        let snapshot = c.popup(first, t1 + animation.settle);
        assert_eq!(snapshot.map(|s| s.origin), Some(Point::new(1600, 973)));
        assert_eq!(snapshot.map(|s| s.settling), Some(false));
        assert!(!c.is_animating());
    }

    #[test]
    fn groups_are_independent() {
        let now = Instant::now();
        let mut c = coordinator(AnimationSettings::instant());
        let corner = show(&mut c, bottom_right(), now);
        let top = show(
            &mut c,
            NotificationRequest::builder()
                .position(Position::TopCenter)
                .screen(0)
                .build(),
            now,
        );
        assert_eq!(c.popup(corner, now).map(|s| s.slot), Some(Some(0)));
        assert_eq!(c.popup(top, now).map(|s| s.slot), Some(Some(0)));
        assert_eq!(c.close(top, now), 0);
        assert_eq!(c.popup(corner, now).map(|s| s.slot), Some(Some(0)));
    }

    #[test]
    fn no_screens_drops_the_popup() {
        let now = Instant::now();
        let mut c = Coordinator::new(
            CoordinatorSettings::default(),
            Recorder::default(),
            StaticScreens::new(Vec::new()),
        );
        let id = PopupId::new();
        assert!(!c.show(id, Arc::new(NotificationRequest::default()), None, now));
        assert!(c.renderer().opened.is_empty());
    }

    #[test]
    fn shutdown_disposes_everything() {
        let now = Instant::now();
        let mut c = coordinator(AnimationSettings::default());
        let a = show(&mut c, bottom_right(), now);
        let b = show(&mut c, bottom_right(), now);
        c.shutdown();
        let mut disposed = c.renderer().disposed.clone();
        disposed.sort();
        let mut expected = vec![a, b];
        expected.sort();
        assert_eq!(disposed, expected);
        assert!(c.is_empty());
    }
}
