//! The coordinator task and the cloneable handle used to talk to it.
//!
//! One tokio task owns the [`Coordinator`] together with the renderer and
//! screen provider. Every request arrives through a bounded channel and is
//! applied in arrival order, interleaved with the animation tick, so no two
//! operations ever observe each other half done.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_channel::{Receiver, Sender, TrySendError, bounded};
use tokio::sync::oneshot;
use tokio::task::{self, JoinHandle};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::coordinator::{Coordinator, CoordinatorSettings, PopupSnapshot};
use crate::error::CoordinatorError;
use crate::icon::{Icon, IconRef, IconRegistry};
use crate::render::Renderer;
use crate::request::NotificationRequest;
use crate::screen::ScreenProvider;
use crate::types::{ClickRegion, PopupId};

#[derive(Debug)]
enum Command {
    Show {
        id: PopupId,
        request: Arc<NotificationRequest>,
        icon: Option<Arc<Icon>>,
    },
    Close(PopupId),
    Shake {
        id: PopupId,
        duration: Duration,
        amplitude: u32,
    },
    Click {
        id: PopupId,
        region: ClickRegion,
    },
    EntryFinished(PopupId),
    ExitFinished(PopupId),
    Snapshot(oneshot::Sender<Vec<PopupSnapshot>>),
    Shutdown,
}

/// Start the coordinator task.
///
/// The task stops on [`Notifier::shutdown`] or once every [`Notifier`] is
/// dropped; either way the remaining popups are disposed and the renderer is
/// handed back through the join handle.
pub fn spawn<R, S>(
    config: &Config,
    renderer: R,
    screens: S,
    icons: Arc<IconRegistry>,
) -> (Notifier, JoinHandle<R>)
where
    R: Renderer + Send + 'static,
    S: ScreenProvider + Send + 'static,
{
    let (tx, rx) = bounded(config.queue_capacity.max(1));
    let coordinator = Coordinator::new(CoordinatorSettings::from(config), renderer, screens);
    let task = tokio::spawn(run(coordinator, rx, config.animation.tick));
    (Notifier { tx, icons }, task)
}

async fn run<R, S>(
    mut coordinator: Coordinator<R, S>,
    rx: Receiver<Command>,
    tick: Duration,
) -> R
where
    R: Renderer,
    S: ScreenProvider,
{
    let mut ticker = interval(tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    info!(tick = ?tick, "popup coordinator started");

    loop {
        tokio::select! {
            command = rx.recv() => match command {
                Ok(Command::Shutdown) | Err(_) => break,
                Ok(command) => apply(&mut coordinator, command, now()),
            },
            _ = ticker.tick() => coordinator.tick(now()),
        }
    }

    coordinator.shutdown();
    coordinator.into_renderer()
}

fn apply<R, S>(coordinator: &mut Coordinator<R, S>, command: Command, now: Instant)
where
    R: Renderer,
    S: ScreenProvider,
{
    match command {
        Command::Show { id, request, icon } => {
            coordinator.show(id, request, icon, now);
        }
        Command::Close(id) => {
            coordinator.close(id, now);
        }
        Command::Shake {
            id,
            duration,
            amplitude,
        } => coordinator.shake(id, duration, amplitude, now),
        Command::Click { id, region } => coordinator.click(id, region, now),
        Command::EntryFinished(id) => coordinator.entry_finished(id, now),
        Command::ExitFinished(id) => coordinator.exit_finished(id),
        Command::Snapshot(reply) => {
            if reply.send(coordinator.snapshot(now)).is_err() {
                debug!("snapshot requester went away");
            }
        }
        Command::Shutdown => {}
    }
}

/// Follows tokio's clock so paused-time tests drive the animations.
fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

/// Cloneable handle to the coordinator task.
#[derive(Clone, Debug)]
pub struct Notifier {
    tx: Sender<Command>,
    icons: Arc<IconRegistry>,
}

impl Notifier {
    /// Queue a notification and return a handle to it.
    ///
    /// The icon is resolved here, off the async workers when it has to be
    /// read from disk; one that cannot be loaded is logged and the popup is
    /// shown without it.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinatorError::Stopped`] if the coordinator task is gone.
    pub async fn show(
        &self,
        request: impl Into<NotificationRequest>,
    ) -> Result<Toast, CoordinatorError> {
        let request = Arc::new(request.into());
        let icon = match request.icon() {
            Some(icon) => self.load_icon(icon).await,
            None => None,
        };
        let id = PopupId::new();
        self.send(Command::Show { id, request, icon }).await?;
        Ok(Toast {
            id,
            notifier: self.clone(),
        })
    }

    /// # Errors
    ///
    /// Returns [`CoordinatorError::Stopped`] if the coordinator task is gone.
    pub async fn close(&self, id: PopupId) -> Result<(), CoordinatorError> {
        self.send(Command::Close(id)).await
    }

    /// # Errors
    ///
    /// Returns [`CoordinatorError::Stopped`] if the coordinator task is gone.
    pub async fn shake(
        &self,
        id: PopupId,
        duration: Duration,
        amplitude: u32,
    ) -> Result<(), CoordinatorError> {
        self.send(Command::Shake {
            id,
            duration,
            amplitude,
        })
        .await
    }

    /// Forward a click the renderer observed.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinatorError::Stopped`] if the coordinator task is gone.
    pub async fn click(&self, id: PopupId, region: ClickRegion) -> Result<(), CoordinatorError> {
        self.send(Command::Click { id, region }).await
    }

    /// Renderer callback: the entry animation is done. Never blocks; a full
    /// queue drops the report and the coordinator's own fade takes over.
    pub fn entry_finished(&self, id: PopupId) {
        self.report(Command::EntryFinished(id));
    }

    /// Renderer callback: the exit animation is done.
    pub fn exit_finished(&self, id: PopupId) {
        self.report(Command::ExitFinished(id));
    }

    /// # Errors
    ///
    /// Returns [`CoordinatorError::Stopped`] if the coordinator task is gone.
    pub async fn snapshot(&self) -> Result<Vec<PopupSnapshot>, CoordinatorError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Snapshot(reply)).await?;
        rx.await.map_err(|_| CoordinatorError::Stopped)
    }

    /// Ask the coordinator to dispose everything and stop.
    pub async fn shutdown(&self) {
        if self.send(Command::Shutdown).await.is_err() {
            debug!("coordinator already stopped");
        }
    }

    async fn load_icon(&self, icon: &IconRef) -> Option<Arc<Icon>> {
        if let Some(bitmap) = self.icons.cached(icon) {
            return Some(bitmap);
        }
        let icons = Arc::clone(&self.icons);
        let icon = icon.clone();
        match task::spawn_blocking(move || icons.resolve_ref(&icon)).await {
            Ok(Ok(bitmap)) => Some(bitmap),
            Ok(Err(err)) => {
                warn!(error = %err, "icon unavailable, showing popup without it");
                None
            }
            Err(err) => {
                warn!(error = %err, "icon loader failed, showing popup without it");
                None
            }
        }
    }

    async fn send(&self, command: Command) -> Result<(), CoordinatorError> {
        self.tx
            .send(command)
            .await
            .map_err(|_| CoordinatorError::Stopped)
    }

    fn report(&self, command: Command) {
        match self.tx.try_send(command) {
            Ok(()) => {}
            Err(TrySendError::Full(command)) => {
                warn!(?command, "coordinator queue full, dropping renderer report");
            }
            Err(TrySendError::Closed(_)) => debug!("coordinator stopped, renderer report ignored"),
        }
    }
}

/// A shown notification.
#[derive(Clone, Debug)]
pub struct Toast {
    id: PopupId,
    notifier: Notifier,
}

impl Toast {
    #[must_use]
    pub const fn id(&self) -> PopupId {
        self.id
    }

    /// # Errors
    ///
    /// Returns [`CoordinatorError::Stopped`] if the coordinator task is gone.
    pub async fn close(&self) -> Result<(), CoordinatorError> {
        self.notifier.close(self.id).await
    }

    /// # Errors
    ///
    /// Returns [`CoordinatorError::Stopped`] if the coordinator task is gone.
    pub async fn shake(&self, duration: Duration, amplitude: u32) -> Result<(), CoordinatorError> {
        self.notifier.shake(self.id, duration, amplitude).await
    }
}
