use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::signal;
use tokio::time::sleep;
use tracing::{info, warn};

use toaster::Result;
use toaster::config::Config;
use toaster::icon::IconRegistry;
use toaster::render::TracingRenderer;
use toaster::request::NotificationRequest;
use toaster::screen::StaticScreens;
use toaster::service::{Notifier, spawn};
use toaster::telemetry::init_tracing;

use super::cli::Cli;

const DEFAULT_CONFIG: &str = "toaster.toml";
const SHAKE_DURATION: Duration = Duration::from_millis(500);
const IDLE_POLL: Duration = Duration::from_millis(100);

pub async fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.log_filter.as_deref(), cli.json_logs)?;

    let mut config = match cli.config.as_deref() {
        Some(path) => Config::from_env_and_required_file(path)?,
        None => Config::from_env_and_file(Path::new(DEFAULT_CONFIG))?,
    };
    if let Some(position) = cli.position {
        config.default_anchor = position;
    }

    let icons = Arc::new(IconRegistry::new(&config.icons));
    let screens = StaticScreens::new(config.screens.clone());
    let (notifier, task) = spawn(&config, TracingRenderer, screens, icons);

    tokio::select! {
        biased;
        _ = signal::ctrl_c() => {
            info!("shutdown signal received");
        }
        res = show_all(&notifier, &cli) => {
            res?;
            if cli.hide_after.is_some() {
                wait_until_dismissed(&notifier).await?;
            } else if let Err(err) = signal::ctrl_c().await {
                warn!(error = %err, "failed to listen for shutdown signal");
            }
        }
    }

    notifier.shutdown().await;
    if let Err(err) = task.await {
        warn!(error = %err, "coordinator task terminated unexpectedly");
    }
    Ok(())
}

async fn show_all(notifier: &Notifier, cli: &Cli) -> Result<()> {
    for n in 1..=cli.count {
        let request = build_request(cli, n);
        let toast = notifier.show(request).await?;
        info!(popup_id = %toast.id(), n, "notification queued");
        if n < cli.count {
            sleep(cli.stagger).await;
        }
    }
    Ok(())
}

fn build_request(cli: &Cli, n: u32) -> NotificationRequest {
    let mut builder = NotificationRequest::builder()
        .title(format!("Notification {n}"))
        .text(format!("{n} of {}", cli.count))
        .information()
        .on_action(move |id| info!(popup_id = %id, n, "notification clicked"));
    if let Some(position) = cli.position {
        builder = builder.position(position);
    }
    if let Some(screen) = cli.screen {
        builder = builder.screen(screen);
    }
    if let Some(delay) = cli.hide_after {
        builder = builder.hide_after(delay);
    }
    if let Some(amplitude) = cli.shake {
        builder = builder.shake(SHAKE_DURATION, amplitude);
    }
    if cli.dark {
        builder = builder.dark_style();
    }
    builder.build()
}

async fn wait_until_dismissed(notifier: &Notifier) -> Result<()> {
    loop {
        tokio::select! {
            _ = signal::ctrl_c() => {
                info!("shutdown signal received");
                return Ok(());
            }
            () = sleep(IDLE_POLL) => {}
        }
        if notifier.snapshot().await?.is_empty() {
            info!("all notifications dismissed");
            return Ok(());
        }
    }
}
