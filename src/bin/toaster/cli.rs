use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};
use humantime::parse_duration;
use toaster::types::Position;

#[allow(clippy::struct_excessive_bools)]
#[derive(Parser, Debug)]
#[command(author, version, about = "Headless popup notification demo", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Number of notifications to show.
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..=50))]
    pub count: u32,

    /// Corner or edge to stack against (e.g. "top-left").
    #[arg(long)]
    pub position: Option<Position>,

    /// Screen index; omit to follow the pointer.
    #[arg(long, allow_negative_numbers = true)]
    pub screen: Option<i32>,

    /// Auto-dismiss delay (e.g. "3s"); omit to keep popups until Ctrl-C.
    #[arg(long, value_parser = parse_duration)]
    pub hide_after: Option<Duration>,

    /// Delay between two consecutive notifications.
    #[arg(long, value_parser = parse_duration, default_value = "250ms")]
    pub stagger: Duration,

    /// Shake every popup with this amplitude once visible.
    #[arg(long, value_name = "AMPLITUDE")]
    pub shake: Option<u32>,

    /// Render with the dark style.
    #[arg(long, action = ArgAction::SetTrue)]
    pub dark: bool,

    /// Use a JSON log layer (`--features json-logs`).
    #[arg(long, action = ArgAction::SetTrue)]
    pub json_logs: bool,

    /// Explicit log filter (e.g. "toaster=debug").
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
