#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod animation;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod icon;
pub mod layout;
pub mod lifecycle;
pub mod popup;
pub mod render;
pub mod request;
pub mod screen;
pub mod service;
pub mod telemetry;
pub mod timer;
pub mod types;

pub type Result<T> = std::result::Result<T, error::Error>;
