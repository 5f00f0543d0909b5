//! `TOASTER_*` override lookups. An unset or blank variable means "keep the
//! file value"; a value that does not parse is reported against its variable
//! name.

use std::time::Duration;

use humantime::parse_duration;

use crate::error::ConfigError;

type Lookup<T> = std::result::Result<Option<T>, ConfigError>;

pub(super) fn env_string(key: &'static str) -> Lookup<String> {
    read(key).map(|value| value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()))
}

pub(super) fn env_parse<T>(key: &'static str) -> Lookup<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, read(key)?, str::parse::<T>)
}

/// Humantime syntax only (`"150ms"`, `"2s"`); bare numbers are rejected.
pub(super) fn env_duration(key: &'static str) -> Lookup<Duration> {
    parse_value(key, read(key)?, parse_duration)
}

fn read(key: &'static str) -> Lookup<String> {
    match std::env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(err) => Err(ConfigError::InvalidField {
            field: key,
            message: err.to_string(),
        }),
    }
}

fn parse_value<T, E>(
    key: &'static str,
    raw: Option<String>,
    parse: impl FnOnce(&str) -> std::result::Result<T, E>,
) -> Lookup<T>
where
    E: std::fmt::Display,
{
    let Some(raw) = raw.filter(|value| !value.trim().is_empty()) else {
        return Ok(None);
    };
    parse(raw.trim())
        .map(Some)
        .map_err(|err| ConfigError::InvalidField {
            field: key,
            message: format!("{err} (got {raw:?})"),
        })
}
