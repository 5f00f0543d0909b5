use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt};

use crate::Result;
use crate::error::Error;

/// Popup decisions at `info`, everything else (tokio, config) only when it
/// warns.
pub const DEFAULT_FILTER: &str = "warn,toaster=info";

/// Install the global tracing subscriber.
///
/// See [`select_filter`] for how the filter is chosen.
///
/// # Errors
///
/// Returns an error if no filter candidate is valid, if JSON output is
/// requested from a build without the `json-logs` feature, or if a global
/// subscriber is already installed.
pub fn init_tracing(explicit_filter: Option<&str>, use_json: bool) -> Result<()> {
    let from_env = std::env::var("RUST_LOG").ok();
    let filter = select_filter(explicit_filter, from_env.as_deref())?;

    #[cfg(feature = "json-logs")]
    if use_json {
        let subscriber = Registry::default().with(filter).with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .json()
                .flatten_event(true)
                .with_current_span(false),
        );
        return tracing::subscriber::set_global_default(subscriber)
            .map_err(|err| Error::Telemetry(err.to_string()));
    }

    #[cfg(not(feature = "json-logs"))]
    if use_json {
        return Err(Error::Telemetry(
            "JSON logs need a build with the `json-logs` feature".to_string(),
        ));
    }

    // Frames are logged per tick at debug; keep lines short.
    let subscriber = Registry::default().with(filter).with(
        tracing_subscriber::fmt::layer()
            .compact()
            .with_target(false),
    );
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|err| Error::Telemetry(err.to_string()))
}

/// First filter that parses among `explicit`, `from_env` and
/// [`DEFAULT_FILTER`]. Blank candidates are skipped.
///
/// # Errors
///
/// Only if every candidate is invalid, which cannot happen while
/// [`DEFAULT_FILTER`] parses.
pub fn select_filter(explicit: Option<&str>, from_env: Option<&str>) -> Result<EnvFilter> {
    [explicit, from_env, Some(DEFAULT_FILTER)]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|candidate| !candidate.is_empty())
        .find_map(|candidate| EnvFilter::try_new(candidate).ok())
        .ok_or_else(|| Error::Telemetry("no valid log filter".to_string()))
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_FILTER, select_filter};

    fn chosen(explicit: Option<&str>, from_env: Option<&str>) -> String {
        select_filter(explicit, from_env)
            .unwrap_or_else(|err| panic!("a filter should be chosen: {err}"))
            .to_string()
    }

    #[test]
    fn explicit_filter_wins() {
        assert_eq!(chosen(Some("toaster=debug"), Some("error")), "toaster=debug");
    }

    #[test]
    fn falls_back_to_rust_log_then_default() {
        assert_eq!(chosen(None, Some("error")), "error");
        assert_eq!(chosen(Some("  "), None), chosen(None, Some(DEFAULT_FILTER)));
    }

    #[test]
    fn default_keeps_crate_at_info() {
        let filter = chosen(None, None);
        assert!(filter.contains("toaster=info"));
        assert!(filter.contains("warn"));
    }
}
