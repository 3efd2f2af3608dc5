//! Subscriber setup for the command-line tool.
//!
//! Library code only emits `tracing` events; installing a subscriber is left
//! to the binary (or the host application).

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const VERBOSE_DIRECTIVE: &str = "simple_presenter=trace,info";
const QUIET_DIRECTIVE: &str = "simple_presenter=warn";
const JSON_DIRECTIVE: &str = "simple_presenter=info";

/// Default filter when `RUST_LOG` is not set.
pub fn filter_directive(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_DIRECTIVE
    } else {
        QUIET_DIRECTIVE
    }
}

fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Compact single-line output on stderr; stdout stays free for rendered presenters.
pub fn cli_subscriber(verbose: bool) -> impl tracing::Subscriber + Send + Sync {
    tracing_subscriber::registry()
        .with(env_filter(filter_directive(verbose)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
}

/// One JSON object per event on stderr, for hosts that ship logs to an aggregator.
/// Selected by `--json-logs`.
pub fn json_subscriber() -> impl tracing::Subscriber + Send + Sync {
    tracing_subscriber::registry()
        .with(env_filter(JSON_DIRECTIVE))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .json(),
        )
}

pub fn init_cli_logger(verbose: bool) {
    cli_subscriber(verbose).init();
}

pub fn init_json_logger() {
    json_subscriber().init();
}
