//! Logging initialisation
//!
//! Filter precedence: `RUST_LOG`, then `-v`/`-vv`, then the config
//! `log.filter`, then `info`. Logs go to stderr so that `--json` output on
//! stdout stays machine readable.

use is_terminal::IsTerminal;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "info";

/// Pick the filter directive to use
pub fn filter_directive(rust_log: Option<&str>, verbose: u8, configured: Option<&str>) -> String {
    if let Some(env) = rust_log.filter(|s| !s.trim().is_empty()) {
        return env.to_string();
    }
    match verbose {
        0 => configured
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_FILTER)
            .to_string(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Install the global subscriber. Calling it twice is a no-op.
pub fn init_logging(verbose: u8, configured: Option<&str>) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let directive = filter_directive(rust_log.as_deref(), verbose, configured);
    let env_filter =
        EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let ansi = std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal();

    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose > 0)
                .with_thread_ids(false)
                .with_ansi(ansi),
        )
        .with(env_filter)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_log_wins() {
        assert_eq!(filter_directive(Some("warn"), 2, Some("debug")), "warn");
    }

    #[test]
    fn verbosity_beats_config() {
        assert_eq!(filter_directive(None, 1, Some("warn")), "debug");
        assert_eq!(filter_directive(None, 3, None), "trace");
    }

    #[test]
    fn config_then_default() {
        assert_eq!(
            filter_directive(None, 0, Some("workerhub=debug")),
            "workerhub=debug"
        );
        assert_eq!(filter_directive(Some(""), 0, None), "info");
    }
}
