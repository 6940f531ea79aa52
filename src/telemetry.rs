//! Logging setup and span constructors.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// Logs go to stderr. `RUST_LOG` overrides the default `warn` filter, which
/// keeps a passing run silent. `PROBE_LOG_FORMAT=json` switches to JSON lines.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let json = std::env::var("PROBE_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Standardized span constructors for probe observability.
pub mod spans {
    use tracing::{Span, info_span};

    /// Create a span for one probe run.
    pub fn probe(server: &str, nick: &str) -> Span {
        info_span!("probe", server = %server, nick = %nick)
    }
}
