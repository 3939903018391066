// Tracing log adapter - Structured logging using tracing crate

use tracing_subscriber::EnvFilter;

use crate::adapters::toml_config::LoggingSection;

/// Install the global subscriber
///
/// Level precedence: `cli_level`, then `RUST_LOG`, then the configured
/// level. Output goes to stderr so the report on stdout stays
/// machine-readable. Calling this twice is harmless.
pub fn init(logging: &LoggingSection, cli_level: Option<&str>) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(logging, cli_level, rust_log.as_deref());

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = if logging.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

/// Pick the filter directives; an unparsable `RUST_LOG` is ignored
fn build_filter(logging: &LoggingSection, cli_level: Option<&str>, rust_log: Option<&str>) -> EnvFilter {
    if let Some(level) = cli_level {
        return EnvFilter::new(level.to_lowercase());
    }
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(logging.level.to_lowercase()))
}
