use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Default directives used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info,service::facade=debug";

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    /// Parse a format name from configuration; unknown names fall back to compact.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

fn env_filter(default_directives: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives))
}

/// Initialize tracing subscriber with sensible defaults, writing to stderr.
/// - Respects `RUST_LOG` if set
/// - Falls back to [`DEFAULT_FILTER`]
pub fn init_logging_default() {
    init_logging(LogFormat::Compact, DEFAULT_FILTER);
}

/// Initialize tracing subscriber with JSON structured output.
pub fn init_logging_json() {
    init_logging(LogFormat::Json, DEFAULT_FILTER);
}

/// Initialize the global subscriber. Calling it twice is harmless; the second
/// call is ignored.
///
/// Logs go to stderr so they do not interleave with console menu output on stdout.
pub fn init_logging(format: LogFormat, default_directives: &str) {
    let builder = fmt()
        .with_env_filter(env_filter(default_directives))
        .with_target(true)
        .with_writer(io::stderr);
    let _ = match format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_names_are_case_insensitive() {
        assert_eq!(LogFormat::from_name("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::from_name(" compact "), LogFormat::Compact);
        assert_eq!(LogFormat::from_name("pretty"), LogFormat::Compact);
    }

    #[test]
    fn init_twice_does_not_panic() {
        init_logging_default();
        init_logging_json();
    }
}
