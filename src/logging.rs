//! Tracing subscriber setup shared by the server and `dashctl`.

use std::str::FromStr;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the global subscriber. Output goes to stderr.
///
/// `RUST_LOG` wins when set. Otherwise a bare level such as `"debug"` gets
/// quieter defaults for the HTTP stack, while a full directive string (with
/// `,` or `=`) is used as-is.
pub fn init(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::from_str(&filter_spec(log_level)).unwrap_or_else(|_| EnvFilter::new("info"))
    });
    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        let json_layer = fmt::layer()
            .json()
            .with_target(false)
            .with_current_span(false)
            .with_writer(std::io::stderr);
        let _ = subscriber.with(json_layer).try_init();
    } else {
        let fmt_layer = fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr)
            .compact();
        let _ = subscriber.with(fmt_layer).try_init();
    }
}

fn filter_spec(log_level: &str) -> String {
    let normalized = log_level.trim();
    if normalized.is_empty() {
        return "info".to_string();
    }
    if normalized.contains(',') || normalized.contains('=') {
        normalized.to_string()
    } else {
        format!("{normalized},h2=info,hyper=info,hyper_util=info,reqwest=info")
    }
}
