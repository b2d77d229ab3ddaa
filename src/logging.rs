//! Logging Setup
//!
//! Installs the global `tracing` subscriber. `RUST_LOG` wins over the
//! configured level. Output goes to stderr so command output on stdout stays
//! clean.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Initialize tracing for a binary.
///
/// `extra_directives` are appended to the default filter, e.g.
/// `"tower_http=debug"`.
pub fn init(config: &LoggingConfig, extra_directives: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(config, extra_directives)));

    let json = config.format.eq_ignore_ascii_case("json");

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .try_init();

    if let Err(e) = result {
        eprintln!("Logging already initialized: {}", e);
    }
}

fn default_directives(config: &LoggingConfig, extra_directives: &str) -> String {
    let mut directives = format!("wanderlist={}", config.level);
    if !extra_directives.is_empty() {
        directives.push(',');
        directives.push_str(extra_directives);
    }
    directives
}
