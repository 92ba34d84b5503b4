use tracing_subscriber::EnvFilter;

use crate::config::Environment;

/// Install the global subscriber. `RUST_LOG` wins over the per-environment
/// default; production logs JSON lines.
pub fn init(environment: Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(environment)));

    match environment {
        Environment::Production => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
        _ => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

fn default_directives(environment: Environment) -> &'static str {
    match environment {
        Environment::Development => "info,tower_http=debug",
        Environment::Production => "info",
        Environment::Test => "error",
    }
}
