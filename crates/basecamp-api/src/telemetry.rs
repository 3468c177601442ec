//! Tracing setup driven by the resolved environment.

use basecamp_config::{LoadedEnv, Settings};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter directive: `RUST_LOG` if any source set it, else `LOG_LEVEL`
pub fn filter_directive<'a>(env: &'a LoadedEnv, settings: &'a Settings) -> &'a str {
    env.get("RUST_LOG")
        .filter(|v| !v.is_empty())
        .unwrap_or(settings.log_level.as_str())
}

/// Install the global JSON subscriber
pub fn init(env: &LoadedEnv, settings: &Settings) {
    let directive = filter_directive(env, settings);
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().json())
        .init();
}
