//! Tracing subscriber setup.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use shadowkit_error::{ConfigError, ShadowkitResult};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info,shadowkit=debug";

/// Log output settings, the `[tracing]` section of `shadowkit.toml`.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters,
)]
#[setters(prefix = "with_")]
pub struct TracingConfig {
    /// Filter directives used when `RUST_LOG` is not set
    #[serde(default = "default_filter")]
    #[setters(into)]
    filter: String,

    /// Emit JSON lines instead of human-readable text
    #[serde(default)]
    json: bool,
}

fn default_filter() -> String {
    DEFAULT_FILTER.to_string()
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

/// Install a text subscriber with the default filter.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing() -> ShadowkitResult<()> {
    init_tracing_with_config(&TracingConfig::default())
}

/// Install a subscriber configured by `config`.
///
/// `RUST_LOG` takes precedence over [`TracingConfig::filter`].
///
/// # Errors
///
/// Fails if the filter directives do not parse or a global subscriber is
/// already installed.
pub fn init_tracing_with_config(config: &TracingConfig) -> ShadowkitResult<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.filter).map_err(|e| {
            ConfigError::in_section("tracing", format!("Invalid filter '{}': {}", config.filter, e))
        })?,
    };

    let registry = tracing_subscriber::registry().with(env_filter);
    let installed = if config.json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer()).try_init()
    };
    installed.map_err(|e| {
        ConfigError::in_section("tracing", format!("Failed to install subscriber: {}", e))
    })?;

    tracing::info!(json = config.json, "Tracing initialized");
    Ok(())
}
