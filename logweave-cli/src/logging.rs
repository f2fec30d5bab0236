//! Logging initialization for the logweave CLI.
//!
//! Configures `tracing-subscriber` from the `[general]` section of
//! `LogweaveConfig`. Log lines go to stderr so command output on stdout
//! stays machine-readable.

use std::path::Path;

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use logweave_core::config::{GeneralConfig, LogweaveConfig};

/// Resolve the `[general]` section used for CLI logging.
///
/// The config file's section (with `LOGWEAVE_GENERAL_*` overrides) is used when
/// the file loads. Otherwise logs fall back to `warn` / `pretty`; the load
/// failure itself is reported by the command. `--log-level` always wins.
pub async fn resolve_general(config_path: &Path, log_level: Option<&str>) -> GeneralConfig {
    let mut general = LogweaveConfig::load(config_path)
        .await
        .map(|config| config.general)
        .unwrap_or_else(|_| cli_default_general());
    if let Some(level) = log_level {
        general.log_level = level.to_owned();
    }
    general
}

fn cli_default_general() -> GeneralConfig {
    GeneralConfig {
        log_level: "warn".to_owned(),
        log_format: "pretty".to_owned(),
    }
}

/// Initialize the global tracing subscriber.
///
/// Must be called exactly once, before any tracing macros are used.
///
/// # Formats
///
/// * `"json"` - Machine-parseable JSON lines
/// * `"pretty"` - Human-readable output
pub fn init_tracing(config: &GeneralConfig) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    match config.log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .try_init()
                .map_err(|e| {
                    anyhow::anyhow!("failed to initialize JSON tracing subscriber: {}", e)
                })?;
        }
        "pretty" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr),
                )
                .try_init()
                .map_err(|e| {
                    anyhow::anyhow!("failed to initialize pretty tracing subscriber: {}", e)
                })?;
        }
        _ => {
            return Err(anyhow::anyhow!(
                "unknown log format '{}', expected 'json' or 'pretty'",
                config.log_format
            ));
        }
    }

    Ok(())
}
