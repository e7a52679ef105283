//! Configuration loader for intake.
//!
//! Reads `intake.toml` and deserializes it into [`IntakeConfig`]. Falls back
//! to defaults when the file is missing or malformed.

use std::path::Path;

use intake_types::config::IntakeConfig;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "intake.toml";

/// Minimum HTTP timeout for submissions (safety floor).
const MIN_TIMEOUT_SECS: u64 = 1;

/// Load configuration from `path`.
///
/// - If the file does not exist, returns [`IntakeConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and
///   returns the default.
/// - Otherwise returns the parsed config with the timeout floor applied.
pub async fn load_config(path: &Path) -> IntakeConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config found at {}, using defaults", path.display());
            return IntakeConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return IntakeConfig::default();
        }
    };

    match toml::from_str::<IntakeConfig>(&content) {
        Ok(mut config) => {
            config.submission.timeout_secs = config.submission.timeout_secs.max(MIN_TIMEOUT_SECS);
            config
        }
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            IntakeConfig::default()
        }
    }
}
