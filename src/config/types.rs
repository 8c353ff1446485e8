//! Configuration section types

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset (e.g. "trueline=info")
    pub level: String,
    /// "pretty" or "json"
    pub format: String,
}

impl LoggingConfig {
    /// Install the global tracing subscriber
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
            _ => {
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StakingConfig {
    /// Bankroll used when a command does not pass one
    pub bankroll: f64,
    /// Fraction of full Kelly, (0, 1]
    pub kelly_multiplier: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DevigConfig {
    /// Methods run by `compare` and `devig` when none are given
    pub methods: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Directory for bet log exports
    pub data_dir: String,
    /// Export the session log after `compare`
    pub csv_enabled: bool,
}
