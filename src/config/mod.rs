//! Configuration management for trueline
//!
//! Built-in defaults, then optional YAML/TOML files, then `TRUELINE__*`
//! environment variables (a `.env` file is read first).

mod types;

pub use types::*;

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::types::DevigMethod;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub staking: StakingConfig,
    pub devig: DevigConfig,
    pub export: ExportConfig,
}

impl AppConfig {
    /// Load configuration; `path` replaces the default file lookup
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut builder = Config::builder()
            // Logging defaults
            .set_default("logging.level", "trueline=info,warn")?
            .set_default("logging.format", "pretty")?
            // Staking defaults
            .set_default("staking.bankroll", 1000.0)?
            .set_default("staking.kelly_multiplier", 0.5)?
            // De-vig defaults
            .set_default(
                "devig.methods",
                DevigMethod::ALL
                    .iter()
                    .map(|m| m.as_str())
                    .collect::<Vec<_>>(),
            )?
            // Export defaults
            .set_default("export.data_dir", "./data")?
            .set_default("export.csv_enabled", false)?;

        builder = match path {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder
                .add_source(File::with_name("config/default").required(false))
                .add_source(File::with_name("config/local").required(false)),
        };

        let config = builder
            // Override with environment variables (TRUELINE__STAKING__BANKROLL=...)
            .add_source(
                Environment::with_prefix("TRUELINE")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("devig.methods")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let app_config: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        app_config.validate()?;

        Ok(app_config)
    }

    /// Reject values the core would refuse later anyway
    pub fn validate(&self) -> Result<()> {
        if !self.staking.bankroll.is_finite() || self.staking.bankroll <= 0.0 {
            bail!(
                "staking.bankroll must be positive, got {}",
                self.staking.bankroll
            );
        }
        let k = self.staking.kelly_multiplier;
        if !k.is_finite() || k <= 0.0 || k > 1.0 {
            bail!("staking.kelly_multiplier must lie in (0, 1], got {}", k);
        }
        if self.devig.methods.is_empty() {
            bail!("devig.methods must name at least one method");
        }
        self.methods()?;
        Ok(())
    }

    /// Configured de-vig methods, parsed
    pub fn methods(&self) -> Result<Vec<DevigMethod>> {
        self.devig
            .methods
            .iter()
            .map(|name| match DevigMethod::from_str(name) {
                Some(method) => Ok(method),
                None => bail!("unknown de-vig method '{}'", name),
            })
            .collect()
    }

    /// One-line summary for logging
    pub fn digest(&self) -> String {
        format!(
            "bankroll={:.2} kelly={:.2} methods={:?} csv_export={}",
            self.staking.bankroll,
            self.staking.kelly_multiplier,
            self.devig.methods,
            self.export.csv_enabled
        )
    }
}

impl std::fmt::Display for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.digest())
    }
}
