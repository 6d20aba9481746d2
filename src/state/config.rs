//! Application configuration with persistence.
//!
//! The configuration file is stored at:
//! - Linux: `~/.config/splitpay/config.json`
//! - macOS: `~/Library/Application Support/splitpay/config.json`
//! - Windows: `%APPDATA%/splitpay/config.json`
//!
//! Command-line flags override these values for a single run and are only
//! written back with `--save-config`.
//!
//! # Example
//!
//! ```ignore
//! use crate::state::AppConfig;
//!
//! let mut config = AppConfig::load();
//! config.cluster = Cluster::Testnet;
//! config.save()?;
//! ```

use color_eyre::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use super::platform::AppPaths;
use crate::constants::TICK_RATE;
use crate::domain::{AddressCheck, Cluster};

// ============================================================================
// Constants
// ============================================================================

/// How long the "copied" indicator stays visible by default.
pub const DEFAULT_COPIED_INDICATOR_MS: u64 = 1500;

/// How long toasts stay visible by default.
pub const DEFAULT_TOAST_MS: u64 = 2000;

// ============================================================================
// AppConfig
// ============================================================================

/// Persisted application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Cluster to connect to.
    pub cluster: Cluster,
    /// RPC endpoint overriding the cluster default.
    pub rpc_url: Option<String>,
    /// Keypair file overriding the Solana CLI default.
    pub keypair_path: Option<PathBuf>,
    /// Require addresses to decode to a 32-byte key.
    pub strict_address_check: bool,
    /// Lifetime of the "copied" indicator in milliseconds.
    pub copied_indicator_ms: u64,
    /// Lifetime of toast notifications in milliseconds.
    pub toast_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cluster: Cluster::default(),
            rpc_url: None,
            keypair_path: None,
            strict_address_check: true,
            copied_indicator_ms: DEFAULT_COPIED_INDICATOR_MS,
            toast_ms: DEFAULT_TOAST_MS,
        }
    }
}

impl AppConfig {
    /// Returns the path to the configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration directory cannot be determined
    /// or created.
    pub fn config_path() -> Result<PathBuf> {
        AppPaths::new().config_file()
    }

    /// Loads the configuration from disk, falling back to defaults.
    #[must_use]
    pub fn load() -> Self {
        match Self::try_load() {
            Ok(config) => config,
            Err(err) => {
                tracing::info!("Config load failed, using defaults: {err}");
                Self::default()
            }
        }
    }

    /// Attempts to load the configuration from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be located, read or parsed.
    pub fn try_load() -> Result<Self> {
        let path = Self::config_path()?;
        let content = fs::read_to_string(&path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Saves the configuration to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be located, serialized or written.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content)?;
        tracing::info!(path = %path.display(), "config saved");
        Ok(())
    }

    /// The RPC endpoint to use: the override, else the cluster default.
    #[must_use]
    pub fn effective_rpc_url(&self) -> &str {
        self.rpc_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| self.cluster.rpc_url())
    }

    /// Address validation mode selected by `strict_address_check`.
    #[must_use]
    pub const fn address_check(&self) -> AddressCheck {
        AddressCheck::from_strict(self.strict_address_check)
    }

    /// Copied-indicator lifetime in UI ticks.
    #[must_use]
    pub fn copied_indicator_ticks(&self) -> u16 {
        ms_to_ticks(self.copied_indicator_ms)
    }

    /// Toast lifetime in UI ticks.
    #[must_use]
    pub fn toast_ticks(&self) -> u16 {
        ms_to_ticks(self.toast_ms)
    }
}

/// Converts a duration to loop ticks, rounding up so short durations still
/// show for at least one tick.
fn ms_to_ticks(ms: u64) -> u16 {
    let tick_ms = u64::try_from(TICK_RATE.as_millis()).unwrap_or(u64::MAX).max(1);
    let ticks = Duration::from_millis(ms).as_millis().div_ceil(u128::from(tick_ms));
    u16::try_from(ticks).unwrap_or(u16::MAX).max(1)
}

// ============================================================================
// Tests
// ============================================================================
