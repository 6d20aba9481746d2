//! Platform-specific path helpers.
//!
//! | Platform | Config Dir | Data Dir |
//! |----------|------------|----------|
//! | Linux | `~/.config/splitpay` | `~/.local/share/splitpay` |
//! | macOS | `~/Library/Application Support/splitpay` | Same as config |
//! | Windows | `%APPDATA%/splitpay` | `%LOCALAPPDATA%/splitpay` |
//!
//! The default keypair follows the Solana CLI convention,
//! `~/.config/solana/id.json`, on every platform.

use color_eyre::Result;
use std::fs;
use std::path::PathBuf;

// ============================================================================
// Constants
// ============================================================================

/// Application name used for directory naming.
pub const APP_NAME: &str = "splitpay";

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Log file name.
pub const LOG_FILE_NAME: &str = "splitpay.log";

// ============================================================================
// AppPaths
// ============================================================================

/// Resolves application directories and files.
#[derive(Debug, Clone)]
pub struct AppPaths {
    app_name: String,
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}

impl AppPaths {
    #[must_use]
    pub fn new() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
        }
    }

    /// Uses a different directory name, e.g. to isolate tests.
    #[must_use]
    pub fn with_app_name(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }

    /// Returns the configuration directory, creating it if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be determined or created.
    pub fn config_dir(&self) -> Result<PathBuf> {
        let mut path = dirs::config_dir().ok_or_else(|| {
            color_eyre::eyre::eyre!(
                "Could not determine config directory. Expected XDG_CONFIG_HOME or ~/.config on Linux, ~/Library/Application Support on macOS, %APPDATA% on Windows"
            )
        })?;
        path.push(&self.app_name);
        fs::create_dir_all(&path)?;
        Ok(path)
    }

    /// Returns the data directory, creating it if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be determined or created.
    pub fn data_dir(&self) -> Result<PathBuf> {
        let mut path = dirs::data_dir()
            .ok_or_else(|| color_eyre::eyre::eyre!("Could not find data directory"))?;
        path.push(&self.app_name);
        fs::create_dir_all(&path)?;
        Ok(path)
    }

    /// Returns the path to the configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration directory cannot be determined
    /// or created.
    pub fn config_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Returns the path to the log file.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be determined or created.
    pub fn log_file(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(LOG_FILE_NAME))
    }

    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }
}

/// The Solana CLI's default keypair location.
///
/// Does not check that the file exists.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_keypair_path() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| color_eyre::eyre::eyre!("Could not find home directory"))?;
    Ok(home.join(".config").join("solana").join("id.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_name() {
        assert_eq!(AppPaths::new().app_name(), APP_NAME);
        assert_eq!(AppPaths::with_app_name("other").app_name(), "other");
    }

    #[test]
    fn test_file_names() {
        let paths = AppPaths::with_app_name(format!("splitpay-test-{}", std::process::id()));
        if let Ok(config) = paths.config_file() {
            assert!(config.ends_with(CONFIG_FILE_NAME));
            if let Some(dir) = config.parent() {
                fs::remove_dir_all(dir).ok();
            }
        }
        if let Ok(log) = paths.log_file() {
            assert!(log.ends_with(LOG_FILE_NAME));
            if let Some(dir) = log.parent() {
                fs::remove_dir_all(dir).ok();
            }
        }
    }

    #[test]
    fn test_default_keypair_path() {
        if let Ok(path) = default_keypair_path() {
            assert!(path.ends_with(".config/solana/id.json"));
        }
    }
}
