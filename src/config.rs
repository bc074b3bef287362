//! Persisted wallet-session cache.
//!
//! The auth client restores a prior session from this file; logout removes
//! it. This is the only state the client keeps on disk.

use crate::environment::Environment;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::{fs, path::Path};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Wallet address the cached session was established for.
    pub wallet_address: String,
    /// Session token issued by the auth service. Opaque.
    pub provider_token: String,
    /// Environment the session belongs to.
    pub environment: Environment,
}

impl Config {
    /// Create Config with the given wallet address and session token.
    pub fn new(wallet_address: String, provider_token: String, environment: Environment) -> Self {
        Config {
            wallet_address,
            provider_token,
            environment,
        }
    }

    /// Loads configuration from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        let config: Config = serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// Saves the configuration to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if writing to file fails or serialization fails.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Clear the cached session file.
    pub fn clear_session(path: &Path) -> std::io::Result<()> {
        // Check that the path ends with config.json
        if !path.ends_with("config.json") {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path must end with config.json",
            ));
        }

        // If no file exists, return OK
        if !path.exists() {
            return Ok(());
        }

        // If the file exists, remove it
        fs::remove_file(path)
    }
}

/// Path of the session cache file: `~/.chaincms/config.json`.
pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
    let home = home::home_dir().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::NotFound, "Home directory not found")
    })?;
    Ok(home.join(".chaincms").join("config.json"))
}
