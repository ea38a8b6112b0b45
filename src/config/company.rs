//! Company configuration loading from config.toml
//!
//! This module provides functionality to load the company profile and the
//! default role definitions from a TOML configuration file. The values
//! defined in config.toml are used to seed the database on first run.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Company profile written into the settings table
    pub company: CompanyConfig,
    /// Roles created on first run, with their capability grants
    #[serde(default)]
    pub roles: Vec<RoleConfig>,
}

/// Company profile persisted as settings
#[derive(Debug, Deserialize, Clone)]
pub struct CompanyConfig {
    /// Display name of the business
    pub name: String,
    /// Postal address shown on receipts
    #[serde(default)]
    pub address: String,
    /// Contact phone number
    #[serde(default)]
    pub phone: String,
    /// Currency symbol used by the view layer (e.g., "$")
    #[serde(default = "default_currency")]
    pub currency: String,
}

/// A role to seed, with the string forms of its capabilities
#[derive(Debug, Deserialize, Clone)]
pub struct RoleConfig {
    /// Role name (e.g., "manager")
    pub name: String,
    /// Capability strings, e.g. `["manage_orders", "view_reports"]`
    #[serde(default)]
    pub capabilities: Vec<String>,
}

fn default_currency() -> String {
    "$".to_string()
}

/// Loads company configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads company configuration from the default location (./config.toml)
pub fn load_default_config() -> Result<Config> {
    load_config("config.toml")
}
