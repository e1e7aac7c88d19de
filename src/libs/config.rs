//! Configuration management for the tsheet client.
//!
//! The configuration lives as JSON in the platform application-data
//! directory. Only one module exists today (the backend server connection),
//! but the structure is modular so further integrations stay optional and a
//! missing file simply means "nothing configured yet".
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tsheet::libs::config::Config;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::read()?;
//! if let Some(server) = &config.server {
//!     println!("Backend: {}", server.api_url);
//! }
//! # Ok(())
//! # }
//! ```

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_error_anyhow;

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Connection parameters for the business-operations backend.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ServerConfig {
    /// Base URL of the backend API, e.g. `https://ops.example.com/api`.
    pub api_url: String,

    /// Bearer token sent with every request. How the token is obtained is
    /// outside this client's scope; it is carried as an opaque string.
    pub auth_token: String,
}

impl ServerConfig {
    /// Interactive setup, pre-filled with any existing values.
    pub fn init(existing: &Option<ServerConfig>) -> Result<Self> {
        let current = existing.clone().unwrap_or(Self {
            api_url: String::new(),
            auth_token: String::new(),
        });
        println!("Backend server settings");
        Ok(Self {
            api_url: Input::with_theme(&ColorfulTheme::default())
                .with_prompt("Enter the backend API URL")
                .default(current.api_url)
                .interact_text()?,
            auth_token: Input::with_theme(&ColorfulTheme::default())
                .with_prompt("Enter your API token")
                .default(current.auth_token)
                .interact_text()?,
        })
    }
}

/// Root configuration object.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,
}

impl Config {
    /// Loads the configuration, falling back to defaults when no file exists.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Runs the interactive setup wizard and returns the updated config.
    pub fn init() -> Result<Config> {
        let existing = Config::read().unwrap_or_default();
        Ok(Config {
            server: Some(ServerConfig::init(&existing.server)?),
        })
    }

    /// The server connection, or a hint to run `init` when absent.
    pub fn server(&self) -> Result<&ServerConfig> {
        self.server
            .as_ref()
            .ok_or_else(|| msg_error_anyhow!(Message::ConfigServerMissing))
    }
}
