pub mod types;
use crate::error::Result;
use std::path::Path;
use tracing::{debug, warn};
use types::CONFIG_PATH;
pub use types::{
    CONFIG, CallbackDataConfig, Config, FmtDirective, LogConfig, LogFormat, NetworkConfig,
};

impl Config {
    fn new() -> Self {
        Self::load(std::env::var(CONFIG_PATH).ok())
    }

    /// Config from the file at `path`, defaults when no path is given or the
    /// file cannot be used
    fn load(path: Option<String>) -> Self {
        let Some(path) = path else {
            debug!("{} is not set, using default config", CONFIG_PATH);
            return Self::default();
        };
        match Self::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring config {}, using defaults: {}", path, e);
                Self::default()
            }
        }
    }

    /// Parse config from a TOML string, missing keys take their defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str::<Config>(content).map_err(|e| e.into())
    }

    /// Read and parse a TOML config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Read the file named by the `TGBOT_CONFIG` environment variable
    ///
    /// ## Errors
    /// - `BotError::Config` - variable is not set or the file is not valid TOML
    /// - `BotError::Io` - file cannot be read
    pub fn from_env() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH)?;
        debug!("Loading config from {}", path);
        Self::from_file(path)
    }
}
