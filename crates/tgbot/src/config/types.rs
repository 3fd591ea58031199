use once_cell::sync::Lazy;
use serde::{self, Deserialize, Serialize};
use std::borrow::Cow;

/// Environment variable with the path to the TOML config file
pub static CONFIG_PATH: &str = "TGBOT_CONFIG";
pub static CONFIG: Lazy<Config> = Lazy::new(Config::new);
/// Configuration file
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub callback_data: CallbackDataConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Network configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct NetworkConfig {
    /// Number of retry attempts for failed requests
    #[serde(default = "default_retries")]
    pub retries: usize,
    /// Maximum backoff time in milliseconds
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
    /// Request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Pool idle timeout in seconds
    #[serde(default = "default_pool_idle_timeout_secs")]
    pub pool_idle_timeout_secs: u64,
    /// Maximum number of idle connections per host
    #[serde(default = "default_max_idle_connections")]
    pub max_idle_connections: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            retries: default_retries(),
            max_backoff_ms: default_max_backoff_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            pool_idle_timeout_secs: default_pool_idle_timeout_secs(),
            max_idle_connections: default_max_idle_connections(),
        }
    }
}

fn default_retries() -> usize {
    3
}
fn default_max_backoff_ms() -> u64 {
    5000
}
fn default_request_timeout_secs() -> u64 {
    30
}
fn default_connect_timeout_secs() -> u64 {
    10
}
fn default_pool_idle_timeout_secs() -> u64 {
    90
}
fn default_max_idle_connections() -> usize {
    10
}

/// Signed callback data settings
#[derive(Debug, Serialize, Deserialize, Clone, Eq, PartialEq, Hash)]
#[serde(rename_all = "snake_case")]
pub struct CallbackDataConfig {
    /// Maximum number of cached payloads
    #[serde(default = "default_maxsize")]
    pub maxsize: usize,
    /// Reject tokens that fail verification
    #[serde(default = "default_validate")]
    pub validate: bool,
}

impl Default for CallbackDataConfig {
    fn default() -> Self {
        Self {
            maxsize: default_maxsize(),
            validate: default_validate(),
        }
    }
}

fn default_maxsize() -> usize {
    1024
}
fn default_validate() -> bool {
    true
}

/// Log output format
#[derive(Debug, Serialize, Deserialize, Default, Clone, Copy, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Compact,
    Full,
    Json,
}

/// Logging settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct LogConfig {
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default = "default_filter_default")]
    pub filter_default: Cow<'static, str>,
    #[serde(default = "default_filter_self_directive")]
    pub filter_self_directive: Cow<'static, str>,
    #[serde(default = "default_ansi")]
    pub ansi: bool,
    #[serde(default = "default_directives")]
    pub directives: Vec<FmtDirective>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter_default: default_filter_default(),
            filter_self_directive: default_filter_self_directive(),
            ansi: default_ansi(),
            directives: default_directives(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct FmtDirective {
    pub fmt_filter_directive: Cow<'static, str>,
}

fn default_filter_default() -> Cow<'static, str> {
    Cow::Borrowed("info")
}
fn default_filter_self_directive() -> Cow<'static, str> {
    Cow::Borrowed("debug")
}
fn default_ansi() -> bool {
    true
}
fn default_directives() -> Vec<FmtDirective> {
    vec![
        FmtDirective {
            fmt_filter_directive: Cow::Borrowed("hyper=info"),
        },
        FmtDirective {
            fmt_filter_directive: Cow::Borrowed("reqwest=info"),
        },
    ]
}
