use serde::{Deserialize, Serialize};
use std::env::VarError;
use std::fmt;
use thiserror::Error;

/// Error reported by Telegram in a `{"ok": false, ...}` envelope
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiError {
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<i64>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.error_code {
            Some(code) => write!(f, "API Error {}: {}", code, self.description),
            None => write!(f, "API Error: {}", self.description),
        }
    }
}

impl std::error::Error for ApiError {}

/// Reasons a signed callback token was rejected
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CallbackDataError {
    #[error("callback data signature does not match")]
    SignatureMismatch,

    #[error("callback data key is not in the cache")]
    UnknownKey,

    #[error("callback data was signed for chat {expected:?}, received from {actual:?}")]
    ChatMismatch {
        expected: Option<i64>,
        actual: Option<i64>,
    },

    #[error("callback data cache lock is poisoned")]
    LockPoisoned,
}

#[derive(Debug)]
pub enum BotError {
    /// API Error
    Api(ApiError),
    /// Network Error
    Network(reqwest::Error),
    /// Serialization/Deserialization Error
    Serialization(serde_json::Error),
    /// URL Error
    Url(url::ParseError),
    /// File System Error
    Io(std::io::Error),
    /// Configuration Error
    Config(String),
    /// Validation Error
    Validation(String),
    /// URL Parameters Error
    UrlParams(serde_url_params::Error),
    /// System Error
    System(String),
    /// Incoming callback data failed validation, carries the raw data
    InvalidCallbackData(String),
    /// Shortcut called on a query without a chat message
    InlineUnsupported(&'static str),
    /// Callback data cache Error
    CallbackData(CallbackDataError),
}

impl fmt::Display for BotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotError::Api(e) => write!(f, "API Error: {}", e),
            BotError::Network(e) => write!(f, "Network Error: {}", e),
            BotError::Serialization(e) => write!(f, "Serialization Error: {}", e),
            BotError::Url(e) => write!(f, "URL Error: {}", e),
            BotError::Io(e) => write!(f, "IO Error: {}", e),
            BotError::Config(e) => write!(f, "Config Error: {}", e),
            BotError::Validation(e) => write!(f, "Validation Error: {}", e),
            BotError::UrlParams(e) => write!(f, "URL Parameters Error: {}", e),
            BotError::System(e) => write!(f, "System Error: {}", e),
            BotError::InvalidCallbackData(data) => {
                write!(f, "Invalid callback data: {:?}", data)
            }
            BotError::InlineUnsupported(method) => write!(
                f,
                "Unsupported operation: `{}` is not available for inline messages",
                method
            ),
            BotError::CallbackData(e) => write!(f, "Callback Data Error: {}", e),
        }
    }
}

impl std::error::Error for BotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BotError::Api(e) => Some(e),
            BotError::Network(e) => Some(e),
            BotError::Serialization(e) => Some(e),
            BotError::Url(e) => Some(e),
            BotError::Io(e) => Some(e),
            BotError::Config(_) => None,
            BotError::Validation(_) => None,
            BotError::UrlParams(e) => Some(e),
            BotError::System(_) => None,
            BotError::InvalidCallbackData(_) => None,
            BotError::InlineUnsupported(_) => None,
            BotError::CallbackData(e) => Some(e),
        }
    }
}

/// The request URL is dropped, it carries the bot token
impl From<reqwest::Error> for BotError {
    fn from(err: reqwest::Error) -> Self {
        BotError::Network(err.without_url())
    }
}

impl From<serde_json::Error> for BotError {
    fn from(err: serde_json::Error) -> Self {
        BotError::Serialization(err)
    }
}

impl From<url::ParseError> for BotError {
    fn from(err: url::ParseError) -> Self {
        BotError::Url(err)
    }
}

impl From<std::io::Error> for BotError {
    fn from(err: std::io::Error) -> Self {
        BotError::Io(err)
    }
}

impl From<serde_url_params::Error> for BotError {
    fn from(err: serde_url_params::Error) -> Self {
        BotError::UrlParams(err)
    }
}

impl From<toml::de::Error> for BotError {
    fn from(err: toml::de::Error) -> Self {
        BotError::Config(err.to_string())
    }
}

impl From<VarError> for BotError {
    fn from(err: VarError) -> Self {
        BotError::Config(err.to_string())
    }
}

impl From<ApiError> for BotError {
    fn from(err: ApiError) -> Self {
        BotError::Api(err)
    }
}

impl From<CallbackDataError> for BotError {
    fn from(err: CallbackDataError) -> Self {
        BotError::CallbackData(err)
    }
}

pub type Result<T> = std::result::Result<T, BotError>;
