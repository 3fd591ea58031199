//! Commonly used imports and re-exports.
pub use crate::api::callback_query::*;
pub use crate::api::callbacks::answer::*;
pub use crate::api::chats::*;
pub use crate::api::games::*;
pub use crate::api::messages::*;
pub use crate::api::myself::get::*;
pub use crate::api::types::*;
pub use crate::api::utils::keyboard::*;
pub use crate::bot::callback_data::{
    CachedCallbackData, CallbackDataCache, KEY_LEN, Resolution, SIGNATURE_LEN, TOKEN_LEN,
    split_token,
};
pub use crate::bot::net::ConnectionPool;
pub use crate::bot::pending::PendingCall;
pub use crate::bot::*;
pub use crate::bot_api_method;
pub use crate::config::{
    CONFIG, CallbackDataConfig, Config, LogConfig, LogFormat, NetworkConfig,
};
pub use crate::error::*;
#[cfg(feature = "subscriber")]
pub use crate::logging;
