#![forbid(unsafe_code)]
//! # Telegram Bot API client
//! This crate provides a client for the [Telegram Bot API] built around
//! [`CallbackQuery`](crate::prelude::CallbackQuery): JSON (de)serialization,
//! shortcut methods that forward to the bot API, and signed callback data.
//! Asynchronous request is based on [`reqwest`] and [`tokio`].
//! JSON Serialization and Deserialization [`serde_json`].
//! Serialization Url query is based on [`serde_url_params`].
//!
//! ```toml
//! [dependencies]
//! tgbot = "0.1"
//! tracing = "0.1"
//! ```
//!
//! [Telegram Bot API]: https://core.telegram.org/bots/api
//! [`reqwest`]: https://docs.rs/reqwest
//! [`tokio`]: https://docs.rs/tokio
//! [`serde_json`]: https://docs.rs/serde_json
//! [`serde_url_params`]: https://docs.rs/serde_url_params

#[macro_export]
macro_rules! bot_api_method {
    (
        $(#[$req_attr:meta])*
        method = $method:literal,
        $(http_method = $http_method:expr,)?
        request = $Req:ident {
            required {
                $( $(#[$req_f_attr:meta])* $req_f:ident : $ReqT:ty ),* $(,)?
            },
            optional {
                $( $(#[$opt_attr:meta])* $opt_f:ident : $OptT:ty ),* $(,)?
            }
        },
        response = $Res:ty,
    ) => {
        #[derive(
            ::serde::Serialize,
            ::serde::Deserialize,
            Clone,
            Debug,
            PartialEq,
            ::tgbot_macros::GetField,
        )]
        #[non_exhaustive]
        $(#[$req_attr])*
        pub struct $Req {
            $( $(#[$req_f_attr])* pub $req_f : $ReqT, )*
            $( $(#[$opt_attr])*
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub $opt_f : Option<$OptT>, )*
        }

        impl $crate::api::types::BotRequest for $Req {
            type Args = ($($ReqT),*);
            const METHOD: &'static str = $method;
            $(const HTTP_METHOD: $crate::api::types::HTTPMethod = $http_method;)?
            type ResponseType = $Res;

            fn new(($($req_f),*): ($($ReqT),*)) -> Self {
                Self {
                    $( $req_f, )*
                    $( $opt_f: None, )*
                }
            }

            fn get_chat_id(&self) -> Option<&$crate::api::types::ChatId> {
                self._get_chat_id()
            }

            fn get_inline_message_id(&self) -> Option<&str> {
                self._get_inline_message_id()
            }
        }

        impl $Req {
            paste::paste! {
                $(
                    #[doc = concat!("Sets the field `", stringify!($opt_f), "`")]
                    pub fn [<with_ $opt_f>](mut self, value: $OptT) -> Self {
                        self.$opt_f = Some(value);
                        self
                    }
                )*
            }
        }
    };
}

pub mod bot;
pub mod config;
pub mod error;
#[cfg(feature = "subscriber")]
pub mod logging;
pub mod prelude;
/// API methods and types
mod api {
    /// `CallbackQuery` object and its shortcuts
    pub mod callback_query;
    /// Chat level methods: `pinChatMessage`, `unpinChatMessage`
    pub mod chats;
    /// Game methods: `setGameScore`, `getGameHighScores`
    pub mod games;
    /// Message editing and copying methods
    pub mod messages;
    pub mod types;
    pub mod utils;
    /// `answerCallbackQuery`
    pub mod callbacks {
        pub mod answer;
    }
    /// `getMe`
    pub mod myself {
        pub mod get;
    }
}

pub use self::bot::Bot;
