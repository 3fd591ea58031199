pub mod callback_data;
pub mod net;
pub mod pending;

use crate::api::types::*;
use crate::error::{BotError, Result};
use async_trait::async_trait;
use callback_data::CallbackDataCache;
use net::ConnectionPool;
use once_cell::sync::OnceCell;
use reqwest::Url;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Anything able to execute a [`BotRequest`]
///
/// [`Bot`] sends requests over HTTP. Shortcut methods only depend on this
/// trait, so a recording implementation can stand in for the network.
#[async_trait]
pub trait Requester: Send + Sync {
    /// Send `request` and return the decoded `result` field of the response
    async fn send_request<Rq>(&self, request: Rq) -> Result<Rq::ResponseType>
    where
        Rq: BotRequest + Serialize + fmt::Debug + Send + 'static;
}

#[derive(Clone)]
/// Bot class with attributes
/// - `connection_pool`: [`ConnectionPool`] - Pool of HTTP connections for API requests
/// - `token`: [`String`] - Bot API token
/// - `base_api_url`: [`reqwest::Url`] - Base API URL
/// - `callback_data`: [`CallbackDataCache`] - Signed callback data store, if enabled
///
/// [`reqwest::Url`]: https://docs.rs/reqwest/latest/reqwest/struct.Url.html
pub struct Bot {
    pub(crate) connection_pool: OnceCell<ConnectionPool>,
    pub(crate) token: Arc<str>,
    pub(crate) base_api_url: Url,
    pub(crate) callback_data: Option<Arc<CallbackDataCache>>,
}

impl fmt::Debug for Bot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bot")
            .field("base_api_url", &self.base_api_url.as_str())
            .field("callback_data", &self.callback_data)
            .finish_non_exhaustive()
    }
}

impl Bot {
    /// Creates a new `Bot` from the environment
    ///
    /// Get token from variable `TELEGRAM_BOT_TOKEN`
    ///
    /// Get base url from variable `TELEGRAM_BOT_API_URL`, defaults to [`DEFAULT_API_URL`]
    ///
    /// ## Errors
    /// - `BotError::Config` - token variable is not set
    /// - `BotError::Url` - URL parsing error
    pub fn new() -> Result<Self> {
        debug!("Creating new bot from environment");

        let token = get_env_token()?;
        debug!("Token successfully obtained from environment");

        let base_api_url = get_env_url();
        debug!("API URL: {}", base_api_url);

        Self::with_params(&token, &base_api_url)
    }

    /// Creates a new `Bot` with direct parameters instead of environment variables
    ///
    /// ## Parameters
    /// - `token`: [`String`] - Bot API token
    /// - `api_url`: [`String`] - Base API URL
    ///
    /// ## Errors
    /// - `BotError::Validation` - empty token
    /// - `BotError::Url` - URL parsing error
    ///
    /// ## Example
    /// ```no_run
    /// use tgbot::prelude::*;
    ///
    /// let bot = Bot::with_params("123456:ABC", "https://api.telegram.org")?;
    /// # Ok::<(), BotError>(())
    /// ```
    pub fn with_params(token: &str, api_url: &str) -> Result<Self> {
        debug!("Using provided token and API URL");
        if token.trim().is_empty() {
            return Err(BotError::Validation("Bot token is empty".to_string()));
        }

        let base_api_url = Url::parse(api_url).map_err(BotError::Url)?;
        debug!("API URL successfully parsed");

        Ok(Self {
            connection_pool: OnceCell::new(),
            token: Arc::<str>::from(token),
            base_api_url,
            callback_data: None,
        })
    }

    /// Creates a new bot for the public Bot API server
    pub fn with_default_url(token: &str) -> Result<Self> {
        Self::with_params(token, DEFAULT_API_URL)
    }

    /// Use a custom connection pool, e.g. with different retry settings
    pub fn with_connection_pool(self, pool: ConnectionPool) -> Self {
        Self {
            connection_pool: OnceCell::with_value(pool),
            ..self
        }
    }

    /// Share `cache` with this bot. Incoming callback data is resolved
    /// against it in [`CallbackQuery::de_json`](crate::prelude::CallbackQuery::de_json).
    pub fn with_callback_data_cache(self, cache: Arc<CallbackDataCache>) -> Self {
        Self {
            callback_data: Some(cache),
            ..self
        }
    }

    /// Enable signed callback data with a cache configured from the
    /// `callback_data` config section and signed with the bot token
    pub fn with_arbitrary_callback_data(self) -> Self {
        let cache = CallbackDataCache::from_config(self.token.as_bytes());
        self.with_callback_data_cache(Arc::new(cache))
    }

    /// Signed callback data store, `None` when arbitrary callback data is disabled
    pub fn callback_data_cache(&self) -> Option<&Arc<CallbackDataCache>> {
        self.callback_data.as_ref()
    }

    /// Build `{base_api_url}/bot{token}/{method}` with an optional query string
    ///
    /// ## Errors
    /// - `BotError::Url` - URL parsing error
    pub fn get_parsed_url(&self, method: &str, query: Option<&str>) -> Result<Url> {
        let mut url = self.base_api_url.clone();
        let path = format!(
            "{}/bot{}/{}",
            self.base_api_url.path().trim_end_matches('/'),
            self.token,
            method
        );
        url.set_path(&path);
        url.set_query(query.filter(|q| !q.is_empty()));
        Ok(url)
    }

    /// Send request, get response
    /// - `GET` methods serialize the request with [`serde_url_params::to_string`] into query string
    /// - `POST` methods send the request as a JSON body
    ///
    /// Deserialize response with [`serde_json::from_str`]
    ///
    /// ## Errors
    /// - `BotError::UrlParams` - URL parameters serialization error
    /// - `BotError::Url` - URL parsing error
    /// - `BotError::Network` - network error when sending request
    /// - `BotError::Serialization` - request or response (de)serialization error
    /// - `BotError::Api` - API error when processing request
    #[tracing::instrument(skip(self, message), fields(method = <Rq>::METHOD))]
    pub async fn send_api_request<Rq>(&self, message: Rq) -> Result<<Rq>::ResponseType>
    where
        Rq: BotRequest + Serialize + fmt::Debug,
    {
        debug!("Starting send_api_request");
        match (message.get_chat_id(), message.get_inline_message_id()) {
            (Some(chat_id), _) => debug!("Target chat: {}", chat_id),
            (None, Some(inline_id)) => debug!("Target inline message: {}", inline_id),
            (None, None) => debug!("No chat_id found in message"),
        }

        let pool = self.connection_pool.get_or_init(ConnectionPool::optimized);
        let body = match <Rq>::HTTP_METHOD {
            HTTPMethod::POST => {
                let json = serde_json::to_string(&message)?;
                let url = self.get_parsed_url(<Rq>::METHOD, None)?;
                debug!("Sending POST request");
                pool.post_json(url, json).await?
            }
            HTTPMethod::GET => {
                let query = serde_url_params::to_string(&message)?;
                let url = self.get_parsed_url(<Rq>::METHOD, Some(&query))?;
                debug!("Sending GET request");
                pool.get_text(url).await?
            }
        };

        let response: ApiResponseWrapper<<Rq>::ResponseType> = serde_json::from_str(&body)?;
        response.into()
    }
}

#[async_trait]
impl Requester for Bot {
    async fn send_request<Rq>(&self, request: Rq) -> Result<Rq::ResponseType>
    where
        Rq: BotRequest + Serialize + fmt::Debug + Send + 'static,
    {
        self.send_api_request(request).await
    }
}

fn get_env_token() -> Result<String> {
    std::env::var(TELEGRAM_BOT_TOKEN).map_err(BotError::from)
}

fn get_env_url() -> String {
    std::env::var(TELEGRAM_BOT_API_URL).unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}
