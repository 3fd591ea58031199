//! Incoming callback query from an inline keyboard button
//! [More info](https://core.telegram.org/bots/api#callbackquery)
use crate::api::callbacks::answer::*;
use crate::api::chats::*;
use crate::api::games::*;
use crate::api::messages::*;
use crate::api::types::*;
use crate::bot::callback_data::{CallbackDataCache, Resolution};
use crate::bot::pending::PendingCall;
use crate::bot::{Bot, Requester};
use crate::error::{BotError, CallbackDataError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::hash::{Hash, Hasher};
use tracing::{debug, warn};

/// Data attached to the pressed button
///
/// Serialized as a plain string in both cases.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum CallbackData {
    /// Data as sent by Telegram or the payload recovered from a signed token
    Payload(String),
    /// Signed token whose key is not in the cache, only produced when
    /// validation is disabled
    Invalid(String),
}

impl CallbackData {
    /// Raw string regardless of the variant
    pub fn as_str(&self) -> &str {
        match self {
            CallbackData::Payload(data) | CallbackData::Invalid(data) => data,
        }
    }

    /// Payload, `None` for [`CallbackData::Invalid`]
    pub fn payload(&self) -> Option<&str> {
        match self {
            CallbackData::Payload(data) => Some(data),
            CallbackData::Invalid(_) => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, CallbackData::Invalid(_))
    }
}

impl From<String> for CallbackData {
    fn from(data: String) -> Self {
        CallbackData::Payload(data)
    }
}

impl From<&str> for CallbackData {
    fn from(data: &str) -> Self {
        CallbackData::Payload(data.to_string())
    }
}

/// Callback query
///
/// Either `message` or `inline_message_id` is present, depending on whether
/// the keyboard was attached to a chat message or to an inline message.
///
/// Two queries are equal when their `id` is equal, other fields are ignored.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    pub chat_instance: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<CallbackData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_short_name: Option<String>,
}

impl PartialEq for CallbackQuery {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CallbackQuery {}

impl Hash for CallbackQuery {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Request types whose target is either a chat message or an inline message
trait MessageTarget: Sized {
    fn with_chat_message(self, chat_id: ChatId, message_id: i64) -> Self;
    fn with_inline_message(self, inline_message_id: String) -> Self;
}

macro_rules! impl_message_target {
    ($($Rq:ty),* $(,)?) => {
        $(
            impl MessageTarget for $Rq {
                fn with_chat_message(self, chat_id: ChatId, message_id: i64) -> Self {
                    self.with_chat_id(chat_id).with_message_id(message_id)
                }

                fn with_inline_message(self, inline_message_id: String) -> Self {
                    self.with_inline_message_id(inline_message_id)
                }
            }
        )*
    };
}

impl_message_target!(
    RequestEditMessageText,
    RequestEditMessageCaption,
    RequestEditMessageReplyMarkup,
    RequestEditMessageMedia,
    RequestEditMessageLiveLocation,
    RequestStopMessageLiveLocation,
    RequestSetGameScore,
    RequestGetGameHighScores,
);

impl CallbackQuery {
    /// Deserialize a callback query received from Telegram
    ///
    /// When `bot` has a callback data cache, signed data is replaced with
    /// the original payload and the inline keyboard of the attached message
    /// is resolved as far as possible.
    ///
    /// ## Errors
    /// - `BotError::Serialization` - `value` does not match the schema
    /// - `BotError::InvalidCallbackData` - signed data failed validation
    #[tracing::instrument(skip(value, bot))]
    pub fn de_json(value: Value, bot: &Bot) -> Result<Self> {
        let mut query: Self = serde_json::from_value(value)?;
        debug!("Callback query {} deserialized", query.id);
        if let Some(cache) = bot.callback_data_cache() {
            query.resolve_callback_data(cache)?;
        }
        Ok(query)
    }

    /// Same as [`Self::de_json`] for a raw JSON string
    pub fn from_json_str(json: &str, bot: &Bot) -> Result<Self> {
        Self::de_json(serde_json::from_str(json)?, bot)
    }

    /// Resolve signed `data` through `cache`
    ///
    /// - unsigned data is kept as is
    /// - a known token is replaced with its payload
    /// - with validation disabled an unknown token becomes [`CallbackData::Invalid`]
    ///
    /// ## Errors
    /// - `BotError::InvalidCallbackData` - token failed validation, carries the raw data
    /// - `BotError::CallbackData` - cache lock is poisoned
    pub fn resolve_callback_data(&mut self, cache: &CallbackDataCache) -> Result<()> {
        let chat_id = self.message.as_ref().map(Message::chat_id);

        if let Some(CallbackData::Payload(raw)) = self.data.clone() {
            match cache.resolve(&raw, chat_id) {
                Ok(Resolution::Found(payload)) => {
                    debug!("Callback data of query {} resolved", self.id);
                    self.data = Some(CallbackData::Payload(payload));
                }
                Ok(Resolution::NotSigned) => {}
                Ok(Resolution::Missing) => {
                    debug!("Callback data of query {} is unknown", self.id);
                    self.data = Some(CallbackData::Invalid(raw));
                }
                Err(CallbackDataError::LockPoisoned) => {
                    return Err(CallbackDataError::LockPoisoned.into());
                }
                Err(e) => {
                    warn!("Invalid callback data in query {}: {}", self.id, e);
                    return Err(BotError::InvalidCallbackData(raw));
                }
            }
        }

        if let Some(markup) = self
            .message
            .as_mut()
            .and_then(|message| message.reply_markup.as_mut())
        {
            let resolved = markup.resolve_callback_data(cache, chat_id);
            debug!("Resolved {} buttons of the attached keyboard", resolved);
        }
        Ok(())
    }

    /// Serialize into a JSON object using Telegram field names,
    /// absent fields are omitted
    pub fn to_dict(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(BotError::from)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(BotError::from)
    }

    /// Data of the pressed button as a string
    pub fn data_str(&self) -> Option<&str> {
        self.data.as_ref().map(CallbackData::as_str)
    }

    /// Chat of the attached message
    pub fn chat_id(&self) -> Option<i64> {
        self.message.as_ref().map(Message::chat_id)
    }

    pub fn message_id(&self) -> Option<i64> {
        self.message.as_ref().map(|message| message.message_id)
    }

    /// Whether the keyboard belongs to an inline message
    pub fn is_inline(&self) -> bool {
        self.inline_message_id.is_some()
    }

    /// Fill the target of `request`: the inline message when there is one,
    /// otherwise the attached chat message
    fn target<Rq: MessageTarget>(&self, request: Rq) -> Result<Rq> {
        if let Some(inline_message_id) = &self.inline_message_id {
            return Ok(request.with_inline_message(inline_message_id.clone()));
        }
        match &self.message {
            Some(message) => Ok(request.with_chat_message(
                ChatId::Integer(message.chat_id()),
                message.message_id,
            )),
            None => Err(BotError::Validation(format!(
                "Callback query {} has neither message nor inline_message_id",
                self.id
            ))),
        }
    }

    fn require_message(&self, method: &'static str) -> Result<&Message> {
        self.message
            .as_ref()
            .ok_or(BotError::InlineUnsupported(method))
    }

    /// `answerCallbackQuery` for this query
    pub fn answer<'a, R: Requester>(
        &self,
        bot: &'a R,
    ) -> PendingCall<'a, R, RequestAnswerCallbackQuery> {
        PendingCall::new(bot, RequestAnswerCallbackQuery::new(self.id.clone()))
    }

    /// `editMessageText` on the message the keyboard belongs to
    pub fn edit_message_text<'a, R: Requester>(
        &self,
        bot: &'a R,
        text: impl Into<String>,
    ) -> Result<PendingCall<'a, R, RequestEditMessageText>> {
        let request = self.target(RequestEditMessageText::new(text.into()))?;
        Ok(PendingCall::new(bot, request))
    }

    /// `editMessageCaption` on the message the keyboard belongs to, `None`
    /// removes the caption
    pub fn edit_message_caption<'a, R: Requester>(
        &self,
        bot: &'a R,
        caption: Option<String>,
    ) -> Result<PendingCall<'a, R, RequestEditMessageCaption>> {
        let mut request = self.target(RequestEditMessageCaption::new(()))?;
        request.caption = caption;
        Ok(PendingCall::new(bot, request))
    }

    /// `editMessageReplyMarkup`, `None` removes the keyboard
    pub fn edit_message_reply_markup<'a, R: Requester>(
        &self,
        bot: &'a R,
        reply_markup: Option<InlineKeyboardMarkup>,
    ) -> Result<PendingCall<'a, R, RequestEditMessageReplyMarkup>> {
        let mut request = self.target(RequestEditMessageReplyMarkup::new(()))?;
        request.reply_markup = reply_markup;
        Ok(PendingCall::new(bot, request))
    }

    pub fn edit_message_media<'a, R: Requester>(
        &self,
        bot: &'a R,
        media: InputMedia,
    ) -> Result<PendingCall<'a, R, RequestEditMessageMedia>> {
        let request = self.target(RequestEditMessageMedia::new(media))?;
        Ok(PendingCall::new(bot, request))
    }

    pub fn edit_message_live_location<'a, R: Requester>(
        &self,
        bot: &'a R,
        latitude: f64,
        longitude: f64,
    ) -> Result<PendingCall<'a, R, RequestEditMessageLiveLocation>> {
        let request = self.target(RequestEditMessageLiveLocation::new((latitude, longitude)))?;
        Ok(PendingCall::new(bot, request))
    }

    pub fn stop_message_live_location<'a, R: Requester>(
        &self,
        bot: &'a R,
    ) -> Result<PendingCall<'a, R, RequestStopMessageLiveLocation>> {
        let request = self.target(RequestStopMessageLiveLocation::new(()))?;
        Ok(PendingCall::new(bot, request))
    }

    /// `setGameScore` for the game message the keyboard belongs to
    pub fn set_game_score<'a, R: Requester>(
        &self,
        bot: &'a R,
        user_id: i64,
        score: i64,
    ) -> Result<PendingCall<'a, R, RequestSetGameScore>> {
        let request = self.target(RequestSetGameScore::new((user_id, score)))?;
        Ok(PendingCall::new(bot, request))
    }

    pub fn get_game_high_scores<'a, R: Requester>(
        &self,
        bot: &'a R,
        user_id: i64,
    ) -> Result<PendingCall<'a, R, RequestGetGameHighScores>> {
        let request = self.target(RequestGetGameHighScores::new(user_id))?;
        Ok(PendingCall::new(bot, request))
    }

    /// `deleteMessage` for the attached message
    ///
    /// ## Errors
    /// - `BotError::InlineUnsupported` - the keyboard belongs to an inline message
    pub fn delete_message<'a, R: Requester>(
        &self,
        bot: &'a R,
    ) -> Result<PendingCall<'a, R, RequestDeleteMessage>> {
        let message = self.require_message(RequestDeleteMessage::METHOD)?;
        let request =
            RequestDeleteMessage::new((ChatId::Integer(message.chat_id()), message.message_id));
        Ok(PendingCall::new(bot, request))
    }

    /// `pinChatMessage` for the attached message
    ///
    /// ## Errors
    /// - `BotError::InlineUnsupported` - the keyboard belongs to an inline message
    pub fn pin_message<'a, R: Requester>(
        &self,
        bot: &'a R,
    ) -> Result<PendingCall<'a, R, RequestPinChatMessage>> {
        let message = self.require_message(RequestPinChatMessage::METHOD)?;
        let request =
            RequestPinChatMessage::new((ChatId::Integer(message.chat_id()), message.message_id));
        Ok(PendingCall::new(bot, request))
    }

    /// `unpinChatMessage` for the attached message
    ///
    /// ## Errors
    /// - `BotError::InlineUnsupported` - the keyboard belongs to an inline message
    pub fn unpin_message<'a, R: Requester>(
        &self,
        bot: &'a R,
    ) -> Result<PendingCall<'a, R, RequestUnpinChatMessage>> {
        let message = self.require_message(RequestUnpinChatMessage::METHOD)?;
        let request = RequestUnpinChatMessage::new(ChatId::Integer(message.chat_id()))
            .with_message_id(message.message_id);
        Ok(PendingCall::new(bot, request))
    }

    /// `copyMessage` of the attached message to `chat_id`
    ///
    /// ## Errors
    /// - `BotError::InlineUnsupported` - the keyboard belongs to an inline message
    pub fn copy_message<'a, R: Requester>(
        &self,
        bot: &'a R,
        chat_id: impl Into<ChatId>,
    ) -> Result<PendingCall<'a, R, RequestCopyMessage>> {
        let message = self.require_message(RequestCopyMessage::METHOD)?;
        let request = RequestCopyMessage::new((
            chat_id.into(),
            ChatId::Integer(message.chat_id()),
            message.message_id,
        ));
        Ok(PendingCall::new(bot, request))
    }
}
