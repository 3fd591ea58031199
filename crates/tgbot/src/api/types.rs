//! API types
use crate::error::{ApiError, BotError, Result};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::fmt::*;
use tracing::debug;

/// Environment variable name for bot API URL
pub const TELEGRAM_BOT_API_URL: &str = "TELEGRAM_BOT_API_URL";
/// Environment variable name for bot API token
pub const TELEGRAM_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
/// Public Bot API server, used when [`TELEGRAM_BOT_API_URL`] is not set
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";
/// Telegram rejects `callback_data` longer than this many bytes
pub const MAX_CALLBACK_DATA_LEN: usize = 64;

/// Tracing target of this crate
pub const SERVICE_NAME: &str = "tgbot";
/// Supported API HTTP methods
#[derive(Debug, Default, PartialEq, Eq)]
pub enum HTTPMethod {
    /// Parameters in the query string
    GET,
    /// Parameters as a JSON body
    #[default]
    POST,
}
/// Bot request trait
pub trait BotRequest {
    type Args;

    const METHOD: &'static str;
    const HTTP_METHOD: HTTPMethod = HTTPMethod::POST;
    type ResponseType: Serialize + DeserializeOwned + Debug + Send;
    fn new(args: Self::Args) -> Self;
    fn get_chat_id(&self) -> Option<&ChatId>;
    fn get_inline_message_id(&self) -> Option<&str>;
}
/// Unique identifier of a chat or username of a channel (`@channelusername`)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum ChatId {
    Integer(i64),
    Username(String),
}
/// Telegram user or bot
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct User {
    pub id: i64,
    pub is_bot: bool,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
}
/// Chat types
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ChatType {
    #[default]
    Private,
    Group,
    Supergroup,
    Channel,
}
/// Chat struct
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Chat {
    pub id: i64,
    #[serde(rename = "type")]
    pub chat_type: ChatType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}
/// Chat message
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Message {
    pub message_id: i64,
    /// Unix time the message was sent
    #[serde(default)]
    pub date: i64,
    pub chat: Chat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}
/// Inline keyboard attached to a message
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}
/// Inline keyboard button
/// One of variants must be set:
/// - {`text`, `url`} - link buttons
/// - {`text`, `callback_data`} - buttons with callback
/// - {`text`, `switch_inline_query`} - switch to inline mode
/// - {`text`, `callback_game`} - game launch button
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct InlineKeyboardButton {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub switch_inline_query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub switch_inline_query_current_chat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_game: Option<CallbackGame>,
}
/// Placeholder, holds no information
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct CallbackGame {}
/// Message text format parse mode
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ParseMode {
    MarkdownV2,
    #[default]
    HTML,
    Markdown,
}
/// Content of a message to be sent with `editMessageMedia`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputMedia {
    Photo(InputMediaContent),
    Video(InputMediaContent),
    Animation(InputMediaContent),
    Audio(InputMediaContent),
    Document(InputMediaContent),
}
/// Fields common to every [`InputMedia`] kind
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct InputMediaContent {
    /// File id on Telegram servers or HTTP URL
    pub media: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
}
/// One row of the high scores table for a game
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct GameHighScore {
    pub position: i64,
    pub user: User,
    pub score: i64,
}
/// Identifier of a message, returned by `copyMessage`
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MessageId {
    pub message_id: i64,
}
/// Result of edit methods: the edited [`Message`] for chat messages,
/// `true` for inline messages
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum EditResult {
    Message(Box<Message>),
    Done(bool),
}
// Intermediate structure for deserializing API responses with the "ok" field
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum ApiResponseWrapper<T> {
    Success {
        ok: bool,
        result: T,
    },
    Error {
        ok: bool,
        description: String,
        #[serde(default)]
        error_code: Option<i64>,
    },
}

// Implementation of From for automatic conversion from ApiResponseWrapper to Result
impl<T> std::convert::From<ApiResponseWrapper<T>> for Result<T>
where
    T: Serialize + DeserializeOwned,
{
    fn from(wrapper: ApiResponseWrapper<T>) -> Self {
        match wrapper {
            ApiResponseWrapper::Success { ok, result } => {
                if ok {
                    debug!("Answer is ok, result received");
                    Ok(result)
                } else {
                    debug!("Answer is not ok, but description is not provided");
                    Err(BotError::Api(ApiError {
                        description: "Unspecified error".to_string(),
                        error_code: None,
                    }))
                }
            }
            ApiResponseWrapper::Error {
                ok,
                description,
                error_code,
            } => {
                if ok {
                    debug!("Answer is ok, BUT error description is provided");
                } else {
                    debug!("Answer is NOT ok and error description is provided");
                }
                Err(BotError::Api(ApiError {
                    description,
                    error_code,
                }))
            }
        }
    }
}

impl Message {
    /// Identifier of the chat this message belongs to
    pub fn chat_id(&self) -> i64 {
        self.chat.id
    }
}

impl EditResult {
    /// Edited message, `None` for inline messages
    pub fn message(&self) -> Option<&Message> {
        match self {
            EditResult::Message(msg) => Some(msg),
            EditResult::Done(_) => None,
        }
    }
}

/// Display trait for [`ChatId`]
impl Display for ChatId {
    /// Format [`ChatId`] to string
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            ChatId::Integer(id) => write!(f, "{}", id),
            ChatId::Username(name) => write!(f, "{}", name),
        }
    }
}

impl std::convert::From<i64> for ChatId {
    fn from(id: i64) -> Self {
        ChatId::Integer(id)
    }
}

impl std::convert::From<String> for ChatId {
    fn from(username: String) -> Self {
        ChatId::Username(username)
    }
}

impl std::convert::From<&str> for ChatId {
    fn from(username: &str) -> Self {
        ChatId::Username(username.to_string())
    }
}

/// Default values for [`InlineKeyboardMarkup`]
impl Default for InlineKeyboardMarkup {
    /// Create new [`InlineKeyboardMarkup`] with one empty row
    fn default() -> Self {
        Self {
            inline_keyboard: vec![vec![]],
        }
    }
}

impl Display for ChatType {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            ChatType::Private => write!(f, "private"),
            ChatType::Group => write!(f, "group"),
            ChatType::Supergroup => write!(f, "supergroup"),
            ChatType::Channel => write!(f, "channel"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chat_id_untagged_serde() {
        assert_eq!(serde_json::to_value(ChatId::from(42)).unwrap(), json!(42));
        assert_eq!(
            serde_json::to_value(ChatId::from("@channel")).unwrap(),
            json!("@channel")
        );
        let id: ChatId = serde_json::from_value(json!(-100123)).unwrap();
        assert_eq!(id, ChatId::Integer(-100123));
        let id: ChatId = serde_json::from_value(json!("@name")).unwrap();
        assert_eq!(id, ChatId::Username("@name".to_string()));
    }

    #[test]
    fn test_chat_id_display() {
        assert_eq!(format!("{}", ChatId::Integer(7)), "7");
        assert_eq!(format!("{}", ChatId::from("@abc")), "@abc");
    }

    #[test]
    fn test_user_optional_fields_skipped() {
        let user = User {
            id: 1,
            is_bot: false,
            first_name: "test_user".to_string(),
            ..Default::default()
        };
        let val = serde_json::to_value(&user).unwrap();
        assert_eq!(
            val,
            json!({"id": 1, "is_bot": false, "first_name": "test_user"})
        );
    }

    #[test]
    fn test_user_missing_first_name() {
        let v = serde_json::from_value::<User>(json!({"id": 1, "is_bot": false}));
        assert!(v.is_err());
    }

    #[test]
    fn test_chat_type_serde() {
        let chat: Chat = serde_json::from_value(json!({"id": 4, "type": "supergroup"})).unwrap();
        assert_eq!(chat.chat_type, ChatType::Supergroup);
        assert_eq!(chat.chat_type.to_string(), "supergroup");
        let v = serde_json::from_value::<Chat>(json!({"id": 4, "type": "unknown"}));
        assert!(v.is_err());
    }

    #[test]
    fn test_message_chat_id() {
        let msg: Message = serde_json::from_value(json!({
            "message_id": 3,
            "chat": {"id": 4, "type": "private"},
            "from": {"id": 5, "is_bot": true, "first_name": "bot"}
        }))
        .unwrap();
        assert_eq!(msg.chat_id(), 4);
        assert_eq!(msg.date, 0);
        assert_eq!(msg.from.as_ref().map(|u| u.id), Some(5));
    }

    #[test]
    fn test_message_missing_chat() {
        let v = serde_json::from_value::<Message>(json!({"message_id": 3}));
        assert!(v.is_err());
    }

    #[test]
    fn test_input_media_tagged() {
        let media = InputMedia::Photo(InputMediaContent {
            media: "file_id".to_string(),
            caption: Some("cap".to_string()),
            parse_mode: None,
        });
        let val = serde_json::to_value(&media).unwrap();
        assert_eq!(
            val,
            json!({"type": "photo", "media": "file_id", "caption": "cap"})
        );
        let back: InputMedia = serde_json::from_value(val).unwrap();
        assert_eq!(back, media);
    }

    #[test]
    fn test_parse_mode_serde() {
        assert_eq!(
            serde_json::to_value(ParseMode::MarkdownV2).unwrap(),
            json!("MarkdownV2")
        );
        assert_eq!(serde_json::to_value(ParseMode::HTML).unwrap(), json!("HTML"));
    }

    #[test]
    fn test_edit_result_untagged() {
        let done: EditResult = serde_json::from_value(json!(true)).unwrap();
        assert_eq!(done, EditResult::Done(true));
        assert!(done.message().is_none());

        let edited: EditResult = serde_json::from_value(json!({
            "message_id": 3,
            "date": 1,
            "chat": {"id": 4, "type": "private"},
            "text": "edited"
        }))
        .unwrap();
        assert_eq!(edited.message().map(|m| m.message_id), Some(3));
    }

    #[test]
    fn test_api_response_wrapper_from_ok() {
        let wrapper = ApiResponseWrapper::Success {
            ok: true,
            result: 42u32,
        };
        let res: Result<u32> = wrapper.into();
        assert_eq!(res.unwrap(), 42);
    }

    #[test]
    fn test_api_response_wrapper_not_ok_without_description() {
        let wrapper = ApiResponseWrapper::Success {
            ok: false,
            result: 42u32,
        };
        let res: Result<u32> = wrapper.into();
        assert!(matches!(res, Err(BotError::Api(_))));
    }

    #[test]
    fn test_api_response_wrapper_error() {
        let json = r#"{ "ok": false, "error_code": 400, "description": "Bad Request: chat not found" }"#;
        let r = serde_json::from_str::<ApiResponseWrapper<bool>>(json).unwrap();
        let res: Result<bool> = r.into();
        match res {
            Err(BotError::Api(e)) => {
                assert_eq!(e.error_code, Some(400));
                assert_eq!(e.description, "Bad Request: chat not found");
            }
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_api_response_wrapper_missing_result() {
        let json = r#"{ "ok": true }"#;
        let v = serde_json::from_str::<ApiResponseWrapper<bool>>(json);
        assert!(v.is_err());
    }

    #[test]
    fn test_keyboard_default_has_one_row() {
        let k = InlineKeyboardMarkup::default();
        assert_eq!(k.inline_keyboard.len(), 1);
        assert!(k.inline_keyboard[0].is_empty());
    }

    #[test]
    fn test_keyboard_button_callback_game_serializes_empty_object() {
        let btn = InlineKeyboardButton {
            text: "play".to_string(),
            callback_game: Some(CallbackGame {}),
            ..Default::default()
        };
        let val = serde_json::to_value(&btn).unwrap();
        assert_eq!(val, json!({"text": "play", "callback_game": {}}));
    }

    #[test]
    fn test_keyboard_missing_inline_keyboard() {
        let v = serde_json::from_str::<InlineKeyboardMarkup>("{}");
        assert!(v.is_err());
    }
}
