//! Edit text messages method `editMessageText`
//! [More info](https://core.telegram.org/bots/api#editmessagetext)
use crate::api::types::*;
bot_api_method! {
    /// Either `chat_id` with `message_id` or `inline_message_id` must be set
    method = "editMessageText",
    request = RequestEditMessageText {
        required {
            text: String,
        },
        optional {
            chat_id: ChatId,
            message_id: i64,
            inline_message_id: String,
            parse_mode: ParseMode,
            disable_web_page_preview: bool,
            reply_markup: InlineKeyboardMarkup,
        }
    },
    response = EditResult,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_edit_text_chat_message() {
        let req = RequestEditMessageText::new("new text".to_string())
            .with_chat_id(ChatId::from(4))
            .with_message_id(3);
        let val = serde_json::to_value(&req).unwrap();
        assert_eq!(val, json!({"text": "new text", "chat_id": 4, "message_id": 3}));
        assert_eq!(req.get_chat_id(), Some(&ChatId::Integer(4)));
        assert!(req.get_inline_message_id().is_none());
    }

    #[test]
    fn test_request_edit_text_inline_message() {
        let req = RequestEditMessageText::new("new text".to_string())
            .with_inline_message_id("inline".to_string())
            .with_parse_mode(ParseMode::MarkdownV2);
        let val = serde_json::to_value(&req).unwrap();
        assert_eq!(
            val,
            json!({"text": "new text", "inline_message_id": "inline", "parse_mode": "MarkdownV2"})
        );
        assert!(req.get_chat_id().is_none());
        assert_eq!(req.get_inline_message_id(), Some("inline"));
    }

    #[test]
    fn test_request_edit_text_missing_text() {
        let val = json!({"chat_id": 1, "message_id": 2});
        assert!(serde_json::from_value::<RequestEditMessageText>(val).is_err());
    }
}
