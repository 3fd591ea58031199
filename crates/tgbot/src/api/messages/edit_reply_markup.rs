//! Edit only the reply markup of messages method `editMessageReplyMarkup`
//! [More info](https://core.telegram.org/bots/api#editmessagereplymarkup)
use crate::api::types::*;
bot_api_method! {
    method = "editMessageReplyMarkup",
    request = RequestEditMessageReplyMarkup {
        required {},
        optional {
            chat_id: ChatId,
            message_id: i64,
            inline_message_id: String,
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
    fn test_request_edit_reply_markup_serialize() {
        let markup = InlineKeyboardMarkup {
            inline_keyboard: vec![vec![InlineKeyboardButton {
                text: "ok".to_string(),
                callback_data: Some("ok".to_string()),
                ..Default::default()
            }]],
        };
        let req = RequestEditMessageReplyMarkup::new(())
            .with_inline_message_id("inline".to_string())
            .with_reply_markup(markup);
        let val = serde_json::to_value(&req).unwrap();
        assert_eq!(
            val,
            json!({
                "inline_message_id": "inline",
                "reply_markup": {"inline_keyboard": [[{"text": "ok", "callback_data": "ok"}]]}
            })
        );
    }

    #[test]
    fn test_request_edit_reply_markup_without_markup_removes_keyboard() {
        let req = RequestEditMessageReplyMarkup::new(())
            .with_chat_id(ChatId::from("@channel"))
            .with_message_id(1);
        let val = serde_json::to_value(&req).unwrap();
        assert_eq!(val, json!({"chat_id": "@channel", "message_id": 1}));
    }
}
