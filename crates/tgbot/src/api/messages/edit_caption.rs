//! Edit captions of messages method `editMessageCaption`
//! [More info](https://core.telegram.org/bots/api#editmessagecaption)
use crate::api::types::*;
bot_api_method! {
    method = "editMessageCaption",
    request = RequestEditMessageCaption {
        required {},
        optional {
            chat_id: ChatId,
            message_id: i64,
            inline_message_id: String,
            caption: String,
            parse_mode: ParseMode,
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
    fn test_request_edit_caption_serialize() {
        let req = RequestEditMessageCaption::new(())
            .with_chat_id(ChatId::from(4))
            .with_message_id(3)
            .with_caption("new caption".to_string());
        let val = serde_json::to_value(&req).unwrap();
        assert_eq!(
            val,
            json!({"chat_id": 4, "message_id": 3, "caption": "new caption"})
        );
    }

    #[test]
    fn test_request_edit_caption_empty() {
        let req = RequestEditMessageCaption::new(());
        assert_eq!(serde_json::to_value(&req).unwrap(), json!({}));
    }
}
