//! Edit animation, audio, document, photo or video messages method `editMessageMedia`
//! [More info](https://core.telegram.org/bots/api#editmessagemedia)
use crate::api::types::*;
bot_api_method! {
    method = "editMessageMedia",
    request = RequestEditMessageMedia {
        required {
            media: InputMedia,
        },
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
    fn test_request_edit_media_serialize() {
        let media = InputMedia::Photo(InputMediaContent {
            media: "AgADBAAD".to_string(),
            ..Default::default()
        });
        let req = RequestEditMessageMedia::new(media)
            .with_chat_id(ChatId::from(4))
            .with_message_id(3);
        let val = serde_json::to_value(&req).unwrap();
        assert_eq!(
            val,
            json!({
                "media": {"type": "photo", "media": "AgADBAAD"},
                "chat_id": 4,
                "message_id": 3
            })
        );
    }
}
