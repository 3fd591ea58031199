//! Edit live location messages method `editMessageLiveLocation`
//! [More info](https://core.telegram.org/bots/api#editmessagelivelocation)
use crate::api::types::*;
bot_api_method! {
    method = "editMessageLiveLocation",
    request = RequestEditMessageLiveLocation {
        required {
            latitude: f64,
            longitude: f64,
        },
        optional {
            chat_id: ChatId,
            message_id: i64,
            inline_message_id: String,
            horizontal_accuracy: f64,
            heading: u16,
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
    fn test_request_edit_live_location_serialize() {
        let req = RequestEditMessageLiveLocation::new((52.5, 13.25))
            .with_inline_message_id("inline".to_string())
            .with_heading(90);
        let val = serde_json::to_value(&req).unwrap();
        assert_eq!(
            val,
            json!({
                "latitude": 52.5,
                "longitude": 13.25,
                "inline_message_id": "inline",
                "heading": 90
            })
        );
    }
}
