//! Pin Message method in chat `pinChatMessage`
//! [More info](https://core.telegram.org/bots/api#pinchatmessage)
use crate::api::types::*;
bot_api_method! {
    method   = "pinChatMessage",
    request  = RequestPinChatMessage {
        required {
            chat_id: ChatId,
            message_id: i64,
        },
        optional {
            disable_notification: bool,
        }
    },
    response = bool,
}
