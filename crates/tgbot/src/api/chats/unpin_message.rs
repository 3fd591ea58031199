//! Unpin Message method in chat `unpinChatMessage`
//! [More info](https://core.telegram.org/bots/api#unpinchatmessage)
use crate::api::types::*;
bot_api_method! {
    method   = "unpinChatMessage",
    request  = RequestUnpinChatMessage {
        required {
            chat_id: ChatId,
        },
        optional {
            message_id: i64,
        }
    },
    response = bool,
}
