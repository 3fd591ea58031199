//! Delete message method `deleteMessage`
//! [More info](https://core.telegram.org/bots/api#deletemessage)
use crate::api::types::*;
bot_api_method! {
    method = "deleteMessage",
    request = RequestDeleteMessage {
        required {
            chat_id: ChatId,
            message_id: i64,
        },
        optional {}
    },
    response = bool,
}
