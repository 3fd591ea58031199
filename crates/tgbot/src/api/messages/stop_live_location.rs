//! Stop updating a live location message method `stopMessageLiveLocation`
//! [More info](https://core.telegram.org/bots/api#stopmessagelivelocation)
use crate::api::types::*;
bot_api_method! {
    method = "stopMessageLiveLocation",
    request = RequestStopMessageLiveLocation {
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
