//! Copy message method `copyMessage`
//! [More info](https://core.telegram.org/bots/api#copymessage)
use crate::api::types::*;
bot_api_method! {
    method = "copyMessage",
    request = RequestCopyMessage {
        required {
            chat_id: ChatId,
            from_chat_id: ChatId,
            message_id: i64,
        },
        optional {
            caption: String,
            parse_mode: ParseMode,
            disable_notification: bool,
            protect_content: bool,
            reply_to_message_id: i64,
            reply_markup: InlineKeyboardMarkup,
        }
    },
    response = MessageId,
}
