//! Answer callback query method `answerCallbackQuery`
//! [More info](https://core.telegram.org/bots/api#answercallbackquery)
use crate::api::types::*;
bot_api_method! {
    method   = "answerCallbackQuery",
    request  = RequestAnswerCallbackQuery {
        required {
            callback_query_id: String,
        },
        optional {
            text: String,
            show_alert: bool,
            url: String,
            cache_time: u32,
        }
    },
    response = bool,
}
