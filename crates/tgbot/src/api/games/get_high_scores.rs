//! Get high score tables method `getGameHighScores`
//! [More info](https://core.telegram.org/bots/api#getgamehighscores)
use crate::api::types::*;
bot_api_method! {
    method = "getGameHighScores",
    request = RequestGetGameHighScores {
        required {
            user_id: i64,
        },
        optional {
            chat_id: ChatId,
            message_id: i64,
            inline_message_id: String,
        }
    },
    response = Vec<GameHighScore>,
}
