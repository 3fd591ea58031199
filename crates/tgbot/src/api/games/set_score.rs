//! Set the score of a user in a game method `setGameScore`
//! [More info](https://core.telegram.org/bots/api#setgamescore)
use crate::api::types::*;
bot_api_method! {
    method = "setGameScore",
    request = RequestSetGameScore {
        required {
            user_id: i64,
            score: i64,
        },
        optional {
            force: bool,
            disable_edit_message: bool,
            chat_id: ChatId,
            message_id: i64,
            inline_message_id: String,
        }
    },
    response = EditResult,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_set_game_score_serialize() {
        let req = RequestSetGameScore::new((1, 42))
            .with_force(true)
            .with_chat_id(ChatId::from(4))
            .with_message_id(3);
        let val = serde_json::to_value(&req).unwrap();
        assert_eq!(
            val,
            json!({"user_id": 1, "score": 42, "force": true, "chat_id": 4, "message_id": 3})
        );
    }

    #[test]
    fn test_request_set_game_score_missing_score() {
        let val = json!({"user_id": 1});
        assert!(serde_json::from_value::<RequestSetGameScore>(val).is_err());
    }
}
