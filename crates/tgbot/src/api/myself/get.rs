//! Get information about the bot itself method `getMe`
//! [More info](https://core.telegram.org/bots/api#getme)
use crate::api::types::*;
bot_api_method! {
    method = "getMe",
    http_method = HTTPMethod::GET,
    request = RequestGetMe {
        required {},
        optional {}
    },
    response = User,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_get_me_serialize() {
        let req = RequestGetMe::new(());
        let val = serde_json::to_value(&req).unwrap();
        assert_eq!(val, json!({}));
        assert_eq!(serde_url_params::to_string(&req).unwrap(), "");
    }

    #[test]
    fn test_request_get_me_is_get() {
        assert_eq!(RequestGetMe::HTTP_METHOD, HTTPMethod::GET);
    }

    #[test]
    fn test_response_get_me_deserialize() {
        let val = json!({
            "id": 12345,
            "is_bot": true,
            "first_name": "TestBot",
            "username": "test_bot"
        });
        let user: <RequestGetMe as BotRequest>::ResponseType =
            serde_json::from_value(val).unwrap();
        assert!(user.is_bot);
        assert_eq!(user.username.as_deref(), Some("test_bot"));
    }
}
