// Property-based tests for callback queries and the callback data cache
use proptest::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tgbot::prelude::*;

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

fn query(id: String, chat_instance: String, data: Option<String>, inline: bool) -> CallbackQuery {
    let mut value = serde_json::json!({
        "id": id,
        "from": {"id": 1, "is_bot": false, "first_name": "test_user"},
        "chat_instance": chat_instance,
    });
    if inline {
        value["inline_message_id"] = "inline".into();
    } else {
        value["message"] =
            serde_json::json!({"message_id": 3, "date": 1, "chat": {"id": 4, "type": "private"}});
    }
    if let Some(data) = data {
        value["data"] = data.into();
    }
    serde_json::from_value(value).unwrap()
}

proptest! {
    #[test]
    fn prop_equality_and_hash_only_use_id(
        id in "[a-zA-Z0-9]{1,16}",
        ci_a in ".{0,16}",
        ci_b in ".{0,16}",
        data_a in proptest::option::of(".{0,32}"),
        data_b in proptest::option::of(".{0,32}"),
        inline in any::<bool>(),
    ) {
        let a = query(id.clone(), ci_a, data_a, inline);
        let b = query(id, ci_b, data_b, !inline);
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn prop_different_ids_are_unequal(
        id_a in "[a-z]{1,8}",
        id_b in "[A-Z]{1,8}",
    ) {
        let a = query(id_a, "ci".to_string(), None, true);
        let b = query(id_b, "ci".to_string(), None, true);
        prop_assert_ne!(a, b);
    }

    #[test]
    fn prop_to_dict_round_trips(
        id in "[a-zA-Z0-9]{1,16}",
        chat_instance in ".{0,16}",
        data in proptest::option::of("[a-z ]{0,64}"),
        inline in any::<bool>(),
    ) {
        let q = query(id, chat_instance, data, inline);
        let dict = q.to_dict().unwrap();
        prop_assert_eq!(dict.get("message").is_some(), !inline);
        prop_assert_eq!(dict.get("inline_message_id").is_some(), inline);
        let back: CallbackQuery = serde_json::from_value(dict.clone()).unwrap();
        prop_assert_eq!(back.to_dict().unwrap(), dict);
    }

    #[test]
    fn prop_signed_token_fits_and_resolves(
        payload in ".{0,512}",
        chat_id in proptest::option::of(any::<i64>()),
    ) {
        let cache = CallbackDataCache::new("123456:secret", 4, true);
        let token = cache.sign(chat_id, payload.clone()).unwrap();
        prop_assert!(token.len() <= MAX_CALLBACK_DATA_LEN);
        prop_assert_eq!(token.len(), TOKEN_LEN);
        prop_assert_eq!(cache.resolve(&token, chat_id).unwrap(), Resolution::Found(payload));
    }

    #[test]
    fn prop_cache_never_exceeds_maxsize(
        maxsize in 1usize..16,
        payloads in proptest::collection::vec(".{0,8}", 0..64),
    ) {
        let cache = CallbackDataCache::new("secret", maxsize, true);
        let mut tokens = vec![];
        for payload in &payloads {
            tokens.push(cache.sign(None, payload.clone()).unwrap());
            prop_assert!(cache.len() <= maxsize);
        }
        // the newest entries survive
        for token in tokens.iter().rev().take(maxsize) {
            prop_assert!(cache.contains_key(&token[..KEY_LEN]));
        }
    }

    #[test]
    fn prop_appended_data_fails_validation(
        payload in ".{0,32}",
        suffix in "[a-zA-Z0-9]{1,8}",
    ) {
        let cache = CallbackDataCache::new("secret", 4, true);
        let token = cache.sign(Some(1), payload).unwrap();
        let tampered = format!("{}{}", token, suffix);
        prop_assert!(cache.resolve(&tampered, Some(1)).is_err());
    }

    #[test]
    fn prop_short_data_is_never_signed(data in "[ -~]{0,32}") {
        prop_assert!(split_token(&data).is_none());
    }
}
