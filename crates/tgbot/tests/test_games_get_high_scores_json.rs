use tgbot::prelude::*;

#[test]
fn test_get_game_high_scores_from_real_json() {
    let path = std::path::Path::new("tests/responds/get_game_high_scores.json");
    let data = std::fs::read_to_string(path).expect("Failed to read get_game_high_scores.json");
    let resp: ApiResponseWrapper<Vec<GameHighScore>> =
        serde_json::from_str(&data).expect("Failed to deserialize high scores");
    let result: Result<Vec<GameHighScore>> = resp.into();
    let scores = result.expect("Response is not ok");
    assert_eq!(scores.len(), 2);
    assert_eq!(scores[0].position, 1);
    assert_eq!(scores[0].score, 420);
    assert_eq!(scores[1].user.first_name, "Other");
}
