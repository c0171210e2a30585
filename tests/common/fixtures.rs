//! JSON fixtures shaped like the quiz server's responses

use serde_json::{json, Value};
use std::sync::Arc;

use wedding_quiz::client::Method;
use wedding_quiz::session::SyncClient;

use super::transport::ScriptedTransport;

pub fn player(id: u64, name: &str, nickname: &str, team_id: Option<u64>) -> Value {
    json!({
        "id": id,
        "name": name,
        "nickname": nickname,
        "team_id": team_id,
        "is_active": true,
    })
}

pub fn team(id: u64, name: &str, score: i64, members: Vec<Value>) -> Value {
    json!({
        "id": id,
        "name": name,
        "score": score,
        "is_active": true,
        "member_count": members.len(),
        "members": members,
    })
}

/// `GET /game/state` body; players are derived from team members
pub fn game_state(state: &str, round: u32, teams: Vec<Value>) -> Value {
    json!({
        "game": {
            "id": 1,
            "name": "Anna & Ben",
            "state": state,
            "current_round": round,
            "is_paused": false,
            "teams": teams,
        }
    })
}

pub fn token(id: u64, player_id: u64, prediction: Option<(u32, u64)>, correct: Option<bool>) -> Value {
    json!({
        "id": id,
        "player_id": player_id,
        "round_number": 1,
        "is_active": true,
        "predicted_number": prediction.map(|(number, _)| number),
        "predicted_team_id": prediction.map(|(_, team)| team),
        "is_prediction_correct": correct,
        "used_at": null,
    })
}

/// A client registered as player 1 "Anna" in team 10 during play
pub async fn registered_client() -> Arc<SyncClient<ScriptedTransport>> {
    let client = Arc::new(SyncClient::new(ScriptedTransport::new()));
    let transport = client.api().transport();
    transport.respond_once(
        Method::Post,
        "/register",
        200,
        json!({ "success": true, "player": player(1, "Anna", "Sunny", None) }),
    );
    transport.respond_always(
        Method::Get,
        "/game/state",
        200,
        game_state(
            "playing",
            1,
            vec![
                team(10, "Roses", 0, vec![player(1, "Anna", "Sunny", Some(10)), player(2, "Ben", "Bolt", Some(10))]),
                team(20, "Tulips", 0, vec![player(3, "Cleo", "Comet", Some(20)), player(4, "Dan", "Dash", Some(20))]),
            ],
        ),
    );
    client.register("Anna").await.unwrap();
    client
}
