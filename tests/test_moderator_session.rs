use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use wedding_quiz::client::Method;
use wedding_quiz::core::SyncError;
use wedding_quiz::session::ModeratorSession;

mod common;
use common::{game_state, scripted_client, ScriptedTransport};

const CODE: &str = "MODERATOR2025";

fn stats_body() -> serde_json::Value {
    json!({
        "stats": {
            "total_players": 12,
            "active_teams": 6,
            "current_round": 2,
            "game_state": "playing",
            "is_paused": false,
            "active_tokens": 1,
        },
        "recent_actions": [
            { "type": "start_round", "description": "Round 2 started", "created_at": "2026-06-20T18:30:00" }
        ],
    })
}

fn moderator() -> Arc<ModeratorSession<ScriptedTransport>> {
    let client = scripted_client();
    let transport = client.api().transport();
    transport.respond_always(Method::Get, "/game/state", 200, game_state("playing", 2, vec![]));
    transport.respond_always(Method::Get, "/moderator/stats", 200, stats_body());
    Arc::new(ModeratorSession::new(client))
}

async fn signed_in() -> Arc<ModeratorSession<ScriptedTransport>> {
    let moderator = moderator();
    moderator.client().api().transport().respond_once(
        Method::Post,
        "/moderator/authenticate",
        200,
        json!({ "success": true, "message": "Authenticated" }),
    );
    moderator.authenticate(CODE).await.unwrap();
    moderator
}

#[tokio::test]
async fn test_actions_without_credential_fail_locally() {
    let moderator = moderator();

    assert!(matches!(moderator.start_round().await, Err(SyncError::NotAuthenticated)));
    assert!(matches!(moderator.pause_game().await, Err(SyncError::NotAuthenticated)));
    assert!(matches!(moderator.reset_game().await, Err(SyncError::NotAuthenticated)));
    assert!(matches!(moderator.announce_drink_break(None).await, Err(SyncError::NotAuthenticated)));

    assert!(moderator.client().api().transport().requests().is_empty());
    assert_eq!(
        moderator.client().state().notices.error(),
        Some("Moderator access required")
    );
}

#[tokio::test]
async fn test_wrong_code_is_reported() {
    let moderator = moderator();
    moderator.client().api().transport().respond_once(
        Method::Post,
        "/moderator/authenticate",
        401,
        json!({ "error": "Invalid secret code" }),
    );

    moderator.authenticate("guess").await.unwrap_err();

    assert!(!moderator.is_authenticated());
    let state = moderator.client().state();
    assert!(state.notices.error().unwrap().starts_with("Invalid secret code"));
}

#[tokio::test]
async fn test_empty_code_is_not_sent() {
    let moderator = moderator();
    moderator.authenticate("   ").await.unwrap_err();
    assert!(moderator.client().api().transport().requests().is_empty());
}

#[tokio::test]
async fn test_mutation_sends_code_and_refreshes_state_and_stats() {
    let moderator = signed_in().await;
    let transport = moderator.client().api().transport();
    transport.respond_once(
        Method::Post,
        "/moderator/pause-game",
        200,
        json!({ "success": true, "is_paused": true, "message": "Game paused" }),
    );
    let states_before = transport.count(Method::Get, "/game/state");
    let stats_before = transport.count(Method::Get, "/moderator/stats");

    assert!(moderator.pause_game().await.unwrap());

    assert_eq!(
        transport.last_body("/moderator/pause-game"),
        Some(json!({ "secret_code": CODE }))
    );
    assert_eq!(transport.count(Method::Get, "/game/state"), states_before + 1);
    assert_eq!(transport.count(Method::Get, "/moderator/stats"), stats_before + 1);

    let state = moderator.state();
    assert_eq!(state.stats.as_ref().unwrap().total_players, 12);
    assert_eq!(state.recent_actions[0].action_type, "start_round");
}

#[tokio::test]
async fn test_drink_break_defaults_its_message() {
    let moderator = signed_in().await;
    let transport = moderator.client().api().transport();
    transport.respond_always(Method::Post, "/moderator/drink-break", 200, json!({ "success": true }));

    moderator.announce_drink_break(None).await.unwrap();
    assert_eq!(
        transport.last_body("/moderator/drink-break"),
        Some(json!({ "secret_code": CODE, "message": "Drink break! 🍻" }))
    );

    moderator.announce_drink_break(Some("  ")).await.unwrap_err();
    assert_eq!(transport.count(Method::Post, "/moderator/drink-break"), 1);
}

#[tokio::test]
async fn test_team_change_needs_both_selections() {
    let moderator = signed_in().await;
    let transport = moderator.client().api().transport();

    moderator.manual_team_change(Some(4), None).await.unwrap_err();
    assert_eq!(transport.count(Method::Post, "/moderator/manual-team-change"), 0);
    assert_eq!(
        moderator.client().state().notices.error(),
        Some("Choose a player and a team!")
    );

    transport.respond_once(
        Method::Post,
        "/moderator/manual-team-change",
        200,
        json!({ "success": true }),
    );
    moderator.manual_team_change(Some(4), Some(2)).await.unwrap();
    assert_eq!(
        transport.last_body("/moderator/manual-team-change"),
        Some(json!({ "secret_code": CODE, "player_id": 4, "target_team_id": 2 }))
    );
}

#[tokio::test]
async fn test_finalize_records_the_result() {
    let moderator = signed_in().await;
    moderator.client().api().transport().respond_once(
        Method::Post,
        "/vote/finalize",
        200,
        json!({ "success": true, "winner_team_id": 3, "winning_number": 7, "is_tie": false }),
    );

    let result = moderator.finalize_voting().await.unwrap();

    assert_eq!(result.winner_team_id, Some(3));
    assert_eq!(moderator.state().last_result, Some(result));
}

#[tokio::test]
async fn test_settings_and_presets_load_together() {
    let moderator = signed_in().await;
    let transport = moderator.client().api().transport();
    transport.respond_once(
        Method::Get,
        "/settings/get",
        200,
        json!({ "settings": { "voting_duration_seconds": 30, "number_range_max": 25 } }),
    );
    transport.respond_once(
        Method::Get,
        "/settings/presets",
        200,
        json!({ "presets": {
            "sprint": { "name": "Sprint", "voting_duration_seconds": 15, "is_sprint_mode": true, "number_range_max": 25 },
            "classic": { "name": "Classic", "voting_duration_seconds": 30, "number_range_max": 25 },
        } }),
    );

    moderator.load_settings().await.unwrap();

    let state = moderator.state();
    assert_eq!(state.settings.as_ref().unwrap().voting_duration_seconds, 30);
    let keys: Vec<_> = state.presets.iter().map(|(key, _)| key.as_str()).collect();
    assert_eq!(keys, ["classic", "sprint"]);
}

#[tokio::test]
async fn test_sign_out_forgets_the_credential() {
    let moderator = signed_in().await;
    moderator.sign_out();

    let before = moderator.client().api().transport().requests().len();
    assert!(moderator.reset_game().await.is_err());
    assert_eq!(moderator.client().api().transport().requests().len(), before);
}

#[tokio::test(start_paused = true)]
async fn test_stats_polling_starts_only_after_authentication() {
    let moderator = moderator();
    assert!(moderator.spawn_stats_poller(Duration::from_secs(3)).is_err());

    let moderator = signed_in().await;
    let poller = moderator.spawn_stats_poller(Duration::from_secs(3)).unwrap();
    tokio::time::sleep(Duration::from_millis(6_500)).await;
    poller.stop().await;

    let transport = moderator.client().api().transport();
    assert_eq!(transport.count(Method::Get, "/moderator/stats"), 3);
    assert!(moderator.state().stats.is_some());
}

#[tokio::test]
async fn test_start_round_and_reset_refresh_state_and_stats_once() {
    let moderator = signed_in().await;
    let transport = moderator.client().api().transport();
    transport.respond_once(Method::Post, "/moderator/start-round", 200, json!({ "success": true }));
    transport.respond_once(Method::Post, "/moderator/reset-game", 200, json!({ "success": true }));
    let states_before = transport.count(Method::Get, "/game/state");
    let stats_before = transport.count(Method::Get, "/moderator/stats");

    moderator.start_round().await.unwrap();
    assert_eq!(
        transport.last_body("/moderator/start-round"),
        Some(json!({ "secret_code": CODE }))
    );
    assert_eq!(transport.count(Method::Get, "/game/state"), states_before + 1);
    assert_eq!(transport.count(Method::Get, "/moderator/stats"), stats_before + 1);
    assert_eq!(moderator.client().state().notices.success(), Some("Round started!"));

    moderator.reset_game().await.unwrap();
    assert_eq!(
        transport.last_body("/moderator/reset-game"),
        Some(json!({ "secret_code": CODE }))
    );
    assert_eq!(transport.count(Method::Get, "/game/state"), states_before + 2);
    assert_eq!(transport.count(Method::Get, "/moderator/stats"), stats_before + 2);
    assert_eq!(moderator.client().state().notices.success(), Some("Game reset!"));
}

#[tokio::test]
async fn test_rejected_start_round_skips_the_refresh() {
    let moderator = signed_in().await;
    let transport = moderator.client().api().transport();
    transport.respond_once(
        Method::Post,
        "/moderator/start-round",
        400,
        json!({ "error": "Round already active" }),
    );
    let states_before = transport.count(Method::Get, "/game/state");

    moderator.start_round().await.unwrap_err();

    assert_eq!(transport.count(Method::Get, "/game/state"), states_before);
    assert!(moderator
        .client()
        .state()
        .notices
        .error()
        .unwrap()
        .contains("Round already active"));
}

#[tokio::test]
async fn test_apply_preset_replaces_settings() {
    let moderator = signed_in().await;
    let transport = moderator.client().api().transport();
    transport.respond_once(
        Method::Get,
        "/settings/get",
        200,
        json!({ "settings": { "voting_duration_seconds": 30, "number_range_max": 25 } }),
    );
    transport.respond_once(Method::Get, "/settings/presets", 200, json!({ "presets": {} }));
    moderator.load_settings().await.unwrap();

    transport.respond_once(
        Method::Post,
        "/settings/apply-preset",
        200,
        json!({
            "success": true,
            "message": "Preset 'sprint' applied",
            "settings": { "voting_duration_seconds": 15, "is_sprint_mode": true, "number_range_max": 25 },
        }),
    );
    let states_before = transport.count(Method::Get, "/game/state");

    let settings = moderator.apply_preset(" sprint ").await.unwrap();

    assert_eq!(
        transport.last_body("/settings/apply-preset"),
        Some(json!({ "secret_code": CODE, "preset_name": "sprint" }))
    );
    assert!(settings.is_sprint_mode);
    assert_eq!(moderator.state().settings.as_ref().unwrap().voting_duration_seconds, 15);
    assert_eq!(transport.count(Method::Get, "/game/state"), states_before + 1);
    assert_eq!(
        moderator.client().state().notices.success(),
        Some("Preset 'sprint' applied")
    );
}

#[tokio::test]
async fn test_balance_check_is_stored() {
    let moderator = signed_in().await;
    let transport = moderator.client().api().transport();
    transport.respond_once(
        Method::Get,
        "/balance/check",
        200,
        json!({
            "needs_balance": true,
            "snowball_risk": false,
            "team_sizes": [4, 2, 2],
            "size_difference": 2,
        }),
    );

    let report = moderator.balance_check().await.unwrap();

    assert!(report.needs_balance);
    assert_eq!(report.team_sizes, [4, 2, 2]);
    assert_eq!(moderator.state().balance, Some(report));
    assert_eq!(transport.count(Method::Get, "/balance/check"), 1);
}

#[tokio::test]
async fn test_balance_check_needs_access() {
    let moderator = moderator();

    assert!(matches!(moderator.balance_check().await, Err(SyncError::NotAuthenticated)));
    assert_eq!(moderator.client().api().transport().count(Method::Get, "/balance/check"), 0);
}
