use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use wedding_quiz::client::Method;
use wedding_quiz::game::Phase;
use wedding_quiz::session::Poller;

mod common;
use common::{game_state, registered_client, scripted_client};

const INTERVAL: Duration = Duration::from_secs(3);

#[tokio::test(start_paused = true)]
async fn test_polling_keeps_cadence_around_user_actions() {
    let client = registered_client().await;
    let transport = client.api().transport();
    transport.respond_always(Method::Post, "/vote/submit", 200, json!({ "success": true }));
    let before = transport.count(Method::Get, "/game/state");

    let poller = Poller::spawn(Arc::clone(&client), INTERVAL);
    tokio::time::sleep(Duration::from_millis(100)).await;
    client.submit_vote(9).await.unwrap();
    tokio::time::sleep(Duration::from_millis(6_400)).await;
    poller.stop().await;

    // polls at 0s, 3s and 6s plus the vote's own refresh
    assert_eq!(transport.count(Method::Get, "/game/state"), before + 4);
}

#[tokio::test(start_paused = true)]
async fn test_polling_survives_repeated_failures() {
    let client = registered_client().await;
    let transport = client.api().transport();
    transport.fail_always(Method::Get, "/game/state", "server unreachable");
    let before = transport.count(Method::Get, "/game/state");

    let poller = Poller::spawn(Arc::clone(&client), INTERVAL);
    tokio::time::sleep(Duration::from_millis(30_500)).await;

    assert!(poller.is_running());
    assert_eq!(transport.count(Method::Get, "/game/state"), before + 11);
    {
        let state = client.state();
        assert!(state.last_poll_error.as_deref().unwrap().contains("server unreachable"));
        assert!(state.notices.error().is_none());
        assert_eq!(state.phase, Phase::Playing);
        assert!(state.snapshot.is_some());
    }

    transport.respond_always(Method::Get, "/game/state", 200, game_state("quiz", 3, vec![]));
    tokio::time::sleep(INTERVAL).await;
    poller.stop().await;

    let state = client.state();
    assert!(state.last_poll_error.is_none());
    assert_eq!(state.phase, Phase::Quiz);
}

#[tokio::test(start_paused = true)]
async fn test_stopped_poller_sends_nothing_more() {
    let client = scripted_client();
    let transport = client.api().transport();
    transport.respond_always(Method::Get, "/game/state", 200, game_state("registration", 0, vec![]));

    let poller = Poller::spawn(Arc::clone(&client), INTERVAL);
    tokio::time::sleep(Duration::from_millis(3_500)).await;
    poller.stop().await;
    tokio::time::sleep(Duration::from_secs(30)).await;

    assert_eq!(transport.count(Method::Get, "/game/state"), 2);
}

#[tokio::test(start_paused = true)]
async fn test_error_message_clears_after_five_seconds() {
    let client = scripted_client();
    client.register("").await.unwrap_err();

    tokio::time::advance(Duration::from_millis(4_900)).await;
    assert_eq!(client.state().notices.error(), Some("Enter your name!"));

    tokio::time::advance(Duration::from_millis(200)).await;
    assert!(client.state().notices.error().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_success_message_clears_after_three_seconds() {
    let client = registered_client().await;
    client
        .api()
        .transport()
        .respond_always(Method::Post, "/vote/submit", 200, json!({ "success": true }));
    client.submit_vote(5).await.unwrap();

    tokio::time::advance(Duration::from_millis(2_900)).await;
    assert_eq!(client.state().notices.success(), Some("Vote submitted: 5"));

    tokio::time::advance(Duration::from_millis(200)).await;
    assert!(client.state().notices.success().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_newer_error_restarts_the_lifetime() {
    let client = registered_client().await;
    client.submit_vote(0).await.unwrap_err();

    tokio::time::advance(Duration::from_secs(4)).await;
    client.select_partner(1).await.unwrap_err();

    tokio::time::advance(Duration::from_secs(4)).await;
    assert_eq!(
        client.state().notices.error(),
        Some("You cannot pair with yourself.")
    );

    tokio::time::advance(Duration::from_millis(1_100)).await;
    assert!(client.state().notices.error().is_none());
}
