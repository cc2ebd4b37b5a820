use super::*;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode as MockStatus,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use shared::Activity;
use tokio::{net::TcpListener, sync::Mutex};

type RecordedCall = (&'static str, String, String);

#[derive(Clone)]
struct MockBackend {
    roster: Arc<Mutex<Roster>>,
    recorded: Arc<Mutex<Vec<RecordedCall>>>,
    fail_roster_fetch: Arc<Mutex<bool>>,
    reject_without_body: Arc<Mutex<bool>>,
}

fn seed_roster() -> Roster {
    let mut roster = Roster::new();
    roster.insert(
        "Chess Club".to_string(),
        Activity {
            description: "Learn strategies and compete in chess tournaments".to_string(),
            schedule: "Fridays, 3:30 PM - 5:00 PM".to_string(),
            max_participants: 12,
            participants: vec!["michael@mergington.edu".to_string()],
        },
    );
    roster.insert(
        "Gym Class".to_string(),
        Activity {
            description: "Physical education and sports activities".to_string(),
            schedule: "Mondays and Wednesdays, 2:00 PM - 3:00 PM".to_string(),
            max_participants: 30,
            participants: Vec::new(),
        },
    );
    roster
}

#[derive(Deserialize)]
struct EmailQuery {
    email: String,
}

async fn mock_list_activities(State(state): State<MockBackend>) -> Response {
    if *state.fail_roster_fetch.lock().await {
        return MockStatus::INTERNAL_SERVER_ERROR.into_response();
    }
    Json(state.roster.lock().await.clone()).into_response()
}

async fn mock_signup(
    State(state): State<MockBackend>,
    Path(name): Path<String>,
    Query(q): Query<EmailQuery>,
) -> Response {
    state
        .recorded
        .lock()
        .await
        .push(("signup", name.clone(), q.email.clone()));

    if *state.reject_without_body.lock().await {
        return MockStatus::SERVICE_UNAVAILABLE.into_response();
    }

    let mut roster = state.roster.lock().await;
    let Some(activity) = roster.get_mut(&name) else {
        return (
            MockStatus::NOT_FOUND,
            Json(ErrorDetail {
                detail: Some("Activity not found".to_string()),
            }),
        )
            .into_response();
    };
    if activity.participants.iter().any(|p| p == &q.email) {
        return (
            MockStatus::BAD_REQUEST,
            Json(ErrorDetail {
                detail: Some("Already signed up".to_string()),
            }),
        )
            .into_response();
    }
    activity.participants.push(q.email.clone());
    Json(ActionOutcome {
        message: format!("Signed up {} for {}", q.email, name),
    })
    .into_response()
}

async fn mock_unregister(
    State(state): State<MockBackend>,
    Path(name): Path<String>,
    Query(q): Query<EmailQuery>,
) -> Response {
    state
        .recorded
        .lock()
        .await
        .push(("unregister", name.clone(), q.email.clone()));

    let mut roster = state.roster.lock().await;
    let Some(activity) = roster.get_mut(&name) else {
        return (
            MockStatus::NOT_FOUND,
            Json(ErrorDetail {
                detail: Some("Activity not found".to_string()),
            }),
        )
            .into_response();
    };
    let Some(idx) = activity.participants.iter().position(|p| p == &q.email) else {
        return (
            MockStatus::BAD_REQUEST,
            Json(ErrorDetail {
                detail: Some(format!("{} is not signed up for {}", q.email, name)),
            }),
        )
            .into_response();
    };
    activity.participants.remove(idx);
    Json(ActionOutcome {
        message: format!("Unregistered {} from {}", q.email, name),
    })
    .into_response()
}

async fn spawn_activities_server() -> (String, MockBackend) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let state = MockBackend {
        roster: Arc::new(Mutex::new(seed_roster())),
        recorded: Arc::new(Mutex::new(Vec::new())),
        fail_roster_fetch: Arc::new(Mutex::new(false)),
        reject_without_body: Arc::new(Mutex::new(false)),
    };
    let app = Router::new()
        .route("/activities", get(mock_list_activities))
        .route("/activities/:name/signup", post(mock_signup))
        .route("/activities/:name/unregister", post(mock_unregister))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), state)
}

#[tokio::test]
async fn fetch_activities_decodes_full_roster() {
    let (server_url, _state) = spawn_activities_server().await;
    let client = ActivityClient::new(&server_url).expect("client");

    let roster = client.fetch_activities().await.expect("roster");
    assert_eq!(roster.len(), 2);
    assert_eq!(roster["Chess Club"].spots_left(), 11);
    assert_eq!(roster["Gym Class"].spots_left(), 30);
    assert!(roster["Gym Class"].participants.is_empty());
}

#[tokio::test]
async fn roster_fetch_surfaces_non_success_status() {
    let (server_url, state) = spawn_activities_server().await;
    *state.fail_roster_fetch.lock().await = true;

    let client = ActivityClient::new(&server_url).expect("client");
    let err = client.fetch_activities().await.expect_err("must fail");
    match err {
        ClientError::Api { status, detail } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(detail, None);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn signup_percent_encodes_activity_and_email() {
    let (server_url, state) = spawn_activities_server().await;
    let client = ActivityClient::new(&server_url).expect("client");

    let message = client
        .signup("Chess Club", "test+spring@mergington.edu")
        .await
        .expect("signup");
    assert_eq!(message, "Signed up test+spring@mergington.edu for Chess Club");

    // The mock observes the decoded originals, spaces and plus included.
    let recorded = state.recorded.lock().await.clone();
    assert_eq!(
        recorded,
        vec![(
            "signup",
            "Chess Club".to_string(),
            "test+spring@mergington.edu".to_string()
        )]
    );

    let roster = client.fetch_activities().await.expect("roster");
    assert!(roster["Chess Club"]
        .participants
        .iter()
        .any(|p| p == "test+spring@mergington.edu"));
}

#[tokio::test]
async fn duplicate_signup_returns_server_detail() {
    let (server_url, _state) = spawn_activities_server().await;
    let client = ActivityClient::new(&server_url).expect("client");

    let err = client
        .signup("Chess Club", "michael@mergington.edu")
        .await
        .expect_err("duplicate must fail");
    assert!(!err.is_transport());
    assert_eq!(err.detail(), Some("Already signed up"));
    match err {
        ClientError::Api { status, .. } => assert_eq!(status.as_u16(), 400),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn signup_for_unknown_activity_is_not_found() {
    let (server_url, _state) = spawn_activities_server().await;
    let client = ActivityClient::new(&server_url).expect("client");

    let err = client
        .signup("Underwater Basket Weaving", "test@mergington.edu")
        .await
        .expect_err("must fail");
    match err {
        ClientError::Api { status, detail } => {
            assert_eq!(status.as_u16(), 404);
            assert_eq!(detail.as_deref(), Some("Activity not found"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn rejection_without_body_leaves_detail_empty() {
    let (server_url, state) = spawn_activities_server().await;
    *state.reject_without_body.lock().await = true;

    let client = ActivityClient::new(&server_url).expect("client");
    let err = client
        .signup("Chess Club", "test@mergington.edu")
        .await
        .expect_err("must fail");
    assert_eq!(err.detail(), None);
    match err {
        ClientError::Api { status, .. } => assert_eq!(status.as_u16(), 503),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unregister_removes_participant_and_confirms() {
    let (server_url, _state) = spawn_activities_server().await;
    let client = ActivityClient::new(&server_url).expect("client");

    let message = client
        .unregister("Chess Club", "michael@mergington.edu")
        .await
        .expect("unregister");
    assert_eq!(message, "Unregistered michael@mergington.edu from Chess Club");

    let roster = client.fetch_activities().await.expect("roster");
    assert!(roster["Chess Club"].participants.is_empty());
}

#[tokio::test]
async fn unregister_unknown_participant_is_rejected() {
    let (server_url, _state) = spawn_activities_server().await;
    let client = ActivityClient::new(&server_url).expect("client");

    let err = client
        .unregister("Chess Club", "notregistered@mergington.edu")
        .await
        .expect_err("must fail");
    assert!(err
        .detail()
        .is_some_and(|detail| detail.contains("not signed up")));
}

#[tokio::test]
async fn connection_failure_maps_to_transport() {
    // Bind and immediately drop to get an address nothing listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let client = ActivityClient::new(&format!("http://{addr}")).expect("client");
    let err = client.fetch_activities().await.expect_err("must fail");
    assert!(err.is_transport());
    assert_eq!(err.detail(), None);
}

#[tokio::test]
async fn base_url_with_trailing_slash_joins_cleanly() {
    let (server_url, state) = spawn_activities_server().await;
    let client = ActivityClient::new(&format!("{server_url}/")).expect("client");

    client
        .signup("Gym Class", "test@mergington.edu")
        .await
        .expect("signup");
    let recorded = state.recorded.lock().await.clone();
    assert_eq!(recorded[0].1, "Gym Class");
}

#[test]
fn rejects_malformed_or_non_http_base_urls() {
    assert!(matches!(
        ActivityClient::new("not a url"),
        Err(ClientError::InvalidBaseUrl(_))
    ));
    assert!(matches!(
        ActivityClient::new("mailto:student@mergington.edu"),
        Err(ClientError::UnsupportedBaseUrl)
    ));
    assert!(matches!(
        ActivityClient::new("ftp://files.mergington.edu"),
        Err(ClientError::UnsupportedBaseUrl)
    ));
}
