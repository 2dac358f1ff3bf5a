use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{Duration, Utc};
use engine::{config::Config, publisher::NullPublisher, state::CoreState};
use http_body_util::BodyExt;
use models::domains::sea_orm_active_enums::{
    ContestVisibility, LeaderboardVisibility, PromptLanguage, UserRole,
};
use models::domains::{contest_prompts, contests, entries, prompts, users};
use models::schemas::user::Principal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use tower::ServiceExt;
use utils::testing::setup_test_db;

fn test_config() -> Config {
    Config {
        db_url: String::new(),
        host: "127.0.0.1".to_string(),
        port: 0,
        allowed_origin: "*".to_string(),
        default_max_attempts: None,
    }
}

async fn seed_contest(conn: &DatabaseConnection, contest_id: &str, user_id: &str) {
    let now = Utc::now().fixed_offset();

    users::ActiveModel {
        id: Set(user_id.to_string()),
        username: Set(format!("user-{user_id}")),
        email: Set(format!("{user_id}@example.com")),
        password_hash: Set("hash".to_string()),
        role: Set(UserRole::User),
        created_at: Set(now),
    }
    .insert(conn)
    .await
    .expect("insert user");

    contests::ActiveModel {
        id: Set(contest_id.to_string()),
        title: Set("HTTP sprint".to_string()),
        description: Set(None),
        visibility: Set(ContestVisibility::Public),
        join_code: Set(None),
        starts_at: Set((Utc::now() - Duration::minutes(1)).fixed_offset()),
        ends_at: Set((Utc::now() + Duration::hours(1)).fixed_offset()),
        timezone: Set("UTC".to_string()),
        time_limit_sec: Set(120),
        allow_backspace: Set(true),
        leaderboard_visibility: Set(LeaderboardVisibility::During),
        language: Set(PromptLanguage::English),
        max_attempts: Set(None),
        created_by: Set(user_id.to_string()),
        created_at: Set(now),
    }
    .insert(conn)
    .await
    .expect("insert contest");

    prompts::ActiveModel {
        id: Set("prompt-1".to_string()),
        language: Set(PromptLanguage::English),
        display_text: Set("romaji".to_string()),
        typing_target: Set("romaji".to_string()),
        tags: Set(serde_json::json!([])),
        is_active: Set(true),
        created_at: Set(now),
    }
    .insert(conn)
    .await
    .expect("insert prompt");

    contest_prompts::ActiveModel {
        contest_id: Set(contest_id.to_string()),
        prompt_id: Set("prompt-1".to_string()),
        order_index: Set(0),
    }
    .insert(conn)
    .await
    .expect("insert contest prompt link");

    entries::ActiveModel {
        user_id: Set(user_id.to_string()),
        contest_id: Set(contest_id.to_string()),
        attempts_used: Set(0),
        ..Default::default()
    }
    .insert(conn)
    .await
    .expect("insert entry");
}

#[tokio::test]
async fn start_session_requires_a_principal() {
    let conn = setup_test_db().await;
    seed_contest(&conn, "contest-http-1", "user-http-1").await;

    let state = CoreState::new(conn, test_config(), Arc::new(NullPublisher));
    let app = api::routers::create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/contests/contest-http-1/session")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn start_session_with_principal_returns_a_prompt() {
    let conn = setup_test_db().await;
    seed_contest(&conn, "contest-http-2", "user-http-2").await;

    let state = CoreState::new(conn, test_config(), Arc::new(NullPublisher));
    let principal = Principal {
        user_id: "user-http-2".to_string(),
        role: UserRole::User,
    };
    let app = api::routers::create_router(state).layer(axum::Extension(principal));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/contests/contest-http-2/session")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["data"]["prompt"]["typingTarget"], "romaji");
}

#[tokio::test]
async fn leaderboard_is_reachable_without_a_principal() {
    let conn = setup_test_db().await;
    seed_contest(&conn, "contest-http-3", "user-http-3").await;

    let state = CoreState::new(conn, test_config(), Arc::new(NullPublisher));
    let app = api::routers::create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/contests/contest-http-3/leaderboard")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["data"]["total"], 0);
}
