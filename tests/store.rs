use chrono::{Duration, Utc};
use engine::{kernel, store};
use models::domains::sea_orm_active_enums::{
    ContestVisibility, LeaderboardVisibility, PromptLanguage, UserRole,
};
use models::domains::{contest_prompts, contests, entries, prompts, users};
use models::schemas::session::{ClientFlags, FinishPayload, KeylogEntry, Verdict};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use utils::testing::setup_test_db;

async fn seed_contest(
    conn: &DatabaseConnection,
    contest_id: &str,
    user_id: &str,
    max_attempts: Option<i32>,
) {
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
        title: Set("Daily sprint".to_string()),
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
        max_attempts: Set(max_attempts),
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

fn romaji_keylog() -> Vec<KeylogEntry> {
    [
        (0.0, "r"),
        (310.0, "o"),
        (660.0, "m"),
        (1000.0, "a"),
        (1500.0, "j"),
        (2150.0, "i"),
    ]
    .into_iter()
    .map(|(t, k)| KeylogEntry {
        t,
        k: k.to_string(),
        ok: Some(true),
    })
    .collect()
}

#[tokio::test]
async fn start_then_finish_clean_session_is_finished_and_becomes_best() {
    let conn = setup_test_db().await;
    seed_contest(&conn, "contest-1", "user-1", Some(3)).await;

    let now = Utc::now();
    let start = store::start_session(&conn, "contest-1", "user-1", now)
        .await
        .expect("start session");
    assert_eq!(start.prompt.typing_target, "romaji");
    assert_eq!(start.attempts_used, 1);
    assert_eq!(start.attempts_remaining, Some(2));

    let stats = kernel::calculate_typing_stats(6, 0, 2150.0).unwrap();
    let payload = FinishPayload {
        cpm: Some(stats.cpm),
        wpm: Some(stats.wpm),
        accuracy: Some(stats.accuracy),
        score: Some(stats.score as f64),
        errors: Some(0),
        keylog: romaji_keylog(),
        client_flags: ClientFlags::default(),
    };

    let finished = store::finish_session(&conn, &start.session_id, "user-1", payload, now)
        .await
        .expect("finish session");

    assert_eq!(finished.status, Verdict::Finished);
    assert!(finished.issues.is_empty());
    assert_eq!(finished.stats.score, stats.score);
    assert!(finished.best_updated);
    assert_eq!(finished.attempts_used, 1);
}

#[tokio::test]
async fn finishing_twice_is_rejected() {
    let conn = setup_test_db().await;
    seed_contest(&conn, "contest-2", "user-2", None).await;

    let now = Utc::now();
    let start = store::start_session(&conn, "contest-2", "user-2", now)
        .await
        .expect("start session");

    let stats = kernel::calculate_typing_stats(6, 0, 2150.0).unwrap();
    let payload = FinishPayload {
        cpm: Some(stats.cpm),
        wpm: Some(stats.wpm),
        accuracy: Some(stats.accuracy),
        score: Some(stats.score as f64),
        errors: Some(0),
        keylog: romaji_keylog(),
        client_flags: ClientFlags::default(),
    };

    store::finish_session(&conn, &start.session_id, "user-2", payload.clone(), now)
        .await
        .expect("first finish succeeds");

    let err = store::finish_session(&conn, &start.session_id, "user-2", payload, now)
        .await
        .expect_err("second finish must be rejected");
    assert_eq!(err.message(), "SESSION_ALREADY_FINISHED");
}

#[tokio::test]
async fn attempts_cap_is_enforced_after_exhausting_entries() {
    let conn = setup_test_db().await;
    seed_contest(&conn, "contest-3", "user-3", Some(1)).await;

    let now = Utc::now();
    let start = store::start_session(&conn, "contest-3", "user-3", now)
        .await
        .expect("first attempt allowed");

    let stats = kernel::calculate_typing_stats(6, 0, 2150.0).unwrap();
    let payload = FinishPayload {
        cpm: Some(stats.cpm),
        wpm: Some(stats.wpm),
        accuracy: Some(stats.accuracy),
        score: Some(stats.score as f64),
        errors: Some(0),
        keylog: romaji_keylog(),
        client_flags: ClientFlags::default(),
    };
    store::finish_session(&conn, &start.session_id, "user-3", payload, now)
        .await
        .expect("finish first attempt");

    let err = store::start_session(&conn, "contest-3", "user-3", now)
        .await
        .expect_err("second attempt must be rejected by the cap");
    assert_eq!(err.message(), "ATTEMPTS_EXHAUSTED");
}

#[tokio::test]
async fn leaderboard_ranks_finished_sessions_only() {
    let conn = setup_test_db().await;
    seed_contest(&conn, "contest-4", "user-4", None).await;

    let now = Utc::now();
    let start = store::start_session(&conn, "contest-4", "user-4", now)
        .await
        .expect("start session");

    let stats = kernel::calculate_typing_stats(6, 0, 2150.0).unwrap();
    let payload = FinishPayload {
        cpm: Some(stats.cpm),
        wpm: Some(stats.wpm),
        accuracy: Some(stats.accuracy),
        score: Some(stats.score as f64),
        errors: Some(0),
        keylog: romaji_keylog(),
        client_flags: ClientFlags::default(),
    };
    store::finish_session(&conn, &start.session_id, "user-4", payload, now)
        .await
        .expect("finish session");

    let summary = store::get_leaderboard(&conn, "contest-4", 10)
        .await
        .expect("leaderboard visible");
    assert_eq!(summary.total, 1);
    assert_eq!(summary.ranked[0].session.user_id, "user-4");
    assert_eq!(summary.ranked[0].rank, 1);
}
