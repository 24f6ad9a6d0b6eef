//! HTTP-level integration tests for global settings.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, put_json_auth, seed_and_login};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn seeded_default_is_readable_by_any_user(pool: PgPool) {
    let (_user, token) = seed_and_login(
        &pool,
        common::build_test_app(pool.clone()),
        "freemium@test.com",
        "freemium",
    )
    .await;

    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/settings/freemium_tree_id",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["key"], "freemium_tree_id");
    assert_eq!(json["value"], "1");

    let missing = get_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/settings/inconnu",
        &token,
    )
    .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    // Unauthenticated reads are rejected.
    let anonymous = common::get(
        common::build_test_app(pool),
        "/api/v1/settings/freemium_tree_id",
    )
    .await;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn writes_are_admin_only_and_last_write_wins(pool: PgPool) {
    let (_admin, admin_token) = seed_and_login(
        &pool,
        common::build_test_app(pool.clone()),
        "admin@test.com",
        "admin",
    )
    .await;
    let (_user, user_token) = seed_and_login(
        &pool,
        common::build_test_app(pool.clone()),
        "premium@test.com",
        "premium",
    )
    .await;

    // Non-admin writes are forbidden.
    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/admin/settings/premium_price",
        &user_token,
        serde_json::json!({ "value": "9.99" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Values are strings, even for numeric settings. Successive writes
    // overwrite each other without any conflict check.
    for value in ["9.99", "14.99"] {
        let response = put_json_auth(
            common::build_test_app(pool.clone()),
            "/api/v1/admin/settings/premium_price",
            &admin_token,
            serde_json::json!({ "value": value }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/settings/premium_price",
        &user_token,
    )
    .await;
    assert_eq!(body_json(response).await["value"], "14.99");

    // The daily tip is an arbitrary string setting, upserted the same way.
    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/admin/settings/daily_tip",
        &admin_token,
        serde_json::json!({ "value": "Pensez à calibrer vos tests." }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(
        common::build_test_app(pool),
        "/api/v1/settings/daily_tip",
        &user_token,
    )
    .await;
    assert_eq!(
        body_json(response).await["value"],
        "Pensez à calibrer vos tests."
    );
}
