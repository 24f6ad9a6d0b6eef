//! HTTP-level integration tests for admin user management and statistics.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_json_auth, put_json_auth, seed_and_login};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_creates_updates_and_deactivates_users(pool: PgPool) {
    let (_admin, admin_token) = seed_and_login(
        &pool,
        common::build_test_app(pool.clone()),
        "admin@test.com",
        "admin",
    )
    .await;

    // Create a premium practitioner.
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/admin/users",
        &admin_token,
        serde_json::json!({
            "email": "dubois@test.com",
            "password": "mot-de-passe-test",
            "name": "Dr. Martin Dubois",
            "role": "premium"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["role"], "premium");

    // Listing includes both accounts.
    let response = get_auth(common::build_test_app(pool.clone()), "/api/v1/admin/users", &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);

    // Downgrade the role.
    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/admin/users/{id}"),
        &admin_token,
        serde_json::json!({ "role": "freemium" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["role"], "freemium");

    // Deactivate; the row survives as inactive.
    let response = delete_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/admin/users/{id}"),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(
        common::build_test_app(pool),
        &format!("/api/v1/admin/users/{id}"),
        &admin_token,
    )
    .await;
    let user = body_json(response).await;
    assert_eq!(user["is_active"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_roles_are_rejected(pool: PgPool) {
    let (_admin, admin_token) = seed_and_login(
        &pool,
        common::build_test_app(pool.clone()),
        "admin@test.com",
        "admin",
    )
    .await;

    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/admin/users",
        &admin_token,
        serde_json::json!({
            "email": "etrange@test.com",
            "password": "mot-de-passe-test",
            "name": "X",
            "role": "superadmin"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admins_cannot_deactivate_themselves(pool: PgPool) {
    let (admin, admin_token) = seed_and_login(
        &pool,
        common::build_test_app(pool.clone()),
        "admin@test.com",
        "admin",
    )
    .await;

    let response = delete_auth(
        common::build_test_app(pool),
        &format!("/api/v1/admin/users/{}", admin.id),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn user_management_requires_the_admin_role(pool: PgPool) {
    let (_user, token) = seed_and_login(
        &pool,
        common::build_test_app(pool.clone()),
        "premium@test.com",
        "premium",
    )
    .await;

    let response = get_auth(common::build_test_app(pool.clone()), "/api/v1/admin/users", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(common::build_test_app(pool), "/api/v1/admin/stats", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn stats_aggregate_usage(pool: PgPool) {
    let (_admin, admin_token) = seed_and_login(
        &pool,
        common::build_test_app(pool.clone()),
        "admin@test.com",
        "admin",
    )
    .await;
    common::seed_user(&pool, "premium@test.com", "premium").await;
    common::seed_user(&pool, "freemium@test.com", "freemium").await;

    // One tree and one completed diagnostic on it.
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/admin/trees",
        &admin_token,
        serde_json::json!({
            "name": "Cervicale",
            "icon": "🦴",
            "nodes": [
                {"id": 1, "type": "question", "text": "Douleur ?",
                 "answers": [{"text": "Oui", "next": 2}]},
                {"id": 2, "type": "result", "title": "Urgence", "severity": "danger"}
            ]
        }),
    )
    .await;
    let tree_id = body_json(response).await["id"].as_i64().unwrap();

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/diagnostics",
        &admin_token,
        serde_json::json!({
            "tree_id": tree_id,
            "tree_name": "Cervicale",
            "path": [1, 2],
            "result_title": "Urgence",
            "result_severity": "danger"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get_auth(common::build_test_app(pool), "/api/v1/admin/stats", &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let stats = body_json(response).await;

    assert_eq!(stats["total_users"], 3);
    assert_eq!(stats["total_trees"], 1);
    assert_eq!(stats["total_tests"], 0);
    assert_eq!(stats["total_diagnostics"], 1);

    let by_role = stats["users_by_role"].as_array().unwrap();
    assert_eq!(by_role.len(), 3, "one entry per active role");

    let by_tree = stats["diagnostics_by_tree"].as_array().unwrap();
    assert_eq!(by_tree[0]["tree_name"], "Cervicale");
    assert_eq!(by_tree[0]["count"], 1);
}
