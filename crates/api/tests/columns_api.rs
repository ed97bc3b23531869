//! HTTP-level integration tests for column operations.

mod common;

use axum::http::StatusCode;
use sqlx::PgPool;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn list_returns_columns_with_card_counts(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let owner = common::seed_user(&pool, "owner@example.com", "Owner").await;
    let token = common::token_for(owner);

    let (board_id, columns) = common::create_board(&app, &token, "Board").await;
    common::create_card(&app, &token, columns[1], "One").await;
    common::create_card(&app, &token, columns[1], "Two").await;

    let response = common::get(&app, &format!("/api/v1/boards/{board_id}/columns"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;

    let counts: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["cardCount"].as_i64().unwrap())
        .collect();
    assert_eq!(counts, vec![0, 2, 0]);
}

// ---------------------------------------------------------------------------
// Rename
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn rename_trims_and_persists(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let owner = common::seed_user(&pool, "owner@example.com", "Owner").await;
    let token = common::token_for(owner);

    let (_, columns) = common::create_board(&app, &token, "Board").await;

    let response = common::patch_json(
        &app,
        &format!("/api/v1/columns/{}", columns[0]),
        &token,
        serde_json::json!({ "name": "  Backlog  " }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    assert_eq!(json["data"]["name"], "Backlog");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn rename_rejects_blank_and_overlong_names(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let owner = common::seed_user(&pool, "owner@example.com", "Owner").await;
    let token = common::token_for(owner);

    let (_, columns) = common::create_board(&app, &token, "Board").await;

    for bad_name in [" ".to_string(), "x".repeat(101)] {
        let response = common::patch_json(
            &app,
            &format!("/api/v1/columns/{}", columns[0]),
            &token,
            serde_json::json!({ "name": bad_name }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = common::body_json(response).await;
        assert_eq!(json["code"], "INVALID_COLUMN_NAME");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn viewer_rename_is_forbidden_and_leaves_name_unchanged(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let owner = common::seed_user(&pool, "owner@example.com", "Owner").await;
    let viewer = common::seed_user(&pool, "viewer@example.com", "Viewer").await;
    let owner_token = common::token_for(owner);

    let (board_id, columns) = common::create_board(&app, &owner_token, "Board").await;
    common::add_member(&app, &owner_token, board_id, viewer, "viewer").await;

    let response = common::patch_json(
        &app,
        &format!("/api/v1/columns/{}", columns[0]),
        &common::token_for(viewer),
        serde_json::json!({ "name": "Sneaky" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = common::body_json(response).await;
    assert_eq!(json["code"], "COLUMN_FORBIDDEN");

    let name: String = sqlx::query_scalar("SELECT name FROM columns WHERE id = $1")
        .bind(columns[0])
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(name, "To Do");
}

// ---------------------------------------------------------------------------
// Collapse
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn collapse_flips_flag_without_touching_positions(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let owner = common::seed_user(&pool, "owner@example.com", "Owner").await;
    let token = common::token_for(owner);

    let (_, columns) = common::create_board(&app, &token, "Board").await;

    let response = common::post_json(
        &app,
        &format!("/api/v1/columns/{}/collapse", columns[1]),
        &token,
        serde_json::json!({ "isCollapsed": true }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    assert_eq!(json["data"]["isCollapsed"], true);
    assert_eq!(json["data"]["position"], 2000);
}

// ---------------------------------------------------------------------------
// Reorder
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn reorder_rewrites_positions_canonically(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let owner = common::seed_user(&pool, "owner@example.com", "Owner").await;
    let token = common::token_for(owner);

    let (board_id, columns) = common::create_board(&app, &token, "Board").await;
    let reordered = vec![columns[2], columns[0], columns[1]];

    let response = common::post_json(
        &app,
        "/api/v1/columns/reorder",
        &token,
        serde_json::json!({ "boardId": board_id, "columnIds": reordered }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;

    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Done", "To Do", "In Progress"]);

    let positions: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["position"].as_i64().unwrap())
        .collect();
    assert_eq!(positions, vec![1000, 2000, 3000]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn reorder_with_wrong_id_set_fails_and_keeps_order(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let owner = common::seed_user(&pool, "owner@example.com", "Owner").await;
    let token = common::token_for(owner);

    let (board_id, columns) = common::create_board(&app, &token, "Board").await;

    // A foreign id, a short list, and a duplicated id must all be rejected.
    let bad_lists = vec![
        vec![columns[0], columns[1], Uuid::new_v4()],
        vec![columns[0], columns[1]],
        vec![columns[0], columns[0], columns[1]],
    ];

    for bad in bad_lists {
        let response = common::post_json(
            &app,
            "/api/v1/columns/reorder",
            &token,
            serde_json::json!({ "boardId": board_id, "columnIds": bad }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = common::body_json(response).await;
        assert_eq!(json["code"], "INVALID_COLUMN_ORDER");
    }

    let stored: Vec<String> =
        sqlx::query_scalar("SELECT name FROM columns WHERE board_id = $1 ORDER BY position ASC")
            .bind(board_id)
            .fetch_all(&pool)
            .await
            .unwrap();
    assert_eq!(stored, vec!["To Do", "In Progress", "Done"]);
}

// ---------------------------------------------------------------------------
// Disabled create/delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn standalone_create_and_delete_answer_405(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let owner = common::seed_user(&pool, "owner@example.com", "Owner").await;
    let token = common::token_for(owner);

    let (board_id, columns) = common::create_board(&app, &token, "Board").await;

    let response = common::post_json(
        &app,
        &format!("/api/v1/boards/{board_id}/columns"),
        &token,
        serde_json::json!({ "name": "Extra" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let json = common::body_json(response).await;
    assert_eq!(json["code"], "COLUMN_CREATE_DISABLED");

    let response =
        common::delete(&app, &format!("/api/v1/columns/{}", columns[0]), &token).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let json = common::body_json(response).await;
    assert_eq!(json["code"], "COLUMN_DELETE_DISABLED");
}
