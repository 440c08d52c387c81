//! HTTP-level integration tests for sets and their item composition:
//! append, notes editing, removal with compaction, and atomic reorder.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get_auth, patch_json_auth, post_json_auth, put_json_auth, signup,
};
use sqlx::PgPool;

async fn create_set(app: axum::Router, token: &str, name: &str) -> i64 {
    let body = serde_json::json!({ "name": name });
    let response = post_json_auth(app, "/api/v1/sets", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

async fn create_track(app: axum::Router, token: &str, title: &str) -> i64 {
    let body = serde_json::json!({ "title": title, "artist": "Test Artist" });
    let response = post_json_auth(app, "/api/v1/tracks", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// Append a track to a set and return the new item's id.
async fn append_item(app: axum::Router, token: &str, set_id: i64, track_id: i64) -> i64 {
    let body = serde_json::json!({ "track_id": track_id });
    let response = post_json_auth(app, &format!("/api/v1/sets/{set_id}/items"), body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// Fetch the set detail and return `(item_id, position, track_id)` triples
/// in response order.
async fn fetch_items(app: axum::Router, token: &str, set_id: i64) -> Vec<(i64, i64, i64)> {
    let response = get_auth(app, &format!("/api/v1/sets/{set_id}"), token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| {
            (
                item["id"].as_i64().unwrap(),
                item["position"].as_i64().unwrap(),
                item["track_id"].as_i64().unwrap(),
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Set CRUD
// ---------------------------------------------------------------------------

/// Creating a set linked to a gig the caller does not own fails with 404.
#[sqlx::test(migrations = "../../migrations")]
async fn create_set_with_foreign_gig_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token_a, _) = signup(app.clone(), "owner").await;
    let (token_b, _) = signup(app.clone(), "other").await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/gigs",
        serde_json::json!({ "title": "Private Party" }),
        &token_a,
    )
    .await;
    let gig_id = body_json(response).await["id"].as_i64().unwrap();

    let body = serde_json::json!({ "name": "Sneaky Set", "gig_id": gig_id });
    let response = post_json_auth(app, "/api/v1/sets", body, &token_b).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Patching `"gig_id": null` unlinks the set from its gig.
#[sqlx::test(migrations = "../../migrations")]
async fn patch_null_gig_id_unlinks(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = signup(app.clone(), "dj").await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/gigs",
        serde_json::json!({ "title": "Friday Night" }),
        &token,
    )
    .await;
    let gig_id = body_json(response).await["id"].as_i64().unwrap();

    let body = serde_json::json!({ "name": "Opening Set", "gig_id": gig_id });
    let response = post_json_auth(app.clone(), "/api/v1/sets", body, &token).await;
    let set_id = body_json(response).await["id"].as_i64().unwrap();

    let response = patch_json_auth(
        app,
        &format!("/api/v1/sets/{set_id}"),
        serde_json::json!({ "gig_id": null }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["gig_id"].is_null());
}

// ---------------------------------------------------------------------------
// Append
// ---------------------------------------------------------------------------

/// Appended items take positions 0, 1, 2, ... and come back in that order
/// with their track summaries.
#[sqlx::test(migrations = "../../migrations")]
async fn append_assigns_sequential_positions(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = signup(app.clone(), "dj").await;
    let set_id = create_set(app.clone(), &token, "Peak Time").await;

    let t1 = create_track(app.clone(), &token, "Opener").await;
    let t2 = create_track(app.clone(), &token, "Builder").await;
    let t3 = create_track(app.clone(), &token, "Closer").await;

    append_item(app.clone(), &token, set_id, t1).await;
    append_item(app.clone(), &token, set_id, t2).await;
    append_item(app.clone(), &token, set_id, t3).await;

    let response = get_auth(app, &format!("/api/v1/sets/{set_id}"), &token).await;
    let json = body_json(response).await;
    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    for (i, item) in items.iter().enumerate() {
        assert_eq!(item["position"], i as i64);
    }
    assert_eq!(items[0]["track"]["title"], "Opener");
    assert_eq!(items[2]["track"]["title"], "Closer");
}

/// The same track may appear in a set more than once.
#[sqlx::test(migrations = "../../migrations")]
async fn same_track_can_repeat(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = signup(app.clone(), "dj").await;
    let set_id = create_set(app.clone(), &token, "Anthem Hour").await;
    let track = create_track(app.clone(), &token, "The Anthem").await;

    append_item(app.clone(), &token, set_id, track).await;
    append_item(app.clone(), &token, set_id, track).await;

    let items = fetch_items(app, &token, set_id).await;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].2, track);
    assert_eq!(items[1].2, track);
}

/// Appending a track the caller does not own fails with 404 and adds nothing.
#[sqlx::test(migrations = "../../migrations")]
async fn append_foreign_track_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token_a, _) = signup(app.clone(), "owner").await;
    let (token_b, _) = signup(app.clone(), "other").await;

    let set_id = create_set(app.clone(), &token_b, "My Set").await;
    let foreign_track = create_track(app.clone(), &token_a, "Not Yours").await;

    let body = serde_json::json!({ "track_id": foreign_track });
    let response =
        post_json_auth(app.clone(), &format!("/api/v1/sets/{set_id}/items"), body, &token_b).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    assert!(fetch_items(app, &token_b, set_id).await.is_empty());
}

// ---------------------------------------------------------------------------
// Item notes
// ---------------------------------------------------------------------------

/// PATCH on an item updates its notes without touching positions.
#[sqlx::test(migrations = "../../migrations")]
async fn patch_item_notes(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = signup(app.clone(), "dj").await;
    let set_id = create_set(app.clone(), &token, "Notes Set").await;
    let track = create_track(app.clone(), &token, "Some Track").await;
    let item_id = append_item(app.clone(), &token, set_id, track).await;

    let body = serde_json::json!({ "notes": "mix in over 32 bars" });
    let response = patch_json_auth(
        app,
        &format!("/api/v1/sets/{set_id}/items/{item_id}"),
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["notes"], "mix in over 32 bars");
    assert_eq!(json["position"], 0);
}

/// An empty PATCH body leaves item notes untouched; an explicit
/// `"notes": null` clears them.
#[sqlx::test(migrations = "../../migrations")]
async fn patch_item_empty_body_keeps_notes_null_clears(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = signup(app.clone(), "dj").await;
    let set_id = create_set(app.clone(), &token, "Notes Set").await;
    let track = create_track(app.clone(), &token, "Some Track").await;
    let item_id = append_item(app.clone(), &token, set_id, track).await;
    let uri = format!("/api/v1/sets/{set_id}/items/{item_id}");

    let body = serde_json::json!({ "notes": "double drop here" });
    let response = patch_json_auth(app.clone(), &uri, body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = patch_json_auth(app.clone(), &uri, serde_json::json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["notes"], "double drop here", "absent field is a no-op");

    let response = patch_json_auth(app, &uri, serde_json::json!({ "notes": null }), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["notes"].is_null());
}

// ---------------------------------------------------------------------------
// Remove + compaction
// ---------------------------------------------------------------------------

/// Removing a middle item returns 204 and compacts later positions, keeping
/// the relative order of survivors.
#[sqlx::test(migrations = "../../migrations")]
async fn remove_compacts_positions(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = signup(app.clone(), "dj").await;
    let set_id = create_set(app.clone(), &token, "Shrinking Set").await;

    let t1 = create_track(app.clone(), &token, "First").await;
    let t2 = create_track(app.clone(), &token, "Second").await;
    let t3 = create_track(app.clone(), &token, "Third").await;
    let i1 = append_item(app.clone(), &token, set_id, t1).await;
    let i2 = append_item(app.clone(), &token, set_id, t2).await;
    let i3 = append_item(app.clone(), &token, set_id, t3).await;

    let response = delete_auth(
        app.clone(),
        &format!("/api/v1/sets/{set_id}/items/{i2}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let items = fetch_items(app, &token, set_id).await;
    assert_eq!(items, vec![(i1, 0, t1), (i3, 1, t3)]);
}

/// Deleting an item from another account's set fails with 404.
#[sqlx::test(migrations = "../../migrations")]
async fn remove_from_foreign_set_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token_a, _) = signup(app.clone(), "owner").await;
    let (token_b, _) = signup(app.clone(), "other").await;

    let set_id = create_set(app.clone(), &token_a, "Protected").await;
    let track = create_track(app.clone(), &token_a, "A Track").await;
    let item_id = append_item(app.clone(), &token_a, set_id, track).await;

    let response = delete_auth(
        app,
        &format!("/api/v1/sets/{set_id}/items/{item_id}"),
        &token_b,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Reorder
// ---------------------------------------------------------------------------

/// A valid permutation returns 204 and the new order is visible on the next
/// read, positions renumbered 0..n-1.
#[sqlx::test(migrations = "../../migrations")]
async fn reorder_applies_permutation(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = signup(app.clone(), "dj").await;
    let set_id = create_set(app.clone(), &token, "Reorder Me").await;

    let t1 = create_track(app.clone(), &token, "A").await;
    let t2 = create_track(app.clone(), &token, "B").await;
    let t3 = create_track(app.clone(), &token, "C").await;
    let i1 = append_item(app.clone(), &token, set_id, t1).await;
    let i2 = append_item(app.clone(), &token, set_id, t2).await;
    let i3 = append_item(app.clone(), &token, set_id, t3).await;

    let body = serde_json::json!({ "order": [i3, i1, i2] });
    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/sets/{set_id}/items/reorder"),
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let items = fetch_items(app, &token, set_id).await;
    assert_eq!(items, vec![(i3, 0, t3), (i1, 1, t1), (i2, 2, t2)]);
}

/// A reorder naming an unknown item id returns 422 and leaves the stored
/// order untouched.
#[sqlx::test(migrations = "../../migrations")]
async fn reorder_unknown_id_rejected_without_effect(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = signup(app.clone(), "dj").await;
    let set_id = create_set(app.clone(), &token, "Stable Set").await;

    let t1 = create_track(app.clone(), &token, "A").await;
    let t2 = create_track(app.clone(), &token, "B").await;
    let i1 = append_item(app.clone(), &token, set_id, t1).await;
    let i2 = append_item(app.clone(), &token, set_id, t2).await;

    let body = serde_json::json!({ "order": [i2, 999_999] });
    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/sets/{set_id}/items/reorder"),
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    let items = fetch_items(app, &token, set_id).await;
    assert_eq!(items, vec![(i1, 0, t1), (i2, 1, t2)], "order unchanged");
}

/// An incomplete permutation (missing items) is rejected with 422.
#[sqlx::test(migrations = "../../migrations")]
async fn reorder_incomplete_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = signup(app.clone(), "dj").await;
    let set_id = create_set(app.clone(), &token, "Partial").await;

    let t1 = create_track(app.clone(), &token, "A").await;
    let t2 = create_track(app.clone(), &token, "B").await;
    let i1 = append_item(app.clone(), &token, set_id, t1).await;
    append_item(app.clone(), &token, set_id, t2).await;

    let body = serde_json::json!({ "order": [i1] });
    let response = put_json_auth(
        app,
        &format!("/api/v1/sets/{set_id}/items/reorder"),
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

/// A duplicated item id in the order is rejected with 422.
#[sqlx::test(migrations = "../../migrations")]
async fn reorder_duplicate_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = signup(app.clone(), "dj").await;
    let set_id = create_set(app.clone(), &token, "Duped").await;

    let t1 = create_track(app.clone(), &token, "A").await;
    let t2 = create_track(app.clone(), &token, "B").await;
    let i1 = append_item(app.clone(), &token, set_id, t1).await;
    append_item(app.clone(), &token, set_id, t2).await;

    let body = serde_json::json!({ "order": [i1, i1] });
    let response = put_json_auth(
        app,
        &format!("/api/v1/sets/{set_id}/items/reorder"),
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

/// Reordering an empty set with an empty order is a valid no-op.
#[sqlx::test(migrations = "../../migrations")]
async fn reorder_empty_set_noop(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = signup(app.clone(), "dj").await;
    let set_id = create_set(app.clone(), &token, "Empty").await;

    let body = serde_json::json!({ "order": [] });
    let response = put_json_auth(
        app,
        &format!("/api/v1/sets/{set_id}/items/reorder"),
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

// ---------------------------------------------------------------------------
// Track deletion ripple
// ---------------------------------------------------------------------------

/// Deleting a track removes its items from every set and renumbers the
/// survivors densely.
#[sqlx::test(migrations = "../../migrations")]
async fn deleting_track_compacts_sets(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = signup(app.clone(), "dj").await;
    let set_id = create_set(app.clone(), &token, "Affected Set").await;

    let keep = create_track(app.clone(), &token, "Keeper").await;
    let doomed = create_track(app.clone(), &token, "Doomed").await;
    let i1 = append_item(app.clone(), &token, set_id, keep).await;
    append_item(app.clone(), &token, set_id, doomed).await;
    let i3 = append_item(app.clone(), &token, set_id, keep).await;

    let response = delete_auth(app.clone(), &format!("/api/v1/tracks/{doomed}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let items = fetch_items(app, &token, set_id).await;
    assert_eq!(items, vec![(i1, 0, keep), (i3, 1, keep)]);
}
