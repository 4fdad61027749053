mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};
use sqlx::PgPool;
use short_links::routes::router;

#[sqlx::test]
async fn test_create_redirect_delete(pool: PgPool) {
    let state = common::create_test_state(pool.clone());
    let server = TestServer::new(router(state, "*")).unwrap();

    let created = server
        .post("/api/links")
        .json(&json!({ "url": "https://www.rust-lang.org/learn", "caption": "Learn" }))
        .await;
    created.assert_status(StatusCode::CREATED);

    let created = created.json::<Value>();
    let id = created["id"].as_i64().unwrap();
    let code = created["code"].as_str().unwrap().to_string();

    let redirect = server.get(&format!("/{code}")).await;
    assert_eq!(redirect.status_code(), StatusCode::FOUND);
    assert_eq!(redirect.header("location"), "https://www.rust-lang.org/learn");

    let fetched = server.get(&format!("/api/links/{id}")).await;
    fetched.assert_status_ok();
    assert_eq!(fetched.json::<Value>()["clicks"], 1);

    server
        .delete(&format!("/api/links/{id}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .get(&format!("/api/links/{id}"))
        .await
        .assert_status_not_found();
    server.get(&format!("/{code}")).await.assert_status_not_found();
    server
        .delete(&format!("/api/links/code/{code}"))
        .await
        .assert_status_not_found();

    assert_eq!(common::count_links(&pool).await, 0);
}

#[sqlx::test]
async fn test_health_route_is_not_a_short_code(pool: PgPool) {
    let state = common::create_test_state(pool);
    let server = TestServer::new(router(state, "*")).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "healthy");
}
