#![allow(dead_code)]

use sqlx::PgPool;
use std::sync::Arc;
use short_links::state::AppState;

pub const TEST_BASE_URL: &str = "http://localhost:3000";

pub fn create_test_state(pool: PgPool) -> AppState {
    AppState::new(Arc::new(pool), TEST_BASE_URL)
}

pub async fn create_test_link(pool: &PgPool, code: &str, url: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO links (caption, target_url, code) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind("Untitled")
    .bind(url)
    .bind(code)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn get_clicks(pool: &PgPool, code: &str) -> Option<i64> {
    sqlx::query_scalar::<_, i64>("SELECT clicks FROM links WHERE code = $1")
        .bind(code)
        .fetch_optional(pool)
        .await
        .unwrap()
}

pub async fn count_links(pool: &PgPool) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM links")
        .fetch_one(pool)
        .await
        .unwrap()
}
