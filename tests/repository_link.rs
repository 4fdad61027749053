mod common;

use sqlx::PgPool;
use std::collections::HashSet;
use std::sync::Arc;
use short_links::domain::entities::{LinkPatch, NewLink};
use short_links::domain::repositories::LinkRepository;
use short_links::error::AppError;
use short_links::infrastructure::persistence::PgLinkRepository;
use tokio::task::JoinSet;

fn new_link(code: &str, url: &str) -> NewLink {
    NewLink {
        caption: "Untitled".to_string(),
        target_url: url.to_string(),
        code: code.to_string(),
    }
}

#[sqlx::test]
async fn test_create_link(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let link = repo
        .create(new_link("abc123", "https://example.com"))
        .await
        .unwrap();

    assert!(link.id > 0);
    assert_eq!(link.code, "abc123");
    assert_eq!(link.target_url, "https://example.com");
    assert_eq!(link.caption, "Untitled");
    assert_eq!(link.clicks, 0);
}

#[sqlx::test]
async fn test_create_duplicate_code_is_conflict(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool.clone()));

    repo.create(new_link("dup001", "https://a.example.com"))
        .await
        .unwrap();

    let result = repo
        .create(new_link("dup001", "https://b.example.com"))
        .await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
    assert_eq!(common::count_links(&pool).await, 1);
}

#[sqlx::test]
async fn test_find_by_code_and_id(pool: PgPool) {
    let id = common::create_test_link(&pool, "find01", "https://example.com/find").await;
    let repo = PgLinkRepository::new(Arc::new(pool));

    let by_code = repo.find_by_code("find01").await.unwrap().unwrap();
    assert_eq!(by_code.id, id);
    assert_eq!(by_code.target_url, "https://example.com/find");

    let by_id = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(by_id.code, "find01");
}

#[sqlx::test]
async fn test_find_not_found(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert!(repo.find_by_code("nope00").await.unwrap().is_none());
    assert!(repo.find_by_id(999_999).await.unwrap().is_none());
}

#[sqlx::test]
async fn test_increment_clicks(pool: PgPool) {
    let id = common::create_test_link(&pool, "inc001", "https://example.com").await;
    let repo = PgLinkRepository::new(Arc::new(pool.clone()));

    assert_eq!(repo.increment_clicks(id).await.unwrap(), Some(1));
    assert_eq!(repo.increment_clicks(id).await.unwrap(), Some(2));
    assert_eq!(common::get_clicks(&pool, "inc001").await, Some(2));
}

#[sqlx::test]
async fn test_increment_clicks_missing_link(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool.clone()));

    assert_eq!(repo.increment_clicks(424_242).await.unwrap(), None);
    assert_eq!(common::count_links(&pool).await, 0);
}

#[sqlx::test]
async fn test_concurrent_increments_are_not_lost(pool: PgPool) {
    const CLICKS: i64 = 50;

    let id = common::create_test_link(&pool, "race01", "https://example.com").await;
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool.clone())));

    let mut tasks = JoinSet::new();
    for _ in 0..CLICKS {
        let repo = repo.clone();
        tasks.spawn(async move { repo.increment_clicks(id).await.unwrap().unwrap() });
    }

    let mut seen = HashSet::new();
    while let Some(result) = tasks.join_next().await {
        seen.insert(result.unwrap());
    }

    assert_eq!(seen, (1..=CLICKS).collect::<HashSet<_>>());
    assert_eq!(common::get_clicks(&pool, "race01").await, Some(CLICKS));
}

#[sqlx::test]
async fn test_update_link(pool: PgPool) {
    let id = common::create_test_link(&pool, "upd001", "https://old.example.com").await;
    let repo = PgLinkRepository::new(Arc::new(pool));

    let updated = repo
        .update(
            id,
            LinkPatch {
                caption: Some("Renamed".to_string()),
                target_url: None,
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.caption, "Renamed");
    assert_eq!(updated.target_url, "https://old.example.com");
    assert_eq!(updated.code, "upd001");

    let missing = repo
        .update(
            999_999,
            LinkPatch {
                caption: Some("x".to_string()),
                target_url: None,
            },
        )
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[sqlx::test]
async fn test_delete_by_id_and_code(pool: PgPool) {
    let id = common::create_test_link(&pool, "del001", "https://example.com/1").await;
    common::create_test_link(&pool, "del002", "https://example.com/2").await;
    let repo = PgLinkRepository::new(Arc::new(pool.clone()));

    assert!(repo.delete_by_id(id).await.unwrap());
    assert!(!repo.delete_by_id(id).await.unwrap());
    assert!(repo.find_by_code("del001").await.unwrap().is_none());

    assert!(repo.delete_by_code("del002").await.unwrap());
    assert!(!repo.delete_by_code("del002").await.unwrap());

    assert_eq!(common::count_links(&pool).await, 0);
}

#[sqlx::test]
async fn test_list_count_and_totals(pool: PgPool) {
    let first = common::create_test_link(&pool, "lst001", "https://example.com/1").await;
    common::create_test_link(&pool, "lst002", "https://example.com/2").await;
    common::create_test_link(&pool, "lst003", "https://example.com/3").await;
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.increment_clicks(first).await.unwrap();
    repo.increment_clicks(first).await.unwrap();

    let page = repo.list(1, 2).await.unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].code, "lst003");

    let rest = repo.list(2, 2).await.unwrap();
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0].code, "lst001");

    assert_eq!(repo.count().await.unwrap(), 3);
    assert_eq!(repo.total_clicks().await.unwrap(), 2);
}

#[sqlx::test]
async fn test_total_clicks_empty(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert_eq!(repo.total_clicks().await.unwrap(), 0);
    assert!(repo.ping().await.is_ok());
}
