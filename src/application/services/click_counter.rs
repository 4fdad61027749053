//! Click counting for short links.

use std::sync::Arc;

use serde_json::json;

use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Increments per-link click counters through the store's atomic update.
pub struct ClickCounter<L: LinkRepository> {
    link_repository: Arc<L>,
}

impl<L: LinkRepository> ClickCounter<L> {
    /// Creates a new click counter.
    pub fn new(link_repository: Arc<L>) -> Self {
        Self { link_repository }
    }

    /// Adds one click to the link and returns the new count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist (including a
    /// concurrent delete). Nothing is mutated in that case.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn increment(&self, id: i64) -> Result<i64, AppError> {
        self.link_repository
            .increment_clicks(id)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "id": id })))
    }

    /// Best-effort variant of [`Self::increment`] used on the redirect path.
    ///
    /// A lost click is acceptable; a failed redirect is not. Failures are
    /// logged and swallowed.
    pub async fn record(&self, id: i64) -> Option<i64> {
        match self.increment(id).await {
            Ok(clicks) => {
                tracing::debug!(link_id = id, clicks, "Click recorded");
                Some(clicks)
            }
            Err(e) => {
                tracing::warn!(link_id = id, error = %e, "Failed to record click");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;

    #[tokio::test]
    async fn test_increment_returns_new_count() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_increment_clicks()
            .withf(|id| *id == 7)
            .times(1)
            .returning(|_| Ok(Some(3)));

        let counter = ClickCounter::new(Arc::new(mock_repo));

        assert_eq!(counter.increment(7).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_increment_missing_link_is_not_found() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_increment_clicks()
            .times(1)
            .returning(|_| Ok(None));

        let counter = ClickCounter::new(Arc::new(mock_repo));

        assert!(matches!(
            counter.increment(42).await.unwrap_err(),
            AppError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_record_swallows_storage_fault() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_increment_clicks()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let counter = ClickCounter::new(Arc::new(mock_repo));

        assert_eq!(counter.record(1).await, None);
    }

    #[tokio::test]
    async fn test_record_swallows_not_found() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_increment_clicks()
            .times(1)
            .returning(|_| Ok(None));

        let counter = ClickCounter::new(Arc::new(mock_repo));

        assert_eq!(counter.record(1).await, None);
    }

    #[tokio::test]
    async fn test_record_returns_count_on_success() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_increment_clicks()
            .times(1)
            .returning(|_| Ok(Some(1)));

        let counter = ClickCounter::new(Arc::new(mock_repo));

        assert_eq!(counter.record(1).await, Some(1));
    }
}
