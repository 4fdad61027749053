//! Shared application state injected into every handler.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::LinkService;
use crate::infrastructure::persistence::PgLinkRepository;

/// Handler state. Cheap to clone; every field is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<PgLinkRepository>>,
    /// Public prefix used to build `short_url` values.
    pub base_url: Arc<str>,
}

impl AppState {
    /// Wires repositories and services on top of an open pool.
    pub fn new(pool: Arc<PgPool>, base_url: impl Into<Arc<str>>) -> Self {
        let link_repository = Arc::new(PgLinkRepository::new(pool));

        Self {
            link_service: Arc::new(LinkService::new(link_repository)),
            base_url: base_url.into(),
        }
    }

    /// Builds the public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        self.link_service.get_short_url(&self.base_url, code)
    }
}
