//! Link creation, management and redirect resolution.

use std::sync::Arc;

use serde_json::json;

use crate::application::services::{ClickCounter, CodeAllocator};
use crate::domain::entities::{DEFAULT_CAPTION, Link, LinkPatch, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::is_valid_code;
use crate::utils::url_normalizer::normalize_url;

/// Service for creating, managing and resolving shortened links.
///
/// Combines the [`CodeAllocator`] and [`ClickCounter`] on top of a
/// [`LinkRepository`]. Holds no state besides the shared repository handle.
pub struct LinkService<L: LinkRepository> {
    link_repository: Arc<L>,
    code_allocator: CodeAllocator<L>,
    click_counter: ClickCounter<L>,
}

impl<L: LinkRepository> LinkService<L> {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>) -> Self {
        Self {
            code_allocator: CodeAllocator::new(link_repository.clone()),
            click_counter: ClickCounter::new(link_repository.clone()),
            link_repository,
        }
    }

    /// Click counter backed by the same repository.
    pub fn click_counter(&self) -> &ClickCounter<L> {
        &self.click_counter
    }

    /// Creates a short link with a freshly allocated code.
    ///
    /// # Arguments
    ///
    /// - `target_url` - The URL to shorten; `https://` is assumed when no scheme is given
    /// - `caption` - Optional label; blank or missing captions become [`DEFAULT_CAPTION`]
    ///
    /// # Code Allocation
    ///
    /// Codes are drawn by [`CodeAllocator::allocate_within`]. If the insert
    /// still hits the unique constraint (a concurrent request took the same
    /// code), a new code is drawn and the insert retried. Lookup collisions and
    /// insert conflicts share one budget of [`CodeAllocator::max_attempts`]
    /// candidates per request.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is invalid.
    /// Returns [`AppError::AllocationExhausted`] if no unique code could be found.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create_link(
        &self,
        target_url: String,
        caption: Option<String>,
    ) -> Result<Link, AppError> {
        let target_url = Self::validate_target_url(&target_url)?;
        let caption = Self::caption_or_default(caption);

        let max_attempts = self.code_allocator.max_attempts();
        let mut used = 0;

        while used < max_attempts {
            let Some((code, drawn)) = self
                .code_allocator
                .allocate_within(max_attempts - used)
                .await?
            else {
                break;
            };
            used += drawn;

            let new_link = NewLink {
                caption: caption.clone(),
                target_url: target_url.clone(),
                code,
            };

            match self.link_repository.create(new_link).await {
                Ok(link) => {
                    tracing::info!(link_id = link.id, code = %link.code, "Link created");
                    return Ok(link);
                }
                Err(AppError::Conflict { .. }) => {
                    tracing::warn!(attempt = used, "Short code taken concurrently, reallocating");
                }
                Err(e) => return Err(e),
            }
        }

        Err(self.code_allocator.exhausted())
    }

    /// Lists links newest first together with the total number of links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_links(&self, page: i64, page_size: i64) -> Result<(Vec<Link>, i64), AppError> {
        let links = self.link_repository.list(page, page_size).await?;
        let total = self.link_repository.count().await?;
        Ok((links, total))
    }

    /// Retrieves a link by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    pub async fn get_link(&self, id: i64) -> Result<Link, AppError> {
        self.link_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "id": id })))
    }

    /// Retrieves a link by short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn get_link_by_code(&self, code: &str) -> Result<Link, AppError> {
        self.link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))
    }

    /// Replaces caption and/or target URL of a link.
    ///
    /// The code and click counter are never touched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the patch is empty or the URL is invalid.
    /// Returns [`AppError::NotFound`] if no link has this id.
    pub async fn update_link(&self, id: i64, patch: LinkPatch) -> Result<Link, AppError> {
        if patch.is_empty() {
            return Err(AppError::bad_request(
                "Nothing to update",
                json!({ "fields": ["caption", "url"] }),
            ));
        }

        let patch = LinkPatch {
            caption: patch.caption.map(|c| Self::caption_or_default(Some(c))),
            target_url: patch
                .target_url
                .map(|u| Self::validate_target_url(&u))
                .transpose()?,
        };

        self.link_repository
            .update(id, patch)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "id": id })))
    }

    /// Hard-deletes a link by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    pub async fn delete_link(&self, id: i64) -> Result<(), AppError> {
        if !self.link_repository.delete_by_id(id).await? {
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "id": id }),
            ));
        }

        tracing::info!(link_id = id, "Link deleted");
        Ok(())
    }

    /// Hard-deletes a link by short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `code` is not a well-formed short code.
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn delete_link_by_code(&self, code: &str) -> Result<(), AppError> {
        if !is_valid_code(code) {
            return Err(AppError::bad_request(
                "Invalid short code",
                json!({ "code": code }),
            ));
        }

        if !self.link_repository.delete_by_code(code).await? {
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "code": code }),
            ));
        }

        tracing::info!(code, "Link deleted");
        Ok(())
    }

    /// Resolves a short code to its target URL and counts the click.
    ///
    /// The click is recorded best-effort: a counter failure is logged and the
    /// redirect target is returned anyway.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code (no side effects).
    /// Returns [`AppError::Internal`] if the lookup itself fails.
    pub async fn resolve_redirect(&self, code: &str) -> Result<String, AppError> {
        let link = self.get_link_by_code(code).await?;

        self.click_counter.record(link.id).await;

        Ok(link.target_url)
    }

    /// Totals for the admin CLI: `(links, clicks)`.
    pub async fn totals(&self) -> Result<(i64, i64), AppError> {
        let links = self.link_repository.count().await?;
        let clicks = self.link_repository.total_clicks().await?;
        Ok((links, clicks))
    }

    /// Checks that storage is reachable.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.link_repository.ping().await
    }

    /// Constructs the public short URL from a base URL and a code.
    pub fn get_short_url(&self, base_url: &str, code: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), code)
    }

    /// Trimmed caption, or [`DEFAULT_CAPTION`] when missing or blank.
    fn caption_or_default(caption: Option<String>) -> String {
        caption
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CAPTION.to_string())
    }

    fn validate_target_url(input: &str) -> Result<String, AppError> {
        normalize_url(input).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })
    }
}
