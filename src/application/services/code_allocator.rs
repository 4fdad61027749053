//! Unique short code allocation.

use std::sync::Arc;

use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::generate_code;

/// Maximum number of candidates drawn before allocation gives up.
pub const MAX_ALLOCATION_ATTEMPTS: usize = 50;

/// Draws random short codes until one is not present in the store.
///
/// The existence check only avoids predictable insert failures. Two
/// concurrent allocations can still pick the same code; the unique
/// constraint on `links.code` rejects the second insert and
/// [`crate::application::services::LinkService`] re-allocates.
pub struct CodeAllocator<L: LinkRepository> {
    link_repository: Arc<L>,
    max_attempts: usize,
}

impl<L: LinkRepository> CodeAllocator<L> {
    /// Creates an allocator with the default budget of [`MAX_ALLOCATION_ATTEMPTS`].
    pub fn new(link_repository: Arc<L>) -> Self {
        Self::with_max_attempts(link_repository, MAX_ALLOCATION_ATTEMPTS)
    }

    /// Creates an allocator with a custom attempt budget.
    pub fn with_max_attempts(link_repository: Arc<L>, max_attempts: usize) -> Self {
        Self {
            link_repository,
            max_attempts,
        }
    }

    /// Number of candidates tried per allocation.
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Returns a code that is not currently stored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AllocationExhausted`] if every candidate within the
    /// budget already exists.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn allocate(&self) -> Result<String, AppError> {
        match self.allocate_within(self.max_attempts).await? {
            Some((code, _)) => Ok(code),
            None => Err(self.exhausted()),
        }
    }

    /// Draws at most `budget` candidates.
    ///
    /// Returns the free code together with the number of candidates drawn,
    /// or `None` once the budget is spent. Callers retrying conflicting
    /// inserts pass their remaining budget.
    pub async fn allocate_within(
        &self,
        budget: usize,
    ) -> Result<Option<(String, usize)>, AppError> {
        for drawn in 1..=budget {
            let code = generate_code();

            if self.link_repository.find_by_code(&code).await?.is_none() {
                return Ok(Some((code, drawn)));
            }

            tracing::debug!(attempt = drawn, code = %code, "Short code collision, resampling");
        }

        Ok(None)
    }

    /// Logs and builds the error for a spent budget.
    pub(crate) fn exhausted(&self) -> AppError {
        tracing::error!(
            attempts = self.max_attempts,
            "Could not allocate a unique short code"
        );

        AppError::AllocationExhausted {
            attempts: self.max_attempts,
        }
    }
}
