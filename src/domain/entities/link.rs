//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// Caption stored when the caller does not provide one.
pub const DEFAULT_CAPTION: &str = "Untitled";

/// A shortened URL with its click counter.
///
/// `code` and `created_at` never change after insertion; `clicks` only grows.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: i64,
    pub caption: String,
    pub target_url: String,
    pub code: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        caption: String,
        target_url: String,
        code: String,
        clicks: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            caption,
            target_url,
            code,
            clicks,
            created_at,
        }
    }
}

/// Input data for inserting a new link. `clicks` always starts at zero.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub caption: String,
    pub target_url: String,
    pub code: String,
}

/// Replacement of the mutable fields of a link.
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct LinkPatch {
    pub caption: Option<String>,
    pub target_url: Option<String>,
}

impl LinkPatch {
    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.caption.is_none() && self.target_url.is_none()
    }
}
