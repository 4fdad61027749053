//! Core domain entities.
//!
//! - [`Link`] - A shortened URL mapping with its click counter
//! - [`NewLink`] - Input for creating a link
//! - [`LinkPatch`] - Partial replacement of caption and target URL

pub mod link;

pub use link::{DEFAULT_CAPTION, Link, LinkPatch, NewLink};
