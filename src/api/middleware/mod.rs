//! HTTP middleware for request processing.
//!
//! Provides CORS policy and request tracing.

pub mod cors;
pub mod tracing;
