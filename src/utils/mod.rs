//! Utility functions for code generation, URL processing, and error classification.
//!
//! - [`code_generator`] - Short code generation and format checks
//! - [`url_normalizer`] - Target URL normalization and validation
//! - [`db_error`] - Database error classification

pub mod code_generator;
pub mod db_error;
pub mod url_normalizer;
