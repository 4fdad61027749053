//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::code_allocator::CodeAllocator`] - Unique short code allocation
//! - [`services::click_counter::ClickCounter`] - Atomic click counting
//! - [`services::link_service::LinkService`] - Link creation, management and redirects

pub mod services;
