//! Link repository implementations.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - PostgreSQL storage using SQLx
//! - [`MemoryLinkRepository`] - In-process storage for development and tests
//! - [`TimeoutLinkRepository`] - Decorator bounding calls to another repository

pub mod memory_link_repository;
pub mod pg_link_repository;
pub mod timeout;

pub use memory_link_repository::MemoryLinkRepository;
pub use pg_link_repository::PgLinkRepository;
pub use timeout::TimeoutLinkRepository;
