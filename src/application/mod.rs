//! Application layer services implementing business logic.
//!
//! Services consume the [`crate::domain::repositories::LinkRepository`] trait and
//! provide a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Normalization, hashing and creation
//! - [`services::redirect_service::RedirectService`] - Resolution with expiry check and click counting
//! - [`services::listing_service::ListingService`] - Full and top-clicked listings

pub mod services;
