//! Core domain entities.
//!
//! - [`ShortLink`] - A persisted shortcode to URL mapping
//! - [`NewShortLink`] - Input for creating one

pub mod short_link;

pub use short_link::{NewShortLink, ShortLink};
