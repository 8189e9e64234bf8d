//! Pure helpers used by the services.
//!
//! - [`url_normalizer`] - URL validation and canonicalization
//! - [`shortcode`] - Deterministic base-62 shortcode generation
//! - [`duration`] - Parsing of link lifetimes such as `1h30m`

pub mod duration;
pub mod shortcode;
pub mod url_normalizer;
