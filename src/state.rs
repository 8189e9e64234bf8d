//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{LinkService, ListingService, RedirectService};
use crate::domain::repositories::LinkRepository;

/// Handles shared by all requests.
///
/// The store handle is the only shared resource; everything else is stateless.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
    pub redirect_service: Arc<RedirectService<dyn LinkRepository>>,
    pub listing_service: Arc<ListingService<dyn LinkRepository>>,
    pub link_repository: Arc<dyn LinkRepository>,
    pub base_url: String,
}

impl AppState {
    /// Builds every service on top of one repository handle.
    pub fn new(link_repository: Arc<dyn LinkRepository>, base_url: String, top_limit: i64) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(link_repository.clone())),
            redirect_service: Arc::new(RedirectService::new(link_repository.clone())),
            listing_service: Arc::new(ListingService::with_top_limit(
                link_repository.clone(),
                top_limit,
            )),
            link_repository,
            base_url,
        }
    }
}
