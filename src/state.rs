//! Shared application state injected into HTTP handlers.

use std::sync::Arc;

use crate::api::reserved::NonReservedCodeGenerator;
use crate::application::services::LinkService;
use crate::domain::repositories::LinkRepository;
use crate::utils::code_generator::RandomCodeGenerator;

/// Link service over whichever store the server was configured with.
pub type DynLinkService = LinkService<dyn LinkRepository>;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<DynLinkService>,
    /// Public prefix used to build `short_url` in responses.
    pub base_url: String,
}

impl AppState {
    /// Builds state around an already constructed store.
    ///
    /// Generated codes never collide with reserved route names.
    pub fn new(link_repository: Arc<dyn LinkRepository>, base_url: impl Into<String>) -> Self {
        Self {
            link_service: Arc::new(LinkService::with_generator(
                link_repository,
                Arc::new(NonReservedCodeGenerator::<RandomCodeGenerator>::default()),
            )),
            base_url: base_url.into(),
        }
    }
}
