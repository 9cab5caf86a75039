use crate::service::feed::FeedBuilder;
use std::sync::Arc;
use vchsearch_manager::SearchManager;

pub mod api;

#[derive(Clone, Debug)]
pub struct AppState {
    pub search: SearchManager,
    pub feed: Arc<FeedBuilder>,
}

pub fn router(state: AppState) -> axum::Router {
    axum::Router::new()
        .route("/api/search", axum::routing::get(api::search::handler))
        .route("/api/resolve", axum::routing::get(api::resolve::handler))
        .with_state(state)
}
