use axum::extract::{Query, State};
use axum::response::Response;
use vchsearch_manager::prelude::Page;

use super::ApiError;
use crate::handler::AppState;

#[derive(Debug, serde::Deserialize)]
pub struct QueryParams {
    q: String,
}

pub async fn handler(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Response, ApiError> {
    tracing::debug!("GET /api/search q={:?}", params.q);
    let result = state.search.search(&params.q).await?;
    let items = result
        .pages
        .iter()
        .flat_map(|listing| super::feed_items(listing, listing.title()))
        .collect::<Vec<_>>();
    let title = format!("{} - {}", result.info.title, params.q);
    let body = state.feed.feed(&title, &items)?;
    Ok(super::rss(body))
}
