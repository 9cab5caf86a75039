use axum::extract::{Query, State};
use axum::response::Response;

use super::ApiError;
use crate::handler::AppState;

#[derive(Debug, serde::Deserialize)]
pub struct QueryParams {
    locator: String,
}

pub async fn handler(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Response, ApiError> {
    tracing::debug!("GET /api/resolve locator={:?}", params.locator);
    let page = state.search.resolve(&params.locator).await?;
    let provider = state.search.providers().find(page.parser());
    let category = provider
        .as_ref()
        .map(|provider| provider.name())
        .unwrap_or_else(|| page.parser());
    let items = super::feed_items(&page, category);
    let body = state.feed.feed(page.title(), &items)?;
    Ok(super::rss(body))
}
