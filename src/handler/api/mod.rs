use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use vchsearch_manager::prelude::Page;
use vchsearch_manager::SearchError;

use crate::service::feed::FeedItem;

pub mod resolve;
pub mod search;

#[derive(Debug)]
pub enum ApiError {
    Search(SearchError),
    Feed(quick_xml::Error),
}

impl From<SearchError> for ApiError {
    fn from(value: SearchError) -> Self {
        Self::Search(value)
    }
}

impl From<quick_xml::Error> for ApiError {
    fn from(value: quick_xml::Error) -> Self {
        Self::Feed(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Search(inner) => {
                let status = match inner {
                    SearchError::InvalidArgument { .. } | SearchError::Locator(_) => {
                        StatusCode::BAD_REQUEST
                    }
                    SearchError::ProviderNotFound { .. } => StatusCode::NOT_FOUND,
                    SearchError::Provider { .. } => StatusCode::BAD_GATEWAY,
                };
                (status, inner.to_string())
            }
            Self::Feed(inner) => {
                tracing::error!("unable to build feed: {inner:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, inner.to_string())
            }
        };
        if status.is_server_error() {
            tracing::warn!("request failed with {status}: {message}");
        } else {
            tracing::debug!("request rejected with {status}: {message}");
        }
        (status, message).into_response()
    }
}

/// Videos of a page, each tagged with the listing it was found in.
pub(crate) fn feed_items<'a>(page: &'a Page, category: &'a str) -> Vec<FeedItem<'a>> {
    page.videos()
        .into_iter()
        .map(|video| FeedItem { category, video })
        .collect()
}

pub(crate) fn rss(body: String) -> Response {
    (
        [(header::CONTENT_TYPE, "application/rss+xml; charset=utf-8")],
        body,
    )
        .into_response()
}
