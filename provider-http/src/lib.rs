//! Provider backed by a JSON video catalogue reachable over HTTP.
//!
//! The catalogue answers `GET /search?q=<query>` with a list of videos and
//! `GET /page?url=<uri>` with the details of a single page.

use std::sync::Arc;
use vchsearch_prelude::{OverviewPage, Page, Provider, ProviderBuilder, ProviderError};

mod common;
mod entry;
mod page;
mod search;

pub const NAME: &str = "http";

#[derive(Debug, serde::Deserialize)]
pub struct HttpProviderConfig {
    /// Name displayed as title of the provider's results.
    pub name: String,
    pub base_url: String,
}

impl ProviderBuilder for HttpProviderConfig {
    fn build(self, id: String) -> Arc<dyn Provider> {
        tracing::info!("building {NAME} provider named {id:?}");
        Arc::new(HttpProvider::new(id, self.name, self.base_url))
    }
}

#[derive(Debug)]
pub struct HttpProvider {
    id: String,
    name: String,
    base_url: String,
}

impl HttpProvider {
    pub fn new<I, N, U>(id: I, name: N, base_url: U) -> Self
    where
        I: Into<String>,
        N: Into<String>,
        U: Into<String>,
    {
        let base_url: String = base_url.into();
        Self {
            id: id.into(),
            name: name.into(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }
}

#[async_trait::async_trait]
impl Provider for HttpProvider {
    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn name(&self) -> &str {
        self.name.as_str()
    }

    async fn search(&self, query: &str) -> Result<OverviewPage, ProviderError> {
        tracing::debug!("{} searching {query:?}", self.id);
        search::execute(&self.id, &self.base_url, query).await
    }

    async fn parse(&self, page: Page) -> Result<Page, ProviderError> {
        tracing::debug!("{} parsing {:?}", self.id, page.uri());
        page::execute(&self.id, &self.base_url, page).await
    }
}

#[cfg(test)]
mod tests {
    use super::HttpProvider;
    use vchsearch_prelude::{Page, Provider};

    #[tokio::test]
    async fn basic_search() {
        let mut server = mockito::Server::new_async().await;
        let provider = HttpProvider::new("catalogue", "The Catalogue", format!("{}/", server.url()));

        let search_page = server
            .mock("GET", "/search?q=cats")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(include_str!("./search.json"))
            .create_async()
            .await;

        let result = provider.search("cats").await.unwrap();
        assert_eq!(result.pages.len(), 3);
        assert!(result
            .pages
            .iter()
            .all(|page| matches!(page, Page::Video(_)) && page.parser() == "catalogue"));
        assert_eq!(result.pages[2].title(), "Cats and dogs, together");

        search_page.assert_async().await;
    }
}
