pub use vchsearch_locator as locator;
pub use vchsearch_prelude as prelude;

use crate::prelude::{OverviewPage, Page, PageInfo, Provider, ProviderBuilder, ProviderError};
use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

mod registry;

pub use registry::ProviderRegistry;

/// Parser id of the top level search result, never used by a provider.
pub const SEARCH_PARSER: &str = "search";
pub const MIN_QUERY_LENGTH: usize = 3;

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error(
        "query {query:?} is too short, enter at least {} characters",
        MIN_QUERY_LENGTH
    )]
    InvalidArgument { query: String },
    #[error("no search provider found for {uri:?}")]
    ProviderNotFound { uri: String },
    #[error("search provider {provider:?} failed: {cause}")]
    Provider {
        provider: String,
        #[source]
        cause: ProviderError,
    },
    #[error(transparent)]
    Locator(#[from] locator::LocatorError),
}

#[derive(Debug, serde::Deserialize)]
#[serde(tag = "type")]
pub enum ProviderConfig {
    #[serde(rename = "http")]
    Http(vchsearch_provider_http::HttpProviderConfig),
}

impl ProviderBuilder for ProviderConfig {
    fn build(self, id: String) -> Arc<dyn Provider> {
        match self {
            Self::Http(inner) => inner.build(id),
        }
    }
}

#[derive(Debug, serde::Deserialize)]
pub struct SearchManagerConfig {
    /// Title of the top level search result.
    #[serde(default = "SearchManagerConfig::default_title")]
    pub title: String,
    /// Time given to the providers to answer a search, in seconds.
    #[serde(default = "SearchManagerConfig::default_deadline")]
    pub deadline: u64,
    /// Number of providers queried at the same time.
    #[serde(default = "SearchManagerConfig::default_concurrency")]
    pub concurrency: usize,
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

impl Default for SearchManagerConfig {
    fn default() -> Self {
        Self {
            title: Self::default_title(),
            deadline: Self::default_deadline(),
            concurrency: Self::default_concurrency(),
            providers: HashMap::new(),
        }
    }
}

impl SearchManagerConfig {
    fn default_title() -> String {
        String::from("Search results")
    }

    fn default_deadline() -> u64 {
        60
    }

    fn default_concurrency() -> usize {
        10
    }

    pub fn build(self) -> SearchManager {
        let manager = SearchManager::new(
            self.title,
            Duration::from_secs(self.deadline),
            self.concurrency,
        );
        for (id, config) in self.providers {
            manager.register(config.build(id));
        }
        manager
    }
}

/// Fans searches out to every registered provider and dispatches pages back
/// to the provider owning them.
#[derive(Clone, Debug)]
pub struct SearchManager(Arc<SearchManagerInner>);

#[derive(Debug)]
struct SearchManagerInner {
    title: String,
    deadline: Duration,
    concurrency: usize,
    providers: ProviderRegistry,
}

impl Default for SearchManager {
    fn default() -> Self {
        SearchManagerConfig::default().build()
    }
}

impl SearchManager {
    pub fn new<T: Into<String>>(title: T, deadline: Duration, concurrency: usize) -> Self {
        Self(Arc::new(SearchManagerInner {
            title: title.into(),
            deadline,
            concurrency: concurrency.clamp(1, Semaphore::MAX_PERMITS),
            providers: ProviderRegistry::default(),
        }))
    }

    pub fn with_provider<P: Provider>(self, provider: P) -> Self {
        self.register(Arc::new(provider));
        self
    }

    pub fn providers(&self) -> &ProviderRegistry {
        &self.0.providers
    }

    pub fn register(&self, provider: Arc<dyn Provider>) -> Option<Arc<dyn Provider>> {
        self.0.providers.register(provider)
    }

    pub fn unregister(&self, id: &str) -> Option<Arc<dyn Provider>> {
        self.0.providers.unregister(id)
    }

    /// Whether the given string is a locator [`SearchManager::resolve`] understands.
    pub fn accepts(&self, locator: &str) -> bool {
        locator::accepts(locator)
    }
}

/// Gives the provider's pages to it when the provider left them unowned.
fn adopt(provider: &dyn Provider, page: &mut Page) {
    page.walk_mut(&mut |item| {
        if item.parser().is_empty() {
            item.info_mut().parser = provider.id().to_owned();
        }
    });
}

fn stamp_locators(page: &mut Page) {
    page.walk_mut(&mut |item| {
        if !matches!(item, Page::Video(_)) {
            return;
        }
        match locator::encode(item) {
            Ok(value) => {
                if let Page::Video(video) = item {
                    video.locator = Some(value);
                }
            }
            Err(error) => tracing::warn!("unable to create locator for {:?}: {error}", item.uri()),
        }
    });
}

impl SearchManager {
    /// Searches every registered provider and merges the listings that have at
    /// least one hit.
    ///
    /// Providers failing or not answering before the deadline are left out of
    /// the result, they never fail the search.
    pub async fn search(&self, query: &str) -> Result<OverviewPage, SearchError> {
        if query.chars().count() < MIN_QUERY_LENGTH {
            return Err(SearchError::InvalidArgument {
                query: query.to_owned(),
            });
        }

        tracing::debug!("searching for {query:?}");
        let mut result = OverviewPage::new(PageInfo::new(
            SEARCH_PARSER,
            self.0.title.as_str(),
            String::new(),
        ));

        let semaphore = Arc::new(Semaphore::new(self.0.concurrency));
        let mut tasks = JoinSet::new();
        for provider in self.0.providers.snapshot() {
            let semaphore = semaphore.clone();
            let query = query.to_owned();
            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await;
                let found = provider.search(&query).await;
                (provider, found)
            });
        }

        let collect = async {
            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok((provider, Ok(listing))) => {
                        if let Some(page) = provider_listing(provider.as_ref(), listing) {
                            result.pages.push(page);
                        }
                    }
                    Ok((provider, Err(error))) => tracing::warn!(
                        "error occurred while searching with {:?}, no results will be available from this provider: {error}",
                        provider.id()
                    ),
                    Err(error) => tracing::warn!("search task failed: {error}"),
                }
            }
        };
        let completed = tokio::time::timeout(self.0.deadline, collect).await.is_ok();
        if !completed {
            tracing::warn!(
                "search for {query:?} reached the deadline of {:?}, abandoning {} providers",
                self.0.deadline,
                tasks.len()
            );
        }
        // late answers are dropped with their task
        tasks.abort_all();

        Ok(result)
    }

    /// Hands a page back to the provider owning it and stamps a locator on
    /// every video of the parsed result.
    pub async fn parse(&self, page: Page) -> Result<Page, SearchError> {
        let Some(provider) = self.0.providers.find(page.parser()) else {
            return Err(SearchError::ProviderNotFound {
                uri: page.uri().to_owned(),
            });
        };

        tracing::debug!("parsing {:?} with {:?}", page.uri(), provider.id());
        let mut parsed = provider
            .parse(page)
            .await
            .map_err(|cause| SearchError::Provider {
                provider: provider.id().to_owned(),
                cause,
            })?;
        adopt(provider.as_ref(), &mut parsed);
        stamp_locators(&mut parsed);
        Ok(parsed)
    }

    /// Decodes a locator and lets the owning provider complete the page.
    pub async fn resolve(&self, locator: &str) -> Result<Page, SearchError> {
        tracing::debug!("resolving locator {locator:?}");
        let page = locator::decode(locator)?;
        self.parse(page).await
    }
}

fn provider_listing(provider: &dyn Provider, mut listing: OverviewPage) -> Option<Page> {
    listing.info.title = provider.name().to_owned();
    if listing.is_empty() {
        tracing::debug!("no results from {:?}", provider.id());
        return None;
    }
    let mut page = Page::Overview(listing);
    adopt(provider, &mut page);
    stamp_locators(&mut page);
    Some(page)
}
