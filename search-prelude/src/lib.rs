pub use chrono;

mod page;

pub use page::{OverviewPage, Page, PageInfo, VideoPage};

use std::sync::Arc;
use url::ParseError;

pub trait ProviderBuilder: std::fmt::Debug {
    fn build(self, id: String) -> Arc<dyn Provider>;
}

/// Capability contract of a search backend.
///
/// `search` returns the provider's listing for a query and `parse` turns a
/// stub page, usually rebuilt from a locator, into a fully detailed one.
#[async_trait::async_trait]
pub trait Provider: std::fmt::Debug + Send + Sync + 'static {
    /// Stable identifier, used to dispatch pages back to this provider.
    fn id(&self) -> &str;
    /// Human readable name, used as title of the provider's listing.
    fn name(&self) -> &str;
    async fn search(&self, query: &str) -> Result<OverviewPage, ProviderError>;
    async fn parse(&self, page: Page) -> Result<Page, ProviderError>;
}

#[derive(Clone, Debug)]
pub struct ProviderError {
    pub origin: String,
    pub reason: ProviderErrorReason,
}

#[derive(Clone, Debug)]
pub enum ProviderErrorReason {
    UnableToBuildUrl { cause: ParseError },
    UnableToQuery { url: String, cause: String },
    UnableToRead { url: String, cause: String },
    UnsupportedPage { uri: String },
}

impl ProviderError {
    pub fn new<O: Into<String>>(origin: O, reason: ProviderErrorReason) -> Self {
        Self {
            origin: origin.into(),
            reason,
        }
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ProviderError {{ origin={:?}, reason={:?} }}",
            self.origin, self.reason
        )
    }
}

impl std::error::Error for ProviderError {}
