use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};
use vchsearch_prelude::Provider;

/// Live set of providers, keyed by id.
///
/// Searches work on a [`ProviderRegistry::snapshot`], so registering or
/// removing a provider never affects a search already in flight.
#[derive(Debug, Default)]
pub struct ProviderRegistry(RwLock<BTreeMap<String, Arc<dyn Provider>>>);

impl ProviderRegistry {
    /// Adds a provider, replacing and returning any provider with the same id.
    ///
    /// A provider using the id of the top level search result is refused.
    pub fn register(&self, provider: Arc<dyn Provider>) -> Option<Arc<dyn Provider>> {
        let id = provider.id().to_owned();
        if id == crate::SEARCH_PARSER {
            tracing::warn!("refusing search provider {id:?}, this id is reserved");
            return None;
        }
        tracing::info!("adding search provider {id:?}");
        let mut providers = self.0.write().unwrap_or_else(PoisonError::into_inner);
        let previous = providers.insert(id, provider);
        tracing::info!("{} search providers available", providers.len());
        previous
    }

    pub fn unregister(&self, id: &str) -> Option<Arc<dyn Provider>> {
        tracing::info!("removing search provider {id:?}");
        let mut providers = self.0.write().unwrap_or_else(PoisonError::into_inner);
        let removed = providers.remove(id);
        tracing::info!("{} search providers available", providers.len());
        removed
    }

    pub fn snapshot(&self) -> Vec<Arc<dyn Provider>> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }

    pub fn find(&self, id: &str) -> Option<Arc<dyn Provider>> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.0.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
