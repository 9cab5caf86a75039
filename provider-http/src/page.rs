use vchsearch_prelude::{
    OverviewPage, Page, PageInfo, ProviderError, ProviderErrorReason,
};

use crate::entry::Entry;

/// Page as described by the catalogue, either a single video or a listing.
#[derive(Debug, serde::Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub(crate) enum Document {
    Video(Entry),
    Overview {
        title: String,
        url: String,
        #[serde(default)]
        pages: Vec<Entry>,
    },
}

impl Document {
    fn into_page(self, provider: &str) -> Page {
        match self {
            Self::Video(entry) => Page::Video(entry.into_page(provider)),
            Self::Overview { title, url, pages } => Page::Overview(pages.into_iter().fold(
                OverviewPage::new(PageInfo::new(provider, title, url)),
                |page, entry| page.with_page(entry.into_page(provider)),
            )),
        }
    }
}

pub async fn execute(provider: &str, base_url: &str, stub: Page) -> Result<Page, ProviderError> {
    if stub.uri().is_empty() {
        return Err(ProviderError::new(
            provider,
            ProviderErrorReason::UnsupportedPage {
                uri: stub.uri().to_owned(),
            },
        ));
    }

    let url = format!("{base_url}/page");
    let document: Document = crate::common::fetch(provider, &url, &[("url", stub.uri())]).await?;
    let mut page = document.into_page(provider);

    // what the catalogue answers wins over what the stub carried
    let user_data = &mut page.info_mut().user_data;
    for (key, value) in stub.info().user_data.iter() {
        user_data
            .entry(key.clone())
            .or_insert_with(|| value.clone());
    }
    Ok(page)
}
