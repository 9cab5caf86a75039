use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Attributes shared by every node of a result tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageInfo {
    /// Id of the provider owning this page.
    pub parser: String,
    pub title: String,
    /// Source uri of the page on the provider side.
    pub uri: String,
    pub user_data: HashMap<String, String>,
}

impl PageInfo {
    pub fn new<P, T, U>(parser: P, title: T, uri: U) -> Self
    where
        P: Into<String>,
        T: Into<String>,
        U: Into<String>,
    {
        Self {
            parser: parser.into(),
            title: title.into(),
            uri: uri.into(),
            user_data: HashMap::new(),
        }
    }

    pub fn with_user_data<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.user_data.insert(key.into(), value.into());
        self
    }
}

/// A listing of pages, either a search result or a provider sub listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OverviewPage {
    pub info: PageInfo,
    pub pages: Vec<Page>,
}

impl OverviewPage {
    pub fn new(info: PageInfo) -> Self {
        Self {
            info,
            pages: Vec::new(),
        }
    }

    pub fn with_page<P: Into<Page>>(mut self, page: P) -> Self {
        self.pages.push(page.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VideoPage {
    pub info: PageInfo,
    pub video_uri: Option<String>,
    pub thumbnail: Option<String>,
    /// Duration in seconds.
    pub duration: u64,
    pub description: Option<String>,
    /// Publish date, kept at millisecond precision by locators.
    pub published: Option<DateTime<Utc>>,
    /// Locator of this page, set once the page went through the codec.
    pub locator: Option<String>,
}

impl VideoPage {
    pub fn new(info: PageInfo, duration: u64) -> Self {
        Self {
            info,
            duration,
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Page {
    Overview(OverviewPage),
    Video(VideoPage),
}

impl From<OverviewPage> for Page {
    fn from(value: OverviewPage) -> Self {
        Self::Overview(value)
    }
}

impl From<VideoPage> for Page {
    fn from(value: VideoPage) -> Self {
        Self::Video(value)
    }
}

impl Page {
    pub fn info(&self) -> &PageInfo {
        match self {
            Self::Overview(inner) => &inner.info,
            Self::Video(inner) => &inner.info,
        }
    }

    pub fn info_mut(&mut self) -> &mut PageInfo {
        match self {
            Self::Overview(inner) => &mut inner.info,
            Self::Video(inner) => &mut inner.info,
        }
    }

    pub fn parser(&self) -> &str {
        self.info().parser.as_str()
    }

    pub fn title(&self) -> &str {
        self.info().title.as_str()
    }

    pub fn uri(&self) -> &str {
        self.info().uri.as_str()
    }

    /// Visits every page of the tree, depth first, parents before children.
    pub fn walk_mut<F: FnMut(&mut Page)>(&mut self, visitor: &mut F) {
        visitor(self);
        if let Self::Overview(inner) = self {
            inner.pages.iter_mut().for_each(|page| page.walk_mut(visitor));
        }
    }

    /// Every video leaf of the tree, depth first.
    pub fn videos(&self) -> Vec<&VideoPage> {
        match self {
            Self::Overview(inner) => inner.pages.iter().flat_map(|page| page.videos()).collect(),
            Self::Video(inner) => vec![inner],
        }
    }
}
