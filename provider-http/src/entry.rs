use chrono::{TimeZone, Utc};
use std::collections::HashMap;
use vchsearch_prelude::{PageInfo, VideoPage};

/// Video as described by the catalogue.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct Entry {
    title: String,
    url: String,
    #[serde(default)]
    video_url: Option<String>,
    #[serde(default)]
    thumbnail: Option<String>,
    #[serde(default)]
    duration: u64,
    #[serde(default)]
    description: Option<String>,
    /// Epoch seconds.
    #[serde(default)]
    published: Option<i64>,
    #[serde(default)]
    extra: HashMap<String, String>,
}

impl Entry {
    pub(crate) fn into_page(self, provider: &str) -> VideoPage {
        let published = self.published.and_then(|value| {
            let date = Utc.timestamp_opt(value, 0).single();
            if date.is_none() {
                tracing::debug!("{provider} ignoring invalid publish date {value} of {:?}", self.url);
            }
            date
        });
        let mut info = PageInfo::new(provider, self.title.trim(), self.url);
        info.user_data = self.extra;
        VideoPage {
            info,
            video_uri: self.video_url,
            thumbnail: self.thumbnail,
            duration: self.duration,
            description: self.description,
            published,
            locator: None,
        }
    }
}
