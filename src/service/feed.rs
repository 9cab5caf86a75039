use quick_xml::events::BytesText;
use quick_xml::writer::Writer;
use quick_xml::Result;
use std::borrow::Cow;
use vchsearch_prelude::VideoPage;

const DOM: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>";

#[derive(Debug, serde::Deserialize)]
pub struct FeedConfig {
    #[serde(default = "FeedConfig::default_name")]
    pub name: Cow<'static, str>,
    #[serde(default = "FeedConfig::default_description")]
    pub description: Cow<'static, str>,
    #[serde(default = "FeedConfig::default_base_url")]
    pub base_url: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            name: Self::default_name(),
            description: Self::default_description(),
            base_url: Self::default_base_url(),
        }
    }
}

impl FeedConfig {
    fn default_name() -> Cow<'static, str> {
        Cow::Borrowed(env!("CARGO_PKG_NAME"))
    }

    fn default_description() -> Cow<'static, str> {
        Cow::Borrowed("Vchsearch aggregates the results of many video search providers.")
    }

    fn default_base_url() -> String {
        if let Ok(base_url) = std::env::var("BASE_URL") {
            base_url
        } else {
            let host = std::env::var("HOST").unwrap_or_else(|_| String::from("127.0.0.1"));
            let port = std::env::var("PORT").unwrap_or_else(|_| String::from("3000"));
            format!("http://{host}:{port}")
        }
    }

    pub fn build(self) -> FeedBuilder {
        FeedBuilder {
            name: self.name,
            description: self.description,
            base_url: self.base_url,
        }
    }
}

/// A video of the feed along with the name of the provider it comes from.
#[derive(Debug)]
pub struct FeedItem<'a> {
    pub category: &'a str,
    pub video: &'a VideoPage,
}

#[derive(Debug)]
pub struct FeedBuilder {
    name: Cow<'static, str>,
    description: Cow<'static, str>,
    base_url: String,
}

#[cfg(test)]
impl Default for FeedBuilder {
    fn default() -> Self {
        FeedConfig::default().build()
    }
}

impl FeedBuilder {
    pub fn feed(&self, title: &str, items: &[FeedItem<'_>]) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        self.write_rss(&mut writer, title, items)?;
        let inner = writer.into_inner();
        let result = String::from_utf8_lossy(&inner);
        Ok(format!("{}{result}", DOM))
    }

    fn write_rss(
        &self,
        writer: &mut Writer<Vec<u8>>,
        title: &str,
        items: &[FeedItem<'_>],
    ) -> Result<()> {
        tracing::trace!("writing rss {title:?} with {} items", items.len());
        let channel_title = format!("{} - {title}", self.name);
        writer
            .create_element("rss")
            .with_attribute(("version", "2.0"))
            .with_attribute(("xmlns:atom", "http://www.w3.org/2005/Atom"))
            .with_attribute(("xmlns:media", "http://search.yahoo.com/mrss/"))
            .write_inner_content(|w| {
                w.create_element("channel").write_inner_content(|w| {
                    w.create_element("atom:link")
                        .with_attribute(("href", self.base_url.as_str()))
                        .with_attribute(("rel", "self"))
                        .with_attribute(("type", "application/rss+xml"))
                        .write_empty()?;
                    w.create_element("title")
                        .write_text_content(BytesText::new(&channel_title))?;
                    w.create_element("description")
                        .write_text_content(BytesText::new(&self.description))?;
                    w.create_element("link")
                        .write_text_content(BytesText::new(self.base_url.as_str()))?;
                    w.create_element("language")
                        .write_text_content(BytesText::new("en-US"))?;

                    for item in items {
                        self.write_item(w, item)?;
                    }

                    Ok(())
                })?;
                Ok(())
            })?;
        Ok(())
    }

    fn write_item(&self, writer: &mut Writer<Vec<u8>>, item: &FeedItem<'_>) -> Result<()> {
        let video = item.video;
        tracing::trace!("writing item {:?}", video.info.title);
        // without a locator the source uri is the best link available
        let link = video.locator.as_deref().unwrap_or(video.info.uri.as_str());
        writer.create_element("item").write_inner_content(|w| {
            w.create_element("title")
                .write_text_content(BytesText::new(&video.info.title))?;
            w.create_element("guid")
                .with_attribute(("isPermaLink", "false"))
                .write_text_content(BytesText::new(link))?;
            w.create_element("link")
                .write_text_content(BytesText::new(link))?;
            w.create_element("comments")
                .write_text_content(BytesText::new(&video.info.uri))?;
            if let Some(ref description) = video.description {
                w.create_element("description")
                    .write_text_content(BytesText::new(description))?;
            }
            if let Some(ref published) = video.published {
                w.create_element("pubDate")
                    .write_text_content(BytesText::new(&published.to_rfc2822()))?;
            }
            w.create_element("category")
                .write_text_content(BytesText::new(item.category))?;
            if let Some(ref video_uri) = video.video_uri {
                w.create_element("media:content")
                    .with_attribute(("url", video_uri.as_str()))
                    .with_attribute(("medium", "video"))
                    .with_attribute(("duration", video.duration.to_string().as_str()))
                    .write_empty()?;
            }
            if let Some(ref thumbnail) = video.thumbnail {
                w.create_element("media:thumbnail")
                    .with_attribute(("url", thumbnail.as_str()))
                    .write_empty()?;
            }
            Ok(())
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vchsearch_prelude::chrono::{TimeZone, Utc};
    use vchsearch_prelude::PageInfo;

    #[test]
    fn should_write_items() {
        let mut video = VideoPage::new(
            PageInfo::new("a", "Cats & dogs", "http://a/1"),
            90,
        );
        video.video_uri = Some("http://cdn/1.mp4".into());
        video.thumbnail = Some("http://cdn/1.jpg".into());
        video.published = Utc.timestamp_opt(1681234567, 0).single();
        video.locator = Some("vchsearch://localhost/a?title=Cats+%26+dogs&uri=http%3A%2F%2Fa%2F1&duration=90".into());
        let bare = VideoPage::new(PageInfo::new("a", "Bare", "http://a/2"), 5);

        let xml = FeedBuilder::default()
            .feed(
                "cats",
                &[
                    FeedItem {
                        category: "Provider A",
                        video: &video,
                    },
                    FeedItem {
                        category: "Provider A",
                        video: &bare,
                    },
                ],
            )
            .unwrap();

        let channel = rss::Channel::read_from(xml.as_bytes()).unwrap();
        assert_eq!(channel.title(), "vchsearch - cats");
        assert_eq!(channel.items().len(), 2);

        let first = &channel.items()[0];
        assert_eq!(first.title(), Some("Cats & dogs"));
        assert_eq!(first.link(), video.locator.as_deref());
        assert_eq!(first.categories()[0].name(), "Provider A");
        assert_eq!(first.pub_date(), Some("Tue, 11 Apr 2023 17:36:07 +0000"));
        assert!(xml.contains("duration=\"90\""));
        assert!(xml.contains("<media:thumbnail url=\"http://cdn/1.jpg\"/>"));

        let second = &channel.items()[1];
        assert_eq!(second.link(), Some("http://a/2"));
        assert_eq!(second.pub_date(), None);
        assert_eq!(second.description(), None);
    }
}
