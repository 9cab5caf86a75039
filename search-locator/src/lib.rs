//! Reversible encoding of result pages into `vchsearch://` locators.
//!
//! A locator carries everything needed to hand a page back to the provider
//! that produced it:
//!
//! ```text
//! vchsearch://localhost/<provider>?title=..&uri=..[&duration=..][&videoUri=..]
//!     [&thumbUri=..][&desc=..][&pubdate=<epoch ms>][&user.<key>=..]*
//! ```
//!
//! Values are form-urlencoded, so a locator survives any standard query parser.

use chrono::{TimeZone, Utc};
use std::collections::HashMap;
use url::Url;
use vchsearch_prelude::{OverviewPage, Page, PageInfo, VideoPage};

pub const SCHEME: &str = "vchsearch";

const BASE_URL: &str = "vchsearch://localhost/";
const USER_PREFIX: &str = "user.";

const TITLE: &str = "title";
const URI: &str = "uri";
const DURATION: &str = "duration";
const VIDEO_URI: &str = "videoUri";
const THUMB_URI: &str = "thumbUri";
const DESCRIPTION: &str = "desc";
const PUBLISH_DATE: &str = "pubdate";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LocatorError {
    #[error("invalid locator {locator:?}: {reason}")]
    InvalidLocator { locator: String, reason: String },
    #[error("malformed locator {locator:?}: {reason}")]
    MalformedLocator { locator: String, reason: String },
    #[error("unable to encode {field} of page {uri:?}: {reason}")]
    Encoding {
        field: &'static str,
        uri: String,
        reason: String,
    },
}

impl LocatorError {
    fn invalid<R: ToString>(locator: &str, reason: R) -> Self {
        Self::InvalidLocator {
            locator: locator.to_owned(),
            reason: reason.to_string(),
        }
    }

    fn malformed<R: ToString>(locator: &str, reason: R) -> Self {
        Self::MalformedLocator {
            locator: locator.to_owned(),
            reason: reason.to_string(),
        }
    }
}

/// Whether the given string is a locator this codec can decode.
pub fn accepts(locator: &str) -> bool {
    Url::parse(locator)
        .map(|url| url.scheme() == SCHEME)
        .unwrap_or(false)
}

pub fn encode(page: &Page) -> Result<String, LocatorError> {
    let info = page.info();
    let encoding_error = |field: &'static str, reason: &str| LocatorError::Encoding {
        field,
        uri: info.uri.clone(),
        reason: reason.to_owned(),
    };

    if info.parser.is_empty() {
        return Err(encoding_error("parser", "no provider owns this page"));
    }

    let mut url = Url::parse(BASE_URL).map_err(|err| encoding_error("parser", &err.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| encoding_error("parser", "locator base cannot hold a path"))?
        .pop_if_empty()
        .push(&info.parser);

    {
        let mut query = url.query_pairs_mut();
        query.append_pair(TITLE, &info.title);
        query.append_pair(URI, &info.uri);

        if let Page::Video(video) = page {
            query.append_pair(DURATION, &video.duration.to_string());
            if let Some(ref value) = video.video_uri {
                query.append_pair(VIDEO_URI, value);
            }
            if let Some(ref value) = video.thumbnail {
                query.append_pair(THUMB_URI, value);
            }
            if let Some(ref value) = video.description {
                query.append_pair(DESCRIPTION, value);
            }
            if let Some(ref value) = video.published {
                query.append_pair(PUBLISH_DATE, &value.timestamp_millis().to_string());
            }
        }

        let mut user_data: Vec<_> = info.user_data.iter().collect();
        user_data.sort();
        for (key, value) in user_data {
            query.append_pair(&format!("{USER_PREFIX}{key}"), value);
        }
    }

    Ok(url.to_string())
}

/// Rebuilds a stub page from a locator.
///
/// A locator holding a `duration` gives a [`VideoPage`], anything else an empty
/// [`OverviewPage`].
pub fn decode(locator: &str) -> Result<Page, LocatorError> {
    let url = Url::parse(locator).map_err(|err| LocatorError::invalid(locator, err))?;
    if url.scheme() != SCHEME {
        return Err(LocatorError::invalid(
            locator,
            format!("unsupported scheme {:?}", url.scheme()),
        ));
    }

    let parser = url
        .path_segments()
        .and_then(|mut segments| segments.next())
        .unwrap_or_default();
    let parser = urlencoding::decode(parser)
        .map_err(|err| LocatorError::malformed(locator, err))?
        .into_owned();

    // only the first value of a repeated key counts
    let mut params: HashMap<String, String> = HashMap::new();
    for (key, value) in url.query_pairs() {
        params
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }

    let title = params
        .remove(TITLE)
        .ok_or_else(|| LocatorError::malformed(locator, "missing title"))?;
    let uri = params
        .remove(URI)
        .ok_or_else(|| LocatorError::malformed(locator, "missing uri"))?;

    let mut info = PageInfo::new(parser, title, uri);
    info.user_data = params
        .iter()
        .filter_map(|(key, value)| {
            key.strip_prefix(USER_PREFIX)
                .map(|key| (key.to_owned(), value.clone()))
        })
        .collect();

    let Some(duration) = params.get(DURATION) else {
        return Ok(Page::Overview(OverviewPage::new(info)));
    };
    let duration = duration
        .parse::<u64>()
        .map_err(|err| LocatorError::malformed(locator, format!("invalid duration: {err}")))?;
    let published = params
        .get(PUBLISH_DATE)
        .map(|value| {
            value
                .parse::<i64>()
                .ok()
                .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
                .ok_or_else(|| {
                    LocatorError::malformed(locator, format!("invalid pubdate {value:?}"))
                })
        })
        .transpose()?;

    Ok(Page::Video(VideoPage {
        info,
        video_uri: params.remove(VIDEO_URI),
        thumbnail: params.remove(THUMB_URI),
        duration,
        description: params.remove(DESCRIPTION),
        published,
        locator: None,
    }))
}
