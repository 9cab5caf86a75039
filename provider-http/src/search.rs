use vchsearch_prelude::{OverviewPage, PageInfo, ProviderError};

use crate::entry::Entry;

pub async fn execute(
    provider: &str,
    base_url: &str,
    query: &str,
) -> Result<OverviewPage, ProviderError> {
    let url = format!("{base_url}/search");
    let entries: Vec<Entry> = crate::common::fetch(provider, &url, &[("q", query)]).await?;
    tracing::debug!("{provider} found {} entries for {query:?}", entries.len());

    Ok(entries.into_iter().fold(
        OverviewPage::new(PageInfo::new(provider, query, url.as_str())),
        |page, entry| page.with_page(entry.into_page(provider)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vchsearch_prelude::{Page, ProviderErrorReason};

    #[tokio::test]
    async fn should_parse_result() {
        let mut server = mockito::Server::new_async().await;

        let search_page = server
            .mock("GET", "/search?q=cats+and+dogs")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(include_str!("./search.json"))
            .create_async()
            .await;

        let result = execute("catalogue", server.url().as_str(), "cats and dogs")
            .await
            .unwrap();
        assert_eq!(result.info.parser, "catalogue");
        assert_eq!(result.pages.len(), 3);

        let Page::Video(ref first) = result.pages[0] else {
            panic!("expected a video");
        };
        assert_eq!(first.info.parser, "catalogue");
        assert_eq!(first.info.title, "Cats are great");
        assert_eq!(first.info.uri, "http://catalogue/videos/1");
        assert_eq!(first.duration, 120);
        assert_eq!(first.video_uri.as_deref(), Some("http://cdn.catalogue/1.mp4"));
        assert_eq!(first.thumbnail.as_deref(), Some("http://cdn.catalogue/1.jpg"));
        assert_eq!(first.published.unwrap().timestamp(), 1681234567);
        assert_eq!(first.info.user_data.get("lang").map(String::as_str), Some("en"));

        let Page::Video(ref second) = result.pages[1] else {
            panic!("expected a video");
        };
        assert_eq!(second.info.title, "Dogs, not so much");
        assert_eq!(second.video_uri, None);
        assert_eq!(second.description, None);
        assert_eq!(second.published, None);
        assert!(second.info.user_data.is_empty());

        search_page.assert_async().await;
    }

    #[tokio::test]
    async fn should_fail_when_catalogue_is_down() {
        let mut server = mockito::Server::new_async().await;

        let search_page = server
            .mock("GET", "/search?q=cats")
            .with_status(500)
            .with_body("oops")
            .create_async()
            .await;

        let error = execute("catalogue", server.url().as_str(), "cats")
            .await
            .unwrap_err();
        assert_eq!(error.origin, "catalogue");
        assert!(matches!(error.reason, ProviderErrorReason::UnableToQuery { .. }));

        search_page.assert_async().await;
    }

    #[tokio::test]
    async fn should_fail_on_unreadable_answer() {
        let mut server = mockito::Server::new_async().await;

        let search_page = server
            .mock("GET", "/search?q=cats")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<html></html>")
            .create_async()
            .await;

        let error = execute("catalogue", server.url().as_str(), "cats")
            .await
            .unwrap_err();
        assert!(matches!(error.reason, ProviderErrorReason::UnableToRead { .. }));

        search_page.assert_async().await;
    }
}
