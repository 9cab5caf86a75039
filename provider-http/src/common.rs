use serde::de::DeserializeOwned;
use url::Url;
use vchsearch_prelude::{ProviderError, ProviderErrorReason};

pub(crate) async fn fetch<T: DeserializeOwned>(
    origin: &str,
    url: &str,
    params: &[(&str, &str)],
) -> Result<T, ProviderError> {
    let url = Url::parse_with_params(url, params).map_err(|cause| {
        ProviderError::new(origin, ProviderErrorReason::UnableToBuildUrl { cause })
    })?;
    let url_str = url.to_string();

    let req = reqwest::get(url)
        .await
        .and_then(|res| res.error_for_status())
        .map_err(|err| {
            ProviderError::new(
                origin,
                ProviderErrorReason::UnableToQuery {
                    url: url_str.clone(),
                    cause: err.to_string(),
                },
            )
        })?;
    req.json().await.map_err(|err| {
        ProviderError::new(
            origin,
            ProviderErrorReason::UnableToRead {
                url: url_str,
                cause: err.to_string(),
            },
        )
    })
}
