use url::Url;

use crate::interface_adapters::protocol::TOKEN_QUERY_PARAM;

// Pull the `token` query parameter out of a launch URL.
// Unparsable URLs and missing or empty parameters all yield None.
pub fn token_from_page_url(page_url: &str) -> Option<String> {
    let url = Url::parse(page_url).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == TOKEN_QUERY_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
