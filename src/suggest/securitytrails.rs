use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, COOKIE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, header};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::SuggestError;
use crate::cli::Cookie;

const BASE_URL: &str = "https://securitytrails.com/app/api/autocomplete/domain";
const MAX_ATTEMPTS: u32 = 3;

/// The dns-trails autocomplete endpoint, queried once per brute-forced
/// suffix appended to the seed keyword.
pub(crate) struct SecurityTrails {
    keyword: String,
}

impl SecurityTrails {
    pub(crate) fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
        }
    }

    /// Headers of the browser session the operator lifted the cookie from.
    ///
    /// The endpoint expects the full document-navigation set a browser
    /// sends; a thinner set tends to earn the challenge page even with a
    /// live cookie.
    pub(crate) fn session_headers(
        cookie: &Cookie,
        user_agent: &str,
    ) -> Result<HeaderMap, header::InvalidHeaderValue> {
        let mut headers = HeaderMap::with_capacity(10);

        headers.insert(COOKIE, HeaderValue::from_str(&cookie.header_value())?);
        headers.insert(USER_AGENT, HeaderValue::from_str(user_agent)?);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.8"));
        headers.insert("upgrade-insecure-requests", HeaderValue::from_static("1"));
        headers.insert("sec-gpc", HeaderValue::from_static("1"));
        headers.insert("sec-fetch-site", HeaderValue::from_static("none"));
        headers.insert("sec-fetch-mode", HeaderValue::from_static("navigate"));
        headers.insert("sec-fetch-user", HeaderValue::from_static("?1"));
        headers.insert("sec-fetch-dest", HeaderValue::from_static("document"));

        Ok(headers)
    }

    /// URL for one candidate; keyword and suffix land concatenated as a
    /// single escaped path segment.
    fn suggest_url(&self, suffix: &str) -> Url {
        let mut url = Url::parse(BASE_URL).expect("base url is valid");
        url.path_segments_mut()
            .expect("https urls always have a path")
            .push(&format!("{}{}", self.keyword, suffix));
        url
    }

    /// Fetches the suggestion list for one suffix.
    ///
    /// Transport faults get a bounded retry; a body that doesn't parse
    /// into the expected shape means the session is gone. The HTTP status
    /// is deliberately not checked: an expired session yields a challenge
    /// page, and the parse step is what classifies that.
    pub(crate) async fn suggestions(
        &self,
        client: &Client,
        suffix: &str,
    ) -> Result<Vec<String>, SuggestError> {
        let query = format!("{}{}", self.keyword, suffix);
        let url = self.suggest_url(suffix);

        let mut attempts = 0;
        let body = loop {
            attempts += 1;
            let sent = match client.get(url.clone()).send().await {
                Ok(resp) => resp.text().await,
                Err(e) => Err(e),
            };
            match sent {
                Ok(body) => break body,
                Err(source) if attempts >= MAX_ATTEMPTS => {
                    return Err(SuggestError::Transport {
                        query,
                        attempts,
                        source,
                    });
                }
                Err(e) => debug!(%query, attempt = attempts, error = %e, "retrying"),
            }
        };

        extract(&body).ok_or(SuggestError::SessionInvalid { query })
    }
}

/// Pulls the suggestion list out of a reply body; `None` when the body is
/// not the JSON shape the endpoint answers with while authenticated.
fn extract(body: &str) -> Option<Vec<String>> {
    serde_json::from_str::<SuggestReply>(body)
        .map(|r| r.suggestions)
        .ok()
}

#[derive(Debug, Deserialize)]
struct SuggestReply {
    suggestions: Vec<String>,
}
