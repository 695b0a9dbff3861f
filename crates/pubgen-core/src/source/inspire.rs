use std::time::Duration;

use serde::Deserialize;

use super::{FetchError, FetchFuture, RecordSource};
use crate::record::Record;

pub const DEFAULT_BASE_URL: &str = "https://inspirehep.net";
/// Environment variable overriding [`DEFAULT_BASE_URL`].
pub const BASE_URL_ENV: &str = "INSPIRE_API_URL";

const PAGE_SIZE: usize = 250;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Deserialize)]
struct SearchResponse {
    hits: Hits,
}

#[derive(Deserialize)]
struct Hits {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Deserialize)]
struct Hit {
    #[serde(default)]
    metadata: Record,
}

/// The INSPIRE-HEP literature search API.
pub struct InspireClient {
    client: reqwest::Client,
    base_url: String,
}

impl InspireClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("pubgen/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Client for `$INSPIRE_API_URL`, or the public instance when unset.
    pub fn from_env() -> Result<Self, FetchError> {
        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    /// Search URL for an author query; `bibtex` asks for the BibTeX export.
    pub fn search_url(&self, query: &str, bibtex: bool) -> String {
        let mut url = format!(
            "{}/api/literature?q={}&size={}&sort=mostrecent",
            self.base_url,
            urlencoding::encode(&format!("a {query}")),
            PAGE_SIZE
        );
        if bibtex {
            url.push_str("&format=bibtex");
        }
        url
    }

    async fn get_text(&self, url: String) -> Result<String, FetchError> {
        tracing::debug!(%url, "GET");
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }
        Ok(resp.text().await?)
    }
}

/// Records from a literature search response body, in hit order.
pub fn parse_search_response(body: &str) -> Result<Vec<Record>, FetchError> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response.hits.hits.into_iter().map(|h| h.metadata).collect())
}

impl RecordSource for InspireClient {
    fn name(&self) -> &str {
        "INSPIRE-HEP"
    }

    fn fetch_records<'a>(&'a self, query: &'a str) -> FetchFuture<'a, Vec<Record>> {
        Box::pin(async move {
            let body = self.get_text(self.search_url(query, false)).await?;
            parse_search_response(&body)
        })
    }

    fn fetch_bibtex<'a>(&'a self, query: &'a str) -> FetchFuture<'a, String> {
        Box::pin(async move { self.get_text(self.search_url(query, true)).await })
    }
}
