// File: crates/sparkline-feed/src/source.rs
// Summary: Where pages of observations come from. The HTTP implementation is behind the `http` feature.

use std::future::Future;

use crate::paging::PageRequest;
use crate::Result;

/// A paged endpoint returning a JSON body in either envelope shape.
pub trait ObservationSource {
    fn fetch_page(&self, page: PageRequest) -> impl Future<Output = Result<String>> + Send;
}

#[cfg(feature = "http")]
pub use http::HttpSource;

#[cfg(feature = "http")]
mod http {
    use std::time::Duration;

    use super::ObservationSource;
    use crate::paging::PageRequest;
    use crate::{FeedError, Result};

    /// `GET {base}/{endpoint}?skip=..&limit=..`
    #[derive(Clone, Debug)]
    pub struct HttpSource {
        client: reqwest::Client,
        base_url: String,
        endpoint: String,
    }

    impl HttpSource {
        pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

        pub fn new(base_url: impl Into<String>, endpoint: impl Into<String>) -> Result<Self> {
            let client = reqwest::Client::builder().timeout(Self::DEFAULT_TIMEOUT).build()?;
            Ok(Self::with_client(client, base_url, endpoint))
        }

        pub fn with_client(client: reqwest::Client, base_url: impl Into<String>, endpoint: impl Into<String>) -> Self {
            Self { client, base_url: base_url.into(), endpoint: endpoint.into() }
        }

        pub fn url(&self) -> String {
            format!("{}/{}", self.base_url.trim_end_matches('/'), self.endpoint.trim_start_matches('/'))
        }
    }

    impl ObservationSource for HttpSource {
        async fn fetch_page(&self, page: PageRequest) -> Result<String> {
            let url = self.url();
            tracing::debug!(%url, skip = page.skip, limit = page.limit, "fetching page");
            let response = self
                .client
                .get(&url)
                .query(&[("skip", page.skip), ("limit", page.limit)])
                .send()
                .await?;
            let status = response.status();
            let body = response.text().await?;
            if !status.is_success() {
                return Err(FeedError::ServerError { status: status.as_u16(), body });
            }
            Ok(body)
        }
    }

}
