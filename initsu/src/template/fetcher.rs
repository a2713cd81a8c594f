//! Best-effort retrieval of template files from a raw-content host

use futures_util::future::join_all;
use std::collections::HashMap;

use super::error::{FetchError, FetchResult};
use super::fallback::fallback_content;
use super::source::TemplateSource;
use super::transport::Transport;

/// Default raw-content host
pub const DEFAULT_BASE_URL: &str = "https://raw.githubusercontent.com";

/// Fetches template files, substituting built-in content on failure
#[derive(Debug, Clone)]
pub struct ContentFetcher<T> {
    transport: T,
    base_url: String,
}

impl<T: Transport> ContentFetcher<T> {
    /// Create a fetcher against `base_url` (e.g. `https://raw.githubusercontent.com`)
    #[must_use]
    pub fn new(transport: T, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
        }
    }

    /// Create a fetcher against [`DEFAULT_BASE_URL`]
    #[must_use]
    pub fn with_default_host(transport: T) -> Self {
        Self::new(transport, DEFAULT_BASE_URL)
    }

    /// The underlying transport
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// URL serving `path` from `source`
    #[must_use]
    pub fn url_for(&self, source: &TemplateSource, path: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            source.owner,
            source.repo,
            source.branch,
            path.trim_start_matches('/'),
        )
    }

    /// Fetch one file; only HTTP 200 counts as success
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Status`] for any other status and
    /// [`FetchError::Transport`] if no response arrived.
    pub async fn fetch_one(&self, source: &TemplateSource, path: &str) -> FetchResult<String> {
        let url = self.url_for(source, path);
        let response = self.transport.get(&url).await?;

        if response.status != 200 {
            return Err(FetchError::Status {
                url,
                status: response.status,
            });
        }

        Ok(response.body)
    }

    /// Fetch every file of `source` concurrently
    ///
    /// Never fails: a file that cannot be fetched is logged and replaced by
    /// its fallback content. The result has one entry per declared path.
    pub async fn fetch_many(&self, source: &TemplateSource) -> HashMap<String, String> {
        let fetches = source.files.iter().map(|path| async move {
            let content = match self.fetch_one(source, path).await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!(path = %path, error = %e, "Could not fetch template file, using default content");
                    fallback_content(path).to_string()
                }
            };
            (path.clone(), content)
        });

        join_all(fetches).await.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::fallback::STYLESHEET_FALLBACK;
    use crate::template::transport::{MockTransport, RawResponse};

    fn source(files: &[&str]) -> TemplateSource {
        TemplateSource::new("o", "r", "main", files.iter().copied())
    }

    #[test]
    fn test_url_layout() {
        let fetcher = ContentFetcher::with_default_host(MockTransport::new());
        assert_eq!(
            fetcher.url_for(&source(&[]), "src/app/page.tsx"),
            "https://raw.githubusercontent.com/o/r/main/src/app/page.tsx"
        );

        let fetcher = ContentFetcher::new(MockTransport::new(), "http://127.0.0.1:9999/");
        assert_eq!(
            fetcher.url_for(&source(&[]), "a.txt"),
            "http://127.0.0.1:9999/o/r/main/a.txt"
        );
    }

    #[tokio::test]
    async fn test_fetch_one_ok() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .withf(|url| url == "https://raw.githubusercontent.com/o/r/main/a.txt")
            .times(1)
            .returning(|_| Ok(RawResponse::new(200, "hello")));

        let fetcher = ContentFetcher::with_default_host(transport);
        let body = fetcher.fetch_one(&source(&["a.txt"]), "a.txt").await.unwrap();
        assert_eq!(body, "hello");
    }

    #[tokio::test]
    async fn test_fetch_one_non_200_is_error() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .times(1)
            .returning(|_| Ok(RawResponse::new(302, "moved")));

        let fetcher = ContentFetcher::with_default_host(transport);
        let err = fetcher.fetch_one(&source(&["a.txt"]), "a.txt").await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 302, .. }));
    }

    #[tokio::test]
    async fn test_fetch_one_does_not_retry() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .times(1)
            .returning(|url| Err(FetchError::transport(url, "connection refused")));

        let fetcher = ContentFetcher::with_default_host(transport);
        let err = fetcher.fetch_one(&source(&["a.txt"]), "a.txt").await.unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
    }

    #[tokio::test]
    async fn test_fetch_many_falls_back_per_file() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .withf(|url| url.ends_with("page.tsx"))
            .returning(|_| Ok(RawResponse::new(200, "PAGE")));
        transport
            .expect_get()
            .withf(|url| url.ends_with("globals.css"))
            .returning(|_| Ok(RawResponse::new(404, "Not Found")));
        transport
            .expect_get()
            .withf(|url| url.ends_with("README.md"))
            .returning(|url| Err(FetchError::transport(url, "timed out")));

        let fetcher = ContentFetcher::with_default_host(transport);
        let files = fetcher
            .fetch_many(&source(&["src/app/page.tsx", "src/app/globals.css", "README.md"]))
            .await;

        assert_eq!(files.len(), 3);
        assert_eq!(files["src/app/page.tsx"], "PAGE");
        assert_eq!(files["src/app/globals.css"], STYLESHEET_FALLBACK);
        assert_eq!(files["README.md"], "");
    }

    #[tokio::test]
    async fn test_fetch_many_all_failures_still_complete() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .times(4)
            .returning(|_| Ok(RawResponse::new(500, "")));

        let fetcher = ContentFetcher::with_default_host(transport);
        let files = fetcher
            .fetch_many(&source(&["a.css", "b/page.tsx", "c.json", "d"]))
            .await;

        assert_eq!(files.len(), 4);
        assert!(files["a.css"].starts_with("@tailwind base;"));
        assert!(files["b/page.tsx"].starts_with("export default function Home()"));
        assert_eq!(files["c.json"], "");
        assert_eq!(files["d"], "");
    }

    #[tokio::test]
    async fn test_fetch_many_empty_source() {
        let transport = MockTransport::new();
        let fetcher = ContentFetcher::with_default_host(transport);
        assert!(fetcher.fetch_many(&source(&[])).await.is_empty());
    }
}
