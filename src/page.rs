use std::time::Duration;

use chromiumoxide::page::Page as CrPage;
use tracing::debug;

use crate::error::{Error, Result};

/// Interval between readiness polls.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Wrapper around a chromiumoxide Page exposing what the scraper needs.
pub struct Page {
    inner: CrPage,
    default_timeout: Duration,
}

impl Page {
    pub(crate) fn new(inner: CrPage, default_timeout: Duration) -> Self {
        Self { inner, default_timeout }
    }

    /// Navigate to the given URL and wait for the load event.
    pub async fn goto(&self, url: &str) -> Result<()> {
        tokio::time::timeout(self.default_timeout, self.inner.goto(url))
            .await
            .map_err(|_| Error::Timeout(format!("navigation to {url}")))?
            .map_err(|e| Error::NavigationError(e.to_string()))?;
        Ok(())
    }

    /// Get the current page title.
    pub async fn title(&self) -> Result<String> {
        let result = self
            .inner
            .evaluate("document.title")
            .await
            .map_err(|e| Error::JsError(e.to_string()))?;
        Ok(result.into_value::<String>().unwrap_or_default())
    }

    /// Current `document.readyState` (`loading`, `interactive` or `complete`).
    pub async fn ready_state(&self) -> Result<String> {
        let result = self
            .inner
            .evaluate("document.readyState")
            .await
            .map_err(|e| Error::JsError(e.to_string()))?;
        result
            .into_value::<String>()
            .map_err(|e| Error::JsError(e.to_string()))
    }

    /// Whether at least one element matches the given CSS selector right now.
    pub async fn has_selector(&self, selector: &str) -> Result<bool> {
        let selector_js =
            serde_json::to_string(selector).map_err(|e| Error::JsError(e.to_string()))?;
        let result = self
            .inner
            .evaluate(format!("document.querySelector({selector_js}) !== null"))
            .await
            .map_err(|e| Error::JsError(e.to_string()))?;
        result
            .into_value::<bool>()
            .map_err(|e| Error::JsError(e.to_string()))
    }

    /// Wait until the document has finished loading and, when given, `marker`
    /// matches an element. Polls every 100ms up to the configured default timeout.
    pub async fn wait_until_ready(&self, marker: Option<&str>) -> Result<()> {
        let timeout = self.default_timeout;
        let start = std::time::Instant::now();

        loop {
            if self.is_ready(marker).await? {
                debug!(elapsed = ?start.elapsed(), "page ready");
                return Ok(());
            }
            if start.elapsed() >= timeout {
                let what = match marker {
                    Some(selector) => format!("page ready with selector: {selector}"),
                    None => "page ready".to_string(),
                };
                return Err(Error::Timeout(what));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn is_ready(&self, marker: Option<&str>) -> Result<bool> {
        if self.ready_state().await? != "complete" {
            return Ok(false);
        }
        match marker {
            Some(selector) => self.has_selector(selector).await,
            None => Ok(true),
        }
    }

    /// Get the full HTML content of the page.
    pub async fn html(&self) -> Result<String> {
        self.inner
            .content()
            .await
            .map_err(|e| Error::JsError(e.to_string()))
    }
}
