//! Real browser control via the Chrome DevTools Protocol.
//!
//! Only compiled with the `browser` feature. [`Browser`] launches a headless
//! Chromium through chromiumoxide; [`Page`] wraps one tab and implements
//! [`PageDriver`] by resolving locators as JavaScript element-array
//! expressions through `Runtime.evaluate`.

use crate::driver::PageDriver;
use crate::locator::Locator;
use crate::result::{SuiteError, SuiteResult};
use crate::wait::{UrlPattern, DEFAULT_POLL_INTERVAL_MS};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use chromiumoxide::page::Page as CdpPage;
use futures::StreamExt;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// JS writing a text value through the native `HTMLInputElement` prototype
/// setter before firing events. React overrides the instance `value` setter
/// with a tracker and dedupes synthetic events whose value it already knows;
/// the prototype setter bypasses the override so controlled inputs observe
/// the change.
fn fill_action_js(text: &str) -> String {
    format!(
        "const set = Object.getOwnPropertyDescriptor(window.HTMLInputElement.prototype, 'value').set; \
         els[0].focus(); set.call(els[0], {text:?}); \
         els[0].dispatchEvent(new Event('input', {{ bubbles: true }})); \
         els[0].dispatchEvent(new Event('change', {{ bubbles: true }}))"
    )
}

/// JS selecting an option value through the native `HTMLSelectElement`
/// prototype setter, same constraint as [`fill_action_js`].
fn select_action_js(value: &str) -> String {
    format!(
        "const set = Object.getOwnPropertyDescriptor(window.HTMLSelectElement.prototype, 'value').set; \
         set.call(els[0], {value:?}); \
         els[0].dispatchEvent(new Event('change', {{ bubbles: true }}))"
    )
}

/// Browser configuration
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            chromium_path: None,
            sandbox: true,
        }
    }
}

impl BrowserConfig {
    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }
}

/// Browser instance with a live CDP connection
pub struct Browser {
    inner: Arc<Mutex<CdpBrowser>>,
    #[allow(dead_code)]
    handle: tokio::task::JoinHandle<()>,
}

impl Browser {
    /// Launch a browser instance
    pub async fn launch(config: BrowserConfig) -> SuiteResult<Self> {
        let mut builder = CdpConfig::builder();
        if !config.headless {
            builder = builder.with_head();
        }
        if !config.sandbox {
            builder = builder.no_sandbox();
        }
        if let Some(ref path) = config.chromium_path {
            builder = builder.chrome_executable(path);
        }

        let cdp_config = builder.build().map_err(|e| SuiteError::BrowserLaunch {
            message: e.to_string(),
        })?;

        let (browser, mut handler) =
            CdpBrowser::launch(cdp_config)
                .await
                .map_err(|e| SuiteError::BrowserLaunch {
                    message: e.to_string(),
                })?;

        let handle = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        tracing::info!("browser launched");
        Ok(Self {
            inner: Arc::new(Mutex::new(browser)),
            handle,
        })
    }

    /// Open a new page/tab
    pub async fn new_page(&self) -> SuiteResult<Page> {
        let browser = self.inner.lock().await;
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| SuiteError::Driver {
                message: e.to_string(),
            })?;
        Ok(Page {
            inner: Arc::new(page),
        })
    }

    /// Close the browser, releasing the process unconditionally
    pub async fn close(&self) -> SuiteResult<()> {
        let mut browser = self.inner.lock().await;
        browser.close().await.map_err(|e| SuiteError::Driver {
            message: e.to_string(),
        })?;
        Ok(())
    }
}

/// One browser tab implementing [`PageDriver`]
#[derive(Clone)]
pub struct Page {
    inner: Arc<CdpPage>,
}

impl Page {
    async fn eval<T: DeserializeOwned>(&self, expr: &str) -> SuiteResult<T> {
        let result = self
            .inner
            .evaluate(expr)
            .await
            .map_err(|e| SuiteError::Driver {
                message: e.to_string(),
            })?;
        result.into_value().map_err(|e| SuiteError::Driver {
            message: e.to_string(),
        })
    }

    /// Poll until the locator resolves to at least one element, then run the
    /// action expression against the resolved array bound as `els`.
    async fn act_on_first(&self, locator: &Locator, action_js: &str) -> SuiteResult<()> {
        self.wait_for_match(locator, crate::wait::element_timeout())
            .await?;
        let expr = format!(
            "(() => {{ const els = {}; {action_js}; return true; }})()",
            locator.to_elements_js()
        );
        let _: bool = self.eval(&expr).await?;
        Ok(())
    }

    async fn wait_for_match(&self, locator: &Locator, timeout: Duration) -> SuiteResult<()> {
        let deadline = Instant::now() + timeout;
        loop {
            let count: usize = self.eval(&locator.to_count_js()).await?;
            if count > 0 {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(SuiteError::ElementTimeout {
                    locator: locator.to_string(),
                    ms: timeout.as_millis() as u64,
                });
            }
            tokio::time::sleep(Duration::from_millis(DEFAULT_POLL_INTERVAL_MS)).await;
        }
    }
}

#[async_trait]
impl PageDriver for Page {
    async fn goto(&self, url: &str) -> SuiteResult<()> {
        tracing::debug!(url, "goto");
        self.inner.goto(url).await.map_err(|e| SuiteError::Driver {
            message: e.to_string(),
        })?;
        Ok(())
    }

    async fn current_url(&self) -> SuiteResult<String> {
        let url = self.inner.url().await.map_err(|e| SuiteError::Driver {
            message: e.to_string(),
        })?;
        Ok(url.unwrap_or_default())
    }

    async fn click(&self, locator: &Locator) -> SuiteResult<()> {
        tracing::debug!(%locator, "click");
        self.act_on_first(locator, "els[0].click()").await
    }

    async fn fill(&self, locator: &Locator, text: &str) -> SuiteResult<()> {
        tracing::debug!(%locator, "fill");
        self.act_on_first(locator, &fill_action_js(text)).await
    }

    async fn text_content(&self, locator: &Locator) -> SuiteResult<Option<String>> {
        let expr = format!(
            "(() => {{ const els = {}; return els.length > 0 ? els[0].textContent : null; }})()",
            locator.to_elements_js()
        );
        self.eval(&expr).await
    }

    async fn all_text_contents(&self, locator: &Locator) -> SuiteResult<Vec<String>> {
        let expr = format!(
            "{}.map(el => el.textContent)",
            locator.to_elements_js()
        );
        self.eval(&expr).await
    }

    async fn get_attribute(&self, locator: &Locator, name: &str) -> SuiteResult<Option<String>> {
        let expr = format!(
            "(() => {{ const els = {}; return els.length > 0 ? els[0].getAttribute({name:?}) : null; }})()",
            locator.to_elements_js()
        );
        self.eval(&expr).await
    }

    async fn count(&self, locator: &Locator) -> SuiteResult<usize> {
        self.eval(&locator.to_count_js()).await
    }

    async fn is_visible(&self, locator: &Locator) -> SuiteResult<bool> {
        // An empty resolved set reports not-visible rather than raising.
        let expr = format!(
            "{}.some(el => {{ \
                const r = el.getBoundingClientRect(); \
                const s = window.getComputedStyle(el); \
                return r.width > 0 && r.height > 0 && \
                    s.visibility !== 'hidden' && s.display !== 'none'; \
            }})",
            locator.to_elements_js()
        );
        self.eval(&expr).await
    }

    async fn select_option(&self, locator: &Locator, value: &str) -> SuiteResult<()> {
        tracing::debug!(%locator, value, "select option");
        self.act_on_first(locator, &select_action_js(value)).await
    }

    async fn wait_for_url(&self, pattern: &UrlPattern, timeout: Duration) -> SuiteResult<()> {
        let deadline = Instant::now() + timeout;
        loop {
            let url = self.current_url().await?;
            if pattern.matches(&url) {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(SuiteError::NavigationTimeout {
                    pattern: pattern.to_string(),
                    ms: timeout.as_millis() as u64,
                });
            }
            tokio::time::sleep(Duration::from_millis(DEFAULT_POLL_INTERVAL_MS)).await;
        }
    }

    async fn wait_for_selector(&self, locator: &Locator, timeout: Duration) -> SuiteResult<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if self.is_visible(locator).await? {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(SuiteError::ElementTimeout {
                    locator: locator.to_string(),
                    ms: timeout.as_millis() as u64,
                });
            }
            tokio::time::sleep(Duration::from_millis(DEFAULT_POLL_INTERVAL_MS)).await;
        }
    }
}
