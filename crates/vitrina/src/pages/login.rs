//! Login page object.

use crate::driver::PageDriver;
use crate::locator::Locator;
use crate::result::SuiteResult;
use crate::wait::{self, UrlPattern};

/// Page object for the login form
pub struct LoginPage<D> {
    page: D,
    username_input: Locator,
    password_input: Locator,
    login_button: Locator,
    error_message: Locator,
    login_container: Locator,
}

impl<D: PageDriver> LoginPage<D> {
    /// Bind a login page object to a page handle
    pub fn new(page: D) -> Self {
        Self {
            page,
            username_input: Locator::css("#user-name"),
            password_input: Locator::css("#password"),
            login_button: Locator::css("#login-button"),
            error_message: Locator::css("[data-test=\"error\"]"),
            login_container: Locator::css(".login_container"),
        }
    }

    /// Navigate to the login page (application root)
    pub async fn open(&self, base_url: &str) -> SuiteResult<()> {
        self.page.goto(base_url).await
    }

    /// Fill the credential fields and submit.
    ///
    /// Does not wait for any post-condition; the caller decides what to
    /// await afterwards.
    pub async fn login(&self, username: &str, password: &str) -> SuiteResult<()> {
        tracing::info!(username, "submitting login");
        self.page.fill(&self.username_input, username).await?;
        self.page.fill(&self.password_input, password).await?;
        self.page.click(&self.login_button).await
    }

    /// Log in and suspend until the product listing is reached.
    ///
    /// Propagates a navigation timeout if the inventory URL is never
    /// reached within the driver's default bound.
    pub async fn login_expecting_success(&self, username: &str, password: &str) -> SuiteResult<()> {
        self.login(username, password).await?;
        self.page
            .wait_for_url(&UrlPattern::inventory(), wait::navigation_timeout())
            .await
    }

    /// Log in with credentials expected to fail and return the error banner
    /// text, empty string if the banner is not present.
    ///
    /// The banner is read immediately after submission with no wait; a slow
    /// UI can render this as an empty string. Callers that need certainty
    /// should await the banner explicitly first.
    pub async fn login_expecting_failure(
        &self,
        username: &str,
        password: &str,
    ) -> SuiteResult<String> {
        self.login(username, password).await?;
        Ok(self
            .page
            .text_content(&self.error_message)
            .await?
            .unwrap_or_default())
    }

    /// Whether the error banner is visible
    pub async fn is_error_message_visible(&self) -> SuiteResult<bool> {
        self.page.is_visible(&self.error_message).await
    }

    /// Error banner text, empty string if not present
    pub async fn error_message(&self) -> SuiteResult<String> {
        Ok(self
            .page
            .text_content(&self.error_message)
            .await?
            .unwrap_or_default())
    }

    /// Whether the login form container is visible
    pub async fn is_login_page_visible(&self) -> SuiteResult<bool> {
        self.page.is_visible(&self.login_container).await
    }
}
