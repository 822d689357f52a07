//! Abstract page driver trait.
//!
//! The suite does not talk to a browser directly; it talks to a [`PageDriver`]
//! carrying the full capability surface the page objects need. Implementations:
//!
//! - `browser::Page` - real CDP control via chromiumoxide (feature `browser`)
//! - [`MockPage`] - scripted double for unit and scenario tests
//!
//! Every call resolves its [`Locator`] against the current DOM; drivers hold
//! no element handles between calls.

use crate::locator::Locator;
use crate::result::{SuiteError, SuiteResult};
use crate::wait::{UrlPattern, DEFAULT_ELEMENT_TIMEOUT_MS};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Abstract driver trait for one browser page/tab
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Navigate to a URL
    async fn goto(&self, url: &str) -> SuiteResult<()>;

    /// Get the current page URL
    async fn current_url(&self) -> SuiteResult<String>;

    /// Click the first element the locator resolves to
    async fn click(&self, locator: &Locator) -> SuiteResult<()>;

    /// Fill the first resolved element with text
    async fn fill(&self, locator: &Locator, text: &str) -> SuiteResult<()>;

    /// Text content of the first resolved element, `None` if nothing matches
    async fn text_content(&self, locator: &Locator) -> SuiteResult<Option<String>>;

    /// Text contents of all resolved elements, in DOM order
    async fn all_text_contents(&self, locator: &Locator) -> SuiteResult<Vec<String>>;

    /// Attribute value of the first resolved element
    async fn get_attribute(&self, locator: &Locator, name: &str) -> SuiteResult<Option<String>>;

    /// Number of elements the locator resolves to
    async fn count(&self, locator: &Locator) -> SuiteResult<usize>;

    /// Whether the resolved set contains a visible element.
    ///
    /// An empty resolved set reports not-visible rather than erroring.
    async fn is_visible(&self, locator: &Locator) -> SuiteResult<bool>;

    /// Select an option by value on a `<select>` element
    async fn select_option(&self, locator: &Locator, value: &str) -> SuiteResult<()>;

    /// Suspend until the page URL matches the pattern
    async fn wait_for_url(&self, pattern: &UrlPattern, timeout: Duration) -> SuiteResult<()>;

    /// Suspend until the locator resolves to a visible element
    async fn wait_for_selector(&self, locator: &Locator, timeout: Duration) -> SuiteResult<()>;
}

/// A scripted element for [`MockPage`]
#[derive(Debug, Clone)]
pub struct MockElement {
    /// Subtree text content
    pub text: String,
    /// Whether the element is visible
    pub visible: bool,
    /// Attribute map
    pub attributes: Vec<(String, String)>,
}

impl MockElement {
    /// Create a visible element with the given text
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            visible: true,
            attributes: Vec::new(),
        }
    }

    /// Mark the element hidden
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Attach an attribute
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }
}

#[derive(Debug, Default)]
struct MockState {
    url: String,
    dom: HashMap<String, Vec<MockElement>>,
    click_routes: HashMap<String, String>,
    history: Vec<String>,
}

/// Scripted page double for unit testing page objects.
///
/// Elements are registered under their CSS key; locator resolution applies
/// text filters and nth rules against the registered set. Descendant rules
/// look up the combined `"parent child"` key, which stands in for the fully
/// resolved child set. Waits are immediate: the condition either already
/// holds or the call fails with the timeout error.
#[derive(Debug, Clone, Default)]
pub struct MockPage {
    state: Arc<Mutex<MockState>>,
}

impl MockPage {
    /// Create a new empty mock page
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element under a CSS key
    pub fn add_element(&self, css: impl Into<String>, element: MockElement) {
        let mut state = self.state.lock().unwrap();
        state.dom.entry(css.into()).or_default().push(element);
    }

    /// Register several visible text elements under a CSS key
    pub fn add_text_elements<I, S>(&self, css: impl Into<String>, texts: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let css = css.into();
        for text in texts {
            self.add_element(css.clone(), MockElement::text(text));
        }
    }

    /// Remove every element registered under a CSS key
    pub fn clear_elements(&self, css: &str) {
        self.state.lock().unwrap().dom.remove(css);
    }

    /// Route a click on the given CSS key to a URL change
    pub fn route_click(&self, css: impl Into<String>, url: impl Into<String>) {
        self.state
            .lock()
            .unwrap()
            .click_routes
            .insert(css.into(), url.into());
    }

    /// Set the current URL
    pub fn set_url(&self, url: impl Into<String>) {
        self.state.lock().unwrap().url = url.into();
    }

    /// Recorded call history
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.state.lock().unwrap().history.clone()
    }

    /// Check if a call with the given prefix was recorded
    #[must_use]
    pub fn was_called(&self, prefix: &str) -> bool {
        self.state
            .lock()
            .unwrap()
            .history
            .iter()
            .any(|c| c.starts_with(prefix))
    }

    fn record(&self, call: String) {
        self.state.lock().unwrap().history.push(call);
    }

    fn lookup_key(locator: &Locator) -> String {
        let base = locator.selector().base_css();
        match locator.descendant_css() {
            Some(child) => format!("{base} {child}"),
            None => base,
        }
    }

    fn resolve(&self, locator: &Locator) -> Vec<MockElement> {
        let state = self.state.lock().unwrap();
        let mut els: Vec<MockElement> = state
            .dom
            .get(&Self::lookup_key(locator))
            .cloned()
            .unwrap_or_default();
        // Text filters address the parent subtree; a flat mock cannot model
        // subtree relationships, so a combined-key registration stands in
        // for the filtered descendant set and the filter is skipped there.
        if locator.descendant_css().is_none() {
            if let Some(filter) = locator.selector().text_filter() {
                els.retain(|el| el.text.contains(filter));
            }
        }
        if let Some(n) = locator.index() {
            els = els.into_iter().nth(n).into_iter().collect();
        }
        els
    }

    fn require_match(&self, locator: &Locator) -> SuiteResult<MockElement> {
        self.resolve(locator).into_iter().next().ok_or_else(|| {
            SuiteError::ElementTimeout {
                locator: locator.to_string(),
                ms: DEFAULT_ELEMENT_TIMEOUT_MS,
            }
        })
    }
}

#[async_trait]
impl PageDriver for MockPage {
    async fn goto(&self, url: &str) -> SuiteResult<()> {
        self.record(format!("goto {url}"));
        self.set_url(url);
        Ok(())
    }

    async fn current_url(&self) -> SuiteResult<String> {
        Ok(self.state.lock().unwrap().url.clone())
    }

    async fn click(&self, locator: &Locator) -> SuiteResult<()> {
        self.require_match(locator)?;
        self.record(format!("click {locator}"));
        let key = Self::lookup_key(locator);
        let route = self.state.lock().unwrap().click_routes.get(&key).cloned();
        if let Some(url) = route {
            self.set_url(url);
        }
        Ok(())
    }

    async fn fill(&self, locator: &Locator, text: &str) -> SuiteResult<()> {
        self.require_match(locator)?;
        self.record(format!("fill {locator} = {text:?}"));
        Ok(())
    }

    async fn text_content(&self, locator: &Locator) -> SuiteResult<Option<String>> {
        Ok(self.resolve(locator).into_iter().next().map(|el| el.text))
    }

    async fn all_text_contents(&self, locator: &Locator) -> SuiteResult<Vec<String>> {
        Ok(self.resolve(locator).into_iter().map(|el| el.text).collect())
    }

    async fn get_attribute(&self, locator: &Locator, name: &str) -> SuiteResult<Option<String>> {
        Ok(self.resolve(locator).into_iter().next().and_then(|el| {
            el.attributes
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone())
        }))
    }

    async fn count(&self, locator: &Locator) -> SuiteResult<usize> {
        Ok(self.resolve(locator).len())
    }

    async fn is_visible(&self, locator: &Locator) -> SuiteResult<bool> {
        Ok(self.resolve(locator).iter().any(|el| el.visible))
    }

    async fn select_option(&self, locator: &Locator, value: &str) -> SuiteResult<()> {
        self.require_match(locator)?;
        self.record(format!("select {locator} = {value}"));
        Ok(())
    }

    async fn wait_for_url(&self, pattern: &UrlPattern, timeout: Duration) -> SuiteResult<()> {
        let url = self.state.lock().unwrap().url.clone();
        if pattern.matches(&url) {
            Ok(())
        } else {
            Err(SuiteError::NavigationTimeout {
                pattern: pattern.to_string(),
                ms: timeout.as_millis() as u64,
            })
        }
    }

    async fn wait_for_selector(&self, locator: &Locator, timeout: Duration) -> SuiteResult<()> {
        if self.resolve(locator).iter().any(|el| el.visible) {
            Ok(())
        } else {
            Err(SuiteError::ElementTimeout {
                locator: locator.to_string(),
                ms: timeout.as_millis() as u64,
            })
        }
    }
}
