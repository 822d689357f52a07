//! Locator descriptors for element selection.
//!
//! A [`Locator`] is pure data: a declarative selector plus optional filter and
//! indexing rules. It is resolved against the live DOM on every driver call,
//! never at construction time, so a locator can never go stale across
//! navigations. Page objects hold locators, not element handles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Selector variants for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selector {
    /// CSS selector (e.g., ".inventory_item")
    Css(String),
    /// Attribute-substring match (e.g., `data-test` containing "add-to-cart")
    AttributeContains {
        /// Attribute name
        attribute: String,
        /// Substring the attribute value must contain
        value: String,
    },
    /// Any element whose subtree text contains the given string
    Text(String),
    /// CSS selector filtered by contained text
    CssWithText {
        /// Base CSS selector
        css: String,
        /// Text content to match (case-sensitive substring)
        text: String,
    },
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create an attribute-substring selector
    #[must_use]
    pub fn attribute_contains(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self::AttributeContains {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Create a text selector
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// The CSS form of this selector, ignoring any text filter.
    ///
    /// `Text` selectors have no CSS equivalent and render as the universal
    /// selector; the text filter is applied during resolution.
    #[must_use]
    pub fn base_css(&self) -> String {
        match self {
            Self::Css(s) => s.clone(),
            Self::AttributeContains { attribute, value } => {
                format!("[{attribute}*=\"{value}\"]")
            }
            Self::Text(_) => "*".to_string(),
            Self::CssWithText { css, .. } => css.clone(),
        }
    }

    /// The text filter carried by this selector, if any
    #[must_use]
    pub fn text_filter(&self) -> Option<&str> {
        match self {
            Self::Text(t) | Self::CssWithText { text: t, .. } => Some(t),
            Self::Css(_) | Self::AttributeContains { .. } => None,
        }
    }
}

/// A lazily-resolved locator: selector + optional filter/indexing rules.
///
/// Resolution yields zero or more live elements at call time. When multiple
/// elements match a text filter, first match wins; that tie-break is the
/// documented behavior, not an accident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locator {
    selector: Selector,
    /// 0-based index into the resolved set
    nth: Option<usize>,
    /// CSS selector resolved inside each matched element
    within: Option<String>,
}

impl Locator {
    /// Create a locator from a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::from_selector(Selector::css(selector))
    }

    /// Create a locator matching elements whose attribute contains a substring
    #[must_use]
    pub fn attribute_contains(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self::from_selector(Selector::attribute_contains(attribute, value))
    }

    /// Create a locator from a selector
    #[must_use]
    pub fn from_selector(selector: Selector) -> Self {
        Self {
            selector,
            nth: None,
            within: None,
        }
    }

    /// Filter by contained text (case-sensitive substring)
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        let selector = match self.selector {
            Selector::Css(css) | Selector::CssWithText { css, .. } => Selector::CssWithText {
                css,
                text: text.into(),
            },
            Selector::AttributeContains { attribute, value } => Selector::CssWithText {
                css: format!("[{attribute}*=\"{value}\"]"),
                text: text.into(),
            },
            Selector::Text(_) => Selector::Text(text.into()),
        };
        Self { selector, ..self }
    }

    /// Select the nth (0-based) element of the resolved set
    #[must_use]
    pub const fn nth(mut self, index: usize) -> Self {
        self.nth = Some(index);
        self
    }

    /// Select the first element of the resolved set
    #[must_use]
    pub const fn first(self) -> Self {
        self.nth(0)
    }

    /// Resolve a descendant inside each matched element
    #[must_use]
    pub fn descendant(mut self, css: impl Into<String>) -> Self {
        self.within = Some(css.into());
        self
    }

    /// Get the selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Get the index rule, if any
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        self.nth
    }

    /// Get the descendant rule, if any
    #[must_use]
    pub fn descendant_css(&self) -> Option<&str> {
        self.within.as_deref()
    }

    /// JavaScript expression evaluating to the array of matched elements.
    ///
    /// This is the single resolution path for the CDP driver: queries,
    /// actions and counts all start from this expression.
    #[must_use]
    pub fn to_elements_js(&self) -> String {
        let base = self.selector.base_css();
        let mut expr = format!("Array.from(document.querySelectorAll({base:?}))");
        if let Some(text) = self.selector.text_filter() {
            expr.push_str(&format!(
                ".filter(el => el.textContent.includes({text:?}))"
            ));
        }
        if let Some(n) = self.nth {
            expr.push_str(&format!(".slice({n}, {})", n + 1));
        }
        if let Some(ref child) = self.within {
            expr.push_str(&format!(
                ".map(el => el.querySelector({child:?})).filter(el => el !== null)"
            ));
        }
        expr
    }

    /// JavaScript expression evaluating to the match count
    #[must_use]
    pub fn to_count_js(&self) -> String {
        format!("{}.length", self.to_elements_js())
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.selector {
            Selector::Text(t) => write!(f, "text={t:?}")?,
            Selector::CssWithText { css, text } => write!(f, "{css} :has-text({text:?})")?,
            other => write!(f, "{}", other.base_css())?,
        }
        if let Some(n) = self.nth {
            write!(f, " >> nth={n}")?;
        }
        if let Some(ref child) = self.within {
            write!(f, " >> {child}")?;
        }
        Ok(())
    }
}
