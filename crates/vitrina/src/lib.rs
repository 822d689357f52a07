//! Vitrina: page-object end-to-end test suite for the Swag Labs demo storefront.
//!
//! Vitrina (Spanish: "shop window") models each page of the storefront as a
//! page object exposing high-level user actions and state queries, keeping
//! test assertions decoupled from raw selectors. Test cases can be fed from
//! `.xlsx` workbooks for data-driven parametrization.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                     VITRINA Architecture                          │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌──────────────┐   ┌────────────┐   ┌────────┐ │
//! │  │ Workbook  │   │ Test         │   │ Page       │   │ Page   │ │
//! │  │ (.xlsx)   │──►│ Scenarios    │──►│ Objects    │──►│ Driver │ │
//! │  │ records   │   │ (tests/)     │   │ (pages/)   │   │ (CDP)  │ │
//! │  └───────────┘   └──────────────┘   └────────────┘   └────────┘ │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Page objects never catch driver errors and never retry: waits are
//! explicit, timeouts surface verbatim, and the test decides pass or fail.

#![warn(missing_docs)]

pub mod config;
pub mod driver;
pub mod locator;
pub mod pages;
pub mod result;
pub mod wait;
pub mod workbook;

#[cfg(feature = "browser")]
pub mod browser;

pub use config::TestConfig;
pub use driver::{MockElement, MockPage, PageDriver};
pub use locator::{Locator, Selector};
pub use pages::{CartPage, InventoryPage, LoginPage, MenuItem, ProductDetails, SocialLink, SortMode};
pub use result::{SuiteError, SuiteResult};
pub use wait::UrlPattern;
pub use workbook::{CellValue, Record, Workbook, DEFAULT_SHEET_NAME};

#[cfg(feature = "browser")]
pub use browser::{Browser, BrowserConfig};
