//! Page objects for the demo storefront.
//!
//! Each page object binds one-to-one to a live page handle and exposes domain
//! actions and state queries over declared locators. The objects track no
//! state of their own: every query re-derives truth from the live DOM, so
//! there is nothing to desynchronize after a navigation.
//!
//! The implicit flow across pages is
//! `LoggedOut -> LoggedIn(Inventory) -> Cart -> CheckoutStepOne`, driven
//! entirely by the actions below.

mod cart;
mod inventory;
mod login;

pub use cart::CartPage;
pub use inventory::InventoryPage;
pub use login::LoginPage;

use crate::result::SuiteError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Full detail record for one product card
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetails {
    /// Product title
    pub title: String,
    /// Displayed price, including currency symbol
    pub price: String,
    /// Product description
    pub description: String,
}

/// Footer social-media links shown on the inventory page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SocialLink {
    /// Twitter profile link
    Twitter,
    /// Facebook page link
    Facebook,
    /// LinkedIn company link
    LinkedIn,
}

impl SocialLink {
    /// CSS selector for the link anchor in the footer
    #[must_use]
    pub const fn css(self) -> &'static str {
        match self {
            Self::Twitter => ".social_twitter a",
            Self::Facebook => ".social_facebook a",
            Self::LinkedIn => ".social_linkedin a",
        }
    }

    /// Domain the link is expected to point at
    #[must_use]
    pub const fn domain(self) -> &'static str {
        match self {
            Self::Twitter => "twitter.com",
            Self::Facebook => "facebook.com",
            Self::LinkedIn => "linkedin.com",
        }
    }
}

/// Entries of the hamburger slide-out menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuItem {
    /// All Items, back to the product listing
    AllItems,
    /// About, external Sauce Labs page
    About,
    /// Logout, back to the login form
    Logout,
    /// Reset App State, clears the cart
    ResetAppState,
}

impl MenuItem {
    /// CSS selector for the menu entry
    #[must_use]
    pub const fn css(self) -> &'static str {
        match self {
            Self::AllItems => "#inventory_sidebar_link",
            Self::About => "#about_sidebar_link",
            Self::Logout => "#logout_sidebar_link",
            Self::ResetAppState => "#reset_sidebar_link",
        }
    }
}

/// Sort modes offered by the inventory sort control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortMode {
    /// Price ascending
    PriceLowHigh,
    /// Price descending
    PriceHighLow,
    /// Name A to Z
    Name,
}

impl SortMode {
    /// The `<option>` value the sort control uses for this mode
    #[must_use]
    pub const fn option_value(self) -> &'static str {
        match self {
            Self::PriceLowHigh => "lohi",
            Self::PriceHighLow => "hilo",
            Self::Name => "az",
        }
    }
}

impl FromStr for SortMode {
    type Err = SuiteError;

    /// Parse the mode names used in data-driven input.
    ///
    /// An unknown mode is rejected at this boundary; once a [`SortMode`]
    /// exists it cannot be invalid.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "priceLowHigh" => Ok(Self::PriceLowHigh),
            "priceHighLow" => Ok(Self::PriceHighLow),
            "name" => Ok(Self::Name),
            other => Err(SuiteError::InvalidSortMode {
                mode: other.to_string(),
            }),
        }
    }
}
