//! Cart page object.

use crate::driver::PageDriver;
use crate::locator::Locator;
use crate::result::SuiteResult;
use crate::wait::{self, UrlPattern};

const REMOVE_BUTTON_CSS: &str = "button[data-test*=\"remove\"]";

/// Page object for the shopping cart
pub struct CartPage<D> {
    page: D,
    cart_container: Locator,
    cart_items: Locator,
    item_names: Locator,
    item_prices: Locator,
    continue_shopping_button: Locator,
    checkout_button: Locator,
    remove_buttons: Locator,
    cart_badge: Locator,
    empty_cart_message: Locator,
}

impl<D: PageDriver> CartPage<D> {
    /// Bind a cart page object to a page handle
    pub fn new(page: D) -> Self {
        Self {
            page,
            cart_container: Locator::css(".cart_list"),
            cart_items: Locator::css(".cart_item"),
            item_names: Locator::css(".inventory_item_name"),
            item_prices: Locator::css(".inventory_item_price"),
            continue_shopping_button: Locator::css("#continue-shopping"),
            checkout_button: Locator::css("#checkout"),
            remove_buttons: Locator::attribute_contains("data-test", "remove"),
            cart_badge: Locator::css(".shopping_cart_badge"),
            empty_cart_message: Locator::css(".empty_message"),
        }
    }

    /// Navigate directly to the cart page
    pub async fn open(&self, base_url: &str) -> SuiteResult<()> {
        self.page
            .goto(&format!("{}/cart.html", base_url.trim_end_matches('/')))
            .await
    }

    /// Whether the cart container is visible
    pub async fn is_visible(&self) -> SuiteResult<bool> {
        self.page.is_visible(&self.cart_container).await
    }

    /// Number of items in the cart
    pub async fn item_count(&self) -> SuiteResult<usize> {
        self.page.count(&self.cart_items).await
    }

    /// Item names in display order
    pub async fn item_names(&self) -> SuiteResult<Vec<String>> {
        self.page.all_text_contents(&self.item_names).await
    }

    /// Item prices in display order
    pub async fn item_prices(&self) -> SuiteResult<Vec<String>> {
        self.page.all_text_contents(&self.item_prices).await
    }

    /// Whether any item name contains the given product name
    pub async fn contains_product(&self, name: &str) -> SuiteResult<bool> {
        Ok(self
            .item_names()
            .await?
            .iter()
            .any(|item| item.contains(name)))
    }

    /// Remove the item at a 0-based index
    pub async fn remove_from_cart(&self, index: usize) -> SuiteResult<()> {
        self.page
            .click(&self.remove_buttons.clone().nth(index))
            .await
    }

    /// Remove an item by name, first contained-text match wins.
    ///
    /// A missing match surfaces as the driver's element timeout.
    pub async fn remove_from_cart_by_name(&self, name: &str) -> SuiteResult<()> {
        tracing::info!(product = name, "removing from cart");
        let button = self
            .cart_items
            .clone()
            .with_text(name)
            .first()
            .descendant(REMOVE_BUTTON_CSS);
        self.page.click(&button).await
    }

    /// Click continue-shopping and suspend until back on the product listing
    pub async fn continue_shopping(&self) -> SuiteResult<()> {
        self.page.click(&self.continue_shopping_button).await?;
        self.page
            .wait_for_url(&UrlPattern::inventory(), wait::navigation_timeout())
            .await
    }

    /// Click checkout and suspend until the first checkout step is reached
    pub async fn checkout(&self) -> SuiteResult<()> {
        self.page.click(&self.checkout_button).await?;
        self.page
            .wait_for_url(&UrlPattern::checkout_step_one(), wait::navigation_timeout())
            .await
    }

    /// Whether the checkout button is visible
    pub async fn is_checkout_button_visible(&self) -> SuiteResult<bool> {
        self.page.is_visible(&self.checkout_button).await
    }

    /// Whether the continue-shopping button is visible
    pub async fn is_continue_shopping_button_visible(&self) -> SuiteResult<bool> {
        self.page.is_visible(&self.continue_shopping_button).await
    }

    /// Whether the empty-cart message is visible
    pub async fn is_cart_empty(&self) -> SuiteResult<bool> {
        self.page.is_visible(&self.empty_cart_message).await
    }

    /// Cart badge text, "0" when the badge is absent
    pub async fn badge_text(&self) -> SuiteResult<String> {
        Ok(self
            .page
            .text_content(&self.cart_badge)
            .await?
            .unwrap_or_else(|| "0".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{MockElement, MockPage};
    use crate::result::SuiteError;

    fn cart_dom() -> MockPage {
        let page = MockPage::new();
        page.add_element(".cart_list", MockElement::text(""));
        page.add_text_elements(
            ".cart_item",
            [
                "1 Sauce Labs Backpack $29.99 Remove",
                "1 Sauce Labs Bike Light $9.99 Remove",
            ],
        );
        page.add_text_elements(
            ".inventory_item_name",
            ["Sauce Labs Backpack", "Sauce Labs Bike Light"],
        );
        page.add_text_elements(".inventory_item_price", ["$29.99", "$9.99"]);
        page.add_text_elements("[data-test*=\"remove\"]", ["Remove", "Remove"]);
        page.add_element("#continue-shopping", MockElement::text("Continue Shopping"));
        page.add_element("#checkout", MockElement::text("Checkout"));
        page.add_element(".shopping_cart_badge", MockElement::text("2"));
        page.set_url("https://www.saucedemo.com/cart.html");
        page
    }

    #[tokio::test]
    async fn test_open_navigates_to_cart_url() {
        let page = MockPage::new();
        let cart = CartPage::new(page.clone());

        cart.open("https://www.saucedemo.com").await.unwrap();
        assert_eq!(
            page.current_url().await.unwrap(),
            "https://www.saucedemo.com/cart.html"
        );
    }

    #[tokio::test]
    async fn test_item_queries() {
        let page = cart_dom();
        let cart = CartPage::new(page.clone());

        assert!(cart.is_visible().await.unwrap());
        assert_eq!(cart.item_count().await.unwrap(), 2);
        assert_eq!(
            cart.item_names().await.unwrap(),
            vec!["Sauce Labs Backpack", "Sauce Labs Bike Light"]
        );
        assert_eq!(cart.item_prices().await.unwrap(), vec!["$29.99", "$9.99"]);
        assert_eq!(cart.badge_text().await.unwrap(), "2");
    }

    #[tokio::test]
    async fn test_membership_is_substring_containment() {
        let page = cart_dom();
        let cart = CartPage::new(page.clone());

        assert!(cart.contains_product("Backpack").await.unwrap());
        assert!(cart.contains_product("Sauce Labs Bike Light").await.unwrap());
        assert!(!cart.contains_product("Fleece Jacket").await.unwrap());
    }

    #[tokio::test]
    async fn test_remove_by_name_clicks_first_match() {
        let page = cart_dom();
        page.add_text_elements(
            ".cart_item button[data-test*=\"remove\"]",
            ["Remove"],
        );
        let cart = CartPage::new(page.clone());

        cart.remove_from_cart_by_name("Bike Light").await.unwrap();
        assert!(page.was_called("click .cart_item :has-text(\"Bike Light\")"));
    }

    #[tokio::test]
    async fn test_remove_missing_item_surfaces_timeout() {
        let page = cart_dom();
        let cart = CartPage::new(page.clone());

        let err = cart
            .remove_from_cart_by_name("Fleece Jacket")
            .await
            .unwrap_err();
        assert!(matches!(err, SuiteError::ElementTimeout { .. }));
    }

    #[tokio::test]
    async fn test_continue_shopping_waits_for_inventory() {
        let page = cart_dom();
        page.route_click(
            "#continue-shopping",
            "https://www.saucedemo.com/inventory.html",
        );
        let cart = CartPage::new(page.clone());

        cart.continue_shopping().await.unwrap();
        assert!(UrlPattern::inventory().matches(&page.current_url().await.unwrap()));
    }

    #[tokio::test]
    async fn test_checkout_times_out_without_navigation() {
        let page = cart_dom();
        let cart = CartPage::new(page.clone());

        let err = cart.checkout().await.unwrap_err();
        assert!(matches!(err, SuiteError::NavigationTimeout { .. }));
    }

    #[tokio::test]
    async fn test_checkout_navigates_when_routed() {
        let page = cart_dom();
        page.route_click(
            "#checkout",
            "https://www.saucedemo.com/checkout-step-one.html",
        );
        let cart = CartPage::new(page.clone());

        cart.checkout().await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_cart_defaults() {
        let page = MockPage::new();
        page.add_element(".empty_message", MockElement::text("Your cart is empty"));
        let cart = CartPage::new(page.clone());

        assert!(cart.is_cart_empty().await.unwrap());
        assert_eq!(cart.item_count().await.unwrap(), 0);
        assert_eq!(cart.badge_text().await.unwrap(), "0");
        assert!(!cart.is_checkout_button_visible().await.unwrap());
    }
}
