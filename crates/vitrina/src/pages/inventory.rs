//! Inventory (product listing) page object.

use super::{MenuItem, ProductDetails, SocialLink, SortMode};
use crate::driver::PageDriver;
use crate::locator::Locator;
use crate::result::SuiteResult;
use crate::wait;

const ADD_TO_CART_CSS: &str = "button[data-test*=\"add-to-cart\"]";

/// Page object for the product listing shown after login
pub struct InventoryPage<D> {
    page: D,
    product_container: Locator,
    product_items: Locator,
    sort_dropdown: Locator,
    add_to_cart_buttons: Locator,
    cart_badge: Locator,
    hamburger_button: Locator,
    menu_wrap: Locator,
}

impl<D: PageDriver> InventoryPage<D> {
    /// Bind an inventory page object to a page handle
    pub fn new(page: D) -> Self {
        Self {
            page,
            product_container: Locator::css(".inventory_container"),
            product_items: Locator::css(".inventory_item"),
            sort_dropdown: Locator::css("[data-test=\"product_sort_container\"]"),
            add_to_cart_buttons: Locator::attribute_contains("data-test", "add-to-cart"),
            cart_badge: Locator::css(".shopping_cart_badge"),
            hamburger_button: Locator::css("#react-burger-menu-btn"),
            menu_wrap: Locator::css(".bm-menu-wrap"),
        }
    }

    /// Whether the product container is visible
    pub async fn is_visible(&self) -> SuiteResult<bool> {
        self.page.is_visible(&self.product_container).await
    }

    /// Number of product cards on the page
    pub async fn product_count(&self) -> SuiteResult<usize> {
        self.page.count(&self.product_items).await
    }

    /// Product titles in display order
    pub async fn product_titles(&self) -> SuiteResult<Vec<String>> {
        self.page
            .all_text_contents(&self.product_items.clone().descendant(".inventory_item_name"))
            .await
    }

    /// Product prices in display order
    pub async fn product_prices(&self) -> SuiteResult<Vec<String>> {
        self.page
            .all_text_contents(&self.product_items.clone().descendant(".inventory_item_price"))
            .await
    }

    /// Full details of the product card at a 0-based index
    pub async fn product_details(&self, index: usize) -> SuiteResult<ProductDetails> {
        let card = self.product_items.clone().nth(index);
        let title = self
            .page
            .text_content(&card.clone().descendant(".inventory_item_name"))
            .await?
            .unwrap_or_default();
        let price = self
            .page
            .text_content(&card.clone().descendant(".inventory_item_price"))
            .await?
            .unwrap_or_default();
        let description = self
            .page
            .text_content(&card.descendant(".inventory_item_desc"))
            .await?
            .unwrap_or_default();
        Ok(ProductDetails {
            title,
            price,
            description,
        })
    }

    /// Add the product at a 0-based index to the cart
    pub async fn add_to_cart(&self, index: usize) -> SuiteResult<()> {
        self.page
            .click(&self.add_to_cart_buttons.clone().nth(index))
            .await
    }

    /// Add a product to the cart by name.
    ///
    /// Resolves to the first product card whose subtree text contains `name`
    /// (case-sensitive) and clicks its add-to-cart control. If nothing
    /// matches, the driver's element timeout surfaces; the page object adds
    /// no signal of its own.
    pub async fn add_to_cart_by_name(&self, name: &str) -> SuiteResult<()> {
        tracing::info!(product = name, "adding to cart");
        let button = self
            .product_items
            .clone()
            .with_text(name)
            .first()
            .descendant(ADD_TO_CART_CSS);
        self.page.click(&button).await
    }

    /// Cart badge text, "0" when the badge is absent (zero items)
    pub async fn cart_badge_text(&self) -> SuiteResult<String> {
        Ok(self
            .page
            .text_content(&self.cart_badge)
            .await?
            .unwrap_or_else(|| "0".to_string()))
    }

    /// Click the hamburger menu toggle.
    ///
    /// Returns without waiting for the menu animation; callers synchronize
    /// separately if they need the open state.
    pub async fn open_hamburger_menu(&self) -> SuiteResult<()> {
        self.page.click(&self.hamburger_button).await
    }

    /// Whether the hamburger menu button is visible
    pub async fn is_hamburger_menu_visible(&self) -> SuiteResult<bool> {
        self.page.is_visible(&self.hamburger_button).await
    }

    /// Open the hamburger menu and suspend until the slide-out is visible
    pub async fn open_menu(&self) -> SuiteResult<()> {
        self.page.click(&self.hamburger_button).await?;
        self.page
            .wait_for_selector(&self.menu_wrap, wait::element_timeout())
            .await
    }

    /// Whether a menu entry is visible in the open slide-out
    pub async fn is_menu_item_visible(&self, item: MenuItem) -> SuiteResult<bool> {
        self.page.is_visible(&Locator::css(item.css())).await
    }

    /// Click Logout in the open menu and suspend until the login form is back
    pub async fn logout(&self) -> SuiteResult<()> {
        tracing::info!("logging out");
        self.page.click(&Locator::css(MenuItem::Logout.css())).await?;
        self.page
            .wait_for_selector(&Locator::css(".login_container"), wait::element_timeout())
            .await
    }

    /// `href` of a footer social link, `None` when the attribute is absent
    pub async fn social_link_href(&self, link: SocialLink) -> SuiteResult<Option<String>> {
        self.page
            .get_attribute(&Locator::css(link.css()), "href")
            .await
    }

    /// Whether a footer social link is visible
    pub async fn is_social_link_visible(&self, link: SocialLink) -> SuiteResult<bool> {
        self.page.is_visible(&Locator::css(link.css())).await
    }

    /// Select a sort mode on the sort control
    pub async fn sort_by(&self, mode: SortMode) -> SuiteResult<()> {
        self.page
            .select_option(&self.sort_dropdown, mode.option_value())
            .await
    }

    /// Whether a product card containing the given text is visible.
    ///
    /// An empty filtered set reports not-visible rather than erroring.
    pub async fn verify_product_card_visible(&self, name: &str) -> SuiteResult<bool> {
        self.page
            .is_visible(&self.product_items.clone().with_text(name))
            .await
    }
}
