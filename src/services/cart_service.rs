use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::models::{
    validate_quantity, Cart, CartLine, CartLineView, CartResponse, Currency, MenuItem,
    ServiceError, ServiceResult,
};
use crate::services::ExchangeRates;

/// Session cart: the in-memory cart store plus the process-wide display
/// currency, shared across handlers.
///
/// Mutations take the write lock for a single short critical section, so
/// they are atomic with respect to each other; pricing reads convert under
/// the read lock using the latest committed exchange rate.
pub struct CartService {
    cart: RwLock<Cart>,
    display_currency: RwLock<Currency>,
    rates: Arc<ExchangeRates>,
}

impl CartService {
    /// Create a new CartService with an empty cart displaying USD.
    pub fn new(rates: Arc<ExchangeRates>) -> Self {
        Self {
            cart: RwLock::new(Cart::new()),
            display_currency: RwLock::new(Currency::Usd),
            rates,
        }
    }

    /// Current cart priced in the display currency.
    #[instrument(skip(self))]
    pub async fn view(&self) -> CartResponse {
        let display = *self.display_currency.read().await;
        let rate = self.rates.current().await;
        let cart = self.cart.read().await;
        build_response(&cart, display, rate)
    }

    /// Add a menu item to the cart, snapshotting its price and currency.
    ///
    /// A repeated add increments the existing line and keeps the snapshot
    /// from the first add. Unavailable items and items priced in an
    /// unsupported currency are rejected before the cart is touched.
    #[instrument(skip(self, item), fields(item_id = item.id, name = %item.name))]
    pub async fn add_item(&self, item: &MenuItem) -> ServiceResult<CartResponse> {
        if !item.is_available {
            return Err(ServiceError::ItemUnavailable { item_id: item.id });
        }
        let currency = item.pricing_currency()?;

        let display = *self.display_currency.read().await;
        let rate = self.rates.current().await;

        let mut cart = self.cart.write().await;
        cart.add_line(item.id, item.name.clone(), item.price, currency);
        info!(
            quantity = cart.line_quantity(item.id),
            "Item added to cart"
        );
        Ok(build_response(&cart, display, rate))
    }

    /// Set a line's quantity. Below 1 removes the line; an unknown item id
    /// is a valid idempotent no-op, not an error.
    #[instrument(skip(self), fields(item_id = %item_id, quantity = %quantity))]
    pub async fn set_quantity(&self, item_id: i64, quantity: i64) -> ServiceResult<CartResponse> {
        validate_quantity(quantity)?;

        let display = *self.display_currency.read().await;
        let rate = self.rates.current().await;

        let mut cart = self.cart.write().await;
        if cart.set_quantity(item_id, quantity) {
            info!("Cart line quantity updated");
        } else {
            debug!("Quantity update for absent line ignored");
        }
        Ok(build_response(&cart, display, rate))
    }

    /// Remove a line if present; absent lines are a no-op.
    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn remove_item(&self, item_id: i64) -> CartResponse {
        let display = *self.display_currency.read().await;
        let rate = self.rates.current().await;

        let mut cart = self.cart.write().await;
        if cart.remove_line(item_id) {
            info!("Cart line removed");
        }
        build_response(&cart, display, rate)
    }

    /// Empty the cart.
    #[instrument(skip(self))]
    pub async fn clear(&self) {
        let mut cart = self.cart.write().await;
        cart.clear();
        info!("Cart cleared");
    }

    /// Snapshot of the current lines, for order assembly and display.
    pub async fn snapshot(&self) -> Vec<CartLine> {
        self.cart.read().await.lines().to_vec()
    }

    pub async fn is_empty(&self) -> bool {
        self.cart.read().await.is_empty()
    }

    /// The currency amounts are currently rendered in.
    pub async fn display_currency(&self) -> Currency {
        *self.display_currency.read().await
    }

    /// Switch the display currency. Stored snapshots are untouched; only
    /// rendering and aggregation change.
    #[instrument(skip(self), fields(currency = %currency))]
    pub async fn set_display_currency(&self, currency: Currency) -> Currency {
        let mut display = self.display_currency.write().await;
        *display = currency;
        info!("Display currency updated");
        currency
    }

    /// The exchange rate currently used for pricing.
    pub async fn current_rate(&self) -> rust_decimal::Decimal {
        self.rates.current().await
    }
}

fn build_response(cart: &Cart, display: Currency, rate: rust_decimal::Decimal) -> CartResponse {
    let lines: Vec<CartLineView> = cart
        .lines()
        .iter()
        .map(|line| CartLineView {
            item_id: line.item_id,
            name: line.name.clone(),
            quantity: line.quantity,
            original_price: line.original_price,
            original_currency: line.original_currency,
            unit_price: line.unit_price_in(display, rate),
            line_total: line.amount_in(display, rate),
        })
        .collect();

    CartResponse {
        display_currency: display,
        exchange_rate: rate,
        lines,
        total_items: cart.total_items(),
        total_amount: cart.total_in(display, rate),
        updated_at: cart.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MenuCategory;
    use rust_decimal_macros::dec;

    fn service() -> CartService {
        CartService::new(Arc::new(ExchangeRates::fixed(dec!(56.5))))
    }

    fn menu_item(id: i64, price: rust_decimal::Decimal, currency: Option<&str>) -> MenuItem {
        MenuItem {
            id,
            name: format!("Item {}", id),
            description: String::new(),
            price,
            category: MenuCategory::Food,
            currency: currency.map(str::to_string),
            is_available: true,
            image: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_empty_cart_view() {
        let service = service();
        let view = service.view().await;

        assert_eq!(view.display_currency, Currency::Usd);
        assert_eq!(view.exchange_rate, dec!(56.5));
        assert!(view.lines.is_empty());
        assert_eq!(view.total_amount, dec!(0));
    }

    #[tokio::test]
    async fn test_add_item_snapshots_price_and_currency() {
        let service = service();
        let view = service
            .add_item(&menu_item(1, dec!(565.00), Some("PHP")))
            .await
            .unwrap();

        assert_eq!(view.lines.len(), 1);
        assert_eq!(view.lines[0].original_price, dec!(565.00));
        assert_eq!(view.lines[0].original_currency, Currency::Php);
        // Displayed in USD at 56.5
        assert_eq!(view.lines[0].unit_price, dec!(10));
        assert_eq!(view.total_amount, dec!(10));
    }

    #[tokio::test]
    async fn test_add_same_item_twice_merges_lines() {
        let service = service();
        let item = menu_item(1, dec!(10.00), None);
        service.add_item(&item).await.unwrap();
        let view = service.add_item(&item).await.unwrap();

        assert_eq!(view.lines.len(), 1);
        assert_eq!(view.lines[0].quantity, 2);
        assert_eq!(view.total_amount, dec!(20.00));
    }

    #[tokio::test]
    async fn test_add_keeps_snapshot_when_menu_price_changes() {
        let service = service();
        service.add_item(&menu_item(1, dec!(10.00), None)).await.unwrap();

        // Same item comes back from the menu repriced; the line keeps the
        // price it was first added at.
        let view = service
            .add_item(&menu_item(1, dec!(12.00), None))
            .await
            .unwrap();
        assert_eq!(view.lines[0].quantity, 2);
        assert_eq!(view.lines[0].original_price, dec!(10.00));
        assert_eq!(view.total_amount, dec!(20.00));
    }

    #[tokio::test]
    async fn test_add_unavailable_item_is_rejected() {
        let service = service();
        let mut item = menu_item(1, dec!(10.00), None);
        item.is_available = false;

        let err = service.add_item(&item).await.unwrap_err();
        assert!(matches!(err, ServiceError::ItemUnavailable { item_id: 1 }));
        assert!(service.is_empty().await);
    }

    #[tokio::test]
    async fn test_add_unsupported_currency_is_rejected() {
        let service = service();
        let err = service
            .add_item(&menu_item(1, dec!(10.00), Some("EUR")))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::UnsupportedCurrency { .. }));
        assert!(service.is_empty().await);
    }

    #[tokio::test]
    async fn test_set_quantity_below_one_removes_line() {
        let service = service();
        service.add_item(&menu_item(1, dec!(10.00), None)).await.unwrap();

        let view = service.set_quantity(1, 0).await.unwrap();
        assert!(view.lines.is_empty());

        service.add_item(&menu_item(2, dec!(5.00), None)).await.unwrap();
        let view = service.set_quantity(2, -1).await.unwrap();
        assert!(view.lines.is_empty());
    }

    #[tokio::test]
    async fn test_set_quantity_on_missing_line_is_noop() {
        let service = service();
        service.add_item(&menu_item(1, dec!(10.00), None)).await.unwrap();

        let view = service.set_quantity(999, 5).await.unwrap();
        assert_eq!(view.lines.len(), 1);
        assert_eq!(view.lines[0].quantity, 1);
    }

    #[tokio::test]
    async fn test_display_currency_switch_changes_view_not_snapshots() {
        let service = service();
        service.add_item(&menu_item(1, dec!(10.00), None)).await.unwrap();

        service.set_display_currency(Currency::Php).await;
        let view = service.view().await;

        assert_eq!(view.display_currency, Currency::Php);
        assert_eq!(view.lines[0].original_currency, Currency::Usd);
        assert_eq!(view.lines[0].original_price, dec!(10.00));
        assert_eq!(view.lines[0].unit_price, dec!(565.000));
        assert_eq!(view.total_amount, dec!(565.000));
    }

    #[tokio::test]
    async fn test_mixed_currency_totals_match_reference_scenario() {
        // cart = [2 x 10.00 USD, 1 x 565.00 PHP] at 56.5 PHP/USD
        let service = service();
        let usd_item = menu_item(1, dec!(10.00), Some("USD"));
        service.add_item(&usd_item).await.unwrap();
        service.add_item(&usd_item).await.unwrap();
        service
            .add_item(&menu_item(2, dec!(565.00), Some("PHP")))
            .await
            .unwrap();

        let usd_view = service.view().await;
        assert_eq!(usd_view.lines[0].line_total, dec!(20.00));
        assert_eq!(usd_view.lines[1].line_total, dec!(10));
        assert_eq!(usd_view.total_amount, dec!(30.00));

        service.set_display_currency(Currency::Php).await;
        let php_view = service.view().await;
        assert_eq!(php_view.lines[0].line_total, dec!(1130.000));
        assert_eq!(php_view.lines[1].line_total, dec!(565.00));
        assert_eq!(php_view.total_amount, dec!(1695.000));
    }

    #[tokio::test]
    async fn test_clear() {
        let service = service();
        service.add_item(&menu_item(1, dec!(10.00), None)).await.unwrap();
        service.clear().await;
        assert!(service.is_empty().await);
    }
}
