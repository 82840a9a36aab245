use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::currency::Currency;
use super::enums::MenuCategory;
use super::ServiceResult;

/// Menu item as served by the remote menu API. Read-only to the cart engine;
/// the remote collaborator owns its lifecycle.
///
/// The `currency` field is kept as the raw wire string and parsed at the
/// cart boundary so one exotic item cannot fail a whole list fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    pub category: MenuCategory,
    #[serde(default)]
    pub currency: Option<String>,
    pub is_available: bool,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl MenuItem {
    /// The item's pricing currency; absent on the wire means USD, unknown
    /// codes are rejected as `UnsupportedCurrency`.
    pub fn pricing_currency(&self) -> ServiceResult<Currency> {
        Currency::from_wire(self.currency.as_deref())
    }
}

/// Request model for creating a menu item through the admin surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMenuItemRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    pub category: MenuCategory,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default = "default_is_available")]
    pub is_available: bool,
}

fn default_is_available() -> bool {
    true
}

/// Request model for updating an existing menu item
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateMenuItemRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<MenuCategory>,
    pub currency: Option<String>,
    pub is_available: Option<bool>,
}

/// Response model for menu listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuListResponse {
    pub items: Vec<MenuItem>,
    pub total_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ServiceError;
    use rust_decimal_macros::dec;

    pub fn sample_item(id: i64, price: Decimal, currency: Option<&str>) -> MenuItem {
        MenuItem {
            id,
            name: format!("Item {}", id),
            description: "A sample menu item".to_string(),
            price,
            category: MenuCategory::Food,
            currency: currency.map(str::to_string),
            is_available: true,
            image: None,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        }
    }

    #[test]
    fn test_pricing_currency_defaults_to_usd() {
        let item = sample_item(1, dec!(9.50), None);
        assert_eq!(item.pricing_currency().unwrap(), Currency::Usd);
    }

    #[test]
    fn test_pricing_currency_parses_wire_code() {
        let item = sample_item(1, dec!(250.00), Some("php"));
        assert_eq!(item.pricing_currency().unwrap(), Currency::Php);
    }

    #[test]
    fn test_pricing_currency_rejects_unknown_code() {
        let item = sample_item(1, dec!(9.50), Some("EUR"));
        assert!(matches!(
            item.pricing_currency(),
            Err(ServiceError::UnsupportedCurrency { .. })
        ));
    }

    #[test]
    fn test_deserialize_minimal_wire_record() {
        let json = r#"{
            "id": 7,
            "name": "Sinigang",
            "price": "185.00",
            "category": "FOOD",
            "is_available": true
        }"#;

        let item: MenuItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, 7);
        assert_eq!(item.price, dec!(185.00));
        assert_eq!(item.currency, None);
        assert_eq!(item.description, "");
    }

    #[test]
    fn test_serde_round_trip() {
        let item = sample_item(3, dec!(12.99), Some("USD"));
        let json = serde_json::to_string(&item).unwrap();
        let back: MenuItem = serde_json::from_str(&json).unwrap();
        assert_eq!(item, back);
    }
}
