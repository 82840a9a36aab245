use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Menu categories exposed by the remote menu API
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MenuCategory {
    Food,
    Drinks,
    Dessert,
}

impl fmt::Display for MenuCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuCategory::Food => write!(f, "FOOD"),
            MenuCategory::Drinks => write!(f, "DRINKS"),
            MenuCategory::Dessert => write!(f, "DESSERT"),
        }
    }
}

impl FromStr for MenuCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "FOOD" => Ok(MenuCategory::Food),
            "DRINKS" => Ok(MenuCategory::Drinks),
            "DESSERT" => Ok(MenuCategory::Dessert),
            _ => Err(format!("Invalid menu category: {}", s)),
        }
    }
}

/// Order lifecycle status accepted by the remote order API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Completed,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Completed => write!(f, "completed"),
        }
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "completed" => Ok(OrderStatus::Completed),
            _ => Err(format!("Invalid order status: {}", s)),
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}
