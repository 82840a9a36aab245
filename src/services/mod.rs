// Services module - business logic layer

pub mod cart_service;
pub mod dashboard_service;
pub mod menu_service;
pub mod order_service;
pub mod rate_service;

pub use cart_service::CartService;
pub use dashboard_service::DashboardService;
pub use menu_service::MenuService;
pub use order_service::OrderService;
pub use rate_service::ExchangeRates;
