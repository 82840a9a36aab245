// Re-export all model types
pub use self::cart::*;
pub use self::currency::*;
pub use self::dashboard::*;
pub use self::enums::*;
pub use self::errors::*;
pub use self::menu::*;
pub use self::order::*;
pub use self::validation::*;

mod cart;
mod currency;
mod dashboard;
mod enums;
mod errors;
mod menu;
mod order;
mod validation;
