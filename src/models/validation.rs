use rust_decimal::Decimal;

use super::{
    CreateMenuItemRequest, UpdateMenuItemRequest, UpdateOrderDraftRequest, ValidationError,
    ValidationResult,
};

/// Trait for validating input models
pub trait Validate {
    fn validate(&self) -> ValidationResult<()>;
}

pub const MAX_ITEM_NAME_LENGTH: usize = 200;
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;
pub const MAX_CUSTOMER_ID_LENGTH: usize = 64;
pub const MAX_CUSTOMER_NAME_LENGTH: usize = 200;
pub const MAX_LINE_QUANTITY: i64 = 1000;

impl Validate for CreateMenuItemRequest {
    fn validate(&self) -> ValidationResult<()> {
        validate_item_name(&self.name)?;
        validate_description(&self.description)?;
        validate_price(&self.price)?;
        Ok(())
    }
}

impl Validate for UpdateMenuItemRequest {
    fn validate(&self) -> ValidationResult<()> {
        if let Some(name) = &self.name {
            validate_item_name(name)?;
        }
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        if let Some(price) = &self.price {
            validate_price(price)?;
        }
        Ok(())
    }
}

impl Validate for UpdateOrderDraftRequest {
    fn validate(&self) -> ValidationResult<()> {
        if let Some(customer_id) = &self.customer_id {
            validate_length("customer_id", customer_id, MAX_CUSTOMER_ID_LENGTH)?;
        }
        if let Some(customer_name) = &self.customer_name {
            validate_length("customer_name", customer_name, MAX_CUSTOMER_NAME_LENGTH)?;
        }
        Ok(())
    }
}

/// Validate a menu item name
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::RequiredField {
            field: "name".to_string(),
        });
    }

    if trimmed.len() > MAX_ITEM_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max_length: MAX_ITEM_NAME_LENGTH,
            actual_length: trimmed.len(),
        });
    }

    if trimmed
        .chars()
        .any(|c| c.is_control() && c != '\n' && c != '\r' && c != '\t')
    {
        return Err(ValidationError::InvalidValue {
            field: "name".to_string(),
            value: name.to_string(),
            reason: "Contains invalid control characters".to_string(),
        });
    }

    Ok(())
}

/// Validate a menu item description
pub fn validate_description(description: &str) -> ValidationResult<()> {
    if description.len() > MAX_DESCRIPTION_LENGTH {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max_length: MAX_DESCRIPTION_LENGTH,
            actual_length: description.len(),
        });
    }
    Ok(())
}

/// Validate a menu item price
pub fn validate_price(price: &Decimal) -> ValidationResult<()> {
    if price.is_sign_negative() {
        return Err(ValidationError::InvalidValue {
            field: "price".to_string(),
            value: price.to_string(),
            reason: "Price cannot be negative".to_string(),
        });
    }
    Ok(())
}

/// Validate a requested cart line quantity. Values below 1 are legal input
/// (they remove the line) but runaway values are rejected.
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity > MAX_LINE_QUANTITY {
        return Err(ValidationError::InvalidValue {
            field: "quantity".to_string(),
            value: quantity.to_string(),
            reason: format!("Quantity cannot exceed {}", MAX_LINE_QUANTITY),
        });
    }
    Ok(())
}

fn validate_length(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.len() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max_length: max,
            actual_length: value.len(),
        });
    }
    Ok(())
}
