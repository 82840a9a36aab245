use thiserror::Error;

/// Service-level errors surfaced by the cart, order, and proxy services
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Unsupported currency: {code}")]
    UnsupportedCurrency { code: String },

    #[error("Please provide a customer ID")]
    MissingCustomerId,

    #[error("Please provide a customer name")]
    MissingCustomerName,

    #[error("Your cart is empty")]
    EmptyCart,

    #[error("An order submission is already in progress")]
    SubmissionInProgress,

    #[error("Failed to place order: {message}")]
    OrderSubmitFailed { message: String },

    #[error("Menu item not found: {item_id}")]
    MenuItemNotFound { item_id: i64 },

    #[error("Menu item unavailable: {item_id}")]
    ItemUnavailable { item_id: i64 },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Upstream API error: {source}")]
    Api {
        #[from]
        source: ApiError,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Client-level errors for calls against the remote REST API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request to {endpoint} failed: {message}")]
    Request { endpoint: String, message: String },

    #[error("{endpoint} returned status {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("Failed to decode response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

impl ApiError {
    /// Human-readable detail suitable for surfacing verbatim to the caller.
    pub fn detail(&self) -> String {
        self.to_string()
    }
}

/// Validation errors for input data
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredField { field: String },

    #[error("Invalid field value: {field}={value}, reason={reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Field too long: {field}, max_length={max_length}, actual_length={actual_length}")]
    TooLong {
        field: String,
        max_length: usize,
        actual_length: usize,
    },
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::ValidationError {
            message: err.to_string(),
        }
    }
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Result type alias for remote API client operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Result type alias for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;
