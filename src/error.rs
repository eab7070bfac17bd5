/// Local precondition failures, caught before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Your cart is empty.")]
    EmptyCart,

    #[error("Customer ID must be a positive integer (got {0}).")]
    InvalidCustomerId(i64),

    #[error("Shipping address is required.")]
    BlankShippingAddress,

    #[error("{0} is required.")]
    MissingField(&'static str),

    #[error("{field} must be a non-negative number (got {value}).")]
    InvalidNumber { field: &'static str, value: String },
}

#[derive(Debug, thiserror::Error)]
pub enum StorefrontError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("Malformed response body: {raw}")]
    MalformedBody { raw: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl StorefrontError {
    /// Whether the failure happened locally, before any request was issued.
    pub fn is_validation(&self) -> bool {
        matches!(self, StorefrontError::Validation(_))
    }

    /// HTTP status of a rejected request, if the service answered at all.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            StorefrontError::Status { status, .. } => Some(*status),
            StorefrontError::Http(e) => e.status(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, StorefrontError>;
