use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("invalid sensor payload: {0}")]
    Format(#[from] FormatError),

    #[error("failed to deliver notification: {0}")]
    Delivery(#[from] DeliveryError),
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("hex float must be exactly {expected} characters, got {actual}")]
    HexLength { expected: usize, actual: usize },

    #[error("invalid hex digit in {0:?}")]
    HexDigit(String),

    #[error("sensor data too short: expected at least {expected} bytes, got {actual}")]
    DataTooShort { expected: usize, actual: usize },

    #[error("invalid epoch seconds: {0:?}")]
    EpochSeconds(String),
}

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("webhook request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("webhook rejected message: HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
}

pub type Result<T> = std::result::Result<T, RelayError>;
