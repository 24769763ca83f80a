use thiserror::Error;

/// A wire result could not be interpreted by an output formatter.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Field `{field}` is not a valid quantity: {value}")]
    InvalidQuantity { field: String, value: String },

    #[error("Quantity {0} does not fit in 64 bits")]
    QuantityOverflow(String),

    #[error("Field `{field}` is not a valid address: {value}")]
    InvalidAddress { field: String, value: String },

    #[error("Unexpected result shape: expected {expected}, got {got}")]
    UnexpectedShape { expected: &'static str, got: String },
}
