use thiserror::Error;

/// An input argument failed validation while being encoded for the wire.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Provided address {0} is invalid")]
    InvalidAddress(String),

    #[error("Provided address {0} has an invalid checksum")]
    InvalidChecksum(String),

    #[error("Invalid block reference: {0}")]
    InvalidBlockRef(String),

    #[error("Given value {0} is not a valid number")]
    InvalidQuantity(String),

    #[error("Given value {0} is not a valid hex string")]
    InvalidHex(String),

    #[error("Expected {expected}, got {got}")]
    UnexpectedType { expected: &'static str, got: String },

    #[error("The send transactions \"from\" field must be defined")]
    MissingFrom,

    #[error("Transaction \"data\" and \"input\" are both set but differ")]
    ConflictingData,
}
