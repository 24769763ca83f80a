use super::{DecodeError, FormatError, TransportError};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum EthWireError {
    /// Wrong number of logical arguments. Raised before any formatting or dispatch.
    #[error("Invalid number of parameters for \"{name}\". Got {got} expected {expected}!")]
    Arity {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error(transparent)]
    Format(#[from] FormatError),

    /// No descriptor is registered under the requested logical name.
    #[error("No descriptor registered for \"{0}\"")]
    Resolution(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Subscription timers need an async runtime that is not available.
    #[error("Runtime unavailable: {0}")]
    Runtime(String),
}

pub type EthWireResult<T> = std::result::Result<T, EthWireError>;
