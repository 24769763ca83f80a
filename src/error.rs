mod decode_error;
mod eth_wire_error;
mod format_error;
mod transport_error;

pub use decode_error::DecodeError;
pub use eth_wire_error::{EthWireError, EthWireResult};
pub use format_error::FormatError;
pub use transport_error::TransportError;
