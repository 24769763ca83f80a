mod eth_methods;
mod method_descriptor;
mod method_registry;
mod wire_request;

pub use eth_methods::eth_methods;
pub use method_descriptor::{MethodDescriptor, PayloadTransform, reverse_params};
pub use method_registry::MethodRegistry;
pub use wire_request::{JsonRpcRequest, WireRequest};
