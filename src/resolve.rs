mod arg_shape;
mod call_resolver;

pub use arg_shape::ArgShape;
pub use call_resolver::CallResolver;
