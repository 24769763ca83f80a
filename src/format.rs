mod block_ref;
mod formatter_pipeline;
mod hex_quantity;
pub mod input_formatters;
pub mod output_formatters;

pub use block_ref::{BlockRef, BlockTag};
pub use formatter_pipeline::{FormatterPipeline, InputFormatFn, InputFormatter, OutputFormatFn};
pub use hex_quantity::{
    is_hex_strict, parse_address, parse_quantity, quantity_to_u64, strip_hex_prefix,
    to_hex_quantity, to_wire_address, utf8_to_hex,
};
