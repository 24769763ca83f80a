mod next_request_id;

pub use next_request_id::next_request_id;
