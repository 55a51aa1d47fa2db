pub mod json_extract;
pub mod logging;

pub use json_extract::{parse_json_response, strip_code_fence};
pub use logging::truncate_text;
