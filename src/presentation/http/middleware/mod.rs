pub mod api_key;

pub use api_key::{ApiKey, require_api_key};
