pub mod error;
pub mod escape;

#[cfg(feature = "json")]
pub use serde_json;
