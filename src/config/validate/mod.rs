//! Configuration validation
//!
//! Rejects unusable run configurations before any data is read or any
//! output directory is created.

mod error;
mod validator;


pub use error::ValidationError;
pub use validator::validate_config;
