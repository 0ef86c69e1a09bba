/// Errors raised by local validation, before any request goes out.
pub mod error;
pub mod validation;
