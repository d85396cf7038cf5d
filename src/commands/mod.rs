//! Command dispatch.
//!
//! A parsed [`Commands`] value is first validated into a [`Request`] without
//! touching configuration or the network. Only a valid request is sent.

mod request;

pub use request::Request;

use serde_json::Value;

use crate::error::{AppError, Result};

/// Render a response as pretty-printed JSON with two-space indentation.
pub fn render(value: &Value) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::Output(e.to_string()))
}
