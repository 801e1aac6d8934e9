//! Wire labels for domain enums.
//!
//! Domain enums serialise as `snake_case` strings. Requests and responses carry those strings
//! so the HTTP schema stays free of domain types.

use salvo::prelude::StatusError;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

/// Parse a wire label into a domain enum, answering 400 for unknown labels.
pub(crate) fn parse_label<T: DeserializeOwned>(field: &str, label: &str) -> Result<T, StatusError> {
    serde_json::from_value(Value::String(label.trim().to_ascii_lowercase()))
        .map_err(|_ignored| StatusError::bad_request().brief(format!("unknown {field}: {label}")))
}

/// Render a domain enum as its wire label.
pub(crate) trait LabelExt {
    fn label(&self) -> String;
}

impl<T: Serialize> LabelExt for T {
    fn label(&self) -> String {
        match serde_json::to_value(self) {
            Ok(Value::String(label)) => label,
            _ => String::new(),
        }
    }
}
