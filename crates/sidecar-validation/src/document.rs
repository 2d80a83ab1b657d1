//! Text ingestion ahead of validation
//!
//! A parse failure is its own error kind: the validator never sees text
//! that is not JSON, and the caller gets one synthetic root error.

use crate::issue::ValidationResult;
use crate::validator::validate;
use serde_json::Value;

/// A document after the parse and validate steps
#[derive(Debug, Clone, PartialEq)]
pub struct CheckedDocument {
    /// Decoded value; `None` when the text was not JSON
    pub value: Option<Value>,
    pub result: ValidationResult,
}

impl CheckedDocument {
    /// Decoded value if it may be rendered
    #[must_use]
    pub fn renderable_value(self) -> Option<Value> {
        if self.result.is_renderable() {
            self.value
        } else {
            None
        }
    }
}

/// Parse `text` as JSON and validate it
#[must_use]
pub fn parse_and_validate(text: &str) -> CheckedDocument {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => {
            let result = validate(&value);
            CheckedDocument {
                value: Some(value),
                result,
            }
        }
        Err(_) => CheckedDocument {
            value: None,
            result: ValidationResult::invalid_json(),
        },
    }
}
