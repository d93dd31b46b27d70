//! Argument extraction helpers for tools.
//!
//! Arguments arrive as a JSON object already decoded by the provider adapter.
//!
//! ```rust
//! use serde_json::json;
//! use tltooling::{optional_string, string_or_default};
//!
//! let args = json!({"expression": "2^3"}).as_object().cloned().expect("object");
//! assert_eq!(string_or_default(&args, "expression"), "2^3");
//! assert_eq!(optional_string(&args, "format"), None);
//! ```

use serde_json::Value;
use tlprovider::ToolArguments;

pub fn optional_string<'a>(args: &'a ToolArguments, key: &str) -> Option<&'a str> {
    args.get(key).and_then(Value::as_str)
}

/// Absent keys and non-string values read as an empty string.
pub fn string_or_default(args: &ToolArguments, key: &str) -> String {
    optional_string(args, key).unwrap_or_default().to_string()
}
