//! Text Resolver Port - language-scoped display strings and config values.
//!
//! A pure lookup from key to a self-describing JSON value. Strings are display
//! text; other shapes (booleans, numbers, URLs) are configuration.

use async_trait::async_trait;
use serde_json::Value;

/// Port for resolving text and config keys.
#[async_trait]
pub trait TextResolver: Send + Sync {
    /// Look up a key. `None` when the key is not configured.
    async fn resolve(&self, key: &str) -> Option<Value>;
}

/// Renders a resolved value as display text.
///
/// Strings are used as-is, numbers and booleans are formatted, `null` and
/// structured values are not text.
pub fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Interprets a resolved value as a switch.
///
/// Accepts JSON booleans, `0`/`1` and the strings `"true"`/`"false"`.
pub fn value_as_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|n| n != 0),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
