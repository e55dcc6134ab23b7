//! Fixed key/value text resolver.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

use crate::ports::TextResolver;

/// Resolver over a map built up front.
#[derive(Debug, Clone, Default)]
pub struct StaticTextResolver {
    values: HashMap<String, Value>,
}

impl StaticTextResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl FromIterator<(String, Value)> for StaticTextResolver {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[async_trait]
impl TextResolver for StaticTextResolver {
    async fn resolve(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }
}
