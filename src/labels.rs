use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("undefined label '{0}'")]
pub struct UndefinedLabel(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEntry {
    pub addr: usize,
    /// 1-based source line of the definition
    pub line: usize,
}

/// Label name -> instruction address. Filled during load, read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelTable {
    map: HashMap<String, LabelEntry>,
}

impl LabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name`; on a duplicate returns the existing entry and leaves the table untouched.
    pub fn define(&mut self, name: &str, addr: usize, line: usize) -> Result<(), LabelEntry> {
        if let Some(prev) = self.map.get(name) {
            return Err(*prev);
        }
        self.map.insert(name.to_string(), LabelEntry { addr, line });
        Ok(())
    }

    pub fn resolve(&self, name: &str) -> Result<usize, UndefinedLabel> {
        self.map
            .get(name)
            .map(|e| e.addr)
            .ok_or_else(|| UndefinedLabel(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Entries ordered by address, then definition line.
    pub fn iter(&self) -> impl Iterator<Item = (&str, LabelEntry)> {
        let mut v: Vec<_> = self.map.iter().map(|(k, e)| (k.as_str(), *e)).collect();
        v.sort_by_key(|(_, e)| (e.addr, e.line));
        v.into_iter()
    }
}
