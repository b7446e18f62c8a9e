//! Flat symbol table
//!
//! One table per analysis, keyed by name and iterated in declaration order.
//! There is no scope stack: every entry carries the same scope label.

use crate::config::GLOBAL_SCOPE;
use crate::parser::ast::TypeName;
use rustc_hash::FxHashMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// What the checker knows about one declared variable
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Symbol {
    #[serde(rename = "type")]
    pub var_type: TypeName,
    pub scope: String,
    pub used: bool,
    pub initialized: bool,
}

impl Symbol {
    pub fn new(var_type: TypeName, initialized: bool) -> Self {
        Self {
            var_type,
            scope: GLOBAL_SCOPE.to_string(),
            used: false,
            initialized,
        }
    }
}

/// Insertion-ordered map from variable name to [`Symbol`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolTable {
    entries: Vec<(String, Symbol)>,
    index: FxHashMap<String, usize>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.index.get(name).map(|&slot| &self.entries[slot].1)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Symbol> {
        match self.index.get(name) {
            Some(&slot) => Some(&mut self.entries[slot].1),
            None => None,
        }
    }

    /// Add a new symbol. Returns `false` and leaves the table unchanged if
    /// the name is already declared.
    pub fn declare(&mut self, name: &str, symbol: Symbol) -> bool {
        if self.contains(name) {
            return false;
        }
        self.index.insert(name.to_string(), self.entries.len());
        self.entries.push((name.to_string(), symbol));
        true
    }

    /// Flag `name` as used. Returns `false` if it was never declared.
    pub fn mark_used(&mut self, name: &str) -> bool {
        match self.get_mut(name) {
            Some(symbol) => {
                symbol.used = true;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Symbol)> {
        self.entries
            .iter()
            .map(|(name, symbol)| (name.as_str(), symbol))
    }
}

impl Serialize for SymbolTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, symbol) in &self.entries {
            map.serialize_entry(name, symbol)?;
        }
        map.end()
    }
}
