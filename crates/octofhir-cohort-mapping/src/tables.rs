//! Nested lookup tables keyed by data element key, entity type and operator

use std::collections::HashMap;

/// Two-level table: `(key, entity type) -> V`
#[derive(Debug, Clone)]
pub(crate) struct Table2<V> {
    inner: HashMap<String, HashMap<String, V>>,
}

impl<V> Default for Table2<V> {
    fn default() -> Self {
        Self {
            inner: HashMap::new(),
        }
    }
}

impl<V> Table2<V> {
    pub(crate) fn get(&self, first: &str, second: &str) -> Option<&V> {
        self.inner.get(first)?.get(second)
    }

    /// Insert unless present. Returns `false` and keeps the existing value on
    /// a duplicate key.
    pub(crate) fn insert_first(&mut self, first: &str, second: &str, value: V) -> bool {
        let row = self.inner.entry(first.to_string()).or_default();
        if row.contains_key(second) {
            return false;
        }
        row.insert(second.to_string(), value);
        true
    }

    pub(crate) fn get_or_default_mut(&mut self, first: &str, second: &str) -> &mut V
    where
        V: Default,
    {
        self.inner
            .entry(first.to_string())
            .or_default()
            .entry(second.to_string())
            .or_default()
    }

    pub(crate) fn len(&self) -> usize {
        self.inner.values().map(HashMap::len).sum()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &str, &V)> {
        self.inner.iter().flat_map(|(first, row)| {
            row.iter()
                .map(move |(second, value)| (first.as_str(), second.as_str(), value))
        })
    }
}

/// Three-level table: `(key, entity type, operator) -> V`
#[derive(Debug, Clone)]
pub(crate) struct Table3<V> {
    inner: HashMap<String, Table2<V>>,
}

impl<V> Default for Table3<V> {
    fn default() -> Self {
        Self {
            inner: HashMap::new(),
        }
    }
}

impl<V> Table3<V> {
    pub(crate) fn get(&self, first: &str, second: &str, third: &str) -> Option<&V> {
        self.inner.get(first)?.get(second, third)
    }

    pub(crate) fn insert_first(&mut self, first: &str, second: &str, third: &str, value: V) -> bool {
        self.inner
            .entry(first.to_string())
            .or_default()
            .insert_first(second, third, value)
    }

    pub(crate) fn len(&self) -> usize {
        self.inner.values().map(Table2::len).sum()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &str, &str, &V)> {
        self.inner.iter().flat_map(|(first, table)| {
            table
                .iter()
                .map(move |(second, third, value)| (first.as_str(), second, third, value))
        })
    }
}
