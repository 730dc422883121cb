//! Keyed table cache.
//! Loader results are cached by their row-count argument, bounded to a fixed
//! number of entries with least-recently-used eviction.

use polars::prelude::DataFrame;
use std::collections::HashMap;
use std::sync::Arc;

pub struct TableCache {
    capacity: usize,
    entries: HashMap<usize, Arc<DataFrame>>,
    /// Keys ordered least recently used first.
    recency: Vec<usize>,
}

impl TableCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: HashMap::new(),
            recency: Vec::new(),
        }
    }

    /// Look up the table loaded for `max_rows`, refreshing its recency.
    pub fn get(&mut self, max_rows: usize) -> Option<Arc<DataFrame>> {
        let table = self.entries.get(&max_rows).cloned()?;
        self.touch(max_rows);
        Some(table)
    }

    /// Store a loaded table, evicting the least recently used entries beyond
    /// capacity.
    pub fn insert(&mut self, max_rows: usize, table: Arc<DataFrame>) {
        self.entries.insert(max_rows, table);
        self.touch(max_rows);

        while self.entries.len() > self.capacity {
            let evicted = self.recency.remove(0);
            self.entries.remove(&evicted);
            log::info!("evicted cached table for {evicted} rows");
        }
    }

    /// Drop every cached table.
    #[allow(dead_code)]
    pub fn clear(&mut self) {
        self.entries.clear();
        self.recency.clear();
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn touch(&mut self, key: usize) {
        self.recency.retain(|k| *k != key);
        self.recency.push(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::testutil::sample_frame;

    #[test]
    fn returns_the_stored_table() {
        let mut cache = TableCache::new(2);
        assert!(cache.get(100).is_none());

        let table = Arc::new(sample_frame());
        cache.insert(100, Arc::clone(&table));

        let hit = cache.get(100).unwrap();
        assert!(hit.equals(table.as_ref()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn evicts_least_recently_used_beyond_capacity() {
        let table = Arc::new(sample_frame());
        let mut cache = TableCache::new(2);

        cache.insert(100, Arc::clone(&table));
        cache.insert(200, Arc::clone(&table));
        cache.get(100); // 200 is now least recently used
        cache.insert(300, Arc::clone(&table));

        assert_eq!(cache.len(), 2);
        assert!(cache.get(200).is_none());
        assert!(cache.get(100).is_some());
        assert!(cache.get(300).is_some());
    }

    #[test]
    fn clear_empties_the_cache() {
        let mut cache = TableCache::new(2);
        cache.insert(100, Arc::new(sample_frame()));
        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get(100).is_none());
    }
}
