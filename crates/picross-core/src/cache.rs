//! Bounded per-node history of recently emitted layouts.

use std::collections::{HashMap, HashSet, VecDeque};

/// Default number of layouts remembered per node
pub const DEFAULT_RECENT_CAPACITY: usize = 40;

#[derive(Debug, Clone, Default)]
struct NodeHistory {
    order: VecDeque<String>,
    members: HashSet<String>,
}

/// FIFO history of layout encodings keyed by node id.
///
/// Only steers generation away from near-term repeats; losing it never
/// affects correctness.
#[derive(Debug, Clone)]
pub struct RecentLayouts {
    capacity: usize,
    nodes: HashMap<String, NodeHistory>,
}

impl Default for RecentLayouts {
    fn default() -> Self {
        Self::new(DEFAULT_RECENT_CAPACITY)
    }
}

impl RecentLayouts {
    /// An empty history keeping `capacity` layouts per node
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            nodes: HashMap::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether `layout` was emitted recently for `node`
    pub fn contains(&self, node: &str, layout: &str) -> bool {
        self.nodes
            .get(node)
            .is_some_and(|history| history.members.contains(layout))
    }

    /// Remember `layout` for `node`, evicting the oldest entry past capacity
    pub fn record(&mut self, node: &str, layout: &str) {
        if self.capacity == 0 {
            return;
        }
        let history = self.nodes.entry(node.to_string()).or_default();
        if !history.members.insert(layout.to_string()) {
            return;
        }
        history.order.push_back(layout.to_string());
        while history.order.len() > self.capacity {
            if let Some(oldest) = history.order.pop_front() {
                history.members.remove(&oldest);
            }
        }
    }

    /// Number of layouts held for `node`
    pub fn len(&self, node: &str) -> usize {
        self.nodes.get(node).map_or(0, |history| history.order.len())
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.values().all(|history| history.order.is_empty())
    }

    /// Forget every node's history
    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_contains() {
        let mut cache = RecentLayouts::default();
        assert!(cache.is_empty());
        cache.record("elf-easy", "0101");
        assert!(cache.contains("elf-easy", "0101"));
        assert!(!cache.contains("elf-hard", "0101"));
        assert!(!cache.contains("elf-easy", "1111"));
        assert_eq!(cache.len("elf-easy"), 1);
        assert_eq!(cache.capacity(), DEFAULT_RECENT_CAPACITY);
    }

    #[test]
    fn test_fifo_eviction() {
        let mut cache = RecentLayouts::new(3);
        for layout in ["a", "b", "c", "d"] {
            cache.record("node", layout);
        }
        assert_eq!(cache.len("node"), 3);
        assert!(!cache.contains("node", "a"));
        assert!(cache.contains("node", "b"));
        assert!(cache.contains("node", "d"));
    }

    #[test]
    fn test_duplicates_do_not_refresh() {
        let mut cache = RecentLayouts::new(2);
        cache.record("node", "a");
        cache.record("node", "b");
        cache.record("node", "a");
        assert_eq!(cache.len("node"), 2);
        cache.record("node", "c");
        assert!(!cache.contains("node", "a"));
        assert!(cache.contains("node", "b"));
    }

    #[test]
    fn test_zero_capacity_and_clear() {
        let mut cache = RecentLayouts::new(0);
        cache.record("node", "a");
        assert!(!cache.contains("node", "a"));

        let mut cache = RecentLayouts::default();
        cache.record("node", "a");
        cache.clear();
        assert!(cache.is_empty());
    }
}
