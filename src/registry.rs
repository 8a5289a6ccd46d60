//! Durable item → node mapping.
//!
//! The registry is the only state that outlives a reconciliation call.
//! Entries are added when an item is first seen and removed when it stops
//! being requested.

use std::hash::Hash;

use rustc_hash::FxHashMap;

/// Associative store from item to its bound node.
#[derive(Debug, Clone)]
pub struct ItemRegistry<T, N> {
    nodes: FxHashMap<T, N>,
}

impl<T, N> Default for ItemRegistry<T, N> {
    fn default() -> Self {
        Self {
            nodes: FxHashMap::default(),
        }
    }
}

impl<T: Eq + Hash, N> ItemRegistry<T, N> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with room for `capacity` items.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Node bound to `item`, if any.
    #[inline]
    pub fn get(&self, item: &T) -> Option<&N> {
        self.nodes.get(item)
    }

    /// Bind `node` to `item`, returning the node previously bound.
    #[inline]
    pub fn put(&mut self, item: T, node: N) -> Option<N> {
        self.nodes.insert(item, node)
    }

    /// Unbind `item`, handing its node back to the caller.
    #[inline]
    pub fn remove(&mut self, item: &T) -> Option<N> {
        self.nodes.remove(item)
    }

    #[inline]
    pub fn contains(&self, item: &T) -> bool {
        self.nodes.contains_key(item)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over bindings in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, &N)> {
        self.nodes.iter()
    }

    /// Build the node → item lookup used to resolve container children.
    pub(crate) fn reverse(&self) -> FxHashMap<&N, &T>
    where
        N: Eq + Hash,
    {
        self.nodes.iter().map(|(item, node)| (node, item)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_get_remove() {
        let mut registry = ItemRegistry::new();
        assert!(registry.is_empty());

        assert_eq!(registry.put("a", 1), None);
        assert_eq!(registry.put("b", 2), None);
        assert_eq!(registry.get(&"a"), Some(&1));
        assert!(registry.contains(&"b"));
        assert_eq!(registry.len(), 2);

        assert_eq!(registry.remove(&"a"), Some(1));
        assert_eq!(registry.get(&"a"), None);
        assert_eq!(registry.remove(&"a"), None);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_put_replaces() {
        let mut registry = ItemRegistry::with_capacity(4);
        registry.put("a", 1);
        assert_eq!(registry.put("a", 5), Some(1));
        assert_eq!(registry.get(&"a"), Some(&5));
    }

    #[test]
    fn test_reverse_lookup() {
        let mut registry = ItemRegistry::new();
        registry.put("a", 10);
        registry.put("b", 20);

        let reverse = registry.reverse();
        assert_eq!(reverse.get(&10), Some(&&"a"));
        assert_eq!(reverse.get(&20), Some(&&"b"));
        assert_eq!(reverse.get(&30), None);
    }
}
