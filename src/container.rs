//! Container adapter.
//!
//! The reconciler only ever talks to the child sequence through
//! [`Container`], so any rendering tree can be driven by implementing four
//! operations. Two implementations ship with the crate:
//!
//! - [`ChildList`]: inline storage for the first 8 children, like a VDOM
//!   element's child list
//! - `Vec<N>`: plain heap storage

use smallvec::SmallVec;

/// Ordered sequence of child nodes mutated by the reconciler.
///
/// # Insertion semantics
///
/// `insert_at` behaves like DOM insertion: if `node` is already a child it
/// is detached from its old position first, so after the call the container
/// holds it exactly once, at `index`.
pub trait Container {
    /// Node handle stored in the container.
    type Node;

    /// Number of children.
    fn len(&self) -> usize;

    /// Check if there are no children.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Child at `index`, or `None` past the end.
    fn child_at(&self, index: usize) -> Option<&Self::Node>;

    /// Place `node` at `index`, shifting later children right.
    ///
    /// An `index` past the end appends.
    fn insert_at(&mut self, index: usize, node: Self::Node);

    /// Detach and return the child at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    fn remove_at(&mut self, index: usize) -> Self::Node;
}

/// Inline storage for child lists.
pub type Children<N> = SmallVec<[N; 8]>;

/// `SmallVec`-backed container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildList<N> {
    children: Children<N>,
}

impl<N> Default for ChildList<N> {
    fn default() -> Self {
        Self {
            children: SmallVec::new(),
        }
    }
}

impl<N> ChildList<N> {
    /// Create an empty child list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a child. Hosts use this for content the repeater does not own.
    #[inline]
    pub fn push(&mut self, node: N) {
        self.children.push(node);
    }

    #[inline]
    pub fn as_slice(&self) -> &[N] {
        &self.children
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, N> {
        self.children.iter()
    }

    /// Consume the list, returning the raw children.
    pub fn into_inner(self) -> Children<N> {
        self.children
    }
}

impl<N> FromIterator<N> for ChildList<N> {
    fn from_iter<I: IntoIterator<Item = N>>(iter: I) -> Self {
        Self {
            children: iter.into_iter().collect(),
        }
    }
}

impl<'a, N> IntoIterator for &'a ChildList<N> {
    type Item = &'a N;
    type IntoIter = std::slice::Iter<'a, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}

impl<N: PartialEq> Container for ChildList<N> {
    type Node = N;

    #[inline]
    fn len(&self) -> usize {
        self.children.len()
    }

    #[inline]
    fn child_at(&self, index: usize) -> Option<&N> {
        self.children.get(index)
    }

    fn insert_at(&mut self, index: usize, node: N) {
        if let Some(pos) = self.children.iter().position(|child| *child == node) {
            self.children.remove(pos);
        }
        let index = index.min(self.children.len());
        self.children.insert(index, node);
    }

    #[inline]
    fn remove_at(&mut self, index: usize) -> N {
        self.children.remove(index)
    }
}

impl<N: PartialEq> Container for Vec<N> {
    type Node = N;

    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn child_at(&self, index: usize) -> Option<&N> {
        self.get(index)
    }

    fn insert_at(&mut self, index: usize, node: N) {
        if let Some(pos) = self.iter().position(|child| *child == node) {
            self.remove(pos);
        }
        let index = index.min(Vec::len(self));
        self.insert(index, node);
    }

    #[inline]
    fn remove_at(&mut self, index: usize) -> N {
        self.remove(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_remove() {
        let mut list: ChildList<char> = ChildList::new();
        assert!(Container::is_empty(&list));

        list.insert_at(0, 'b');
        list.insert_at(0, 'a');
        list.insert_at(9, 'c');
        assert_eq!(list.as_slice(), &['a', 'b', 'c']);

        assert_eq!(list.remove_at(1), 'b');
        assert_eq!(list.as_slice(), &['a', 'c']);
        assert_eq!(list.child_at(1), Some(&'c'));
        assert_eq!(list.child_at(2), None);
    }

    #[test]
    fn test_insert_moves_existing_child() {
        let mut list: ChildList<char> = "abcd".chars().collect();

        list.insert_at(0, 'c');
        assert_eq!(list.as_slice(), &['c', 'a', 'b', 'd']);

        list.insert_at(3, 'a');
        assert_eq!(list.as_slice(), &['c', 'b', 'd', 'a']);
        assert_eq!(Container::len(&list), 4);
    }

    #[test]
    fn test_vec_container() {
        let mut children = vec![1, 2, 3];
        children.insert_at(0, 3);
        assert_eq!(children, vec![3, 1, 2]);
        assert_eq!(Container::remove_at(&mut children, 2), 2);
        assert_eq!(Container::child_at(&children, 1), Some(&1));
    }
}
