//! Error types for keyed-repeater.
//!
//! Every error is a caller or input error. Nothing here is retryable.

use thiserror::Error;

/// Errors that can occur while building or reconciling a repeater.
#[derive(Debug, Error)]
pub enum RepeaterError {
    /// The container handed to the repeater already had children
    #[error("invalid state: the container must be empty, found {children} child(ren)")]
    InvalidState {
        /// Number of children found in the container
        children: usize,
    },

    /// The same item was requested twice in one call
    #[error("multiple copies of the same item are not supported: {item} at positions {first} and {second}")]
    DuplicateItem {
        /// `Debug` rendering of the offending item
        item: String,
        /// Position of the first occurrence
        first: usize,
        /// Position of the repeated occurrence
        second: usize,
    },

    /// The node factory returned a node that is already bound to another item.
    ///
    /// Nodes are handles; two items sharing one would collapse into a single
    /// child.
    #[error("items {first} and {second} were given the same node")]
    DuplicateNode {
        /// `Debug` rendering of the item that already holds the node
        first: String,
        /// `Debug` rendering of the item whose new node collided
        second: String,
    },

    /// The container did not match the requested order after reordering.
    ///
    /// Only reported when [`RepeaterConfig::verify_order`](crate::RepeaterConfig)
    /// is enabled.
    #[error("container out of order at position {position}")]
    OrderMismatch {
        /// First position whose child is not the expected node
        position: usize,
    },
}

/// Result type alias for repeater operations.
pub type RepeaterResult<T> = Result<T, RepeaterError>;

impl RepeaterError {
    /// Create a duplicate item error naming `item`.
    pub fn duplicate(item: &impl std::fmt::Debug, first: usize, second: usize) -> Self {
        Self::DuplicateItem {
            item: format!("{item:?}"),
            first,
            second,
        }
    }

    /// Create a node collision error between two items.
    pub fn duplicate_node(first: &impl std::fmt::Debug, second: &impl std::fmt::Debug) -> Self {
        Self::DuplicateNode {
            first: format!("{first:?}"),
            second: format!("{second:?}"),
        }
    }

    /// Check if this is a duplicate item error.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateItem { .. })
    }
}
