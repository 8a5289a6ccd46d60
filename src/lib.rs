//! keyed-repeater - Keyed list reconciliation for retained-mode UI trees
//!
//! ## Core Concepts
//!
//! A [`Repeater`] owns an empty [`Container`] and keeps exactly one node in
//! it per item of the last requested list, in list order. Given a new list
//! it:
//!
//! - reuses the node of every item that is still present
//! - creates nodes only for new items, releases nodes of vanished items
//! - reorders with a block-move heuristic instead of a full edit distance
//!
//! ## Modules
//! - `registry`: durable item → node mapping
//! - `container`: the [`Container`] adapter trait and built-in containers
//! - `source`: pull-based data sources with coalesced change notifications
//! - `error`: error types
//!
//! ## Usage
//!
//! Nodes are handles: `Eq` and `Hash` must compare identity, so every call
//! of the factory has to return a distinct node. Here each node carries a
//! serial number next to its label.
//!
//! ```
//! use keyed_repeater::{ChildList, Repeater};
//!
//! let mut serial = 0;
//! let mut repeater = Repeater::new(ChildList::new(), move |name: &String| {
//!     serial += 1;
//!     (serial, name.to_uppercase())
//! })?;
//!
//! repeater.apply(["a", "b", "c"].map(String::from))?;
//! let stats = repeater.apply(["c", "a"].map(String::from))?;
//!
//! let labels: Vec<&str> = repeater.container().iter().map(|(_, label)| label.as_str()).collect();
//! assert_eq!(labels, ["C", "A"]);
//! assert_eq!(stats.created, 0);
//! assert_eq!(stats.removed, 1);
//! # Ok::<(), keyed_repeater::RepeaterError>(())
//! ```

// =============================================================================
// Modules
// =============================================================================

/// Item → node registry
pub mod registry;

/// Container adapter trait and built-in containers
pub mod container;

/// Data sources and change notification
pub mod source;

/// Error types
pub mod error;

/// Prelude for common imports
pub mod prelude;

mod binding;
mod classify;
mod config;
mod reorder;
mod repeater;
mod stats;

#[cfg(test)]
mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use repeater::{Repeater, RepeaterBuilder};
pub use config::RepeaterConfig;
pub use stats::ApplyStats;

pub use container::{ChildList, Children, Container};
pub use registry::ItemRegistry;
pub use source::{DataSource, ListDataSource, RefreshNotifier, Subscription};

pub use error::{RepeaterError, RepeaterResult};
