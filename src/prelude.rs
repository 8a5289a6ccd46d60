//! Prelude module for common imports.
//!
//! ```
//! use keyed_repeater::prelude::*;
//! ```

// Reconciler
pub use crate::{ApplyStats, Repeater, RepeaterBuilder, RepeaterConfig};

// Containers
pub use crate::container::{ChildList, Children, Container};

// Registry
pub use crate::registry::ItemRegistry;

// Data sources
pub use crate::source::{DataSource, ListDataSource, RefreshNotifier, Subscription};

// Error
pub use crate::error::{RepeaterError, RepeaterResult};
