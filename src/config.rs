//! Repeater configuration.

/// Configuration for a [`Repeater`](crate::Repeater).
///
/// Use this to trade safety checks for speed:
/// - `strict()` verifies the container after every call
/// - `fast()` trusts the [`Container`](crate::Container) implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeaterConfig {
    /// Check after every call that the container holds exactly the
    /// requested nodes in order, failing with `OrderMismatch` otherwise.
    /// Default: on in debug builds, off in release builds
    pub verify_order: bool,
    /// Initial capacity of the item registry.
    /// Default: 0
    pub registry_capacity: usize,
}

impl Default for RepeaterConfig {
    fn default() -> Self {
        Self {
            verify_order: cfg!(debug_assertions),
            registry_capacity: 0,
        }
    }
}

impl RepeaterConfig {
    /// Create config with explicit settings.
    pub fn new(verify_order: bool, registry_capacity: usize) -> Self {
        Self {
            verify_order,
            registry_capacity,
        }
    }

    /// Always verify the container order.
    pub fn strict() -> Self {
        Self {
            verify_order: true,
            ..Self::default()
        }
    }

    /// Never verify the container order.
    pub fn fast() -> Self {
        Self {
            verify_order: false,
            ..Self::default()
        }
    }

    /// Set the initial registry capacity.
    pub fn with_capacity(mut self, registry_capacity: usize) -> Self {
        self.registry_capacity = registry_capacity;
        self
    }
}
