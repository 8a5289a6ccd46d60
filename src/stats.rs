//! Per-call reconciliation statistics.

/// Statistics from one reconciliation call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ApplyStats {
    /// Factory calls (items not previously registered)
    pub created: usize,
    /// Update calls (items present before and after)
    pub updated: usize,
    /// Removal calls (registered items no longer requested)
    pub removed: usize,
    /// Children detached because no item was bound to them
    pub detached: usize,
    /// `insert_at` calls made while reordering
    pub inserted: usize,
    /// Children evicted while reordering
    pub evicted: usize,
}

impl ApplyStats {
    /// Total number of container mutations.
    pub fn structural_ops(&self) -> usize {
        self.removed + self.detached + self.inserted + self.evicted
    }

    /// Number of retained nodes that changed position.
    ///
    /// Every insert of a node that was not created in this call is a move.
    pub fn moved(&self) -> usize {
        self.inserted.saturating_sub(self.created)
    }

    /// Check if the call neither created, removed nor moved anything.
    pub fn is_noop(&self) -> bool {
        self.created == 0 && self.structural_ops() == 0
    }
}
