//! Minimal-move reordering.
//!
//! Walks target positions left to right. At each position the container
//! either already holds the right node, or one of two actions fixes it:
//!
//! - **insert**: place the target node at the position (moving it if it is
//!   already a child)
//! - **evict**: detach children at the position until the target surfaces;
//!   evicted nodes stay registered and are inserted again when the walk
//!   reaches their own position
//!
//! The choice between the two is [`Classification::should_insert`].
//!
//! # Complexity
//!
//! O(1) container operations per position when one block is displaced,
//! O(n²) evictions in the worst case. There is no global optimum search.

use std::hash::Hash;

use crate::classify::Classification;
use crate::container::Container;
use crate::error::{RepeaterError, RepeaterResult};
use crate::stats::ApplyStats;

/// Bring the container into `plan.targets` order.
pub(crate) fn reorder<N, C>(container: &mut C, plan: &Classification<N>, stats: &mut ApplyStats)
where
    N: Clone + Eq + Hash,
    C: Container<Node = N>,
{
    for (position, target) in plan.targets.iter().enumerate() {
        let insert = match container.child_at(position) {
            Some(current) if current == target => continue,
            Some(current) => plan.should_insert(position, current),
            None => true,
        };

        if !insert {
            while let Some(child) = container.child_at(position) {
                if child == target {
                    break;
                }
                container.remove_at(position);
                stats.evicted += 1;
            }
            log::trace!("evicted up to position {position}");
            if container.child_at(position) == Some(target) {
                continue;
            }
        }

        log::trace!("inserting at position {position}");
        container.insert_at(position, target.clone());
        stats.inserted += 1;
    }
}

/// Check that the container holds exactly `targets`, in order.
pub(crate) fn verify<N, C>(container: &C, targets: &[N]) -> RepeaterResult<()>
where
    N: Eq,
    C: Container<Node = N>,
{
    if let Some(position) = targets
        .iter()
        .enumerate()
        .position(|(position, target)| container.child_at(position) != Some(target))
    {
        return Err(RepeaterError::OrderMismatch { position });
    }
    if container.len() != targets.len() {
        return Err(RepeaterError::OrderMismatch {
            position: targets.len(),
        });
    }
    Ok(())
}
