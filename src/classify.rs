//! Change classification.
//!
//! Partitions the requested items into retained, new and removed, runs the
//! matching callbacks, and records the two position indices the reorderer
//! needs:
//!
//! - **new index**: rank among the retained items in the requested list
//! - **old index**: rank among the retained children currently in the
//!   container, counted before any reordering
//!
//! Created items get neither; they are placed by their list position.
//!
//! Children whose item is no longer requested are removed from the
//! container (highest position first) before this module returns.

use std::fmt::Debug;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::container::Container;
use crate::error::{RepeaterError, RepeaterResult};
use crate::registry::ItemRegistry;
use crate::stats::ApplyStats;

pub(crate) type Factory<T, N> = Box<dyn FnMut(&T) -> N>;
pub(crate) type Hook<T, N> = Box<dyn FnMut(&N, &T)>;

/// The three extension points: create, update, remove.
pub(crate) struct Callbacks<T, N> {
    pub create: Factory<T, N>,
    pub update: Hook<T, N>,
    pub remove: Hook<T, N>,
}

impl<T, N> Callbacks<T, N> {
    pub fn new(create: Factory<T, N>) -> Self {
        Self {
            create,
            update: Box::new(|_, _| {}),
            remove: Box::new(|_, _| {}),
        }
    }
}

/// Index assignments for one call, indexed by new position.
#[derive(Debug)]
pub(crate) struct Classification<N> {
    /// Bound node for each requested position
    pub targets: Vec<N>,
    /// Node → new position
    pub slots: FxHashMap<N, usize>,
    /// New index per new position: rank among retained items only; `None`
    /// for nodes created in this call
    pub new_index: Vec<Option<usize>>,
    /// Old index per new position; `None` for nodes created in this call
    pub old_index: Vec<Option<usize>>,
}

impl<N: Eq + Hash> Classification<N> {
    /// Block-move heuristic: insert the target at `position`, or evict
    /// `current` until the target surfaces.
    ///
    /// Both offsets measure how far a block has been displaced among the
    /// retained items. Moving the block with the smaller offset wins; ties
    /// insert.
    pub fn should_insert(&self, position: usize, current: &N) -> bool {
        let (Some(item_new), Some(item_old)) = (self.new_index[position], self.old_index[position])
        else {
            return true;
        };
        // Unreachable: children at or after `position` are all retained
        let Some((current_new, current_old)) = self
            .slots
            .get(current)
            .and_then(|&slot| self.new_index[slot].zip(self.old_index[slot]))
        else {
            return true;
        };

        let container_offset = current_new.abs_diff(current_old);
        let item_offset = item_new.abs_diff(item_old);
        container_offset <= item_offset
    }
}

/// Reject lists that contain the same item twice.
///
/// Runs before any callback so a failed call has no side effects.
pub(crate) fn check_unique<T: Eq + Hash + Debug>(items: &[T]) -> RepeaterResult<()> {
    let mut seen: FxHashMap<&T, usize> =
        FxHashMap::with_capacity_and_hasher(items.len(), Default::default());
    for (position, item) in items.iter().enumerate() {
        if let Some(first) = seen.insert(item, position) {
            return Err(RepeaterError::duplicate(item, first, position));
        }
    }
    Ok(())
}

/// Classify `items` against the registry and the current children.
///
/// `items` must already have passed [`check_unique`]. A node collision
/// (the factory handing out a node that another item already holds) fails
/// the call before the registry or the container change. Nodes created in
/// the failed call are passed to the remove callback; update callbacks that
/// already ran are not undone.
pub(crate) fn classify<T, N, C>(
    items: &[T],
    registry: &mut ItemRegistry<T, N>,
    container: &mut C,
    callbacks: &mut Callbacks<T, N>,
    stats: &mut ApplyStats,
) -> RepeaterResult<Classification<N>>
where
    T: Eq + Hash + Clone + Debug,
    N: Clone + Eq + Hash,
    C: Container<Node = N>,
{
    let mut targets = Vec::with_capacity(items.len());
    let mut slots = FxHashMap::with_capacity_and_hasher(items.len(), Default::default());
    let mut new_index = Vec::with_capacity(items.len());
    let mut created: SmallVec<[usize; 8]> = SmallVec::new();
    let mut retained = 0;

    for (slot, item) in items.iter().enumerate() {
        let node = match registry.get(item) {
            Some(node) => {
                (callbacks.update)(node, item);
                stats.updated += 1;
                new_index.push(Some(retained));
                retained += 1;
                node.clone()
            }
            None => {
                let node = (callbacks.create)(item);
                stats.created += 1;
                new_index.push(None);
                created.push(slot);
                node
            }
        };
        let collision = slots.insert(node.clone(), slot);
        targets.push(node);
        if let Some(first) = collision {
            release_created(items, &targets, &created, registry, callbacks);
            return Err(RepeaterError::duplicate_node(&items[first], item));
        }
    }

    if !created.is_empty() {
        // A new node may also equal one still held by an item that is going away
        let clash = {
            let bound = registry.reverse();
            created.iter().find_map(|&slot| {
                bound
                    .get(&targets[slot])
                    .map(|first| RepeaterError::duplicate_node(*first, &items[slot]))
            })
        };
        if let Some(err) = clash {
            release_created(items, &targets, &created, registry, callbacks);
            return Err(err);
        }
        for &slot in &created {
            registry.put(items[slot].clone(), targets[slot].clone());
        }
    }

    // Old indices count only the children that survive this call
    let mut old_index = vec![None; items.len()];
    let mut stale: SmallVec<[usize; 8]> = SmallVec::new();
    let mut next_old = 0;
    for position in 0..container.len() {
        let Some(child) = container.child_at(position) else {
            break;
        };
        match slots.get(child) {
            Some(&slot) => {
                old_index[slot] = Some(next_old);
                next_old += 1;
            }
            None => stale.push(position),
        }
    }

    if !stale.is_empty() {
        let removed: SmallVec<[Option<T>; 8]> = {
            let reverse = registry.reverse();
            stale
                .iter()
                .map(|&position| {
                    container
                        .child_at(position)
                        .and_then(|child| reverse.get(child))
                        .map(|item| (*item).clone())
                })
                .collect()
        };

        for (&position, item) in stale.iter().zip(removed) {
            match item.and_then(|item| registry.remove(&item).map(|node| (node, item))) {
                Some((node, item)) => {
                    (callbacks.remove)(&node, &item);
                    stats.removed += 1;
                }
                None => {
                    log::warn!("detaching child at position {position}: not bound to any item");
                    stats.detached += 1;
                }
            }
        }

        for &position in stale.iter().rev() {
            container.remove_at(position);
        }
    }

    Ok(Classification {
        targets,
        slots,
        new_index,
        old_index,
    })
}

/// Hand the nodes created by a failed call back to the remove callback.
///
/// A node the registry still holds belongs to its bound item and is kept.
fn release_created<T, N>(
    items: &[T],
    targets: &[N],
    created: &[usize],
    registry: &ItemRegistry<T, N>,
    callbacks: &mut Callbacks<T, N>,
) where
    T: Eq + Hash,
    N: Eq + Hash,
{
    let bound = registry.reverse();
    for &slot in created {
        let node = &targets[slot];
        if !bound.contains_key(node) {
            (callbacks.remove)(node, &items[slot]);
        }
    }
}
