//! Pull-based data sources.
//!
//! A [`DataSource`] supplies the full item list on demand and tells its
//! subscribers when that list may have changed. Subscribers only learn
//! *that* something changed; they re-pull the whole list when the host
//! gets around to it.
//!
//! # Coalescing
//!
//! A subscriber is a [`RefreshNotifier`]: a shared flag. Any number of
//! notifications between two pulls leave a single pending refresh, so a
//! burst of changes costs one reconciliation with the latest snapshot.
//!
//! ```
//! use keyed_repeater::source::{DataSource, ListDataSource, RefreshNotifier};
//!
//! let source = ListDataSource::new(vec![3, 1, 2]);
//! let notifier = RefreshNotifier::new();
//! let _subscription = source.subscribe(notifier.clone());
//!
//! source.set_items(vec![1, 2]);
//! source.refresh_all();
//! assert!(notifier.take());
//! assert!(!notifier.take());
//!
//! source.set_sort_order(|a: &i32, b: &i32| b.cmp(a));
//! assert_eq!(source.fetch(), vec![2, 1]);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering as AtomicOrdering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap;

// =============================================================================
// DataSource
// =============================================================================

/// A source of items that can be re-queried after change notifications.
pub trait DataSource<T> {
    /// Return the complete current item list.
    fn fetch(&self) -> Vec<T>;

    /// Register `notifier` to be flagged whenever the list may have changed.
    ///
    /// The registration lasts until the returned [`Subscription`] is dropped.
    fn subscribe(&self, notifier: RefreshNotifier) -> Subscription;
}

// =============================================================================
// RefreshNotifier
// =============================================================================

/// Coalescing "something changed, re-pull" flag.
#[derive(Debug, Clone, Default)]
pub struct RefreshNotifier {
    pending: Arc<AtomicBool>,
}

impl RefreshNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flag a refresh. Returns `true` if none was pending yet.
    #[inline]
    pub fn notify(&self) -> bool {
        !self.pending.swap(true, AtomicOrdering::AcqRel)
    }

    /// Consume the pending refresh, if any.
    #[inline]
    pub fn take(&self) -> bool {
        self.pending.swap(false, AtomicOrdering::AcqRel)
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.load(AtomicOrdering::Acquire)
    }

    /// Drop a pending refresh without acting on it.
    #[inline]
    pub fn clear(&self) {
        self.pending.store(false, AtomicOrdering::Release);
    }
}

// =============================================================================
// Subscription
// =============================================================================

/// Listener registration guard. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Create a subscription that runs `cancel` when removed.
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A subscription with nothing to undo.
    pub fn empty() -> Self {
        Self { cancel: None }
    }

    /// Unsubscribe now.
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

// =============================================================================
// ListDataSource
// =============================================================================

type Filter<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;
type SortOrder<T> = Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

struct ListInner<T> {
    items: RwLock<Vec<T>>,
    filter: RwLock<Option<Filter<T>>>,
    sort: RwLock<Option<SortOrder<T>>>,
    listeners: Mutex<FxHashMap<u64, RefreshNotifier>>,
    next_listener: AtomicU64,
}

/// In-memory data source backed by a list.
///
/// Clones share the same list. Changing the items, the filter or the sort
/// order notifies every subscriber.
pub struct ListDataSource<T> {
    inner: Arc<ListInner<T>>,
}

impl<T> Clone for ListDataSource<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for ListDataSource<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> ListDataSource<T> {
    /// Create a source holding `items`.
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            inner: Arc::new(ListInner {
                items: RwLock::new(items.into_iter().collect()),
                filter: RwLock::new(None),
                sort: RwLock::new(None),
                listeners: Mutex::new(FxHashMap::default()),
                next_listener: AtomicU64::new(0),
            }),
        }
    }

    /// Replace the whole list.
    pub fn set_items(&self, items: impl IntoIterator<Item = T>) {
        *self.inner.items.write() = items.into_iter().collect();
        self.refresh_all();
    }

    /// Edit the list in place, then notify.
    pub fn update<R>(&self, f: impl FnOnce(&mut Vec<T>) -> R) -> R {
        let result = f(&mut self.inner.items.write());
        self.refresh_all();
        result
    }

    /// Only fetch items for which `filter` returns `true`.
    pub fn set_filter(&self, filter: impl Fn(&T) -> bool + Send + Sync + 'static) {
        let filter: Filter<T> = Arc::new(filter);
        *self.inner.filter.write() = Some(filter);
        self.refresh_all();
    }

    pub fn clear_filter(&self) {
        *self.inner.filter.write() = None;
        self.refresh_all();
    }

    /// Fetch items sorted by `compare` (stable).
    pub fn set_sort_order(&self, compare: impl Fn(&T, &T) -> Ordering + Send + Sync + 'static) {
        let compare: SortOrder<T> = Arc::new(compare);
        *self.inner.sort.write() = Some(compare);
        self.refresh_all();
    }

    pub fn clear_sort_order(&self) {
        *self.inner.sort.write() = None;
        self.refresh_all();
    }

    /// Notify every subscriber that the list may have changed.
    pub fn refresh_all(&self) {
        for notifier in self.inner.listeners.lock().values() {
            notifier.notify();
        }
    }

    /// Number of live subscriptions.
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.lock().len()
    }

    /// Number of items, ignoring the filter.
    pub fn len(&self) -> usize {
        self.inner.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone + 'static> DataSource<T> for ListDataSource<T> {
    fn fetch(&self) -> Vec<T> {
        let filter = self.inner.filter.read().clone();
        let mut items: Vec<T> = {
            let items = self.inner.items.read();
            match filter {
                Some(filter) => items.iter().filter(|item| filter(*item)).cloned().collect(),
                None => items.clone(),
            }
        };
        if let Some(compare) = self.inner.sort.read().clone() {
            items.sort_by(|a, b| compare(a, b));
        }
        items
    }

    fn subscribe(&self, notifier: RefreshNotifier) -> Subscription {
        let id = self.inner.next_listener.fetch_add(1, AtomicOrdering::Relaxed);
        self.inner.listeners.lock().insert(id, notifier);

        let inner: Weak<ListInner<T>> = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = inner.upgrade() {
                inner.listeners.lock().remove(&id);
            }
        })
    }
}

impl<T: fmt::Debug> fmt::Debug for ListDataSource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListDataSource")
            .field("items", &*self.inner.items.read())
            .field("filtered", &self.inner.filter.read().is_some())
            .field("sorted", &self.inner.sort.read().is_some())
            .field("listeners", &self.listener_count())
            .finish()
    }
}
