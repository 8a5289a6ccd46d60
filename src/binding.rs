//! Attach/detach lifecycle of a bound data source.
//!
//! ```text
//!            attach(): subscribe + schedule refresh
//! Detached ------------------------------------------> Attached
//!          <------------------------------------------
//!            detach(): unsubscribe + drop pending refresh
//! ```
//!
//! Only an attached binding listens for changes. The host decides when the
//! container is attached (visible) and when pending refreshes are pulled.

use std::fmt;
use std::sync::Arc;

use crate::source::{DataSource, RefreshNotifier, Subscription};

enum BindingState {
    Detached,
    Attached { _subscription: Subscription },
}

pub(crate) struct SourceBinding<T> {
    source: Arc<dyn DataSource<T>>,
    notifier: RefreshNotifier,
    state: BindingState,
}

impl<T> SourceBinding<T> {
    pub fn new(source: Arc<dyn DataSource<T>>) -> Self {
        Self {
            source,
            notifier: RefreshNotifier::new(),
            state: BindingState::Detached,
        }
    }

    pub fn is_attached(&self) -> bool {
        matches!(self.state, BindingState::Attached { .. })
    }

    /// Subscribe and schedule an initial refresh. No-op when attached.
    pub fn attach(&mut self) {
        if self.is_attached() {
            return;
        }
        let subscription = self.source.subscribe(self.notifier.clone());
        self.state = BindingState::Attached {
            _subscription: subscription,
        };
        self.notifier.notify();
    }

    /// Unsubscribe and forget any pending refresh.
    pub fn detach(&mut self) {
        // Dropping the subscription unregisters the listener
        self.state = BindingState::Detached;
        self.notifier.clear();
    }

    pub fn is_pending(&self) -> bool {
        self.is_attached() && self.notifier.is_pending()
    }

    /// Pull the latest snapshot if a refresh is pending.
    pub fn take_refresh(&self) -> Option<Vec<T>> {
        if self.is_attached() && self.notifier.take() {
            Some(self.source.fetch())
        } else {
            None
        }
    }
}

impl<T> fmt::Debug for SourceBinding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceBinding")
            .field("attached", &self.is_attached())
            .field("pending", &self.notifier.is_pending())
            .finish_non_exhaustive()
    }
}
