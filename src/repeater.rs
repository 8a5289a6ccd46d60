//! The repeater: one rendered node per item, kept in item order.
//!
//! # Reconciliation
//!
//! ```text
//! apply(items) / flush()
//!       |
//!       v
//! check_unique(items)            // no side effects before this passes
//!       |
//!       v
//! classify(...)                  // create / update / remove callbacks,
//!       |                        // stale children removed
//!       v
//! reorder(...)                   // insert or evict, left to right
//!       |
//!       v
//! verify(...)                    // only with RepeaterConfig::verify_order
//! ```
//!
//! # Reentrancy
//!
//! Every operation takes `&mut self`, so a callback cannot call back into
//! the repeater that is running it.

use std::fmt::{self, Debug};
use std::hash::Hash;
use std::sync::Arc;

use crate::binding::SourceBinding;
use crate::classify::{check_unique, classify, Callbacks};
use crate::config::RepeaterConfig;
use crate::container::Container;
use crate::error::{RepeaterError, RepeaterResult};
use crate::registry::ItemRegistry;
use crate::reorder::{reorder, verify};
use crate::source::DataSource;
use crate::stats::ApplyStats;

// =============================================================================
// Builder
// =============================================================================

/// Builder for a [`Repeater`] with optional update and remove callbacks.
pub struct RepeaterBuilder<T, C: Container> {
    container: C,
    callbacks: Callbacks<T, C::Node>,
    config: RepeaterConfig,
}

impl<T, C: Container> RepeaterBuilder<T, C> {
    /// Run `update` whenever a node is reused for the same item.
    pub fn on_update(mut self, update: impl FnMut(&C::Node, &T) + 'static) -> Self {
        self.callbacks.update = Box::new(update);
        self
    }

    /// Run `remove` when an item is no longer requested and its node is
    /// about to be dropped.
    pub fn on_remove(mut self, remove: impl FnMut(&C::Node, &T) + 'static) -> Self {
        self.callbacks.remove = Box::new(remove);
        self
    }

    pub fn config(mut self, config: RepeaterConfig) -> Self {
        self.config = config;
        self
    }

    /// Finish building.
    ///
    /// Fails with [`RepeaterError::InvalidState`] if the container already
    /// has children.
    pub fn build(self) -> RepeaterResult<Repeater<T, C>>
    where
        T: Eq + Hash,
    {
        if !self.container.is_empty() {
            return Err(RepeaterError::InvalidState {
                children: self.container.len(),
            });
        }
        Ok(Repeater {
            container: self.container,
            registry: ItemRegistry::with_capacity(self.config.registry_capacity),
            callbacks: self.callbacks,
            binding: None,
            attached: false,
            config: self.config,
        })
    }
}

// =============================================================================
// Repeater
// =============================================================================

/// Keeps a container's children in sync with an item list.
///
/// Items need caller-defined `Eq + Hash` identity. Nodes are handles whose
/// `Eq + Hash` is handle identity; they are cloned into the container and
/// the registry, never rebuilt. A node created for an item is reused until
/// that item disappears from the requested list.
///
/// Items come either from [`apply`](Self::apply) or from a bound
/// [`DataSource`], pulled by the host through [`flush`](Self::flush).
pub struct Repeater<T, C: Container> {
    container: C,
    registry: ItemRegistry<T, C::Node>,
    callbacks: Callbacks<T, C::Node>,
    binding: Option<SourceBinding<T>>,
    attached: bool,
    config: RepeaterConfig,
}

impl<T, C: Container> Repeater<T, C> {
    /// Start building a repeater over an empty `container`.
    pub fn builder(
        container: C,
        create: impl FnMut(&T) -> C::Node + 'static,
    ) -> RepeaterBuilder<T, C> {
        RepeaterBuilder {
            container,
            callbacks: Callbacks::new(Box::new(create)),
            config: RepeaterConfig::default(),
        }
    }
}

impl<T, C> Repeater<T, C>
where
    T: Eq + Hash + Clone + Debug,
    C: Container,
    C::Node: Clone + Eq + Hash,
{
    /// Create a repeater with no update or remove callbacks.
    pub fn new(container: C, create: impl FnMut(&T) -> C::Node + 'static) -> RepeaterResult<Self> {
        Self::builder(container, create).build()
    }

    /// Show `items`, reusing nodes for items that were shown before.
    ///
    /// Unbinds any data source first. Fails with
    /// [`RepeaterError::DuplicateItem`] if an item appears twice, in which
    /// case nothing is changed.
    pub fn apply<I: IntoIterator<Item = T>>(&mut self, items: I) -> RepeaterResult<ApplyStats> {
        let items: Vec<T> = items.into_iter().collect();
        check_unique(&items)?;
        self.binding = None;
        self.reconcile(&items)
    }

    /// Show the items of `stream` once it ends.
    #[cfg(feature = "async")]
    pub async fn apply_stream<S>(&mut self, items: S) -> RepeaterResult<ApplyStats>
    where
        S: futures_util::Stream<Item = T>,
    {
        use futures_util::StreamExt;

        let items: Vec<T> = items.collect().await;
        self.apply(items)
    }

    /// Bind a data source, or unbind with `None`.
    ///
    /// A bound source is subscribed to while the repeater is attached; its
    /// items are pulled by [`flush`](Self::flush). Unbinding shows an empty
    /// list.
    pub fn bind_data_source(&mut self, source: Option<Arc<dyn DataSource<T>>>) -> RepeaterResult<()> {
        let Some(source) = source else {
            self.binding = None;
            self.reconcile(&[])?;
            return Ok(());
        };

        let mut binding = SourceBinding::new(source);
        if self.attached {
            binding.attach();
        }
        // Replacing the binding drops the old subscription
        self.binding = Some(binding);
        Ok(())
    }

    /// The container became visible: start listening to the data source.
    pub fn attach(&mut self) {
        self.attached = true;
        if let Some(binding) = &mut self.binding {
            binding.attach();
        }
    }

    /// The container went away: stop listening and drop pending refreshes.
    pub fn detach(&mut self) {
        self.attached = false;
        if let Some(binding) = &mut self.binding {
            binding.detach();
        }
    }

    /// Run the pending data source refresh, if any.
    ///
    /// Hosts call this once per processing cycle. However many change
    /// notifications arrived since the last flush, at most one
    /// reconciliation runs, against a fresh snapshot.
    pub fn flush(&mut self) -> RepeaterResult<Option<ApplyStats>> {
        let Some(items) = self.binding.as_ref().and_then(SourceBinding::take_refresh) else {
            return Ok(None);
        };
        check_unique(&items)?;
        self.reconcile(&items).map(Some)
    }

    fn reconcile(&mut self, items: &[T]) -> RepeaterResult<ApplyStats> {
        let mut stats = ApplyStats::default();
        let plan = classify(
            items,
            &mut self.registry,
            &mut self.container,
            &mut self.callbacks,
            &mut stats,
        )?;
        reorder(&mut self.container, &plan, &mut stats);
        if self.config.verify_order {
            verify(&self.container, &plan.targets)?;
        }

        log::debug!(
            "reconciled {} item(s): {} created, {} updated, {} removed, {} inserted, {} evicted",
            items.len(),
            stats.created,
            stats.updated,
            stats.removed,
            stats.inserted,
            stats.evicted,
        );
        Ok(stats)
    }
}

impl<T: Eq + Hash, C: Container> Repeater<T, C> {
    /// Node bound to `item`, if it is shown.
    pub fn node(&self, item: &T) -> Option<&C::Node> {
        self.registry.get(item)
    }

    /// Number of items shown.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn registry(&self) -> &ItemRegistry<T, C::Node> {
        &self.registry
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    /// Mutable access to the container.
    ///
    /// Children added here are not bound to any item and are detached on the
    /// next reconciliation, without callbacks.
    pub fn container_mut(&mut self) -> &mut C {
        &mut self.container
    }

    /// Give the container back, dropping the registry and any binding.
    pub fn into_container(self) -> C {
        self.container
    }

    pub fn config(&self) -> &RepeaterConfig {
        &self.config
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn has_data_source(&self) -> bool {
        self.binding.is_some()
    }

    pub fn has_pending_refresh(&self) -> bool {
        self.binding.as_ref().is_some_and(SourceBinding::is_pending)
    }
}

impl<T: Debug, C: Container + Debug> Debug for Repeater<T, C>
where
    C::Node: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repeater")
            .field("container", &self.container)
            .field("registry", &self.registry)
            .field("binding", &self.binding)
            .field("attached", &self.attached)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
