//! Windowed resource manager.
//!
//! The single component at the heart of the crate: given scroll offsets
//! over a long virtual list of fixed-size rows, it maintains the invariant
//! that *exactly* the items whose rows fall inside the visible range plus
//! buffer are tracked - materializing entrants asynchronously and evicting
//! leavers - so memory stays O(window) regardless of list length.
//!
//! # Concurrency model
//!
//! Single-threaded, cooperative. `set_scroll` runs its reconciliation
//! synchronously and returns; loads complete whenever the environment
//! delivers them via [`WindowedResourceManager::on_load_result`], in any
//! order, possibly after the slot they were issued for is long gone. The
//! request token - not the item index - identifies a load, which is what
//! makes late completions safe to discard instead of attaching a stale
//! resource to a newer slot at the same index.

pub mod hooks;
pub mod slot;

pub use hooks::{GalleryHooks, ResourceDisposer, ResourceLoader, RetryPolicy, RetryScheduler, SlotObserver};
pub use slot::{Slot, SlotState};

use crate::model::{ItemIndex, LayoutError, ListLayout, LoadOutcome, RequestToken};
use std::collections::HashMap;
use std::ops::RangeInclusive;
use tracing::{debug, trace, warn};

/// Aggregate counters for a stats display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowStats {
    /// Items in the virtual list.
    pub total: usize,
    /// Slots currently tracked (resident).
    pub tracked: usize,
    /// Tracked slots holding a loaded resource.
    pub loaded: usize,
    /// Tracked slots with a load in flight.
    pub pending: usize,
    /// Tracked slots in the failed state.
    pub failed: usize,
    /// Inclusive tracked index range, if any.
    pub range: Option<(usize, usize)>,
}

/// Viewport-driven lazy loader and evictor for a virtual list.
///
/// Generic over the resource type `R` (a texture handle, a decoded image,
/// anything). All side effects - starting loads, disposing resources,
/// scheduling retries, presentation updates - go through the
/// [`GalleryHooks`] context passed into each call; the manager itself owns
/// only bookkeeping.
///
/// # Invariants
///
/// - The tracked index set equals the want range exactly after every
///   `set_scroll`/`reconcile`.
/// - At most one in-flight load per slot (one current token).
/// - A resource is disposed exactly once: on eviction while `Loaded`, or
///   immediately when its completion arrives stale.
#[derive(Debug)]
pub struct WindowedResourceManager<R> {
    layout: ListLayout,
    retry: RetryPolicy,
    /// Clamped offset of the last reconciliation; `None` until the first.
    offset: Option<f64>,
    slots: HashMap<ItemIndex, Slot<R>>,
    next_token: u64,
}

impl<R> WindowedResourceManager<R> {
    /// Create a manager over a validated layout. No slots exist until the
    /// first `set_scroll` (or `reconcile`) call.
    pub fn new(layout: ListLayout, retry: RetryPolicy) -> Self {
        Self {
            layout,
            retry,
            offset: None,
            slots: HashMap::new(),
            next_token: 0,
        }
    }

    /// The list geometry this manager windows over.
    pub fn layout(&self) -> &ListLayout {
        &self.layout
    }

    /// Clamped offset of the last reconciliation (0 = content top).
    pub fn offset(&self) -> f64 {
        self.offset.unwrap_or(0.0)
    }

    /// Number of tracked slots.
    pub fn tracked_len(&self) -> usize {
        self.slots.len()
    }

    /// Whether an index currently has a slot.
    pub fn is_tracked(&self, index: ItemIndex) -> bool {
        self.slots.contains_key(&index)
    }

    /// Peek at a tracked slot's state.
    pub fn state_of(&self, index: ItemIndex) -> Option<&SlotState<R>> {
        self.slots.get(&index).map(|slot| &slot.state)
    }

    /// Iterate over tracked indices in arbitrary order.
    pub fn tracked_indices(&self) -> impl Iterator<Item = ItemIndex> + '_ {
        self.slots.keys().copied()
    }

    /// The index range that should be tracked at the current offset.
    pub fn want_range(&self) -> Option<RangeInclusive<usize>> {
        self.layout.want_range(self.offset())
    }

    /// Aggregate counters for a stats display.
    pub fn stats(&self) -> WindowStats {
        let mut stats = WindowStats {
            total: self.layout.item_count(),
            tracked: self.slots.len(),
            ..WindowStats::default()
        };
        for slot in self.slots.values() {
            match slot.state {
                SlotState::Pending => stats.pending += 1,
                SlotState::Loaded(_) => stats.loaded += 1,
                SlotState::Failed => stats.failed += 1,
            }
        }
        stats.range = self
            .want_range()
            .map(|range| (*range.start(), *range.end()));
        stats
    }

    /// Update the scroll offset and reconcile the tracked set.
    ///
    /// The raw offset may be any real number; it is clamped into
    /// `[-max_scroll, 0]`. Idempotent: a repeated call with the same
    /// effective offset issues no loads or evictions.
    pub fn set_scroll(&mut self, offset: f64, hooks: &mut impl GalleryHooks<R>) {
        let clamped = self.layout.clamp_offset(offset);
        if self.offset == Some(clamped) {
            return;
        }
        self.offset = Some(clamped);
        self.reconcile(hooks);
    }

    /// Resize the viewport (terminal resize in the demo) and reconcile.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] if the new viewport height is not finite.
    pub fn set_viewport_height(
        &mut self,
        viewport_height: f64,
        hooks: &mut impl GalleryHooks<R>,
    ) -> Result<(), LayoutError> {
        self.layout = self.layout.with_viewport_height(viewport_height)?;
        // Max scroll may have shrunk; keep the stored offset valid.
        self.offset = Some(self.layout.clamp_offset(self.offset()));
        self.reconcile(hooks);
        Ok(())
    }

    /// Recompute the want range at the current offset and diff the tracked
    /// set against it: evictions are committed first (bounding peak
    /// memory), then loads are issued for newly wanted indices.
    ///
    /// Post-condition: tracked set == want range exactly. Newly created
    /// slots are `Pending` with a fresh token; their loads are in flight,
    /// not complete.
    pub fn reconcile(&mut self, hooks: &mut impl GalleryHooks<R>) {
        let offset = *self.offset.get_or_insert(0.0);
        let want = self.layout.want_range(offset);

        let in_want = |index: ItemIndex| {
            want.as_ref()
                .is_some_and(|range| range.contains(&index.get()))
        };

        let stale: Vec<ItemIndex> = self
            .slots
            .keys()
            .copied()
            .filter(|index| !in_want(*index))
            .collect();
        for index in stale {
            self.evict(index, hooks);
        }

        let Some(range) = want else { return };
        for raw in range {
            let index = ItemIndex::new(raw);
            if self.slots.contains_key(&index) {
                continue;
            }
            self.next_token += 1;
            let token = RequestToken::new(self.next_token);
            self.slots.insert(index, Slot::pending(token));
            trace!(index = %index, token = token.get(), "load issued");
            hooks.slot_created(index, self.layout.item_position(index));
            hooks.begin_load(index, token);
        }
    }

    /// Deliver the result of an asynchronous load.
    ///
    /// Stale deliveries - no slot at the index, or a token that is not the
    /// slot's current one - are discarded; a stale `Success` has its
    /// resource disposed immediately so nothing leaks. A current `Failure`
    /// moves the slot to `Failed` and, while the retry budget lasts,
    /// schedules a retry under a freshly minted token.
    pub fn on_load_result(
        &mut self,
        index: ItemIndex,
        token: RequestToken,
        outcome: LoadOutcome<R>,
        hooks: &mut impl GalleryHooks<R>,
    ) {
        let Some(slot) = self.slots.get_mut(&index) else {
            debug!(index = %index, token = token.get(), "stale completion: slot evicted");
            if let LoadOutcome::Success(resource) = outcome {
                hooks.dispose(resource);
            }
            return;
        };
        if slot.token != token {
            debug!(index = %index, token = token.get(), "stale completion: token superseded");
            if let LoadOutcome::Success(resource) = outcome {
                hooks.dispose(resource);
            }
            return;
        }
        if !slot.state.is_pending() {
            // Loader contract is at-most-once per token; tolerate a
            // duplicate delivery anyway.
            debug!(index = %index, token = token.get(), "duplicate completion ignored");
            if let LoadOutcome::Success(resource) = outcome {
                hooks.dispose(resource);
            }
            return;
        }

        match outcome {
            LoadOutcome::Success(resource) => {
                slot.state = SlotState::Loaded(resource);
                let SlotState::Loaded(resource) = &slot.state else {
                    unreachable!()
                };
                trace!(index = %index, "load completed");
                hooks.slot_loaded(index, resource, self.layout.item_position(index));
            }
            LoadOutcome::Failure => {
                slot.attempts += 1;
                slot.state = SlotState::Failed;
                hooks.slot_failed(index);
                if slot.attempts <= self.retry.max_retries {
                    self.next_token += 1;
                    let retry_token = RequestToken::new(self.next_token);
                    slot.token = retry_token;
                    debug!(
                        index = %index,
                        attempt = slot.attempts,
                        "load failed, retry scheduled"
                    );
                    hooks.schedule_retry(index, retry_token, self.retry.delay);
                } else {
                    warn!(index = %index, attempts = slot.attempts, "load failed, retries exhausted");
                }
            }
        }
    }

    /// Cosmetic progress forwarding for a current in-flight load.
    pub fn on_load_progress(
        &mut self,
        index: ItemIndex,
        token: RequestToken,
        fraction: f64,
        hooks: &mut impl GalleryHooks<R>,
    ) {
        let current = self
            .slots
            .get(&index)
            .is_some_and(|slot| slot.token == token && slot.state.is_pending());
        if current {
            hooks.slot_progress(index, fraction.clamp(0.0, 1.0));
        }
    }

    /// Deliver a due retry previously handed to the [`RetryScheduler`].
    ///
    /// Acts only when the slot still exists, the token matches and the
    /// state is `Failed`; everything else means the retry was overtaken by
    /// an eviction or a newer request and is ignored.
    pub fn retry(
        &mut self,
        index: ItemIndex,
        token: RequestToken,
        hooks: &mut impl GalleryHooks<R>,
    ) {
        let Some(slot) = self.slots.get_mut(&index) else {
            debug!(index = %index, "stale retry: slot evicted");
            return;
        };
        if slot.token != token || !slot.state.is_failed() {
            debug!(index = %index, "stale retry: superseded");
            return;
        }
        slot.state = SlotState::Pending;
        trace!(index = %index, token = token.get(), attempt = slot.attempts + 1, "retrying load");
        hooks.begin_load(index, token);
    }

    /// Evict every tracked slot (teardown).
    pub fn clear(&mut self, hooks: &mut impl GalleryHooks<R>) {
        let tracked: Vec<ItemIndex> = self.slots.keys().copied().collect();
        for index in tracked {
            self.evict(index, hooks);
        }
    }

    /// Remove one slot: dispose its resource if loaded, then notify the
    /// observer. The in-flight load, if any, is not cancelled - its
    /// eventual completion will arrive stale and be discarded.
    fn evict(&mut self, index: ItemIndex, hooks: &mut impl GalleryHooks<R>) {
        let Some(mut slot) = self.slots.remove(&index) else {
            return;
        };
        trace!(index = %index, "slot evicted");
        if let Some(resource) = slot.take_resource() {
            hooks.dispose(resource);
        }
        hooks.slot_removed(index);
    }
}
