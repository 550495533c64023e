//! Shared fixtures for the integration tests: a recording environment
//! built entirely on the public API.

// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

use lazyrow::manager::{
    ResourceDisposer, ResourceLoader, RetryPolicy, RetryScheduler, SlotObserver,
};
use lazyrow::model::{ItemIndex, ItemPosition, ListLayout, RequestToken};
use std::time::Duration;

/// A load-once "resource" that remembers which item produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payload(pub usize);

/// Records manager side effects for assertions.
#[derive(Debug, Default)]
pub struct Env {
    pub loads: Vec<(ItemIndex, RequestToken)>,
    pub disposed: Vec<Payload>,
    pub retries: Vec<(ItemIndex, RequestToken, Duration)>,
    pub created: Vec<ItemIndex>,
    pub removed: Vec<ItemIndex>,
}

impl Env {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent pending load for an index, if any.
    pub fn last_load_for(&self, index: ItemIndex) -> Option<RequestToken> {
        self.loads
            .iter()
            .rev()
            .find(|(i, _)| *i == index)
            .map(|(_, token)| *token)
    }
}

impl ResourceLoader for Env {
    fn begin_load(&mut self, index: ItemIndex, token: RequestToken) {
        self.loads.push((index, token));
    }
}

impl ResourceDisposer<Payload> for Env {
    fn dispose(&mut self, resource: Payload) {
        self.disposed.push(resource);
    }
}

impl SlotObserver<Payload> for Env {
    fn slot_created(&mut self, index: ItemIndex, _position: ItemPosition) {
        self.created.push(index);
    }

    fn slot_loaded(&mut self, _index: ItemIndex, _resource: &Payload, _position: ItemPosition) {}

    fn slot_failed(&mut self, _index: ItemIndex) {}

    fn slot_removed(&mut self, index: ItemIndex) {
        self.removed.push(index);
    }
}

impl RetryScheduler for Env {
    fn schedule_retry(&mut self, index: ItemIndex, token: RequestToken, delay: Duration) {
        self.retries.push((index, token, delay));
    }
}

/// The demo scenario: 50 items, 1200 high, 20 padding, a 1000-unit
/// viewport and 3 buffer rows in a single column.
pub fn demo_layout() -> ListLayout {
    ListLayout::new(50, 1200.0, 20.0, 1000.0, 3, 1).unwrap()
}

/// Retry policy used by the demo: one retry after 500 ms.
pub fn demo_retry() -> RetryPolicy {
    RetryPolicy {
        max_retries: 1,
        delay: Duration::from_millis(500),
    }
}
