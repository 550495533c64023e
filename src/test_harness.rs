//! Recording harness for manager unit tests.
//!
//! Implements all four collaborator seams and records every call, so
//! tests can assert on side effects (which loads were issued, what was
//! disposed, callback ordering) without any timing machinery.

use crate::manager::{ResourceDisposer, ResourceLoader, RetryScheduler, SlotObserver};
use crate::model::{ItemIndex, ItemPosition, RequestToken};
use std::time::Duration;

/// One recorded hook invocation, in arrival order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HarnessEvent {
    /// `slot_created`
    Created(ItemIndex),
    /// `begin_load`
    Load(ItemIndex),
    /// `slot_loaded`
    Loaded(ItemIndex),
    /// `slot_failed`
    Failed(ItemIndex),
    /// `slot_removed`
    Removed(ItemIndex),
    /// `dispose`
    Disposed,
    /// `schedule_retry`
    RetryScheduled(ItemIndex),
    /// `slot_progress`
    Progress(ItemIndex),
}

/// Records every collaborator call made by the manager.
#[derive(Debug, Default)]
pub struct RecordingHarness<R> {
    /// All events in arrival order (for ordering assertions).
    pub events: Vec<HarnessEvent>,
    /// `begin_load` calls.
    pub loads: Vec<(ItemIndex, RequestToken)>,
    /// `slot_created` calls.
    pub created: Vec<ItemIndex>,
    /// `slot_loaded` calls.
    pub loaded: Vec<ItemIndex>,
    /// `slot_failed` calls.
    pub failed: Vec<ItemIndex>,
    /// `slot_removed` calls.
    pub removed: Vec<ItemIndex>,
    /// Disposed resources, in disposal order.
    pub disposed: Vec<R>,
    /// `schedule_retry` calls.
    pub retries: Vec<(ItemIndex, RequestToken, Duration)>,
    /// `slot_progress` calls.
    pub progress: Vec<(ItemIndex, f64)>,
    /// Positions reported via `slot_created`.
    pub positions: Vec<(ItemIndex, ItemPosition)>,
}

impl<R> RecordingHarness<R> {
    /// Empty harness.
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            loads: Vec::new(),
            created: Vec::new(),
            loaded: Vec::new(),
            failed: Vec::new(),
            removed: Vec::new(),
            disposed: Vec::new(),
            retries: Vec::new(),
            progress: Vec::new(),
            positions: Vec::new(),
        }
    }

    /// Forget everything recorded so far (disposals included).
    pub fn clear_events(&mut self) {
        self.events.clear();
        self.loads.clear();
        self.created.clear();
        self.loaded.clear();
        self.failed.clear();
        self.removed.clear();
        self.disposed.clear();
        self.retries.clear();
        self.progress.clear();
        self.positions.clear();
    }
}

impl<R> ResourceLoader for RecordingHarness<R> {
    fn begin_load(&mut self, index: ItemIndex, token: RequestToken) {
        self.events.push(HarnessEvent::Load(index));
        self.loads.push((index, token));
    }
}

impl<R> ResourceDisposer<R> for RecordingHarness<R> {
    fn dispose(&mut self, resource: R) {
        self.events.push(HarnessEvent::Disposed);
        self.disposed.push(resource);
    }
}

impl<R> SlotObserver<R> for RecordingHarness<R> {
    fn slot_created(&mut self, index: ItemIndex, position: ItemPosition) {
        self.events.push(HarnessEvent::Created(index));
        self.created.push(index);
        self.positions.push((index, position));
    }

    fn slot_progress(&mut self, index: ItemIndex, fraction: f64) {
        self.events.push(HarnessEvent::Progress(index));
        self.progress.push((index, fraction));
    }

    fn slot_loaded(&mut self, index: ItemIndex, _resource: &R, _position: ItemPosition) {
        self.events.push(HarnessEvent::Loaded(index));
        self.loaded.push(index);
    }

    fn slot_failed(&mut self, index: ItemIndex) {
        self.events.push(HarnessEvent::Failed(index));
        self.failed.push(index);
    }

    fn slot_removed(&mut self, index: ItemIndex) {
        self.events.push(HarnessEvent::Removed(index));
        self.removed.push(index);
    }
}

impl<R> RetryScheduler for RecordingHarness<R> {
    fn schedule_retry(&mut self, index: ItemIndex, token: RequestToken, delay: Duration) {
        self.events.push(HarnessEvent::RetryScheduled(index));
        self.retries.push((index, token, delay));
    }
}
