//! Collaborator seams between the manager and its environment.
//!
//! The manager owns slot bookkeeping and nothing else. Starting loads,
//! freeing resources, scheduling retries and updating visuals are all
//! capabilities injected through these traits, so the core makes no
//! assumption about timing mechanisms, rendering or how bytes are fetched.
//! In the demo binary the TUI shell implements all four; in tests a
//! recording harness does.

use crate::model::{ItemIndex, ItemPosition, RequestToken};
use std::time::Duration;

/// Starts asynchronous loads.
///
/// `begin_load` is fire-and-forget: the environment delivers the eventual
/// result back through `WindowedResourceManager::on_load_result` with the
/// same token, at any later time, at most once per token. A load that
/// never completes is fine - its slot stays `Pending` and remains
/// evictable.
pub trait ResourceLoader {
    /// Start loading the item, keyed by the request token.
    fn begin_load(&mut self, index: ItemIndex, token: RequestToken);
}

/// Releases successfully loaded resources.
///
/// Called exactly once per resource: either when its slot is evicted, or
/// immediately when a completion arrives stale (its slot already gone or
/// superseded).
pub trait ResourceDisposer<R> {
    /// Release the resource.
    fn dispose(&mut self, resource: R);
}

/// Presentation callbacks for slot-state transitions.
///
/// The rendering layer creates/updates/destroys visuals from these without
/// the manager knowing about pixels or widgets. All methods are
/// notifications; none may call back into the manager.
pub trait SlotObserver<R> {
    /// A slot entered the window; a placeholder can be shown.
    fn slot_created(&mut self, index: ItemIndex, position: ItemPosition);

    /// Cosmetic load-progress update, `fraction` in `[0, 1]`. Default
    /// implementation ignores it.
    fn slot_progress(&mut self, index: ItemIndex, fraction: f64) {
        let _ = (index, fraction);
    }

    /// The slot's load completed; the resource can be presented.
    fn slot_loaded(&mut self, index: ItemIndex, resource: &R, position: ItemPosition);

    /// The slot's load failed; show a failed affordance until the retry
    /// fires or the slot is evicted.
    fn slot_failed(&mut self, index: ItemIndex);

    /// The slot left the window; tear down its visuals.
    fn slot_removed(&mut self, index: ItemIndex);
}

/// Schedules retry delivery.
///
/// The manager decides *that* a retry happens and with which token; the
/// environment decides *when*, calling `WindowedResourceManager::retry`
/// with the same (index, token) pair after the delay. A retry delivered
/// for an evicted or superseded slot is ignored by the manager, so a
/// scheduler never needs to cancel anything.
pub trait RetryScheduler {
    /// Arrange for `retry(index, token)` to be delivered after `delay`.
    fn schedule_retry(&mut self, index: ItemIndex, token: RequestToken, delay: Duration);
}

/// Everything the manager needs from its environment, as one context
/// parameter. Blanket-implemented for any type providing the four seams.
pub trait GalleryHooks<R>:
    ResourceLoader + ResourceDisposer<R> + SlotObserver<R> + RetryScheduler
{
}

impl<R, T> GalleryHooks<R> for T where
    T: ResourceLoader + ResourceDisposer<R> + SlotObserver<R> + RetryScheduler
{
}

/// Bounded retry policy for failed loads.
///
/// The default retries exactly once after a short fixed delay.
/// No backoff: the delay is constant across attempts. A slot that exhausts
/// its retries stays `Failed` until evicted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retries after the initial attempt.
    pub max_retries: u32,
    /// Fixed delay before a retry fires.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 1,
            delay: Duration::from_millis(500),
        }
    }
}
