//! Per-item bookkeeping record.

use crate::model::RequestToken;

/// Lifecycle state of a tracked slot.
///
/// One variant per state rather than a struct of nullable fields: a slot
/// can only hold a resource while `Loaded`, so eviction and completion
/// handling never have to null-check.
///
/// Transitions: `Pending -> Loaded` on success, `Pending -> Failed` on
/// failure, `Failed -> Pending` when a scheduled retry fires. Eviction
/// removes the slot in any state; a removed slot is terminal and a later
/// reconciliation creates a brand-new slot for the same index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotState<R> {
    /// Load issued, result not yet delivered.
    Pending,
    /// Resource materialized and owned by the slot.
    Loaded(R),
    /// Last attempt failed; waiting for a scheduled retry or eviction.
    Failed,
}

impl<R> SlotState<R> {
    /// True while a load is in flight.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// True once a resource is held.
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    /// True after a failed attempt, before retry or eviction.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

/// Bookkeeping for one tracked item index.
///
/// `token` identifies the slot's *current* load request; completions and
/// retries carrying any other token are stale and ignored. `attempts`
/// counts failures so the retry policy stays bounded.
#[derive(Debug)]
pub struct Slot<R> {
    /// Token of the most recently issued (or scheduled) load.
    pub token: RequestToken,
    /// Failed attempts so far.
    pub attempts: u32,
    /// Current lifecycle state.
    pub state: SlotState<R>,
}

impl<R> Slot<R> {
    /// Fresh slot in `Pending` state for a newly issued load.
    pub fn pending(token: RequestToken) -> Self {
        Self {
            token,
            attempts: 0,
            state: SlotState::Pending,
        }
    }

    /// Take the resource out, if loaded, leaving the slot `Failed`.
    ///
    /// Only used on the eviction path where the slot is dropped
    /// immediately afterward.
    pub fn take_resource(&mut self) -> Option<R> {
        match std::mem::replace(&mut self.state, SlotState::Failed) {
            SlotState::Loaded(resource) => Some(resource),
            other => {
                self.state = other;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_constructor_starts_clean() {
        let slot: Slot<u8> = Slot::pending(RequestToken::new(1));
        assert!(slot.state.is_pending());
        assert_eq!(slot.attempts, 0);
        assert_eq!(slot.token, RequestToken::new(1));
    }

    #[test]
    fn state_predicates_are_exclusive() {
        let pending: SlotState<u8> = SlotState::Pending;
        assert!(pending.is_pending() && !pending.is_loaded() && !pending.is_failed());

        let loaded = SlotState::Loaded(7u8);
        assert!(loaded.is_loaded() && !loaded.is_pending() && !loaded.is_failed());

        let failed: SlotState<u8> = SlotState::Failed;
        assert!(failed.is_failed() && !failed.is_pending() && !failed.is_loaded());
    }

    #[test]
    fn take_resource_from_loaded_slot() {
        let mut slot = Slot::pending(RequestToken::new(1));
        slot.state = SlotState::Loaded("res");
        assert_eq!(slot.take_resource(), Some("res"));
        assert_eq!(slot.take_resource(), None);
    }

    #[test]
    fn take_resource_preserves_non_loaded_state() {
        let mut slot: Slot<&str> = Slot::pending(RequestToken::new(1));
        assert_eq!(slot.take_resource(), None);
        assert!(slot.state.is_pending());
    }
}
