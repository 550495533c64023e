//! Core domain newtypes

/// Index of an item in the virtual list. 0-indexed, unique per item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ItemIndex(usize);

impl ItemIndex {
    /// Create a new ItemIndex from a raw 0-based value.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw 0-based index value.
    pub fn get(&self) -> usize {
        self.0
    }

    /// Get the 1-based index for display purposes.
    pub fn display(&self) -> usize {
        self.0 + 1
    }
}

impl From<usize> for ItemIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl std::fmt::Display for ItemIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of one in-flight load request.
///
/// Minted fresh by the manager for every load it issues, including retries.
/// A completion is matched against the slot's *current* token, never against
/// the index alone: a result carrying an outdated token belongs to a load
/// that was superseded (evicted and re-created, or retried) and must be
/// discarded rather than attached to the newer slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    /// Create a token from a raw counter value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw counter value.
    pub fn get(&self) -> u64 {
        self.0
    }
}

/// Layout-derived position of an item.
///
/// `y` is the top edge of the item in content coordinates (offset 0 =
/// content top); `row`/`col` locate the item in the grid. Positions are
/// recomputed from the layout on demand, never stored in slots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemPosition {
    /// Grid row containing the item.
    pub row: usize,
    /// Grid column containing the item.
    pub col: usize,
    /// Top edge of the item in content coordinates.
    pub y: f64,
}

/// Result of one asynchronous load attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome<R> {
    /// The loader produced a resource.
    Success(R),
    /// The loader reported failure; the manager schedules a bounded retry.
    Failure,
}
