//! Domain model: list geometry, scroll state, identifiers and errors.

pub mod error;
pub mod layout;
pub mod scroll;
pub mod types;

pub use error::{AppError, LayoutError};
pub use layout::ListLayout;
pub use scroll::ScrollState;
pub use types::{ItemIndex, ItemPosition, LoadOutcome, RequestToken};
